//! Helpers reading CI-provided environment overrides.

pub mod property_test_profile;
