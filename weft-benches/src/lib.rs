//! Benchmark support crate for weft.
//!
//! Provides seeded synthetic inputs and parameter types used by the
//! Criterion benchmarks for graph construction, shortest paths and
//! spanning trees.

pub mod error;
pub mod params;
pub mod synthetic;
