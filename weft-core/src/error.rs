//! Error types for the weft core library.
//!
//! Every fallible operation in the crate reports a [`GraphError`]. Each
//! variant carries the offending values so callers (typically a host
//! binding layer) can translate failures into their own diagnostics, and
//! maps to a stable [`GraphErrorCode`] for logs and metrics.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced by graph construction, editing and analysis.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// Vertex and edge counts (or the buffers describing them) disagree.
    #[error("invalid graph size (vertices={vertex_count}, edges={edge_count}): {reason}")]
    InvalidSize {
        /// Requested number of vertices.
        vertex_count: usize,
        /// Requested number of edges.
        edge_count: usize,
        /// Why the combination was rejected.
        reason: &'static str,
    },
    /// An edge endpoint fell outside `[0, vertex_count)`.
    #[error("vertex id {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending vertex id.
        index: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge id fell outside `[0, edge_count)`.
    #[error("edge id {edge} is out of range for {edge_count} edges")]
    EdgeOutOfRange {
        /// The offending edge id.
        edge: usize,
        /// Number of edges in the graph.
        edge_count: usize,
    },
    /// Two stores or buffers that must agree in length did not.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Length required by the receiving side.
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },
    /// A traversal seed fell outside `[0, vertex_count)`.
    #[error("seed {seed} is out of range for {vertex_count} vertices")]
    SeedOutOfRange {
        /// The offending seed vertex.
        seed: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// A shortest-path or affinity computation met a negative weight.
    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight {
        /// Edge id carrying the weight.
        edge: usize,
        /// The negative weight.
        weight: f64,
    },
    /// An edge weight was NaN, or infinite where a finite affinity is required.
    #[error("edge {edge} has a non-finite weight")]
    NonFiniteWeight {
        /// Edge id carrying the weight.
        edge: usize,
    },
    /// A point coordinate was NaN or infinite.
    #[error("point {row} has a non-finite coordinate in column {column}")]
    NonFiniteCoordinate {
        /// Row (point) index.
        row: usize,
        /// Column (feature) index.
        column: usize,
    },
    /// Two point sets or a buffer and its declared shape disagree.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimension on the left-hand side.
        left: usize,
        /// Dimension on the right-hand side.
        right: usize,
    },
    /// An algorithm parameter was outside its accepted domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as exposed by the API.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The grid builder could not index the supplied lattice coordinates.
    #[error("graph construction failed: {reason}")]
    GraphConstructionFailed {
        /// Description of the degenerate input.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Vertex and edge counts are inconsistent.
        InvalidSize => InvalidSize { .. } => "GRAPH_INVALID_SIZE",
        /// An edge endpoint fell outside the vertex range.
        IndexOutOfRange => IndexOutOfRange { .. } => "GRAPH_INDEX_OUT_OF_RANGE",
        /// An edge id fell outside the edge range.
        EdgeOutOfRange => EdgeOutOfRange { .. } => "GRAPH_EDGE_OUT_OF_RANGE",
        /// Two sized stores disagreed.
        SizeMismatch => SizeMismatch { .. } => "GRAPH_SIZE_MISMATCH",
        /// A traversal seed fell outside the vertex range.
        SeedOutOfRange => SeedOutOfRange { .. } => "GRAPH_SEED_OUT_OF_RANGE",
        /// A negative weight was rejected.
        NegativeWeight => NegativeWeight { .. } => "GRAPH_NEGATIVE_WEIGHT",
        /// A NaN weight was rejected.
        NonFiniteWeight => NonFiniteWeight { .. } => "GRAPH_NON_FINITE_WEIGHT",
        /// A non-finite point coordinate was rejected.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "GRAPH_NON_FINITE_COORDINATE",
        /// Point-set dimensions disagreed.
        DimensionMismatch => DimensionMismatch { .. } => "GRAPH_DIMENSION_MISMATCH",
        /// A parameter was outside its domain.
        InvalidParameter => InvalidParameter { .. } => "GRAPH_INVALID_PARAMETER",
        /// The grid builder met degenerate input.
        GraphConstructionFailed => GraphConstructionFailed { .. } => "GRAPH_CONSTRUCTION_FAILED",
    }
}

impl GraphError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
