use thiserror::Error;

/// Errors returned by the palette algorithms in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Diversity threshold is negative or not a number.
    #[error("invalid threshold {threshold}: must be a non-negative number")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f32,
    },

    /// Color and frequency counts differ in an assignment problem.
    #[error("cardinality mismatch: {colors} colors but {frequencies} frequencies")]
    CardinalityMismatch {
        /// Number of colors supplied.
        colors: usize,
        /// Number of frequencies supplied.
        frequencies: usize,
    },

    /// A color literal could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
