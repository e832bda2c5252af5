use thiserror::Error;

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimError>;

/// Errors surfaced before or during dataset ingestion. Once the loop is
/// running nothing is caught: numerical degeneracy (NaN gradients, runaway
/// learning rates) propagates silently into the weight vector.
#[derive(Debug, Error)]
pub enum OptimError {
    /// A configuration parameter fell outside its valid range.
    #[error("invalid configuration: {name} must lie in {range}, got {value}")]
    InvalidConfig {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the required range.
        range: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The optimizer was asked to run without any training examples.
    #[error("empty dataset: at least one training example is required")]
    EmptyDataset,

    /// An example's feature vector does not match the dataset dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the first example in the dataset.
        expected: usize,
        /// Dimension of the offending example.
        actual: usize,
    },
}
