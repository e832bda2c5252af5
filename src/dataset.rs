use ndarray::Array1;

use crate::error::{OptimError, Result};
use crate::Scalar;

/// A single training example: a feature vector of fixed dimension, a scalar
/// target label and a scalar importance weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Example<F> {
    pub features: Array1<F>,
    pub target: F,
    pub weight: F,
}

impl<F: Scalar> Example<F> {
    /// An example with importance weight 1.
    pub fn new(features: Array1<F>, target: F) -> Self {
        Self {
            features,
            target,
            weight: F::one(),
        }
    }

    pub fn weighted(features: Array1<F>, target: F, weight: F) -> Self {
        Self {
            features,
            target,
            weight,
        }
    }
}

/// Returns the common feature dimension of `examples`, rejecting an empty
/// dataset or one with inconsistent dimensions.
pub(crate) fn dimension_of<F: Scalar>(examples: &[Example<F>]) -> Result<usize> {
    let first = examples.first().ok_or(OptimError::EmptyDataset)?;
    let expected = first.features.len();
    for example in examples {
        let actual = example.features.len();
        if actual != expected {
            return Err(OptimError::DimensionMismatch { expected, actual });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn dimension_of_uniform_dataset() {
        let examples = vec![
            Example::new(arr1(&[1.0, 2.0]), 1.0),
            Example::weighted(arr1(&[3.0, 4.0]), -1.0, 2.0),
        ];
        assert_eq!(dimension_of(&examples).unwrap(), 2);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let examples: Vec<Example<f64>> = vec![];
        assert!(matches!(
            dimension_of(&examples),
            Err(OptimError::EmptyDataset)
        ));
    }

    #[test]
    fn mismatched_dimension_is_rejected() {
        let examples = vec![
            Example::new(arr1(&[1.0, 2.0]), 1.0),
            Example::new(arr1(&[3.0]), -1.0),
        ];
        assert!(matches!(
            dimension_of(&examples),
            Err(OptimError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
