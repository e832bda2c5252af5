//! Logistic loss for labels in {-1, +1}.

use ndarray::Array1;

use crate::dataset::Example;
use crate::Scalar;

/// Gradient of the logistic loss `ln(1 + exp(-y * (w . x)))` with respect to
/// the weight vector, for a single example:
///
/// ```text
/// g = -y * x / (1 + exp(y * (w . x)))
/// ```
///
/// The example's importance weight is NOT folded in; callers pass it through
/// to the gradient step separately.
pub fn logistic_gradient<F: Scalar>(weights: &Array1<F>, example: &Example<F>) -> Array1<F> {
    let margin = example.target * weights.dot(&example.features);
    let scale = -example.target / (F::one() + margin.exp());
    &example.features * scale
}

/// Importance-weighted mean cross-entropy of `examples` under `weights`.
pub fn cross_entropy<F: Scalar>(weights: &Array1<F>, examples: &[Example<F>]) -> F {
    let mut total = F::zero();
    let mut total_weight = F::zero();
    for example in examples {
        let margin = example.target * weights.dot(&example.features);
        total = total + example.weight * (-margin).exp().ln_1p();
        total_weight = total_weight + example.weight;
    }
    if total_weight > F::zero() {
        total / total_weight
    } else {
        F::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn gradient_points_against_label_at_zero_weights() {
        // With w = 0 the margin is 0 and the scale is -y / 2.
        let w = arr1(&[0.0, 0.0]);
        let example = Example::new(arr1(&[2.0, -4.0]), 1.0);
        let g = logistic_gradient(&w, &example);
        assert_abs_diff_eq!(g[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn gradient_vanishes_for_confident_correct_prediction() {
        let w = arr1(&[100.0]);
        let example = Example::new(arr1(&[1.0]), 1.0);
        let g = logistic_gradient(&w, &example);
        assert_abs_diff_eq!(g[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn cross_entropy_at_zero_weights_is_ln_two() {
        let w = arr1(&[0.0, 0.0]);
        let examples = vec![
            Example::new(arr1(&[1.0, 0.0]), 1.0),
            Example::new(arr1(&[0.0, 1.0]), -1.0),
        ];
        assert_abs_diff_eq!(
            cross_entropy(&w, &examples),
            2.0f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn cross_entropy_weights_examples_by_importance() {
        let w = arr1(&[1.0]);
        let correct = Example::new(arr1(&[10.0]), 1.0);
        let wrong = Example::new(arr1(&[10.0]), -1.0);
        let unweighted = cross_entropy(&w, &[correct, wrong.clone()]);
        let upweighted = cross_entropy(
            &w,
            &[Example::weighted(arr1(&[10.0]), 1.0, 3.0), wrong],
        );
        // Upweighting the near-zero-loss example pulls the mean down.
        assert!(upweighted < unweighted);
    }
}
