use ndarray::Array1;

use crate::Scalar;

use super::GradientStep;

/// Plain fixed-rate step: `w = w - lr * example_weight * g`.
#[derive(Debug, Clone)]
pub struct PlainStep<F> {
    weight_change: F,
}

impl<F: Scalar> PlainStep<F> {
    pub fn new() -> Self {
        Self {
            weight_change: F::one(),
        }
    }
}

impl<F: Scalar> Default for PlainStep<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> GradientStep<F> for PlainStep<F> {
    fn init(&mut self, _size: usize) {
        self.weight_change = F::one();
    }

    fn update(
        &mut self,
        weights: &mut Array1<F>,
        gradient: &Array1<F>,
        learning_rate: F,
        example_weight: F,
    ) {
        let delta = gradient * (learning_rate * example_weight);
        *weights -= &delta;
        self.weight_change = delta.dot(&delta).sqrt();
    }

    fn weight_change(&self) -> F {
        self.weight_change
    }
}
