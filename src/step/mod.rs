use ndarray::Array1;

use crate::Scalar;

pub mod adam;
pub mod plain;

pub use adam::Adam;
pub use plain::PlainStep;

/// A weight-update strategy: turns a computed gradient into an in-place
/// change to the weight vector.
///
/// `init` must be called once (with the weight dimension) before the first
/// `update`; calling it again resets all internal state. A dimension
/// mismatch between the initialized size and the vectors passed to `update`
/// is a programming error and panics.
pub trait GradientStep<F: Scalar> {
    fn init(&mut self, size: usize);

    /// Mutates `weights` in place from `gradient`, the positive learning
    /// rate and the example's importance weight.
    fn update(
        &mut self,
        weights: &mut Array1<F>,
        gradient: &Array1<F>,
        learning_rate: F,
        example_weight: F,
    );

    /// Euclidean norm of the most recent update's effect on the weight
    /// vector, or 1 before the first update (read: "not yet converged").
    fn weight_change(&self) -> F;
}
