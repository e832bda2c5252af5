use ndarray::NdFloat;
use rand_distr::num_traits::FromPrimitive;

pub mod config;
pub mod dataset;
pub mod descent;
pub mod error;
pub mod loss;
pub mod step;

pub use config::{AdamConfig, BatchConfig, StochasticConfig};
pub use dataset::Example;
pub use descent::batch::BatchGradientDescent;
pub use descent::stochastic::StochasticGradientDescent;
pub use descent::GradientDescent;
pub use error::{OptimError, Result};
pub use step::GradientStep;

/// The scalar element type every weight vector, gradient and loss value is
/// generic over. Implemented for `f32` and `f64`.
pub trait Scalar: NdFloat + FromPrimitive {}
impl<S> Scalar for S where S: NdFloat + FromPrimitive {}
