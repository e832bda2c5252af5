use log::debug;
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::dataset::{dimension_of, Example};
use crate::error::Result;
use crate::step::GradientStep;
use crate::Scalar;

pub mod batch;
pub mod stochastic;

/// State shared by every descent variant: the dataset, the weight vector
/// being optimized, the scratch gradient overwritten each iteration, the
/// step strategy and the injected RNG.
pub struct Core<F, S, R> {
    pub(crate) dataset: Vec<Example<F>>,
    pub(crate) weights: Array1<F>,
    pub(crate) gradient: Array1<F>,
    pub(crate) example_weight: F,
    pub(crate) learning_rate: F,
    pub(crate) step: S,
    pub(crate) iteration: usize,
    pub(crate) rng: R,
}

impl<F: Scalar, S: GradientStep<F>, R: Rng> Core<F, S, R> {
    pub(crate) fn new(dataset: Vec<Example<F>>, step: S, learning_rate: f64, rng: R) -> Self {
        Self {
            dataset,
            weights: Array1::zeros(0),
            gradient: Array1::zeros(0),
            example_weight: F::one(),
            learning_rate: F::from_f64(learning_rate).unwrap(),
            step,
            iteration: 0,
            rng,
        }
    }

    /// Randomizes the weight vector, zeroes the gradient and resets the
    /// iteration counter and step state. Fails on an empty or
    /// inconsistently-dimensioned dataset.
    pub(crate) fn initialize(&mut self) -> Result<()>
    where
        StandardNormal: Distribution<F>,
    {
        let d = dimension_of(&self.dataset)?;

        let var = F::one() / F::from_usize(d).unwrap();
        let dist = Normal::new(F::zero(), var.sqrt()).unwrap();
        self.weights = Array1::from_shape_simple_fn(d, || dist.sample(&mut self.rng));

        self.gradient = Array1::zeros(d);
        self.example_weight = F::one();
        self.iteration = 0;
        self.step.init(d);
        Ok(())
    }

    /// Hands the current gradient to the step strategy, which mutates the
    /// weight vector in place.
    pub(crate) fn apply_step(&mut self) {
        let Self {
            weights,
            gradient,
            step,
            learning_rate,
            example_weight,
            ..
        } = self;
        step.update(weights, gradient, *learning_rate, *example_weight);
    }
}

/// The abstract optimization loop. Variants supply the per-iteration
/// gradient, the bookkeeping after each step and the stopping decision;
/// the provided `optimize` runs initialize -> compute gradient -> apply
/// step -> check stopping until done and returns the final weight vector.
pub trait GradientDescent<F: Scalar> {
    type Step: GradientStep<F>;
    type Rng: Rng;

    fn core(&self) -> &Core<F, Self::Step, Self::Rng>;
    fn core_mut(&mut self) -> &mut Core<F, Self::Step, Self::Rng>;

    /// Variant-specific setup, run after the shared state is initialized.
    fn setup(&mut self) -> Result<()>;

    /// Populates the gradient and the example weight for this iteration.
    fn compute_gradient(&mut self);

    /// Bookkeeping after the step has been applied.
    fn finish_iteration(&mut self);

    fn should_run(&self) -> bool;

    /// The weight vector a finished run hands back to the caller.
    fn final_weights(&self) -> Array1<F>;

    /// Replaces the dataset; takes effect on the next `optimize` call.
    fn set_dataset(&mut self, dataset: Vec<Example<F>>) {
        self.core_mut().dataset = dataset;
    }

    fn iterations(&self) -> usize {
        self.core().iteration
    }

    /// The configured step strategy, for convergence diagnostics such as
    /// [`GradientStep::weight_change`].
    fn step(&self) -> &Self::Step {
        &self.core().step
    }

    fn initialize(&mut self) -> Result<()>
    where
        StandardNormal: Distribution<F>,
    {
        self.core_mut().initialize()?;
        self.setup()
    }

    /// Runs the whole loop, blocking until a stopping condition holds.
    fn optimize(&mut self) -> Result<Array1<F>>
    where
        StandardNormal: Distribution<F>,
    {
        self.initialize()?;
        while self.should_run() {
            self.compute_gradient();
            self.core_mut().apply_step();
            self.finish_iteration();
        }
        debug!(
            "descent finished after {} iterations",
            self.core().iteration
        );
        Ok(self.final_weights())
    }
}
