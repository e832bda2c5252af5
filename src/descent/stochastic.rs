use log::debug;
use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::StochasticConfig;
use crate::dataset::Example;
use crate::error::{OptimError, Result};
use crate::loss::{cross_entropy, logistic_gradient};
use crate::step::GradientStep;
use crate::Scalar;

use super::{Core, GradientDescent};

/// Stochastic descent: one example per iteration over shuffled epochs, a
/// held-out validation split, and early stopping. The result is the weight
/// vector that scored best on the validation split, not the final iterate,
/// so overfitting late iterates are discarded.
pub struct StochasticGradientDescent<F, S, R> {
    core: Core<F, S, R>,
    iterations_multiplier: usize,
    validation_fraction: f64,
    validation_check_multiplier: usize,
    patience: usize,

    validation: Vec<Example<F>>,
    cursor: usize,
    check_interval: usize,
    max_iterations: usize,
    best_weights: Array1<F>,
    best_error: F,
    checks_since_improvement: usize,
}

impl<F: Scalar, S: GradientStep<F>, R: Rng> StochasticGradientDescent<F, S, R> {
    /// Validates `config` before any optimizer state is sized.
    pub fn new(
        dataset: Vec<Example<F>>,
        step: S,
        config: &StochasticConfig,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            core: Core::new(dataset, step, config.learning_rate(), rng),
            iterations_multiplier: config.iterations_multiplier(),
            validation_fraction: config.validation_fraction(),
            validation_check_multiplier: config.validation_check_multiplier(),
            patience: config.patience(),
            validation: Vec::new(),
            cursor: 0,
            check_interval: 0,
            max_iterations: 0,
            best_weights: Array1::zeros(0),
            best_error: F::infinity(),
            checks_since_improvement: 0,
        })
    }

    /// Validation error of the best snapshot so far; infinite until the
    /// first check has run.
    pub fn best_validation_error(&self) -> F {
        self.best_error
    }
}

impl<F: Scalar, S: GradientStep<F>, R: Rng> GradientDescent<F>
    for StochasticGradientDescent<F, S, R>
{
    type Step = S;
    type Rng = R;

    fn core(&self) -> &Core<F, S, R> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core<F, S, R> {
        &mut self.core
    }

    fn set_dataset(&mut self, dataset: Vec<Example<F>>) {
        self.core.dataset = dataset;
        self.validation.clear();
    }

    /// Carves the validation split out of a shuffled dataset and snapshots
    /// the initial weight vector with a worst-possible sentinel error.
    fn setup(&mut self) -> Result<()> {
        let core = &mut self.core;

        // return any previously carved split before re-splitting
        core.dataset.append(&mut self.validation);
        core.dataset.shuffle(&mut core.rng);

        let total = core.dataset.len();
        let held_out = (total as f64 * self.validation_fraction).round() as usize;
        if held_out >= total {
            return Err(OptimError::EmptyDataset);
        }
        self.validation = core.dataset.split_off(total - held_out);

        self.cursor = 0;
        self.check_interval = self.validation.len() * self.validation_check_multiplier;
        self.max_iterations = core.dataset.len() * self.iterations_multiplier;
        self.best_weights = core.weights.clone();
        self.best_error = F::infinity();
        self.checks_since_improvement = 0;
        debug!(
            "stochastic descent: {} training / {} validation examples, budget {}",
            core.dataset.len(),
            self.validation.len(),
            self.max_iterations
        );
        Ok(())
    }

    fn compute_gradient(&mut self) {
        let core = &mut self.core;

        // epoch boundary: reshuffle and rewind the cursor
        if core.iteration % core.dataset.len() == 0 {
            core.dataset.shuffle(&mut core.rng);
            self.cursor = 0;
        }

        let example = &core.dataset[self.cursor];
        self.cursor += 1;

        core.gradient = logistic_gradient(&core.weights, example);
        core.example_weight = example.weight;
    }

    fn finish_iteration(&mut self) {
        self.core.iteration += 1;

        if self.check_interval == 0 || self.core.iteration % self.check_interval != 0 {
            return;
        }

        let error = cross_entropy(&self.core.weights, &self.validation);
        if error < self.best_error {
            debug!(
                "iteration {}: validation error improved to {}",
                self.core.iteration, error
            );
            self.best_error = error;
            self.best_weights = self.core.weights.clone();
            self.checks_since_improvement = 0;
        } else {
            self.checks_since_improvement += 1;
        }
    }

    fn should_run(&self) -> bool {
        // budget and patience are independent hard bounds
        self.core.iteration < self.max_iterations
            && self.checks_since_improvement <= self.patience
    }

    fn final_weights(&self) -> Array1<F> {
        // fall back to the last iterate when no check ever completed
        if self.best_error.is_finite() {
            self.best_weights.clone()
        } else {
            self.core.weights.clone()
        }
    }
}
