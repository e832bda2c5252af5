use ndarray::Array1;
use rand::Rng;

use crate::config::BatchConfig;
use crate::dataset::Example;
use crate::error::Result;
use crate::loss::logistic_gradient;
use crate::step::GradientStep;
use crate::Scalar;

use super::{Core, GradientDescent};

/// Full-batch descent: every iteration aggregates the gradient over the
/// whole dataset and stops purely on the iteration budget. The last iterate
/// is the result; there is no best-so-far tracking.
pub struct BatchGradientDescent<F, S, R> {
    core: Core<F, S, R>,
    iterations_multiplier: usize,
    max_iterations: usize,
}

impl<F: Scalar, S: GradientStep<F>, R: Rng> BatchGradientDescent<F, S, R> {
    /// Validates `config` before any optimizer state is sized.
    pub fn new(
        dataset: Vec<Example<F>>,
        step: S,
        config: &BatchConfig,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            core: Core::new(dataset, step, config.learning_rate(), rng),
            iterations_multiplier: config.iterations_multiplier(),
            max_iterations: 0,
        })
    }
}

impl<F: Scalar, S: GradientStep<F>, R: Rng> GradientDescent<F>
    for BatchGradientDescent<F, S, R>
{
    type Step = S;
    type Rng = R;

    fn core(&self) -> &Core<F, S, R> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core<F, S, R> {
        &mut self.core
    }

    fn setup(&mut self) -> Result<()> {
        self.max_iterations = self.core.dataset.len() * self.iterations_multiplier;
        Ok(())
    }

    fn compute_gradient(&mut self) {
        let core = &mut self.core;
        core.gradient.fill(F::zero());
        for example in &core.dataset {
            let g = logistic_gradient(&core.weights, example);
            core.gradient.scaled_add(example.weight, &g);
        }
        // importance weights are already folded into the aggregate
        core.example_weight = F::one();
    }

    fn finish_iteration(&mut self) {
        self.core.iteration += 1;
    }

    fn should_run(&self) -> bool {
        self.core.iteration < self.max_iterations
    }

    fn final_weights(&self) -> Array1<F> {
        self.core.weights.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{Adam, PlainStep};
    use ndarray::arr1;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn separable_1d() -> Vec<Example<f64>> {
        vec![
            Example::new(arr1(&[2.0]), 1.0),
            Example::new(arr1(&[1.0]), 1.0),
            Example::new(arr1(&[-1.0]), -1.0),
            Example::new(arr1(&[-2.0]), -1.0),
        ]
    }

    #[test]
    fn exhausts_exactly_the_iteration_budget() {
        let config = BatchConfig {
            iterations_multiplier: Some(3),
            ..BatchConfig::default()
        };
        let mut descent = BatchGradientDescent::new(
            separable_1d(),
            PlainStep::new(),
            &config,
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        descent.optimize().unwrap();
        assert_eq!(descent.iterations(), 4 * 3);
    }

    #[test]
    fn converges_on_separable_data() {
        let config = BatchConfig {
            learning_rate: Some(0.1),
            iterations_multiplier: Some(100),
        };
        let mut descent = BatchGradientDescent::new(
            separable_1d(),
            Adam::new(),
            &config,
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        let weights = descent.optimize().unwrap();
        // Positive weight separates the labels perfectly.
        assert!(weights[0] > 0.0);
    }

    #[test]
    fn exposes_step_diagnostics_to_callers() {
        let mut descent = BatchGradientDescent::new(
            separable_1d(),
            Adam::new(),
            &BatchConfig::default(),
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        // sentinel before the first update
        assert_eq!(descent.step().weight_change(), 1.0);

        descent.optimize().unwrap();
        let change = descent.step().weight_change();
        assert!(change.is_finite());
        assert!(change < 1.0, "last delta norm: {change}");
    }

    #[test]
    fn rejects_invalid_config_before_sizing_state() {
        let config = BatchConfig {
            learning_rate: Some(0.0),
            ..BatchConfig::default()
        };
        assert!(BatchGradientDescent::new(
            separable_1d(),
            PlainStep::<f64>::new(),
            &config,
            StdRng::seed_from_u64(7),
        )
        .is_err());
    }

    #[test]
    fn empty_dataset_fails_at_initialize() {
        let mut descent = BatchGradientDescent::new(
            Vec::<Example<f64>>::new(),
            PlainStep::new(),
            &BatchConfig::default(),
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        assert!(descent.optimize().is_err());
    }
}
