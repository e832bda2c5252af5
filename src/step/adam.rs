use ndarray::{Array1, Zip};

use crate::config::AdamConfig;
use crate::error::Result;
use crate::Scalar;

use super::GradientStep;

/// Adaptive moment estimation step.
#[derive(Debug, Clone)]
pub struct Adam<F> {
    beta1: F,
    beta2: F,
    epsilon: F,
    m: Array1<F>,
    v: Array1<F>,
    t: i32,
    weight_change: F,
}

impl<F: Scalar> Adam<F> {
    /// An Adam step with the reference-paper defaults
    /// (beta1 = 0.9, beta2 = 0.999, epsilon = 1e-8).
    pub fn new() -> Self {
        Self::with_parameters(
            AdamConfig::DEFAULT_BETA1,
            AdamConfig::DEFAULT_BETA2,
            AdamConfig::DEFAULT_EPSILON,
        )
    }

    /// Builds a step from a validated configuration. Fails without
    /// allocating any step state if a parameter is out of range.
    pub fn from_config(config: &AdamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parameters(
            config.beta1(),
            config.beta2(),
            config.epsilon(),
        ))
    }

    fn with_parameters(beta1: f64, beta2: f64, epsilon: f64) -> Self {
        Self {
            beta1: F::from_f64(beta1).unwrap(),
            beta2: F::from_f64(beta2).unwrap(),
            epsilon: F::from_f64(epsilon).unwrap(),
            m: Array1::zeros(0),
            v: Array1::zeros(0),
            t: 0,
            weight_change: F::one(),
        }
    }
}

impl<F: Scalar> Default for Adam<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> GradientStep<F> for Adam<F> {
    fn init(&mut self, size: usize) {
        self.m = Array1::zeros(size);
        self.v = Array1::zeros(size);
        self.t = 0;
        self.weight_change = F::one();
    }

    fn update(
        &mut self,
        weights: &mut Array1<F>,
        gradient: &Array1<F>,
        learning_rate: F,
        example_weight: F,
    ) {
        // Algorithm defined on Page 2 of https://arxiv.org/pdf/1412.6980v9.pdf

        self.t += 1;

        let b1 = self.beta1;
        let b2 = self.beta2;
        let e = self.epsilon;
        let one = F::one();

        let g = gradient * example_weight;

        // m_t = b1 * m_t-1 + (1 - b1) * g_t
        self.m.zip_mut_with(&g, |m, &g| {
            *m = *m * b1 + g * (one - b1);
        });

        // v_t = b2 * v_t-1 + (1 - b2) * g_t^2
        self.v.zip_mut_with(&g, |v, &g| {
            *v = *v * b2 + g * g * (one - b2);
        });

        // bias corrections: m_t' = m_t / (1 - b1^t), v_t' = v_t / (1 - b2^t)
        let mc = one - b1.powi(self.t);
        let vc = one - b2.powi(self.t);

        // w_t = w_t-1 - a * m_t' / (sqrt(v_t') + e)
        let mut change = F::zero();
        Zip::from(&mut *weights)
            .and(&self.m)
            .and(&self.v)
            .for_each(|w, &m, &v| {
                let delta = learning_rate * (m / mc) / ((v / vc).sqrt() + e);
                *w = *w - delta;
                change = change + delta * delta;
            });
        self.weight_change = change.sqrt();
    }

    fn weight_change(&self) -> F {
        self.weight_change
    }
}

impl<F: Scalar> Adam<F> {
    /// Bias-corrected first moment estimate after the most recent update.
    #[cfg(test)]
    pub(crate) fn corrected_first_moment(&self) -> Array1<F> {
        let mc = F::one() - self.beta1.powi(self.t);
        &self.m / mc
    }
}
