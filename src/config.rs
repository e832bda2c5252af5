//! Validated parameter bags for the gradient steps and descent variants.
//!
//! "Unset" is an explicit [`None`], never a sentinel value. A config built
//! from [`Default`] resolves every field to its documented default; `merge`
//! copies only the explicitly-set fields of another config over this one.
//! `validate` must pass before any optimizer state is allocated.

use crate::error::{OptimError, Result};

fn require_open_unit(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(OptimError::InvalidConfig {
            name,
            range: "(0, 1)",
            value,
        })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(OptimError::InvalidConfig {
            name,
            range: "(0, inf)",
            value,
        })
    }
}

/// Parameters of the adaptive moment estimation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdamConfig {
    pub beta1: Option<f64>,
    pub beta2: Option<f64>,
    pub epsilon: Option<f64>,
}

impl AdamConfig {
    pub const DEFAULT_BETA1: f64 = 0.9;
    pub const DEFAULT_BETA2: f64 = 0.999;
    pub const DEFAULT_EPSILON: f64 = 1e-8;

    /// Overrides this config's fields with the explicitly-set fields of
    /// `other`, leaving unset fields untouched.
    pub fn merge(&mut self, other: &AdamConfig) {
        if let Some(b1) = other.beta1 {
            self.beta1 = Some(b1);
        }
        if let Some(b2) = other.beta2 {
            self.beta2 = Some(b2);
        }
        if let Some(e) = other.epsilon {
            self.epsilon = Some(e);
        }
    }

    pub fn beta1(&self) -> f64 {
        self.beta1.unwrap_or(Self::DEFAULT_BETA1)
    }

    pub fn beta2(&self) -> f64 {
        self.beta2.unwrap_or(Self::DEFAULT_BETA2)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon.unwrap_or(Self::DEFAULT_EPSILON)
    }

    pub fn validate(&self) -> Result<()> {
        require_open_unit("beta1", self.beta1())?;
        require_open_unit("beta2", self.beta2())?;
        require_open_unit("epsilon", self.epsilon())
    }
}

/// Parameters shared by every descent variant, used directly by the
/// full-batch one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchConfig {
    pub learning_rate: Option<f64>,
    /// Iteration budget, as a multiple of the dataset size.
    pub iterations_multiplier: Option<usize>,
}

impl BatchConfig {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
    pub const DEFAULT_ITERATIONS_MULTIPLIER: usize = 10;

    pub fn merge(&mut self, other: &BatchConfig) {
        if let Some(lr) = other.learning_rate {
            self.learning_rate = Some(lr);
        }
        if let Some(m) = other.iterations_multiplier {
            self.iterations_multiplier = Some(m);
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or(Self::DEFAULT_LEARNING_RATE)
    }

    pub fn iterations_multiplier(&self) -> usize {
        self.iterations_multiplier
            .unwrap_or(Self::DEFAULT_ITERATIONS_MULTIPLIER)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("learning_rate", self.learning_rate())?;
        require_positive(
            "iterations_multiplier",
            self.iterations_multiplier() as f64,
        )
    }
}

/// Parameters of the stochastic variant: the shared learning rate and
/// iteration budget, plus the validation split and early-stopping knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StochasticConfig {
    pub learning_rate: Option<f64>,
    /// Iteration budget, as a multiple of the training-set size.
    pub iterations_multiplier: Option<usize>,
    /// Fraction of the dataset held out for validation, in [0, 1].
    pub validation_fraction: Option<f64>,
    /// A validation check runs every `validation_len * this` iterations.
    pub validation_check_multiplier: Option<usize>,
    /// Consecutive checks without improvement tolerated before stopping.
    pub patience: Option<usize>,
}

impl StochasticConfig {
    pub const DEFAULT_LEARNING_RATE: f64 = BatchConfig::DEFAULT_LEARNING_RATE;
    pub const DEFAULT_ITERATIONS_MULTIPLIER: usize = 10;
    pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.05;
    pub const DEFAULT_VALIDATION_CHECK_MULTIPLIER: usize = 5;
    pub const DEFAULT_PATIENCE: usize = 20;

    pub fn merge(&mut self, other: &StochasticConfig) {
        if let Some(lr) = other.learning_rate {
            self.learning_rate = Some(lr);
        }
        if let Some(m) = other.iterations_multiplier {
            self.iterations_multiplier = Some(m);
        }
        if let Some(f) = other.validation_fraction {
            self.validation_fraction = Some(f);
        }
        if let Some(m) = other.validation_check_multiplier {
            self.validation_check_multiplier = Some(m);
        }
        if let Some(p) = other.patience {
            self.patience = Some(p);
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or(Self::DEFAULT_LEARNING_RATE)
    }

    pub fn iterations_multiplier(&self) -> usize {
        self.iterations_multiplier
            .unwrap_or(Self::DEFAULT_ITERATIONS_MULTIPLIER)
    }

    pub fn validation_fraction(&self) -> f64 {
        self.validation_fraction
            .unwrap_or(Self::DEFAULT_VALIDATION_FRACTION)
    }

    pub fn validation_check_multiplier(&self) -> usize {
        self.validation_check_multiplier
            .unwrap_or(Self::DEFAULT_VALIDATION_CHECK_MULTIPLIER)
    }

    pub fn patience(&self) -> usize {
        self.patience.unwrap_or(Self::DEFAULT_PATIENCE)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("learning_rate", self.learning_rate())?;
        require_positive(
            "iterations_multiplier",
            self.iterations_multiplier() as f64,
        )?;
        let f = self.validation_fraction();
        if !(0.0..=1.0).contains(&f) {
            return Err(OptimError::InvalidConfig {
                name: "validation_fraction",
                range: "[0, 1]",
                value: f,
            });
        }
        require_positive(
            "validation_check_multiplier",
            self.validation_check_multiplier() as f64,
        )?;
        require_positive("patience", self.patience() as f64)
    }
}
