//! Learning constants shared by every component of the learning loop.
//!
//! Loaded from TOML (every field optional, falling back to the usual XCS
//! defaults) or built in code with the `with_*` setters.
//!
//! ```toml
//! learning_rate = 0.2
//! prediction_error_threshold = 10.0
//! theta_ga = 25
//! do_action_set_subsumption = true
//! ```

use crate::error::{Result, XcsError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read-only configuration of an XCS population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    /// Learning rate β for prediction, error, set size, and fitness.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Error ε0 below which a classifier counts as accurate.
    #[serde(default = "default_prediction_error_threshold")]
    pub prediction_error_threshold: f64,
    /// Accuracy fall-off α for inaccurate classifiers.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Accuracy power ν for inaccurate classifiers.
    #[serde(default = "default_nu")]
    pub nu: f64,
    /// Average time-stamp gap that triggers the GA in an action set.
    #[serde(default = "default_theta_ga")]
    pub theta_ga: u64,
    /// Experience a classifier needs before it may subsume others.
    #[serde(default = "default_theta_sub")]
    pub theta_sub: u64,
    #[serde(default = "default_true")]
    pub do_action_set_subsumption: bool,
    #[serde(default = "default_initial_prediction")]
    pub initial_prediction: f64,
    #[serde(default = "default_initial_prediction_error")]
    pub initial_prediction_error: f64,
    #[serde(default = "default_initial_fitness")]
    pub initial_fitness: f64,
    /// Probability P# of generalizing a symbol when covering.
    #[serde(default = "default_generalize_probability")]
    pub generalize_probability: f64,
    /// Exploration probability ε of epsilon-greedy action selection.
    #[serde(default = "default_exploration_probability")]
    pub exploration_probability: f64,
    /// Maximum spread s0 of covering intervals.
    #[serde(default = "default_max_spread")]
    pub max_spread: f64,
}

// Default value functions
fn default_learning_rate() -> f64 { 0.2 }
fn default_prediction_error_threshold() -> f64 { 10.0 }
fn default_alpha() -> f64 { 0.1 }
fn default_nu() -> f64 { 5.0 }
fn default_theta_ga() -> u64 { 25 }
fn default_theta_sub() -> u64 { 20 }
fn default_true() -> bool { true }
fn default_initial_prediction() -> f64 { 0.01 }
fn default_initial_prediction_error() -> f64 { 0.01 }
fn default_initial_fitness() -> f64 { 0.01 }
fn default_generalize_probability() -> f64 { 0.33 }
fn default_exploration_probability() -> f64 { 0.5 }
fn default_max_spread() -> f64 { 0.5 }

impl Default for Constants {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            prediction_error_threshold: default_prediction_error_threshold(),
            alpha: default_alpha(),
            nu: default_nu(),
            theta_ga: default_theta_ga(),
            theta_sub: default_theta_sub(),
            do_action_set_subsumption: default_true(),
            initial_prediction: default_initial_prediction(),
            initial_prediction_error: default_initial_prediction_error(),
            initial_fitness: default_initial_fitness(),
            generalize_probability: default_generalize_probability(),
            exploration_probability: default_exploration_probability(),
            max_spread: default_max_spread(),
        }
    }
}

impl Constants {
    /// Parse constants from a TOML document and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let constants: Constants = toml::from_str(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Load constants from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| XcsError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(XcsError::out_of_range("learning_rate", 0.0, 1.0, self.learning_rate));
        }
        if !(self.prediction_error_threshold > 0.0) {
            return Err(XcsError::invalid_config(
                "prediction_error_threshold",
                "must be positive",
            ));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(XcsError::out_of_range("alpha", 0.0, 1.0, self.alpha));
        }
        if !(self.nu >= 0.0) {
            return Err(XcsError::invalid_config("nu", "must be non-negative"));
        }
        for (field, value) in [
            ("generalize_probability", self.generalize_probability),
            ("exploration_probability", self.exploration_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(XcsError::out_of_range(field, 0.0, 1.0, value));
            }
        }
        if !(self.initial_fitness > 0.0) {
            return Err(XcsError::invalid_config("initial_fitness", "must be positive"));
        }
        if !(self.max_spread >= 0.0) {
            return Err(XcsError::invalid_config("max_spread", "must be non-negative"));
        }
        Ok(())
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_prediction_error_threshold(mut self, threshold: f64) -> Self {
        self.prediction_error_threshold = threshold;
        self
    }

    pub fn with_accuracy_falloff(mut self, alpha: f64, nu: f64) -> Self {
        self.alpha = alpha;
        self.nu = nu;
        self
    }

    pub fn with_theta_ga(mut self, theta_ga: u64) -> Self {
        self.theta_ga = theta_ga;
        self
    }

    pub fn with_theta_sub(mut self, theta_sub: u64) -> Self {
        self.theta_sub = theta_sub;
        self
    }

    pub fn with_action_set_subsumption(mut self, enabled: bool) -> Self {
        self.do_action_set_subsumption = enabled;
        self
    }

    pub fn with_exploration_probability(mut self, epsilon: f64) -> Self {
        self.exploration_probability = epsilon;
        self
    }
}
