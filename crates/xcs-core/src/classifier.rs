//! Classifier — one condition → action rule with adaptive parameters.
//!
//! Parameters are refined in place every time the classifier takes part in
//! an action set update. A classifier with numerosity `n` stands for `n`
//! identical rules merged into one macro-classifier.

use crate::condition::Condition;
use crate::constants::Constants;
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Bound for action types: small, comparable, hashable values.
pub trait Action: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Action for T {}

/// A single rule of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier<S, A> {
    pub condition: Condition<S>,
    pub action: A,
    /// Estimated payoff when this rule's action is taken.
    pub prediction: f64,
    /// Estimated absolute error of `prediction`.
    pub prediction_error: f64,
    /// Relative accuracy within the action sets it joins.
    pub fitness: f64,
    /// Number of identical rules this macro-classifier represents.
    pub numerosity: u64,
    /// Number of action set updates this rule took part in.
    pub experience: u64,
    /// Running estimate of the action set size (in micro-classifiers).
    pub action_set_size: f64,
    /// Time of the last GA invocation in one of its action sets.
    pub time_stamp: u64,
}

impl<S: Symbol, A: Action> Classifier<S, A> {
    /// Fresh classifier with initial parameters taken from the constants.
    pub fn new(condition: Condition<S>, action: A, time_stamp: u64, constants: &Constants) -> Self {
        Self {
            condition,
            action,
            prediction: constants.initial_prediction,
            prediction_error: constants.initial_prediction_error,
            fitness: constants.initial_fitness,
            numerosity: 1,
            experience: 0,
            action_set_size: 1.0,
            time_stamp,
        }
    }

    /// Accuracy κ: 1 below the error threshold, a power-law penalty above it.
    pub fn accuracy(&self, constants: &Constants) -> f64 {
        if self.prediction_error < constants.prediction_error_threshold {
            1.0
        } else {
            constants.alpha
                * (self.prediction_error / constants.prediction_error_threshold).powf(-constants.nu)
        }
    }

    /// Experienced and accurate enough to absorb other rules.
    pub fn is_subsumer(&self, constants: &Constants) -> bool {
        self.experience > constants.theta_sub
            && self.prediction_error < constants.prediction_error_threshold
    }

    /// Same action and a condition at least as general as `other`'s.
    pub fn is_more_general(&self, other: &Classifier<S, A>) -> bool {
        self.action == other.action && self.condition.contains(&other.condition)
    }

    pub fn subsumes(&self, other: &Classifier<S, A>, constants: &Constants) -> bool {
        self.is_subsumer(constants) && self.is_more_general(other)
    }

    pub fn matches(&self, situation: &[S::Value]) -> bool {
        self.condition.matches(situation)
    }
}

impl<S: fmt::Display, A: fmt::Debug> fmt::Display for Classifier<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:?} p={:.3} e={:.3} F={:.3} num={} exp={} as={:.2} ts={}",
            self.condition,
            self.action,
            self.prediction,
            self.prediction_error,
            self.fitness,
            self.numerosity,
            self.experience,
            self.action_set_size,
            self.time_stamp
        )
    }
}
