//! Prediction array — fitness-weighted payoff estimate per action.
//!
//! Built once per match set, before any action is executed. For each
//! present action `a`:
//!
//! ```text
//! P(a) = Σ p_j · F_j / Σ F_j      over match set members with action a
//! ```
//!
//! When the fitness sum of an action is exactly zero the weighted sum is
//! kept as is instead of dividing. Actions within `f64::EPSILON` of the
//! maximum all count as best.
//!
//! Action choice is pluggable through [`ActionSelector`]:
//! [`GreedyPredictionArray`] always exploits, while
//! [`EpsilonGreedyPredictionArray`] explores uniformly with probability ε.

use crate::match_set::MatchSet;
use indexmap::IndexMap;
use std::ops::Deref;
use xcs_core::classifier::Action;
use xcs_core::random::RandomSource;
use xcs_core::symbol::Symbol;

/// Per-action prediction plus the set of best actions.
#[derive(Debug, Clone)]
pub struct PredictionArray<A> {
    predictions: IndexMap<A, f64>,
    max: f64,
    best_actions: Vec<A>,
}

impl<A: Action> PredictionArray<A> {
    pub fn new<S: Symbol>(match_set: &MatchSet<S, A>) -> Self {
        let mut predictions: IndexMap<A, f64> = IndexMap::new();
        let mut fitness_sums: IndexMap<A, f64> = IndexMap::new();

        for cl in match_set {
            let cl = cl.borrow();
            *predictions.entry(cl.action.clone()).or_insert(0.0) += cl.prediction * cl.fitness;
            *fitness_sums.entry(cl.action.clone()).or_insert(0.0) += cl.fitness;
        }

        let mut max = f64::MIN;
        let mut best_actions = Vec::new();

        for (action, prediction) in predictions.iter_mut() {
            let fitness_sum = fitness_sums[action];
            if fitness_sum.abs() > 0.0 {
                *prediction /= fitness_sum;
            }

            if (max - *prediction).abs() < f64::EPSILON {
                best_actions.push(action.clone());
            } else if max < *prediction {
                best_actions.clear();
                best_actions.push(action.clone());
                max = *prediction;
            }
        }

        Self {
            predictions,
            max,
            best_actions,
        }
    }

    /// The maximal prediction. `f64::MIN` for an empty array.
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn prediction(&self, action: &A) -> Option<f64> {
        self.predictions.get(action).copied()
    }

    /// Present actions in the order they were first seen in the match set.
    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.predictions.keys()
    }

    /// Actions tied for the maximal prediction.
    pub fn best_actions(&self) -> &[A] {
        &self.best_actions
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    fn random_action(&self, rng: &mut RandomSource) -> A {
        assert!(!self.is_empty(), "select_action on an empty prediction array");
        rng.choose_from_set(self.predictions.keys())
    }

    fn best_action(&self, rng: &mut RandomSource) -> A {
        assert!(
            !self.best_actions.is_empty(),
            "select_action on an empty prediction array"
        );
        rng.choose_from(&self.best_actions)
    }
}

/// Action selection policy over a prediction array.
pub trait ActionSelector<A> {
    /// Choose the action to execute.
    ///
    /// # Panics
    ///
    /// Panics if the underlying match set was empty.
    fn select_action(&self, rng: &mut RandomSource) -> A;

    fn prediction_array(&self) -> &PredictionArray<A>;
}

/// Always picks uniformly among the best actions.
#[derive(Debug, Clone)]
pub struct GreedyPredictionArray<A> {
    array: PredictionArray<A>,
}

impl<A: Action> GreedyPredictionArray<A> {
    pub fn new<S: Symbol>(match_set: &MatchSet<S, A>) -> Self {
        Self {
            array: PredictionArray::new(match_set),
        }
    }
}

impl<A: Action> ActionSelector<A> for GreedyPredictionArray<A> {
    fn select_action(&self, rng: &mut RandomSource) -> A {
        self.array.best_action(rng)
    }

    fn prediction_array(&self) -> &PredictionArray<A> {
        &self.array
    }
}

impl<A> Deref for GreedyPredictionArray<A> {
    type Target = PredictionArray<A>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

/// Explores any present action with probability ε, otherwise greedy.
#[derive(Debug, Clone)]
pub struct EpsilonGreedyPredictionArray<A> {
    array: PredictionArray<A>,
    epsilon: f64,
}

impl<A: Action> EpsilonGreedyPredictionArray<A> {
    pub fn new<S: Symbol>(match_set: &MatchSet<S, A>, epsilon: f64) -> Self {
        Self {
            array: PredictionArray::new(match_set),
            epsilon,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl<A: Action> ActionSelector<A> for EpsilonGreedyPredictionArray<A> {
    fn select_action(&self, rng: &mut RandomSource) -> A {
        // ε = 0 draws nothing extra, so it follows the greedy stream exactly.
        if self.epsilon > 0.0 && rng.chance(self.epsilon) {
            self.array.random_action(rng)
        } else {
            self.array.best_action(rng)
        }
    }

    fn prediction_array(&self) -> &PredictionArray<A> {
        &self.array
    }
}

impl<A> Deref for EpsilonGreedyPredictionArray<A> {
    type Target = PredictionArray<A>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}
