//! Genetic algorithm seam.
//!
//! Selection, crossover, mutation, and offspring insertion belong to the
//! host. The action set only decides *when* to evolve and hands itself,
//! the current situation, and the population to the implementation.

use crate::action_set::ActionSet;
use crate::classifier_ptr_set::Population;
use xcs_core::classifier::Action;
use xcs_core::random::RandomSource;
use xcs_core::symbol::Symbol;

/// Evolutionary search run on one action set.
pub trait GeneticAlgorithm<S: Symbol, A: Action> {
    /// Breed from `action_set` and insert any offspring into `population`.
    fn run(
        &mut self,
        action_set: &mut ActionSet<S, A>,
        situation: &[S::Value],
        population: &mut Population<S, A>,
        rng: &mut RandomSource,
    );
}
