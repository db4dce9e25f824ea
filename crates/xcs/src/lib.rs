//! # XCS
//!
//! The core learning loop of an accuracy-based learning classifier system.
//!
//! A population of condition → action rules is refined online: rules that
//! match the current situation propose actions, the chosen action's rules
//! are reinforced with the received payoff, and a genetic algorithm
//! supplied by the host is invoked on action sets at a throttled rate.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use xcs::prelude::*;
//!
//! struct NoEvolution;
//!
//! impl GeneticAlgorithm<BinarySymbol, u8> for NoEvolution {
//!     fn run(
//!         &mut self,
//!         _: &mut ActionSet<BinarySymbol, u8>,
//!         _: &[bool],
//!         _: &mut Population<BinarySymbol, u8>,
//!         _: &mut RandomSource,
//!     ) {
//!     }
//! }
//!
//! let constants = Rc::new(Constants::default());
//! let actions = Rc::new([0u8, 1].into_iter().collect());
//! let mut population: Population<BinarySymbol, u8> = Population::new(constants, actions);
//! for (condition, action) in [("1#", 1u8), ("0#", 0), ("##", 0)] {
//!     let rule = Classifier::new(condition.parse().unwrap(), action, 0, population.constants());
//!     population.insert_classifier(rule);
//! }
//!
//! let mut rng = RandomSource::seeded(42);
//! let situation = binary_situation("10").unwrap();
//!
//! // Match and pick an action.
//! let mut match_set = MatchSet::for_population(&population);
//! match_set.regenerate(&population, &situation);
//! let action = EpsilonGreedyPredictionArray::new(&match_set, 0.1).select_action(&mut rng);
//!
//! // Reinforce the rules that advocated it, then maybe evolve.
//! let mut action_set = ActionSet::from_match_set(&match_set, &action);
//! let payoff = if action == 1 { 1000.0 } else { 0.0 };
//! action_set.update(payoff, &mut population, &mut rng);
//! action_set.run_ga(&mut NoEvolution, &situation, &mut population, 1, &mut rng);
//! ```
//!
//! ## Architecture
//!
//! - [`xcs_core`] - Symbols, conditions, classifiers, constants, random source
//! - [`xcs_runtime`] - Classifier sets, match/action sets, prediction arrays, GA seam
//!
//! ## Key Concepts
//!
//! | Concept | What It Does |
//! |---------|--------------|
//! | Match set | Rules whose condition accepts the situation |
//! | Prediction array | Fitness-weighted payoff estimate per action |
//! | Action set | Matching rules advocating the executed action |
//! | Subsumption | Accurate general rules absorb the specific rules they cover |
//! | GA trigger | Evolve only once the set's average time stamp is `theta_ga` old |

pub use xcs_core;
pub use xcs_runtime;

pub mod prelude;
