//! # XCS Runtime
//!
//! The per-cycle machinery of the learning loop.
//!
//! The population owns every classifier. Each decision cycle builds fresh
//! views over it:
//!
//! ```text
//! situation → MatchSet → PredictionArray → action
//!                     ↘ ActionSet(action) → update(payoff) → run_ga
//! ```
//!
//! Views hold shared handles, so updates made through an action set land
//! directly in the population. The whole cycle runs on one thread; a host
//! embedding it elsewhere must hold a single lock over the population for
//! the duration of a cycle.

pub mod classifier_ptr_set;
pub mod match_set;
pub mod action_set;
pub mod prediction_array;
pub mod ga;
pub mod prelude;
