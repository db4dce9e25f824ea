//! XCS Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use xcs_runtime::prelude::*;
//! ```

// Re-export sets
pub use crate::classifier_ptr_set::{ClassifierPtr, ClassifierPtrSet, Population};
pub use crate::match_set::MatchSet;
pub use crate::action_set::ActionSet;

// Re-export action selection
pub use crate::prediction_array::{
    ActionSelector, EpsilonGreedyPredictionArray, GreedyPredictionArray, PredictionArray,
};

// Re-export the GA seam
pub use crate::ga::GeneticAlgorithm;

// Re-export from core
pub use xcs_core::prelude::*;
