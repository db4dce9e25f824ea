//! # XCS Core
//!
//! Leaf types and capability traits for an XCS learning classifier system.
//!
//! - **Symbol** — one positional condition element (`0`/`1`/`#`, or a real interval)
//! - **Condition** — symbol sequence matched against a situation
//! - **Classifier** — condition → action rule with adaptive parameters
//! - **Constants** — learning configuration, loadable from TOML
//! - **RandomSource** — seedable generator threaded through every stochastic choice
//!
//! ## Quick Start
//!
//! ```rust
//! use xcs_core::prelude::*;
//!
//! let condition: Condition<BinarySymbol> = "1#0".parse().unwrap();
//! let situation = binary_situation("110").unwrap();
//! assert!(condition.matches(&situation));
//! assert_eq!(condition.dont_care_count(), 1);
//! ```

pub mod symbol;
pub mod condition;
pub mod classifier;
pub mod constants;
pub mod random;
pub mod error;
pub mod prelude;
