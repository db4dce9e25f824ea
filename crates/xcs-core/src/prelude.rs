//! XCS Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use xcs_core::prelude::*;
//! ```

pub use crate::symbol::{BinarySymbol, IntervalSymbol, Symbol};
pub use crate::condition::{binary_situation, Condition};
pub use crate::classifier::{Action, Classifier};
pub use crate::constants::Constants;
pub use crate::random::RandomSource;
pub use crate::error::{ConfigError, Result, XcsError};
