//! XCS Prelude — everything needed to run a decision cycle.
//!
//! ```rust
//! use xcs::prelude::*;
//! ```

pub use xcs_core::prelude::*;
pub use xcs_runtime::prelude::*;
