//! Next version calculation.
//!
//! Turns classified commits, the last released version and the release
//! policy of the current branch into the next version.

mod calculator;
mod error;
mod policy;
mod prerelease;

pub use calculator::calculate_new_version;
pub use error::{CalculatorError, CalculatorResult};
pub use policy::{ReleasePolicy, policy_for_branch};
pub use prerelease::inc_prerelease;
