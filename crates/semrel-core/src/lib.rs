//! Release orchestration for semrel.
//!
//! Ties commit analysis, version calculation, changelog rendering and the
//! version cache together behind [`SemanticRelease`].

mod context;
mod error;
mod provider;
mod release;

pub use context::CiContext;
pub use error::{CoreError, CoreResult};
pub use provider::{GitTagProvider, ProviderError, ProviderResult, ReleaseProvider};
pub use release::{SemanticRelease, write_changelog};
