//! Release version cache.
//!
//! The computed release is stored as TOML in a `.version` file next to the
//! repository directory. A cached entry is only reused while its `next`
//! commit matches the current HEAD.

mod error;
mod file;
mod release;

pub use error::{CacheError, CacheResult};
pub use file::{CACHE_FILE_NAME, cache_path, read, read_matching, write};
pub use release::{ReleaseVersion, ReleaseVersionEntry};
