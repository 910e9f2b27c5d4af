//! Configuration loading for semrel.
//!
//! This crate handles loading and validating the `.release.toml` file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config_from, load_config};
pub use schema::{AnalyzerSection, ChangelogConfig, Config, DockerConfig, NpmConfig};
