//! Set command.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::Session;
use crate::cli::GlobalArgs;

/// Arguments for the set command.
#[derive(Debug, Args)]
pub struct SetArgs {
    /// The version to record, with or without tag prefix
    pub version: String,
}

/// Runs the set command.
pub fn run(global: &GlobalArgs, args: &SetArgs) -> Result<()> {
    let session = Session::open(global)?;
    let release = session
        .release()?
        .set_version(&session.ctx, &args.version)
        .with_context(|| format!("failed to set version {}", args.version))?;

    info!(
        last = %release.last.version,
        next = %release.next.version,
        "recorded version"
    );
    println!("{}", release.next.version);
    Ok(())
}
