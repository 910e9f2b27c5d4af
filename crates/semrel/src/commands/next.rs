//! Next command.

use anyhow::{Context, Result};
use clap::Args;

use super::Session;
use crate::cli::GlobalArgs;

/// Arguments for the next command.
#[derive(Debug, Args)]
pub struct NextArgs {
    /// Print the version with the tag prefix
    #[arg(short, long)]
    pub tag: bool,
}

/// Runs the next command.
pub fn run(global: &GlobalArgs, args: &NextArgs) -> Result<()> {
    let session = Session::open(global)?;
    let release = session
        .release()?
        .next_version(&session.ctx, session.force)
        .context("failed to compute next version")?;

    if args.tag {
        println!("{}{}", session.config.tag_prefix, release.next.version);
    } else {
        println!("{}", release.next.version);
    }
    Ok(())
}
