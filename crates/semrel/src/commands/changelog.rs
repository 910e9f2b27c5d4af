//! Changelog command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use semrel_core::write_changelog;

use super::Session;
use crate::cli::GlobalArgs;

/// Arguments for the changelog command.
#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Output file
    #[arg(short, long, default_value = "CHANGELOG.md")]
    pub out: PathBuf,

    /// Replace the file instead of prepending to it
    #[arg(long)]
    pub overwrite: bool,

    /// Print the changelog instead of writing it
    #[arg(long, conflicts_with_all = ["out", "overwrite"])]
    pub stdout: bool,
}

/// Runs the changelog command.
pub fn run(global: &GlobalArgs, args: &ChangelogArgs) -> Result<()> {
    let session = Session::open(global)?;
    let runner = session.release()?;
    let release = runner
        .next_version(&session.ctx, session.force)
        .context("failed to compute next version")?;
    let changelog = runner
        .changelog(&release, Utc::now())
        .context("failed to render changelog")?;

    if args.stdout {
        print!("{}", changelog.content);
        return Ok(());
    }

    write_changelog(&changelog.content, &args.out, args.overwrite)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    println!(
        "Wrote changelog for {} to {}",
        release.next.version,
        args.out.display()
    );
    Ok(())
}
