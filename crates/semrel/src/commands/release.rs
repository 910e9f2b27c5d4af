//! Release command.

use anyhow::{Context, Result};
use semrel_core::{GitTagProvider, ReleaseProvider};

use super::Session;
use crate::cli::GlobalArgs;

/// Runs the release command.
pub fn run(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global)?;
    let provider = GitTagProvider::new(&session.repo);

    let released = session
        .release()?
        .release(&session.ctx, &provider, session.force)
        .with_context(|| format!("release through {} failed", provider.name()))?;

    match released {
        Some(release) => println!(
            "Released {}{}",
            session.config.tag_prefix, release.next.version
        ),
        None => println!("Nothing to release"),
    }
    Ok(())
}
