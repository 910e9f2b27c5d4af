//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands;

/// Compute the next semantic version and changelog from commit history.
#[derive(Debug, Parser)]
#[command(name = "semrel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the git repository
    #[arg(short, long, global = true, default_value = ".", env = "SEMREL_REPOSITORY")]
    pub repository: PathBuf,

    /// Configuration file (default: nearest .release.toml)
    #[arg(short, long, global = true, env = "SEMREL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore the cached version and recompute
    #[arg(short, long, global = true)]
    pub force: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the next version
    Next(commands::next::NextArgs),

    /// Write the changelog of the next version
    Changelog(commands::changelog::ChangelogArgs),

    /// Record a version by hand
    Set(commands::set::SetArgs),

    /// Tag the next version if anything changed
    Release,
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Next(args) => commands::next::run(&self.global, &args),
            Commands::Changelog(args) => commands::changelog::run(&self.global, &args),
            Commands::Set(args) => commands::set::run(&self.global, &args),
            Commands::Release => commands::release::run(&self.global),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["semrel", "next", "--force", "-r", "/tmp/x"]).unwrap();
        assert!(cli.global.force);
        assert_eq!(cli.global.repository, PathBuf::from("/tmp/x"));
        assert!(matches!(cli.command, Commands::Next(_)));
    }

    #[test]
    fn test_changelog_defaults() {
        let cli = Cli::try_parse_from(["semrel", "changelog"]).unwrap();
        let Commands::Changelog(args) = cli.command else {
            panic!("expected changelog command");
        };
        assert_eq!(args.out, PathBuf::from("CHANGELOG.md"));
        assert!(!args.overwrite);
    }

    #[test]
    fn test_set_requires_version() {
        assert!(Cli::try_parse_from(["semrel", "set"]).is_err());
    }
}
