//! Command-line interface definitions and parsing
//!
//! This module defines the CLI for tagedit using the `clap` crate.
//!
//! # Usage
//!
//! ```bash
//! # Edit the tags of everything in the current directory
//! tagedit
//!
//! # Two levels deep, only JPEGs, any case
//! tagedit ~/Pictures -d 1 -g '*.jpg' -i
//!
//! # See what would change without writing
//! tagedit -n
//!
//! # Just print the document
//! tagedit -p > tags.txt
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::TagEditConfig;
use crate::reconcile::ReconcileOptions;
use crate::walker::WalkOptions;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "tagedit")]
#[command(about = "Bulk-edit file tags in your text editor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory whose entries are edited
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Directory levels to descend below ROOT's children (0 = children only)
    #[arg(short = 'd', long = "depth", value_name = "N")]
    pub depth: Option<usize>,

    /// Only include entries whose name matches this glob
    #[arg(short = 'g', long = "glob", value_name = "PATTERN")]
    pub glob: Option<String>,

    /// Match the glob case-insensitively
    #[arg(short = 'i', long = "ignore-case", requires = "glob")]
    pub ignore_case: bool,

    /// Include hidden entries (names starting with '.')
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Write tags for every line, even unchanged ones
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Show what would change without writing anything
    #[arg(short = 'n', long = "dry-run", conflicts_with = "force")]
    pub dry_run: bool,

    /// Print the document to stdout instead of editing it
    #[arg(short = 'p', long = "print", conflicts_with_all = ["dry_run", "force", "confirm"])]
    pub print: bool,

    /// Ask before writing the changes
    #[arg(short = 'c', long = "confirm")]
    pub confirm: bool,

    /// Editor command (overrides config, $VISUAL and $EDITOR)
    #[arg(short = 'e', long = "editor", value_name = "CMD")]
    pub editor: Option<String>,

    /// Tag database directory (overrides config)
    #[arg(long = "db", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Configuration file (default: ~/.config/tagedit/config.toml)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress informational output
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every decision to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Enumeration options, with the depth falling back to the config
    #[must_use]
    pub fn walk_options(&self, config: &TagEditConfig) -> WalkOptions {
        WalkOptions {
            depth: self.depth.unwrap_or(config.depth),
            glob: self.glob.clone(),
            case_insensitive: self.ignore_case,
            include_hidden: self.all,
        }
    }

    #[must_use]
    pub const fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            force_update: self.force,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tagedit"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.force);

        let config = TagEditConfig {
            depth: 3,
            ..TagEditConfig::default()
        };
        assert_eq!(cli.walk_options(&config).depth, 3);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["tagedit", "/tmp", "-d", "1", "-g", "*.JPG", "-i", "-f"]).unwrap();
        let options = cli.walk_options(&TagEditConfig::default());
        assert_eq!(options.depth, 1);
        assert_eq!(options.glob.as_deref(), Some("*.JPG"));
        assert!(options.case_insensitive);
        assert!(cli.reconcile_options().force_update);
    }

    #[test]
    fn test_ignore_case_requires_glob() {
        assert!(Cli::try_parse_from(["tagedit", "-i"]).is_err());
    }

    #[test]
    fn test_dry_run_conflicts_with_force() {
        assert!(Cli::try_parse_from(["tagedit", "-n", "-f"]).is_err());
    }
}
