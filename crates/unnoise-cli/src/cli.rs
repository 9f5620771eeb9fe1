//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Revert formatting and comment noise in working-copy files
///
/// Each file is compared against its committed version. Regions whose only
/// differences are whitespace or comments are restored to the committed
/// text; real changes are kept.
///
/// Examples:
///   unnoise src/app.py           # Clean one file
///   unnoise .                    # Clean every file under the current directory
///   unnoise --dry-run --json .   # Report what would change
#[derive(Parser, Debug)]
#[command(name = "unnoise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Output the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Revision to compare against (default: HEAD, or `reference` in .unnoise.toml)
    #[arg(long, value_name = "REV", env = "UNNOISE_REV")]
    pub rev: Option<String>,

    /// Directory name to skip when walking directories (repeatable)
    #[arg(long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Configuration file to use instead of .unnoise.toml at the repository root
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Files or directories to clean
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
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
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "unnoise",
            "-v",
            "--dry-run",
            "--json",
            "--rev",
            "main",
            "--exclude",
            "target",
            "--exclude",
            "node_modules",
            "--config",
            "custom.toml",
            "src",
            "README.md",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(cli.dry_run);
        assert!(cli.json);
        assert_eq!(cli.rev.as_deref(), Some("main"));
        assert_eq!(cli.exclude, vec!["target", "node_modules"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.paths, vec![PathBuf::from("src"), PathBuf::from("README.md")]);
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Cli::try_parse_from(["unnoise"]).is_err());
    }
}
