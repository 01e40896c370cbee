use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, env = "SHELF_CONFIG")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity; repeat for more
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the synthesized name of each file
    Rename(RenameArgs),
    /// Print the destination directory of each file
    Place(PlaceArgs),
    /// Print name and destination of every file, planned concurrently
    Plan(PlanArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Catalog snapshot, as JSON
    #[arg(long)]
    pub snapshot: PathBuf,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    /// Renaming script, overriding the configured one
    #[arg(long)]
    pub script: Option<PathBuf>,
    /// Only this file
    #[arg(long)]
    pub file: Option<u64>,
}

#[derive(Debug, Args)]
pub struct PlaceArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    /// Only this file
    #[arg(long)]
    pub file: Option<u64>,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    /// Renaming script, overriding the configured one
    #[arg(long)]
    pub script: Option<PathBuf>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["shelf", "place", "--snapshot", "s.json"], "warn")]
    #[case(&["shelf", "-v", "place", "--snapshot", "s.json"], "info")]
    #[case(&["shelf", "place", "--snapshot", "s.json", "-vv"], "debug")]
    #[case(&["shelf", "-vvvv", "place", "--snapshot", "s.json"], "trace")]
    fn test_verbosity(#[case] args: &[&str], #[case] expected: &str) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.default_filter(), expected);
    }

    #[test]
    fn test_rename_arguments() {
        let cli = Cli::try_parse_from([
            "shelf", "-c", "shelf.toml", "rename", "--snapshot", "s.json", "--script", "a.script", "--file", "7",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("shelf.toml")));
        let Command::Rename(args) = cli.command else {
            panic!("expected rename");
        };
        assert_eq!(args.snapshot.snapshot, PathBuf::from("s.json"));
        assert_eq!(args.script, Some(PathBuf::from("a.script")));
        assert_eq!(args.file, Some(7));
    }

    #[test]
    fn test_snapshot_is_required() {
        assert!(Cli::try_parse_from(["shelf", "plan"]).is_err());
    }
}
