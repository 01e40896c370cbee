//! Dry-runs renaming and placement against a catalog snapshot.
//!
//! Nothing is moved: names and destinations are printed, one file per line,
//! as `<file id>\t<result>`.

mod cli;
mod error;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use futures::{StreamExt, pin_mut};
use shelf_config::Config;
use shelf_library::Context;
use shelf_library::error::ErrorKind as LibraryErrorKind;
use shelf_library::plan::{PlanEvent, place_file, plan, rename_file};
use shelf_models::{FileView, Snapshot};
use shelf_placement::fs::LocalFilesystem;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.default_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", *e);
            tracing::debug!("{e:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    match cli.command {
        Command::Rename(args) => {
            override_script(&mut config, args.script);
            let ctx = Context::from_config(&config).await.or_raise(|| ErrorKind::Context)?;
            let snapshot = load_snapshot(&args.snapshot.snapshot).await?;
            let mut failures = 0;
            for file in select(&snapshot, args.file)? {
                match rename_file(&ctx, &snapshot, file).await {
                    Ok(name) => println!("{}\t{name}", file.id),
                    Err(e) => {
                        failures += 1;
                        println!("{}\terror: {}", file.id, *e);
                    },
                }
            }
            finish(failures)
        },
        Command::Place(args) => {
            let ctx = Context::from_config(&config).await.or_raise(|| ErrorKind::Context)?;
            let snapshot = load_snapshot(&args.snapshot.snapshot).await?;
            let mut failures = 0;
            for file in select(&snapshot, args.file)? {
                match place_file(&ctx, &snapshot, &LocalFilesystem, file).await {
                    Ok(destination) => println!("{}\t{}", file.id, destination.path().display()),
                    Err(e) => {
                        failures += 1;
                        println!("{}\terror: {}", file.id, *e);
                    },
                }
            }
            finish(failures)
        },
        Command::Plan(args) => {
            override_script(&mut config, args.script);
            let ctx = Context::from_config(&config).await.or_raise(|| ErrorKind::Context)?;
            let snapshot = load_snapshot(&args.snapshot.snapshot).await?;
            let events = plan(&ctx, &snapshot, &LocalFilesystem, &snapshot.files);
            pin_mut!(events);
            let mut failures = 0;
            while let Some(event) = events.next().await {
                match event {
                    Ok(PlanEvent::DiscoveryComplete(total)) => tracing::info!(total, "Planning files"),
                    Ok(PlanEvent::Planned(plan)) => println!("{}\t{}", plan.file_id, plan.path().display()),
                    Ok(PlanEvent::Started | PlanEvent::Complete) => {},
                    Err(e) => {
                        failures += 1;
                        println!("{}", plan_failure(&e));
                    },
                }
            }
            finish(failures)
        },
    }
}

/// Output line for a file that could not be planned, with the reason
/// surfaced unchanged.
fn plan_failure(kind: &LibraryErrorKind) -> String {
    match kind {
        LibraryErrorKind::Plan { file_id, reason } => format!("{file_id}\terror: {reason}"),
        other => format!("-\terror: {other}"),
    }
}

fn override_script(config: &mut Config, script: Option<PathBuf>) {
    if script.is_some() {
        config.rename.script = script;
    }
}

async fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = tokio::fs::read(path).await.or_raise(|| ErrorKind::Snapshot(path.to_path_buf()))?;
    let snapshot: Snapshot = serde_json::from_slice(&bytes).or_raise(|| ErrorKind::Snapshot(path.to_path_buf()))?;
    tracing::debug!(files = snapshot.files.len(), shows = snapshot.shows.len(), "Snapshot loaded");
    Ok(snapshot)
}

/// The single requested file, or every file of the snapshot.
fn select(snapshot: &Snapshot, file_id: Option<u64>) -> Result<Vec<&FileView>> {
    match file_id {
        Some(id) => {
            let file = snapshot.file(id).ok_or_else(|| exn::Exn::from(ErrorKind::FileNotFound(id)))?;
            Ok(vec![file])
        },
        None => Ok(snapshot.files.iter().collect()),
    }
}

fn finish(failures: usize) -> Result<()> {
    match failures {
        0 => Ok(()),
        n => exn::bail!(ErrorKind::Failures(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "shows": [{"id": 1, "kind": "tv", "titles": [{"language": "x-jat", "kind": "main", "value": "Mushishi"}], "episode_count_normal": 26}],
        "files": [{"id": 100, "file_name": "raw.mkv", "hash": "abc", "size": 10}]
    }"#;

    #[tokio::test]
    async fn test_load_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SNAPSHOT).unwrap();
        let snapshot = load_snapshot(&path).await.unwrap();
        assert_eq!(snapshot.files.len(), 1);
        assert_eq!(snapshot.shows[0].main_title(), Some("Mushishi"));
    }

    #[tokio::test]
    async fn test_load_malformed_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{").unwrap();
        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Snapshot(_)));
    }

    #[test]
    fn test_select() {
        let snapshot = Snapshot::default()
            .with_file(FileView::new(1, "a.mkv", "a", 1))
            .with_file(FileView::new(2, "b.mkv", "b", 1));
        assert_eq!(select(&snapshot, None).unwrap().len(), 2);
        assert_eq!(select(&snapshot, Some(2)).unwrap()[0].id, 2);
        let err = select(&snapshot, Some(3)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::FileNotFound(3)));
    }

    #[test]
    fn test_plan_failure_shows_reason() {
        let kind = LibraryErrorKind::Plan {
            file_id: 7,
            reason: "No xrefs".to_string(),
        };
        assert_eq!(plan_failure(&kind), "7\terror: No xrefs");
        assert_eq!(plan_failure(&LibraryErrorKind::NoEpisodes), "-\terror: file has no linked episodes");
    }

    #[test]
    fn test_finish() {
        assert!(finish(0).is_ok());
        assert!(matches!(&*finish(2).unwrap_err(), ErrorKind::Failures(2)));
    }
}
