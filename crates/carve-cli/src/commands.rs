//! The build command.

use std::path::Path;
use std::time::Instant;

use carve_bundler::{BuildOutcome, Builder, Destination, Severity};
use carve_config::Settings;
use carve_registry::Registry;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::ui;

/// Runs the build described by `args` in the current directory.
pub async fn execute(args: &Cli) -> Result<()> {
    let root = std::env::current_dir()?;
    execute_in(args, &root).await
}

/// Runs the build with `root` as the working directory.
pub async fn execute_in(args: &Cli, root: &Path) -> Result<()> {
    let started = Instant::now();

    let settings = Settings::load(root, args.config.as_deref())?;
    tracing::debug!(?settings, "settings loaded");
    let registry = Registry::builtin()?;

    let builder = Builder::new(registry, settings, root);
    let mut finished: Option<BuildOutcome> = None;
    builder
        .build(&args.tokens, |outcome| finished = Some(outcome))
        .await;

    let Some(outcome) = finished else {
        return Err(CliError::build_failed(&[]));
    };

    let errors: Vec<String> = outcome
        .diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity == Severity::Error)
        .map(|diagnostic| diagnostic.message.clone())
        .collect();
    if !errors.is_empty() {
        return Err(CliError::build_failed(&errors));
    }

    if !args.is_silent() {
        report(&outcome, root, started);
    }
    Ok(())
}

fn report(outcome: &BuildOutcome, root: &Path, started: Instant) {
    match &outcome.destination {
        Destination::File(path) => {
            let shown = path.strip_prefix(root).unwrap_or(path);
            ui::success(&format!("Built {}", shown.display()));
            ui::print_build_summary(
                &shown.display().to_string(),
                outcome.source.len() as u64,
                started.elapsed(),
            );
        }
        // stdout carries the module itself
        Destination::Stdout | Destination::Unresolved => {}
    }
    if outcome.source.is_empty() {
        ui::warning("The selection is empty; nothing was generated");
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[tokio::test]
    async fn test_execute_in_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = Cli::parse_from(["carve", "include=identity", "-o", "id.js", "-s"]);

        execute_in(&args, dir.path()).await.unwrap();
        let written = std::fs::read_to_string(dir.path().join("id.js")).unwrap();
        assert!(written.contains("function identity(value)"));
    }

    #[tokio::test]
    async fn test_execute_in_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let args = Cli::parse_from(["carve", "include", "-s"]);

        let err = execute_in(&args, dir.path()).await.unwrap_err();
        assert!(matches!(err, CliError::BuildFailed { errors: 1, .. }));
        assert!(err.to_string().contains("'include' needs a value"));
    }
}
