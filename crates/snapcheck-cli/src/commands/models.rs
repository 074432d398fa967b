//! Models command - manage scoring model artifacts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use snapcheck_adapters::{
    fetch_to_cache, list_models as adapter_list_models, models_dir, SourceFetcher,
};
use snapcheck_core::ModelKind;

use super::check::ModelSourceArgs;
use crate::config::AppConfig;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR", global = true)]
    pub models_dir: Option<PathBuf>,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// Download configured models into the cache
    Fetch(ModelSourceArgs),
    /// List cached models
    List,
    /// Print model directory path
    Path,
}

/// Run the models command.
pub fn run(args: &ModelsArgs, config: &AppConfig) -> Result<()> {
    let dir = models_dir(
        args.models_dir
            .as_deref()
            .or(config.models.dir.as_deref()),
    );
    match &args.command {
        ModelsCommand::Fetch(sources) => fetch_models(&sources.clone().with_config(config), &dir),
        ModelsCommand::List => {
            list_models(&dir);
            Ok(())
        }
        ModelsCommand::Path => {
            println!("{}", dir.display());
            Ok(())
        }
    }
}

fn fetch_models(sources: &ModelSourceArgs, dir: &Path) -> Result<()> {
    let fetcher = SourceFetcher::new()?;
    let mut fetched = 0usize;

    for kind in ModelKind::ALL {
        let Some(source) = sources.source(kind) else {
            eprintln!("No source configured for the {kind} model; set --{kind}-model or models.{kind}");
            continue;
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .map_err(|e| anyhow::anyhow!("Invalid progress template: {e}"))?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("Fetching {kind} model from {}", source.location));

        let result = fetch_to_cache(&fetcher, kind, &source, dir)
            .with_context(|| format!("Failed to fetch {kind} model"));
        match result {
            Ok(path) => {
                spinner.finish_with_message(format!("{kind} model cached at {}", path.display()));
                fetched += 1;
            }
            Err(e) => {
                spinner.abandon_with_message(format!("{kind} model failed"));
                return Err(e);
            }
        }
    }

    if fetched == 0 {
        anyhow::bail!("No model sources configured");
    }
    Ok(())
}

fn list_models(dir: &Path) {
    let models = adapter_list_models(dir);

    println!("Models directory: {}", dir.display());
    println!();

    for status in &models {
        let mark = if status.installed { "✓" } else { "✗" };
        println!("  {mark} {} ({})", status.kind, status.kind.filename());
    }

    println!();
    let installed_count = models.iter().filter(|s| s.installed).count();
    println!("{}/{} models installed", installed_count, models.len());
}
