//! ksy-manifest CLI - rebuild the parser manifest of a format library
//!
//! Usage: ksy-manifest [--rebuild-all]
//!
//! Logging is controlled with `KSY_LOG` (default `info`).

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ksy_manifest::config::{load_or_default, ConfigWarning};
use ksy_manifest::ui::ConsoleProgress;
use ksy_manifest::{
    ExternalCompiler, GitHistory, JsonManifestRepository, ManifestError, RebuildReport,
    RebuildUseCase,
};

/// Compile a Kaitai Struct format library and maintain its parser manifest
#[derive(Parser, Debug)]
#[command(name = "ksy-manifest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rebuild even if the manifest is up to date
    #[arg(short = 'a', long = "rebuild-all")]
    rebuild_all: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing() {
        eprintln!("Warning: {err:#}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("KSY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine the working directory")?;
    let loaded = load_or_default(&cwd).context("failed to load configuration")?;
    for warning in &loaded.warnings {
        warn_unknown_key(warning);
    }
    if let Some(source) = &loaded.source {
        tracing::debug!("using config {}", source.display());
    }

    let config = loaded.config;
    let compiler = Arc::new(ExternalCompiler::from_config(&config));
    let history = GitHistory::new(&config.library_root);
    let use_case = RebuildUseCase::new(config, compiler, history, JsonManifestRepository::new());

    let mut progress = ConsoleProgress::stderr();
    let report = use_case.execute(cli.rebuild_all, &mut progress)?;
    print_summary(&report, &use_case.config().manifest_path());
    Ok(())
}

fn warn_unknown_key(warning: &ConfigWarning) {
    match warning.line {
        Some(line) => tracing::warn!(
            "unknown config key '{}' in {}:{}",
            warning.key,
            warning.file.display(),
            line
        ),
        None => tracing::warn!(
            "unknown config key '{}' in {}",
            warning.key,
            warning.file.display()
        ),
    }
}

fn print_summary(report: &RebuildReport, manifest_path: &Path) {
    if !report.rebuilt() {
        match report.existing_entries {
            Some(entries) => println!(
                "{} is up to date ({} entries)",
                manifest_path.display(),
                entries
            ),
            None => println!("{} is up to date", manifest_path.display()),
        }
        return;
    }

    println!(
        "Wrote {} entries to {} ({} failed, {} excluded by license)",
        report.entries(),
        manifest_path.display(),
        report.failures().len(),
        report.excluded
    );
}

fn report_error(err: &anyhow::Error) {
    let compiler_missing = err
        .downcast_ref::<ManifestError>()
        .is_some_and(ManifestError::is_compiler_unavailable);

    if compiler_missing {
        eprintln!("Error: You must have kaitai-struct-compiler installed");
        eprintln!("See https://kaitai.io/#download");
        eprintln!("  ({err})");
    } else {
        eprintln!("Error: {err:#}");
    }
}
