//! Image Sorting - quarantine non-images and number photos by creation time
//!
//! Asks for confirmation (unless `--yes` is given), then sorts the chosen
//! directory tree and prints every rename.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use image_sorting::{Cli, Config, ConsoleReporter, Sorter, prompt};
use std::io;
use std::path::Path;
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    let log_path = config.log_file_path(Local::now());
    let _guard = setup_logging(&config, log_path.as_deref())?;

    info!(version = env!("CARGO_PKG_VERSION"), "Image Sorting starting");
    if let Some(ref path) = log_path {
        info!(log_file = %path.display(), "Log file location");
    }

    let config = match config.validate() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    let sorter = Sorter::new();
    let root = config.root.clone();
    let mut sort = |out: &mut io::Stdout| {
        let mut reporter = ConsoleReporter::new(&mut *out);
        sorter.run(&root, &mut reporter)
    };

    let mut stdout = io::stdout();
    if config.assume_yes {
        if !prompt::run_once(&mut stdout, &mut sort)? {
            std::process::exit(1);
        }
    } else {
        prompt::print_intro(&mut stdout, &root)?;
        prompt::run_loop(io::stdin().lock(), &mut stdout, sort)?;
    }

    Ok(())
}

/// Setup logging: stderr when running unattended or verbose, plus an
/// optional log file
fn setup_logging(config: &Config, log_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    // The prompt owns the terminal in interactive mode
    if config.assume_yes || config.verbose {
        let layer = if config.json_log {
            fmt::layer().json().with_writer(io::stderr).boxed()
        } else {
            fmt::layer().with_writer(io::stderr).boxed()
        };
        layers.push(layer);
    }

    if let Some(log_path) = log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file);
        guard = Some(worker_guard);

        let layer = if config.json_log {
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed()
        } else {
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed()
        };
        layers.push(layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    Ok(guard)
}
