//! Dais - a local presentation server.
//!
//! Renders HTML steps from a single `---`-separated source file, serves
//! them as navigable pages, keeps a synchronized speaker-notes view, and
//! live-reloads connected browsers on file change.

mod actor;
mod cli;
mod core;
mod embed;
mod logger;
mod notes;
mod reload;
mod serve;
mod steps;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = cli::Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("invalid presentation root {}", cli.root.display()))?;
    let config = Arc::new(core::ServeConfig::new(root, &cli.file, cli.dev));

    // Startup sanity check: refuse to serve an unreadable steps file
    let count = steps::verify_steps(&config.steps_file)
        .with_context(|| format!("cannot serve {}", config.steps_file.display()))?;
    debug!("steps"; "{} pages in {}", count, config.steps_file.display());

    // Live reload port is selected once and immutable afterward
    let ws_port = reload::port::select_port(reload::DEFAULT_WS_PORT)?;
    reload::set_ws_port(ws_port);
    debug!("reload"; "ws://localhost:{}", ws_port);

    let notes = Arc::new(notes::SpeakerNotes::new());
    let server = serve::bind_server(cli.interface, cli.port)?;
    server.run(config, notes)
}
