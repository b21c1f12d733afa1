//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::net::IpAddr;
use std::path::PathBuf;

/// Default HTTP port for the presentation itself.
pub const DEFAULT_HTTP_PORT: u16 = 8888;

/// Dais presentation server CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Presentation root directory (holds the steps file and assets)
    #[arg(default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub root: PathBuf,

    /// Steps file name, relative to the root (HTML fragments separated by ---)
    #[arg(short, long, default_value = "dais.html", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long, default_value = "127.0.0.1")]
    pub interface: IpAddr,

    /// Port number to listen on
    #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
    pub port: u16,

    /// Enable dev mode (step counter overlay on every page)
    #[arg(short, long)]
    pub dev: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}
