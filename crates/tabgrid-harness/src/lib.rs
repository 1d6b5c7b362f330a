#![forbid(unsafe_code)]

//! Developer harness for the tabgrid layout engine.

pub mod cli;
pub mod error;
pub mod replay;
pub mod report;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{HarnessError, Result};

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
