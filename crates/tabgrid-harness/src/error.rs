use std::path::PathBuf;

use tabgrid_layout::{ConfigError, LayoutError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("script error: {0}")]
    Script(#[source] LayoutError),

    #[error("step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: LayoutError,
    },

    #[error("{count} template issue(s) found")]
    InvalidTemplates { count: usize },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidTemplates { .. } => 1,
            Self::Config { .. } | Self::Script(_) | Self::Io(_) | Self::Json(_) => 2,
            Self::Step { .. } => 3,
        }
    }
}
