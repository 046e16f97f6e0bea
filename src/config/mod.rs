//! Configuration loading and types for docmerge.
//!
//! - Type definitions for config structures (`types`)
//! - Loading configs from files (`load`)

mod load;
mod types;

pub use load::DEFAULT_CONFIG_FILE;
pub use types::{Config, MarkdownConfig};

use crate::build::placeholder::VERSION_TOKEN;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}

impl Config {
    /// Check the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for placeholder in &self.html.placeholders {
            if placeholder.token.is_empty() {
                return Err(ConfigError::Validation(
                    "invalid config: placeholder tokens must not be empty".to_string(),
                ));
            }
            if placeholder.token == VERSION_TOKEN {
                return Err(ConfigError::Validation(format!(
                    "invalid config: '{}' is reserved for the build version",
                    VERSION_TOKEN
                )));
            }
        }
        Ok(())
    }
}
