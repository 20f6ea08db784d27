use std::{fmt, path::PathBuf};

use thiserror::Error;
use validator::ValidationErrors;

/// Which half of the configuration a failure belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfigScope {
    Harness,
    Service,
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Harness => f.write_str("harness"),
            Self::Service => f.write_str("service"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration for environment `{environment}` in {}", dir.display())]
    NotFound { dir: PathBuf, environment: String },

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Failed to deserialize {scope} configuration: {source}")]
    Deserialize {
        scope: ConfigScope,
        source: config::ConfigError,
    },

    #[error("Invalid {scope} configuration: {source}")]
    Invalid {
        scope: ConfigScope,
        source: ValidationErrors,
    },
}

impl ConfigError {
    pub fn scope(&self) -> Option<ConfigScope> {
        match self {
            Self::Deserialize { scope, .. } | Self::Invalid { scope, .. } => Some(*scope),
            _ => None,
        }
    }
}
