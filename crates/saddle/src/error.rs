use std::{io, net::SocketAddr};

use factory::factories::observability::error::ObservabilityError;
use thiserror::Error;

use crate::{config::ConfigError, service::AttachError};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error(transparent)]
    Attach(#[from] AttachError),

    #[error("Invalid listen address `{0}`")]
    Address(String),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}
