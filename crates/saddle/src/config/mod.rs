pub mod error;
pub mod implementation;

use std::path::PathBuf;

use factory::factories::observability::{ExporterSettings, LoggingConfig};
use serde::Deserialize;
use validator::Validate;

pub use error::{ConfigError, ConfigScope};

pub const DEFAULT_CONFIG_DIR: &str = ".config";
pub const HARNESS_KEY: &str = "harness";

/// Harness-owned part of the configuration tree, read from the `harness` table.
#[derive(Validate, Clone, Default, Debug)]
pub struct HarnessConfig {
    #[validate(nested)]
    pub exporters: ExporterSettings,
    #[validate(nested)]
    pub logging: LoggingConfig,
    #[validate(nested)]
    pub shutdown: ShutdownSettings,
}

#[derive(Deserialize, Validate, Clone, Copy, PartialEq, Eq, Debug)]
pub struct ShutdownSettings {
    #[serde(default = "default_drain_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub drain_timeout_secs: u64,
    #[serde(default = "default_flush_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub flush_timeout_secs: u64,
}

/// Reads `<dir>/<environment>.{json,toml}` with environment variable overrides.
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LoadedConfig<C> {
    pub harness: HarnessConfig,
    pub service: C,
}

fn default_drain_timeout_secs() -> u64 {
    10
}

fn default_flush_timeout_secs() -> u64 {
    5
}
