use std::path::{Path, PathBuf};

use config::{Config, File, Map, Source, Value, ValueKind};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::config::{
    ConfigError, ConfigLoader, ConfigScope, DEFAULT_CONFIG_DIR, HARNESS_KEY, HarnessConfig,
    LoadedConfig, ShutdownSettings, default_drain_timeout_secs, default_flush_timeout_secs,
};

const EXTENSIONS: [&str; 2] = ["json", "toml"];

impl Default for ShutdownSettings {
    fn default() -> Self {
        Self {
            drain_timeout_secs: default_drain_timeout_secs(),
            flush_timeout_secs: default_flush_timeout_secs(),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}

impl ConfigLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads both configuration stages, with overrides from the process environment.
    pub fn load<C>(&self, environment: &str) -> Result<LoadedConfig<C>, ConfigError>
    where
        C: DeserializeOwned + Validate,
    {
        self.load_with(environment, |name| dotenvy::var(name).ok())
    }

    /// Like [`ConfigLoader::load`], resolving overrides through `lookup`.
    ///
    /// Every leaf key of the file, e.g. `harness.jaeger.sample_rate`, may be
    /// overridden by the variable `HARNESS_JAEGER_SAMPLE_RATE`.
    pub fn load_with<C, F>(&self, environment: &str, lookup: F) -> Result<LoadedConfig<C>, ConfigError>
    where
        C: DeserializeOwned + Validate,
        F: Fn(&str) -> Option<String>,
    {
        let path = self.locate(environment)?;
        debug!(path = %path.display(), "loading configuration");

        let file = Config::builder()
            .add_source(File::from(path.as_path()))
            .build()?;

        let mut builder = Config::builder().add_source(File::from(path.as_path()));
        for key in leaf_keys(&file.collect()?) {
            if let Some(value) = lookup(&override_name(&key)) {
                debug!(%key, "configuration value overridden from environment");
                builder = builder.set_override(key, value)?;
            }
        }
        let merged = builder.build()?;

        let harness = harness_config(&merged)?;
        harness.validate().map_err(|source| ConfigError::Invalid {
            scope: ConfigScope::Harness,
            source,
        })?;

        let service: C = merged
            .try_deserialize()
            .map_err(|source| ConfigError::Deserialize {
                scope: ConfigScope::Service,
                source,
            })?;
        service.validate().map_err(|source| ConfigError::Invalid {
            scope: ConfigScope::Service,
            source,
        })?;

        Ok(LoadedConfig { harness, service })
    }

    fn locate(&self, environment: &str) -> Result<PathBuf, ConfigError> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{environment}.{ext}")))
            .find(|path| path.is_file())
            .ok_or_else(|| ConfigError::NotFound {
                dir: self.dir.clone(),
                environment: environment.to_string(),
            })
    }
}

fn harness_config(merged: &Config) -> Result<HarnessConfig, ConfigError> {
    Ok(HarnessConfig {
        exporters: section(merged, HARNESS_KEY)?,
        logging: section(merged, &format!("{HARNESS_KEY}.logging"))?,
        shutdown: section(merged, &format!("{HARNESS_KEY}.shutdown"))?,
    })
}

/// Deserializes the table at `key`, or its default when the table is absent.
fn section<T>(merged: &Config, key: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    match merged.get::<T>(key) {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(_)) => Ok(T::default()),
        Err(source) => Err(ConfigError::Deserialize {
            scope: ConfigScope::Harness,
            source,
        }),
    }
}

/// `harness.jaeger.sample_rate` -> `HARNESS_JAEGER_SAMPLE_RATE`
pub fn override_name(key: &str) -> String {
    key.replace('.', "_").to_uppercase()
}

fn leaf_keys(table: &Map<String, Value>) -> Vec<String> {
    let mut keys = Vec::new();
    collect_leaves(None, table, &mut keys);
    keys.sort();
    keys
}

fn collect_leaves(prefix: Option<&str>, table: &Map<String, Value>, out: &mut Vec<String>) {
    for (name, value) in table {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.clone(),
        };
        match &value.kind {
            ValueKind::Table(inner) => collect_leaves(Some(&key), inner, out),
            _ => out.push(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_names_are_upper_snake() {
        assert_eq!(
            override_name("harness.jaeger.sample_rate"),
            "HARNESS_JAEGER_SAMPLE_RATE"
        );
        assert_eq!(override_name("v1.test"), "V1_TEST");
    }

    #[test]
    fn shutdown_defaults() {
        let settings = ShutdownSettings::default();

        assert_eq!(settings.drain_timeout_secs, 10);
        assert_eq!(settings.flush_timeout_secs, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn shutdown_timeouts_are_bounded() {
        let settings = ShutdownSettings {
            drain_timeout_secs: 0,
            flush_timeout_secs: 301,
        };

        let errors = settings.validate().unwrap_err();
        assert!(errors.errors().contains_key("drain_timeout_secs"));
        assert!(errors.errors().contains_key("flush_timeout_secs"));
    }
}
