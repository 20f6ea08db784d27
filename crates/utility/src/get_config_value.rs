use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValueError {
    #[error("Environment variable {0} not set")]
    Missing(String),

    #[error("Environment variable {name} has an invalid value `{value}`")]
    Invalid { name: String, value: String },
}

/// Reads `env_name` (after `.env` files are loaded) and parses it.
///
/// Unset variables fall back to `fallback`; unparsable values are an error
/// rather than silently replaced.
pub fn get_config_value<T>(env_name: &str, fallback: Option<T>) -> Result<T, ConfigValueError>
where
    T: FromStr,
{
    match get_optional_config_value(env_name)? {
        Some(value) => Ok(value),
        None => fallback.ok_or_else(|| ConfigValueError::Missing(env_name.to_string())),
    }
}

pub fn get_optional_config_value<T>(env_name: &str) -> Result<Option<T>, ConfigValueError>
where
    T: FromStr,
{
    let Ok(raw) = dotenvy::var(env_name) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    T::from_str(trimmed)
        .map(Some)
        .map_err(|_| ConfigValueError::Invalid {
            name: env_name.to_string(),
            value: raw.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET: &str = "SADDLE_UTILITY_TEST_DEFINITELY_UNSET";

    #[test]
    fn unset_uses_fallback() {
        let address: String = get_config_value(UNSET, Some("0.0.0.0:8080".to_string())).unwrap();
        assert_eq!(address, "0.0.0.0:8080");
    }

    #[test]
    fn unset_without_fallback_is_missing() {
        let result = get_config_value::<String>(UNSET, None);
        assert_eq!(result, Err(ConfigValueError::Missing(UNSET.to_string())));
    }

    #[test]
    fn set_value_is_parsed() {
        // cargo exports the package name to test processes
        let name: String = get_config_value("CARGO_PKG_NAME", None).unwrap();
        assert_eq!(name, "utility");

        let port = get_config_value::<u16>("CARGO_PKG_NAME", Some(80));
        assert!(matches!(port, Err(ConfigValueError::Invalid { .. })));
    }
}
