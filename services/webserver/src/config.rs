use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct V1Config {
    #[validate(length(min = 1, code = "required"))]
    pub test: String,
}

/// Service half of `.config/<environment>.json`.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct WebserverConfig {
    #[validate(nested)]
    pub v1: V1Config,
}
