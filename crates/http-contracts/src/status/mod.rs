pub mod implementation;

use serde::{Deserialize, Serialize};

/// Compile-time facts about the running binary.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct BuildInfo {
    pub package: String,
    pub version: String,
    pub compiled_at: String,
    pub git_commit: String,
    pub git_branch: String,
    pub profile: String,
    pub target: String,
}

/// Body of `GET /status`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct StatusResponse {
    pub version: String,
    pub compiled_at: String,
    pub executed_at: String,
    pub uptime: String,
    pub build_info: BuildInfo,
}
