use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::status::{BuildInfo, StatusResponse};

const UNKNOWN: &str = "unknown";

impl BuildInfo {
    pub fn new(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            compiled_at: UNKNOWN.to_string(),
            git_commit: UNKNOWN.to_string(),
            git_branch: UNKNOWN.to_string(),
            profile: UNKNOWN.to_string(),
            target: UNKNOWN.to_string(),
        }
    }
}

impl StatusResponse {
    /// Uptime in seconds, parsed back from the `"<secs>s"` wire form.
    pub fn uptime_secs(&self) -> Option<f64> {
        self.uptime.strip_suffix('s')?.parse().ok()
    }
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
