use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use http_contracts::{BuildInfo, StatusResponse};

use crate::status::StatusInfo;

impl StatusInfo {
    pub fn new(build: BuildInfo) -> Self {
        Self {
            build,
            executed_at: Utc::now(),
            started_at: Instant::now(),
        }
    }

    pub fn build(&self) -> &BuildInfo {
        &self.build
    }

    pub fn report(&self) -> StatusResponse {
        StatusResponse {
            version: self.build.version.clone(),
            compiled_at: self.build.compiled_at.clone(),
            executed_at: self.executed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            uptime: format!("{:.3}s", self.started_at.elapsed().as_secs_f64()),
            build_info: self.build.clone(),
        }
    }
}
