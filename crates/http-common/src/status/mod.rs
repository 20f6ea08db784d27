pub mod implementation;

use std::time::Instant;

use chrono::{DateTime, Utc};
use http_contracts::BuildInfo;

/// Process facts served by `GET /status`, captured once at construction.
#[derive(Clone, Debug)]
pub struct StatusInfo {
    build: BuildInfo,
    executed_at: DateTime<Utc>,
    started_at: Instant,
}
