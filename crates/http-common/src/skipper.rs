use axum::http::{Request, header};
use once_cell::sync::Lazy;
use regex::Regex;

pub const HEALTH_PATH: &str = "/healthz";
pub const STATUS_PATH: &str = "/status";

static PROBE_AGENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(kube-probe|GoogleHC/)").expect("probe agent pattern compiles"));

/// True for the harness's own `/healthz` and `/status` routes.
pub fn is_builtin<B>(request: &Request<B>) -> bool {
    let path = request.uri().path();
    path == HEALTH_PATH || path == STATUS_PATH
}

/// True for liveness/status traffic that tracing and logging leave alone.
///
/// Probe user agents are only kept out of telemetry; their payloads are still bound.
pub fn is_probe<B>(request: &Request<B>) -> bool {
    if is_builtin(request) {
        return true;
    }

    request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|ua| ua.to_str().ok())
        .is_some_and(|ua| PROBE_AGENT.is_match(ua))
}
