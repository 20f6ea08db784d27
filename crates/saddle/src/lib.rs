pub mod boot;
pub mod config;
pub mod engine;
pub mod error;
pub mod harness;
pub mod service;
pub mod shutdown;

pub use boot::{BootOptions, run, up};
pub use config::{ConfigError, ConfigLoader, HarnessConfig, LoadedConfig, ShutdownSettings};
pub use engine::Engine;
pub use error::HarnessError;
pub use harness::Saddle;
pub use http_common::Payload;
pub use http_contracts::BuildInfo;
pub use service::{AttachContext, AttachError, BoxError, Service, ShutdownHook};
pub use shutdown::ShutdownCoordinator;

/// Captures [`BuildInfo`] for the calling crate.
///
/// Package name and version come from Cargo; the rest is read from
/// `SADDLE_COMPILED_AT`, `SADDLE_GIT_COMMIT`, `SADDLE_GIT_BRANCH`,
/// `SADDLE_BUILD_PROFILE` and `SADDLE_BUILD_TARGET`, which the calling
/// crate's build script is expected to export. Missing values read `unknown`.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::BuildInfo {
            package: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            compiled_at: option_env!("SADDLE_COMPILED_AT")
                .unwrap_or("unknown")
                .to_string(),
            git_commit: option_env!("SADDLE_GIT_COMMIT")
                .unwrap_or("unknown")
                .to_string(),
            git_branch: option_env!("SADDLE_GIT_BRANCH")
                .unwrap_or("unknown")
                .to_string(),
            profile: option_env!("SADDLE_BUILD_PROFILE")
                .unwrap_or("unknown")
                .to_string(),
            target: option_env!("SADDLE_BUILD_TARGET")
                .unwrap_or("unknown")
                .to_string(),
        }
    };
}
