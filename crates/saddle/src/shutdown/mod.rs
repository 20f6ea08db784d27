pub mod implementation;

use std::sync::{Mutex, atomic::AtomicBool};

use factory::factories::observability::Observability;
use tokio_util::sync::CancellationToken;

use crate::{config::ShutdownSettings, service::ShutdownHook};

pub const FORCED_EXIT_CODE: i32 = 1;

/// Owns the shutdown sequence: signal, drain, hook, telemetry flush.
///
/// The serving loop watches [`ShutdownCoordinator::token`]; `finish` runs the
/// collected hook and flushes telemetry exactly once no matter how often it
/// is called.
pub struct ShutdownCoordinator {
    settings: ShutdownSettings,
    token: CancellationToken,
    done: CancellationToken,
    hook: Mutex<Option<ShutdownHook>>,
    observability: Mutex<Option<Observability>>,
    finished: AtomicBool,
}
