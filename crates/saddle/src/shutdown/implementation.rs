use std::{
    future::Future,
    io::Write,
    sync::{Arc, PoisonError, atomic::Ordering},
    time::Duration,
};

use factory::factories::observability::Observability;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{
    config::ShutdownSettings,
    service::ShutdownHook,
    shutdown::{FORCED_EXIT_CODE, ShutdownCoordinator},
};

impl ShutdownCoordinator {
    pub fn new(settings: ShutdownSettings) -> Self {
        Self {
            settings,
            token: CancellationToken::new(),
            done: CancellationToken::new(),
            hook: Default::default(),
            observability: Default::default(),
            finished: Default::default(),
        }
    }

    pub fn settings(&self) -> ShutdownSettings {
        self.settings
    }

    /// Cancelled once shutdown has been requested.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.drain_timeout_secs)
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.flush_timeout_secs)
    }

    /// Stores the service's hook; only the first one is kept.
    pub fn register(&self, hook: ShutdownHook) {
        let mut slot = self.hook.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            warn!("shutdown hook already registered, ignoring another");
            return;
        }
        *slot = Some(hook);
    }

    /// Hands over the telemetry pipeline to be flushed last.
    pub fn manage(&self, observability: Observability) {
        *self
            .observability
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(observability);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Waits for termination signals in the background.
    ///
    /// The first signal cancels the serving token. A second one arriving
    /// before `finish` completes exits the process with code 1.
    pub fn listen<S, F>(self: &Arc<Self>, signal: S) -> JoinHandle<()>
    where
        S: Fn() -> F + Send + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = signal() => {
                    info!("initiating shutdown");
                    coordinator.token.cancel();
                }
                _ = coordinator.token.cancelled() => {}
            }

            tokio::select! {
                _ = signal() => {
                    error!("received second termination signal, forcing exit");
                    let _ = std::io::stdout().flush();
                    std::process::exit(FORCED_EXIT_CODE);
                }
                _ = coordinator.done.cancelled() => {}
            }
        })
    }

    /// Runs the shutdown sequence once; later callers wait for it to complete.
    pub async fn finish(&self) {
        if self.finished.swap(true, Ordering::SeqCst) {
            self.done.cancelled().await;
            return;
        }
        self.token.cancel();

        let hook = self
            .hook
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(hook) = hook {
            match tokio::task::spawn_blocking(hook).await {
                Ok(()) => info!("shutdown hook completed"),
                Err(err) => error!(error = %err, "shutdown hook failed"),
            }
        }

        let observability = self
            .observability
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(observability) = observability {
            observability.shutdown(self.flush_timeout()).await;
        }

        let _ = std::io::stdout().flush();
        self.done.cancel();
    }
}
