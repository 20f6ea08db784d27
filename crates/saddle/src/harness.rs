use std::{
    future::{Future, IntoFuture},
    net::SocketAddr,
    sync::Arc,
};

use axum::Router;
use http_common::StatusInfo;
use http_contracts::BuildInfo;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    engine::Engine,
    error::HarnessError,
    service::{AttachContext, AttachError, Service},
    shutdown::ShutdownCoordinator,
};

/// An attached service with its finished router, ready to serve.
pub struct Saddle {
    router: Router,
    coordinator: Arc<ShutdownCoordinator>,
}

impl Saddle {
    /// Builds the engine, lets `service` attach its routes and applies the pipeline.
    ///
    /// Any shutdown hook the service returns is registered with `coordinator`,
    /// including one carried by a failed attach.
    pub fn new<S>(
        service: &mut S,
        ctx: &AttachContext,
        build: BuildInfo,
        coordinator: &Arc<ShutdownCoordinator>,
    ) -> Result<Self, AttachError>
    where
        S: Service,
    {
        let mut engine = Engine::new(Arc::new(StatusInfo::new(build)));

        let attached = {
            let _entered = ctx.span.enter();
            service.attach(&mut engine, ctx)
        };

        match attached {
            Ok(Some(hook)) => coordinator.register(hook),
            Ok(None) => {}
            Err(mut err) => {
                if let Some(hook) = err.take_shutdown() {
                    coordinator.register(hook);
                }
                return Err(err);
            }
        }

        Ok(Self {
            router: engine.finalize(),
            coordinator: Arc::clone(coordinator),
        })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until a termination signal, then drains and runs the shutdown sequence.
    ///
    /// In-flight requests get at most `drain_timeout_secs` to complete.
    pub async fn serve<S, F>(self, listener: TcpListener, signal: S) -> Result<(), HarnessError>
    where
        S: Fn() -> F + Send + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        let signals = self.coordinator.listen(signal);
        let token = self.coordinator.token();
        let drain_timeout = self.coordinator.drain_timeout();

        let server = axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(token.clone().cancelled_owned())
        .into_future();

        let drain_deadline = async {
            token.cancelled().await;
            tokio::time::sleep(drain_timeout).await;
        };

        let served = tokio::select! {
            served = server => served,
            _ = drain_deadline => {
                warn!(?drain_timeout, "in-flight requests did not drain in time");
                Ok(())
            }
        };

        info!("gracefully shutting down");
        self.coordinator.finish().await;
        signals.abort();

        served.map_err(HarnessError::Serve)
    }
}
