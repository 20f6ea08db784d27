use std::{future::Future, net::SocketAddr, path::PathBuf, sync::Arc};

use factory::factories::observability::{Observability, ServiceIdentity};
use http_contracts::BuildInfo;
use tokio::net::TcpListener;
use tracing::{error, info};
use utility::shutdown_signal::shutdown_signal;

use crate::{
    config::{ConfigLoader, DEFAULT_CONFIG_DIR},
    error::HarnessError,
    harness::Saddle,
    service::{AttachContext, Service},
    shutdown::ShutdownCoordinator,
};

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
pub const BOOT_FAILURE_EXIT_CODE: i32 = 1;

const LOGO: &str = r"
   _____           __    ____
  / ___/____ _____/ /___/ / /__
  \__ \/ __ `/ __  / __  / / _ \
 ___/ / /_/ / /_/ / /_/ / /  __/
/____/\__,_/\__,_/\__,_/_/\___/
";

#[derive(Clone, Debug)]
pub struct BootOptions {
    pub environment: String,
    pub address: String,
    pub config_dir: PathBuf,
    pub build: BuildInfo,
}

impl BootOptions {
    pub fn new(environment: impl Into<String>, build: BuildInfo) -> Self {
        Self {
            environment: environment.into(),
            address: DEFAULT_ADDRESS.to_string(),
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            build,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }
}

/// Boots `service` and serves until SIGINT/SIGTERM.
///
/// Any boot failure is logged and ends the process with exit code 1.
pub async fn up<S>(service: S, options: BootOptions)
where
    S: Service,
{
    if let Err(err) = run(service, options, shutdown_signal).await {
        fatal(&err);
        std::process::exit(BOOT_FAILURE_EXIT_CODE);
    }
}

/// The boot sequence, with the termination signal supplied by the caller.
pub async fn run<S, Sig, F>(mut service: S, options: BootOptions, signal: Sig) -> Result<(), HarnessError>
where
    S: Service,
    Sig: Fn() -> F + Send + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let BootOptions {
        environment,
        address,
        config_dir,
        build,
    } = options;

    let loaded = ConfigLoader::new(config_dir).load::<S::Config>(&environment)?;
    let address: SocketAddr = address
        .parse()
        .map_err(|_| HarnessError::Address(address.clone()))?;

    banner(&service, &environment);

    let identity = ServiceIdentity::new(service.name(), build.version.clone(), environment.clone());
    let exporter = loaded.harness.exporters.select();
    let observability = Observability::init(&identity, &exporter, &loaded.harness.logging)?;
    let tracer = observability.tracer.clone();

    let coordinator = Arc::new(ShutdownCoordinator::new(loaded.harness.shutdown));
    coordinator.manage(observability);

    service.configure(loaded.service);

    let ctx = AttachContext::new(service.name(), environment, tracer);
    let saddle = match Saddle::new(&mut service, &ctx, build, &coordinator) {
        Ok(saddle) => saddle,
        Err(err) => {
            coordinator.finish().await;
            return Err(err.into());
        }
    };

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(source) => {
            coordinator.finish().await;
            return Err(HarnessError::Bind { address, source });
        }
    };

    info!("🚀 {} service running at {}", ctx.service, address);

    saddle.serve(listener, signal).await
}

fn banner<S: Service>(service: &S, environment: &str) {
    println!("{LOGO}");
    println!("  service:     {}", service.name());
    println!("  environment: {environment}");
    println!("  {}", service.description());
    println!();
}

/// Logs a boot failure, through a throwaway JSON subscriber if logging is not up yet.
fn fatal(err: &HarnessError) {
    if tracing::dispatcher::has_been_set() {
        error!(error = %err, "failed to start service");
        return;
    }

    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_target(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        error!(error = %err, "failed to start service");
    });
}
