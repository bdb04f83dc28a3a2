use std::{process::ExitCode, sync::Arc};

use service_container::{Container, DynError};
use service_providers::LoggerAwareContainer;

use crate::{config::AppConfig, container::AppContainer};

/// How a full application start ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    ConfigFailed,
    ContainerFailed,
    RunFailed,
}
impl Outcome {
    /// Process exit status, anything but a completed run exits with 1
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Completed => 0,
            Outcome::ConfigFailed | Outcome::ContainerFailed | Outcome::RunFailed => 1,
        }
    }
}
impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Reads the configuration through `lookup`, wires the container and runs the application
///
/// Configuration and container errors are printed to stderr, the logger does not exist yet.
pub async fn start(lookup: impl Fn(&str) -> Option<String>) -> Outcome {
    let cfg = match AppConfig::from_lookup(lookup) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return Outcome::ConfigFailed;
        }
    };

    let cnt = match AppContainer::new(cfg.clone()).await {
        Ok(cnt) => cnt,
        Err(e) => {
            eprintln!("Container service error: {e}");
            return Outcome::ContainerFailed;
        }
    };

    // Route the container's own shutdown logs through the application logger
    if let Ok(logger) = cnt.logger() {
        if let Err(e) = logger.install_global() {
            logger.in_scope(|| tracing::warn!("Logger not installed globally: {e}"));
        }
    }

    // Errors are already logged by `run`
    match run(&cfg, cnt).await {
        Ok(()) => Outcome::Completed,
        Err(_) => Outcome::RunFailed,
    }
}

/// The "real" main, running the application on top of a wired container
///
/// The container is always shut down before returning. Errors are logged here,
/// callers only decide on the exit code.
pub async fn run(cfg: &AppConfig, cnt: Arc<AppContainer>) -> Result<(), DynError> {
    let result = serve(cfg, &cnt);

    if let Err(error) = &result {
        if let Ok(logger) = cnt.logger() {
            logger.in_scope(|| tracing::error!("Application failed: {error}"));
        }
    }

    cnt.shutdown().await;
    result
}

fn serve(cfg: &AppConfig, cnt: &AppContainer) -> Result<(), DynError> {
    let logger = cnt.logger()?;
    let service = cnt.my_service()?;

    logger.in_scope(|| {
        tracing::info!(bucket = %cfg.bucket, "¡Hola comrades! Let's rock and roll!");
        tracing::debug!("{service:?}");
    });
    Ok(())
}
