//! Command implementations.

mod info;
mod play;
mod process;
mod resolve;
mod validate;

pub use info::run_info;
pub use play::run_play;
pub use process::run_process;
pub use resolve::run_resolve;
pub use validate::run_validate;

use config_loader::ConfigLoader;
use contracts::OverlayConfig;
use ingestion::{LoadedSession, SessionLoader};
use tracing::{info, warn};

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Load the configuration file (or defaults) and apply CLI overrides
pub(crate) fn load_config(source: &SourceArgs) -> Result<OverlayConfig> {
    let mut config = match &source.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()));
            }
            ConfigLoader::load_from_path(path)?
        }
        None => OverlayConfig::default(),
    };

    if let Some(ref telemetry) = source.telemetry {
        info!(telemetry = %telemetry.display(), "Overriding telemetry path from CLI");
        config.sources.telemetry = telemetry.clone();
    }
    if let Some(ref metadata) = source.metadata {
        info!(metadata = %metadata.display(), "Overriding metadata path from CLI");
        config.sources.metadata = Some(metadata.clone());
    }
    if let Some(dialect) = source.dialect {
        config.parser.dialect = dialect.into();
    }

    ConfigLoader::validate(&config)?;
    Ok(config)
}

/// Load the session named by the configuration
pub(crate) async fn load_session(config: &OverlayConfig) -> Result<LoadedSession> {
    let session = SessionLoader::from_config(config).load().await?;
    if session.series.is_empty() {
        warn!(
            telemetry = %config.sources.telemetry.display(),
            "No samples loaded - every lookup will be empty"
        );
    }
    Ok(session)
}

/// Resolve on Ctrl+C or SIGTERM
///
/// A handler that cannot be installed never fires.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
