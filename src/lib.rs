pub mod api;
pub mod config;
pub mod core_state;
pub mod locator;
pub mod models;
pub mod triage;
pub mod verification;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::core_state::CoreState;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
}

/// Start the service and serve until Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServiceConfig::from_env()?;
    serve(config, shutdown_signal()).await
}

/// Run the service with `config` until `shutdown` resolves.
pub async fn serve<F>(config: ServiceConfig, shutdown: F) -> Result<(), RunError>
where
    F: std::future::Future<Output = ()>,
{
    let models = triage::load_model_set(&config.models_dir);
    let core = Arc::new(CoreState::new(models));

    let sweeper = config
        .sweep_interval
        .map(|interval| verification::spawn_sweeper(core.verification_handle(), interval));

    let mut server = api::start_server_on(core, config.socket_addr()).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    shutdown.await;

    server.shutdown();
    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }
    server.wait().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    #[tokio::test]
    async fn serve_stops_on_shutdown_signal() {
        let models_dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            models_dir: models_dir.path().to_path_buf(),
            sweep_interval: Some(Duration::from_millis(10)),
        };

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(serve(config, async move {
            let _ = rx.await;
        }));

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("serve should stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
