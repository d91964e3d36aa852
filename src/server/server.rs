use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::config::settings::SettingsConfig;
use crate::issuer::{ClientUserId, IssueLinkToken};
use crate::observability;
use crate::observability::metrics::get_metrics;
use crate::server::routes;
use crate::utils::constants::{HEALTH_PATH, LINK_TOKEN_PATH};

pub struct AppState<I> {
    pub issuer: Arc<I>,
    /// Identity used when a request does not name its own user.
    pub default_user: ClientUserId,
}

impl<I> AppState<I> {
    pub fn new(issuer: I, default_user: ClientUserId) -> Self {
        Self {
            issuer: Arc::new(issuer),
            default_user,
        }
    }
}

impl<I> Clone for AppState<I> {
    fn clone(&self) -> Self {
        Self {
            issuer: self.issuer.clone(),
            default_user: self.default_user.clone(),
        }
    }
}

pub fn router<I: IssueLinkToken>(settings_config: &SettingsConfig, state: AppState<I>) -> Router {
    Router::new()
        .route(LINK_TOKEN_PATH, get(routes::create_link_token::<I>))
        .route(HEALTH_PATH, get(routes::health))
        .merge(observability::routes::router::<AppState<I>>(&settings_config.metrics))
        .with_state(state)
}

/// Start the axum server and serve until `shutdown` resolves.
pub async fn start<I, F>(settings_config: &SettingsConfig, state: AppState<I>, shutdown: F) -> Result<()>
where
    I: IssueLinkToken,
    F: Future<Output = ()> + Send + 'static,
{
    let metrics = get_metrics().await;
    let app = router(settings_config, state);

    let bind_addr = settings_config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Server listening on {}", listener.local_addr()?);

    metrics.up.set(1);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;
    metrics.up.set(0);

    served.context("server terminated with error")
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
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
                tracing::error!("failed to listen for SIGTERM: {}", e);
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
    info!("shutting down gracefully");
}
