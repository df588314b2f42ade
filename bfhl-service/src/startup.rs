//! Application startup and lifecycle management.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::BfhlConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::oracle::Oracle;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;

/// Request body cap; dispatch payloads are tiny, this is a hard ceiling.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state. Configuration is read once at startup and never
/// mutated; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BfhlConfig>,
    pub oracle: Arc<Oracle>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini-backed text provider.
    pub async fn build(config: BfhlConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.text_model.clone(),
        }));

        tracing::info!(
            model = %config.gemini.text_model,
            credential_configured = config.gemini.api_key.is_some(),
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, provider).await
    }

    /// Build with an explicit provider. Tests inject a deterministic mock
    /// here; the oracle's real backend is not repeatable.
    pub async fn build_with_provider(
        config: BfhlConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config: Arc::new(config),
            oracle: Arc::new(Oracle::new(provider)),
        };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Build the router: the two known routes plus the envelope-shaped 404
    /// fallback. The fallback is also registered on `/bfhl`'s method router
    /// so a GET there answers 404 rather than axum's bare 405.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/bfhl",
                post(handlers::dispatch_bfhl).fallback(handlers::not_found),
            )
            .fallback(handlers::not_found)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .with_state(state)
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Self::router(self.state);

        tracing::info!("bfhl-service listening on port {}", self.port);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
