//! Application startup and lifecycle management.

use crate::config::TopicConfig;
use crate::handlers::{health_check, readiness_check, receive_message, send_message};
use crate::services::{get_metrics, MockPublisher, SnsPublisher, TopicPublisher};
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: TopicConfig,
    pub publisher: Arc<dyn TopicPublisher>,
}

async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration, selecting
    /// the SNS publisher or a mock depending on config.
    pub async fn build(config: TopicConfig) -> Result<Self, AppError> {
        let publisher: Arc<dyn TopicPublisher> = if config.aws.enabled {
            let publisher = SnsPublisher::from_config(&config.aws).await.map_err(|e| {
                tracing::error!("Failed to initialize SNS publisher: {}", e);
                AppError::ConfigError(anyhow::anyhow!(e))
            })?;
            tracing::info!(offline = config.aws.offline, "SNS publisher initialized");
            Arc::new(publisher)
        } else {
            tracing::info!("SNS publisher disabled, using mock publisher");
            Arc::new(MockPublisher::new(true))
        };

        Self::build_with_publisher(config, publisher).await
    }

    /// Build the application with an injected publisher.
    pub async fn build_with_publisher(
        config: TopicConfig,
        publisher: Arc<dyn TopicPublisher>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            publisher,
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("topic-service listening on port {}", port);

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

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Router::new()
            .route("/send", post(send_message))
            .route("/receive", post(receive_message))
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/metrics", get(metrics_endpoint))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        axum::serve(self.listener, router).await
    }
}
