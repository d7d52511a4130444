//! Application startup and lifecycle management.

use crate::config::HotelConfig;
use crate::handlers::{guests, invoices, ledger, rooms};
use crate::reporting::DisplayFormatter;
use crate::services::metrics::track_http_metrics;
use crate::services::{get_metrics, init_metrics, setup, Database};
use axum::{
    extract::State, http::StatusCode, middleware, response::IntoResponse, routing::get,
    routing::post, Json, Router,
};
use serde_json::json;
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: HotelConfig,
    pub db: Arc<Database>,
    pub formatter: Arc<DisplayFormatter>,
}

/// Health check endpoint for liveness probes.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(_) => {
            tracing::debug!("Health check passed");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "ok",
                    "service": "hotel-service",
                    "version": env!("CARGO_PKG_VERSION")
                })),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed - database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "hotel-service",
                    "error": e.to_string()
                })),
            )
        }
    }
}

/// Readiness check endpoint.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Metrics endpoint for Prometheus scraping.
async fn metrics_handler() -> impl IntoResponse {
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
    /// Build the application: connect, migrate, bootstrap defaults, bind.
    pub async fn build(config: HotelConfig) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        db.run_migrations().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            e
        })?;

        setup::ensure_defaults(&db, &config.bootstrap)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to bootstrap defaults");
                e
            })?;

        let host: IpAddr = config.common.host.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Invalid host '{}': {}",
                config.common.host,
                e
            ))
        })?;
        let addr = SocketAddr::new(host, config.common.port);
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let formatter = DisplayFormatter::new(
            config.locale.currency.clone(),
            config.locale.date_format.clone(),
        );

        let state = AppState {
            config,
            db: Arc::new(db),
            formatter: Arc::new(formatter),
        };

        tracing::info!(port = port, "Hotel service listener bound");

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
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/metrics", get(metrics_handler))
            .route("/guests", post(guests::create_guest))
            .route("/guests/:guest_id/ledger", get(ledger::guest_ledger_by_id))
            .route("/guest-ledger", get(ledger::guest_ledger))
            .route(
                "/check-ins/:check_in_id/invoice",
                post(invoices::create_invoice),
            )
            .route(
                "/check-ins/:check_in_id/additional-invoice",
                post(invoices::create_additional_invoice),
            )
            .route(
                "/check-ins/:check_in_id/general-ledger",
                get(ledger::general_ledger),
            )
            .route(
                "/reservations/:reservation_id/rooms",
                get(rooms::search_rooms),
            )
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(track_http_metrics))
            .layer(middleware::from_fn(request_id_middleware))
            .with_state(self.state);

        tracing::info!(
            service = "hotel-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await
    }
}
