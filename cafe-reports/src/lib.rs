//! # cafe-reports: Reporting API for a Cafeteria Point of Sale
//!
//! `cafe-reports` serves the read side of a cafeteria point-of-sale system: five JSON
//! report endpoints covering daily sales, product rankings, customer value, inventory
//! risk, and the payment method mix.
//!
//! ## Overview
//!
//! The write side of the point of sale lives elsewhere; this service only reads. All of
//! the domain logic (daily grouping, revenue rankings, customer segmentation, stock risk
//! levels, payment shares) is baked into PostgreSQL views, and this crate's job is to
//! validate request parameters, build parameterized queries over those views, and return
//! the rows as JSON. That split keeps the HTTP layer thin and lets the report logic
//! evolve in the database without redeploying the API.
//!
//! ### What It Does
//!
//! At its core, the service receives a GET request for one of the five reports, validates
//! and normalizes the query parameters (date ranges, pagination, a sanitized product
//! search, a category filter), runs a parameterized query against the corresponding view,
//! and serializes the rows. Requests with malformed parameters are rejected with a `400`
//! before any SQL runs; when the database is unreachable the client receives a `500` with
//! a stable per-report message. There is nothing to create, update, or delete.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP
//! layer and uses PostgreSQL for all reads, optionally routed to a read replica.
//!
//! ### Request Flow
//!
//! A request to `/api/reports/*` passes through the tracing and CORS middleware, then
//! reaches its handler in [`api::handlers::reports`]. The handler validates every query
//! parameter via [`api::validation`], collecting all problems instead of stopping at the
//! first. With a clean filter in hand it calls the matching query function in
//! [`db::handlers::reports`], which assembles SQL through the [`db::statement`] builder
//! so that user input only ever travels as bind parameters. Rows come back as typed
//! structs and leave as JSON.
//!
//! ### Core Components
//!
//! The **API layer** ([`api`]) holds the request/response models, the parameter
//! validation rules, and one handler per report. The interactive documentation for the
//! whole surface is served at `/docs`.
//!
//! The **database layer** ([`db`]) owns the connection pools (primary plus optional read
//! replica), the SQL statement builder, and the per-report query functions over the
//! `vw_*` views.
//!
//! The **configuration layer** ([`config`]) merges a YAML file with environment
//! variables, and the **telemetry layer** ([`telemetry`]) wires structured logging with
//! optional OTLP span export.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use cafe_reports::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = cafe_reports::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize telemetry (structured logging and optional OpenTelemetry)
//!     cafe_reports::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
mod types;

#[cfg(test)]
mod test;

use crate::config::CorsOrigin;
use crate::db::pools::DbPools;
use crate::openapi::ApiDoc;
use axum::http::HeaderValue;
use axum::{Router, routing::get};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::Report;

/// Application state shared across all request handlers.
///
/// Everything a handler needs hangs off this struct: the database pools the
/// report queries run against and the loaded configuration.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pools)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: DbPools,
    pub config: Config,
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - The five report endpoints under `/api/reports/*`
/// - A `/healthz` liveness probe
/// - Interactive API documentation at `/docs`, raw document at `/api-docs/openapi.json`
/// - Optional Prometheus metrics at `/internal/metrics`
/// - CORS and tracing middleware
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    // Report routes, one GET per view
    let report_routes = Router::new()
        .route("/api/reports/sales-daily", get(api::handlers::reports::sales_daily))
        .route("/api/reports/top-products", get(api::handlers::reports::top_products))
        .route("/api/reports/customer-value", get(api::handlers::reports::customer_value))
        .route("/api/reports/inventory-risk", get(api::handlers::reports::inventory_risk))
        .route("/api/reports/payment-mix", get(api::handlers::reports::payment_mix))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { axum::Json(ApiDoc::openapi()) }))
        .merge(report_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Create CORS layer from config
    let cors_layer = create_cors_layer(&state.config)?;
    let mut router = router.layer(cors_layer);

    // Add Prometheus metrics if enabled
    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects the database pools and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: when the shutdown future resolves, drains in-flight requests, closes
///    the pools, and flushes telemetry
pub struct Application {
    router: Router,
    config: Config,
    pools: DbPools,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting report service with configuration: {:#?}", config);

        // Connect eagerly so a bad database URL fails here, not on the first request
        let pools = DbPools::connect(&config.database).await?;
        if pools.has_replica() {
            info!("Read replica configured, report queries will run against it");
        }

        let state = AppState::builder().db(pools.clone()).config(config.clone()).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pools })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Report service listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pools.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
