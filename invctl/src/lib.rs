//! # invctl: Inventory Reconciliation and Reporting Layer
//!
//! `invctl` sits on top of an RFID-tagged asset database and keeps two views
//! of the same physical inventory coherent: the **item master**, the
//! authoritative record mutated by every scan and contract event, and the
//! **tag records**, a secondary per-tag status mirror that is allowed to
//! drift. It serves reconciled, categorized, paginated reporting views over
//! that state and a guarded "mark sold" lifecycle mutation.
//!
//! ## What It Does
//!
//! Every read request triggers one pass through fetch → reconcile →
//! categorize → filter/aggregate → respond. Reconciliation is a side effect
//! of reading: when a tag record disagrees with its item (the item went out
//! on a contract, or came back), the correction is written back immediately,
//! one row at a time, and a failed write never fails the read — the endpoint
//! degrades to serving the best-known data. Categories are never stored;
//! they are recomputed from the item's free-text name on every read through
//! an ordered, first-match-wins keyword rule table.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL for persistence via SQLx.
//!
//! - The **core engines** ([`categorize`], [`reconcile`], [`aggregate`],
//!   [`filters`], [`lifecycle`]) are pure or near-pure: planning and
//!   grouping are total functions, and only the thin drivers touch the
//!   database.
//! - The **database layer** ([`db`]) uses the repository pattern; every
//!   mutation is row-scoped and keyed by tag identifier, so concurrent
//!   writers race cleanly instead of clobbering each other.
//! - The **API layer** ([`api`]) translates query parameters into the core
//!   contracts and maps the typed error taxonomy onto HTTP statuses in one
//!   place ([`errors`]).
//! - A caller-owned TTL [`cache`] may serve the rendered summary view
//!   between recomputations; it never holds raw item or tag state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use invctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = invctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     invctl::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod categorize;
pub mod config;
pub mod db;
pub mod errors;
pub mod filters;
pub mod lifecycle;
mod openapi;
pub mod reconcile;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::api::models::inventory::ResaleSummaryResponse;
use crate::cache::{SystemClock, TtlCache};
use axum::{
    routing::{get, post},
    Router,
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Rendered summary view, served between recomputations
    pub summary_cache: Arc<TtlCache<ResaleSummaryResponse>>,
}

/// Get the invctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Build the application router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/inventory/resale/summary",
            get(api::handlers::inventory::get_resale_summary),
        )
        .route(
            "/inventory/resale/items",
            get(api::handlers::inventory::list_resale_items),
        )
        .route(
            "/inventory/resale/items/{tag_id}/sold",
            post(api::handlers::inventory::mark_item_sold),
        )
        .with_state(state);

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects to the database, runs
///    migrations and builds the router.
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPool::connect(&config.database.url).await?;
        migrator().run(&pool).await?;

        let summary_cache = Arc::new(TtlCache::new(config.summary_cache_ttl, Arc::new(SystemClock)));
        let state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .summary_cache(summary_cache)
            .build();
        let router = build_router(state);

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Inventory control layer listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
