//! REST API exposing the advisor's two operations.
//!
//! Provides two GET endpoints:
//! - `/prices` — a day's PVPC prices with min/max/average
//! - `/best-window` — the cheapest charging window for a duration and energy

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::get;

use crate::cache::PriceCache;
use crate::config::AdvisorConfig;
use crate::source::PvpcClient;

pub use types::{BestWindowResponse, ErrorResponse, HourlyPrice, PricesResponse};

/// Application state shared across all request handlers.
///
/// The client and config are read-only; the per-date cache sits behind a
/// mutex since concurrent requests may fill it for different days.
pub struct AppState {
    /// Upstream PVPC client.
    pub client: PvpcClient,
    /// Per-date price cache, invalidated at local midnight.
    pub cache: Mutex<PriceCache>,
    /// Advisor configuration for request defaults.
    pub config: AdvisorConfig,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/prices", get(handlers::get_prices))
        .route("/best-window", get(handlers::get_best_window))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
