//! REST API exposing the calculator.
//!
//! Read-only GET endpoints:
//! - `/catalog`: panel technologies
//! - `/site`: site constants, tariffs, slider range
//! - `/simulate`: one energy balance
//! - `/sweep`: energy balances over a panel-count range

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::sim::balance::EnergyBalanceCalculator;
use crate::sim::sweep::SliderRange;

/// Largest number of rows a single `/sweep` request may return.
pub const MAX_SWEEP_ROWS: u32 = 1000;

/// Immutable application state shared across all request handlers.
///
/// Wrapped in `Arc`; no locks needed since the calculator is read-only.
pub struct AppState {
    /// Calculator built from the scenario.
    pub calculator: EnergyBalanceCalculator,
    /// Default sweep range.
    pub slider: SliderRange,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/site", get(handlers::get_site))
        .route("/simulate", get(handlers::get_simulate))
        .route("/sweep", get(handlers::get_sweep))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
