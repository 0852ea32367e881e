//! Route definitions for the token- or session-gated read surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::sites;
use crate::state::AppState;

/// Read routes consumed by reporting connectors and the admin client.
///
/// ```text
/// GET /sites                        -> list_sites
/// GET /sites/{id}/uptime            -> site_uptime
/// GET /sites/{id}/search-analytics  -> site_kpis
/// GET /rollups/kpis                 -> rollup_kpis
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sites", get(sites::list_sites))
        .route("/sites/{id}/uptime", get(sites::site_uptime))
        .route("/sites/{id}/search-analytics", get(sites::site_kpis))
        .route("/rollups/kpis", get(sites::rollup_kpis))
}
