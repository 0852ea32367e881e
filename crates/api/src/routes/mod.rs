pub mod admin;
pub mod health;
pub mod sites;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sites                              site listing (read gate)
/// /sites/{id}/uptime                  uptime snapshot (read gate)
/// /sites/{id}/search-analytics        KPI snapshot (read gate)
/// /rollups/kpis                       fleet rollup (read gate)
///
/// /admin/settings                     get, save settings (operator only)
/// /admin/sites/{id}/metadata          get, save site override (operator only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(sites::router())
        .merge(admin::router())
}
