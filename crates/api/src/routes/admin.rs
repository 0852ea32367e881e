//! Route definitions for the operator-only admin surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET  /admin/settings              -> get_settings
/// POST /admin/settings              -> save_settings
/// GET  /admin/sites/{id}/metadata   -> site_metadata
/// POST /admin/sites/{id}/metadata   -> save_site_meta
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/settings",
            get(admin::get_settings).post(admin::save_settings),
        )
        .route(
            "/admin/sites/{id}/metadata",
            get(admin::site_metadata).post(admin::save_site_meta),
        )
}
