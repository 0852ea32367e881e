//! Read handlers: the site listing, per-site snapshots, and the fleet
//! rollup. Every handler sits behind the read gate.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use siteops_core::dates::canonicalize_date;
use siteops_core::types::SiteId;
use siteops_store::models::snapshot::KpiSnapshot;

use crate::error::AppResult;
use crate::middleware::auth::ReadAccess;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Optional reporting window, echoed back after canonicalization.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

// ---------------------------------------------------------------------------
// Site listing
// ---------------------------------------------------------------------------

/// GET /api/v1/sites
///
/// One payload per site with a persisted override.
pub async fn list_sites(
    _access: ReadAccess,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let payloads = state.aggregator.list_site_payloads();

    Ok(Json(DataResponse { data: payloads }))
}

// ---------------------------------------------------------------------------
// Per-site uptime
// ---------------------------------------------------------------------------

/// GET /api/v1/sites/{id}/uptime
///
/// The cached uptime snapshot. A site with no data reads as `unknown` for
/// up to the cache TTL.
pub async fn site_uptime(
    _access: ReadAccess,
    State(state): State<AppState>,
    Path(site_id): Path<SiteId>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.cache.get_uptime(site_id);

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// Per-site search-analytics KPIs
// ---------------------------------------------------------------------------

/// KPI fields (absent entirely on a cache miss) plus the echoed window.
#[derive(Debug, Serialize)]
pub struct SiteKpisData {
    #[serde(flatten)]
    pub kpis: Option<KpiSnapshot>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/v1/sites/{id}/search-analytics
///
/// Cached KPIs for one site. The optional `start`/`end` parameters are
/// canonicalized to `YYYY-MM-DD` and echoed back; they do not select a
/// cache window (the external population job owns the window).
pub async fn site_kpis(
    _access: ReadAccess,
    State(state): State<AppState>,
    Path(site_id): Path<SiteId>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<impl IntoResponse> {
    let start = range.start.as_deref().map(canonicalize_date);
    let end = range.end.as_deref().map(canonicalize_date);

    let kpis = state.cache.get_kpis(site_id);

    Ok(Json(DataResponse {
        data: SiteKpisData { kpis, start, end },
    }))
}

// ---------------------------------------------------------------------------
// Fleet rollup
// ---------------------------------------------------------------------------

/// GET /api/v1/rollups/kpis
///
/// Fleet-wide KPI totals and averages across every known site. The date
/// parameters are accepted for interface parity but the rollup always
/// reflects the currently cached window.
pub async fn rollup_kpis(
    _access: ReadAccess,
    State(state): State<AppState>,
    Query(_range): Query<DateRangeQuery>,
) -> AppResult<impl IntoResponse> {
    let rollup = state.aggregator.compute_rollup();

    tracing::debug!(site_count = rollup.site_count, "Computed fleet rollup");

    Ok(Json(DataResponse { data: rollup }))
}
