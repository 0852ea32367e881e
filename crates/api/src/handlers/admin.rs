//! Operator handlers: the settings and site-metadata admin surface.
//!
//! GETs hand the admin client the current records plus the anti-forgery
//! nonce for the matching save action. Saves follow the admin-form
//! contract: any failure (missing admin session, bad nonce, unusable site
//! id) is a silent no-op redirect back to the admin page, never a
//! structured error; success redirects with an `updated=1` flag.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use serde::{Deserialize, Serialize};
use siteops_core::nonce::{issue_nonce, verify_nonce};
use siteops_core::percent::format_percent;
use siteops_core::types::SiteId;
use siteops_store::models::settings::{MonitoringMode, Settings};
use siteops_store::models::site::{SiteOverride, SiteOverrideDraft};
use siteops_store::models::snapshot::{KpiSnapshot, UptimeSnapshot};
use siteops_store::repositories::site_meta::SaveOutcome;

use crate::error::AppResult;
use crate::middleware::auth::{silent_operator, RequireOperator};
use crate::response::DataResponse;
use crate::state::AppState;

/// Nonce action for the global settings save.
pub const ACTION_SAVE_SETTINGS: &str = "save_settings";

/// Nonce action for a per-site metadata save.
pub const ACTION_SAVE_SITE_META: &str = "save_site_meta";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Response for the settings admin page.
#[derive(Debug, Serialize)]
pub struct AdminSettingsView {
    pub settings: Settings,
    /// Anti-forgery nonce for [`ACTION_SAVE_SETTINGS`].
    pub nonce: String,
}

/// GET /api/v1/admin/settings
pub async fn get_settings(
    RequireOperator(claims): RequireOperator,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let view = AdminSettingsView {
        settings: state.settings.get(),
        nonce: issue_nonce(&state.config.jwt.secret, ACTION_SAVE_SETTINGS, claims.sub),
    };

    Ok(Json(DataResponse { data: view }))
}

/// Settings form payload. Absent fields save as empty, matching the
/// forgiving-form contract; `connected` is not part of the form and the
/// current value carries through.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub nonce: String,
    pub monitoring_base_url: String,
    pub monitoring_mode: String,
    pub monitoring_api_key: String,
    pub analytics_client_id: String,
    pub analytics_client_secret: String,
    pub default_report_url: String,
    /// Explicit token value; an empty string never clears the stored token.
    pub connector_token: Option<String>,
    /// When set, a freshly generated token wins over `connector_token`.
    pub regenerate_token: bool,
}

/// POST /api/v1/admin/settings
pub async fn save_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<SettingsForm>,
) -> Redirect {
    let admin_page = state.config.admin_page.clone();

    let Some(operator) = silent_operator(&headers, &state) else {
        tracing::debug!("Dropping settings save without an admin session");
        return Redirect::to(&admin_page);
    };

    if !verify_nonce(
        &state.config.jwt.secret,
        ACTION_SAVE_SETTINGS,
        operator.sub,
        &form.nonce,
    ) {
        tracing::debug!(user_id = operator.sub, "Dropping settings save with a bad nonce");
        return Redirect::to(&admin_page);
    }

    let mut settings = state.settings.get();
    settings.monitoring.base_url = form.monitoring_base_url;
    settings.monitoring.mode = MonitoringMode::parse_or_default(&form.monitoring_mode);
    settings.monitoring.api_key = form.monitoring_api_key;
    settings.analytics.client_id = form.analytics_client_id;
    settings.analytics.client_secret = form.analytics_client_secret;
    settings.defaults.report_url = form.default_report_url;

    if let Some(token) = form.connector_token {
        if !token.is_empty() {
            settings.connector.api_token = token;
        }
    }

    match state.settings.save(settings, form.regenerate_token) {
        Ok(()) => {
            tracing::info!(user_id = operator.sub, "Settings saved");
            Redirect::to(&format!("{admin_page}?updated=1"))
        }
        Err(error) => {
            tracing::error!(%error, "Failed to persist settings");
            Redirect::to(&admin_page)
        }
    }
}

// ---------------------------------------------------------------------------
// Site metadata
// ---------------------------------------------------------------------------

/// Response for one site's admin meta box: the override (with fallback
/// applied), current snapshots, and display strings built with the shared
/// percentage rule.
#[derive(Debug, Serialize)]
pub struct SiteMetaView {
    pub site_id: SiteId,
    pub meta: SiteOverride,
    pub uptime: UptimeSnapshot,
    pub uptime_24h_display: Option<String>,
    pub uptime_7d_display: Option<String>,
    pub kpis: Option<KpiSnapshot>,
    pub ctr_display: Option<String>,
    pub default_report_url: String,
    /// Anti-forgery nonce for [`ACTION_SAVE_SITE_META`].
    pub nonce: String,
}

/// GET /api/v1/admin/sites/{id}/metadata
pub async fn site_metadata(
    RequireOperator(claims): RequireOperator,
    State(state): State<AppState>,
    Path(site_id): Path<SiteId>,
) -> AppResult<impl IntoResponse> {
    let meta = state.site_meta.get_with_default(site_id);
    let uptime = state.cache.get_uptime(site_id);
    let kpis = state.cache.get_kpis(site_id);

    let view = SiteMetaView {
        site_id,
        meta,
        uptime_24h_display: uptime.uptime_24h.map(format_percent),
        uptime_7d_display: uptime.uptime_7d.map(format_percent),
        uptime,
        ctr_display: kpis.map(|k| format_percent(k.ctr)),
        kpis,
        default_report_url: state.settings.get().defaults.report_url,
        nonce: issue_nonce(&state.config.jwt.secret, ACTION_SAVE_SITE_META, claims.sub),
    };

    Ok(Json(DataResponse { data: view }))
}

/// Site metadata form payload: the nonce plus the override draft.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteMetaForm {
    pub nonce: String,
    #[serde(flatten)]
    pub draft: SiteOverrideDraft,
}

/// POST /api/v1/admin/sites/{id}/metadata
pub async fn save_site_meta(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(site_id): Path<SiteId>,
    Json(form): Json<SiteMetaForm>,
) -> Redirect {
    let admin_page = state.config.admin_page.clone();

    let Some(operator) = silent_operator(&headers, &state) else {
        tracing::debug!(site_id, "Dropping site metadata save without an admin session");
        return Redirect::to(&admin_page);
    };

    if !verify_nonce(
        &state.config.jwt.secret,
        ACTION_SAVE_SITE_META,
        operator.sub,
        &form.nonce,
    ) {
        tracing::debug!(
            site_id,
            user_id = operator.sub,
            "Dropping site metadata save with a bad nonce"
        );
        return Redirect::to(&admin_page);
    }

    match state.site_meta.save(site_id, &form.draft) {
        Ok(SaveOutcome::Saved) => {
            tracing::info!(site_id, user_id = operator.sub, "Site metadata saved");
            Redirect::to(&format!("{admin_page}?updated=1"))
        }
        Ok(SaveOutcome::Ignored) => {
            tracing::debug!(site_id, "Site metadata save ignored");
            Redirect::to(&admin_page)
        }
        Err(error) => {
            tracing::error!(site_id, %error, "Failed to persist site metadata");
            Redirect::to(&admin_page)
        }
    }
}
