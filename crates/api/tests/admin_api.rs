//! HTTP-level integration tests for the operator-only admin surface.
//!
//! Covers the operator GETs (settings, site meta box) and the silent
//! redirect contract of the write actions.

mod common;

use axum::http::StatusCode;
use common::{
    admin_session, assert_redirect, body_json, get_auth, post_json, post_json_auth,
    viewer_session, TEST_JWT_SECRET,
};
use serde_json::json;
use siteops_core::nonce::issue_nonce;

/// Nonce for the admin user (id 1) and the given action, matching what the
/// operator GET endpoints hand out.
fn admin_nonce(action: &str) -> String {
    issue_nonce(TEST_JWT_SECRET, action, 1)
}

// ---------------------------------------------------------------------------
// Operator GETs
// ---------------------------------------------------------------------------

/// The settings page data requires a session.
#[tokio::test]
async fn get_settings_without_session_is_denied() {
    let (app, _state) = common::build_test_app();

    let response = common::get(app, "/api/v1/admin/settings").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Viewers are rejected with 403: authenticated but not admins.
#[tokio::test]
async fn get_settings_as_viewer_is_forbidden() {
    let (app, _state) = common::build_test_app();

    let response = get_auth(app, "/api/v1/admin/settings", &viewer_session()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Admins get the settings record (token repaired on first read) plus the
/// save nonce.
#[tokio::test]
async fn get_settings_returns_record_and_nonce() {
    let (app, _state) = common::build_test_app();

    let response = get_auth(app, "/api/v1/admin/settings", &admin_session()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let settings = &json["data"]["settings"];

    assert_eq!(settings["monitoring"]["mode"], "status-page");
    assert_eq!(
        settings["connector"]["api_token"].as_str().unwrap().len(),
        32,
        "first read must repair the empty token"
    );
    assert_eq!(json["data"]["nonce"], admin_nonce("save_settings"));
}

/// The site meta box joins the override (with fallback), snapshots, and
/// display strings under the shared percentage rule.
#[tokio::test]
async fn get_site_metadata_returns_meta_box_data() {
    let (app, state) = common::build_test_app();

    state.cache.put_kpis(
        7,
        siteops_store::models::snapshot::KpiSnapshot {
            clicks: 120.0,
            impressions: 4200.0,
            ctr: 0.031,
            position: 8.4,
        },
        std::time::Duration::from_secs(60),
    );

    let response = get_auth(app, "/api/v1/admin/sites/7/metadata", &admin_session()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["site_id"], 7);
    // No override stored: the synthesized default inherits the global mode.
    assert_eq!(data["meta"]["monitoring"]["mode"], "status-page");
    assert_eq!(data["uptime"]["status"], "unknown");
    assert!(data["uptime_24h_display"].is_null());
    assert_eq!(data["ctr_display"], "3.10%");
    assert_eq!(data["nonce"], admin_nonce("save_site_meta"));
}

// ---------------------------------------------------------------------------
// Settings save
// ---------------------------------------------------------------------------

/// Without an admin session the save is a silent no-op redirect.
#[tokio::test]
async fn save_settings_without_session_is_a_silent_noop() {
    let (app, state) = common::build_test_app();
    let before = state.settings.get();

    let response = post_json(
        app,
        "/api/v1/admin/settings",
        json!({ "nonce": admin_nonce("save_settings"), "default_report_url": "https://x" }),
    )
    .await;

    assert_redirect(&response, "/admin");
    assert_eq!(state.settings.get(), before, "nothing may be persisted");
}

/// A bad nonce drops the save the same way.
#[tokio::test]
async fn save_settings_with_bad_nonce_is_a_silent_noop() {
    let (app, state) = common::build_test_app();
    let before = state.settings.get();

    let response = post_json_auth(
        app,
        "/api/v1/admin/settings",
        &admin_session(),
        json!({ "nonce": "forged", "default_report_url": "https://x" }),
    )
    .await;

    assert_redirect(&response, "/admin");
    assert_eq!(state.settings.get(), before);
}

/// A proper session plus nonce saves and redirects with the updated flag.
#[tokio::test]
async fn save_settings_persists_and_redirects_with_flag() {
    let (app, state) = common::build_test_app();
    let token_before = state.settings.get().connector.api_token;

    let response = post_json_auth(
        app,
        "/api/v1/admin/settings",
        &admin_session(),
        json!({
            "nonce": admin_nonce("save_settings"),
            "monitoring_base_url": "https://status.example.com",
            "monitoring_mode": "metrics",
            "monitoring_api_key": "mk-123",
            "analytics_client_id": "client-1",
            "default_report_url": "https://reports.example.com/default",
        }),
    )
    .await;

    assert_redirect(&response, "/admin?updated=1");

    let saved = state.settings.get();
    assert_eq!(saved.monitoring.base_url, "https://status.example.com");
    assert_eq!(saved.monitoring.mode.as_str(), "metrics");
    assert_eq!(saved.analytics.client_id, "client-1");
    assert_eq!(
        saved.defaults.report_url,
        "https://reports.example.com/default"
    );
    assert_eq!(
        saved.connector.api_token, token_before,
        "an absent token field must not touch the stored token"
    );
}

/// An unknown mode value normalizes to the default instead of rejecting.
#[tokio::test]
async fn save_settings_normalizes_unknown_mode() {
    let (app, state) = common::build_test_app();

    let response = post_json_auth(
        app,
        "/api/v1/admin/settings",
        &admin_session(),
        json!({ "nonce": admin_nonce("save_settings"), "monitoring_mode": "carrier-pigeon" }),
    )
    .await;

    assert_redirect(&response, "/admin?updated=1");
    assert_eq!(state.settings.get().monitoring.mode.as_str(), "status-page");
}

/// Regeneration wins over a simultaneously supplied token value.
#[tokio::test]
async fn regenerate_wins_over_supplied_token() {
    let (app, state) = common::build_test_app();
    let token_before = state.settings.get().connector.api_token;

    let response = post_json_auth(
        app,
        "/api/v1/admin/settings",
        &admin_session(),
        json!({
            "nonce": admin_nonce("save_settings"),
            "connector_token": "operator-chosen-token",
            "regenerate_token": true,
        }),
    )
    .await;

    assert_redirect(&response, "/admin?updated=1");

    let token_after = state.settings.get().connector.api_token;
    assert_ne!(token_after, token_before);
    assert_ne!(token_after, "operator-chosen-token");
    assert_eq!(token_after.len(), 32);
}

/// An empty submitted token never clears the stored one.
#[tokio::test]
async fn empty_submitted_token_keeps_stored_token() {
    let (app, state) = common::build_test_app();
    let token_before = state.settings.get().connector.api_token;

    let response = post_json_auth(
        app,
        "/api/v1/admin/settings",
        &admin_session(),
        json!({ "nonce": admin_nonce("save_settings"), "connector_token": "" }),
    )
    .await;

    assert_redirect(&response, "/admin?updated=1");
    assert_eq!(state.settings.get().connector.api_token, token_before);
}

// ---------------------------------------------------------------------------
// Site metadata save
// ---------------------------------------------------------------------------

/// The full save path: fetch the nonce from the meta box, post the form,
/// observe the persisted override.
#[tokio::test]
async fn save_site_meta_persists_override() {
    let (app, state) = common::build_test_app();

    let meta_box = get_auth(
        app.clone(),
        "/api/v1/admin/sites/7/metadata",
        &admin_session(),
    )
    .await;
    let nonce = body_json(meta_box).await["data"]["nonce"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json_auth(
        app,
        "/api/v1/admin/sites/7/metadata",
        &admin_session(),
        json!({
            "nonce": nonce,
            "report_url": "https://reports.example.com/7",
            "analytics_property": "sc-domain:example.com",
            "mode": "badges",
            "monitor_ids": "a, b ,,c",
        }),
    )
    .await;

    assert_redirect(&response, "/admin?updated=1");

    let stored = state.site_meta.try_get(7).expect("override must persist");
    assert_eq!(stored.report_url, "https://reports.example.com/7");
    assert_eq!(stored.monitoring.mode, "badges");
    assert_eq!(stored.monitoring.monitor_ids, vec!["a", "b", "c"]);
    assert_eq!(stored.monitoring.monitor_ids_raw, "a, b ,,c");
}

/// A non-positive site id is ignored: redirect without the updated flag,
/// store untouched.
#[tokio::test]
async fn save_site_meta_with_non_positive_id_is_ignored() {
    let (app, state) = common::build_test_app();

    let response = post_json_auth(
        app,
        "/api/v1/admin/sites/0/metadata",
        &admin_session(),
        json!({ "nonce": admin_nonce("save_site_meta"), "report_url": "https://x" }),
    )
    .await;

    assert_redirect(&response, "/admin");
    assert!(state.site_meta.get_all().is_empty());
}

/// Write actions are session-gated even with a valid connector token: the
/// token authorizes reads only.
#[tokio::test]
async fn connector_token_cannot_write() {
    let (app, state) = common::build_test_app();
    let token = state.settings.get().connector.api_token;

    let response = post_json(
        app,
        &format!("/api/v1/admin/sites/7/metadata?token={token}"),
        json!({ "nonce": admin_nonce("save_site_meta"), "report_url": "https://x" }),
    )
    .await;

    assert_redirect(&response, "/admin");
    assert_eq!(state.site_meta.try_get(7), None);
}
