//! Global settings record and its defaulting rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Monitoring mode
// ---------------------------------------------------------------------------

/// Integration mode for the uptime monitoring provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonitoringMode {
    #[default]
    StatusPage,
    Badges,
    Metrics,
}

impl MonitoringMode {
    /// The wire/form spelling of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            MonitoringMode::StatusPage => "status-page",
            MonitoringMode::Badges => "badges",
            MonitoringMode::Metrics => "metrics",
        }
    }

    /// Parse a form value, normalizing anything unrecognized to the
    /// default rather than rejecting the submission.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "badges" => MonitoringMode::Badges,
            "metrics" => MonitoringMode::Metrics,
            _ => MonitoringMode::StatusPage,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings sections
// ---------------------------------------------------------------------------

/// Uptime-monitoring provider connection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSettings {
    pub base_url: String,
    pub mode: MonitoringMode,
    pub api_key: String,
}

/// Search-analytics provider OAuth client settings.
///
/// `connected` is flipped by the (out-of-scope) OAuth flow; the settings
/// form never posts it, so saves carry the current value through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub client_id: String,
    pub client_secret: String,
    pub connected: bool,
}

/// Shared secret for non-interactive read access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorSettings {
    pub api_token: String,
}

/// Fleet-wide fallbacks applied when a site has no override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDefaults {
    pub report_url: String,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The process-wide settings record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub monitoring: MonitoringSettings,
    pub analytics: AnalyticsSettings,
    pub connector: ConnectorSettings,
    pub defaults: ReportDefaults,
}

impl Settings {
    /// Rebuild a settings record from persisted JSON.
    ///
    /// The merge is shallow per top-level section: a stored section is
    /// taken as a whole, a missing or unreadable one falls back to the
    /// hard-coded default. Non-object input degrades to full defaults.
    pub fn from_value(stored: Value) -> Self {
        let Value::Object(mut sections) = stored else {
            return Self::default();
        };

        Self {
            monitoring: take_section(&mut sections, "monitoring"),
            analytics: take_section(&mut sections, "analytics"),
            connector: take_section(&mut sections, "connector"),
            defaults: take_section(&mut sections, "defaults"),
        }
    }
}

/// Pull one section out of the stored object, defaulting when absent or
/// unreadable.
fn take_section<T: Default + for<'de> Deserialize<'de>>(
    sections: &mut serde_json::Map<String, Value>,
    key: &str,
) -> T {
    sections
        .remove(key)
        .and_then(|raw| serde_json::from_value(raw).ok())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
