//! Cached external-data records and the fleet rollup computed from them.

use serde::{Deserialize, Serialize};
use siteops_core::types::Timestamp;

/// Monitor status values the providers commonly report. The field stays a
/// free string: providers may report richer states (maintenance, paused)
/// and the cache passes them through untouched.
pub const STATUS_UP: &str = "up";
pub const STATUS_DOWN: &str = "down";
pub const STATUS_UNKNOWN: &str = "unknown";

/// Uptime snapshot for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeSnapshot {
    pub status: String,
    pub uptime_24h: Option<f64>,
    pub uptime_7d: Option<f64>,
    pub ping_ms: Option<f64>,
    pub last_change: Option<Timestamp>,
}

impl UptimeSnapshot {
    /// The record an uninstrumented or not-yet-polled site reads as:
    /// status unknown, no figures. Distinct from "all metrics are zero".
    pub fn placeholder() -> Self {
        Self {
            status: STATUS_UNKNOWN.to_string(),
            uptime_24h: None,
            uptime_7d: None,
            ping_ms: None,
            last_change: None,
        }
    }
}

/// Search-analytics KPI snapshot for one site. A cache miss is `None`, not
/// a zero-valued record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub position: f64,
}

/// Fleet-wide KPI rollup. Computed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollupResult {
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub position: f64,
    pub site_count: i64,
}
