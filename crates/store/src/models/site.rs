//! Per-site override records and the listing payload built from them.

use serde::{Deserialize, Serialize};
use siteops_core::types::SiteId;

/// Monitoring mapping for one site.
///
/// `mode` is a free string where empty means "inherit the global mode";
/// `monitor_ids_raw` keeps the operator's comma-separated input verbatim so
/// the edit form round-trips losslessly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorMapping {
    pub mode: String,
    pub status_page_slug: String,
    pub monitor_ids: Vec<String>,
    pub monitor_ids_raw: String,
}

/// Stored override for one site. Sparse: absent records are legal and fall
/// back to global defaults on single-site reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOverride {
    pub report_url: String,
    pub analytics_property: String,
    pub monitoring: MonitorMapping,
}

/// Incoming form payload for saving one site's override.
///
/// Every field is optional on the wire; absent fields save as empty, the
/// forgiving-form contract of the admin surface.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteOverrideDraft {
    pub report_url: String,
    pub analytics_property: String,
    pub mode: String,
    pub status_page_slug: String,
    /// Raw comma-separated monitor ids; the derived list is computed on
    /// save.
    pub monitor_ids: String,
}

/// One row of the fleet listing: the stored override joined with directory
/// details and the current report-URL default.
#[derive(Debug, Clone, Serialize)]
pub struct SitePayload {
    pub id: SiteId,
    pub name: String,
    pub domain: String,
    pub report_url: String,
    pub analytics_property: String,
    pub monitoring: MonitorMapping,
    pub default_report_url: String,
}
