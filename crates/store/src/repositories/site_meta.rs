//! The per-site metadata store: sparse overrides with synthesized fallback.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use siteops_core::monitors::parse_monitor_ids;
use siteops_core::types::SiteId;

use crate::backend::{KvBackend, StoreError};
use crate::models::site::{MonitorMapping, SiteOverride, SiteOverrideDraft};
use crate::repositories::SettingsStore;

/// Backend key the override mapping lives under.
pub const SITE_META_KEY: &str = "siteops_site_meta";

/// Result of a save attempt. A non-positive site id is ignored, not an
/// error; callers that care can check the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Ignored,
}

/// Sparse per-site overrides keyed by site id.
///
/// Two distinct lookups: [`try_get`](Self::try_get) returns only persisted
/// records (the listing rule), while
/// [`get_with_default`](Self::get_with_default) synthesizes a transient
/// default from global settings. The synthesized record is never persisted.
pub struct SiteMetaStore {
    backend: Arc<dyn KvBackend>,
    settings: Arc<SettingsStore>,
}

impl SiteMetaStore {
    pub fn new(backend: Arc<dyn KvBackend>, settings: Arc<SettingsStore>) -> Self {
        Self { backend, settings }
    }

    /// The full sparse mapping in storage order.
    ///
    /// Corrupt backing data (non-object value, unparseable keys or
    /// records) degrades to an empty or partial mapping rather than
    /// failing.
    pub fn get_all(&self) -> IndexMap<SiteId, SiteOverride> {
        let Some(stored) = self.backend.load(SITE_META_KEY) else {
            return IndexMap::new();
        };

        let Value::Object(entries) = stored else {
            tracing::warn!("Site metadata backing value is not an object, treating as empty");
            return IndexMap::new();
        };

        let mut overrides = IndexMap::new();
        for (key, raw) in entries {
            let Ok(site_id) = key.parse::<SiteId>() else {
                continue;
            };
            let Ok(record) = serde_json::from_value::<SiteOverride>(raw) else {
                tracing::warn!(site_id, "Skipping unreadable site override");
                continue;
            };
            overrides.insert(site_id, record);
        }

        overrides
    }

    /// The persisted override for `site_id`, if any.
    pub fn try_get(&self, site_id: SiteId) -> Option<SiteOverride> {
        self.get_all().shift_remove(&site_id)
    }

    /// The persisted override, or a transient default when none exists.
    ///
    /// The default inherits the global report URL and monitoring mode;
    /// everything else is empty.
    pub fn get_with_default(&self, site_id: SiteId) -> SiteOverride {
        if let Some(stored) = self.try_get(site_id) {
            return stored;
        }

        let settings = self.settings.get();

        SiteOverride {
            report_url: settings.defaults.report_url,
            analytics_property: String::new(),
            monitoring: MonitorMapping {
                mode: settings.monitoring.mode.as_str().to_string(),
                ..MonitorMapping::default()
            },
        }
    }

    /// Replace `site_id`'s override wholesale with the submitted draft.
    ///
    /// A non-positive id is silently ignored. The monitor-ID list is
    /// derived from the raw comma-separated input; the raw string is kept
    /// verbatim for round-trip editing.
    pub fn save(
        &self,
        site_id: SiteId,
        draft: &SiteOverrideDraft,
    ) -> Result<SaveOutcome, StoreError> {
        if site_id <= 0 {
            tracing::debug!(site_id, "Ignoring site override save with non-positive id");
            return Ok(SaveOutcome::Ignored);
        }

        let record = SiteOverride {
            report_url: draft.report_url.clone(),
            analytics_property: draft.analytics_property.clone(),
            monitoring: MonitorMapping {
                mode: draft.mode.clone(),
                status_page_slug: draft.status_page_slug.clone(),
                monitor_ids: parse_monitor_ids(&draft.monitor_ids),
                monitor_ids_raw: draft.monitor_ids.clone(),
            },
        };

        let mut entries = match self.backend.load(SITE_META_KEY) {
            Some(Value::Object(entries)) => entries,
            _ => serde_json::Map::new(),
        };

        entries.insert(site_id.to_string(), serde_json::to_value(&record)?);
        self.backend.store(SITE_META_KEY, Value::Object(entries))?;

        Ok(SaveOutcome::Saved)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
