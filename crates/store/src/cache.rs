//! TTL-keyed snapshot cache for uptime and search-analytics data.
//!
//! Population is an external job's responsibility; this cache only serves
//! what was put into it, with lazy expiry checked on read. No background
//! eviction runs: an expired entry simply behaves as a miss until the next
//! write lands on its slot.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use siteops_core::types::SiteId;

use crate::models::snapshot::{KpiSnapshot, UptimeSnapshot};

/// Fixed window an uptime entry (including the miss placeholder) lives for.
pub const UPTIME_TTL: Duration = Duration::from_secs(10 * 60);

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Entry<T> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-process snapshot cache, safe for concurrent reads and lazy
/// population. Two requests racing on the same miss both write the same
/// placeholder; last write wins and nothing is lost.
pub struct SnapshotCache {
    uptime: RwLock<HashMap<SiteId, Entry<UptimeSnapshot>>>,
    kpis: RwLock<HashMap<SiteId, Entry<KpiSnapshot>>>,
    uptime_ttl: Duration,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::with_uptime_ttl(UPTIME_TTL)
    }

    /// Build a cache with a custom uptime TTL. Production uses
    /// [`UPTIME_TTL`]; tests shrink the window to observe expiry.
    pub fn with_uptime_ttl(uptime_ttl: Duration) -> Self {
        Self {
            uptime: RwLock::new(HashMap::new()),
            kpis: RwLock::new(HashMap::new()),
            uptime_ttl,
        }
    }

    /// The cached uptime snapshot for `site_id`.
    ///
    /// A miss durably caches and returns the unknown placeholder for the
    /// full TTL window: a site with no data reads as unknown for up to
    /// that long even if real data arrives moments later. Callers must
    /// tolerate the staleness.
    pub fn get_uptime(&self, site_id: SiteId) -> UptimeSnapshot {
        let now = Instant::now();

        if let Some(entry) = self.uptime.read().expect("uptime cache lock poisoned").get(&site_id)
        {
            if entry.is_live(now) {
                return entry.value.clone();
            }
        }

        let placeholder = UptimeSnapshot::placeholder();
        self.uptime.write().expect("uptime cache lock poisoned").insert(
            site_id,
            Entry {
                value: placeholder.clone(),
                expires_at: now + self.uptime_ttl,
            },
        );

        placeholder
    }

    /// Store an uptime snapshot for the fixed TTL window.
    pub fn put_uptime(&self, site_id: SiteId, snapshot: UptimeSnapshot) {
        self.uptime.write().expect("uptime cache lock poisoned").insert(
            site_id,
            Entry {
                value: snapshot,
                expires_at: Instant::now() + self.uptime_ttl,
            },
        );
    }

    /// The cached KPI snapshot, or `None` on a miss.
    ///
    /// Unlike uptime, a KPI miss is not cached: population is a longer,
    /// less frequent external job, and a placeholder would mask fresh
    /// data arriving between runs.
    pub fn get_kpis(&self, site_id: SiteId) -> Option<KpiSnapshot> {
        let now = Instant::now();

        self.kpis
            .read()
            .expect("kpi cache lock poisoned")
            .get(&site_id)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value)
    }

    /// Store a KPI snapshot for the caller-chosen window.
    pub fn put_kpis(&self, site_id: SiteId, snapshot: KpiSnapshot, ttl: Duration) {
        self.kpis.write().expect("kpi cache lock poisoned").insert(
            site_id,
            Entry {
                value: snapshot,
                expires_at: Instant::now() + ttl,
            },
        );
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
