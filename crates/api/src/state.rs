use std::sync::Arc;

use siteops_store::backend::KvBackend;
use siteops_store::cache::SnapshotCache;
use siteops_store::directory::SiteDirectory;
use siteops_store::repositories::{SettingsStore, SiteMetaStore};
use siteops_store::rollup::Aggregator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Global settings store.
    pub settings: Arc<SettingsStore>,
    /// Per-site override store.
    pub site_meta: Arc<SiteMetaStore>,
    /// TTL snapshot cache.
    pub cache: Arc<SnapshotCache>,
    /// Multi-site views over the stores above.
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    /// Wire the full store stack over one persistence backend and site
    /// directory. Used by the binary and the integration-test harness.
    pub fn new(
        config: ServerConfig,
        backend: Arc<dyn KvBackend>,
        directory: Arc<dyn SiteDirectory>,
    ) -> Self {
        let settings = Arc::new(SettingsStore::new(backend.clone()));
        let site_meta = Arc::new(SiteMetaStore::new(backend, settings.clone()));
        let cache = Arc::new(SnapshotCache::new());
        let aggregator = Arc::new(Aggregator::new(
            settings.clone(),
            site_meta.clone(),
            cache.clone(),
            directory,
        ));

        Self {
            config: Arc::new(config),
            settings,
            site_meta,
            cache,
            aggregator,
        }
    }
}
