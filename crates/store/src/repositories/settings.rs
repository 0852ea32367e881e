//! The settings store: cached reads with default-merge and token repair.

use std::sync::{Arc, RwLock};

use siteops_core::token;

use crate::backend::{KvBackend, StoreError};
use crate::models::settings::Settings;

/// Backend key the settings record lives under.
pub const SETTINGS_KEY: &str = "siteops_settings";

/// Process-wide settings access with a request-scoped memoization layer.
///
/// Reads are served from the in-memory copy when present; a save
/// invalidates it so concurrent readers observe either the old or the new
/// record, never a partial one.
pub struct SettingsStore {
    backend: Arc<dyn KvBackend>,
    cache: RwLock<Option<Settings>>,
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            cache: RwLock::new(None),
        }
    }

    /// Current settings, with missing sections merged against defaults.
    ///
    /// If the connector token is empty after the merge, a fresh 32-char
    /// token is generated and the repaired record persisted before
    /// returning, so callers never observe an empty token.
    pub fn get(&self) -> Settings {
        if let Some(cached) = self.cache.read().expect("settings cache lock poisoned").as_ref() {
            return cached.clone();
        }

        let mut guard = self.cache.write().expect("settings cache lock poisoned");

        // Another request may have populated the cache while we waited for
        // the write lock; the token must only be generated once.
        if let Some(cached) = guard.as_ref() {
            return cached.clone();
        }

        let stored = self.backend.load(SETTINGS_KEY).unwrap_or_default();
        let mut settings = Settings::from_value(stored);

        if settings.connector.api_token.is_empty() {
            settings.connector.api_token = token::generate_token();
            tracing::info!("Generated missing connector token");

            if let Err(error) = self.persist(&settings) {
                tracing::warn!(%error, "Failed to persist repaired settings");
            }
        }

        *guard = Some(settings.clone());
        settings
    }

    /// Persist `updated` in full and drop the cached copy.
    ///
    /// When `regenerate` is set, a freshly generated connector token always
    /// wins over whatever token `updated` carries.
    pub fn save(&self, mut updated: Settings, regenerate: bool) -> Result<(), StoreError> {
        if regenerate {
            updated.connector.api_token = token::generate_token();
            tracing::info!("Regenerated connector token");
        }

        let mut guard = self.cache.write().expect("settings cache lock poisoned");
        *guard = None;
        self.persist(&updated)
    }

    /// Drop the cached copy; the next read reloads from the backend.
    pub fn invalidate(&self) {
        *self.cache.write().expect("settings cache lock poisoned") = None;
    }

    fn persist(&self, settings: &Settings) -> Result<(), StoreError> {
        let value = serde_json::to_value(settings)?;
        self.backend.store(SETTINGS_KEY, value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
