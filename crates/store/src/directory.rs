//! The site-directory seam.
//!
//! The registry that knows site names and domains is an external
//! collaborator; this trait is its interface boundary. Lookups degrade to
//! empty strings when the directory has no entry for a site.

use std::collections::HashMap;

use serde::Serialize;
use siteops_core::types::SiteId;

/// Name and domain for one site, as the directory knows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryInfo {
    pub name: String,
    pub domain: String,
}

/// Lookup into the external site registry.
pub trait SiteDirectory: Send + Sync {
    /// Directory details for `site_id`; empty strings when unknown.
    fn lookup(&self, site_id: SiteId) -> DirectoryInfo;
}

/// Fixed in-memory directory, for tests and standalone deployments.
#[derive(Default)]
pub struct StaticDirectory {
    entries: HashMap<SiteId, DirectoryInfo>,
}

impl StaticDirectory {
    pub fn new(entries: impl IntoIterator<Item = (SiteId, DirectoryInfo)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl SiteDirectory for StaticDirectory {
    fn lookup(&self, site_id: SiteId) -> DirectoryInfo {
        self.entries.get(&site_id).cloned().unwrap_or_default()
    }
}

/// Directory used when no registry is wired up; every lookup degrades to
/// empty strings.
pub struct EmptyDirectory;

impl SiteDirectory for EmptyDirectory {
    fn lookup(&self, _site_id: SiteId) -> DirectoryInfo {
        DirectoryInfo::default()
    }
}
