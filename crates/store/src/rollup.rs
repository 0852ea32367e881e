//! Fleet aggregation: the flat site listing and the KPI rollup.

use std::sync::Arc;

use crate::cache::SnapshotCache;
use crate::directory::SiteDirectory;
use crate::models::site::SitePayload;
use crate::models::snapshot::RollupResult;
use crate::repositories::{SettingsStore, SiteMetaStore};

/// Reads the metadata store and the snapshot cache across every known site
/// and combines them into multi-site views.
pub struct Aggregator {
    settings: Arc<SettingsStore>,
    meta: Arc<SiteMetaStore>,
    cache: Arc<SnapshotCache>,
    directory: Arc<dyn SiteDirectory>,
}

impl Aggregator {
    pub fn new(
        settings: Arc<SettingsStore>,
        meta: Arc<SiteMetaStore>,
        cache: Arc<SnapshotCache>,
        directory: Arc<dyn SiteDirectory>,
    ) -> Self {
        Self {
            settings,
            meta,
            cache,
            directory,
        }
    }

    /// One payload per persisted override, joined with directory details
    /// and the current report-URL default.
    ///
    /// Sites without a persisted override do not appear here; the
    /// single-site fallback of the metadata store deliberately does not
    /// apply to listings.
    pub fn list_site_payloads(&self) -> Vec<SitePayload> {
        let default_report_url = self.settings.get().defaults.report_url;

        self.meta
            .get_all()
            .into_iter()
            .map(|(site_id, record)| {
                let info = self.directory.lookup(site_id);

                SitePayload {
                    id: site_id,
                    name: info.name,
                    domain: info.domain,
                    report_url: record.report_url,
                    analytics_property: record.analytics_property,
                    monitoring: record.monitoring,
                    default_report_url: default_report_url.clone(),
                }
            })
            .collect()
    }

    /// Fleet-wide KPI totals and averages over the same site set as
    /// [`list_site_payloads`](Self::list_site_payloads).
    ///
    /// Clicks and impressions sum whatever snapshots are present. The CTR
    /// average divides by the total site count, so sites with no KPI data
    /// dilute it toward zero; the position average divides only by the
    /// count of sites that had data. The asymmetry is inherited behaviour
    /// and kept as-is. Zero denominators yield zeroes.
    pub fn compute_rollup(&self) -> RollupResult {
        let sites = self.meta.get_all();
        let site_count = sites.len() as i64;

        let mut clicks = 0.0;
        let mut impressions = 0.0;
        let mut ctr_sum = 0.0;
        let mut position_sum = 0.0;
        let mut with_position: i64 = 0;

        for site_id in sites.keys() {
            let Some(kpis) = self.cache.get_kpis(*site_id) else {
                continue;
            };

            clicks += kpis.clicks;
            impressions += kpis.impressions;
            ctr_sum += kpis.ctr;
            position_sum += kpis.position;
            with_position += 1;
        }

        let ctr = if site_count > 0 {
            ctr_sum / site_count as f64
        } else {
            0.0
        };

        let position = if with_position > 0 {
            position_sum / with_position as f64
        } else {
            0.0
        };

        RollupResult {
            clicks,
            impressions,
            ctr,
            position,
            site_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::directory::{DirectoryInfo, StaticDirectory};
    use crate::models::site::SiteOverrideDraft;
    use crate::models::snapshot::KpiSnapshot;
    use std::time::Duration;

    const KPI_TTL: Duration = Duration::from_secs(60);

    struct Fixture {
        settings: Arc<SettingsStore>,
        meta: Arc<SiteMetaStore>,
        cache: Arc<SnapshotCache>,
        aggregator: Aggregator,
    }

    fn fixture(directory: StaticDirectory) -> Fixture {
        let backend = Arc::new(MemoryBackend::new());
        let settings = Arc::new(SettingsStore::new(backend.clone()));
        let meta = Arc::new(SiteMetaStore::new(backend, settings.clone()));
        let cache = Arc::new(SnapshotCache::new());

        let aggregator = Aggregator::new(
            settings.clone(),
            meta.clone(),
            cache.clone(),
            Arc::new(directory),
        );

        Fixture {
            settings,
            meta,
            cache,
            aggregator,
        }
    }

    fn save_site(fixture: &Fixture, site_id: i64) {
        fixture
            .meta
            .save(site_id, &SiteOverrideDraft::default())
            .unwrap();
    }

    fn kpis(clicks: f64, ctr: f64, position: f64) -> KpiSnapshot {
        KpiSnapshot {
            clicks,
            impressions: clicks * 20.0,
            ctr,
            position,
        }
    }

    // -- Listing -----------------------------------------------------------

    #[test]
    fn listing_is_empty_without_overrides() {
        let fixture = fixture(StaticDirectory::default());
        assert!(fixture.aggregator.list_site_payloads().is_empty());
    }

    #[test]
    fn listing_joins_directory_and_default_url() {
        let directory = StaticDirectory::new([(
            7,
            DirectoryInfo {
                name: "Example".to_string(),
                domain: "https://example.com".to_string(),
            },
        )]);
        let fixture = fixture(directory);

        let mut settings = fixture.settings.get();
        settings.defaults.report_url = "https://reports.example.com/default".to_string();
        fixture.settings.save(settings, false).unwrap();

        save_site(&fixture, 7);

        let payloads = fixture.aggregator.list_site_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].id, 7);
        assert_eq!(payloads[0].name, "Example");
        assert_eq!(payloads[0].domain, "https://example.com");
        assert_eq!(
            payloads[0].default_report_url,
            "https://reports.example.com/default"
        );
    }

    #[test]
    fn listing_degrades_to_empty_directory_details() {
        let fixture = fixture(StaticDirectory::default());
        save_site(&fixture, 7);

        let payloads = fixture.aggregator.list_site_payloads();
        assert_eq!(payloads[0].name, "");
        assert_eq!(payloads[0].domain, "");
    }

    // -- Rollup ------------------------------------------------------------

    #[test]
    fn rollup_over_zero_sites_is_all_zeroes() {
        let fixture = fixture(StaticDirectory::default());

        let rollup = fixture.aggregator.compute_rollup();
        assert_eq!(
            rollup,
            RollupResult {
                clicks: 0.0,
                impressions: 0.0,
                ctr: 0.0,
                position: 0.0,
                site_count: 0,
            }
        );
    }

    #[test]
    fn missing_kpis_dilute_ctr_but_not_position() {
        let fixture = fixture(StaticDirectory::default());
        save_site(&fixture, 1);
        save_site(&fixture, 2);

        // S1 has data, S2 has none.
        fixture.cache.put_kpis(1, kpis(120.0, 0.5, 10.0), KPI_TTL);

        let rollup = fixture.aggregator.compute_rollup();
        assert_eq!(rollup.site_count, 2);
        assert_eq!(rollup.clicks, 120.0);
        assert_eq!(rollup.impressions, 2400.0);
        assert_eq!(rollup.ctr, 0.25, "ctr averages over all sites");
        assert_eq!(rollup.position, 10.0, "position averages over present sites only");
    }

    #[test]
    fn rollup_sums_across_present_sites() {
        let fixture = fixture(StaticDirectory::default());
        save_site(&fixture, 1);
        save_site(&fixture, 2);
        save_site(&fixture, 3);

        fixture.cache.put_kpis(1, kpis(100.0, 0.04, 12.0), KPI_TTL);
        fixture.cache.put_kpis(2, kpis(50.0, 0.02, 6.0), KPI_TTL);

        let rollup = fixture.aggregator.compute_rollup();
        assert_eq!(rollup.site_count, 3);
        assert_eq!(rollup.clicks, 150.0);
        assert_eq!(rollup.impressions, 3000.0);
        assert!((rollup.ctr - 0.02).abs() < 1e-12);
        assert_eq!(rollup.position, 9.0);
    }

    #[test]
    fn rollup_with_sites_but_no_data_keeps_zero_averages() {
        let fixture = fixture(StaticDirectory::default());
        save_site(&fixture, 1);
        save_site(&fixture, 2);

        let rollup = fixture.aggregator.compute_rollup();
        assert_eq!(rollup.site_count, 2);
        assert_eq!(rollup.ctr, 0.0);
        assert_eq!(rollup.position, 0.0, "no division by the empty position set");
    }
}
