/// Managed sites are identified by a positive integer id assigned by the
/// site directory.
pub type SiteId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
