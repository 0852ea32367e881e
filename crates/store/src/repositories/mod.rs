pub mod settings;
pub mod site_meta;

pub use settings::SettingsStore;
pub use site_meta::{SaveOutcome, SiteMetaStore};
