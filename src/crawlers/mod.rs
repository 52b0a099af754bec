pub mod registry_fetcher;
pub mod site_probe;

pub use registry_fetcher::HttpRegistryFetcher;
pub use site_probe::{SiteProbe, SiteStatus};
