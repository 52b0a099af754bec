use std::time::Instant;

use reqwest::Client;
use reqwest::header::{HeaderValue, USER_AGENT};
use serde::Serialize;
use strum::{AsRefStr, IntoStaticStr};
use tracing::{info, warn};
use url::Url;

use crate::models::config::RegistryConfig;
use crate::models::source::LookupMode;
use crate::traits::fetcher::FetchError;

/// Доступность сайта реестра
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Online,
    Offline,
}

/// Фоновая проверка доступности сайта: один GET корня с длинным таймаутом
pub struct SiteProbe {
    client: Client,
    url: Url,
}

impl SiteProbe {
    pub fn new(registry: &RegistryConfig) -> Result<Self, FetchError> {
        let listing = Url::parse(&registry.base_url).map_err(|e| FetchError::Client {
            message: format!("invalid registry base_url {}: {}", registry.base_url, e),
        })?;
        let url = listing.join("/").map_err(|e| FetchError::Client {
            message: e.to_string(),
        })?;
        let user_agent = HeaderValue::from_str(&registry.user_agent).map_err(|e| FetchError::Client {
            message: e.to_string(),
        })?;
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        let client = Client::builder()
            .timeout(registry.timeout_for(LookupMode::Background))
            .default_headers(headers)
            .build()?;
        Ok(Self { client, url })
    }

    pub async fn check(&self) -> SiteStatus {
        let started = Instant::now();
        match self.client.get(self.url.clone()).send().await {
            Ok(response) if response.status().as_u16() < 400 => {
                info!(url = %self.url, status = %response.status(), elapsed_ms = started.elapsed().as_millis() as u64, "probe: site online");
                SiteStatus::Online
            }
            Ok(response) => {
                warn!(url = %self.url, status = %response.status(), "probe: site answered with error status");
                SiteStatus::Offline
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, timed_out = e.is_timeout(), "probe: site unreachable");
                SiteStatus::Offline
            }
        }
    }
}
