use std::time::Duration;

use async_trait::async_trait;
use bon::bon;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, COOKIE, HeaderMap, HeaderValue, ORIGIN, REFERER,
    SET_COOKIE, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::models::config::{FormMethod, RegistryConfig};
use crate::models::source::LookupMode;
use crate::models::types::{Inn, RawPage};
use crate::traits::fetcher::{FetchError, SearchPageFetcher};

/// Получает страницу реестра с фильтром по ИНН прямым HTTP-запросом
pub struct HttpRegistryFetcher {
    client: Client,
    listing_url: Url,
    origin: String,
    registry: RegistryConfig,
    timeout: Duration,
}

#[bon]
impl HttpRegistryFetcher {
    #[builder]
    pub fn new(
        registry: RegistryConfig,
        #[builder(default)] mode: LookupMode,
    ) -> Result<Self, FetchError> {
        let timeout = registry.timeout_for(mode);
        let listing_url = Url::parse(&registry.base_url).map_err(|e| FetchError::Client {
            message: format!("invalid registry base_url {}: {}", registry.base_url, e),
        })?;
        let origin = listing_url.origin().ascii_serialization();
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(browser_headers(&registry)?)
            .build()?;
        info!(url = %listing_url, timeout_secs = timeout.as_secs(), %mode, "registry: fetcher ready");
        Ok(Self {
            client,
            listing_url,
            origin,
            registry,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Загружает страницу без фильтра ради сессионной cookie. Ошибки не фатальны.
    async fn prime_session(&self) -> Option<String> {
        match self.client.get(self.listing_url.clone()).send().await {
            Ok(response) => {
                if !response.status().is_success() {
                    warn!(status = %response.status(), "registry: session page returned non-success status");
                }
                let cookie = collect_session_cookie(response.headers());
                info!(has_cookie = cookie.is_some(), "registry: session page loaded");
                cookie
            }
            Err(e) => {
                warn!(error = %e, "registry: session priming failed, continuing without cookie");
                None
            }
        }
    }

    async fn fetch_filtered(&self, inn: &Inn) -> Result<RawPage, FetchError> {
        let cookie = if self.registry.forward_session_cookie {
            let cookie = self.prime_session().await;
            if self.registry.politeness_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.registry.politeness_delay_ms)).await;
            }
            cookie
        } else {
            None
        };

        let params = [
            (self.registry.name_param.as_str(), ""),
            (self.registry.inn_param.as_str(), inn.as_str()),
            (self.registry.submit_param.as_str(), self.registry.submit_value.as_str()),
        ];
        let mut request = match self.registry.method {
            FormMethod::Get => self.client.get(self.listing_url.clone()).query(&params),
            FormMethod::Post => self
                .client
                .post(self.listing_url.clone())
                .form(&params)
                .header(ORIGIN, self.origin.as_str())
                .header(REFERER, self.listing_url.as_str()),
        };
        if let Some(c) = cookie.as_deref() {
            request = request.header(COOKIE, c);
        }

        let method: &str = self.registry.method.as_ref();
        info!(%inn, method, "registry: search request");
        let response = request.send().await?;
        let status = response.status();
        info!(%inn, status = %status, "registry: search response status");
        if !status.is_success() {
            return Err(FetchError::Status {
                status_code: status.as_u16(),
            });
        }
        let html = response.text().await?;
        info!(%inn, html_len = html.len(), "registry: search response body");
        Ok(RawPage {
            status: status.as_u16(),
            html,
            cookie,
        })
    }
}

#[async_trait]
impl SearchPageFetcher for HttpRegistryFetcher {
    async fn fetch_search_page(&self, inn: &Inn) -> Result<RawPage, FetchError> {
        // Общий предел на оба запроса (сессия + поиск)
        match tokio::time::timeout(self.timeout, self.fetch_filtered(inn)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::TimedOut),
        }
    }
}

fn browser_headers(registry: &RegistryConfig) -> Result<HeaderMap, FetchError> {
    let value = |v: &str| {
        HeaderValue::from_str(v).map_err(|e| FetchError::Client {
            message: format!("invalid header value {:?}: {}", v, e),
        })
    };
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, value(&registry.user_agent)?);
    headers.insert(ACCEPT, value(&registry.accept)?);
    headers.insert(ACCEPT_LANGUAGE, value(&registry.accept_language)?);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    Ok(headers)
}

/// Склеивает пары name=value из всех Set-Cookie в значение заголовка Cookie
pub(crate) fn collect_session_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect();
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
