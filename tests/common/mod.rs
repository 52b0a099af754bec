#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ahash::AHashMap;
use async_trait::async_trait;
use reestr::models::config::RegistryConfig;
use reestr::models::types::{DatasetEntry, Inn, RawPage};
use reestr::services::datasets::SeedDataset;
use reestr::services::lookup::RegistryLookup;
use reestr::traits::dataset::FallbackDataset;
use reestr::traits::fetcher::{FetchError, SearchPageFetcher};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const KNOWN_INN: &str = "5217000301";
pub const REGISTRY_PATH: &str = "/reestr/";
pub const SESSION_COOKIE: &str = "PHPSESSID=test-session";

pub fn read_page(name: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(root.join("tests/resources/pages").join(name)).unwrap()
}

pub fn registry_config(server: &MockServer) -> RegistryConfig {
    RegistryConfig {
        base_url: format!("{}{}", server.uri(), REGISTRY_PATH),
        ..RegistryConfig::default()
    }
}

/// Первая загрузка реестра без фильтра: отдаёт сессионную cookie
pub async fn mount_session_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(REGISTRY_PATH))
        .and(query_param_is_missing("set_filter"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{}; path=/; HttpOnly", SESSION_COOKIE).as_str())
                .set_body_string(read_page("no_results.html")),
        )
        .mount(server)
        .await;
}

/// Поиск с фильтром по ИНН (GET)
pub async fn mount_search_page(server: &MockServer, inn: &str, page: &str) {
    Mock::given(method("GET"))
        .and(path(REGISTRY_PATH))
        .and(query_param("arrFilter_pf[INNNumber]", inn))
        .and(query_param("set_filter", "Показать"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=UTF-8")
                .set_body_string(read_page(page)),
        )
        .mount(server)
        .await;
}

pub async fn mount_search_status(server: &MockServer, inn: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(REGISTRY_PATH))
        .and(query_param("arrFilter_pf[INNNumber]", inn))
        .respond_with(ResponseTemplate::new(status).set_body_string("Internal Server Error"))
        .mount(server)
        .await;
}

pub fn seed_dataset(entries: &[(&str, Option<&str>, &str, &str)]) -> Arc<dyn FallbackDataset> {
    let mut map = AHashMap::new();
    for (inn, status, org_name, date) in entries {
        map.insert(
            inn.to_string(),
            DatasetEntry {
                status: status.map(str::to_string),
                org_name: org_name.to_string(),
                registration_date: date.to_string(),
            },
        );
    }
    Arc::new(SeedDataset::new(map))
}

/// Тестовый двойник: отдаёт заранее заданный ответ и считает вызовы
pub struct CountingFetcher {
    response: Result<String, FetchError>,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn page(name: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(read_page(name)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: FetchError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchPageFetcher for CountingFetcher {
    async fn fetch_search_page(&self, _inn: &Inn) -> Result<RawPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map(|html| RawPage {
            status: 200,
            html,
            cookie: None,
        })
    }
}

pub fn lookup_with(fetcher: Arc<CountingFetcher>, dataset: Option<Arc<dyn FallbackDataset>>) -> RegistryLookup {
    RegistryLookup::builder()
        .fetcher(fetcher)
        .maybe_dataset(dataset)
        .build()
}
