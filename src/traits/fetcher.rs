use async_trait::async_trait;
use thiserror::Error;

use crate::models::types::{Inn, RawPage};

/// Ошибки получения страницы поиска. Таймаут отделён от прочих сетевых сбоев.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("registry responded with status {status_code}")]
    Status { status_code: u16 },
    #[error("registry request timed out")]
    TimedOut,
    #[error("network error: {message}")]
    Network { message: String },
    #[error("http client setup failed: {message}")]
    Client { message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::TimedOut
        } else if let Some(status) = e.status() {
            FetchError::Status { status_code: status.as_u16() }
        } else if e.is_builder() {
            FetchError::Client { message: e.to_string() }
        } else {
            FetchError::Network { message: e.to_string() }
        }
    }
}

/// Источник HTML страницы поиска по ИНН.
///
/// Сам конвейер разбора один; окружение (прямой HTTP, безголовый браузер,
/// тестовый двойник) подставляет свою реализацию этого трейта.
#[async_trait]
pub trait SearchPageFetcher: Send + Sync {
    async fn fetch_search_page(&self, inn: &Inn) -> Result<RawPage, FetchError>;
}
