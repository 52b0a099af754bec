use std::sync::Arc;

use bon::bon;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::markers::RegistryMarkers;
use crate::models::source::DataSource;
use crate::models::types::{CandidateRecord, Inn, LookupResult};
use crate::parsers::{scan_page, PageScan};
use crate::services::datasets::LayeredDataset;
use crate::services::validator::{validate, RejectReason, Validation};
use crate::traits::dataset::FallbackDataset;
use crate::traits::fetcher::{FetchError, SearchPageFetcher};

/// Почему живой источник не дал записи. Наружу не выходит, только в логи.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiveFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("registry reported no results ({phrase:?})")]
    NoResultsPage { phrase: String },
    #[error("results table not found or has no usable rows")]
    StructuralMismatch,
    #[error("record rejected: {reason}")]
    ValidationRejected { reason: RejectReason },
}

impl LiveFailure {
    /// Этап конвейера, на котором произошёл сбой
    pub fn stage(&self) -> &'static str {
        match self {
            LiveFailure::Fetch(FetchError::TimedOut) => "fetch_timeout",
            LiveFailure::Fetch(_) => "fetch",
            LiveFailure::NoResultsPage { .. } => "locate_no_results",
            LiveFailure::StructuralMismatch => "locate",
            LiveFailure::ValidationRejected { .. } => "validate",
        }
    }
}

/// Поиск по ИНН: сайт реестра, затем резервный набор данных.
///
/// Изменяемого состояния нет, один экземпляр можно делить между
/// параллельными запросами.
pub struct RegistryLookup {
    fetcher: Arc<dyn SearchPageFetcher>,
    dataset: Arc<dyn FallbackDataset>,
    markers: RegistryMarkers,
}

#[bon]
impl RegistryLookup {
    #[builder]
    pub fn new(
        fetcher: Arc<dyn SearchPageFetcher>,
        dataset: Option<Arc<dyn FallbackDataset>>,
        #[builder(default)] markers: RegistryMarkers,
    ) -> Self {
        Self {
            fetcher,
            dataset: dataset.unwrap_or_else(|| Arc::new(LayeredDataset::default())),
            markers,
        }
    }

    pub async fn lookup(&self, inn: &str) -> LookupResult {
        let inn = match Inn::parse(inn) {
            Ok(inn) => inn,
            Err(e) => {
                warn!(error = %e, "lookup: invalid input, no request made");
                return LookupResult::InvalidInput { inn: e.0 };
            }
        };

        match self.try_live(&inn).await {
            Ok(record) => {
                info!(%inn, data_source = %DataSource::Website, org = %record.organization_name, "lookup: found on website");
                return LookupResult::Found {
                    record,
                    data_source: DataSource::Website,
                };
            }
            Err(failure) => {
                warn!(%inn, stage = failure.stage(), error = %failure, "lookup: live source failed, trying fallback dataset");
            }
        }

        match self.dataset.get(inn.as_str()) {
            Some(entry) => {
                let record = entry.to_record(&inn, &self.markers.member_status);
                info!(%inn, data_source = %DataSource::Local, dataset = self.dataset.name(), "lookup: found in fallback dataset");
                LookupResult::Found {
                    record,
                    data_source: DataSource::Local,
                }
            }
            None => {
                info!(%inn, "lookup: not found in any source");
                LookupResult::NotFound
            }
        }
    }

    async fn try_live(&self, inn: &Inn) -> Result<CandidateRecord, LiveFailure> {
        let page = self.fetcher.fetch_search_page(inn).await?;
        select_record(&page.html, inn, &self.markers)
    }
}

/// Разбор страницы и выбор первой строки с запрошенным ИНН, прошедшей проверку
pub fn select_record(html: &str, inn: &Inn, markers: &RegistryMarkers) -> Result<CandidateRecord, LiveFailure> {
    let rows = match scan_page(html, markers) {
        PageScan::NoResults { phrase } => return Err(LiveFailure::NoResultsPage { phrase }),
        PageScan::StructuralMismatch => return Err(LiveFailure::StructuralMismatch),
        PageScan::Rows(rows) => rows,
    };
    if rows.is_empty() {
        return Err(LiveFailure::StructuralMismatch);
    }

    let mut reason = RejectReason::InnMismatch;
    for row in rows {
        match validate(row, inn.as_str(), markers) {
            Validation::Accepted(record) => return Ok(record),
            Validation::Rejected { reason: r } => {
                debug!(%inn, reason = %r, "lookup: row rejected");
                if r != RejectReason::InnMismatch {
                    reason = r;
                }
            }
        }
    }
    Err(LiveFailure::ValidationRejected { reason })
}
