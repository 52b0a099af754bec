use scraper::Html;
use tracing::info;

use crate::models::markers::RegistryMarkers;
use crate::models::types::CandidateRecord;
use crate::parsers::row_extractor::extract_rows;
use crate::parsers::table_locator::{locate_results_table, TableLocation};

/// Итог разбора страницы поиска
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScan {
    /// Сайт явно сообщил, что ничего не найдено
    NoResults { phrase: String },
    /// Таблица результатов не найдена: разметка не совпала с ожидаемой
    StructuralMismatch,
    /// Строки таблицы результатов (могут быть пустыми после отсева)
    Rows(Vec<CandidateRecord>),
}

/// Разбирает HTML страницы поиска.
///
/// Фразы "ничего не найдено" проверяются до построения DOM. Документ
/// живёт только внутри вызова.
pub fn scan_page(html: &str, markers: &RegistryMarkers) -> PageScan {
    if let Some(phrase) = markers.find_no_results_phrase(html) {
        info!(%phrase, "scan: no-results page");
        return PageScan::NoResults {
            phrase: phrase.to_string(),
        };
    }
    let document = Html::parse_document(html);
    match locate_results_table(&document, markers) {
        TableLocation::Table(table) => {
            let rows = extract_rows(table);
            info!(rows = rows.len(), "scan: rows extracted");
            PageScan::Rows(rows)
        }
        TableLocation::NotFound => PageScan::StructuralMismatch,
    }
}
