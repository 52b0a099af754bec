use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::models::markers::RegistryMarkers;
use crate::parsers::row_extractor::cell_text;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());

/// Результат поиска таблицы в разобранном документе
#[derive(Debug, Clone, Copy)]
pub enum TableLocation<'a> {
    /// Таблица, в теле которой есть строка-результат
    Table(ElementRef<'a>),
    /// Ни одна таблица не похожа на результаты (форма фильтра, смена разметки)
    NotFound,
}

/// Выбирает первую таблицу, у которой в `tbody` есть строка из 4+ ячеек
/// с признаком статуса членства в первой ячейке. Так отсекается таблица
/// формы фильтра, которая на той же странице тоже свёрстана `<table>`.
pub fn locate_results_table<'a>(document: &'a Html, markers: &RegistryMarkers) -> TableLocation<'a> {
    let mut scanned = 0usize;
    for (index, table) in document.select(&TABLE).enumerate() {
        scanned += 1;
        let matches = body_rows(table).any(|row| {
            let cells = row_cells(row);
            cells.len() >= 4 && markers.looks_like_status(&cell_text(cells[0]))
        });
        if matches {
            info!(table_index = index, "locate: results table found");
            return TableLocation::Table(table);
        }
        debug!(table_index = index, "locate: table does not look like results");
    }
    info!(tables = scanned, "locate: no results table on page");
    TableLocation::NotFound
}

fn child_elements<'a>(parent: ElementRef<'a>, tag: &'static str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}

/// Строки `<tr>` из `<tbody>` таблицы (без вложенных таблиц)
pub(crate) fn body_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    child_elements(table, "tbody").flat_map(|tbody| child_elements(tbody, "tr"))
}

pub(crate) fn row_cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    child_elements(row, "td").collect()
}
