use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::models::types::CandidateRecord;
use crate::parsers::table_locator::{body_rows, row_cells};

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Минимальная длина ИНН в строке таблицы
pub const MIN_ROW_INN_LEN: usize = 10;

/// Извлекает строки таблицы результатов в порядке документа.
///
/// Колонки: 0 статус, 1 наименование, 2 ИНН, 3 дата регистрации; пятая и
/// последующие игнорируются.
pub fn extract_rows(table: ElementRef<'_>) -> Vec<CandidateRecord> {
    let mut out = Vec::new();
    for (index, row) in body_rows(table).enumerate() {
        let cells = row_cells(row);
        if cells.len() < 4 {
            debug!(row = index, cells = cells.len(), "extract: skipping row with fewer than 4 cells");
            continue;
        }
        let inn = cell_text(cells[2]);
        if inn.chars().count() < MIN_ROW_INN_LEN {
            debug!(row = index, %inn, "extract: skipping row with short or empty inn");
            continue;
        }
        let record = CandidateRecord {
            status: cell_text(cells[0]),
            organization_name: cell_text(cells[1]),
            inn,
            registration_date: cell_text(cells[3]),
        };
        debug!(row = index, inn = %record.inn, org = %record.organization_name, "extract: row");
        out.push(record);
    }
    out
}

/// Текст ячейки без пробелов по краям; текст ссылки внутри ячейки приоритетнее
pub(crate) fn cell_text(cell: ElementRef<'_>) -> String {
    if let Some(anchor) = cell.select(&ANCHOR).next() {
        let text = trimmed_text(anchor);
        if !text.is_empty() {
            return text;
        }
    }
    trimmed_text(cell)
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::markers::RegistryMarkers;
    use crate::parsers::table_locator::{locate_results_table, TableLocation};
    use pretty_assertions::assert_eq;
    use scraper::Html;

    fn rows_of(html: &str) -> Vec<CandidateRecord> {
        let document = Html::parse_document(html);
        match locate_results_table(&document, &RegistryMarkers::default()) {
            TableLocation::Table(table) => extract_rows(table),
            TableLocation::NotFound => panic!("fixture must contain a results table"),
        }
    }

    #[test]
    fn test_extracts_fields_verbatim() {
        let rows = rows_of(
            "<table><tbody><tr>\
               <td> Член СРО </td><td>ООО Тест</td><td>1234567890</td><td>01.01.2020</td>\
             </tr></tbody></table>",
        );
        assert_eq!(
            rows,
            vec![CandidateRecord::builder()
                .status("Член СРО")
                .organization_name("ООО Тест")
                .inn("1234567890")
                .registration_date("01.01.2020")
                .build()]
        );
    }

    #[test]
    fn test_prefers_anchor_text() {
        let rows = rows_of(
            r#"<table><tbody><tr>
                 <td>Член СРО</td>
                 <td>Подробнее: <a href="/reestr/77/">АО «КМ»</a></td>
                 <td>5217000301</td><td>30.08.2022</td><td>Н/Д</td>
               </tr></tbody></table>"#,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].organization_name, "АО «КМ»");
        assert_eq!(rows[0].registration_date, "30.08.2022");
    }

    #[test]
    fn test_skips_short_rows_and_short_inn() {
        let rows = rows_of(
            r#"<table><tbody>
                 <tr><td>Член СРО</td><td>ООО Первый</td><td>1111111111</td><td>01.02.2021</td></tr>
                 <tr><td colspan="4">Раздел</td></tr>
                 <tr><td>Член СРО</td><td>ООО Короткий</td><td>123456789</td><td>01.02.2021</td></tr>
                 <tr><td>Член СРО</td><td>ООО Пустой</td><td>  </td><td>01.02.2021</td></tr>
                 <tr><td>Член СРО</td><td>ИП Второй</td><td>222222222222</td><td>03.04.2022</td></tr>
               </tbody></table>"#,
        );
        let inns: Vec<&str> = rows.iter().map(|r| r.inn.as_str()).collect();
        assert_eq!(inns, vec!["1111111111", "222222222222"]);
    }
}
