//! Фразы и метки, по которым распознаётся разметка сайта реестра.
//!
//! Сайт не даёт стабильного контракта: все литералы собраны здесь и могут
//! быть переопределены секцией `markers` конфигурации без изменения кода.

use serde::Deserialize;

/// Варианты текста страницы "ничего не найдено"
pub const NO_RESULTS_PHRASES: &[&str] = &[
    "ничего не найдено",
    "Нет элементов для отображения",
    "Нет результатов",
];

/// Подстроки первой ячейки, по которым строка похожа на статус членства
pub const STATUS_HINTS: &[&str] = &["Член", "СРО"];

/// Подпись шаблона, попадающая в колонку названия вместо значения
pub const NAME_PLACEHOLDER: &str = "Краткое наименование";

/// Метка ошибки внутри названия организации
pub const NAME_ERROR_MARKER: &str = "-ошибка";

/// Признак исключения из реестра (ищется в колонке даты регистрации)
pub const EXCLUDED_MARKER: &str = "Исключен";

/// Канонический статус члена СРО
pub const MEMBER_STATUS: &str = "Член СРО";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryMarkers {
    pub no_results_phrases: Vec<String>,
    pub status_hints: Vec<String>,
    pub name_placeholder: String,
    pub name_error_marker: String,
    pub excluded_marker: String,
    pub member_status: String,
}

impl Default for RegistryMarkers {
    fn default() -> Self {
        Self {
            no_results_phrases: NO_RESULTS_PHRASES.iter().map(|s| s.to_string()).collect(),
            status_hints: STATUS_HINTS.iter().map(|s| s.to_string()).collect(),
            name_placeholder: NAME_PLACEHOLDER.to_string(),
            name_error_marker: NAME_ERROR_MARKER.to_string(),
            excluded_marker: EXCLUDED_MARKER.to_string(),
            member_status: MEMBER_STATUS.to_string(),
        }
    }
}

impl RegistryMarkers {
    /// Ищет на странице любую фразу "ничего не найдено" без учёта регистра
    pub fn find_no_results_phrase(&self, html: &str) -> Option<&str> {
        let haystack = html.to_lowercase();
        self.no_results_phrases
            .iter()
            .filter(|p| !p.is_empty())
            .find(|p| haystack.contains(&p.to_lowercase()))
            .map(String::as_str)
    }

    pub fn looks_like_status(&self, cell_text: &str) -> bool {
        self.status_hints
            .iter()
            .any(|hint| !hint.is_empty() && cell_text.contains(hint.as_str()))
    }
}
