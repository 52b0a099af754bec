use bon::Builder;
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::source::DataSource;

static INN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9,15}$").unwrap());

/// ИНН, прошедший проверку формата: от 9 до 15 ASCII-цифр
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Inn(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ИНН должен состоять из 9-15 цифр: {0:?}")]
pub struct InvalidInn(pub String);

impl Inn {
    pub fn parse(raw: &str) -> Result<Self, InvalidInn> {
        if INN_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidInn(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Inn {
    type Error = InvalidInn;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Inn> for String {
    fn from(value: Inn) -> Self {
        value.0
    }
}

impl std::str::FromStr for Inn {
    type Err = InvalidInn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Ответ сайта реестра на поисковый запрос
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub status: u16,
    pub html: String,
    /// Сессионная cookie, полученная при первой загрузке страницы
    pub cookie: Option<String>,
}

/// Строка таблицы результатов до применения эвристик проверки.
///
/// Дата регистрации хранится как отображаемый текст и не разбирается.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[builder(into)]
    pub status: String,
    #[builder(into)]
    #[serde(rename = "org_name")]
    pub organization_name: String,
    #[builder(into)]
    pub inn: String,
    #[builder(into)]
    pub registration_date: String,
}

/// Итог поиска, который видят внешние потребители
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupResult {
    Found {
        record: CandidateRecord,
        data_source: DataSource,
    },
    NotFound,
    InvalidInput {
        inn: String,
    },
}

impl LookupResult {
    pub fn found(&self) -> bool {
        matches!(self, LookupResult::Found { .. })
    }

    pub fn record(&self) -> Option<&CandidateRecord> {
        match self {
            LookupResult::Found { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn data_source(&self) -> Option<DataSource> {
        match self {
            LookupResult::Found { data_source, .. } => Some(*data_source),
            _ => None,
        }
    }
}

/// Запись резервного набора данных (формат reestr.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub org_name: String,
    #[serde(default)]
    pub registration_date: String,
}

impl DatasetEntry {
    /// Собирает запись для выдачи; пустой статус заменяется каноническим `member_status`
    pub fn to_record(&self, inn: &Inn, member_status: &str) -> CandidateRecord {
        let status = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(member_status);
        CandidateRecord {
            status: status.to_string(),
            organization_name: self.org_name.clone(),
            inn: inn.as_str().to_string(),
            registration_date: self.registration_date.clone(),
        }
    }
}

impl From<&CandidateRecord> for DatasetEntry {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            status: Some(record.status.clone()),
            org_name: record.organization_name.clone(),
            registration_date: record.registration_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inn_accepts_digit_strings_of_valid_width() {
        for raw in ["123456789", "1234567890", "123456789012", "1234567890123", "123456789012345"] {
            let inn = Inn::parse(raw).unwrap();
            assert_eq!(inn.as_str(), raw);
            assert_eq!(inn.to_string(), raw);
        }
    }

    #[test]
    fn test_inn_rejects_bad_input() {
        for raw in ["", "12345678", "1234567890123456", "12345 67890", "12345678a0", " 1234567890", "１２３４５６７８９０", "٠١٢٣٤٥٦٧٨٩"] {
            assert_eq!(Inn::parse(raw), Err(InvalidInn(raw.to_string())), "{raw:?} must be rejected");
        }
    }

    #[test]
    fn test_inn_serde_validates() {
        let inn: Inn = serde_json::from_str("\"5217000301\"").unwrap();
        assert_eq!(inn.as_str(), "5217000301");
        assert!(serde_json::from_str::<Inn>("\"52170x0301\"").is_err());
    }

    #[test]
    fn test_lookup_result_serialization() {
        let found = LookupResult::Found {
            record: CandidateRecord::builder()
                .status("Член СРО")
                .organization_name("ООО Тест")
                .inn("1234567890")
                .registration_date("01.01.2020")
                .build(),
            data_source: DataSource::Website,
        };
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["outcome"], "found");
        assert_eq!(json["data_source"], "website");
        assert_eq!(json["record"]["org_name"], "ООО Тест");
        assert!(found.found());

        let json = serde_json::to_value(LookupResult::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "not_found"}));
        assert!(!LookupResult::NotFound.found());
    }

    #[test]
    fn test_dataset_entry_defaults_missing_status() {
        let inn = Inn::parse("1112223334").unwrap();
        let entry: DatasetEntry =
            serde_json::from_str(r#"{"org_name": "ООО \"МегаСтрой\"", "registration_date": "05.12.2023"}"#).unwrap();
        let record = entry.to_record(&inn, "Член СРО");
        assert_eq!(record.status, "Член СРО");
        assert_eq!(record.inn, "1112223334");

        let entry = DatasetEntry { status: Some("Приостановлено".into()), ..entry };
        assert_eq!(entry.to_record(&inn, "Член СРО").status, "Приостановлено");
    }
}
