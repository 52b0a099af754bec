//! Эвристики доверия к строке реестра.
//!
//! Сайт возвращает правильно свёрстанные строки с мусором внутри: подписи
//! шаблона вместо названия, метку исключения в колонке даты, одинаковый
//! текст в двух колонках. Проверки повторяют именно эти наблюдаемые сбои.

use strum_macros::{AsRefStr, Display};

use crate::models::markers::RegistryMarkers;
use crate::models::types::CandidateRecord;

/// Причина отказа в доверии строке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    InnMismatch,
    EmptyOrganizationName,
    PlaceholderOrganizationName,
    ErrorMarkerInName,
    ExcludedInRegistrationDate,
    EmptyStatus,
    RegistrationDateEqualsStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted(CandidateRecord),
    Rejected { reason: RejectReason },
}

/// Проверяет запись; первая сработавшая эвристика определяет причину отказа.
pub fn validate(record: CandidateRecord, requested_inn: &str, markers: &RegistryMarkers) -> Validation {
    match first_violation(&record, requested_inn, markers) {
        Some(reason) => Validation::Rejected { reason },
        None => Validation::Accepted(record),
    }
}

fn first_violation(record: &CandidateRecord, requested_inn: &str, markers: &RegistryMarkers) -> Option<RejectReason> {
    let name = record.organization_name.as_str();
    if record.inn != requested_inn {
        return Some(RejectReason::InnMismatch);
    }
    if name.is_empty() {
        return Some(RejectReason::EmptyOrganizationName);
    }
    if contains_marker(name, &markers.name_placeholder) {
        return Some(RejectReason::PlaceholderOrganizationName);
    }
    if contains_marker(name, &markers.name_error_marker) {
        return Some(RejectReason::ErrorMarkerInName);
    }
    // Исключение проверяется по дате, а не по статусу: там оно и появляется
    if contains_marker(&record.registration_date, &markers.excluded_marker) {
        return Some(RejectReason::ExcludedInRegistrationDate);
    }
    if record.status.is_empty() {
        return Some(RejectReason::EmptyStatus);
    }
    if record.registration_date == record.status {
        return Some(RejectReason::RegistrationDateEqualsStatus);
    }
    None
}

fn contains_marker(text: &str, marker: &str) -> bool {
    !marker.is_empty() && text.contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(status: &str, name: &str, date: &str) -> CandidateRecord {
        CandidateRecord::builder()
            .status(status)
            .organization_name(name)
            .inn("1234567890")
            .registration_date(date)
            .build()
    }

    #[test]
    fn test_accepts_good_record_unchanged() {
        let good = record("Член СРО", "ООО Тест", "01.01.2020");
        assert_eq!(
            validate(good.clone(), "1234567890", &RegistryMarkers::default()),
            Validation::Accepted(good)
        );
    }

    #[rstest]
    #[case(record("Член СРО", "", "01.01.2020"), RejectReason::EmptyOrganizationName)]
    #[case(record("Член СРО", "Краткое наименование организации:", "01.01.2020"), RejectReason::PlaceholderOrganizationName)]
    #[case(record("Член СРО", "ООО Тест-ошибка", "01.01.2020"), RejectReason::ErrorMarkerInName)]
    #[case(record("Член СРО", "ООО Тест", "Исключен из СРО"), RejectReason::ExcludedInRegistrationDate)]
    #[case(record("Действует", "ООО Тест", "Исключен 12.05.2021"), RejectReason::ExcludedInRegistrationDate)]
    #[case(record("", "ООО Тест", "01.01.2020"), RejectReason::EmptyStatus)]
    #[case(record("Член СРО", "ООО Тест", "Член СРО"), RejectReason::RegistrationDateEqualsStatus)]
    fn test_rejects_known_failure_signatures(#[case] candidate: CandidateRecord, #[case] expected: RejectReason) {
        assert_eq!(
            validate(candidate, "1234567890", &RegistryMarkers::default()),
            Validation::Rejected { reason: expected }
        );
    }

    #[test]
    fn test_excluded_only_checked_in_registration_date() {
        let candidate = record("Исключен", "ООО Тест", "01.01.2020");
        assert!(matches!(
            validate(candidate, "1234567890", &RegistryMarkers::default()),
            Validation::Accepted(_)
        ));
    }

    #[test]
    fn test_rejects_other_inn() {
        let candidate = record("Член СРО", "ООО Тест", "01.01.2020");
        assert_eq!(
            validate(candidate, "0987654321", &RegistryMarkers::default()),
            Validation::Rejected { reason: RejectReason::InnMismatch }
        );
    }

    #[test]
    fn test_reason_display_is_snake_case() {
        assert_eq!(RejectReason::PlaceholderOrganizationName.to_string(), "placeholder_organization_name");
        assert_eq!(RejectReason::ExcludedInRegistrationDate.as_ref(), "excluded_in_registration_date");
    }
}
