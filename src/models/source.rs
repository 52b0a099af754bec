use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString, IntoStaticStr};

/// Источник, из которого получена принятая запись
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Живой ответ сайта реестра
    Website,
    /// Локальный снимок реестра или статические данные
    Local,
}

/// Режим вызова: определяет таймаут обращения к сайту
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, IntoStaticStr, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Пользователь ждёт ответа
    #[default]
    Interactive,
    /// Фоновые проверки статуса
    Background,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LookupMode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
