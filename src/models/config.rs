use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ahash::AHashMap;
use serde::Deserialize;
use strum::{AsRefStr, EnumString};
use thiserror::Error;

use crate::models::markers::RegistryMarkers;
use crate::models::source::LookupMode;
use crate::models::types::DatasetEntry;

pub const DEFAULT_BASE_URL: &str = "https://www.sronoso.ru/reestr/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.8,en-US;q=0.5,en;q=0.3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub fallback: FallbackConfig,
    pub markers: RegistryMarkers,
    pub logging: LoggingConfig,
}

/// Способ отправки формы фильтра
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormMethod {
    #[default]
    Get,
    Post,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
    pub method: FormMethod,
    pub name_param: String,
    pub inn_param: String,
    pub submit_param: String,
    pub submit_value: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub forward_session_cookie: bool,
    pub interactive_timeout_secs: u64,
    pub background_timeout_secs: u64,
    pub politeness_delay_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            method: FormMethod::Get,
            name_param: "arrFilter_ff[NAME]".to_string(),
            inn_param: "arrFilter_pf[INNNumber]".to_string(),
            submit_param: "set_filter".to_string(),
            submit_value: "Показать".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            forward_session_cookie: true,
            interactive_timeout_secs: 5,
            background_timeout_secs: 15,
            politeness_delay_ms: 0,
        }
    }
}

impl RegistryConfig {
    pub fn timeout_for(&self, mode: LookupMode) -> Duration {
        match mode {
            LookupMode::Interactive => Duration::from_secs(self.interactive_timeout_secs),
            LookupMode::Background => Duration::from_secs(self.background_timeout_secs),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FallbackConfig {
    /// JSON-снимок реестра: { "<inn>": {status, org_name, registration_date} }
    pub snapshot_path: Option<PathBuf>,
    /// Статические записи, проверяемые после снимка
    pub seed: AHashMap<String, DatasetEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
