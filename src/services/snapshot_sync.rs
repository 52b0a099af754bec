use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::models::types::{CandidateRecord, DatasetEntry};
use crate::services::datasets::DatasetError;

/// Дописывает свежие записи с сайта в JSON-снимок реестра.
///
/// Конвейер поиска снимок не меняет: синхронизацию вызывает потребитель
/// после успешного ответа с сайта.
pub struct SnapshotSync {
    path: PathBuf,
}

impl SnapshotSync {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Возвращает `true`, если файл был изменён
    pub fn record(&self, record: &CandidateRecord) -> Result<bool, DatasetError> {
        let mut entries = self.read_existing()?;
        let fresh = DatasetEntry::from(record);
        if entries.get(&record.inn) == Some(&fresh) {
            info!(inn = %record.inn, "sync: snapshot already up to date");
            return Ok(false);
        }
        entries.insert(record.inn.clone(), fresh);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| DatasetError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|source| DatasetError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| DatasetError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(inn = %record.inn, path = %self.path.display(), entries = entries.len(), "sync: snapshot updated");
        Ok(true)
    }

    fn read_existing(&self) -> Result<BTreeMap<String, DatasetEntry>, DatasetError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| DatasetError::Read {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
