use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::types::{DatasetEntry, Inn};
use crate::traits::dataset::FallbackDataset;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Записи с ключами, не похожими на ИНН, отбрасываются
fn keep_valid_keys(entries: AHashMap<String, DatasetEntry>, source: &str) -> AHashMap<String, DatasetEntry> {
    entries
        .into_iter()
        .filter(|(inn, _)| {
            let ok = Inn::parse(inn).is_ok();
            if !ok {
                warn!(%inn, source, "dataset: dropping entry with malformed inn key");
            }
            ok
        })
        .collect()
}

/// Снимок реестра в JSON-файле формата `{ "<inn>": {status, org_name, registration_date} }`
#[derive(Debug, Default)]
pub struct SnapshotDataset {
    entries: AHashMap<String, DatasetEntry>,
}

impl SnapshotDataset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: AHashMap<String, DatasetEntry> =
            serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let entries = keep_valid_keys(entries, "snapshot");
        info!(path = %path.display(), entries = entries.len(), "dataset: snapshot loaded");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FallbackDataset for SnapshotDataset {
    fn get(&self, inn: &str) -> Option<DatasetEntry> {
        self.entries.get(inn).cloned()
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}

/// Статические записи из конфигурации
#[derive(Debug, Default)]
pub struct SeedDataset {
    entries: AHashMap<String, DatasetEntry>,
}

impl SeedDataset {
    pub fn new(entries: AHashMap<String, DatasetEntry>) -> Self {
        Self {
            entries: keep_valid_keys(entries, "seed"),
        }
    }
}

impl FallbackDataset for SeedDataset {
    fn get(&self, inn: &str) -> Option<DatasetEntry> {
        self.entries.get(inn).cloned()
    }

    fn name(&self) -> &str {
        "seed"
    }
}

/// Опрашивает наборы по порядку; первый найденный ответ побеждает
#[derive(Default)]
pub struct LayeredDataset {
    layers: Vec<Arc<dyn FallbackDataset>>,
}

impl LayeredDataset {
    pub fn new(layers: Vec<Arc<dyn FallbackDataset>>) -> Self {
        Self { layers }
    }
}

impl FallbackDataset for LayeredDataset {
    fn get(&self, inn: &str) -> Option<DatasetEntry> {
        self.layers.iter().find_map(|layer| {
            let hit = layer.get(inn);
            if hit.is_some() {
                info!(%inn, layer = layer.name(), "dataset: hit");
            }
            hit
        })
    }

    fn name(&self) -> &str {
        "layered"
    }
}
