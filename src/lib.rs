pub mod crawlers;
pub mod models;
pub mod parsers;
pub mod services;
pub mod traits;

use std::sync::Arc;

use anyhow::Context;
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::crawlers::{HttpRegistryFetcher, SiteProbe, SiteStatus};
use crate::models::config::{AppConfig, FallbackConfig, load_config};
use crate::models::source::{DataSource, LookupMode};
use crate::models::types::LookupResult;
use crate::services::datasets::{DatasetError, LayeredDataset, SeedDataset, SnapshotDataset};
use crate::services::lookup::RegistryLookup;
use crate::services::snapshot_sync::SnapshotSync;
use crate::traits::dataset::FallbackDataset;
use crate::traits::fetcher::SearchPageFetcher;

/// Загружает конфигурацию из файла, либо берёт значения по умолчанию
pub fn load_app_config(path: Option<&str>) -> anyhow::Result<AppConfig> {
    match path {
        Some(p) => load_config(p).with_context(|| format!("Failed to load {}", p)),
        None => Ok(AppConfig::default()),
    }
}

/// Структурное логирование в stderr (RUST_LOG важнее уровня из конфига)
pub fn init_logging(cfg: &AppConfig) {
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| cfg.logging.level.clone());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Собирает резервный набор: снимок реестра, затем статические записи.
///
/// Отсутствующий файл снимка не ошибка (его может ещё не быть),
/// повреждённый файл - ошибка.
pub fn build_dataset(cfg: &FallbackConfig) -> Result<Arc<dyn FallbackDataset>, DatasetError> {
    let mut layers: Vec<Arc<dyn FallbackDataset>> = Vec::new();
    if let Some(path) = cfg.snapshot_path.as_ref() {
        match SnapshotDataset::load(path) {
            Ok(snapshot) => layers.push(Arc::new(snapshot)),
            Err(DatasetError::Read { path, source }) => {
                warn!(path = %path.display(), error = %source, "dataset: snapshot unavailable, skipping");
            }
            Err(e) => return Err(e),
        }
    }
    if !cfg.seed.is_empty() {
        layers.push(Arc::new(SeedDataset::new(cfg.seed.clone())));
    }
    Ok(Arc::new(LayeredDataset::new(layers)))
}

pub fn build_lookup(cfg: &AppConfig, mode: LookupMode) -> anyhow::Result<RegistryLookup> {
    let fetcher: Arc<dyn SearchPageFetcher> = Arc::new(
        HttpRegistryFetcher::builder()
            .registry(cfg.registry.clone())
            .mode(mode)
            .build()
            .context("Failed to build registry fetcher")?,
    );
    let dataset = build_dataset(&cfg.fallback).context("Failed to load fallback dataset")?;
    Ok(RegistryLookup::builder()
        .fetcher(fetcher)
        .dataset(dataset)
        .markers(cfg.markers.clone())
        .build())
}

/// Параллельный поиск по нескольким ИНН; результаты в порядке входа
pub async fn run_lookups(
    cfg: &AppConfig,
    inns: &[String],
    mode: LookupMode,
    sync_snapshot: bool,
) -> anyhow::Result<Vec<LookupResult>> {
    let lookup = build_lookup(cfg, mode)?;
    info!(count = inns.len(), %mode, "lookup: starting");
    let results = join_all(inns.iter().map(|inn| lookup.lookup(inn))).await;

    if sync_snapshot {
        match cfg.fallback.snapshot_path.as_ref() {
            Some(path) => {
                let sync = SnapshotSync::new(path);
                for result in &results {
                    if let (Some(record), Some(DataSource::Website)) = (result.record(), result.data_source()) {
                        if let Err(e) = sync.record(record) {
                            warn!(inn = %record.inn, error = %e, "sync: snapshot update failed");
                        }
                    }
                }
            }
            None => warn!("sync: fallback.snapshot_path is not configured, nothing to update"),
        }
    }
    Ok(results)
}

pub async fn run_status(cfg: &AppConfig) -> anyhow::Result<SiteStatus> {
    let probe = SiteProbe::new(&cfg.registry).context("Failed to build site probe")?;
    Ok(probe.check().await)
}
