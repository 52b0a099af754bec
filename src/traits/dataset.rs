use crate::models::types::DatasetEntry;

/// Резервный набор записей реестра, доступный только для чтения.
///
/// Поиск синхронный: ожидается словарь в памяти.
pub trait FallbackDataset: Send + Sync {
    fn get(&self, inn: &str) -> Option<DatasetEntry>;

    fn name(&self) -> &str;
}
