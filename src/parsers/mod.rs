pub mod page;
pub mod row_extractor;
pub mod table_locator;

pub use page::{scan_page, PageScan};
