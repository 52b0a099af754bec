pub mod dataset;
pub mod fetcher;
