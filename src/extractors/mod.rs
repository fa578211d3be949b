// src/extractors/mod.rs
pub mod categories;
pub mod submittal;

// Re-export key extraction types for convenience
pub use submittal::{filter_by_type, ExtractorOptions, SubmittalEntry, SubmittalExtractor};
