// src/summarize/mod.rs
pub mod client;
pub mod models;

use crate::extractors::SubmittalEntry;
use crate::utils::error::SummarizeError;

pub use client::ChatSummarizer;
pub use models::SummarizerConfig;

/// Written in place of a summary when the call for that entry fails.
pub const SUMMARY_FAILED: &str = "Summary failed";

/// Produces a short summary of one description.
#[allow(async_fn_in_trait)]
pub trait Summarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Summarizes every entry in order, one request at a time.
/// A failed entry gets `SUMMARY_FAILED` and the batch carries on.
/// Returns the number of failed entries.
pub async fn summarize_entries<S: Summarizer>(summarizer: &S, entries: &mut [SubmittalEntry]) -> usize {
    let mut failures = 0;

    for entry in entries.iter_mut() {
        match summarizer.summarize(&entry.description).await {
            Ok(summary) => {
                tracing::debug!("Summarized {}", entry.submittal_id);
                entry.summary = Some(summary);
            }
            Err(e) => {
                tracing::warn!("Failed to summarize {}: {}", entry.submittal_id, e);
                entry.summary = Some(SUMMARY_FAILED.to_string());
                failures += 1;
            }
        }
    }

    tracing::info!("Summarized {} entries ({} failed)", entries.len(), failures);
    failures
}
