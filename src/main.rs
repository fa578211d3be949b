// src/main.rs
mod utils;
mod extractors;
mod source;
mod storage;
mod summarize;

use std::path::PathBuf;
use clap::Parser;
use utils::AppError;
use extractors::{categories, filter_by_type, ExtractorOptions, SubmittalEntry, SubmittalExtractor};
use storage::{RunInfo, StorageManager};
use summarize::{ChatSummarizer, SummarizerConfig};

/// Command Line Interface for the Contract Item List (CIL) log generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Specification document to scan (PDF or plain text)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the generated log
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// File name (without extension) for the generated log
    #[arg(long, default_value = "CIL_Log")]
    output_name: String,

    /// Keep only entries of this submittal type (e.g. "Product data")
    #[arg(short, long)]
    type_filter: Option<String>,

    /// Summarize each description with a chat completions model
    #[arg(short, long)]
    summarize: bool,

    /// API key for the summarization endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for summaries
    #[arg(long, default_value = summarize::models::DEFAULT_MODEL)]
    model: String,

    /// Chat completions endpoint
    #[arg(long, default_value = summarize::models::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Token limit for each summary
    #[arg(long, default_value_t = summarize::models::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Lines collected after each trigger line
    #[arg(long, default_value_t = extractors::submittal::DEFAULT_WINDOW)]
    window: usize,

    /// Extra trigger keyword (repeatable)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Also write the entries as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Generating CIL log for {}", args.input.display());

    // 3. Resolve the type filter before doing any work
    let type_filter = match &args.type_filter {
        Some(label) => Some(categories::lookup(label).ok_or_else(|| {
            AppError::Config(format!("Unknown submittal type '{}'", label))
        })?),
        None => None,
    };

    // 4. Build the summarizer up front so a missing key fails fast
    let summarizer = if args.summarize {
        let mut config = SummarizerConfig::new(args.api_key.clone().unwrap_or_default());
        config.model = args.model.clone();
        config.endpoint = args.endpoint.clone();
        config.max_tokens = args.max_tokens;
        Some(ChatSummarizer::new(config)?)
    } else {
        None
    };

    // 5. Extract text and scan it
    let text = source::load_text(&args.input)?;
    let extractor = SubmittalExtractor::with_options(ExtractorOptions {
        window: args.window,
        extra_keywords: args.keywords.clone(),
    })?;
    let entries = extractor.extract(&text);

    if entries.is_empty() {
        tracing::warn!("No contractor-required submittals found.");
        return Ok(());
    }

    // An empty filtered table is still exported
    let mut entries = apply_type_filter(entries, type_filter);

    // 6. Optional summaries, failures are recorded per entry
    let summary_failures = match &summarizer {
        Some(summarizer) => Some(summarize::summarize_entries(summarizer, &mut entries).await),
        None => None,
    };

    // 7. Export
    let storage = StorageManager::new(&args.output_dir)?;
    let path = storage.save_log_xlsx(&entries, &args.output_name)?;
    tracing::info!("Found {} relevant submittals, log written to {}", entries.len(), path.display());

    if args.json {
        storage.save_log_json(&entries, &args.output_name)?;
    }

    let run = RunInfo {
        source_document: args.input.display().to_string(),
        type_filter: type_filter.map(str::to_string),
        summary_failures,
    };
    if let Err(e) = storage.save_log_metadata(&entries, &run, &args.output_name) {
        tracing::error!("Failed to save log metadata: {}", e);
    }

    Ok(())
}

/// Narrows the extracted entries to one submittal type, if requested.
fn apply_type_filter(entries: Vec<SubmittalEntry>, type_filter: Option<&str>) -> Vec<SubmittalEntry> {
    let Some(label) = type_filter else {
        return entries;
    };

    let extracted = entries.len();
    let filtered = filter_by_type(entries, label);
    if filtered.is_empty() {
        tracing::warn!("None of the {} extracted submittals are of type '{}'", extracted, label);
    } else {
        tracing::info!("{} of {} entries are of type '{}'", filtered.len(), extracted, label);
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["cil_log", "--input", "spec.pdf"]).unwrap();
        assert_eq!(args.input, PathBuf::from("spec.pdf"));
        assert_eq!(args.output_dir, PathBuf::from("./output"));
        assert_eq!(args.output_name, "CIL_Log");
        assert_eq!(args.window, 14);
        assert_eq!(args.max_tokens, 100);
        assert_eq!(args.model, "gpt-4");
        assert!(!args.summarize);
        assert!(args.keywords.is_empty());
    }

    #[test]
    fn test_cli_repeatable_keywords() {
        let args = Args::try_parse_from([
            "cil_log", "-i", "spec.txt", "-k", "deliver", "--keyword", "turn over", "-t", "Warranty", "-s",
        ])
        .unwrap();
        assert_eq!(args.keywords, vec!["deliver", "turn over"]);
        assert_eq!(args.type_filter.as_deref(), Some("Warranty"));
        assert!(args.summarize);
    }

    #[test]
    fn test_type_filter_can_empty_the_table() {
        let entries = SubmittalExtractor::new().extract("Submit samples.\n\nProvide warranty.");
        assert_eq!(entries.len(), 2);

        assert_eq!(apply_type_filter(entries.clone(), None), entries);

        let warranty = apply_type_filter(entries.clone(), Some("Warranty"));
        assert_eq!(warranty.len(), 1);
        assert_eq!(warranty[0].submittal_id, "S002");

        assert!(apply_type_filter(entries, Some("Payroll")).is_empty());
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Args::try_parse_from(["cil_log"]).is_err());
    }
}
