// src/storage/mod.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::SubmittalEntry;
use crate::utils::error::ExportError;
use rust_xlsxwriter::{Format, Workbook};

const SHEET_NAME: &str = "CIL Log";

/// Excel rejects cells holding more characters than this.
const MAX_CELL_CHARS: usize = 32_767;

const COLUMNS: [(&str, f64); 6] = [
    ("Submittal Spec Section Number", 16.0),
    ("Submittal Spec Section Description", 32.0),
    ("Submittal Number", 12.0),
    ("Description", 80.0),
    ("Submittal Type", 22.0),
    ("Summary", 60.0),
];

/// What was processed, for the metadata sidecar.
#[derive(Debug, Clone, Default)]
pub struct RunInfo {
    pub source_document: String,
    pub type_filter: Option<String>,
    pub summary_failures: Option<usize>, // None when summarization was off
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, ExportError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(ExportError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the log as an Excel workbook, one row per entry.
    /// The Summary column is only present when at least one entry has one.
    pub fn save_log_xlsx(&self, entries: &[SubmittalEntry], file_stem: &str) -> Result<PathBuf, ExportError> {
        let file_path = self.base_dir.join(format!("{}.xlsx", file_stem));
        let with_summary = entries.iter().any(|e| e.summary.is_some());
        let columns = if with_summary { &COLUMNS[..] } else { &COLUMNS[..5] };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let header_format = Format::new().set_bold();
        let wrap_format = Format::new().set_text_wrap();

        for (col, (header, width)) in columns.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *header, &header_format)?;
            worksheet.set_column_width(col, *width)?;
        }

        for (idx, entry) in entries.iter().enumerate() {
            let row = (idx + 1) as u32;
            worksheet.write_string(row, 0, &entry.section_number)?;
            worksheet.write_string(row, 1, cell_text(&entry.section_title, &entry.submittal_id))?;
            worksheet.write_string(row, 2, &entry.submittal_id)?;
            worksheet.write_string_with_format(row, 3, cell_text(&entry.description, &entry.submittal_id), &wrap_format)?;
            worksheet.write_string(row, 4, &entry.submittal_type)?;
            if with_summary {
                let summary = entry.summary.as_deref().unwrap_or_default();
                worksheet.write_string_with_format(row, 5, cell_text(summary, &entry.submittal_id), &wrap_format)?;
            }
        }

        // Column filters stand in for the interactive type filter
        worksheet.autofilter(0, 0, entries.len() as u32, (columns.len() - 1) as u16)?;

        workbook.save(&file_path)?;
        tracing::info!("Saved CIL log workbook to {}", file_path.display());

        Ok(file_path)
    }

    /// Writes the entries themselves as JSON, keyed by column name.
    pub fn save_log_json(&self, entries: &[SubmittalEntry], file_stem: &str) -> Result<PathBuf, ExportError> {
        let file_path = self.base_dir.join(format!("{}.json", file_stem));

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json)
            .map_err(ExportError::IoError)?;

        tracing::info!("Saved CIL log JSON to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the run in JSON format
    pub fn save_log_metadata(&self, entries: &[SubmittalEntry], run: &RunInfo, file_stem: &str) -> Result<PathBuf, ExportError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", file_stem));

        let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in entries {
            let label = if entry.submittal_type.is_empty() { "(untyped)" } else { entry.submittal_type.as_str() };
            *type_counts.entry(label).or_default() += 1;
        }

        let metadata = serde_json::json!({
            "source_document": run.source_document,
            "entry_count": entries.len(),
            "type_filter": run.type_filter,
            "summarized": run.summary_failures.is_some(),
            "summary_failures": run.summary_failures,
            "type_counts": type_counts,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(ExportError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

/// Cuts `text` to what one Excel cell can hold, on a char boundary.
fn cell_text<'a>(text: &'a str, submittal_id: &str) -> &'a str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(
                "{}: cell text truncated to {} characters for the workbook",
                submittal_id, MAX_CELL_CHARS
            );
            &text[..cut]
        }
        None => text,
    }
}
