// src/extractors/submittal.rs

// --- Imports ---
use crate::extractors::categories::detect_submittal_type;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// --- Constants ---
/// Lines collected after the trigger line, at most.
pub const DEFAULT_WINDOW: usize = 14;

/// Lowercase phrases that mark a line as a submittal requirement.
pub const SUBMIT_KEYWORDS: [&str; 9] = [
    "contractor shall",
    "submit",
    "furnish",
    "provide",
    "installation instructions",
    "warranty",
    "as-built",
    "sample",
    "data",
];

// --- Regex Patterns (Lazy Static) ---
// "SECTION 03 30 00 - Cast-in-Place Concrete", anchored at line start
static SECTION_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^SECTION\s+(\d{2})\s+(\d{2})\s+(\d{2})\s*-\s*(.+)")
        .expect("Failed to compile SECTION_HEADER_RE")
});

// Any line opening with the word, header or not, closes a description window
static SECTION_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^SECTION").expect("Failed to compile SECTION_START_RE")
});

// --- Data Structures ---
/// The most recent "SECTION dd dd dd - Title" header seen by the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMarker {
    pub number: String, // e.g., "033000"
    pub title: String,  // e.g., "Cast-in-Place Concrete"
}

impl SectionMarker {
    /// Parses a header line, returning `None` when the line is not a header.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = SECTION_HEADER_RE.captures(line)?;
        Some(Self {
            number: format!("{}{}{}", &caps[1], &caps[2], &caps[3]),
            title: caps[4].trim().to_string(),
        })
    }
}

/// One row of the CIL log. Serialized field names match the exported columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittalEntry {
    #[serde(rename = "Submittal Spec Section Number")]
    pub section_number: String,
    #[serde(rename = "Submittal Spec Section Description")]
    pub section_title: String,
    #[serde(rename = "Submittal Number")]
    pub submittal_id: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Submittal Type")]
    pub submittal_type: String,
    #[serde(rename = "Summary", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Caller-tunable parts of the scan.
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    pub window: usize,
    pub extra_keywords: Vec<String>,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW, extra_keywords: Vec::new() }
    }
}

// --- Extractor ---
pub struct SubmittalExtractor {
    keywords: Vec<String>,
    window: usize,
}

impl SubmittalExtractor {
    pub fn new() -> Self {
        Self {
            keywords: SUBMIT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            window: DEFAULT_WINDOW,
        }
    }

    /// Builds an extractor with a custom window and additional trigger keywords.
    pub fn with_options(options: ExtractorOptions) -> Result<Self, ExtractError> {
        let mut extractor = Self::new();
        extractor.window = options.window;

        for keyword in options.extra_keywords {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(ExtractError::EmptyKeyword);
            }
            if !extractor.keywords.contains(&keyword) {
                tracing::debug!("Adding trigger keyword '{}'", keyword);
                extractor.keywords.push(keyword);
            }
        }

        Ok(extractor)
    }

    /// Scans the flattened document text and returns entries in trigger order.
    pub fn extract(&self, full_text: &str) -> Vec<SubmittalEntry> {
        let lines: Vec<&str> = full_text.split('\n').collect();
        let mut section = SectionMarker::default();
        let mut results: Vec<SubmittalEntry> = Vec::new();

        tracing::debug!("Scanning {} lines for submittal requirements", lines.len());

        for (i, line) in lines.iter().enumerate() {
            if let Some(marker) = SectionMarker::parse(line) {
                tracing::trace!("Entering section {} '{}' at line {}", marker.number, marker.title, i + 1);
                section = marker;
            }

            // A header line can trigger an entry too
            if !self.is_trigger(line) {
                continue;
            }

            let description = self.collect_description(&lines, i);
            let submittal_type = detect_submittal_type(&description);
            let submittal_id = format!("S{:03}", results.len() + 1);
            tracing::trace!("{} at line {} typed '{}'", submittal_id, i + 1, submittal_type);

            results.push(SubmittalEntry {
                section_number: section.number.clone(),
                section_title: section.title.clone(),
                submittal_id,
                description,
                submittal_type: submittal_type.to_string(),
                summary: None,
            });
        }

        tracing::info!("Found {} candidate submittals", results.len());
        results
    }

    fn is_trigger(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
    }

    /// Trigger line plus up to `window` following lines, stopping at a blank
    /// line or one starting with "SECTION". Does not advance the outer scan.
    fn collect_description(&self, lines: &[&str], start: usize) -> String {
        let mut desc_lines = vec![lines[start].trim()];

        for next in lines.iter().skip(start + 1).take(self.window) {
            let next_line = next.trim();
            if next_line.is_empty() || SECTION_START_RE.is_match(next_line) {
                break;
            }
            desc_lines.push(next_line);
        }

        desc_lines.join("\n")
    }
}

/// Keeps entries of one submittal type. Ids keep their original numbering.
pub fn filter_by_type(entries: Vec<SubmittalEntry>, submittal_type: &str) -> Vec<SubmittalEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.submittal_type == submittal_type)
        .collect()
}
