// src/source/mod.rs
use crate::utils::error::SourceError;
use std::fmt::Display;
use std::fs;
use std::panic::{self, UnwindSafe};
use std::path::Path;

/// Reads the full text of an input document.
///
/// PDFs are flattened with `pdf-extract`, pages concatenated in order.
/// Anything else is read as UTF-8 text.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<String, SourceError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SourceError::NotFound(path.display().to_string()));
    }

    let text = if is_pdf(path) {
        let bytes = fs::read(path)?;
        tracing::debug!("Read {} bytes of PDF from {}", bytes.len(), path.display());
        decode_pdf(path, || pdf_extract::extract_text_from_mem(&bytes))?
    } else {
        fs::read_to_string(path)?
    };

    tracing::info!("Loaded {} characters of text from {}", text.len(), path.display());
    Ok(text)
}

/// Runs a PDF decoder, turning both its errors and its panics into `SourceError::Pdf`.
fn decode_pdf<F, E>(path: &Path, decode: F) -> Result<String, SourceError>
where
    F: FnOnce() -> Result<String, E> + UnwindSafe,
    E: Display,
{
    match panic::catch_unwind(decode) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(SourceError::Pdf(format!("{}: {}", path.display(), e))),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "decoder panicked".to_string());
            tracing::error!("PDF decoder panicked on {}: {}", path.display(), reason);
            Err(SourceError::Pdf(format!("{}: {}", path.display(), reason)))
        }
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
