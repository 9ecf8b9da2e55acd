//! Loading bill text from files.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::BillError;
use crate::models::config::MeterbillConfig;

/// File extensions accepted as bill sources.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

/// True when the path has an extension [`load_text`] can read.
pub fn is_supported(path: &Path) -> bool {
    let ext = extension(path);
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read the flattened text of a bill.
///
/// PDFs go through the PDF text extractor; `.txt` files are taken as already
/// extracted text.
pub fn load_text(path: &Path, config: &MeterbillConfig) -> crate::Result<String> {
    let text = match extension(path).as_str() {
        "pdf" => load_pdf(path, config)?,
        "txt" => std::fs::read_to_string(path)?,
        other => {
            return Err(BillError::Config(format!("unsupported file format: {:?}", other)));
        }
    };

    let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();
    if meaningful < config.pdf.min_text_length {
        warn!(
            "{} has only {} characters of text, it may be a scanned document",
            path.display(),
            meaningful
        );
    }

    debug!("Loaded {} characters from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(feature = "pdf")]
fn load_pdf(path: &Path, config: &MeterbillConfig) -> crate::Result<String> {
    use crate::pdf::{PdfProcessor, PdfTextExtractor};

    let data = std::fs::read(path)?;
    let mut extractor = PdfTextExtractor::new().with_max_pages(config.pdf.max_pages);
    extractor.load(&data)?;
    Ok(extractor.extract_text()?)
}

#[cfg(not(feature = "pdf"))]
fn load_pdf(path: &Path, _config: &MeterbillConfig) -> crate::Result<String> {
    Err(BillError::Config(format!(
        "PDF support is not enabled, cannot read {}",
        path.display()
    )))
}
