//! PDF text intake module.
//!
//! Produces the flattened text shape the bill parser expects: the text of
//! each page on one line with single spaces between items, pages separated by
//! newlines.

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract flattened text from the whole PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract flattened text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Collapse all whitespace runs in a page's text into single spaces.
pub fn flatten_page(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_page() {
        assert_eq!(
            flatten_page("  Consumption\n889.000   kWh\t/ Daily average "),
            "Consumption 889.000 kWh / Daily average"
        );
        assert_eq!(flatten_page(""), "");
    }
}
