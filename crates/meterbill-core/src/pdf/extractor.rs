//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{flatten_page, PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf, with pdf-extract as a fallback.
pub struct PdfTextExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    /// Maximum pages to read (0 = unlimited).
    max_pages: usize,
}

impl PdfTextExtractor {
    /// Create a new PDF text extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: 0,
        }
    }

    /// Limit the number of pages read (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    fn pages_to_read(&self) -> u32 {
        let count = self.page_count();
        match self.max_pages {
            0 => count,
            max => count.min(max as u32),
        }
    }

    /// Whole-document extraction through pdf-extract, flattened to one line.
    fn extract_text_fallback(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(flatten_page(&text))
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfTextExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        let pages = self.pages_to_read();
        let mut full_text = String::new();

        for page in 1..=pages {
            match self.extract_page_text(page) {
                Ok(text) => {
                    full_text.push_str(&text);
                    full_text.push('\n');
                }
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page, e);
                    full_text.push('\n');
                }
            }
        }

        if full_text.trim().is_empty() {
            debug!("No text from page-by-page extraction, falling back to pdf-extract");
            return self.extract_text_fallback();
        }

        debug!("Extracted {} characters from {} pages", full_text.len(), pages);
        Ok(full_text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        trace!("Page {}: {} raw characters", page, text.len());

        Ok(flatten_page(&text))
    }
}
