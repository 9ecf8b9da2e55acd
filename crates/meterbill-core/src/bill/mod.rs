//! Electricity bill field extraction module.

mod parser;
pub mod rules;

pub use parser::{BillTextExtractor, ExtractionResult};

/// Trait for bill text parsers.
///
/// Parsing cannot fail: fields whose patterns do not match are left unset.
pub trait BillParser {
    /// Parse a bill from its name and flattened text.
    fn parse(&self, name: &str, text: &str) -> ExtractionResult;
}
