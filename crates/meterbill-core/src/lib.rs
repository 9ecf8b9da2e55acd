//! Core library for municipal electricity bill extraction.
//!
//! This crate provides:
//! - Rule-based field extraction from flattened bill text (period, consumption,
//!   daily average, tiered rates, consumption charge)
//! - PDF text intake (lopdf / pdf-extract) behind the `pdf` feature
//! - Aggregation, CSV export and chart-series building
//! - A [`BillSession`] that owns accumulated records and the current chart set

pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod bill;
pub mod aggregate;
pub mod export;
pub mod session;
pub mod source;

pub use error::{BillError, ExportError, PdfError, Result};
pub use models::bill::{BillRecord, Tier};
pub use models::config::MeterbillConfig;
#[cfg(feature = "pdf")]
pub use pdf::{PdfTextExtractor, PdfProcessor};
pub use bill::{BillParser, BillTextExtractor, ExtractionResult};
pub use aggregate::{sort_by_period, sorted_by_period};
pub use export::chart::{build_series, ChartSeries, ChartSet};
pub use export::csv::{to_csv, write_csv, CSV_HEADERS};
pub use session::BillSession;
pub use source::load_text;
