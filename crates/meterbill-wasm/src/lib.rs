//! WASM bindings for municipal electricity bill extraction.
//!
//! Text extraction from PDFs happens on the JavaScript side (e.g. pdf.js);
//! these bindings take the flattened page text and return plain JS objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use meterbill_core::bill::BillTextExtractor;
use meterbill_core::models::bill::BillRecord;
use meterbill_core::models::config::ExportConfig;
use meterbill_core::{build_series, sorted_by_period, to_csv, BillSession as CoreSession};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // JSON-compatible so missing values arrive as `null`, not `undefined`.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js(records: JsValue) -> Result<Vec<BillRecord>, JsValue> {
    serde_wasm_bindgen::from_value(records).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn records_csv(records: Vec<BillRecord>) -> Result<String, String> {
    to_csv(&sorted_by_period(records), &ExportConfig::default()).map_err(|e| e.to_string())
}

/// Extract one bill from its page text.
#[wasm_bindgen]
pub fn extract_bill_from_text(name: &str, text: &str) -> Result<JsValue, JsValue> {
    let record = BillTextExtractor::new().extract(name, text);
    to_js(&record)
}

/// Extract one bill and report which fields were not found.
///
/// No timing is included: `std::time::Instant` is unavailable in the browser.
#[wasm_bindgen]
pub fn extract_with_report(name: &str, text: &str) -> Result<JsValue, JsValue> {
    #[derive(Serialize)]
    struct Report {
        missing_fields: Vec<&'static str>,
        record: BillRecord,
    }

    let record = BillTextExtractor::new().extract(name, text);
    to_js(&Report {
        missing_fields: record.missing_fields(),
        record,
    })
}

/// Render an array of bill records as CSV, sorted by period.
#[wasm_bindgen]
pub fn bills_to_csv(records: JsValue) -> Result<String, JsValue> {
    records_csv(from_js(records)?).map_err(|e| JsValue::from_str(&e))
}

/// Build chart series for an array of bill records, sorted by period.
#[wasm_bindgen]
pub fn chart_series(records: JsValue) -> Result<JsValue, JsValue> {
    let records = sorted_by_period(from_js(records)?);
    let chart = build_series(&records, &ExportConfig::default().date_format)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&chart)
}

/// Bill session for browser use.
///
/// Bills added here stay sorted by period; `render_chart` rebuilds the chart
/// series from scratch each time.
#[wasm_bindgen]
pub struct BillSession {
    inner: CoreSession,
}

#[wasm_bindgen]
impl BillSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CoreSession::new(),
        }
    }

    /// Extract a bill from text, add it and return the record.
    #[wasm_bindgen]
    pub fn add_text(&mut self, name: &str, text: &str) -> Result<JsValue, JsValue> {
        let record = self.inner.ingest(name, text);
        to_js(&record)
    }

    /// All bills, sorted by period start.
    #[wasm_bindgen]
    pub fn records(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.records())
    }

    #[wasm_bindgen]
    pub fn csv(&self) -> Result<String, JsValue> {
        self.inner
            .to_csv()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Rebuild and return the chart series.
    #[wasm_bindgen]
    pub fn render_chart(&mut self) -> Result<JsValue, JsValue> {
        let chart = self
            .inner
            .render()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(chart)
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for BillSession {
    fn default() -> Self {
        Self::new()
    }
}
