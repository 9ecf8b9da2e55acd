//! Bill processing session.
//!
//! A session owns the bills accumulated so far and the chart set last built
//! from them. Rendering replaces the previous chart set wholesale.

use tracing::{debug, info};

use crate::aggregate::sort_by_period;
use crate::bill::BillTextExtractor;
use crate::error::ExportError;
use crate::export::chart::{build_series, ChartSet};
use crate::export::csv::to_csv;
use crate::models::bill::BillRecord;
use crate::models::config::{ExportConfig, MeterbillConfig};

/// Accumulated bills plus their current chart set.
#[derive(Debug, Clone)]
pub struct BillSession {
    extractor: BillTextExtractor,
    export: ExportConfig,
    records: Vec<BillRecord>,
    chart: Option<ChartSet>,
}

impl BillSession {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self::with_config(&MeterbillConfig::default())
    }

    /// Create an empty session from configuration.
    pub fn with_config(config: &MeterbillConfig) -> Self {
        Self {
            extractor: BillTextExtractor::new()
                .with_record_logging(config.extraction.log_records),
            export: config.export.clone(),
            records: Vec::new(),
            chart: None,
        }
    }

    /// Extract a bill from text and add it to the session.
    pub fn ingest(&mut self, name: &str, text: &str) -> BillRecord {
        let record = self.extractor.extract(name, text);
        self.push(record.clone());
        record
    }

    /// Add already-extracted bills.
    pub fn extend(&mut self, records: impl IntoIterator<Item = BillRecord>) {
        self.records.extend(records);
        sort_by_period(&mut self.records);
    }

    fn push(&mut self, record: BillRecord) {
        self.records.push(record);
        sort_by_period(&mut self.records);
    }

    /// Bills sorted by period start, undated bills last.
    pub fn records(&self) -> &[BillRecord] {
        &self.records
    }

    /// Rebuild the chart set from the current bills, replacing the old one.
    pub fn render(&mut self) -> Result<&ChartSet, ExportError> {
        let chart = build_series(&self.records, &self.export.date_format)?;
        if self.chart.is_some() {
            debug!("Replacing chart set with {} bills", chart.len());
        }
        let chart = self.chart.insert(chart);
        Ok(&*chart)
    }

    /// Chart set from the last [`render`](Self::render), if any.
    pub fn chart(&self) -> Option<&ChartSet> {
        self.chart.as_ref()
    }

    /// Render the current bills as CSV.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        to_csv(&self.records, &self.export)
    }

    /// Drop every bill and the chart set.
    pub fn clear(&mut self) {
        info!("Clearing session with {} bills", self.records.len());
        self.records.clear();
        self.chart = None;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for BillSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const FEB_BILL: &str = "ELECTRICITY ( Period 18/02/2025 to 18/03/2025 ) \
        Consumption 700.000 kWh (1) 600.0 kWh @ R 2.9870 (2) 100.0 kWh @ R 4.1338";
    const JAN_BILL: &str = "ELECTRICITY ( Period 18/01/2025 to 18/02/2025 ) \
        Consumption 889.000 kWh (1) 631.2330 kWh @ R 2.9870";

    #[test]
    fn test_ingest_keeps_period_order() {
        let mut session = BillSession::new();
        session.ingest("feb.pdf", FEB_BILL);
        session.ingest("undated.pdf", "nothing useful");
        session.ingest("jan.pdf", JAN_BILL);

        let names: Vec<&str> = session.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["jan.pdf", "feb.pdf", "undated.pdf"]);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_render_replaces_chart() {
        let mut session = BillSession::new();
        assert!(session.chart().is_none());

        session.ingest("jan.pdf", JAN_BILL);
        assert_eq!(session.render().unwrap().len(), 1);

        session.ingest("feb.pdf", FEB_BILL);
        let chart = session.render().unwrap();
        assert_eq!(chart.labels, vec!["2025-01-18", "2025-02-18"]);
        assert_eq!(chart.tiers.len(), 2);
        assert_eq!(session.chart().unwrap().len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut session = BillSession::new();
        session.ingest("jan.pdf", JAN_BILL);
        session.render().unwrap();

        session.clear();
        assert!(session.is_empty());
        assert!(session.chart().is_none());
    }

    #[test]
    fn test_session_csv() {
        let mut session = BillSession::new();
        session.ingest("jan.pdf", JAN_BILL);

        let mut extra = BillRecord::new("manual.csv");
        extra.period_start = NaiveDate::from_ymd_opt(2024, 12, 1);
        session.extend([extra]);

        let csv = session.to_csv().unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"manual.csv\""));
    }
}
