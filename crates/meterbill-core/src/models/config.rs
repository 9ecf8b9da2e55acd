//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the meterbill pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterbillConfig {
    /// PDF text intake configuration.
    pub pdf: PdfConfig,

    /// Bill extraction configuration.
    pub extraction: ExtractionConfig,

    /// CSV and chart export configuration.
    pub export: ExportConfig,
}

/// PDF text intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Text shorter than this is reported as a likely scanned document.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 50,
        }
    }
}

/// Bill extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Leave bills with neither consumption nor tiers out of batch output.
    pub skip_empty: bool,

    /// Log every extracted record at debug level.
    pub log_records: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            skip_empty: false,
            log_records: true,
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name for the CSV export.
    pub csv_filename: String,

    /// strftime format used for dates in CSV cells and chart labels.
    pub date_format: String,

    /// File name for the chart-series JSON export.
    pub chart_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_filename: "electricity_bills.csv".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            chart_filename: "electricity_charts.json".to_string(),
        }
    }
}

impl MeterbillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&std::path::Path>) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MeterbillConfig =
            serde_json::from_str(r#"{ "extraction": { "skip_empty": true } }"#).unwrap();

        assert!(config.extraction.skip_empty);
        assert!(config.extraction.log_records);
        assert_eq!(config.export.csv_filename, "electricity_bills.csv");
        assert_eq!(config.pdf.min_text_length, 50);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = MeterbillConfig::default();
        config.export.date_format = "%d/%m/%Y".to_string();
        config.save(&path).unwrap();

        let loaded = MeterbillConfig::from_file(&path).unwrap();
        assert_eq!(loaded.export.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MeterbillConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
