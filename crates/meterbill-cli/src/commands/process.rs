//! Process command - extract data from a single bill file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info};

use meterbill_core::bill::{BillParser, BillTextExtractor};
use meterbill_core::export::{format_date, format_decimal};
use meterbill_core::models::bill::BillRecord;
use meterbill_core::models::config::{ExportConfig, MeterbillConfig};
use meterbill_core::{load_text, to_csv};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or extracted .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that could not be found
    #[arg(long)]
    show_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = MeterbillConfig::load_or_default(config_path.map(Path::new))?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = load_text(&args.input, &config)?;
    let name = file_name(&args.input);

    let parser = BillTextExtractor::new().with_record_logging(config.extraction.log_records);
    let result = parser.parse(&name, &text);

    let output = format_record(&result.record, args.format, &config.export)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing {
        eprintln!();
        if result.missing_fields.is_empty() {
            eprintln!("{} All fields found", style("ℹ").blue());
        } else {
            eprintln!(
                "{} Missing fields: {}",
                style("ℹ").blue(),
                result.missing_fields.join(", ")
            );
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Bill name as shown in outputs: the file name without directories.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

fn format_record(
    record: &BillRecord,
    format: OutputFormat,
    export: &ExportConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => Ok(to_csv(std::slice::from_ref(record), export)?),
        OutputFormat::Text => format_text(record, &export.date_format),
    }
}

fn format_text(record: &BillRecord, date_format: &str) -> anyhow::Result<String> {
    let date = |d: Option<NaiveDate>| -> anyhow::Result<String> {
        Ok(match d {
            Some(d) => format_date(d, date_format)?,
            None => "-".to_string(),
        })
    };
    let number = |v: Option<_>| v.map(format_decimal).unwrap_or_else(|| "-".to_string());

    let mut output = String::new();

    output.push_str(&format!("Bill: {}\n", record.name));
    output.push_str(&format!(
        "Period: {} to {}\n",
        date(record.period_start)?,
        date(record.period_end)?
    ));
    output.push('\n');

    output.push_str("Usage:\n");
    output.push_str(&format!("  Consumption:   {} kWh\n", number(record.total_consumption)));
    output.push_str(&format!("  Daily average: {} kWh\n", number(record.daily_average)));
    output.push('\n');

    if !record.tiers.is_empty() {
        output.push_str("Tiers:\n");
        for (i, tier) in record.tiers.iter().enumerate() {
            output.push_str(&format!(
                "  ({}) {} kWh @ R {}\n",
                i + 1,
                format_decimal(tier.kwh),
                format_decimal(tier.rate)
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("Charge: R {}\n", number(record.total_charge)));

    Ok(output)
}
