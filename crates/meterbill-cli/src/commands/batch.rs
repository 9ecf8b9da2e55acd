//! Batch processing command for multiple bill files.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use meterbill_core::bill::{BillTextExtractor, ExtractionResult};
use meterbill_core::models::bill::BillRecord;
use meterbill_core::models::config::MeterbillConfig;
use meterbill_core::source::is_supported;
use meterbill_core::{load_text, BillSession};

use super::process::file_name;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write chart series as JSON
    #[arg(long)]
    chart: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Stop with an error, writing nothing, if any file fails
    #[arg(long)]
    fail_fast: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    outcome: Outcome,
    processing_time_ms: u64,
}

enum Outcome {
    Extracted(ExtractionResult),
    Failed(String),
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = MeterbillConfig::load_or_default(config_path.map(Path::new))?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = BillTextExtractor::new().with_record_logging(config.extraction.log_records);
    let worker_config = config.clone();
    let results = process_files(files, args.jobs, &pb, move |path| {
        process_file(path, &worker_config, &parser)
    })
    .await?;
    pb.finish_with_message("Complete");

    let failed: Vec<&ProcessResult> = results
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Failed(_)))
        .collect();

    if !failed.is_empty() && args.fail_fast {
        for result in &failed {
            if let Outcome::Failed(msg) = &result.outcome {
                error!("Failed to process {}: {}", result.path.display(), msg);
            }
        }
        anyhow::bail!("Processing failed for {} file(s)", failed.len());
    }

    let mut skipped = Vec::new();
    let mut records = Vec::new();

    for result in &results {
        match &result.outcome {
            Outcome::Extracted(extraction) => {
                if config.extraction.skip_empty && !extraction.record.has_usage() {
                    warn!("No relevant data found in {}", result.path.display());
                    skipped.push(result);
                } else {
                    debug!(
                        "{} extracted in {}ms",
                        result.path.display(),
                        result.processing_time_ms
                    );
                    records.push(extraction.record.clone());
                }
            }
            Outcome::Failed(msg) => {
                warn!("Failed to process {}: {}", result.path.display(), msg);
            }
        }
    }

    let mut session = BillSession::with_config(&config);
    session.extend(records);

    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let csv_path = output_dir.join(&config.export.csv_filename);
    fs::write(&csv_path, session.to_csv()?)?;
    println!(
        "{} CSV written to {}",
        style("✓").green(),
        csv_path.display()
    );

    if args.chart {
        let chart_path = output_dir.join(&config.export.chart_filename);
        let chart = session.render()?;
        fs::write(&chart_path, serde_json::to_string_pretty(chart)?)?;
        println!(
            "{} Chart series written to {}",
            style("✓").green(),
            chart_path.display()
        );
    }

    print_summary(&results, session.records(), &skipped, &failed, start);

    Ok(())
}

/// Load and extract every file on blocking workers, at most `jobs` at once.
///
/// A failure, panics included, is recorded against its file and never stops
/// the others. Results come back in input order.
async fn process_files<F>(
    files: Vec<PathBuf>,
    jobs: usize,
    pb: &ProgressBar,
    work: F,
) -> anyhow::Result<Vec<ProcessResult>>
where
    F: Fn(&Path) -> Outcome + Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let work = Arc::new(work);

    let mut slots: Vec<Option<ProcessResult>> = files.iter().map(|_| None).collect();
    let mut tasks = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let work = Arc::clone(&work);

        tasks.spawn_blocking(move || {
            let file_start = Instant::now();
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| (*work)(path.as_path()))) {
                Ok(outcome) => outcome,
                Err(payload) => {
                    Outcome::Failed(format!("extraction panicked: {}", panic_message(&*payload)))
                }
            };
            drop(permit);

            let result = ProcessResult {
                path,
                outcome,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            };
            (index, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => warn!("Worker task failed: {}", e),
        }
        pb.inc(1);
    }

    let results: Vec<ProcessResult> = slots
        .into_iter()
        .zip(files)
        .map(|(slot, path)| {
            slot.unwrap_or_else(|| ProcessResult {
                path,
                outcome: Outcome::Failed("worker task did not complete".to_string()),
                processing_time_ms: 0,
            })
        })
        .collect();

    info!("Extracted {} files", results.len());
    Ok(results)
}

fn process_file(path: &Path, config: &MeterbillConfig, parser: &BillTextExtractor) -> Outcome {
    match load_text(path, config) {
        Ok(text) => Outcome::Extracted(parser.extract_with_report(&file_name(path), &text)),
        Err(e) => Outcome::Failed(e.to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn print_summary(
    results: &[ProcessResult],
    records: &[BillRecord],
    skipped: &[&ProcessResult],
    failed: &[&ProcessResult],
    start: Instant,
) {
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} exported, {} skipped, {} failed",
        style(records.len()).green(),
        style(skipped.len()).yellow(),
        style(failed.len()).red()
    );

    let undated = records.iter().filter(|r| r.period_start.is_none()).count();
    if undated > 0 {
        println!(
            "   {} bill(s) without an electricity period were placed last",
            style(undated).yellow()
        );
    }

    if !skipped.is_empty() {
        println!();
        println!("{}", style("Skipped files (no consumption or tiers):").yellow());
        for result in skipped {
            println!("  - {}", result.path.display());
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in failed {
            if let Outcome::Failed(msg) = &result.outcome {
                println!("  - {}: {}", result.path.display(), msg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill_paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[tokio::test]
    async fn test_panicking_file_is_recorded_as_failure() {
        let files = bill_paths(&["a.txt", "boom.txt", "c.txt"]);

        let results = process_files(files, 2, &ProgressBar::hidden(), |path| {
            if path.ends_with("boom.txt") {
                panic!("malformed stream");
            }
            Outcome::Failed(format!("missing {}", path.display()))
        })
        .await
        .unwrap();

        let paths: Vec<&Path> = results.iter().map(|r| r.path.as_path()).collect();
        assert_eq!(paths, vec![Path::new("a.txt"), Path::new("boom.txt"), Path::new("c.txt")]);

        match &results[1].outcome {
            Outcome::Failed(msg) => assert!(msg.contains("malformed stream")),
            Outcome::Extracted(_) => panic!("expected a failure"),
        }
        assert!(matches!(&results[2].outcome, Outcome::Failed(msg) if msg == "missing c.txt"));
    }

    #[tokio::test]
    async fn test_results_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let names = ["one.txt", "two.txt", "three.txt", "four.txt"];
        let files: Vec<PathBuf> = names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, "Consumption 889.000 kWh").unwrap();
                path
            })
            .collect();

        let config = MeterbillConfig::default();
        let parser = BillTextExtractor::new();
        let results = process_files(files.clone(), 3, &ProgressBar::hidden(), move |path| {
            process_file(path, &config, &parser)
        })
        .await
        .unwrap();

        let paths: Vec<PathBuf> = results.iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, files);
        assert!(results.iter().all(|r| matches!(r.outcome, Outcome::Extracted(_))));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(&*payload), "static message");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(&*payload), "owned message");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(&*payload), "unknown panic");
    }
}
