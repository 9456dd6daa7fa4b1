//! Process command - batch-extract contribution records to one CSV.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{StreamExt, stream};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use untcc_core::models::record::ContributionRecord;
use untcc_core::pipeline::{BatchSummary, DocumentOutcome, sort_records};
use untcc_core::PopplerExtractor;

use super::{discover_reports, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input directory containing report PDFs (default from config)
    input: Option<PathBuf>,

    /// Output CSV path (default: <output_dir>/contributions_<timestamp>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process at most this many files
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Converter binary name or path
    #[arg(long)]
    tool: Option<String>,

    /// Per-document conversion deadline in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(tool) = args.tool {
        config.converter.tool = tool;
    }
    if let Some(timeout) = args.timeout {
        config.converter.timeout_secs = timeout;
    }
    if let Some(jobs) = args.jobs {
        config.batch.jobs = jobs;
    }

    let input_dir = args.input.unwrap_or_else(|| config.batch.input_dir.clone());
    let files = discover_reports(&input_dir, args.limit)?;

    // The only fatal condition: nothing to process at all.
    if files.is_empty() {
        anyhow::bail!("no PDF documents found in {}", input_dir.display());
    }

    println!(
        "{} Found {} reports in {}",
        style("ℹ").blue(),
        files.len(),
        input_dir.display()
    );

    let extractor = Arc::new(PopplerExtractor::new(&config.converter));
    let jobs = config.batch.jobs.max(1);
    let total = files.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Per-document work is independent; conversion spawns one external
    // process per document, so the pool is bounded by `jobs`.
    let outcomes: Vec<DocumentOutcome> = stream::iter(files)
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            let pb = pb.clone();
            async move {
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();

                let outcome = match tokio::task::spawn_blocking(move || {
                    DocumentOutcome::capture(extractor.as_ref(), &path)
                })
                .await
                {
                    Ok(outcome) => outcome,
                    Err(e) => DocumentOutcome {
                        filename,
                        records: Vec::new(),
                        error: Some(format!("worker failed: {e}")),
                    },
                };

                match &outcome.error {
                    None => pb.println(format!(
                        "  {} {}: {} records",
                        style("✓").green(),
                        outcome.filename,
                        outcome.records.len()
                    )),
                    Some(err) => pb.println(format!(
                        "  {} {}: {}",
                        style("✗").red(),
                        outcome.filename,
                        err
                    )),
                }
                pb.inc(1);
                outcome
            }
        })
        .buffer_unordered(jobs)
        .collect()
        .await;

    pb.finish_with_message("Complete");

    let mut records: Vec<ContributionRecord> = Vec::new();
    let mut failed: Vec<(String, String)> = Vec::new();
    for outcome in outcomes {
        match outcome.error {
            Some(err) => failed.push((outcome.filename, err)),
            None => records.extend(outcome.records),
        }
    }

    sort_records(&mut records);
    let summary = BatchSummary::compute(&records, total - failed.len(), failed.len());

    // The output file is only written once the whole batch is done.
    let output_path = match args.output {
        Some(path) => path,
        None => {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            config
                .output
                .output_dir
                .join(format!("contributions_{stamp}.csv"))
        }
    };
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    write_contributions_csv(&output_path, &records)?;
    debug!("wrote {}", output_path.display());

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        total,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(summary.files_processed).green(),
        style(summary.files_errored).red()
    );
    println!(
        "   {} records written to {}",
        summary.records,
        output_path.display()
    );
    if let Some(((from_y, from_m), (to_y, to_m))) = summary.date_range {
        println!("   Date range: {from_y}-{from_m:02} to {to_y}-{to_m:02}");
    }
    println!(
        "   {} countries, {} missions",
        summary.distinct_countries, summary.distinct_missions
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (filename, err) in &failed {
            println!("  - {}: {}", filename, err);
        }
    }

    Ok(())
}

fn write_contributions_csv(
    path: &Path,
    records: &[ContributionRecord],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "Year",
        "Month",
        "Mission",
        "Country",
        "Personnel_Type",
        "Male",
        "Female",
        "Total",
    ])?;

    for record in records {
        wtr.write_record([
            record.year.to_string(),
            record.month.to_string(),
            record.mission.clone(),
            record.country.clone(),
            record.personnel_type.as_str().to_string(),
            record.male.to_string(),
            record.female.to_string(),
            record.total.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
