//! Classify command - survey report layouts into a classification CSV.
//!
//! Diagnostic companion to `process`: it runs the layout classifier, not
//! the extraction dispatch, and the two may disagree on some documents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{StreamExt, stream};
use indicatif::{ProgressBar, ProgressStyle};

use untcc_core::layout::{LayoutClassification, classify_layout};
use untcc_core::pdf::TextExtractor;
use untcc_core::PopplerExtractor;

use super::{discover_reports, load_config};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Input directory containing report PDFs (default from config)
    input: Option<PathBuf>,

    /// Output CSV path (default: <output_dir>/layout_survey_<timestamp>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Classify at most this many files
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

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
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

    if files.is_empty() {
        anyhow::bail!("no PDF documents found in {}", input_dir.display());
    }

    println!(
        "{} Classifying {} reports in {}",
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

    let mut rows: Vec<LayoutClassification> = stream::iter(files)
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            let pb = pb.clone();
            async move {
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();

                let row = match tokio::task::spawn_blocking(move || classify_one(&*extractor, &path))
                    .await
                {
                    Ok(row) => row,
                    Err(e) => {
                        LayoutClassification::error(&filename, &format!("worker failed: {e}"))
                    }
                };
                pb.println(format!("  {}: {}", row.filename, row.layout));
                pb.inc(1);
                row
            }
        })
        .buffer_unordered(jobs)
        .collect()
        .await;

    pb.finish_with_message("Complete");

    // Stable report order regardless of worker completion order.
    rows.sort_by(|a, b| a.filename.cmp(&b.filename));

    let output_path = match args.output {
        Some(path) => path,
        None => {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            config
                .output
                .output_dir
                .join(format!("layout_survey_{stamp}.csv"))
        }
    };
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    write_classification_csv(&output_path, &rows)?;

    let mut by_layout: BTreeMap<&'static str, usize> = BTreeMap::new();
    for row in &rows {
        *by_layout.entry(row.layout.as_str()).or_default() += 1;
    }

    println!();
    println!(
        "{} Classified {} files in {:?}",
        style("✓").green(),
        total,
        start.elapsed()
    );
    for (layout, count) in &by_layout {
        println!("   {:>20}: {}", layout, count);
    }
    println!(
        "{} Survey written to {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// Classify one document; extraction failure becomes a layout `error` row
/// rather than aborting the survey.
fn classify_one(extractor: &dyn TextExtractor, path: &Path) -> LayoutClassification {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    match extractor.extract_lines(path) {
        Ok(lines) => classify_layout(filename, &lines, None),
        Err(e) => LayoutClassification::error(filename, &e.to_string()),
    }
}

fn write_classification_csv(
    path: &Path,
    rows: &[LayoutClassification],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "layout",
        "report_date",
        "sample_header_line",
        "notes",
    ])?;

    for row in rows {
        wtr.write_record([
            row.filename.as_str(),
            row.layout.as_str(),
            row.report_date.as_deref().unwrap_or_default(),
            row.sample_header_line.as_str(),
            row.notes.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
