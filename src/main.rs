use anyhow::{Context, Result};
use clap::Parser;
use resultscraper::{
    aggregate::{Aggregator, Table},
    enumerate, export, fetch,
    report::BatchReport,
    roster,
};
use std::{fs, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "resultscraper")]
#[command(about = "Scrape a results portal and consolidate grades into one workbook")]
struct Cli {
    /// Exam identifier the portal uses in its results-page URL
    #[arg(long)]
    exam_id: String,

    /// Two-digit admission year, e.g. 22
    #[arg(long)]
    year: String,

    /// Two-digit branch code, e.g. 05
    #[arg(long)]
    branch_code: String,

    /// Highest roll index to enumerate when no roster is given
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=9999))]
    last_number: u32,

    /// Spreadsheet with a "Student ID" column, used instead of enumeration
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Directory the workbook is written into
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Optional path for a JSON batch report
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();

    // ─── 2) resolve the batch of register numbers ────────────────────
    let student_ids = match &cli.roster {
        Some(path) => {
            let ids = roster::read_student_ids(path)
                .with_context(|| format!("reading roster {}", path.display()))?;
            info!(count = ids.len(), roster = %path.display(), "register numbers from roster");
            ids
        }
        None => {
            let ids = enumerate::student_ids(&cli.year, &cli.branch_code, cli.last_number);
            info!(count = ids.len(), "register numbers enumerated");
            ids
        }
    };
    if student_ids.is_empty() {
        info!("no register numbers to query; exit");
        return Ok(());
    }

    // ─── 3) scrape each student, strictly one at a time ──────────────
    let result_url = fetch::result_url(&cli.exam_id)?;
    let mut aggregator = Aggregator::new();
    let mut report = BatchReport::new(&cli.exam_id);

    for student_id in &student_ids {
        match fetch::fetch_student(&result_url, student_id).await {
            Ok(page) => {
                report.record_success();
                aggregator.record(student_id.as_str(), page);
            }
            Err(err) => {
                error!(student = %student_id, "fetch failed: {err}");
                report.record_failure(student_id.as_str(), &err);
            }
        }
    }

    // ─── 4) consolidate into one table ───────────────────────────────
    info!(
        students = aggregator.len(),
        subjects = aggregator.subjects().count(),
        "building consolidated table"
    );
    let table = Table::build(aggregator);

    // ─── 5) write the workbook ───────────────────────────────────────
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    let out_path = cli
        .out_dir
        .join(export::workbook_filename(&cli.branch_code, &cli.year, cli.last_number));
    export::write_workbook(&table, &out_path)?;

    // ─── 6) batch report ─────────────────────────────────────────────
    if let Some(report_path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(report_path, json)
            .with_context(|| format!("writing {}", report_path.display()))?;
        info!(path = %report_path.display(), "batch report written");
    }
    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failures.len(),
        "batch complete"
    );

    Ok(())
}
