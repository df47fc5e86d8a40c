// docsum CLI - summarize one or more PDFs, one document per worker
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

use docsum::config::AppConfig;
use docsum::report;
use docsum::{Pipeline, PipelineOutput};

#[derive(Parser, Debug)]
#[command(name = "docsum", version, about = "Local PDF summarizer with layered text extraction")]
struct Cli {
    /// PDF files to summarize
    #[arg(required = true)]
    pdfs: Vec<PathBuf>,

    /// Directory for the .summary.txt / .summary.json reports
    #[arg(long, default_value = "outputs/summaries")]
    out_dir: PathBuf,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the native text layer tier
    #[arg(long)]
    no_native: bool,

    /// Skip the pdftotext layout tier
    #[arg(long)]
    no_layout: bool,

    /// Disable OCR salvage of near-empty pages
    #[arg(long)]
    no_ocr: bool,

    /// Print results without writing report files
    #[arg(long)]
    no_write: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading config")?;
    config.extraction.native &= !cli.no_native;
    config.extraction.layout &= !cli.no_layout;
    config.extraction.optical &= !cli.no_ocr;

    let pipeline = Arc::new(Pipeline::from_config(&config)?);
    let out_dir = Arc::new(cli.out_dir);
    let write = !cli.no_write;

    // Documents are independent; parallelize across them, never within one
    let handles: Vec<_> = cli
        .pdfs
        .into_iter()
        .map(|pdf| {
            let pipeline = Arc::clone(&pipeline);
            let out_dir = Arc::clone(&out_dir);
            tokio::task::spawn_blocking(move || process(&pipeline, &out_dir, pdf, write))
        })
        .collect();

    let mut failures = 0;
    for outcome in join_all(handles).await {
        match outcome {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(e) => {
                eprintln!("❌ {:#}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} document(s) failed", failures);
    }
    Ok(())
}

/// Wait for every worker in spawn order. A panicked worker becomes one failed
/// outcome instead of aborting the rest.
async fn join_all(handles: Vec<JoinHandle<Result<serde_json::Value>>>) -> Vec<Result<serde_json::Value>> {
    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(anyhow::anyhow!("worker crashed: {}", e)),
        });
    }
    outcomes
}

fn process(pipeline: &Pipeline, out_dir: &std::path::Path, pdf: PathBuf, write: bool) -> Result<serde_json::Value> {
    let output: PipelineOutput = pipeline
        .run(&pdf)
        .with_context(|| format!("summarizing {}", pdf.display()))?;

    let (summary_txt, summary_json) = if write {
        let paths = report::write_reports(out_dir, &output.document_id, &output.result)
            .with_context(|| format!("writing reports to {}", out_dir.display()))?;
        log::info!("✅ wrote {}", paths.summary_txt.display());
        (Some(paths.summary_txt), Some(paths.summary_json))
    } else {
        (None, None)
    };

    Ok(json!({
        "pdf": pdf,
        "summary_txt": summary_txt,
        "summary_json": summary_json,
        "summary": output.result.summary,
        "key_points": output.result.key_points,
    }))
}
