// Text and JSON summary reports
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::SummaryResult;

const TITLE_SUFFIX: &str = " — Summary";

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    company: &'a str,
    summary: &'a str,
    key_points: &'a [String],
}

/// Where `write_reports` put the two files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPaths {
    pub summary_txt: PathBuf,
    pub summary_json: PathBuf,
}

pub fn render_text(stem: &str, result: &SummaryResult) -> String {
    let title = format!("{stem}{TITLE_SUFFIX}");
    let mut out = String::new();
    out.push_str(&title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");

    out.push_str("Summary\n-------\n");
    out.push_str(result.summary.trim());
    out.push_str("\n\n");

    out.push_str("Key Points\n----------\n");
    for (i, point) in result.key_points.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, point));
    }
    out.push('\n');
    out
}

pub fn render_json(stem: &str, result: &SummaryResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        company: stem,
        summary: &result.summary,
        key_points: &result.key_points,
    })
}

/// Write `<stem>.summary.txt` and `<stem>.summary.json` under `out_dir`.
pub fn write_reports(out_dir: &Path, stem: &str, result: &SummaryResult) -> io::Result<ReportPaths> {
    fs::create_dir_all(out_dir)?;
    let paths = ReportPaths {
        summary_txt: out_dir.join(format!("{stem}.summary.txt")),
        summary_json: out_dir.join(format!("{stem}.summary.json")),
    };
    fs::write(&paths.summary_txt, render_text(stem, result))?;
    fs::write(&paths.summary_json, render_json(stem, result)?)?;
    log::debug!("wrote {} and {}", paths.summary_txt.display(), paths.summary_json.display());
    Ok(paths)
}
