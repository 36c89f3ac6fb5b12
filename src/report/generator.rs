//! Renders a [`SummaryReport`] to its JSON and plain-text artifacts.

use super::SummaryReport;
use crate::models::format_count;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the structured JSON artifact.
pub const JSON_REPORT_FILE: &str = "cancer_analysis_report.json";
/// File name of the plain-text summary artifact.
pub const TEXT_REPORT_FILE: &str = "cancer_analysis_summary.txt";

/// Locations of the written report artifacts.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Renders the five-section plain-text summary.
pub fn generate_text_report(report: &SummaryReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# {} Korean Cancer Incidence Report\n\n",
        report.overview.year
    ));
    output.push_str(&format!(
        "Generated: {}\n\n",
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output.push_str(&overview_section(report));
    output.push_str(&gender_section(report));
    output.push_str(&categories_section(report));
    output.push_str(&age_section(report));
    output.push_str(&region_section(report));

    output
}

fn overview_section(report: &SummaryReport) -> String {
    let mut section = String::new();
    section.push_str("## Overview\n\n");
    section.push_str(&format!("- Reporting year: {}\n", report.overview.year));
    section.push_str(&format!(
        "- Total reported cases: {}건\n",
        format_count(report.overview.total_cases)
    ));
    section.push_str(&format!(
        "- Cancer categories: {}\n",
        report.overview.category_count
    ));
    section.push_str(&format!(
        "- Regions covered: {}\n\n",
        report.overview.region_count
    ));
    section
}

fn gender_section(report: &SummaryReport) -> String {
    let mut section = String::new();
    section.push_str("## Gender Breakdown\n\n");
    section.push_str(&format!(
        "- Male: {}건 ({})\n",
        format_count(report.gender.male_cases),
        report.gender.male_pct
    ));
    section.push_str(&format!(
        "- Female: {}건 ({})\n\n",
        format_count(report.gender.female_cases),
        report.gender.female_pct
    ));
    section
}

fn categories_section(report: &SummaryReport) -> String {
    let mut section = String::new();
    section.push_str("## Top Cancer Categories\n\n");
    for entry in &report.top_categories {
        section.push_str(&format!("{}. {}\n", entry.rank, entry.label));
    }
    section.push('\n');
    section
}

fn age_section(report: &SummaryReport) -> String {
    let mut section = String::new();
    section.push_str("## Age Profile\n\n");
    section.push_str(&format!(
        "- Cases across age bands: {}건\n",
        format_count(report.age.total_cases)
    ));
    section.push_str(&format!(
        "- Highest-risk band: {} ({})\n\n",
        report.age.top_band, report.age.top_band_label
    ));
    section
}

fn region_section(report: &SummaryReport) -> String {
    let mut section = String::new();
    section.push_str("## Regional Incidence\n\n");
    section.push_str(&format!(
        "- Highest rate: {} ({})\n",
        report.region.top_region, report.region.top_rate_label
    ));
    section
}

/// Serializes the report to pretty-printed JSON with stable key names.
pub fn generate_json_report(report: &SummaryReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Writes both artifacts under `reports_dir`, creating it if needed.
pub fn save_reports(report: &SummaryReport, reports_dir: &Path) -> Result<ReportPaths> {
    fs::create_dir_all(reports_dir).with_context(|| {
        format!(
            "Failed to create reports directory: {}",
            reports_dir.display()
        )
    })?;

    let json_path = reports_dir.join(JSON_REPORT_FILE);
    save_report(&generate_json_report(report)?, &json_path)?;

    let text_path = reports_dir.join(TEXT_REPORT_FILE);
    save_report(&generate_text_report(report), &text_path)?;

    Ok(ReportPaths {
        json: json_path,
        text: text_path,
    })
}

/// Saves one rendered artifact to disk.
pub fn save_report(content: &str, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;

    Ok(())
}
