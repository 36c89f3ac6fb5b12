//! Chart rendering: four standalone SVG charts plus the HTML dashboard.
//!
//! Charts aggregate the tables themselves rather than reading the summary
//! report, so a chart set can be rendered from any dataset snapshot. The
//! dashboard additionally embeds the report's headline figures.

pub mod dashboard;
pub mod svg;

pub use dashboard::DashboardCharts;

use crate::analysis;
use crate::models::{Dataset, PopulationReference};
use crate::report::SummaryReport;
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TYPE_CHART_FILE: &str = "cancer_by_type.svg";
pub const GENDER_CHART_FILE: &str = "gender_distribution.svg";
pub const AGE_CHART_FILE: &str = "age_distribution.svg";
pub const REGION_CHART_FILE: &str = "regional_distribution.svg";
pub const DASHBOARD_FILE: &str = "dashboard.html";

/// How many categories the grouped bar chart shows.
const CHART_CATEGORIES: usize = 8;

/// Renders every chart artifact into `charts_dir`, creating it if needed.
/// Returns the written paths, dashboard last.
pub fn render_all(
    dataset: &Dataset,
    population: &PopulationReference,
    report: &SummaryReport,
    charts_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let gender = analysis::gender_distribution(&dataset.categories)?;
    let top = analysis::top_categories(&dataset.categories, CHART_CATEGORIES)?;
    let ages = analysis::age_distribution(&dataset.age_bands)?;
    let rates = analysis::regional_rates(&dataset.regions, population)?;

    let mut by_rate = rates.regions.clone();
    by_rate.sort_by(|a, b| {
        b.rate_per_100k
            .partial_cmp(&a.rate_per_100k)
            .unwrap_or(Ordering::Equal)
    });

    let charts = DashboardCharts {
        by_category: svg::grouped_gender_bars("Cancer Incidence by Category and Gender", &top),
        gender: svg::gender_donut("Gender Distribution", &gender),
        age: svg::age_bars_with_cumulative("Incidence by Age Band", &ages),
        regional: svg::regional_rate_bars("Incidence Rate per 100,000 by Region", &by_rate),
    };

    fs::create_dir_all(charts_dir).with_context(|| {
        format!(
            "Failed to create charts directory: {}",
            charts_dir.display()
        )
    })?;

    let artifacts = [
        (TYPE_CHART_FILE, charts.by_category.as_str()),
        (GENDER_CHART_FILE, charts.gender.as_str()),
        (AGE_CHART_FILE, charts.age.as_str()),
        (REGION_CHART_FILE, charts.regional.as_str()),
    ];

    let mut paths = Vec::new();
    for (name, content) in artifacts {
        let path = charts_dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write chart: {}", path.display()))?;
        debug!("Wrote chart {}", path.display());
        paths.push(path);
    }

    let dashboard_path = charts_dir.join(DASHBOARD_FILE);
    fs::write(
        &dashboard_path,
        dashboard::render_dashboard(report, &rates, &charts),
    )
    .with_context(|| format!("Failed to write dashboard: {}", dashboard_path.display()))?;
    paths.push(dashboard_path);

    info!("Rendered {} chart artifacts", paths.len());

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::reference;

    fn reference_dataset() -> Dataset {
        Dataset {
            year: 2020,
            categories: reference::categories(),
            age_bands: reference::age_bands(),
            regions: reference::regions(),
        }
    }

    fn reference_report() -> SummaryReport {
        SummaryReport::build(
            &reference::categories(),
            &reference::age_bands(),
            &reference::regions(),
            &reference::population(),
            2020,
        )
        .unwrap()
    }

    #[test]
    fn test_render_all_writes_five_artifacts() {
        let dir = tempfile::tempdir().unwrap();

        let paths = render_all(
            &reference_dataset(),
            &reference::population(),
            &reference_report(),
            dir.path(),
        )
        .unwrap();

        assert_eq!(paths.len(), 5);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(paths[4].ends_with(DASHBOARD_FILE));

        let dashboard = fs::read_to_string(&paths[4]).unwrap();
        assert!(dashboard.contains("<svg"));
        assert!(dashboard.contains("서울특별시"));
    }

    #[test]
    fn test_render_all_rejects_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset {
            categories: Vec::new(),
            ..reference_dataset()
        };

        let result = render_all(
            &dataset,
            &reference::population(),
            &reference_report(),
            dir.path(),
        );

        assert!(result.is_err());
    }
}
