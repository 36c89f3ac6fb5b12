//! Summary report assembly and rendering.
//!
//! [`SummaryReport::build`] runs each aggregation once and freezes the
//! results into a fixed-shape record; `generator` renders that record to
//! the JSON and text artifacts.

pub mod generator;

pub use generator::*;

use crate::analysis::{self, AnalysisError};
use crate::models::{
    AgeBandRecord, CategoryRecord, format_count, PopulationReference, RegionRecord,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How many ranked categories the report names.
const TOP_CATEGORIES: usize = 3;

/// Metadata about the report run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the tool that produced it.
    pub tool_version: String,
}

/// Headline figures for the reporting year.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub year: u16,
    pub total_cases: u64,
    pub category_count: usize,
    pub region_count: usize,
}

/// Gender counts and percentage split.
#[derive(Debug, Clone, Serialize)]
pub struct GenderSection {
    pub male_cases: u64,
    pub female_cases: u64,
    /// Formatted with one decimal and a trailing percent sign ("52.0%").
    pub male_pct: String,
    pub female_pct: String,
}

/// One entry of the ranked category list.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCategory {
    /// 1-based rank.
    pub rank: usize,
    pub category: String,
    pub cases: u64,
    /// Display label ("대장암 (33,158건)").
    pub label: String,
}

/// The age-band highlight.
#[derive(Debug, Clone, Serialize)]
pub struct AgeSection {
    /// Total cases across the age table.
    pub total_cases: u64,
    /// Label of the highest-count band.
    pub top_band: String,
    pub top_band_cases: u64,
    /// Formatted count for the highest band ("45,678건").
    pub top_band_label: String,
}

/// The regional-rate highlight.
#[derive(Debug, Clone, Serialize)]
pub struct RegionSection {
    /// Region with the highest per-100k rate.
    pub top_region: String,
    pub top_rate_per_100k: f64,
    /// Formatted rate ("260.47명/10만명").
    pub top_rate_label: String,
}

/// The complete summary report, immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub metadata: ReportMetadata,
    pub overview: Overview,
    pub gender: GenderSection,
    pub top_categories: Vec<RankedCategory>,
    pub age: AgeSection,
    pub region: RegionSection,
}

impl SummaryReport {
    /// Runs every aggregation once over the three tables and assembles the
    /// report. Aggregation errors propagate unchanged; the report either
    /// builds completely or not at all.
    pub fn build(
        categories: &[CategoryRecord],
        age_bands: &[AgeBandRecord],
        regions: &[RegionRecord],
        population: &PopulationReference,
        year: u16,
    ) -> Result<Self, AnalysisError> {
        let gender = analysis::gender_distribution(categories)?;
        let ranked = analysis::top_categories(categories, TOP_CATEGORIES)?;
        let ages = analysis::age_distribution(age_bands)?;
        let rates = analysis::regional_rates(regions, population)?;

        let top_band = ages
            .top_risk
            .first()
            .ok_or(AnalysisError::EmptyInput { table: "age band" })?;
        let top_region = rates
            .top_by_rate
            .first()
            .ok_or(AnalysisError::EmptyInput { table: "region" })?;

        Ok(Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            overview: Overview {
                year,
                total_cases: categories.iter().map(|r| r.total).sum(),
                category_count: categories.len(),
                region_count: regions.len(),
            },
            gender: GenderSection {
                male_cases: gender.male_total,
                female_cases: gender.female_total,
                male_pct: format!("{:.1}%", gender.male_pct),
                female_pct: format!("{:.1}%", gender.female_pct),
            },
            top_categories: ranked
                .iter()
                .enumerate()
                .map(|(i, r)| RankedCategory {
                    rank: i + 1,
                    category: r.category.clone(),
                    cases: r.total,
                    label: format!("{} ({}건)", r.category, format_count(r.total)),
                })
                .collect(),
            age: AgeSection {
                total_cases: ages.total_cases,
                top_band: top_band.age_band.clone(),
                top_band_cases: top_band.count,
                top_band_label: format!("{}건", format_count(top_band.count)),
            },
            region: RegionSection {
                top_region: top_region.region.clone(),
                top_rate_per_100k: top_region.rate_per_100k,
                top_rate_label: format!("{:.2}명/10만명", top_region.rate_per_100k),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::reference;

    #[test]
    fn test_build_on_reference_tables() {
        let report = SummaryReport::build(
            &reference::categories(),
            &reference::age_bands(),
            &reference::regions(),
            &reference::population(),
            2020,
        )
        .unwrap();

        assert_eq!(report.overview.year, 2020);
        assert_eq!(report.overview.total_cases, 193_482);
        assert_eq!(report.overview.category_count, 8);
        assert_eq!(report.overview.region_count, 17);

        assert_eq!(report.gender.male_cases, 100_534);
        assert_eq!(report.gender.female_cases, 92_948);
        assert_eq!(report.gender.male_pct, "52.0%");
        assert_eq!(report.gender.female_pct, "48.0%");

        let labels: Vec<&str> = report
            .top_categories
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["대장암 (33,158건)", "폐암 (32,313건)", "유방암 (29,514건)"]
        );

        assert_eq!(report.age.total_cases, 149_434);
        assert_eq!(report.age.top_band, "60-69세");
        assert_eq!(report.age.top_band_label, "45,678건");

        assert_eq!(report.region.top_region, "대전광역시");
        assert!(report.region.top_rate_label.ends_with("명/10만명"));
    }

    #[test]
    fn test_build_propagates_unknown_region() {
        let regions = vec![crate::models::RegionRecord::new("Atlantis", 100)];

        let result = SummaryReport::build(
            &reference::categories(),
            &reference::age_bands(),
            &regions,
            &reference::population(),
            2020,
        );

        assert_eq!(
            result.err(),
            Some(AnalysisError::UnknownRegion {
                region: "Atlantis".to_string()
            })
        );
    }

    #[test]
    fn test_build_fails_atomically_on_empty_table() {
        let result = SummaryReport::build(
            &[],
            &reference::age_bands(),
            &reference::regions(),
            &reference::population(),
            2020,
        );

        assert!(matches!(result, Err(AnalysisError::EmptyInput { .. })));
    }
}
