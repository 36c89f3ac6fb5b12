//! Aggregation operations over the incidence tables.
//!
//! Each operation borrows its input table, derives a fresh result struct,
//! and leaves the table untouched. Ranking ties are always broken by the
//! original table order (stable sorts only).

use crate::analysis::AnalysisError;
use crate::models::{AgeBandRecord, CategoryRecord, PopulationReference, RegionRecord};
use std::cmp::Reverse;

/// How many age bands count as the high-risk group.
const TOP_RISK_BANDS: usize = 3;

/// How many regions the rate ranking keeps.
const TOP_RATE_REGIONS: usize = 5;

/// Gender totals and percentages over the whole category table.
#[derive(Debug, Clone, PartialEq)]
pub struct GenderBreakdown {
    pub male_total: u64,
    pub female_total: u64,
    /// Male share of all cases, rounded to 1 decimal.
    pub male_pct: f64,
    /// Complement of `male_pct`, so the two always sum to 100.0.
    pub female_pct: f64,
}

/// One age band with its share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBandShare {
    pub age_band: String,
    pub count: u64,
    /// Share of `total_cases`, rounded to 2 decimals.
    pub share_pct: f64,
}

/// Age-band statistics: shares, cumulative counts, and the high-risk bands.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeProfile {
    pub total_cases: u64,
    /// Per-band shares in the table's original (ascending-age) order.
    pub bands: Vec<AgeBandShare>,
    /// Running sum of counts in the table's original order.
    pub cumulative: Vec<u64>,
    /// The 3 bands with the highest count, ties by table order.
    pub top_risk: Vec<AgeBandShare>,
}

/// One region with its population-normalized incidence rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRate {
    pub region: String,
    pub count: u64,
    pub population: u64,
    /// Cases per 100,000 residents, rounded to 2 decimals.
    pub rate_per_100k: f64,
}

/// Regional rates in input order plus the top-5 ranking by rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalRates {
    pub regions: Vec<RegionRate>,
    pub top_by_rate: Vec<RegionRate>,
}

/// Computes gender totals and percentage split over the category table.
///
/// An empty table, or one whose counts sum to zero, signals
/// [`AnalysisError::EmptyInput`] so no division by zero can occur.
pub fn gender_distribution(table: &[CategoryRecord]) -> Result<GenderBreakdown, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput {
            table: "type/gender",
        });
    }

    let male_total: u64 = table.iter().map(|r| r.male).sum();
    let female_total: u64 = table.iter().map(|r| r.female).sum();
    let combined = male_total + female_total;

    if combined == 0 {
        return Err(AnalysisError::EmptyInput {
            table: "type/gender",
        });
    }

    let male_pct = round_to(male_total as f64 / combined as f64 * 100.0, 1);

    Ok(GenderBreakdown {
        male_total,
        female_total,
        male_pct,
        female_pct: round_to(100.0 - male_pct, 1),
    })
}

/// Returns the `n` records with the largest `total`, descending.
///
/// The sort is stable, so equal totals keep their table order. Asking for
/// more records than the table holds returns all of them; a zero-row table
/// signals [`AnalysisError::EmptyInput`].
pub fn top_categories(
    table: &[CategoryRecord],
    n: usize,
) -> Result<Vec<CategoryRecord>, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput {
            table: "type/gender",
        });
    }

    let mut ranked = table.to_vec();
    ranked.sort_by_key(|r| Reverse(r.total));
    ranked.truncate(n);

    Ok(ranked)
}

/// Computes per-band shares, the cumulative curve, and the high-risk bands.
///
/// The cumulative sum runs over the table's existing order; the contract
/// assumes the input is already sorted ascending by age and never reorders
/// it. An empty or all-zero table signals [`AnalysisError::EmptyInput`].
pub fn age_distribution(table: &[AgeBandRecord]) -> Result<AgeProfile, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput { table: "age band" });
    }

    let total_cases: u64 = table.iter().map(|r| r.count).sum();
    if total_cases == 0 {
        return Err(AnalysisError::EmptyInput { table: "age band" });
    }

    let bands: Vec<AgeBandShare> = table
        .iter()
        .map(|r| AgeBandShare {
            age_band: r.age_band.clone(),
            count: r.count,
            share_pct: round_to(r.count as f64 / total_cases as f64 * 100.0, 2),
        })
        .collect();

    let mut running = 0u64;
    let cumulative: Vec<u64> = table
        .iter()
        .map(|r| {
            running += r.count;
            running
        })
        .collect();

    let mut top_risk = bands.clone();
    top_risk.sort_by_key(|b| Reverse(b.count));
    top_risk.truncate(TOP_RISK_BANDS);

    Ok(AgeProfile {
        total_cases,
        bands,
        cumulative,
        top_risk,
    })
}

/// Joins the region table against the population reference and derives
/// per-100k incidence rates, preserving input order.
///
/// A region without a population entry signals
/// [`AnalysisError::UnknownRegion`] naming it; a zero population entry is
/// treated the same, since it could only yield a meaningless rate. An empty
/// table signals [`AnalysisError::EmptyInput`]. No partial result is
/// produced on error.
pub fn regional_rates(
    table: &[RegionRecord],
    population: &PopulationReference,
) -> Result<RegionalRates, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput { table: "region" });
    }

    let mut regions = Vec::with_capacity(table.len());
    for record in table {
        let residents = match population.get(&record.region) {
            Some(p) if p > 0 => p,
            _ => {
                return Err(AnalysisError::UnknownRegion {
                    region: record.region.clone(),
                })
            }
        };

        regions.push(RegionRate {
            region: record.region.clone(),
            count: record.count,
            population: residents,
            rate_per_100k: round_to(record.count as f64 / residents as f64 * 100_000.0, 2),
        });
    }

    let mut top_by_rate = regions.clone();
    top_by_rate.sort_by(|a, b| {
        b.rate_per_100k
            .partial_cmp(&a.rate_per_100k)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_by_rate.truncate(TOP_RATE_REGIONS);

    Ok(RegionalRates {
        regions,
        top_by_rate,
    })
}

/// Rounds to the given number of decimal places, half away from zero.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_table() -> Vec<CategoryRecord> {
        vec![
            CategoryRecord::new("A", 100, 50),
            CategoryRecord::new("B", 10, 90),
        ]
    }

    fn age_table() -> Vec<AgeBandRecord> {
        vec![
            AgeBandRecord::new("0-9", 10),
            AgeBandRecord::new("10-19", 20),
            AgeBandRecord::new("20-29", 70),
        ]
    }

    fn population_of(entries: &[(&str, u64)]) -> PopulationReference {
        entries
            .iter()
            .map(|(region, count)| (region.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_gender_distribution_two_rows() {
        let breakdown = gender_distribution(&two_row_table()).unwrap();

        assert_eq!(breakdown.male_total, 110);
        assert_eq!(breakdown.female_total, 140);
        assert_eq!(breakdown.male_pct, 44.0);
        assert_eq!(breakdown.female_pct, 56.0);
    }

    #[test]
    fn test_gender_percentages_sum_to_hundred() {
        let table = vec![CategoryRecord::new("A", 1, 2)];
        let breakdown = gender_distribution(&table).unwrap();

        assert_eq!(breakdown.male_pct, 33.3);
        assert!((breakdown.male_pct + breakdown.female_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_gender_distribution_single_gender() {
        let table = vec![CategoryRecord::new("전립선암", 20754, 0)];
        let breakdown = gender_distribution(&table).unwrap();

        assert_eq!(breakdown.male_pct, 100.0);
        assert_eq!(breakdown.female_pct, 0.0);
    }

    #[test]
    fn test_gender_distribution_empty_table() {
        let result = gender_distribution(&[]);
        assert_eq!(
            result,
            Err(AnalysisError::EmptyInput {
                table: "type/gender"
            })
        );
    }

    #[test]
    fn test_gender_distribution_all_zero_counts() {
        let table = vec![CategoryRecord::new("A", 0, 0)];
        assert!(matches!(
            gender_distribution(&table),
            Err(AnalysisError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_top_categories_orders_by_total_descending() {
        let table = vec![
            CategoryRecord::new("갑상선암", 6234, 22123),
            CategoryRecord::new("폐암", 21646, 10667),
            CategoryRecord::new("대장암", 19633, 13525),
        ];

        let top = top_categories(&table, 2).unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, "대장암");
        assert_eq!(top[1].category, "폐암");
    }

    #[test]
    fn test_top_categories_ties_keep_table_order() {
        let table = vec![
            CategoryRecord::new("first", 50, 50),
            CategoryRecord::new("second", 60, 40),
            CategoryRecord::new("third", 30, 70),
        ];

        let top = top_categories(&table, 3).unwrap();

        // All totals are 100; the original order must survive the sort.
        assert_eq!(top[0].category, "first");
        assert_eq!(top[1].category, "second");
        assert_eq!(top[2].category, "third");
    }

    #[test]
    fn test_top_categories_n_beyond_len_returns_all() {
        let table = two_row_table();
        let top = top_categories(&table, 10).unwrap();

        assert_eq!(top.len(), 2);
        // Idempotent: a second call yields the same sequence.
        assert_eq!(top, top_categories(&table, 10).unwrap());
    }

    #[test]
    fn test_top_categories_empty_table() {
        assert!(matches!(
            top_categories(&[], 3),
            Err(AnalysisError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_age_distribution_scenario() {
        let profile = age_distribution(&age_table()).unwrap();

        assert_eq!(profile.total_cases, 100);
        assert_eq!(profile.cumulative, vec![10, 30, 100]);

        let labels: Vec<&str> = profile.top_risk.iter().map(|b| b.age_band.as_str()).collect();
        assert_eq!(labels, vec!["20-29", "10-19", "0-9"]);

        let shares: Vec<f64> = profile.bands.iter().map(|b| b.share_pct).collect();
        assert_eq!(shares, vec![10.0, 20.0, 70.0]);
    }

    #[test]
    fn test_age_cumulative_is_non_decreasing_and_ends_at_total() {
        let table = vec![
            AgeBandRecord::new("0-9세", 243),
            AgeBandRecord::new("10-19세", 421),
            AgeBandRecord::new("20-29세", 1234),
            AgeBandRecord::new("30-39세", 4567),
        ];

        let profile = age_distribution(&table).unwrap();

        assert!(profile.cumulative.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*profile.cumulative.last().unwrap(), profile.total_cases);
    }

    #[test]
    fn test_age_distribution_preserves_band_order() {
        let profile = age_distribution(&age_table()).unwrap();
        let order: Vec<&str> = profile.bands.iter().map(|b| b.age_band.as_str()).collect();
        assert_eq!(order, vec!["0-9", "10-19", "20-29"]);
    }

    #[test]
    fn test_age_distribution_empty_table() {
        assert!(matches!(
            age_distribution(&[]),
            Err(AnalysisError::EmptyInput { table: "age band" })
        ));
    }

    #[test]
    fn test_regional_rates_scenario() {
        let table = vec![RegionRecord::new("R1", 200)];
        let population = population_of(&[("R1", 100_000)]);

        let rates = regional_rates(&table, &population).unwrap();

        assert_eq!(rates.regions.len(), 1);
        assert_eq!(rates.regions[0].rate_per_100k, 200.0);
        assert_eq!(rates.regions[0].population, 100_000);
    }

    #[test]
    fn test_regional_rates_unknown_region() {
        let table = vec![RegionRecord::new("Atlantis", 100)];
        let population = population_of(&[("R1", 100_000)]);

        let err = regional_rates(&table, &population).unwrap_err();

        assert_eq!(
            err,
            AnalysisError::UnknownRegion {
                region: "Atlantis".to_string()
            }
        );
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_regional_rates_zero_population_fails_loudly() {
        let table = vec![RegionRecord::new("R1", 100)];
        let population = population_of(&[("R1", 0)]);

        assert!(matches!(
            regional_rates(&table, &population),
            Err(AnalysisError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn test_regional_rates_preserve_input_order() {
        let table = vec![
            RegionRecord::new("B", 10),
            RegionRecord::new("A", 20),
        ];
        let population = population_of(&[("A", 100_000), ("B", 100_000)]);

        let rates = regional_rates(&table, &population).unwrap();

        assert_eq!(rates.regions[0].region, "B");
        assert_eq!(rates.regions[1].region, "A");
    }

    #[test]
    fn test_regional_top_by_rate_ranking() {
        let table = vec![
            RegionRecord::new("low", 10),
            RegionRecord::new("high", 300),
            RegionRecord::new("mid", 100),
        ];
        let population = population_of(&[("low", 100_000), ("high", 100_000), ("mid", 100_000)]);

        let rates = regional_rates(&table, &population).unwrap();

        // Fewer than 5 regions: the ranking holds all of them.
        assert_eq!(rates.top_by_rate.len(), 3);
        assert_eq!(rates.top_by_rate[0].region, "high");
        assert_eq!(rates.top_by_rate[1].region, "mid");
        assert_eq!(rates.top_by_rate[2].region, "low");
        // The input-order view is untouched by the ranking.
        assert_eq!(rates.regions[0].region, "low");
    }

    #[test]
    fn test_regional_rates_empty_table() {
        let population = population_of(&[("R1", 100_000)]);
        assert!(matches!(
            regional_rates(&[], &population),
            Err(AnalysisError::EmptyInput { table: "region" })
        ));
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(51.9604, 1), 52.0);
        assert_eq!(round_to(30.5674, 2), 30.57);
        assert_eq!(round_to(100.0 / 3.0, 2), 33.33);
    }
}
