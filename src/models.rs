//! Data models for the statistics pipeline.
//!
//! This module contains the core data structures shared across the
//! application: the three incidence tables, the population reference,
//! and small formatting helpers.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One row of the incidence-by-type-and-gender table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Cancer category label (fixed Korean label, e.g. "대장암").
    pub category: String,
    /// Male incidence count.
    pub male: u64,
    /// Female incidence count.
    pub female: u64,
    /// Combined incidence count. Invariant: `total == male + female`.
    pub total: u64,
}

impl CategoryRecord {
    /// Creates a record with `total` derived from the two parts.
    pub fn new(category: impl Into<String>, male: u64, female: u64) -> Self {
        Self {
            category: category.into(),
            male,
            female,
            total: male + female,
        }
    }

    /// Returns true when the supplied total matches `male + female`.
    pub fn is_consistent(&self) -> bool {
        self.total == self.male + self.female
    }

    /// Returns a copy with `total` recomputed from the two parts.
    pub fn with_recomputed_total(&self) -> Self {
        Self::new(self.category.clone(), self.male, self.female)
    }
}

/// One row of the incidence-by-age-band table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBandRecord {
    /// Age band label in ascending-age table order (e.g. "40-49세").
    pub age_band: String,
    /// Incidence count for the band.
    pub count: u64,
}

impl AgeBandRecord {
    pub fn new(age_band: impl Into<String>, count: u64) -> Self {
        Self {
            age_band: age_band.into(),
            count,
        }
    }
}

/// One row of the incidence-by-region table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Administrative region name (e.g. "서울특별시").
    pub region: String,
    /// Incidence count for the region.
    pub count: u64,
}

impl RegionRecord {
    pub fn new(region: impl Into<String>, count: u64) -> Self {
        Self {
            region: region.into(),
            count,
        }
    }
}

/// The three incidence tables for one reporting year, treated as an
/// immutable snapshot once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// The reporting year all three tables pertain to.
    pub year: u16,
    /// Incidence by cancer category and gender.
    pub categories: Vec<CategoryRecord>,
    /// Incidence by age band, ascending by age.
    pub age_bands: Vec<AgeBandRecord>,
    /// Incidence by administrative region.
    pub regions: Vec<RegionRecord>,
}

impl Dataset {
    /// Total incidence count, summed over the category table.
    pub fn total_cases(&self) -> u64 {
        self.categories.iter().map(|r| r.total).sum()
    }
}

/// Where a collected dataset came from. Logged for the operator only;
/// the analysis stages never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Fetched from the live statistics service.
    LiveApi,
    /// Built from the bundled reference tables.
    Reference,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::LiveApi => write!(f, "live API"),
            DataOrigin::Reference => write!(f, "bundled reference data"),
        }
    }
}

/// Mapping from region name to population count for the reporting year.
///
/// Injected through configuration so the table can be swapped per year
/// without touching aggregation logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopulationReference(BTreeMap<String, u64>);

impl PopulationReference {
    pub fn new(entries: BTreeMap<String, u64>) -> Self {
        Self(entries)
    }

    /// Looks up the population for a region, if present.
    pub fn get(&self, region: &str) -> Option<u64> {
        self.0.get(region).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u64)> for PopulationReference {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Formats a count with thousands separators ("33158" -> "33,158").
pub fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}
