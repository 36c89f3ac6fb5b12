//! CSV persistence for the collected statistics tables.
//!
//! The three tables land as separate files under one data directory and
//! are read back row-by-row with serde. Loading is the trust boundary for
//! stored data: category totals that disagree with their parts are
//! recomputed with a warning.

use crate::analysis::AnalysisError;
use crate::models::{CategoryRecord, Dataset};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the category/gender table.
pub const CATEGORY_FILE: &str = "cancer_by_type_gender.csv";
/// File name of the age-band table.
pub const AGE_FILE: &str = "cancer_by_age.csv";
/// File name of the regional table.
pub const REGION_FILE: &str = "cancer_by_region.csv";

/// Reads and writes the statistics tables under one directory.
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Writes all three tables, creating the directory if needed.
    /// Returns the paths written, in table order.
    pub fn save(&self, dataset: &Dataset) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;

        let category_path = self.data_dir.join(CATEGORY_FILE);
        write_table(&category_path, &dataset.categories)?;

        let age_path = self.data_dir.join(AGE_FILE);
        write_table(&age_path, &dataset.age_bands)?;

        let region_path = self.data_dir.join(REGION_FILE);
        write_table(&region_path, &dataset.regions)?;

        debug!("Saved tables to {}", self.data_dir.display());

        Ok(vec![category_path, age_path, region_path])
    }

    /// Loads all three tables back into a dataset for `year`.
    ///
    /// Category rows whose stored total disagrees with male + female are
    /// corrected to the recomputed sum, with a warning naming the row.
    pub fn load(&self, year: u16) -> Result<Dataset> {
        let mut categories: Vec<CategoryRecord> =
            read_table(&self.data_dir.join(CATEGORY_FILE))?;

        for record in &mut categories {
            if !record.is_consistent() {
                warn!(
                    "Category '{}' total {} does not match male + female, recomputed to {}",
                    record.category,
                    record.total,
                    record.male + record.female
                );
                *record = record.with_recomputed_total();
            }
        }

        Ok(Dataset {
            year,
            categories,
            age_bands: read_table(&self.data_dir.join(AGE_FILE))?,
            regions: read_table(&self.data_dir.join(REGION_FILE))?,
        })
    }
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create table file: {}", path.display()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush table file: {}", path.display()))?;

    Ok(())
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(AnalysisError::MissingData {
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open table file: {}", path.display()))?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|| format!("Malformed row in {}", path.display()))?);
    }

    Ok(rows)
}
