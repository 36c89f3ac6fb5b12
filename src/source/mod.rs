//! Data collection: live statistics API with a bundled-reference fallback.
//!
//! The category table is the only one the live service exposes; the age
//! and regional tables always come from the bundled reference release.
//! Collection never fails the run outright while the fallback is usable.

pub mod api;
pub mod reference;
pub mod store;

pub use api::ApiClient;
pub use store::DataStore;

use crate::models::{CategoryRecord, DataOrigin, Dataset};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{info, warn};

/// Collects the reporting year's statistics tables.
pub struct DataCollector {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub offline: bool,
    pub year: u16,
}

impl DataCollector {
    /// Fetches the category table from the live API when possible, falling
    /// back to the bundled reference tables. Returns the assembled dataset
    /// together with where the category table actually came from.
    pub async fn collect(&self) -> Result<(Dataset, DataOrigin)> {
        let (categories, origin) = if self.offline {
            info!("Offline mode, using bundled reference data");
            (reference::categories(), DataOrigin::Reference)
        } else if self.api_key.is_none() {
            info!("No API key configured, using bundled reference data");
            (reference::categories(), DataOrigin::Reference)
        } else {
            match self.fetch_live().await {
                Ok(rows) => (rows, DataOrigin::LiveApi),
                Err(e) => {
                    warn!(
                        "Live collection failed, using bundled reference data: {:#}",
                        e
                    );
                    (reference::categories(), DataOrigin::Reference)
                }
            }
        };

        info!(
            "Collected {} category rows from {}",
            categories.len(),
            origin
        );

        Ok((
            Dataset {
                year: self.year,
                categories,
                age_bands: reference::age_bands(),
                regions: reference::regions(),
            },
            origin,
        ))
    }

    async fn fetch_live(&self) -> Result<Vec<CategoryRecord>> {
        let client = ApiClient::new(&self.api_url, self.timeout_seconds, self.api_key.clone())?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!(
            "Fetching {} statistics from {}",
            self.year, self.api_url
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = client.fetch_categories().await;
        spinner.finish_and_clear();

        result
    }
}
