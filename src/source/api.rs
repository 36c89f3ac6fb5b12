//! Client for the national cancer statistics API.
//!
//! The service exposes several endpoints that serve the same category
//! table; they are probed in order until one returns usable rows. Every
//! failure mode maps to an error the collector can log and fall back from.

use crate::models::CategoryRecord;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Endpoints probed in order until one returns a usable table.
const ENDPOINTS: &[(&str, &str)] = &[
    ("statistics", "data.do"),
    ("cancer_data", "cancerData.do"),
    ("prevention", "prevention.do"),
];

/// Response envelope returned by the statistics endpoints.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    items: Vec<ApiCategoryRow>,
}

/// One category row as the API serves it. `total` is optional and is
/// recomputed from the parts when absent or inconsistent.
#[derive(Debug, Deserialize)]
struct ApiCategoryRow {
    category: String,
    male: u64,
    female: u64,
    total: Option<u64>,
}

/// HTTP client for the statistics service.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("oncostat/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Fetches the category/gender table, probing each endpoint in order.
    /// Fails only when every endpoint fails or returns no rows.
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>> {
        for (name, path) in ENDPOINTS {
            let url = self.endpoint_url(path);
            debug!("Requesting {} endpoint: {}", name, url);

            match self.request(&url).await {
                Ok(rows) if rows.is_empty() => {
                    warn!("Endpoint {} returned no rows", name);
                }
                Ok(rows) => {
                    debug!("Endpoint {} returned {} rows", name, rows.len());
                    return Ok(rows.iter().map(convert_row).collect());
                }
                Err(e) => {
                    warn!("Endpoint {} failed: {:#}", name, e);
                }
            }
        }

        Err(anyhow!("All statistics endpoints failed or returned no rows"))
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn request(&self, url: &str) -> Result<Vec<ApiCategoryRow>> {
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("serviceKey", key.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow!("Request timed out: {}", url)
            } else if e.is_connect() {
                anyhow!("Could not connect to {}", url)
            } else {
                anyhow!("Request failed: {}", e)
            }
        })?;

        if !response.status().is_success() {
            return Err(anyhow!("API returned error status: {}", response.status()));
        }

        let body: ApiResponse = response
            .json()
            .await
            .context("Failed to parse API response")?;

        Ok(body.items)
    }
}

/// Converts an API row into a category record, recomputing the total from
/// male + female when the served value is absent or disagrees.
fn convert_row(row: &ApiCategoryRow) -> CategoryRecord {
    match row.total {
        Some(total) if total == row.male + row.female => CategoryRecord {
            category: row.category.clone(),
            male: row.male,
            female: row.female,
            total,
        },
        Some(total) => {
            warn!(
                "Category '{}' total {} does not match male + female, recomputed to {}",
                row.category,
                total,
                row.male + row.female
            );
            CategoryRecord::new(row.category.clone(), row.male, row.female)
        }
        None => CategoryRecord::new(row.category.clone(), row.male, row.female),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserializes_with_and_without_total() {
        let json = r#"{
            "items": [
                {"category": "폐암", "male": 21646, "female": 10667, "total": 32313},
                {"category": "위암", "male": 19562, "female": 9893}
            ]
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].total, Some(32313));
        assert_eq!(response.items[1].total, None);
    }

    #[test]
    fn test_convert_row_recomputes_bad_total() {
        let row = ApiCategoryRow {
            category: "폐암".to_string(),
            male: 21646,
            female: 10667,
            total: Some(99999),
        };

        let record = convert_row(&row);
        assert_eq!(record.total, 32313);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_convert_row_derives_missing_total() {
        let row = ApiCategoryRow {
            category: "위암".to_string(),
            male: 19562,
            female: 9893,
            total: None,
        };

        assert_eq!(convert_row(&row).total, 29455);
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = ApiClient::new("https://www.cancer.go.kr/api/", 15, None).unwrap();
        assert_eq!(
            client.endpoint_url("data.do"),
            "https://www.cancer.go.kr/api/data.do"
        );
    }
}
