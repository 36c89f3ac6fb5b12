//! Statistical aggregation over the incidence tables.
//!
//! All operations in this module are pure: they borrow the input tables,
//! perform no I/O, and either return a fully-populated result or signal
//! a typed error. Nothing here retries or produces partial output.

pub mod aggregator;

pub use aggregator::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors signaled by the aggregation operations and the table loader.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// A ratio or ranking was requested over a table with zero rows.
    #[error("the {table} table has no rows to aggregate")]
    EmptyInput {
        /// Name of the offending table.
        table: &'static str,
    },

    /// A region in the incidence table has no population reference entry.
    #[error("region '{region}' is missing from the population reference")]
    UnknownRegion {
        /// The offending region name.
        region: String,
    },

    /// A required input table file could not be found.
    #[error("required data table missing: {path}")]
    MissingData {
        /// Path that was expected to hold the table.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = AnalysisError::UnknownRegion {
            region: "Atlantis".to_string(),
        };
        assert!(err.to_string().contains("Atlantis"));

        let err = AnalysisError::EmptyInput { table: "region" };
        assert!(err.to_string().contains("region"));

        let err = AnalysisError::MissingData {
            path: PathBuf::from("data/cancer_by_age.csv"),
        };
        assert!(err.to_string().contains("cancer_by_age.csv"));
    }
}
