//! Error types for the analytics engine's outer surfaces.
//!
//! Computations in [`crate::stats`], [`crate::clv`], [`crate::forecast`] and
//! [`crate::segmentation`] never fail; degenerate input resolves to zeros or
//! empty series. Errors only arise at the edges:
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`ConfigError`] | reading, parsing, or validating YAML configuration |
//! | [`DatasetError`] | reading, parsing, or validating customer records and subscription periods |
//! | [`AnalyticsError`] | loading config for, producing, and writing the dashboard report |

use thiserror::Error;

pub use crate::config::ConfigError;

/// Customer dataset errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read the dataset file.
    #[error("Failed to read dataset '{path}': {source}")]
    ReadError {
        /// Path to the dataset file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse the dataset JSON.
    #[error("Failed to parse dataset JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A record failed validation.
    #[error("Invalid customer record at index {index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the dataset.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A subscription period failed validation.
    #[error("Invalid subscription period at index {index}: {reason}")]
    InvalidPeriod {
        /// Position of the period in the history.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors from building and writing a dashboard report.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Customer records could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Report serialization failed.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Report could not be written.
    #[error("Failed to write report to '{path}': {source}")]
    Output {
        /// Destination path.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },
}
