//! Customer record and subscription history sources.
//!
//! Records come either from a JSON file (camelCase `CustomerRecord` array)
//! or from the seeded generator, driven by [`DatasetConfig`]. Subscription
//! periods follow the same pattern under [`HistoryConfig`].

mod generator;
mod history;
mod loader;

pub use generator::{DatasetConfig, generate_customers};
pub use history::{HistoryConfig, generate_history, load_history, parse_history, validate_history};
pub use loader::{load_customers, parse_customers, validate_customers};

use crate::domain::{CustomerRecord, SubscriptionPeriod};
use crate::error::DatasetError;

/// Load customers from `config.path`, or generate them when no path is set.
///
/// # Errors
///
/// Returns a `DatasetError` if the configured file cannot be loaded.
pub fn load_or_generate(config: &DatasetConfig) -> Result<Vec<CustomerRecord>, DatasetError> {
    match &config.path {
        Some(path) => load_customers(path),
        None => Ok(generate_customers(config)),
    }
}

/// Load subscription periods from `config.path`, or generate them when no path is set.
///
/// # Errors
///
/// Returns a `DatasetError` if the configured file cannot be loaded.
pub fn load_or_generate_history(
    config: &HistoryConfig,
) -> Result<Vec<SubscriptionPeriod>, DatasetError> {
    match &config.path {
        Some(path) => load_history(path),
        None => Ok(generate_history(config)),
    }
}
