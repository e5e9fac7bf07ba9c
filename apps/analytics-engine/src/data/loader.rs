//! JSON customer dataset loading and validation.

use std::path::Path;

use tracing::info;

use crate::domain::CustomerRecord;
use crate::error::DatasetError;

/// Load and validate customers from a JSON array file.
///
/// # Errors
///
/// Returns a `DatasetError` if the file cannot be read, is not a JSON array
/// of customer records, or contains an invalid record.
pub fn load_customers(path: impl AsRef<Path>) -> Result<Vec<CustomerRecord>, DatasetError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| DatasetError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let customers = parse_customers(&contents)?;
    info!(
        customers = customers.len(),
        path = %path.display(),
        "Loaded customer dataset"
    );
    Ok(customers)
}

/// Parse and validate customers from a JSON string.
///
/// # Errors
///
/// Returns a `DatasetError` if the JSON is malformed or a record is invalid.
pub fn parse_customers(json: &str) -> Result<Vec<CustomerRecord>, DatasetError> {
    let customers: Vec<CustomerRecord> = serde_json::from_str(json)?;
    validate_customers(&customers)?;
    Ok(customers)
}

/// Check every record: finite, non-negative amounts and percentages within 0-100.
///
/// # Errors
///
/// Returns `DatasetError::InvalidRecord` for the first offending record.
pub fn validate_customers(customers: &[CustomerRecord]) -> Result<(), DatasetError> {
    for (index, customer) in customers.iter().enumerate() {
        if let Some(reason) = record_problem(customer) {
            return Err(DatasetError::InvalidRecord { index, reason });
        }
    }
    Ok(())
}

fn record_problem(customer: &CustomerRecord) -> Option<String> {
    let amounts = [
        ("clv", customer.clv),
        ("frequency", customer.frequency),
        ("monetary", customer.monetary),
    ];
    for (field, value) in amounts {
        if !value.is_finite() {
            return Some(format!("{field} is not finite"));
        }
        if value < 0.0 {
            return Some(format!("{field} must be non-negative, got {value}"));
        }
    }

    let percentages = [
        ("retention", customer.retention),
        ("usageScore", customer.usage_score),
    ];
    for (field, value) in percentages {
        if !(0.0..=100.0).contains(&value) {
            return Some(format!("{field} must be within 0-100, got {value}"));
        }
    }

    None
}
