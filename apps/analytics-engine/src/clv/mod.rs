//! Customer lifetime value modeling.
//!
//! Display-grade summaries of a customer population:
//! - BG/NBD (purchase frequency and dropout) and Gamma-Gamma (spend) parameters
//! - Gamma fit of the CLV distribution and its value histogram
//! - Heterogeneity index and level
//! - Classic CLV decomposition, customer equity, drivers, and cohorts
//! - Forward prediction band
//!
//! # Example
//!
//! ```ignore
//! use analytics_engine::clv::{ClvModelConfig, summarize_model};
//!
//! let summary = summarize_model(&customers, &ClvModelConfig::default());
//! println!("heterogeneity: {:.2}", summary.heterogeneity_index);
//! ```

mod cohort;
mod config;
mod decomposition;
mod distribution;
mod drivers;
mod gamma;
mod model;
mod params;
mod prediction;

pub use cohort::{CohortSummary, cohort_summary};
pub use config::ClvModelConfig;
pub use decomposition::{
    ClvDecomposition, CustomerEquity, classic_clv, customer_equity, decompose,
};
pub use distribution::{DistributionBucket, value_distribution};
pub use drivers::{ClvDrivers, DriverGroup, UsageTier, clv_drivers};
pub use gamma::{GammaFit, gamma_pdf, moment_shape};
pub use model::{ClvModelSummary, HeterogeneityLevel, heterogeneity_index, summarize_model};
pub use params::{BgNbdParams, GammaGammaParams, ModelParameters};
pub use prediction::{PredictionPoint, prediction_band};
