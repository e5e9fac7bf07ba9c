//! Revenue forecasting.
//!
//! - [`monte_carlo`]: percentile bands from simulated compounding paths
//! - [`bass`]: Bass diffusion adoption and revenue curve
//! - [`survival`]: Weibull revenue survival, hazard, and revenue at risk

pub mod bass;
pub mod monte_carlo;
pub mod survival;

pub use bass::{BassConfig, BassPoint, bass_adopters, bass_diffusion};
pub use monte_carlo::{
    ForecastPoint, MonteCarloBuilder, MonteCarloConfig, MonteCarloForecast, MonteCarloForecaster,
    forecast_with_rng,
};
pub use survival::{
    SurvivalConfig, SurvivalCurve, SurvivalPoint, median_lifetime, survival_curve, weibull_hazard,
    weibull_survival,
};
