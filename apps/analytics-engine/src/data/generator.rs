//! Seeded synthetic customer population.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::{Builder, Uuid};

use crate::clv::classic_clv;
use crate::domain::{CustomerRecord, Plan};

/// Retention cap applied when deriving generated CLV.
const GENERATED_MAX_RETENTION: f64 = 0.99;

/// Where customer records come from and how synthetic ones are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// JSON file of customer records. Generated when unset.
    pub path: Option<String>,
    /// Number of generated customers.
    pub customer_count: usize,
    /// Generator seed.
    pub seed: u64,
    /// Purchase frequency range `[min, max)`.
    pub frequency_range: (f64, f64),
    /// Basic-plan spend per transaction range `[min, max)`.
    pub monetary_range: (f64, f64),
    /// Retention percentage range `[min, max)`.
    pub retention_range: (f64, f64),
    /// Share of customers on Pro.
    pub pro_share: f64,
    /// Share of customers on Enterprise.
    pub enterprise_share: f64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            customer_count: 500,
            seed: 42,
            frequency_range: (1.0, 12.0),
            monetary_range: (50.0, 250.0),
            retention_range: (60.0, 98.0),
            pro_share: 0.35,
            enterprise_share: 0.15,
        }
    }
}

/// Spend multiplier per plan.
const fn plan_multiplier(plan: Plan) -> f64 {
    match plan {
        Plan::Basic => 1.0,
        Plan::Pro => 2.0,
        Plan::Enterprise => 4.0,
    }
}

/// Generate `config.customer_count` customers.
///
/// The output depends only on the config; the same seed always yields the
/// same records, ids included.
#[must_use]
pub fn generate_customers(config: &DatasetConfig) -> Vec<CustomerRecord> {
    info!(
        customers = config.customer_count,
        seed = config.seed,
        "Generating synthetic customers"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.customer_count)
        .map(|_| generate_customer(config, &mut rng))
        .collect()
}

fn generate_customer<R: Rng + ?Sized>(config: &DatasetConfig, rng: &mut R) -> CustomerRecord {
    let mut bytes = [0_u8; 16];
    rng.fill(&mut bytes);
    let id: Uuid = Builder::from_random_bytes(bytes).into_uuid();

    let plan_draw: f64 = rng.random();
    let plan = if plan_draw < config.enterprise_share {
        Plan::Enterprise
    } else if plan_draw < config.enterprise_share + config.pro_share {
        Plan::Pro
    } else {
        Plan::Basic
    };

    let frequency = draw(rng, config.frequency_range);
    let monetary = draw(rng, config.monetary_range) * plan_multiplier(plan);
    let retention = draw(rng, config.retention_range).clamp(0.0, 100.0);
    let usage_score = rng.random::<f64>() * 100.0;

    let mut customer = CustomerRecord {
        id,
        clv: 0.0,
        frequency,
        monetary,
        retention,
        plan,
        usage_score,
    };
    customer.clv = classic_clv(
        frequency,
        monetary,
        customer.retention_rate(),
        GENERATED_MAX_RETENTION,
    );
    customer
}

fn draw<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    min + rng.random::<f64>() * (max - min)
}
