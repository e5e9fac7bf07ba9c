//! CLV value tiers split at the quartiles.

use serde::{Deserialize, Serialize};

use crate::domain::CustomerRecord;
use crate::stats::{mean, median_of_sorted, percentile_of_sorted, safe_ratio, sorted_ascending};

/// Quartile-based CLV tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueTier {
    /// CLV above the third quartile.
    TopQuartile,
    /// CLV above the median.
    UpperMid,
    /// CLV above the first quartile.
    LowerMid,
    /// Everything else.
    BottomQuartile,
}

impl ValueTier {
    /// All tiers, highest first.
    pub const ALL: [Self; 4] = [
        Self::TopQuartile,
        Self::UpperMid,
        Self::LowerMid,
        Self::BottomQuartile,
    ];

    /// Suggested action for the tier.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::TopQuartile => "Reward and retain with VIP treatment",
            Self::UpperMid => "Cross-sell and upsell opportunities",
            Self::LowerMid => "Targeted engagement campaigns",
            Self::BottomQuartile => "Win-back campaigns and support",
        }
    }
}

/// CLV quartile cut points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
}

impl Quartiles {
    /// Quartiles of `values`; zeros when empty.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        let sorted = sorted_ascending(values);
        Self {
            q1: percentile_of_sorted(&sorted, 0.25),
            median: median_of_sorted(&sorted),
            q3: percentile_of_sorted(&sorted, 0.75),
        }
    }

    /// Tier of a CLV value. Values on a cut point fall to the lower tier.
    #[must_use]
    pub fn tier(&self, clv: f64) -> ValueTier {
        if clv > self.q3 {
            ValueTier::TopQuartile
        } else if clv > self.median {
            ValueTier::UpperMid
        } else if clv > self.q1 {
            ValueTier::LowerMid
        } else {
            ValueTier::BottomQuartile
        }
    }
}

/// Aggregate for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    /// Tier.
    pub tier: ValueTier,
    /// Customers in the tier.
    pub count: usize,
    /// Fraction of the population (0-1).
    pub share: f64,
    /// Average CLV of the tier.
    pub avg_clv: f64,
    /// Share of total CLV held by the tier (0-1).
    pub value_share: f64,
    /// Suggested action.
    pub action: String,
}

/// Tier breakdown of a population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTiers {
    /// Cut points used.
    pub quartiles: Quartiles,
    /// One summary per tier, highest first (empty for no customers).
    pub tiers: Vec<TierSummary>,
    /// Sum of CLV.
    pub total_value: f64,
    /// Mean CLV.
    pub avg_clv: f64,
}

/// Split customers into quartile tiers by CLV.
#[must_use]
pub fn value_tiers(customers: &[CustomerRecord]) -> ValueTiers {
    if customers.is_empty() {
        return ValueTiers::default();
    }

    let values: Vec<f64> = customers.iter().map(|c| c.clv).collect();
    let quartiles = Quartiles::of(&values);
    let total_value: f64 = values.iter().sum();
    let n = values.len() as f64;

    let tiers = ValueTier::ALL
        .iter()
        .map(|tier| {
            let members: Vec<f64> = values
                .iter()
                .copied()
                .filter(|v| quartiles.tier(*v) == *tier)
                .collect();
            TierSummary {
                tier: *tier,
                count: members.len(),
                share: safe_ratio(members.len() as f64, n),
                avg_clv: mean(&members),
                value_share: safe_ratio(members.iter().sum(), total_value),
                action: tier.action().to_string(),
            }
        })
        .collect();

    ValueTiers {
        quartiles,
        tiers,
        total_value,
        avg_clv: mean(&values),
    }
}
