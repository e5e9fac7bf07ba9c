//! Customer segmentation.
//!
//! - Frequency/monetary matrix: Champions, Loyal, At Risk, Need Attention
//! - CLV value tiers split at the quartiles
//!
//! Classification is a pure function of the record and the thresholds, so
//! repeated passes over the same input give the same assignments.

mod matrix;
mod tiers;

pub use matrix::{
    SegmentAssignment, SegmentBucket, SegmentSummary, SegmentThresholds, SegmentationMatrix,
    classify, median_thresholds, segment_customers,
};
pub use tiers::{Quartiles, TierSummary, ValueTier, ValueTiers, value_tiers};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clv::{ClvModelConfig, summarize_model};
    use crate::domain::{CustomerRecord, Plan};
    use uuid::Uuid;

    #[test]
    fn test_model_summary_does_not_change_assignments() {
        let customers: Vec<CustomerRecord> = (0..50)
            .map(|i| {
                let i = f64::from(i);
                CustomerRecord {
                    id: Uuid::new_v4(),
                    clv: 100.0 + i * 37.0,
                    frequency: (i * 7.0) % 13.0,
                    monetary: 20.0 + (i * 11.0) % 90.0,
                    retention: 60.0 + i % 30.0,
                    plan: Plan::ALL[(i as usize) % 3],
                    usage_score: (i * 3.0) % 100.0,
                }
            })
            .collect();

        let before = segment_customers(&customers, None);
        let _ = summarize_model(&customers, &ClvModelConfig::default());
        let after = segment_customers(&customers, None);

        assert_eq!(before, after);
    }
}
