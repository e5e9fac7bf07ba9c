//! Frequency/monetary segmentation matrix.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::CustomerRecord;
use crate::stats::{mean, median, safe_ratio};

/// Quadrant of the frequency/monetary matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentBucket {
    /// High frequency, high spend.
    Champions,
    /// Low frequency, high spend.
    Loyal,
    /// High frequency, low spend.
    AtRisk,
    /// Low frequency, low spend.
    NeedAttention,
}

impl SegmentBucket {
    /// All buckets in display order.
    pub const ALL: [Self; 4] = [
        Self::Champions,
        Self::Loyal,
        Self::AtRisk,
        Self::NeedAttention,
    ];

    /// Get the bucket label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Champions => "Champions",
            Self::Loyal => "Loyal",
            Self::AtRisk => "At Risk",
            Self::NeedAttention => "Need Attention",
        }
    }
}

/// Cut points separating low from high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentThresholds {
    /// Purchase-frequency threshold.
    pub frequency: f64,
    /// Monetary threshold.
    pub monetary: f64,
}

/// Median frequency and median monetary value of the population.
#[must_use]
pub fn median_thresholds(customers: &[CustomerRecord]) -> SegmentThresholds {
    let frequencies: Vec<f64> = customers.iter().map(|c| c.frequency).collect();
    let monetary: Vec<f64> = customers.iter().map(|c| c.monetary).collect();
    SegmentThresholds {
        frequency: median(&frequencies),
        monetary: median(&monetary),
    }
}

/// Place one customer in the matrix. A value equal to its threshold is low.
#[must_use]
pub fn classify(frequency: f64, monetary: f64, thresholds: &SegmentThresholds) -> SegmentBucket {
    let high_frequency = frequency > thresholds.frequency;
    let high_monetary = monetary > thresholds.monetary;
    match (high_frequency, high_monetary) {
        (true, true) => SegmentBucket::Champions,
        (false, true) => SegmentBucket::Loyal,
        (true, false) => SegmentBucket::AtRisk,
        (false, false) => SegmentBucket::NeedAttention,
    }
}

/// Assignment of one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAssignment {
    /// Customer id.
    pub customer_id: uuid::Uuid,
    /// Assigned bucket.
    pub bucket: SegmentBucket,
}

/// Aggregate for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Bucket.
    pub bucket: SegmentBucket,
    /// Customers in the bucket.
    pub count: usize,
    /// Fraction of the population (0-1).
    pub share: f64,
    /// Average CLV.
    pub avg_clv: f64,
    /// Average purchase frequency.
    pub avg_frequency: f64,
    /// Average monetary value.
    pub avg_monetary: f64,
}

/// Result of one segmentation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentationMatrix {
    /// Thresholds used.
    pub thresholds: SegmentThresholds,
    /// One assignment per customer, in input order.
    pub assignments: Vec<SegmentAssignment>,
    /// One summary per bucket, in display order (empty for no customers).
    pub summary: Vec<SegmentSummary>,
}

impl SegmentationMatrix {
    /// Customers assigned to `bucket`.
    #[must_use]
    pub fn count(&self, bucket: SegmentBucket) -> usize {
        self.assignments.iter().filter(|a| a.bucket == bucket).count()
    }
}

/// Segment every customer.
///
/// Uses the population medians when no thresholds are supplied.
#[must_use]
pub fn segment_customers(
    customers: &[CustomerRecord],
    thresholds: Option<SegmentThresholds>,
) -> SegmentationMatrix {
    if customers.is_empty() {
        return SegmentationMatrix::default();
    }

    let thresholds = thresholds.unwrap_or_else(|| median_thresholds(customers));
    debug!(
        frequency = thresholds.frequency,
        monetary = thresholds.monetary,
        "Segmenting customers"
    );

    let assignments: Vec<SegmentAssignment> = customers
        .iter()
        .map(|c| SegmentAssignment {
            customer_id: c.id,
            bucket: classify(c.frequency, c.monetary, &thresholds),
        })
        .collect();

    let total = customers.len() as f64;
    let summary = SegmentBucket::ALL
        .iter()
        .map(|bucket| {
            let members: Vec<&CustomerRecord> = customers
                .iter()
                .zip(&assignments)
                .filter(|(_, a)| a.bucket == *bucket)
                .map(|(c, _)| c)
                .collect();
            let avg = |f: fn(&CustomerRecord) -> f64| {
                mean(&members.iter().map(|c| f(c)).collect::<Vec<_>>())
            };
            SegmentSummary {
                bucket: *bucket,
                count: members.len(),
                share: safe_ratio(members.len() as f64, total),
                avg_clv: avg(|c| c.clv),
                avg_frequency: avg(|c| c.frequency),
                avg_monetary: avg(|c| c.monetary),
            }
        })
        .collect();

    SegmentationMatrix {
        thresholds,
        assignments,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Plan;
    use test_case::test_case;
    use uuid::Uuid;

    fn customer(frequency: f64, monetary: f64) -> CustomerRecord {
        CustomerRecord {
            id: Uuid::new_v4(),
            clv: frequency * monetary,
            frequency,
            monetary,
            retention: 80.0,
            plan: Plan::Basic,
            usage_score: 50.0,
        }
    }

    fn thresholds(frequency: f64, monetary: f64) -> SegmentThresholds {
        SegmentThresholds {
            frequency,
            monetary,
        }
    }

    #[test_case(9.0, 9.0, SegmentBucket::Champions ; "high high")]
    #[test_case(1.0, 9.0, SegmentBucket::Loyal ; "low frequency high monetary")]
    #[test_case(9.0, 1.0, SegmentBucket::AtRisk ; "high frequency low monetary")]
    #[test_case(1.0, 1.0, SegmentBucket::NeedAttention ; "low low")]
    #[test_case(5.0, 5.0, SegmentBucket::NeedAttention ; "ties are low")]
    #[test_case(5.0, 9.0, SegmentBucket::Loyal ; "frequency tie is low")]
    fn test_classify(frequency: f64, monetary: f64, expected: SegmentBucket) {
        assert_eq!(classify(frequency, monetary, &thresholds(5.0, 5.0)), expected);
    }

    #[test]
    fn test_one_customer_per_quadrant() {
        let customers = vec![
            customer(1.0, 9.0),
            customer(1.0, 1.0),
            customer(9.0, 9.0),
            customer(9.0, 1.0),
        ];
        let matrix = segment_customers(&customers, Some(thresholds(5.0, 5.0)));

        for bucket in SegmentBucket::ALL {
            assert_eq!(matrix.count(bucket), 1, "{bucket:?}");
        }
        assert_eq!(matrix.assignments[0].bucket, SegmentBucket::Loyal);
        assert_eq!(matrix.assignments[2].bucket, SegmentBucket::Champions);
        assert_eq!(matrix.assignments[0].customer_id, customers[0].id);
        assert!(matrix.summary.iter().all(|s| (s.share - 0.25).abs() < 1e-12));
    }

    #[test]
    fn test_median_thresholds_by_default() {
        let customers = vec![
            customer(1.0, 9.0),
            customer(1.0, 1.0),
            customer(9.0, 9.0),
            customer(9.0, 1.0),
        ];
        let matrix = segment_customers(&customers, None);

        assert_eq!(matrix.thresholds, thresholds(5.0, 5.0));
        assert_eq!(matrix.count(SegmentBucket::Champions), 1);
    }

    #[test]
    fn test_single_customer_needs_attention() {
        let matrix = segment_customers(&[customer(3.0, 120.0)], None);

        assert_eq!(matrix.thresholds, thresholds(3.0, 120.0));
        assert_eq!(matrix.assignments[0].bucket, SegmentBucket::NeedAttention);
    }

    #[test]
    fn test_empty_population() {
        let matrix = segment_customers(&[], None);
        assert_eq!(matrix.thresholds, SegmentThresholds::default());
        assert!(matrix.assignments.is_empty());
        assert!(matrix.summary.is_empty());
    }

    #[test]
    fn test_summary_averages() {
        let customers = vec![customer(9.0, 10.0), customer(7.0, 20.0), customer(1.0, 1.0)];
        let matrix = segment_customers(&customers, Some(thresholds(5.0, 5.0)));
        let champions = &matrix.summary[0];

        assert_eq!(champions.bucket, SegmentBucket::Champions);
        assert_eq!(champions.count, 2);
        assert_eq!(champions.avg_frequency, 8.0);
        assert_eq!(champions.avg_monetary, 15.0);
        assert_eq!(champions.avg_clv, 115.0);
        assert_eq!(matrix.summary[1].avg_clv, 0.0);
    }
}
