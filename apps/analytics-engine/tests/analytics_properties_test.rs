//! Property and scenario tests against the public analytics API.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use analytics_engine::clv::{ClvModelConfig, heterogeneity_index, summarize_model};
use analytics_engine::data::{DatasetConfig, generate_customers};
use analytics_engine::forecast::{
    MonteCarloBuilder, MonteCarloConfig, SurvivalConfig, forecast_with_rng, survival_curve,
};
use analytics_engine::segmentation::{
    SegmentBucket, SegmentThresholds, classify, segment_customers,
};
use analytics_engine::stats::{gini, inequality_metrics, mean, std_dev, trend};
use analytics_engine::{CustomerRecord, Plan};

// =============================================================================
// Helpers
// =============================================================================

fn customer(frequency: f64, monetary: f64) -> CustomerRecord {
    CustomerRecord {
        id: Uuid::new_v4(),
        clv: frequency * monetary * 4.0,
        frequency,
        monetary,
        retention: 80.0,
        plan: Plan::Pro,
        usage_score: 50.0,
    }
}

// =============================================================================
// Descriptive statistics
// =============================================================================

#[test]
fn test_mean_and_std_dev_of_known_values() {
    let values = [10.0, 20.0, 30.0];
    assert_eq!(mean(&values), 20.0);
    assert!((std_dev(&values) - 8.164_965_809).abs() < 1e-6);
}

#[test]
fn test_trend_degenerate_cases() {
    assert_eq!(trend(&[]), 0.0);
    assert_eq!(trend(&[42.0]), 0.0);
    assert_eq!(trend(&[0.0, 5.0]), 0.0);
    assert_eq!(trend(&[100.0, 150.0]), 50.0);
}

// =============================================================================
// Monte Carlo
// =============================================================================

#[test]
fn test_flat_forecast_has_no_spread() {
    let config = MonteCarloConfig {
        base_value: 100_000.0,
        growth_rate: 0.0,
        volatility: 0.0,
        periods: 3,
        simulations: 10,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(2024);

    let points = forecast_with_rng(&config, &mut rng);
    assert_eq!(points.len(), 3);
    for point in points {
        assert_eq!(point.p10, 100_000.0);
        assert_eq!(point.p50, 100_000.0);
        assert_eq!(point.p90, 100_000.0);
    }
}

#[test]
fn test_forecast_is_reproducible_across_execution_modes() {
    let run = |threshold: usize| {
        MonteCarloBuilder::new()
            .simulations(2500)
            .periods(12)
            .seed(7)
            .parallel_threshold(threshold)
            .build()
            .run()
    };
    assert_eq!(run(usize::MAX), run(1));
    assert_eq!(run(1), run(1));
}

// =============================================================================
// Segmentation
// =============================================================================

#[test]
fn test_one_customer_per_quadrant() {
    let customers: Vec<CustomerRecord> = [1.0, 1.0, 9.0, 9.0]
        .into_iter()
        .zip([9.0, 1.0, 9.0, 1.0])
        .map(|(f, m)| customer(f, m))
        .collect();
    let thresholds = SegmentThresholds {
        frequency: 5.0,
        monetary: 5.0,
    };

    let matrix = segment_customers(&customers, Some(thresholds));
    for bucket in SegmentBucket::ALL {
        assert_eq!(matrix.count(bucket), 1, "{bucket:?}");
    }
}

#[test]
fn test_segmentation_is_unaffected_by_model_summary() {
    let customers = generate_customers(&DatasetConfig {
        customer_count: 300,
        seed: 11,
        ..Default::default()
    });

    let before = segment_customers(&customers, None);
    let summary = summarize_model(&customers, &ClvModelConfig::default());
    let after = segment_customers(&customers, None);

    assert!(summary.heterogeneity_index > 0.0);
    assert_eq!(before, after);
}

#[test]
fn test_generated_dataset_is_reproducible() {
    let config = DatasetConfig {
        customer_count: 100,
        seed: 314,
        ..Default::default()
    };
    assert_eq!(generate_customers(&config), generate_customers(&config));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_std_dev_non_negative(values in proptest::collection::vec(-1e6_f64..1e6, 1..100)) {
        prop_assert!(std_dev(&values) >= 0.0);
    }

    #[test]
    fn prop_gini_bounded(values in proptest::collection::vec(0.0_f64..1e6, 0..100)) {
        let g = gini(&values);
        prop_assert!((0.0..=1.0).contains(&g));
    }

    #[test]
    fn prop_top_shares_ordered(values in proptest::collection::vec(0.0_f64..1e6, 0..300)) {
        let m = inequality_metrics(&values);
        prop_assert!(m.top1_share <= m.top10_share);
        prop_assert!(m.top10_share <= 1.0);
    }

    #[test]
    fn prop_heterogeneity_in_unit_interval(values in proptest::collection::vec(0.0_f64..1e6, 0..100)) {
        let h = heterogeneity_index(&values);
        prop_assert!((0.0..1.0).contains(&h));
    }

    #[test]
    fn prop_classify_is_deterministic(
        f in 0.0_f64..20.0,
        m in 0.0_f64..2000.0,
        tf in 0.0_f64..20.0,
        tm in 0.0_f64..2000.0,
    ) {
        let thresholds = SegmentThresholds { frequency: tf, monetary: tm };
        prop_assert_eq!(classify(f, m, &thresholds), classify(f, m, &thresholds));
    }

    #[test]
    fn prop_survival_non_increasing(
        shape in 0.2_f64..5.0,
        scale in 0.5_f64..60.0,
        periods in 0_usize..60,
    ) {
        let curve = survival_curve(&SurvivalConfig { shape, scale, periods, ..Default::default() });
        prop_assert_eq!(curve.points.len(), periods);
        for p in &curve.points {
            prop_assert!((0.0..=100.0).contains(&p.survival));
            prop_assert!(p.hazard.is_finite() && p.hazard >= 0.0);
        }
        for w in curve.points.windows(2) {
            prop_assert!(w[1].survival <= w[0].survival);
        }
    }

    #[test]
    fn prop_forecast_bands_ordered(
        growth in -0.2_f64..0.3,
        volatility in 0.0_f64..0.8,
        simulations in 1_usize..150,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = MonteCarloConfig {
            base_value: 450_000.0,
            growth_rate: growth,
            volatility,
            periods: 6,
            simulations,
            ..Default::default()
        };
        for p in forecast_with_rng(&config, &mut rng) {
            prop_assert!(p.min <= p.p10 && p.p10 <= p.p50 && p.p50 <= p.p90 && p.p90 <= p.max);
        }
    }
}
