//! Property-based tests for the analysis battery.
//!
//! These tests generate random catalogs and check that the analyses keep
//! their invariants:
//! 1. **No panics**: every analysis returns an output for any catalog
//! 2. **Determinism**: the same dataset always produces the same output
//! 3. **Bounds**: correlations stay within [-1, 1], proportions sum to 1 or 0
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p tracklens --test property_tests
//! PROPTEST_CASES=10000 cargo test -p tracklens --test property_tests
//! ```

use proptest::prelude::*;

use tracklens::chart::Values;
use tracklens::input::Parser;
use tracklens::stats::{pearson, BoxSummary};
use tracklens::{Analysis, Dataset};

// =============================================================================
// Test Strategies
// =============================================================================

/// A numeric cell, sometimes missing.
fn cell(range: std::ops::Range<f64>) -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        6 => range.prop_map(Some),
    ]
}

fn genre() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("pop"), Just("rock"), Just("jazz"), Just("folk")]
}

fn explicit() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("True"), Just("False"), Just("")]
}

type Row = (&'static str, Option<f64>, Option<f64>, Option<f64>, &'static str);

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            genre(),
            cell(0.0..100.0),
            cell(0.0..1.0),
            cell(60.0..200.0),
            explicit(),
        ),
        1..60,
    )
}

fn to_dataset(rows: &[Row]) -> Dataset {
    let fmt = |v: &Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    let mut csv = String::from("track_genre,artists,popularity,energy,tempo,explicit\n");
    for (i, (genre, popularity, energy, tempo, explicit)) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},artist{},{},{},{},{}\n",
            genre,
            i % 7,
            fmt(popularity),
            fmt(energy),
            fmt(tempo),
            explicit
        ));
    }
    Parser::new().parse_bytes(csv.as_bytes()).unwrap()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn every_analysis_is_total_and_deterministic(rows in rows()) {
        let dataset = to_dataset(&rows);
        for analysis in Analysis::ALL {
            let first = analysis.run(&dataset);
            let second = analysis.run(&dataset);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn pearson_stays_in_unit_range(
        pairs in prop::collection::vec((cell(-1e3..1e3), cell(-1e3..1e3)), 0..50)
    ) {
        let (xs, ys): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        if let Some(r) = pearson(&xs, &ys) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn linear_relation_is_perfectly_correlated(
        xs in prop::collection::vec(-1e3f64..1e3, 2..40),
        slope in 0.5f64..10.0,
    ) {
        prop_assume!(xs.iter().any(|x| (x - xs[0]).abs() > 1e-6));
        let ys: Vec<Option<f64>> = xs.iter().map(|x| Some(slope * x + 3.0)).collect();
        let xs: Vec<Option<f64>> = xs.into_iter().map(Some).collect();
        let r = pearson(&xs, &ys).unwrap();
        prop_assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_proportions_sum_to_one_or_zero(rows in rows()) {
        let dataset = to_dataset(&rows);
        let output = Analysis::ExplicitContent.run(&dataset);
        let (Values::Numbers(explicit), Values::Numbers(clean)) =
            (&output.chart.series[0].y, &output.chart.series[1].y)
        else {
            panic!("expected numeric proportions");
        };
        for (e, c) in explicit.iter().zip(clean) {
            let total = e + c;
            prop_assert!(total == 0.0 || (total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn box_summary_is_ordered(values in prop::collection::vec(-1e4f64..1e4, 1..100)) {
        let summary = BoxSummary::from_values(&values).unwrap();
        prop_assert!(summary.min <= summary.q1);
        prop_assert!(summary.q1 <= summary.median);
        prop_assert!(summary.median <= summary.q3);
        prop_assert!(summary.q3 <= summary.max);
        prop_assert_eq!(summary.count, values.len());
    }
}
