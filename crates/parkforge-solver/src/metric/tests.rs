//! Tests for metrics and ranking.

use super::*;
use crate::branch::Termination;
use crate::row::{RoadRow, RowNode, StallRow};
use parkforge_core::{
    PlanarKernel, Point, Segment, StallCatalog, StallFootprint, StallTypeSpec, StallVariant,
};

fn line(length: f64) -> Option<Segment> {
    Some(Segment::new(Point::new(0.0, 0.0), Point::new(length, 0.0)))
}

fn right_angle() -> StallTypeSpec {
    *StallCatalog::right_angle_only(StallFootprint::STANDARD)
        .unwrap()
        .primary()
}

fn branch(stalls: usize, line_length: f64) -> Branch {
    let mut rows = Vec::new();
    for _ in 0..stalls {
        rows.push(RowNode::from(StallRow::new(0, line(line_length), right_angle())));
        rows.push(RowNode::from(RoadRow::new(0, line(line_length), 7.0)));
    }
    let width = rows.iter().map(RowNode::width).sum();
    Branch::new(0, rows, width, Termination::DepthExhausted)
}

#[test]
fn test_stall_row_count() {
    let kernel = PlanarKernel::new();
    assert_eq!(StallRowCount.evaluate(&branch(3, 10.0), &kernel), 3.0);
    assert_eq!(StallRowCount.name(), "stall_row_count");
}

#[test]
fn test_stall_row_length_ignores_roads() {
    let kernel = PlanarKernel::new();
    let value = StallRowLength.evaluate(&branch(2, 40.0), &kernel);
    assert!((value - 80.0).abs() < 1e-9);
}

#[test]
fn test_stall_units_floor_and_double_depth() {
    let kernel = PlanarKernel::new();
    // 40 / 2.7 = 14.8 -> 14 stalls per row.
    assert_eq!(StallUnits.evaluate(&branch(1, 40.0), &kernel), 14.0);

    let double =
        StallTypeSpec::from_footprint(StallFootprint::STANDARD, 45.0, StallVariant::Double)
            .unwrap();
    let rows = vec![RowNode::from(StallRow::new(0, line(40.0), double))];
    let width = double.width();
    let b = Branch::new(0, rows, width, Termination::DepthExhausted);
    let per_depth = (40.0 / double.length()).floor();
    assert_eq!(StallUnits.evaluate(&b, &kernel), per_depth * 2.0);
}

#[test]
fn test_missing_reference_line_counts_zero_length() {
    let kernel = PlanarKernel::new();
    let rows = vec![RowNode::from(StallRow::new(0, None, right_angle()))];
    let b = Branch::new(0, rows, 5.3, Termination::GeometryExhausted);
    assert_eq!(StallRowLength.evaluate(&b, &kernel), 0.0);
    assert_eq!(StallUnits.evaluate(&b, &kernel), 0.0);
    assert_eq!(StallRowCount.evaluate(&b, &kernel), 1.0);
}

#[test]
fn test_metric_for_kind() {
    assert_eq!(metric_for(MetricKind::StallRowCount).name(), "stall_row_count");
    assert_eq!(metric_for(MetricKind::StallRowLength).name(), "stall_row_length");
    assert_eq!(metric_for(MetricKind::StallUnits).name(), "stall_units");
}

#[test]
fn test_rank_descending_and_stable() {
    let kernel = PlanarKernel::new();
    // Same stall count, different line lengths so ties are identifiable.
    let branches = vec![
        branch(1, 10.0),
        branch(3, 10.0),
        branch(1, 20.0),
        branch(2, 10.0),
    ];
    let ranked = rank_branches(branches, &StallRowCount, &kernel);

    let counts: Vec<_> = ranked.iter().map(Branch::metric_value).collect();
    assert_eq!(counts, vec![3.0, 2.0, 1.0, 1.0]);
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));

    // The two one-stall branches keep their discovery order.
    let tail = StallRowLength.evaluate(&ranked[2], &kernel);
    assert!((tail - 10.0).abs() < 1e-9);
}

#[test]
fn test_rank_with_closure_metric() {
    let kernel = PlanarKernel::new();
    let metric = FnMetric::new("negative_width", |b: &Branch, _: &dyn GeometryProvider| {
        -b.total_width()
    });
    let ranked = rank_branches(vec![branch(2, 5.0), branch(1, 5.0)], &metric, &kernel);
    assert_eq!(ranked[0].stall_row_count(), 1);
}

#[test]
fn test_rank_puts_nan_scores_last() {
    let kernel = PlanarKernel::new();
    // Every third branch scores NaN.
    let metric = FnMetric::new("gappy", |b: &Branch, _: &dyn GeometryProvider| {
        let rows = b.stall_row_count();
        if rows % 3 == 0 {
            f64::NAN
        } else {
            rows as f64
        }
    });
    let branches: Vec<Branch> = (1..=64).map(|n| branch(n % 7 + 1, 10.0)).collect();
    let ranked = rank_branches(branches, &metric, &kernel);

    assert_eq!(ranked.len(), 64);
    let values: Vec<f64> = ranked.iter().map(Branch::metric_value).collect();
    let first_nan = values.iter().position(|v| v.is_nan()).unwrap();
    assert!(first_nan > 0);
    assert!(values[first_nan..].iter().all(|v| v.is_nan()));
    assert!(values[..first_nan].windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(values[0], 7.0);
}

#[test]
fn test_rank_empty() {
    let kernel = PlanarKernel::new();
    assert!(rank_branches(Vec::new(), &StallRowCount, &kernel).is_empty());
}
