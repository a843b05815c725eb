//! Tests for the row layout enumeration.

use super::*;
use crate::metric::StallUnits;
use parkforge_core::PlanarKernel;
use parkforge_test::{
    double_first_catalog, right_angle_catalog, site_40x25, skewed_triangle_zone,
    standard_catalog, triangle_zone, NoOffsetKernel, DEPTH_25, ROAD_WIDTH,
};

fn kinds(branches: &[Branch]) -> Vec<String> {
    branches.iter().map(Branch::kinds).collect()
}

fn settings() -> SolverSettings {
    SolverSettings::default().with_road_width(ROAD_WIDTH)
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn test_stall_seed_alternates_with_stop_margin() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel).with_settings(
        settings()
            .with_seeds(SeedMode::Stall)
            .with_stop_margin(5.3),
    );

    let branches = solver.solve_edge(0).unwrap();
    assert_eq!(kinds(&branches), vec!["SRSR"]);
    for branch in &branches {
        assert!(!branch.kinds().contains("SS"));
        assert!(branch.total_width() > DEPTH_25 - 5.3);
        assert_close(branch.total_width(), 24.6);
    }
}

#[test]
fn test_stall_seed_without_margin_ends_unsatisfied() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_seeds(SeedMode::Stall));

    let solution = solver.solve_edge_with_stats(0).unwrap();
    // S R S R S reaches 29.9 on an unsatisfied stall row.
    assert!(solution.branches.is_empty());
    assert_eq!(solution.stats.branches_pruned, 1);
    assert_eq!(solution.stats.nodes_expanded, 5);
}

#[test]
fn test_road_seed_alternates() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_seeds(SeedMode::Road));

    let branches = solver.solve_edge(0).unwrap();
    assert_eq!(kinds(&branches), vec!["RSRSR"]);
    assert_close(branches[0].total_width(), 31.6);
    assert_eq!(branches[0].termination(), Termination::DepthExhausted);
    assert_eq!(branches[0].metric_value(), 2.0);
}

#[test]
fn test_leading_road_credit_allows_stacked_stalls() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_credit_leading_road(true));

    let branches = solver.solve_edge(0).unwrap();
    assert_eq!(kinds(&branches), vec!["SRSSR", "SRSRS", "RSSRS", "RSRSR"]);

    // A stall row directly after another stall row only follows a
    // connected one.
    for branch in &branches {
        for pair in branch.rows().windows(2) {
            if let (Some(first), true) = (pair[0].as_stall(), pair[1].is_stall()) {
                assert!(first.is_connected());
            }
        }
    }
}

#[test]
fn test_leading_road_credit_with_stall_depth_margin() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let credited = settings()
        .with_credit_leading_road(true)
        .with_stop_margin(catalog.primary().width());

    let stall_only = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(credited.clone().with_seeds(SeedMode::Stall));
    // S R S then a second stall row reaches the margin still unsatisfied.
    let solution = stall_only.solve_edge_with_stats(0).unwrap();
    assert_eq!(kinds(&solution.branches), vec!["SRSR"]);
    assert_eq!(solution.stats.branches_pruned, 1);

    let both = RowLayoutSolver::new(&zone, &catalog, &kernel).with_settings(credited);
    let branches = both.solve_edge(0).unwrap();
    assert_eq!(kinds(&branches), vec!["SRSR", "RSSR", "RSRS"]);
    for branch in &branches {
        assert_close(branch.total_width(), 24.6);
        assert_eq!(branch.termination(), Termination::DepthExhausted);
    }
}

#[test]
fn test_seed_stall_uses_first_catalog_entry() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = double_first_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_seeds(SeedMode::Stall));

    let branches = solver.solve_edge(0).unwrap();
    assert!(!branches.is_empty());
    for branch in &branches {
        let seed = branch.rows()[0].as_stall().unwrap();
        assert_eq!(seed.stall_type(), catalog.primary());
        assert_eq!(branch.rows()[0].reference_line(), Some(&zone.edges()[0]));
    }
}

#[test]
fn test_branches_are_well_formed() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = standard_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel).with_settings(settings());

    for edge in 0..2 {
        let max_offset = zone.max_offset_length(edge).unwrap();
        let branches = solver.solve_edge(edge).unwrap();
        assert!(!branches.is_empty());

        for branch in &branches {
            let summed: f64 = branch.rows().iter().map(RowNode::width).sum();
            assert_close(branch.total_width(), summed);
            assert_eq!(branch.pattern().len(), branch.len());
            assert!(!branch.last().unwrap().is_unsatisfied_stall());
            assert!(branch.rows().iter().all(|row| row.base_edge_id() == edge));
            // Without leading-road credit no stall row is ever connected
            // before the next road arrives.
            assert!(!branch.kinds().contains("SS"));
            match branch.termination() {
                Termination::DepthExhausted => assert!(branch.total_width() >= max_offset),
                Termination::GeometryExhausted => assert!(branch.total_width() < max_offset),
            }
        }
    }
}

#[test]
fn test_repeat_solves_are_identical() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = standard_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel);

    let first = solver.solve_edge(0).unwrap();
    let second = solver.solve_edge(0).unwrap();
    assert_eq!(first, second);
    assert_eq!(kinds(&first), kinds(&second));
}

#[test]
fn test_discovery_order_follows_catalog_order() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = standard_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_seeds(SeedMode::Road));

    let branches = solver.solve_edge(0).unwrap();
    // The first stall row of the first branch is the first catalog entry.
    let first_stall = branches[0].stall_rows().next().unwrap();
    assert_eq!(first_stall.stall_type(), catalog.primary());
}

#[test]
fn test_kernel_failure_is_geometry_exhaustion() {
    let kernel = NoOffsetKernel::default();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel);

    let solution = solver.solve_edge_with_stats(0).unwrap();
    // Stall seed: S then R without a line is committed. Road seed: R then
    // an unsatisfied S without a line is pruned.
    assert_eq!(kinds(&solution.branches), vec!["SR"]);
    let branch = &solution.branches[0];
    assert_eq!(branch.termination(), Termination::GeometryExhausted);
    assert!(branch.last().unwrap().reference_line().is_none());
    assert_eq!(solution.stats.geometry_exhaustions, 1);
    assert_eq!(solution.stats.branches_pruned, 1);
}

#[test]
fn test_site_shape_exhausts_before_nominal_depth() {
    let kernel = PlanarKernel::new();
    let zone = skewed_triangle_zone();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel);

    let branches = solver.solve_edge(0).unwrap();
    assert_eq!(kinds(&branches), vec!["RSR"]);
    assert_eq!(branches[0].termination(), Termination::GeometryExhausted);
    assert!(branches[0].total_width() < zone.max_offset_length(0).unwrap());
}

#[test]
fn test_triangle_rows_shrink() {
    let kernel = PlanarKernel::new();
    let zone = triangle_zone();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel);

    let branches = solver.solve_edge(0).unwrap();
    assert_eq!(kinds(&branches), vec!["SRSR"]);
    let lengths: Vec<f64> = branches[0]
        .rows()
        .iter()
        .filter_map(RowNode::reference_line)
        .map(|line| line.length())
        .collect();
    assert!(lengths.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_depth_limit_discards_paths() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_depth_limit(Some(2)));

    let solution = solver.solve_edge_with_stats(0).unwrap();
    assert!(solution.branches.is_empty());
    assert_eq!(solution.stats.depth_limited, 2);
}

#[test]
fn test_node_limit_stops_search() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = standard_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_node_limit(Some(10)));

    let solution = solver.solve_edge_with_stats(1).unwrap();
    assert!(solution.stats.node_limit_reached);
    assert_eq!(solution.stats.nodes_expanded, 10);
}

#[test]
fn test_metric_is_stored_on_branches() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_seeds(SeedMode::Road))
        .with_metric(Box::new(StallUnits));

    let branches = solver.solve_edge(0).unwrap();
    // Two full-width 90° rows of floor(40 / 2.7) = 14 stalls.
    assert_eq!(branches[0].metric_value(), 28.0);
    assert_eq!(solver.metric().name(), "stall_units");
}

#[test]
fn test_edge_out_of_range() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel);

    assert_eq!(
        solver.solve_edge(4).unwrap_err(),
        ParkForgeError::EdgeOutOfRange {
            edge: 4,
            edge_count: 4
        }
    );
}

#[test]
fn test_invalid_settings_rejected() {
    let kernel = PlanarKernel::new();
    let zone = site_40x25();
    let catalog = right_angle_catalog();
    let solver = RowLayoutSolver::new(&zone, &catalog, &kernel)
        .with_settings(settings().with_road_width(0.0));

    assert!(matches!(
        solver.solve_edge(0),
        Err(ParkForgeError::Config(_))
    ));
    assert!(SolverSettings::default()
        .with_stop_margin(-1.0)
        .validate()
        .is_err());
    assert!(SolverSettings::default()
        .with_depth_limit(Some(0))
        .validate()
        .is_err());
}

#[test]
fn test_settings_from_config() {
    let config = PlannerConfig::new().with_road_width(6.0).with_node_limit(None);
    let settings = SolverSettings::from(&config);
    assert_eq!(settings.road_width, 6.0);
    assert_eq!(settings.node_limit, None);
    assert_eq!(settings.stop_margin, 0.0);
    assert_eq!(settings.seeds, SeedMode::Both);
}
