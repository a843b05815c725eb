//! Solving every boundary edge of a zone.
//!
//! Edges share only read-only data (zone, catalog, kernel), so they are
//! solved independently. With [`EdgeThreadCount::Auto`] the global rayon
//! pool is used; [`EdgeThreadCount::Count`] builds a dedicated pool.

use parkforge_config::EdgeThreadCount;
use parkforge_core::{GeometryProvider, ParkForgeError, Result};
use rayon::prelude::*;
use tracing::info;

use crate::engine::{EdgeSolution, RowLayoutSolver};
use crate::stats::SearchStats;

/// Solves every edge of the solver's zone.
///
/// Solutions are returned in edge order regardless of threading.
///
/// # Errors
///
/// Returns the first edge error, or [`ParkForgeError::Config`] if a
/// dedicated thread pool cannot be built.
///
/// # Example
///
/// ```
/// use parkforge_config::EdgeThreadCount;
/// use parkforge_core::{PlanarKernel, Polygon, StallCatalog, StallFootprint, Zone};
/// use parkforge_solver::{solve_site, RowLayoutSolver};
///
/// let kernel = PlanarKernel::new();
/// let zone = Zone::from_polygon(Polygon::rectangle(40.0, 25.0), &kernel).unwrap();
/// let catalog = StallCatalog::right_angle_only(StallFootprint::STANDARD).unwrap();
/// let solver = RowLayoutSolver::new(&zone, &catalog, &kernel);
///
/// let solutions = solve_site(&solver, EdgeThreadCount::Auto).unwrap();
/// let edges: Vec<_> = solutions.iter().map(|s| s.edge_id).collect();
/// assert_eq!(edges, vec![0, 1, 2, 3]);
/// ```
pub fn solve_site<G: GeometryProvider>(
    solver: &RowLayoutSolver<'_, G>,
    threads: EdgeThreadCount,
) -> Result<Vec<EdgeSolution>> {
    let edge_count = solver.zone().edge_count();
    info!(
        event = "site_solve_start",
        edges = edge_count,
        threads = ?threads,
    );

    let solutions = match threads {
        EdgeThreadCount::None => (0..edge_count)
            .map(|edge| solver.solve_edge_with_stats(edge))
            .collect::<Result<Vec<_>>>()?,
        EdgeThreadCount::Auto => solve_parallel(solver, edge_count)?,
        EdgeThreadCount::Count(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParkForgeError::Config(format!("edge thread pool: {e}")))?;
            pool.install(|| solve_parallel(solver, edge_count))?
        }
    };

    let totals = total_stats(&solutions);
    info!(
        event = "site_solve_end",
        edges = solutions.len(),
        branches = totals.branches_committed,
        nodes = totals.nodes_expanded,
        duration_ms = totals.elapsed_ms(),
    );
    Ok(solutions)
}

fn solve_parallel<G: GeometryProvider>(
    solver: &RowLayoutSolver<'_, G>,
    edge_count: usize,
) -> Result<Vec<EdgeSolution>> {
    (0..edge_count)
        .into_par_iter()
        .map(|edge| solver.solve_edge_with_stats(edge))
        .collect()
}

/// Sums the counters of several edge searches.
///
/// The elapsed time is the sum of per-edge times, not wall-clock time.
pub fn total_stats(solutions: &[EdgeSolution]) -> SearchStats {
    let mut totals = SearchStats::default();
    for solution in solutions {
        totals.merge(&solution.stats);
    }
    totals
}
