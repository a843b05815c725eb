//! parkforge Solver - row layout enumeration
//!
//! This crate grows alternating stall and road rows inward from the
//! boundary edges of a [`parkforge_core::Zone`]:
//! - Row model stored in an append-only arena with copy-on-write credits
//! - Depth-first enumeration engine with node and row ceilings
//! - Completed branches, flat records and pattern extraction
//! - Pluggable metrics and stable ranking
//! - Per-edge search statistics and a parallel multi-edge driver

pub mod branch;
pub mod engine;
pub mod metric;
pub mod row;
pub mod site;
pub mod stats;

pub use branch::{extract_pattern, Branch, RecordEntry, Termination};
pub use engine::{EdgeSolution, RowLayoutSolver, SolverSettings};
pub use metric::{
    metric_for, rank_branches, FnMetric, Metric, StallRowCount, StallRowLength, StallUnits,
};
pub use row::{RoadRow, RowArena, RowId, RowKind, RowNode, StallRow};
pub use site::{solve_site, total_stats};
pub use stats::SearchStats;
