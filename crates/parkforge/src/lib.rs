//! parkforge - parking row layout enumeration in Rust
//!
//! Load a [`PlannerConfig`], build a [`Zone`] and let [`ParkingPlanner`]
//! enumerate and rank the row layouts of every boundary edge.
//!
//! # Example
//!
//! ```rust
//! use parkforge::prelude::*;
//!
//! let planner = ParkingPlanner::new(
//!     PlannerConfig::new().with_angles(vec![90.0], false),
//! ).unwrap();
//! let zone = planner.zone(Polygon::rectangle(40.0, 25.0)).unwrap();
//!
//! let best = planner.plan_edge(&zone, 0).unwrap();
//! assert_eq!(best[0].kinds(), "RSRSR");
//! ```

// Site model and geometry
pub use parkforge_core::{
    GeometryProvider, ParkForgeError, PlanarKernel, Point, Polygon, Segment, StallCatalog,
    StallFootprint, StallTypeSpec, StallVariant, Vector, Zone,
};

// Configuration
pub use parkforge_config::{
    ConfigError, EdgeThreadCount, MetricKind, PlannerConfig, SearchConfig, SeedMode,
};

// Search, results and ranking
pub use parkforge_solver::{
    extract_pattern, metric_for, rank_branches, solve_site, Branch, EdgeSolution, FnMetric,
    Metric, RecordEntry, RowKind, RowLayoutSolver, RowNode, SearchStats, SolverSettings,
    Termination,
};

#[cfg(feature = "console")]
pub use parkforge_console as console;

mod planner;
pub use planner::{EdgePlan, ParkingPlanner, PlanError, SitePlan};

pub mod prelude {
    pub use super::{
        Branch, EdgeThreadCount, MetricKind, ParkingPlanner, PlannerConfig, Point, Polygon,
        SeedMode, Zone,
    };
}
