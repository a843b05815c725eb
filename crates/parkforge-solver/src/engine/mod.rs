//! Row layout enumeration.
//!
//! Depth-first search that grows stall and road rows inward from one
//! boundary edge. Every path is a chain in a [`RowArena`]; the frontier
//! holds [`Cursor`]s (tip id, row count, cumulative width), so branching
//! never copies a row list. Children are pushed in reverse so they are
//! explored in catalog order.
//!
//! # Transitions
//!
//! | Tip row | Children |
//! |---|---|
//! | stall, unsatisfied | one road row |
//! | stall, connected | one stall row per catalog entry, then one road row |
//! | road | one stall row per catalog entry |
//!
//! # Termination
//!
//! - Cumulative width reached the edge's usable depth: commit, unless the
//!   tip is an unsatisfied stall row, which is pruned.
//! - The tip has no reference line: commit (same pruning rule).
//! - Row ceiling reached: discard.

mod offset;

#[cfg(test)]
mod tests;

use parkforge_config::{PlannerConfig, SeedMode};
use parkforge_core::{
    GeometryProvider, ParkForgeError, Result, Segment, StallCatalog, StallTypeSpec, Zone,
};
use tracing::{debug, info, trace, warn};

use crate::branch::{Branch, Termination};
use crate::metric::{Metric, StallRowCount};
use crate::row::{RoadRow, RowArena, RowId, RowNode, StallRow};
use crate::stats::SearchStats;

use offset::RowOffsetter;

/// Search parameters for [`RowLayoutSolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSettings {
    /// Width of every road row.
    pub road_width: f64,
    /// Maximum nodes expanded per edge (None = unlimited).
    pub node_limit: Option<u64>,
    /// Maximum rows per branch (None = unlimited).
    pub depth_limit: Option<usize>,
    /// Midpoint stretch applied before clipping an offset line.
    pub overshoot_scale: f64,
    /// Slack subtracted from the usable depth before a branch is complete.
    pub stop_margin: f64,
    /// Give a stall row placed right after a road row one connection.
    pub credit_leading_road: bool,
    /// Seed rows to search from.
    pub seeds: SeedMode,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::from(&PlannerConfig::default())
    }
}

impl From<&PlannerConfig> for SolverSettings {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            road_width: config.road_width,
            node_limit: config.search.node_limit,
            depth_limit: config.search.depth_limit,
            overshoot_scale: config.search.overshoot_scale,
            stop_margin: config.search.stop_margin,
            credit_leading_road: config.search.credit_leading_road,
            seeds: config.search.seeds,
        }
    }
}

impl SolverSettings {
    pub fn with_road_width(mut self, width: f64) -> Self {
        self.road_width = width;
        self
    }

    pub fn with_node_limit(mut self, limit: Option<u64>) -> Self {
        self.node_limit = limit;
        self
    }

    pub fn with_depth_limit(mut self, limit: Option<usize>) -> Self {
        self.depth_limit = limit;
        self
    }

    pub fn with_stop_margin(mut self, margin: f64) -> Self {
        self.stop_margin = margin;
        self
    }

    pub fn with_credit_leading_road(mut self, credit: bool) -> Self {
        self.credit_leading_road = credit;
        self
    }

    pub fn with_seeds(mut self, seeds: SeedMode) -> Self {
        self.seeds = seeds;
        self
    }

    /// Rejects values that would make the search meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ParkForgeError::Config`] for a non-positive road width, an
    /// overshoot scale of 1 or less, a negative stop margin, or a zero
    /// depth limit.
    pub fn validate(&self) -> Result<()> {
        if !(self.road_width.is_finite() && self.road_width > 0.0) {
            return Err(ParkForgeError::Config(format!(
                "road width must be positive, got {}",
                self.road_width
            )));
        }
        if !(self.overshoot_scale.is_finite() && self.overshoot_scale > 1.0) {
            return Err(ParkForgeError::Config(format!(
                "overshoot scale must be greater than 1, got {}",
                self.overshoot_scale
            )));
        }
        if !(self.stop_margin.is_finite() && self.stop_margin >= 0.0) {
            return Err(ParkForgeError::Config(format!(
                "stop margin must not be negative, got {}",
                self.stop_margin
            )));
        }
        if self.depth_limit == Some(0) {
            return Err(ParkForgeError::Config(
                "depth limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Branches found for one edge plus the search counters.
#[derive(Debug, Clone)]
pub struct EdgeSolution {
    pub edge_id: usize,
    /// Committed branches in discovery order.
    pub branches: Vec<Branch>,
    pub stats: SearchStats,
}

/// A frontier entry: the tip of a path in the arena.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    tip: RowId,
    len: usize,
    total_width: f64,
}

/// Enumerates row layouts for the edges of one zone.
///
/// The solver only borrows its inputs and keeps no state between calls,
/// so one instance can solve several edges concurrently.
///
/// # Example
///
/// ```
/// use parkforge_core::{PlanarKernel, Polygon, StallCatalog, StallFootprint, Zone};
/// use parkforge_solver::{RowLayoutSolver, SolverSettings};
///
/// let kernel = PlanarKernel::new();
/// let zone = Zone::from_polygon(Polygon::rectangle(40.0, 25.0), &kernel).unwrap();
/// let catalog = StallCatalog::right_angle_only(StallFootprint::STANDARD).unwrap();
///
/// let solver = RowLayoutSolver::new(&zone, &catalog, &kernel);
/// let branches = solver.solve_edge(0).unwrap();
///
/// assert!(!branches.is_empty());
/// assert!(branches.iter().all(|b| b.total_width() >= 25.0));
/// ```
#[derive(Debug)]
pub struct RowLayoutSolver<'a, G> {
    zone: &'a Zone,
    catalog: &'a StallCatalog,
    geometry: &'a G,
    metric: Box<dyn Metric>,
    settings: SolverSettings,
}

impl<'a, G: GeometryProvider> RowLayoutSolver<'a, G> {
    /// Creates a solver with default settings and the stall row count
    /// metric.
    pub fn new(zone: &'a Zone, catalog: &'a StallCatalog, geometry: &'a G) -> Self {
        Self {
            zone,
            catalog,
            geometry,
            metric: Box::new(StallRowCount),
            settings: SolverSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the metric stored on each committed branch.
    pub fn with_metric(mut self, metric: Box<dyn Metric>) -> Self {
        self.metric = metric;
        self
    }

    pub fn zone(&self) -> &Zone {
        self.zone
    }

    pub fn catalog(&self) -> &StallCatalog {
        self.catalog
    }

    pub fn geometry(&self) -> &G {
        self.geometry
    }

    pub fn metric(&self) -> &dyn Metric {
        self.metric.as_ref()
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Returns every terminal branch for `edge_id`, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`ParkForgeError::EdgeOutOfRange`] for an unknown edge and
    /// [`ParkForgeError::Config`] for invalid settings.
    pub fn solve_edge(&self, edge_id: usize) -> Result<Vec<Branch>> {
        Ok(self.solve_edge_with_stats(edge_id)?.branches)
    }

    /// Like [`RowLayoutSolver::solve_edge`], also returning search counters.
    pub fn solve_edge_with_stats(&self, edge_id: usize) -> Result<EdgeSolution> {
        self.settings.validate()?;
        let edge = *self.zone.edge(edge_id)?;
        let max_offset = self.zone.max_offset_length(edge_id)?;
        let direction = self.zone.offset_direction(edge_id)?;

        let mut search = EdgeSearch {
            edge_id,
            catalog: self.catalog,
            geometry: self.geometry,
            metric: self.metric.as_ref(),
            settings: &self.settings,
            offsetter: RowOffsetter::new(
                self.zone,
                self.geometry,
                direction,
                self.settings.overshoot_scale,
            ),
            threshold: max_offset - self.settings.stop_margin,
            arena: RowArena::new(),
            frontier: Vec::new(),
            branches: Vec::new(),
            stats: SearchStats::default(),
        };

        info!(
            event = "edge_solve_start",
            edge = edge_id,
            max_offset = max_offset,
            catalog_size = self.catalog.len(),
            seeds = ?self.settings.seeds,
        );
        search.stats.start();
        search.run(edge);
        search.stats.finish();

        let stats = search.stats;
        info!(
            event = "edge_solve_end",
            edge = edge_id,
            branches = stats.branches_committed,
            pruned = stats.branches_pruned,
            exhausted = stats.geometry_exhaustions,
            nodes = stats.nodes_expanded,
            duration_ms = stats.elapsed_ms(),
        );

        Ok(EdgeSolution {
            edge_id,
            branches: search.branches,
            stats,
        })
    }
}

/// Children generated for a tip row.
#[derive(Debug, Clone, Copy)]
enum Next {
    Road,
    StallsThenRoad,
    Stalls,
}

/// Mutable state of one edge search.
struct EdgeSearch<'s> {
    edge_id: usize,
    catalog: &'s StallCatalog,
    geometry: &'s dyn GeometryProvider,
    metric: &'s dyn Metric,
    settings: &'s SolverSettings,
    offsetter: RowOffsetter<'s>,
    threshold: f64,
    arena: RowArena,
    frontier: Vec<Cursor>,
    branches: Vec<Branch>,
    stats: SearchStats,
}

impl EdgeSearch<'_> {
    fn run(&mut self, edge: Segment) {
        if self.settings.seeds.includes_stall() {
            let spec = *self.catalog.primary();
            let seed = StallRow::new(self.edge_id, Some(edge), spec);
            self.search_from(seed.into(), spec.width());
        }
        if self.settings.seeds.includes_road() && !self.stats.node_limit_reached {
            let width = self.settings.road_width;
            let seed = RoadRow::new(self.edge_id, Some(edge), width);
            self.search_from(seed.into(), width);
        }
    }

    fn search_from(&mut self, seed: RowNode, width: f64) {
        let tip = self.arena.push_root(seed);
        self.frontier.push(Cursor {
            tip,
            len: 1,
            total_width: width,
        });

        while let Some(cursor) = self.frontier.pop() {
            if let Some(limit) = self.settings.node_limit {
                if self.stats.nodes_expanded >= limit {
                    self.stats.node_limit_reached = true;
                    warn!(
                        event = "search_limit",
                        edge = self.edge_id,
                        node_limit = limit,
                        branches = self.branches.len(),
                    );
                    self.frontier.clear();
                    return;
                }
            }
            self.stats.record_expansion();
            self.visit(cursor);
        }
    }

    fn visit(&mut self, cursor: Cursor) {
        let node = self.arena.get(cursor.tip);
        trace!(
            event = "node_expanded",
            edge = self.edge_id,
            depth = cursor.len,
            kind = %node.kind(),
            total_width = cursor.total_width,
        );
        let reference = node.reference_line().copied();
        let next = match node {
            RowNode::Stall(row) if !row.is_connected() => Next::Road,
            RowNode::Stall(_) => Next::StallsThenRoad,
            RowNode::Road(_) => Next::Stalls,
        };

        if cursor.total_width >= self.threshold {
            self.finish(cursor, Termination::DepthExhausted);
            return;
        }
        if reference.is_none() {
            self.finish(cursor, Termination::GeometryExhausted);
            return;
        }
        if self
            .settings
            .depth_limit
            .is_some_and(|limit| cursor.len >= limit)
        {
            self.stats.record_depth_limit();
            return;
        }

        let catalog = self.catalog;
        let reference = reference.as_ref();
        let mut children: Vec<Cursor> = Vec::with_capacity(catalog.len() + 1);
        match next {
            Next::Road => children.push(self.place_road(cursor, reference)),
            Next::StallsThenRoad => {
                for spec in catalog {
                    children.push(self.place_stall(cursor, reference, *spec, false));
                }
                children.push(self.place_road(cursor, reference));
            }
            Next::Stalls => {
                let credit = self.settings.credit_leading_road;
                for spec in catalog {
                    children.push(self.place_stall(cursor, reference, *spec, credit));
                }
            }
        }
        self.frontier.extend(children.into_iter().rev());
    }

    fn place_stall(
        &mut self,
        parent: Cursor,
        reference: Option<&Segment>,
        spec: StallTypeSpec,
        credit: bool,
    ) -> Cursor {
        let line = self.offsetter.offset(reference, spec.width());
        let mut row = StallRow::new(self.edge_id, line, spec);
        if credit {
            row.register_connection();
        }
        Cursor {
            tip: self.arena.place_stall(parent.tip, row),
            len: parent.len + 1,
            total_width: parent.total_width + spec.width(),
        }
    }

    fn place_road(&mut self, parent: Cursor, reference: Option<&Segment>) -> Cursor {
        let width = self.settings.road_width;
        let line = self.offsetter.offset(reference, width);
        let road = RoadRow::new(self.edge_id, line, width);
        Cursor {
            tip: self.arena.place_road(parent.tip, road),
            len: parent.len + 1,
            total_width: parent.total_width + width,
        }
    }

    fn finish(&mut self, cursor: Cursor, termination: Termination) {
        if self.arena.get(cursor.tip).is_unsatisfied_stall() {
            self.stats.record_prune();
            trace!(
                event = "branch_pruned",
                edge = self.edge_id,
                rows = cursor.len,
                total_width = cursor.total_width,
            );
            return;
        }

        let rows = self.arena.materialize(cursor.tip);
        let mut branch = Branch::new(self.edge_id, rows, cursor.total_width, termination);
        branch.set_metric_value(self.metric.evaluate(&branch, self.geometry));
        self.stats.record_commit(termination);
        debug!(
            event = "branch_committed",
            edge = self.edge_id,
            rows = branch.len(),
            total_width = branch.total_width(),
            reason = %termination,
        );
        self.branches.push(branch);
    }
}
