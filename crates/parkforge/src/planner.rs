//! Config-driven entry point.

use std::path::Path;

use parkforge_config::{ConfigError, PlannerConfig};
use parkforge_core::{GeometryProvider, ParkForgeError, PlanarKernel, Polygon, StallCatalog, Zone};
use parkforge_solver::{
    metric_for, rank_branches, solve_site, Branch, RowLayoutSolver, SearchStats, SolverSettings,
};
use thiserror::Error;

/// Error from planning a site.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] ParkForgeError),
}

/// Ranked layouts for one boundary edge.
#[derive(Debug, Clone)]
pub struct EdgePlan {
    pub edge_id: usize,
    /// Branches sorted best first.
    pub branches: Vec<Branch>,
    pub stats: SearchStats,
}

impl EdgePlan {
    pub fn best(&self) -> Option<&Branch> {
        self.branches.first()
    }
}

/// Ranked layouts for every edge of a site, in edge order.
#[derive(Debug, Clone)]
pub struct SitePlan {
    pub edges: Vec<EdgePlan>,
}

impl SitePlan {
    /// The highest-scoring branch over all edges; the lowest edge wins ties.
    pub fn best(&self) -> Option<&Branch> {
        self.edges
            .iter()
            .filter_map(EdgePlan::best)
            .fold(None, |best: Option<&Branch>, candidate| match best {
                Some(b) if b.metric_value() >= candidate.metric_value() => Some(b),
                _ => Some(candidate),
            })
    }

    pub fn branch_count(&self) -> usize {
        self.edges.iter().map(|e| e.branches.len()).sum()
    }
}

/// Builds the catalog, solver settings and metric from one
/// [`PlannerConfig`] and runs searches with them.
#[derive(Debug)]
pub struct ParkingPlanner<G = PlanarKernel> {
    config: PlannerConfig,
    catalog: StallCatalog,
    settings: SolverSettings,
    geometry: G,
}

impl ParkingPlanner<PlanarKernel> {
    /// Creates a planner using the bundled planar kernel.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Config`] if the configuration fails validation
    /// or describes an invalid catalog.
    pub fn new(config: PlannerConfig) -> Result<Self, PlanError> {
        Self::with_geometry(config, PlanarKernel::new())
    }

    /// Loads a TOML configuration file and creates a planner from it.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        Self::new(PlannerConfig::from_toml_file(path)?)
    }
}

impl<G: GeometryProvider> ParkingPlanner<G> {
    /// Creates a planner backed by a host geometry kernel.
    pub fn with_geometry(config: PlannerConfig, geometry: G) -> Result<Self, PlanError> {
        config.validate()?;
        let catalog = config.build_catalog()?;
        let settings = SolverSettings::from(&config);
        settings.validate()?;
        Ok(Self {
            config,
            catalog,
            settings,
            geometry,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StallCatalog {
        &self.catalog
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Builds a zone from a site outline using this planner's kernel.
    pub fn zone(&self, surface: Polygon) -> Result<Zone, PlanError> {
        Ok(Zone::from_polygon(surface, &self.geometry)?)
    }

    /// A solver configured like this planner.
    pub fn solver<'a>(&'a self, zone: &'a Zone) -> RowLayoutSolver<'a, G> {
        RowLayoutSolver::new(zone, &self.catalog, &self.geometry)
            .with_settings(self.settings.clone())
            .with_metric(metric_for(self.config.metric))
    }

    /// Enumerates and ranks the layouts of one edge, best first.
    pub fn plan_edge(&self, zone: &Zone, edge_id: usize) -> Result<Vec<Branch>, PlanError> {
        #[cfg(feature = "console")]
        parkforge_console::init();

        let solver = self.solver(zone);
        let branches = solver.solve_edge(edge_id)?;
        Ok(rank_branches(branches, solver.metric(), &self.geometry))
    }

    /// Enumerates and ranks the layouts of every edge.
    pub fn plan_site(&self, zone: &Zone) -> Result<SitePlan, PlanError> {
        #[cfg(feature = "console")]
        parkforge_console::init();

        let solver = self.solver(zone);
        let solutions = solve_site(&solver, self.config.edge_threads)?;
        let edges = solutions
            .into_iter()
            .map(|solution| EdgePlan {
                edge_id: solution.edge_id,
                branches: rank_branches(solution.branches, solver.metric(), &self.geometry),
                stats: solution.stats,
            })
            .collect();
        Ok(SitePlan { edges })
    }
}
