//! Configuration system for parkforge.
//!
//! Load planner configuration from TOML or YAML to control road width,
//! the stall catalog, search ceilings and ranking without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use parkforge_config::{MetricKind, PlannerConfig};
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     road_width = 6.5
//!     metric = "stall_row_length"
//!
//!     [catalog]
//!     angles = [90, 45]
//!     double_variants = false
//!
//!     [search]
//!     node_limit = 50000
//! "#).unwrap();
//!
//! assert_eq!(config.road_width, 6.5);
//! assert_eq!(config.metric, MetricKind::StallRowLength);
//! assert_eq!(config.build_catalog().unwrap().len(), 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use parkforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::load("parkforge.toml").unwrap_or_default();
//! assert_eq!(config.road_width, 7.0);
//! ```

use std::path::Path;

use parkforge_core::{ParkForgeError, StallCatalog, StallFootprint};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] ParkForgeError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planner configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Width of every road row.
    #[serde(default = "default_road_width")]
    pub road_width: f64,

    /// Base stall footprint the catalog is derived from.
    #[serde(default)]
    pub stall: FootprintConfig,

    /// Which stall orientations to consider.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Search ceilings and connectivity options.
    #[serde(default)]
    pub search: SearchConfig,

    /// Metric used to rank completed branches.
    #[serde(default)]
    pub metric: MetricKind,

    /// Threads used when solving several boundary edges.
    #[serde(default)]
    pub edge_threads: EdgeThreadCount,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            road_width: default_road_width(),
            stall: FootprintConfig::default(),
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            metric: MetricKind::default(),
            edge_threads: EdgeThreadCount::default(),
        }
    }
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails [`PlannerConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Like [`PlannerConfig::load`], but a missing file yields the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Any failure other than the file not existing is returned, so a
    /// malformed or invalid file is never silently replaced by defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the road width.
    pub fn with_road_width(mut self, width: f64) -> Self {
        self.road_width = width;
        self
    }

    /// Sets the base stall footprint.
    pub fn with_footprint(mut self, width: f64, length: f64) -> Self {
        self.stall = FootprintConfig { width, length };
        self
    }

    /// Sets the catalog angles.
    pub fn with_angles(mut self, angles: Vec<f64>, double_variants: bool) -> Self {
        self.catalog = CatalogConfig {
            angles,
            double_variants,
        };
        self
    }

    /// Sets the search node ceiling.
    pub fn with_node_limit(mut self, limit: Option<u64>) -> Self {
        self.search.node_limit = limit;
        self
    }

    /// Sets the ranking metric.
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the edge thread count.
    pub fn with_edge_threads(mut self, threads: EdgeThreadCount) -> Self {
        self.edge_threads = threads;
        self
    }

    /// Replaces the search configuration.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Checks values that would otherwise only fail mid-search.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-positive road width,
    /// footprint dimension or overshoot scale, a negative stop margin, an
    /// empty angle list, a zero depth limit or a zero thread count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.road_width.is_finite() && self.road_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "road_width must be positive, got {}",
                self.road_width
            )));
        }
        if !(self.stall.width > 0.0 && self.stall.length > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stall footprint must be positive, got {} x {}",
                self.stall.width, self.stall.length
            )));
        }
        if self.catalog.angles.is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.angles must not be empty".to_string(),
            ));
        }
        if !(self.search.overshoot_scale.is_finite() && self.search.overshoot_scale > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "search.overshoot_scale must be greater than 1, got {}",
                self.search.overshoot_scale
            )));
        }
        if !(self.search.stop_margin.is_finite() && self.search.stop_margin >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "search.stop_margin must not be negative, got {}",
                self.search.stop_margin
            )));
        }
        if self.search.depth_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "search.depth_limit must be at least 1".to_string(),
            ));
        }
        if self.edge_threads == EdgeThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "edge_threads count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the stall catalog described by this configuration.
    pub fn build_catalog(&self) -> Result<StallCatalog, ConfigError> {
        Ok(StallCatalog::from_angles(
            self.stall.footprint(),
            &self.catalog.angles,
            self.catalog.double_variants,
        )?)
    }
}

fn default_road_width() -> f64 {
    7.0
}

/// Base stall footprint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FootprintConfig {
    /// Short side of the stall.
    pub width: f64,

    /// Long side of the stall.
    pub length: f64,
}

impl FootprintConfig {
    pub fn footprint(&self) -> StallFootprint {
        StallFootprint::new(self.width, self.length)
    }
}

impl Default for FootprintConfig {
    fn default() -> Self {
        let standard = StallFootprint::STANDARD;
        Self {
            width: standard.width,
            length: standard.length,
        }
    }
}

/// Stall catalog configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CatalogConfig {
    /// Stall angles in degrees, in branch-generation order.
    #[serde(default = "default_angles")]
    pub angles: Vec<f64>,

    /// Whether to add a two-deep variant for each non-right angle.
    #[serde(default = "default_true")]
    pub double_variants: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            angles: default_angles(),
            double_variants: true,
        }
    }
}

fn default_angles() -> Vec<f64> {
    parkforge_core::STANDARD_ANGLES.to_vec()
}

fn default_true() -> bool {
    true
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Maximum number of nodes expanded per edge (None = unlimited).
    #[serde(default = "default_node_limit")]
    pub node_limit: Option<u64>,

    /// Maximum rows in one branch (None = unlimited).
    #[serde(default = "default_depth_limit")]
    pub depth_limit: Option<usize>,

    /// Midpoint scale applied to an offset row before trimming.
    #[serde(default = "default_overshoot_scale")]
    pub overshoot_scale: f64,

    /// Slack subtracted from an edge's maximum offset before a branch
    /// counts as depth exhausted.
    #[serde(default)]
    pub stop_margin: f64,

    /// Whether a stall row placed right after a road row starts with one
    /// connection already satisfied.
    #[serde(default)]
    pub credit_leading_road: bool,

    /// Which seed rows to start from.
    #[serde(default)]
    pub seeds: SeedMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_limit: default_node_limit(),
            depth_limit: default_depth_limit(),
            overshoot_scale: default_overshoot_scale(),
            stop_margin: 0.0,
            credit_leading_road: false,
            seeds: SeedMode::default(),
        }
    }
}

fn default_node_limit() -> Option<u64> {
    Some(1_000_000)
}

fn default_depth_limit() -> Option<usize> {
    Some(64)
}

fn default_overshoot_scale() -> f64 {
    20.0
}

/// Seed rows laid against the boundary edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Only a stall row facing the boundary.
    Stall,

    /// Only a setback road row.
    Road,

    /// Both roots, stall first.
    #[default]
    Both,
}

impl SeedMode {
    pub fn includes_stall(self) -> bool {
        matches!(self, SeedMode::Stall | SeedMode::Both)
    }

    pub fn includes_road(self) -> bool {
        matches!(self, SeedMode::Road | SeedMode::Both)
    }
}

/// Ranking metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Number of stall rows.
    #[default]
    StallRowCount,

    /// Summed reference-line length of all stall rows.
    StallRowLength,

    /// Estimated physical stalls.
    StallUnits,
}

/// Edge thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeThreadCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Solve edges sequentially.
    None,

    /// Specific number of threads.
    Count(usize),
}
