//! Error types for parkforge

use thiserror::Error;

/// Main error type for parkforge operations.
///
/// Only construction-time problems are reported here. Geometry exhaustion
/// and infeasible branches are ordinary search outcomes and never surface
/// as errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParkForgeError {
    /// A boundary edge has zero length, so no inward direction exists
    #[error("Degenerate boundary edge {edge}: zero length")]
    DegenerateEdge { edge: usize },

    /// The site surface has no computable area centroid
    #[error("Site surface has no computable centroid")]
    NoCentroid,

    /// The site has too few vertices or no edges
    #[error("Empty site: {0}")]
    EmptySite(String),

    /// A stall type failed validation at catalog construction
    #[error("Invalid stall type: {0}")]
    InvalidStallType(String),

    /// The catalog holds no stall types
    #[error("Stall catalog is empty")]
    EmptyCatalog,

    /// An edge index outside the zone was requested
    #[error("Edge {edge} out of range (zone has {edge_count} edges)")]
    EdgeOutOfRange { edge: usize, edge_count: usize },

    /// Error in planner configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for parkforge operations
pub type Result<T> = std::result::Result<T, ParkForgeError>;
