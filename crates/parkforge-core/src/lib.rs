//! parkforge Core - site geometry and stall types for row layout search
//!
//! This crate provides the fixed inputs of a layout search:
//! - Planar geometry types and the [`GeometryProvider`] kernel seam
//! - The stall type catalog
//! - The site/zone model with cached per-edge offset data
//! - The error taxonomy for construction-time failures

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod zone;

pub use catalog::{StallCatalog, StallFootprint, StallTypeSpec, StallVariant, STANDARD_ANGLES};
pub use error::{ParkForgeError, Result};
pub use geometry::{
    GeometryProvider, Intersection, PlanarKernel, Point, Polygon, Segment, Vector,
    DEFAULT_TOLERANCE,
};
pub use zone::Zone;
