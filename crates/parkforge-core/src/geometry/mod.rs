//! Planar geometry for site boundaries and row reference lines.
//!
//! - [`Point`] and [`Vector`] with the vector primitives the zone model needs
//! - [`Segment`]: a straight curve with a `[0, 1]` parameter domain
//! - [`Polygon`]: the site surface
//! - [`GeometryProvider`]: the kernel seam, with [`PlanarKernel`] as default

mod polygon;
mod primitives;
mod provider;
mod segment;


pub use polygon::Polygon;
pub use primitives::{Point, Vector};
pub use provider::{GeometryProvider, PlanarKernel, DEFAULT_TOLERANCE};
pub use segment::{Intersection, Segment};
