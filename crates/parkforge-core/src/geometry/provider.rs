//! The geometry kernel seam.
//!
//! The layout engine never does curve arithmetic itself. Every offset,
//! trim, intersection and measurement goes through a [`GeometryProvider`],
//! so a host CAD kernel can be plugged in behind the same interface.
//! [`PlanarKernel`] is the bundled implementation for straight edges.

use std::fmt::Debug;

use super::polygon::Polygon;
use super::primitives::{Point, Vector};
use super::segment::{Intersection, Segment};

/// Default absolute tolerance used by [`PlanarKernel`].
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Curve and surface operations consumed by the layout engine.
///
/// Implementations must be pure with respect to shared state. Failures
/// are reported as `None` or an empty list, never as a panic; the engine
/// maps them to an absent reference line.
pub trait GeometryProvider: Send + Sync + Debug {
    /// Translates `curve` by `distance` along `direction`.
    fn offset_curve(&self, curve: &Segment, direction: Vector, distance: f64) -> Option<Segment>;

    /// Scales `curve` uniformly about `center`.
    fn scale_curve(&self, curve: &Segment, center: Point, factor: f64) -> Option<Segment>;

    fn curve_length(&self, curve: &Segment) -> f64;

    /// Returns the part of `curve` between two parameters.
    ///
    /// Returns `None` unless `param_start < param_end`.
    fn trim_curve(&self, curve: &Segment, param_start: f64, param_end: f64) -> Option<Segment>;

    /// All crossings between two curves.
    fn curve_curve_intersection(&self, a: &Segment, b: &Segment) -> Vec<Intersection>;

    fn curve_start_point(&self, curve: &Segment) -> Point {
        curve.start
    }

    fn curve_end_point(&self, curve: &Segment) -> Point {
        curve.end
    }

    fn curve_mid_point(&self, curve: &Segment) -> Point {
        curve.midpoint()
    }

    /// Shortest distance from `point` to `curve`.
    fn point_curve_distance(&self, curve: &Segment, point: Point) -> f64;

    /// Area centroid of a surface, or `None` if it has no area.
    fn surface_area_centroid(&self, surface: &Polygon) -> Option<Point>;

    /// Absolute tolerance used when comparing parameters and lengths.
    fn tolerance(&self) -> f64 {
        DEFAULT_TOLERANCE
    }
}

/// Exact 2D kernel for straight segments.
#[derive(Debug, Clone, Copy)]
pub struct PlanarKernel {
    tolerance: f64,
}

impl PlanarKernel {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for PlanarKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryProvider for PlanarKernel {
    fn offset_curve(&self, curve: &Segment, direction: Vector, distance: f64) -> Option<Segment> {
        let shift = direction * distance;
        let moved = Segment::new(curve.start + shift, curve.end + shift);
        (moved.start.is_finite() && moved.end.is_finite()).then_some(moved)
    }

    fn scale_curve(&self, curve: &Segment, center: Point, factor: f64) -> Option<Segment> {
        if !factor.is_finite() || factor <= 0.0 {
            return None;
        }
        let scale = |p: Point| center + Vector::between(center, p) * factor;
        Some(Segment::new(scale(curve.start), scale(curve.end)))
    }

    fn curve_length(&self, curve: &Segment) -> f64 {
        curve.length()
    }

    fn trim_curve(&self, curve: &Segment, param_start: f64, param_end: f64) -> Option<Segment> {
        if param_end - param_start <= self.tolerance {
            return None;
        }
        Some(Segment::new(
            curve.point_at(param_start),
            curve.point_at(param_end),
        ))
    }

    fn curve_curve_intersection(&self, a: &Segment, b: &Segment) -> Vec<Intersection> {
        a.intersect(b, self.tolerance).into_iter().collect()
    }

    fn point_curve_distance(&self, curve: &Segment, point: Point) -> f64 {
        curve.distance_to_point(point)
    }

    fn surface_area_centroid(&self, surface: &Polygon) -> Option<Point> {
        surface.centroid(self.tolerance)
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
