//! Geometry provider fixtures and shared constants.

use parkforge_core::{
    GeometryProvider, Intersection, PlanarKernel, Point, Polygon, Segment, Vector,
};

/// Road width used by the engine tests.
pub const ROAD_WIDTH: f64 = 7.0;

/// Usable depth of edge 0 of [`crate::site_40x25`].
pub const DEPTH_25: f64 = 25.0;

/// A kernel whose offsets always fail.
///
/// Every row grown from a seed has no reference line, so each search path
/// ends by geometry exhaustion one row after its seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOffsetKernel {
    inner: PlanarKernel,
}

impl GeometryProvider for NoOffsetKernel {
    fn offset_curve(&self, _curve: &Segment, _direction: Vector, _distance: f64) -> Option<Segment> {
        None
    }

    fn scale_curve(&self, curve: &Segment, center: Point, factor: f64) -> Option<Segment> {
        self.inner.scale_curve(curve, center, factor)
    }

    fn curve_length(&self, curve: &Segment) -> f64 {
        self.inner.curve_length(curve)
    }

    fn trim_curve(&self, curve: &Segment, param_start: f64, param_end: f64) -> Option<Segment> {
        self.inner.trim_curve(curve, param_start, param_end)
    }

    fn curve_curve_intersection(&self, a: &Segment, b: &Segment) -> Vec<Intersection> {
        self.inner.curve_curve_intersection(a, b)
    }

    fn point_curve_distance(&self, curve: &Segment, point: Point) -> f64 {
        self.inner.point_curve_distance(curve, point)
    }

    fn surface_area_centroid(&self, surface: &Polygon) -> Option<Point> {
        self.inner.surface_area_centroid(surface)
    }
}
