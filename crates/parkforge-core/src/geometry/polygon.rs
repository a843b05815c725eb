//! Planar site surfaces.

use super::primitives::Point;
use super::segment::Segment;

/// A simple closed polygon describing a site surface.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle with its lower-left corner at the origin.
    pub fn rectangle(width: f64, depth: f64) -> Self {
        Self::new(vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, depth),
            Point::new(0.0, depth),
        ])
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Boundary segments in vertex order, including the closing edge.
    pub fn edges(&self) -> Vec<Segment> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Signed area (positive for counter-clockwise winding).
    pub fn signed_area(&self) -> f64 {
        self.shoelace().map(|(a, _, _)| a).unwrap_or(0.0)
    }

    /// Area centroid, or `None` when the area vanishes.
    pub fn centroid(&self, tolerance: f64) -> Option<Point> {
        let (area, cx, cy) = self.shoelace()?;
        if !area.is_finite() || area.abs() <= tolerance {
            return None;
        }
        let centroid = Point::new(cx / (6.0 * area), cy / (6.0 * area));
        centroid.is_finite().then_some(centroid)
    }

    // (signed area, cx accumulator, cy accumulator)
    fn shoelace(&self) -> Option<(f64, f64, f64)> {
        let n = self.vertices.len();
        if n < 3 {
            return None;
        }
        let mut twice_area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = self.vertices[i];
            let q = self.vertices[(i + 1) % n];
            let cross = p.x * q.y - q.x * p.y;
            twice_area += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        Some((twice_area * 0.5, cx, cy))
    }
}
