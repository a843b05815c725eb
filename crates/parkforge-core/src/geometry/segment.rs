//! Straight reference curves.

use super::primitives::{Point, Vector};

/// A straight curve between two points.
///
/// The curve is parameterised over the local domain `[0, 1]`: parameter
/// `0` is [`Segment::start`], `1` is [`Segment::end`]. Trimming yields a
/// new segment with a fresh `[0, 1]` domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// One crossing between two curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parameter of the crossing on the first curve.
    pub param_a: f64,
    /// Parameter of the crossing on the second curve.
    pub param_b: f64,
    /// Location of the crossing.
    pub point: Point,
}

impl Segment {
    /// Creates a segment from its end points.
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Direction vector from start to end (not normalised).
    #[inline]
    pub fn direction(&self) -> Vector {
        Vector::between(self.start, self.end)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Evaluates the curve at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.start + self.direction() * t
    }

    /// Shortest distance from `point` to any point of the segment.
    pub fn distance_to_point(&self, point: Point) -> f64 {
        let dir = self.direction();
        let len_sq = dir.dot(dir);
        if len_sq == 0.0 {
            return self.start.distance_to(point);
        }
        let t = (Vector::between(self.start, point).dot(dir) / len_sq).clamp(0.0, 1.0);
        self.point_at(t).distance_to(point)
    }

    /// Finds the crossing with `other`, if any.
    ///
    /// Crossings within `tolerance` (in parameter space) of either end are
    /// accepted and clamped into `[0, 1]`. Parallel and collinear segments
    /// have no single crossing and yield `None`.
    pub fn intersect(&self, other: &Segment, tolerance: f64) -> Option<Intersection> {
        let r = self.direction();
        let s = other.direction();
        let denom = r.perp(s);
        if denom.abs() <= f64::EPSILON * r.length() * s.length() {
            return None;
        }
        let qp = Vector::between(self.start, other.start);
        let t = qp.perp(s) / denom;
        let u = qp.perp(r) / denom;
        let range = -tolerance..=1.0 + tolerance;
        if !range.contains(&t) || !range.contains(&u) {
            return None;
        }
        let t = t.clamp(0.0, 1.0);
        Some(Intersection {
            param_a: t,
            param_b: u.clamp(0.0, 1.0),
            point: self.point_at(t),
        })
    }
}
