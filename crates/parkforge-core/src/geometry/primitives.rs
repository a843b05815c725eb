//! Points and vectors in the site plane.
//!
//! Thin wrappers over `nalgebra`'s 2D types. Coordinates read through
//! `Deref`, so `point.x` and `vector.y` work as on the nalgebra types.

use std::ops::{Add, Deref, Mul, Neg, Sub};

use nalgebra::{Point2, Rotation2, Vector2};

/// A location in the site plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(Point2<f64>);

impl Point {
    /// Creates a point from its coordinates.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }

    #[inline]
    pub fn origin() -> Self {
        Self(Point2::origin())
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        nalgebra::distance(&self.0, &other.0)
    }

    /// Returns the point halfway between `self` and `other`.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Self(nalgebra::center(&self.0, &other.0))
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

impl Deref for Point {
    type Target = Point2<f64>;

    fn deref(&self) -> &Point2<f64> {
        &self.0
    }
}

impl From<Point2<f64>> for Point {
    fn from(point: Point2<f64>) -> Self {
        Self(point)
    }
}

impl From<Point> for Point2<f64> {
    fn from(point: Point) -> Self {
        point.0
    }
}

/// A displacement in the site plane.
///
/// Rotation is always about the +Z axis, so positive angles turn
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector(Vector2<f64>);

impl Vector {
    /// Creates a vector from its components.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }

    #[inline]
    pub fn zeros() -> Self {
        Self(Vector2::zeros())
    }

    /// The vector pointing from `from` to `to`.
    #[inline]
    pub fn between(from: Point, to: Point) -> Self {
        Self(to.0 - from.0)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.0.norm()
    }

    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        self.0.dot(&other.0)
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn perp(&self, other: Vector) -> f64 {
        self.0.perp(&other.0)
    }

    /// Rotates by `degrees` about the +Z axis.
    pub fn rotate(&self, degrees: f64) -> Self {
        Self(Rotation2::new(degrees.to_radians()) * self.0)
    }

    /// Returns the unit vector in the same direction.
    ///
    /// Returns `None` for a zero or non-finite vector.
    pub fn unitize(&self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Self(self.0 / len))
        } else {
            None
        }
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Deref for Vector {
    type Target = Vector2<f64>;

    fn deref(&self) -> &Vector2<f64> {
        &self.0
    }
}

impl From<Vector2<f64>> for Vector {
    fn from(vector: Vector2<f64>) -> Self {
        Self(vector)
    }
}

impl From<Vector> for Vector2<f64> {
    fn from(vector: Vector) -> Self {
        vector.0
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}
