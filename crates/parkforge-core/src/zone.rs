//! Site / zone model.
//!
//! A [`Zone`] holds the site boundary and the two per-edge quantities the
//! engine reads on every step: the inward offset direction and the maximum
//! usable depth. Both are computed once in [`Zone::new`] and are read-only
//! afterwards, so edges can be searched independently and concurrently.

use crate::error::{ParkForgeError, Result};
use crate::geometry::{GeometryProvider, Point, Polygon, Segment, Vector};

/// One parking site.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    vertices: Vec<Point>,
    edges: Vec<Segment>,
    surface: Polygon,
    center: Point,
    max_offset_lengths: Vec<f64>,
    offset_directions: Vec<Vector>,
}

impl Zone {
    /// Builds a zone and caches its per-edge offset data.
    ///
    /// # Errors
    ///
    /// - [`ParkForgeError::EmptySite`] with fewer than three vertices or no edges
    /// - [`ParkForgeError::NoCentroid`] if the surface has no area centroid
    /// - [`ParkForgeError::DegenerateEdge`] for a zero-length edge
    pub fn new(
        vertices: Vec<Point>,
        edges: Vec<Segment>,
        surface: Polygon,
        geometry: &dyn GeometryProvider,
    ) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(ParkForgeError::EmptySite(format!(
                "need at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if edges.is_empty() {
            return Err(ParkForgeError::EmptySite("no boundary edges".to_string()));
        }

        let center = geometry
            .surface_area_centroid(&surface)
            .ok_or(ParkForgeError::NoCentroid)?;

        let offset_directions = compute_offset_directions(&edges, center, geometry)?;
        let max_offset_lengths = compute_max_offset_lengths(&edges, &vertices, geometry);

        Ok(Self {
            vertices,
            edges,
            surface,
            center,
            max_offset_lengths,
            offset_directions,
        })
    }

    /// Builds a zone whose vertices and edges come from `surface` itself.
    pub fn from_polygon(surface: Polygon, geometry: &dyn GeometryProvider) -> Result<Self> {
        let vertices = surface.vertices().to_vec();
        let edges = surface.edges();
        Self::new(vertices, edges, surface, geometry)
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the boundary edge at `index`.
    pub fn edge(&self, index: usize) -> Result<&Segment> {
        self.edges.get(index).ok_or(ParkForgeError::EdgeOutOfRange {
            edge: index,
            edge_count: self.edges.len(),
        })
    }

    #[inline]
    pub fn surface(&self) -> &Polygon {
        &self.surface
    }

    /// Area centroid of the surface.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Maximum distance from edge `index` to any site vertex.
    pub fn max_offset_length(&self, index: usize) -> Result<f64> {
        self.edge(index)?;
        Ok(self.max_offset_lengths[index])
    }

    /// Unit vector perpendicular to edge `index`, pointing into the site.
    pub fn offset_direction(&self, index: usize) -> Result<Vector> {
        self.edge(index)?;
        Ok(self.offset_directions[index])
    }

    pub fn max_offset_lengths(&self) -> &[f64] {
        &self.max_offset_lengths
    }

    pub fn offset_directions(&self) -> &[Vector] {
        &self.offset_directions
    }
}

// For each edge: the largest point-to-segment distance over all vertices.
fn compute_max_offset_lengths(
    edges: &[Segment],
    vertices: &[Point],
    geometry: &dyn GeometryProvider,
) -> Vec<f64> {
    edges
        .iter()
        .map(|edge| {
            vertices
                .iter()
                .map(|v| geometry.point_curve_distance(edge, *v))
                .fold(0.0, f64::max)
        })
        .collect()
}

// For each edge: the perpendicular facing the centroid, normalised.
fn compute_offset_directions(
    edges: &[Segment],
    center: Point,
    geometry: &dyn GeometryProvider,
) -> Result<Vec<Vector>> {
    edges
        .iter()
        .enumerate()
        .map(|(index, edge)| {
            let start = geometry.curve_start_point(edge);
            let end = geometry.curve_end_point(edge);
            if geometry.curve_length(edge) <= geometry.tolerance() {
                return Err(ParkForgeError::DegenerateEdge { edge: index });
            }
            let along = Vector::between(start, end);
            let left = along.rotate(90.0);
            let right = along.rotate(-90.0);
            let mid_to_center = Vector::between(geometry.curve_mid_point(edge), center);
            let inward = if left.dot(mid_to_center) > 0.0 {
                left
            } else {
                right
            };
            inward
                .unitize()
                .ok_or(ParkForgeError::DegenerateEdge { edge: index })
        })
        .collect()
}
