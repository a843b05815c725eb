//! Zone fixtures.

use parkforge_core::{PlanarKernel, Point, Polygon, Zone};

/// Axis-aligned `width` × `depth` zone with its lower-left corner at the
/// origin.
///
/// Edge 0 is the bottom edge, so its usable depth is `depth`.
pub fn rectangle_zone(width: f64, depth: f64) -> Zone {
    Zone::from_polygon(Polygon::rectangle(width, depth), &PlanarKernel::new())
        .expect("rectangle fixture must be a valid zone")
}

/// The 40 × 25 site used throughout the engine tests.
pub fn site_40x25() -> Zone {
    rectangle_zone(40.0, 25.0)
}

/// Isosceles triangle on a 40-long base with its apex 20 above it.
pub fn triangle_zone() -> Zone {
    let surface = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(40.0, 0.0),
        Point::new(20.0, 20.0),
    ]);
    Zone::from_polygon(surface, &PlanarKernel::new()).expect("triangle fixture must be valid")
}

/// Triangle whose apex lies far beyond the end of edge 0.
///
/// Edge 0 runs from (0, 0) to (10, 0). The apex at (30, 10) is 22.4 from
/// the edge segment but only 10 above its line, so rows laid from edge 0
/// leave the site well before their cumulative width reaches the usable
/// depth.
pub fn skewed_triangle_zone() -> Zone {
    let surface = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(30.0, 10.0),
    ]);
    Zone::from_polygon(surface, &PlanarKernel::new()).expect("skewed triangle fixture must be valid")
}

/// Trapezoid with a 60-long base, a 20-long top and a height of 30.
pub fn trapezoid_zone() -> Zone {
    let surface = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(60.0, 0.0),
        Point::new(40.0, 30.0),
        Point::new(20.0, 30.0),
    ]);
    Zone::from_polygon(surface, &PlanarKernel::new()).expect("trapezoid fixture must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_depths() {
        assert_eq!(site_40x25().max_offset_length(0).unwrap(), 25.0);
        assert!((triangle_zone().max_offset_length(0).unwrap() - 20.0).abs() < 1e-9);
        assert!((skewed_triangle_zone().max_offset_length(0).unwrap() - 500f64.sqrt()).abs() < 1e-9);
        assert!((trapezoid_zone().max_offset_length(0).unwrap() - 30.0).abs() < 1e-9);
    }
}
