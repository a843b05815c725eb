//! Positions a new row by offsetting its predecessor's reference line.

use parkforge_core::{GeometryProvider, Segment, Vector, Zone};
use smallvec::SmallVec;

/// Offsets reference lines inward from one boundary edge and clips them
/// to the site boundary.
pub(crate) struct RowOffsetter<'a> {
    zone: &'a Zone,
    geometry: &'a dyn GeometryProvider,
    direction: Vector,
    overshoot_scale: f64,
}

impl<'a> RowOffsetter<'a> {
    pub(crate) fn new(
        zone: &'a Zone,
        geometry: &'a dyn GeometryProvider,
        direction: Vector,
        overshoot_scale: f64,
    ) -> Self {
        Self {
            zone,
            geometry,
            direction,
            overshoot_scale,
        }
    }

    /// Reference line for a row `width` further inward than `reference`.
    ///
    /// The offset line is stretched about its midpoint so it overshoots the
    /// boundary, then trimmed between its first and last crossing with the
    /// boundary edges. Returns `None` when there is no previous line, the
    /// kernel fails, or fewer than two distinct crossings exist.
    pub(crate) fn offset(&self, reference: Option<&Segment>, width: f64) -> Option<Segment> {
        let geometry = self.geometry;
        let moved = geometry.offset_curve(reference?, self.direction, width)?;
        let center = geometry.curve_mid_point(&moved);
        let stretched = geometry.scale_curve(&moved, center, self.overshoot_scale)?;

        let mut params: SmallVec<[f64; 8]> = self
            .zone
            .edges()
            .iter()
            .flat_map(|edge| geometry.curve_curve_intersection(&stretched, edge))
            .map(|hit| hit.param_a)
            .filter(|param| param.is_finite())
            .collect();
        params.sort_by(f64::total_cmp);

        let tolerance = geometry.tolerance();
        params.dedup_by(|later, earlier| (*later - *earlier).abs() <= tolerance);
        if params.len() < 2 {
            return None;
        }

        let first = params[0];
        let last = params[params.len() - 1];
        geometry.trim_curve(&stretched, first, last)
    }
}
