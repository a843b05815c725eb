//! Stall type catalog.
//!
//! Every stall orientation the engine may place is described by an
//! immutable [`StallTypeSpec`]. Specs are derived once from a base
//! orthogonal footprint rotated to a fixed set of angles and are never
//! mutated afterwards; the catalog is the only place row widths come from.

use crate::error::{ParkForgeError, Result};

/// Angles (degrees between stall axis and row line) in catalog order.
pub const STANDARD_ANGLES: [f64; 5] = [90.0, 60.0, 45.0, 30.0, 0.0];

/// The orthogonal footprint of one parking stall.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StallFootprint {
    /// Short side, measured along the row for a 90° stall.
    pub width: f64,
    /// Long side, measured across the row for a 90° stall.
    pub length: f64,
}

impl StallFootprint {
    pub const STANDARD: StallFootprint = StallFootprint {
        width: 2.7,
        length: 5.3,
    };

    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }
}

impl Default for StallFootprint {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Whether a row holds one stall depth or two stalls back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StallVariant {
    Single,
    Double,
}

impl StallVariant {
    /// Stall depths packed into one row.
    pub fn depth_count(self) -> u32 {
        match self {
            StallVariant::Single => 1,
            StallVariant::Double => 2,
        }
    }
}

impl std::fmt::Display for StallVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StallVariant::Single => write!(f, "single"),
            StallVariant::Double => write!(f, "double"),
        }
    }
}

/// One stall orientation.
///
/// `width` is the depth the row occupies perpendicular to its reference
/// line, and is what the engine offsets by. `length` is the frontage one
/// stall takes along the reference line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "StallTypeFields")
)]
pub struct StallTypeSpec {
    angle_degrees: f64,
    variant: StallVariant,
    width: f64,
    length: f64,
    required_connection_count: u32,
    stall_unit_count: u32,
}

impl StallTypeSpec {
    /// Creates and validates a stall type.
    ///
    /// # Errors
    ///
    /// Returns [`ParkForgeError::InvalidStallType`] if `width` or `length`
    /// is not a positive finite number, or `stall_unit_count` is zero.
    pub fn new(
        angle_degrees: f64,
        variant: StallVariant,
        width: f64,
        length: f64,
        required_connection_count: u32,
        stall_unit_count: u32,
    ) -> Result<Self> {
        let spec = Self {
            angle_degrees,
            variant,
            width,
            length,
            required_connection_count,
            stall_unit_count,
        };
        spec.check()?;
        Ok(spec)
    }

    fn check(&self) -> Result<()> {
        let Self {
            angle_degrees,
            variant,
            width,
            length,
            stall_unit_count,
            ..
        } = *self;
        if !(width.is_finite() && width > 0.0) {
            return Err(ParkForgeError::InvalidStallType(format!(
                "{angle_degrees}° {variant}: width must be positive, got {width}"
            )));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(ParkForgeError::InvalidStallType(format!(
                "{angle_degrees}° {variant}: length must be positive, got {length}"
            )));
        }
        if stall_unit_count == 0 {
            return Err(ParkForgeError::InvalidStallType(format!(
                "{angle_degrees}° {variant}: stall unit count must be at least 1"
            )));
        }
        Ok(())
    }

    /// Derives a stall type by rotating `footprint` to `angle_degrees`.
    ///
    /// Row depth is `length·sin θ + width·cos θ`. Frontage is `width / sin θ`,
    /// except for parallel (0°) stalls whose frontage is the footprint
    /// length. A double variant packs two depths into one row and needs two
    /// road connections.
    pub fn from_footprint(
        footprint: StallFootprint,
        angle_degrees: f64,
        variant: StallVariant,
    ) -> Result<Self> {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let depth = footprint.length * sin + footprint.width * cos;
        let frontage = if sin > 1e-9 {
            footprint.width / sin
        } else {
            footprint.length
        };
        let depths = variant.depth_count();
        Self::new(
            angle_degrees,
            variant,
            depth * depths as f64,
            frontage,
            depths,
            depths,
        )
    }

    #[inline]
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    #[inline]
    pub fn variant(&self) -> StallVariant {
        self.variant
    }

    /// Row depth perpendicular to the reference line.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Frontage of one stall along the reference line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Road connections this row needs before another stall row may follow.
    #[inline]
    pub fn required_connection_count(&self) -> u32 {
        self.required_connection_count
    }

    /// Physical stalls per frontage unit.
    #[inline]
    pub fn stall_unit_count(&self) -> u32 {
        self.stall_unit_count
    }

    /// Short label such as `"45d"` or `"45d×2"`.
    pub fn label(&self) -> String {
        match self.variant {
            StallVariant::Single => format!("{}d", self.angle_degrees),
            StallVariant::Double => format!("{}d×2", self.angle_degrees),
        }
    }
}

/// Unchecked wire form of a [`StallTypeSpec`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StallTypeFields {
    angle_degrees: f64,
    variant: StallVariant,
    width: f64,
    length: f64,
    required_connection_count: u32,
    stall_unit_count: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<StallTypeFields> for StallTypeSpec {
    type Error = ParkForgeError;

    fn try_from(fields: StallTypeFields) -> Result<Self> {
        Self::new(
            fields.angle_degrees,
            fields.variant,
            fields.width,
            fields.length,
            fields.required_connection_count,
            fields.stall_unit_count,
        )
    }
}

/// Fixed, ordered list of stall types.
///
/// Iteration order decides the order in which sibling branches are
/// generated. It has no effect on the set of results.
#[derive(Debug, Clone, PartialEq)]
pub struct StallCatalog {
    types: Vec<StallTypeSpec>,
}

impl StallCatalog {
    /// Creates a catalog from pre-built stall types.
    ///
    /// # Errors
    ///
    /// Returns [`ParkForgeError::EmptyCatalog`] if `types` is empty and
    /// [`ParkForgeError::InvalidStallType`] if any entry fails the
    /// [`StallTypeSpec::new`] checks.
    pub fn new(types: Vec<StallTypeSpec>) -> Result<Self> {
        if types.is_empty() {
            return Err(ParkForgeError::EmptyCatalog);
        }
        for spec in &types {
            spec.check()?;
        }
        Ok(Self { types })
    }

    /// The standard catalog: 2.7 × 5.3 stalls at 90°, 60°, 45°, 30° and 0°,
    /// with double variants for every angle except 90°.
    pub fn standard() -> Result<Self> {
        Self::from_angles(StallFootprint::STANDARD, &STANDARD_ANGLES, true)
    }

    /// A catalog holding only the single 90° stall.
    pub fn right_angle_only(footprint: StallFootprint) -> Result<Self> {
        Self::from_angles(footprint, &[90.0], false)
    }

    /// Derives a catalog from `footprint` at each of `angles`.
    ///
    /// When `double_variants` is set, each non-right angle is followed by
    /// its double variant.
    pub fn from_angles(
        footprint: StallFootprint,
        angles: &[f64],
        double_variants: bool,
    ) -> Result<Self> {
        let mut types = Vec::with_capacity(angles.len() * 2);
        for &angle in angles {
            types.push(StallTypeSpec::from_footprint(
                footprint,
                angle,
                StallVariant::Single,
            )?);
            if double_variants && (angle - 90.0).abs() > 1e-9 {
                types.push(StallTypeSpec::from_footprint(
                    footprint,
                    angle,
                    StallVariant::Double,
                )?);
            }
        }
        Self::new(types)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&StallTypeSpec> {
        self.types.get(index)
    }

    /// The first catalog entry, used for the stall-first seed row.
    #[inline]
    pub fn primary(&self) -> &StallTypeSpec {
        &self.types[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &StallTypeSpec> {
        self.types.iter()
    }

    pub fn as_slice(&self) -> &[StallTypeSpec] {
        &self.types
    }

    /// Widest row depth in the catalog.
    pub fn max_width(&self) -> f64 {
        self.types.iter().map(|t| t.width).fold(0.0, f64::max)
    }

    /// Narrowest row depth in the catalog.
    pub fn min_width(&self) -> f64 {
        self.types
            .iter()
            .map(|t| t.width)
            .fold(f64::INFINITY, f64::min)
    }
}

impl<'a> IntoIterator for &'a StallCatalog {
    type Item = &'a StallTypeSpec;
    type IntoIter = std::slice::Iter<'a, StallTypeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
