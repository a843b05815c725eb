//! Row node model.
//!
//! A layout is a chain of rows grown inward from a boundary edge. Each row
//! is either a [`StallRow`] or a [`RoadRow`]; [`RowNode`] is the tagged
//! union the engine matches on. Rows refer to their predecessor by
//! [`RowId`], an index into the [`RowArena`] that owns them.

mod arena;

pub use arena::RowArena;

use parkforge_core::{Segment, StallTypeSpec};

/// Index of a row inside a [`RowArena`].
///
/// In a materialised [`crate::Branch`] the same type is the row's position
/// in that branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl RowId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The two row kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Stall,
    Road,
}

impl RowKind {
    /// One-letter code used in pattern strings.
    pub fn letter(self) -> char {
        match self {
            RowKind::Stall => 'S',
            RowKind::Road => 'R',
        }
    }
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKind::Stall => write!(f, "Stall"),
            RowKind::Road => write!(f, "Road"),
        }
    }
}

/// A rank of parking stalls at one orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct StallRow {
    base_edge_id: usize,
    reference_line: Option<Segment>,
    previous: Option<RowId>,
    stall_type: StallTypeSpec,
    remaining_required_connections: i64,
}

impl StallRow {
    /// Creates an unconnected stall row.
    ///
    /// `reference_line` is `None` when the geometry kernel could not place
    /// the row inside the site.
    pub fn new(
        base_edge_id: usize,
        reference_line: Option<Segment>,
        stall_type: StallTypeSpec,
    ) -> Self {
        Self {
            base_edge_id,
            reference_line,
            previous: None,
            stall_type,
            remaining_required_connections: i64::from(stall_type.required_connection_count()),
        }
    }

    #[inline]
    pub fn stall_type(&self) -> &StallTypeSpec {
        &self.stall_type
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.stall_type.width()
    }

    #[inline]
    pub fn remaining_required_connections(&self) -> i64 {
        self.remaining_required_connections
    }

    /// Whether this row has all the road connections it needs.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.remaining_required_connections <= 0
    }

    /// Records one road connection.
    pub fn register_connection(&mut self) {
        self.remaining_required_connections -= 1;
    }
}

/// A circulation strip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRow {
    base_edge_id: usize,
    reference_line: Option<Segment>,
    previous: Option<RowId>,
    width: f64,
}

impl RoadRow {
    pub fn new(base_edge_id: usize, reference_line: Option<Segment>, width: f64) -> Self {
        Self {
            base_edge_id,
            reference_line,
            previous: None,
            width,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }
}

/// One row of a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum RowNode {
    Stall(StallRow),
    Road(RoadRow),
}

impl RowNode {
    #[inline]
    pub fn kind(&self) -> RowKind {
        match self {
            RowNode::Stall(_) => RowKind::Stall,
            RowNode::Road(_) => RowKind::Road,
        }
    }

    /// Nominal width the row occupies perpendicular to its reference line.
    #[inline]
    pub fn width(&self) -> f64 {
        match self {
            RowNode::Stall(row) => row.width(),
            RowNode::Road(row) => row.width(),
        }
    }

    /// Boundary edge the chain was grown from.
    #[inline]
    pub fn base_edge_id(&self) -> usize {
        match self {
            RowNode::Stall(row) => row.base_edge_id,
            RowNode::Road(row) => row.base_edge_id,
        }
    }

    /// The row's generating curve, or `None` if the site was exhausted.
    #[inline]
    pub fn reference_line(&self) -> Option<&Segment> {
        match self {
            RowNode::Stall(row) => row.reference_line.as_ref(),
            RowNode::Road(row) => row.reference_line.as_ref(),
        }
    }

    /// The row this one was grown from.
    #[inline]
    pub fn previous(&self) -> Option<RowId> {
        match self {
            RowNode::Stall(row) => row.previous,
            RowNode::Road(row) => row.previous,
        }
    }

    pub(crate) fn set_previous(&mut self, previous: Option<RowId>) {
        match self {
            RowNode::Stall(row) => row.previous = previous,
            RowNode::Road(row) => row.previous = previous,
        }
    }

    #[inline]
    pub fn as_stall(&self) -> Option<&StallRow> {
        match self {
            RowNode::Stall(row) => Some(row),
            RowNode::Road(_) => None,
        }
    }

    #[inline]
    pub fn is_stall(&self) -> bool {
        matches!(self, RowNode::Stall(_))
    }

    /// Whether this is a stall row still waiting for a road connection.
    #[inline]
    pub fn is_unsatisfied_stall(&self) -> bool {
        matches!(self, RowNode::Stall(row) if !row.is_connected())
    }
}

impl From<StallRow> for RowNode {
    fn from(row: StallRow) -> Self {
        RowNode::Stall(row)
    }
}

impl From<RoadRow> for RowNode {
    fn from(row: RoadRow) -> Self {
        RowNode::Road(row)
    }
}
