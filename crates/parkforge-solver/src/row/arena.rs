//! Append-only storage for row chains.
//!
//! Every branch of the search is a path from some arena row back to a
//! seed. Rows are never modified once pushed, so a branch is fully
//! described by its tip [`RowId`] and extending it is O(1). When a road
//! row has to credit earlier stall rows with a connection, the affected
//! stall rows are copied with the new count and the copies are linked in
//! (copy-on-write). Sibling branches keep pointing at the originals and
//! never observe the change.
//!
//! # Example
//!
//! ```
//! use parkforge_core::{StallCatalog, StallFootprint};
//! use parkforge_solver::row::{RoadRow, RowArena, RowNode, StallRow};
//!
//! let catalog = StallCatalog::right_angle_only(StallFootprint::STANDARD).unwrap();
//! let mut arena = RowArena::new();
//!
//! let seed = arena.push_root(StallRow::new(0, None, *catalog.primary()).into());
//! let road = arena.place_road(seed, RoadRow::new(0, None, 7.0));
//!
//! // The seed is untouched; the road's predecessor is a connected copy.
//! assert!(arena.get(seed).is_unsatisfied_stall());
//! let credited = arena.get(road).previous().unwrap();
//! assert!(!arena.get(credited).is_unsatisfied_stall());
//! assert_eq!(arena.len(), 3);
//! ```

use smallvec::SmallVec;

use super::{RoadRow, RowId, RowNode, StallRow};

/// Append-only arena of [`RowNode`]s.
#[derive(Debug, Clone, Default)]
pub struct RowArena {
    nodes: Vec<RowNode>,
}

impl RowArena {
    /// Creates a new empty arena.
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a new arena with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the row with the given id.
    ///
    /// Ids are only handed out by this arena, so every id is valid for
    /// the arena that produced it.
    #[inline]
    pub fn get(&self, id: RowId) -> &RowNode {
        &self.nodes[id.index()]
    }

    /// Stores a seed row with no predecessor.
    pub fn push_root(&mut self, mut node: RowNode) -> RowId {
        node.set_previous(None);
        self.push(node)
    }

    /// Stores a stall row grown from `parent`.
    pub fn place_stall(&mut self, parent: RowId, mut row: StallRow) -> RowId {
        row.previous = Some(parent);
        self.push(RowNode::Stall(row))
    }

    /// Stores a road row grown from `parent`, crediting the stall rows it
    /// reaches.
    ///
    /// The road reaches back over the contiguous run of stall rows ending
    /// at `parent`. A stall row with `k` stall rows between it and the road
    /// is credited when `k` is smaller than its required connection count
    /// and it is still unsatisfied.
    pub fn place_road(&mut self, parent: RowId, mut road: RoadRow) -> RowId {
        let run = self.stall_run(parent);
        let credited = |k: usize, row: &StallRow| {
            !row.is_connected() && k < row.stall_type().required_connection_count() as usize
        };

        let deepest = run.iter().enumerate().rev().find_map(|(k, &id)| match self.get(id) {
            RowNode::Stall(row) if credited(k, row) => Some(k),
            _ => None,
        });

        let Some(deepest) = deepest else {
            road.previous = Some(parent);
            return self.push(RowNode::Road(road));
        };

        // Re-link copies from the deepest credited row up to the parent.
        let mut previous = self.get(run[deepest]).previous();
        for k in (0..=deepest).rev() {
            let mut copy = self.get(run[k]).clone();
            if let RowNode::Stall(row) = &mut copy {
                if credited(k, row) {
                    row.register_connection();
                }
            }
            copy.set_previous(previous);
            previous = Some(self.push(copy));
        }
        road.previous = previous;
        self.push(RowNode::Road(road))
    }

    /// Ids of the contiguous stall rows ending at `tip`, tip first.
    fn stall_run(&self, tip: RowId) -> SmallVec<[RowId; 4]> {
        let mut run = SmallVec::new();
        let mut cursor = Some(tip);
        while let Some(id) = cursor {
            let node = self.get(id);
            if !node.is_stall() {
                break;
            }
            run.push(id);
            cursor = node.previous();
        }
        run
    }

    /// Walks from `tip` back to its seed.
    pub fn chain(&self, tip: RowId) -> impl Iterator<Item = (RowId, &RowNode)> + '_ {
        std::iter::successors(Some(tip), move |id| self.get(*id).previous())
            .map(move |id| (id, self.get(id)))
    }

    /// Copies the chain ending at `tip` into an owned list, seed first.
    ///
    /// Predecessor ids in the copy are positions in the returned list.
    pub fn materialize(&self, tip: RowId) -> Vec<RowNode> {
        let mut rows: Vec<RowNode> = self.chain(tip).map(|(_, node)| node.clone()).collect();
        rows.reverse();
        for (position, row) in rows.iter_mut().enumerate() {
            row.set_previous(position.checked_sub(1).map(RowId::new));
        }
        rows
    }

    fn push(&mut self, node: RowNode) -> RowId {
        let id = RowId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkforge_core::{StallCatalog, StallFootprint, StallTypeSpec, StallVariant};

    fn right_angle() -> StallTypeSpec {
        *StallCatalog::right_angle_only(StallFootprint::STANDARD)
            .unwrap()
            .primary()
    }

    fn double() -> StallTypeSpec {
        StallTypeSpec::from_footprint(StallFootprint::STANDARD, 45.0, StallVariant::Double)
            .unwrap()
    }

    fn stall_remaining(arena: &RowArena, id: RowId) -> i64 {
        arena.get(id).as_stall().unwrap().remaining_required_connections()
    }

    #[test]
    fn test_push_root_and_chain() {
        let mut arena = RowArena::new();
        let seed = arena.push_root(RoadRow::new(0, None, 7.0).into());
        let stall = arena.place_stall(seed, StallRow::new(0, None, right_angle()));

        let kinds: Vec<_> = arena.chain(stall).map(|(_, n)| n.kind()).collect();
        assert_eq!(kinds.len(), 2);
        assert!(arena.get(stall).is_stall());
        assert_eq!(arena.get(stall).previous(), Some(seed));
    }

    #[test]
    fn test_road_after_road_run_copies_nothing() {
        let mut arena = RowArena::new();
        let seed = arena.push_root(RoadRow::new(0, None, 7.0).into());
        let road = arena.place_road(seed, RoadRow::new(0, None, 7.0));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(road).previous(), Some(seed));
    }

    #[test]
    fn test_siblings_keep_original_stall() {
        let mut arena = RowArena::new();
        let seed = arena.push_root(StallRow::new(0, None, right_angle()).into());

        let road_a = arena.place_road(seed, RoadRow::new(0, None, 7.0));
        let road_b = arena.place_road(seed, RoadRow::new(0, None, 7.0));

        assert_eq!(stall_remaining(&arena, seed), 1);
        let a_prev = arena.get(road_a).previous().unwrap();
        let b_prev = arena.get(road_b).previous().unwrap();
        assert_ne!(a_prev, b_prev);
        assert_eq!(stall_remaining(&arena, a_prev), 0);
        assert_eq!(stall_remaining(&arena, b_prev), 0);
    }

    #[test]
    fn test_double_stall_reached_through_one_stall_row() {
        let mut arena = RowArena::new();
        let seed = arena.push_root(StallRow::new(0, None, double()).into());
        let road = arena.place_road(seed, RoadRow::new(0, None, 7.0));
        let s2 = arena.place_stall(road, StallRow::new(0, None, right_angle()));
        let road2 = arena.place_road(s2, RoadRow::new(0, None, 7.0));

        // Second road is separated from the double row by a road, so the
        // run stops there and only the 90° row is credited.
        let rows = arena.materialize(road2);
        let remaining: Vec<_> = rows
            .iter()
            .filter_map(|r| r.as_stall().map(|s| s.remaining_required_connections()))
            .collect();
        assert_eq!(remaining, vec![1, 0]);
    }

    #[test]
    fn test_road_credits_whole_run_within_reach() {
        let mut arena = RowArena::new();
        let seed = arena.push_root(RoadRow::new(0, None, 7.0).into());
        let deep = arena.place_stall(seed, StallRow::new(0, None, double()));
        let near = arena.place_stall(deep, StallRow::new(0, None, right_angle()));
        let road = arena.place_road(near, RoadRow::new(0, None, 7.0));

        let rows = arena.materialize(road);
        assert_eq!(rows.len(), 4);
        // One stall row between the double row and the road: within reach.
        assert_eq!(rows[1].as_stall().unwrap().remaining_required_connections(), 1);
        assert_eq!(rows[2].as_stall().unwrap().remaining_required_connections(), 0);
        // Originals untouched.
        assert_eq!(stall_remaining(&arena, deep), 2);
        assert_eq!(stall_remaining(&arena, near), 1);
    }

    #[test]
    fn test_huge_connection_count_stays_unsatisfied() {
        let demanding =
            StallTypeSpec::new(90.0, StallVariant::Single, 5.3, 2.7, u32::MAX, 1).unwrap();
        let mut arena = RowArena::new();
        let seed = arena.push_root(StallRow::new(0, None, demanding).into());
        assert_eq!(stall_remaining(&arena, seed), i64::from(u32::MAX));
        assert!(arena.get(seed).is_unsatisfied_stall());

        let road = arena.place_road(seed, RoadRow::new(0, None, 7.0));
        let credited = arena.get(road).previous().unwrap();
        assert_eq!(stall_remaining(&arena, credited), i64::from(u32::MAX) - 1);
        assert!(arena.get(credited).is_unsatisfied_stall());
    }

    #[test]
    fn test_single_stall_out_of_reach_not_credited() {
        let mut arena = RowArena::new();
        let seed = arena.push_root(StallRow::new(0, None, right_angle()).into());
        let near = arena.place_stall(seed, StallRow::new(0, None, right_angle()));
        let road = arena.place_road(near, RoadRow::new(0, None, 7.0));

        let rows = arena.materialize(road);
        assert_eq!(rows[0].as_stall().unwrap().remaining_required_connections(), 1);
        assert_eq!(rows[1].as_stall().unwrap().remaining_required_connections(), 0);
    }

    #[test]
    fn test_materialize_rewrites_previous_to_positions() {
        let mut arena = RowArena::new();
        let seed = arena.push_root(RoadRow::new(2, None, 7.0).into());
        let s = arena.place_stall(seed, StallRow::new(2, None, right_angle()));
        let r = arena.place_road(s, RoadRow::new(2, None, 7.0));

        let rows = arena.materialize(r);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].previous(), None);
        assert_eq!(rows[1].previous(), Some(RowId::new(0)));
        assert_eq!(rows[2].previous(), Some(RowId::new(1)));
        assert!(rows.iter().all(|row| row.base_edge_id() == 2));
    }
}
