//! Search statistics.
//!
//! Counters for one edge search. Infeasible and truncated paths are
//! normal outcomes of the search, so they are counted here instead of
//! being reported as errors.

use std::time::{Duration, Instant};

use crate::branch::Termination;

/// Per-edge search statistics.
///
/// # Example
///
/// ```
/// use parkforge_solver::stats::SearchStats;
/// use parkforge_solver::Termination;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_expansion();
/// stats.record_expansion();
/// stats.record_commit(Termination::GeometryExhausted);
/// stats.record_prune();
/// stats.finish();
///
/// assert_eq!(stats.nodes_expanded, 2);
/// assert_eq!(stats.branches_committed, 1);
/// assert_eq!(stats.geometry_exhaustions, 1);
/// assert_eq!(stats.branches_pruned, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    /// Nodes taken off the frontier and examined.
    pub nodes_expanded: u64,
    /// Branches added to the result set.
    pub branches_committed: u64,
    /// Branches discarded because they ended on an unsatisfied stall row.
    pub branches_pruned: u64,
    /// Committed branches that ended because the kernel ran out of site.
    pub geometry_exhaustions: u64,
    /// Paths abandoned at the row-count ceiling.
    pub depth_limited: u64,
    /// Whether the node ceiling stopped the search early.
    pub node_limit_reached: bool,
}

impl SearchStats {
    /// Marks the start of the search.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = Some(self.live_elapsed());
    }

    /// Elapsed search time; frozen once [`SearchStats::finish`] is called.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.live_elapsed())
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    fn live_elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_expansion(&mut self) {
        self.nodes_expanded += 1;
    }

    pub fn record_commit(&mut self, termination: Termination) {
        self.branches_committed += 1;
        if termination == Termination::GeometryExhausted {
            self.geometry_exhaustions += 1;
        }
    }

    pub fn record_prune(&mut self) {
        self.branches_pruned += 1;
    }

    pub fn record_depth_limit(&mut self) {
        self.depth_limited += 1;
    }

    /// Returns the node expansion rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.nodes_expanded as f64 / secs
        } else {
            0.0
        }
    }

    /// Adds another edge's counters to this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_expanded += other.nodes_expanded;
        self.branches_committed += other.branches_committed;
        self.branches_pruned += other.branches_pruned;
        self.geometry_exhaustions += other.geometry_exhaustions;
        self.depth_limited += other.depth_limited;
        self.node_limit_reached |= other.node_limit_reached;
        self.elapsed = Some(self.elapsed() + other.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_without_start_is_zero() {
        let stats = SearchStats::default();
        assert_eq!(stats.elapsed(), Duration::ZERO);
        assert_eq!(stats.nodes_per_second(), 0.0);
    }

    #[test]
    fn test_depth_commit_does_not_count_exhaustion() {
        let mut stats = SearchStats::default();
        stats.record_commit(Termination::DepthExhausted);
        assert_eq!(stats.branches_committed, 1);
        assert_eq!(stats.geometry_exhaustions, 0);
    }

    #[test]
    fn test_merge() {
        let mut a = SearchStats {
            nodes_expanded: 10,
            branches_committed: 2,
            ..Default::default()
        };
        let b = SearchStats {
            nodes_expanded: 5,
            branches_pruned: 3,
            depth_limited: 1,
            node_limit_reached: true,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.nodes_expanded, 15);
        assert_eq!(a.branches_committed, 2);
        assert_eq!(a.branches_pruned, 3);
        assert_eq!(a.depth_limited, 1);
        assert!(a.node_limit_reached);
    }
}
