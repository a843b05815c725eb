//! Completed layout branches.
//!
//! A [`Branch`] is one terminal path of the search, copied out of the row
//! arena so it owns its rows and can outlive the solver that produced it.

use std::fmt;

use crate::row::{RowKind, RowNode, StallRow};

/// Why a branch stopped growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Cumulative width reached the edge's usable depth.
    DepthExhausted,
    /// The geometry kernel could not place the last row inside the site.
    GeometryExhausted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::DepthExhausted => write!(f, "depth"),
            Termination::GeometryExhausted => write!(f, "geometry"),
        }
    }
}

/// One completed row sequence for a boundary edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    edge_id: usize,
    rows: Vec<RowNode>,
    total_width: f64,
    metric_value: f64,
    termination: Termination,
}

impl Branch {
    pub(crate) fn new(
        edge_id: usize,
        rows: Vec<RowNode>,
        total_width: f64,
        termination: Termination,
    ) -> Self {
        Self {
            edge_id,
            rows,
            total_width,
            metric_value: 0.0,
            termination,
        }
    }

    /// Boundary edge this branch was grown from.
    #[inline]
    pub fn edge_id(&self) -> usize {
        self.edge_id
    }

    /// Rows in placement order, seed first.
    #[inline]
    pub fn rows(&self) -> &[RowNode] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the nominal widths of all rows.
    #[inline]
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Score assigned by the last metric evaluation.
    #[inline]
    pub fn metric_value(&self) -> f64 {
        self.metric_value
    }

    pub(crate) fn set_metric_value(&mut self, value: f64) {
        self.metric_value = value;
    }

    #[inline]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// The last row placed.
    pub fn last(&self) -> Option<&RowNode> {
        self.rows.last()
    }

    pub fn stall_rows(&self) -> impl Iterator<Item = &StallRow> {
        self.rows.iter().filter_map(RowNode::as_stall)
    }

    pub fn stall_row_count(&self) -> usize {
        self.stall_rows().count()
    }

    /// Nominal width of every row, seed first.
    pub fn pattern(&self) -> Vec<f64> {
        self.rows.iter().map(RowNode::width).collect()
    }

    /// Row kinds as a letter string such as `"SRSR"`.
    pub fn kinds(&self) -> String {
        self.rows.iter().map(|row| row.kind().letter()).collect()
    }

    pub fn row_kinds(&self) -> impl Iterator<Item = RowKind> + '_ {
        self.rows.iter().map(RowNode::kind)
    }

    /// Flat record form: metric value, total width, then each row.
    pub fn to_record(&self) -> Vec<RecordEntry> {
        let mut record = Vec::with_capacity(self.rows.len() + 2);
        record.push(RecordEntry::Metric(self.metric_value));
        record.push(RecordEntry::TotalWidth(self.total_width));
        record.extend(self.rows.iter().cloned().map(RecordEntry::Row));
        record
    }
}

/// One entry of a flat branch record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordEntry {
    Metric(f64),
    TotalWidth(f64),
    Row(RowNode),
}

impl RecordEntry {
    /// Numeric value of the entry; a row's nominal width for rows.
    pub fn width(&self) -> f64 {
        match self {
            RecordEntry::Metric(value) | RecordEntry::TotalWidth(value) => *value,
            RecordEntry::Row(row) => row.width(),
        }
    }
}

/// Drops the two header entries of a flat record and returns the widths
/// of the remaining entries.
///
/// A record of `n` entries yields `n - 2` widths (none if `n < 2`).
///
/// # Example
///
/// ```
/// use parkforge_solver::{extract_pattern, RecordEntry};
///
/// let record = vec![
///     RecordEntry::Metric(2.0),
///     RecordEntry::TotalWidth(12.3),
/// ];
/// assert!(extract_pattern(&record).is_empty());
/// ```
pub fn extract_pattern(record: &[RecordEntry]) -> Vec<f64> {
    record.iter().skip(2).map(RecordEntry::width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{RoadRow, StallRow};
    use parkforge_core::{StallCatalog, StallFootprint};

    fn sample() -> Branch {
        let spec = *StallCatalog::right_angle_only(StallFootprint::STANDARD)
            .unwrap()
            .primary();
        let rows = vec![
            RowNode::from(StallRow::new(0, None, spec)),
            RowNode::from(RoadRow::new(0, None, 7.0)),
            RowNode::from(StallRow::new(0, None, spec)),
        ];
        Branch::new(0, rows, 17.6, Termination::DepthExhausted)
    }

    #[test]
    fn test_pattern_and_kinds() {
        let branch = sample();
        assert_eq!(branch.pattern(), vec![5.3, 7.0, 5.3]);
        assert_eq!(branch.kinds(), "SRS");
        assert_eq!(branch.stall_row_count(), 2);
        assert_eq!(branch.len(), 3);
    }

    #[test]
    fn test_record_has_two_header_entries() {
        let mut branch = sample();
        branch.set_metric_value(2.0);
        let record = branch.to_record();

        assert_eq!(record.len(), branch.len() + 2);
        assert_eq!(record[0], RecordEntry::Metric(2.0));
        assert_eq!(record[1], RecordEntry::TotalWidth(17.6));

        let pattern = extract_pattern(&record);
        assert_eq!(pattern.len(), record.len() - 2);
        assert_eq!(pattern, branch.pattern());
    }

    #[test]
    fn test_extract_pattern_short_record() {
        assert!(extract_pattern(&[RecordEntry::Metric(1.0)]).is_empty());
        assert!(extract_pattern(&[]).is_empty());
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(Termination::DepthExhausted.to_string(), "depth");
        assert_eq!(Termination::GeometryExhausted.to_string(), "geometry");
    }
}
