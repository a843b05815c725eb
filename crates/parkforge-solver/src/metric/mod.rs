//! Branch scoring and ranking.
//!
//! A [`Metric`] maps a completed [`Branch`] to a number; higher is better.
//! [`rank_branches`] scores a result set and orders it best first.

use std::fmt::Debug;

use parkforge_config::MetricKind;
use parkforge_core::GeometryProvider;
use tracing::debug;

use crate::branch::Branch;

#[cfg(test)]
mod tests;

/// Scores a completed branch.
pub trait Metric: Send + Sync + Debug {
    /// Short name used in log events.
    fn name(&self) -> &str;

    fn evaluate(&self, branch: &Branch, geometry: &dyn GeometryProvider) -> f64;
}

/// Number of stall rows in the branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct StallRowCount;

impl Metric for StallRowCount {
    fn name(&self) -> &str {
        "stall_row_count"
    }

    fn evaluate(&self, branch: &Branch, _geometry: &dyn GeometryProvider) -> f64 {
        branch.stall_row_count() as f64
    }
}

/// Summed reference-line length of the stall rows.
///
/// Stall rows without a reference line contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StallRowLength;

impl Metric for StallRowLength {
    fn name(&self) -> &str {
        "stall_row_length"
    }

    fn evaluate(&self, branch: &Branch, geometry: &dyn GeometryProvider) -> f64 {
        branch
            .rows()
            .iter()
            .filter(|row| row.is_stall())
            .filter_map(|row| row.reference_line())
            .map(|line| geometry.curve_length(line))
            .sum()
    }
}

/// Estimated number of physical stalls.
///
/// Each stall row holds `floor(line length / frontage)` stalls per depth,
/// times the stall type's unit count.
#[derive(Debug, Clone, Copy, Default)]
pub struct StallUnits;

impl Metric for StallUnits {
    fn name(&self) -> &str {
        "stall_units"
    }

    fn evaluate(&self, branch: &Branch, geometry: &dyn GeometryProvider) -> f64 {
        branch
            .rows()
            .iter()
            .filter_map(|row| Some((row.as_stall()?, row.reference_line()?)))
            .map(|(stall, line)| {
                let spec = stall.stall_type();
                let per_depth = (geometry.curve_length(line) / spec.length()).floor();
                per_depth * f64::from(spec.stall_unit_count())
            })
            .sum()
    }
}

/// A metric backed by a closure.
///
/// # Example
///
/// ```
/// use parkforge_solver::metric::{FnMetric, Metric};
///
/// let widest = FnMetric::new("total_width", |branch, _| branch.total_width());
/// assert_eq!(widest.name(), "total_width");
/// ```
pub struct FnMetric<F> {
    name: String,
    f: F,
}

impl<F> FnMetric<F>
where
    F: Fn(&Branch, &dyn GeometryProvider) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Debug for FnMetric<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMetric").field("name", &self.name).finish()
    }
}

impl<F> Metric for FnMetric<F>
where
    F: Fn(&Branch, &dyn GeometryProvider) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, branch: &Branch, geometry: &dyn GeometryProvider) -> f64 {
        (self.f)(branch, geometry)
    }
}

/// Builds the metric named by a configuration value.
pub fn metric_for(kind: MetricKind) -> Box<dyn Metric> {
    match kind {
        MetricKind::StallRowCount => Box::new(StallRowCount),
        MetricKind::StallRowLength => Box::new(StallRowLength),
        MetricKind::StallUnits => Box::new(StallUnits),
    }
}

/// Scores every branch with `metric` and sorts best first.
///
/// The sort is stable, so equal scores keep discovery order. NaN scores
/// rank last, tied with negative infinity.
pub fn rank_branches(
    mut branches: Vec<Branch>,
    metric: &dyn Metric,
    geometry: &dyn GeometryProvider,
) -> Vec<Branch> {
    for branch in &mut branches {
        let value = metric.evaluate(branch, geometry);
        branch.set_metric_value(value);
    }
    branches.sort_by(|a, b| rank_key(b).total_cmp(&rank_key(a)));

    debug!(
        event = "rank_end",
        metric = metric.name(),
        branches = branches.len(),
        best = branches.first().map(Branch::metric_value).unwrap_or_default(),
    );
    branches
}

// NaN sorts as the lowest possible score.
#[inline]
fn rank_key(branch: &Branch) -> f64 {
    let value = branch.metric_value();
    if value.is_nan() {
        f64::NEG_INFINITY
    } else {
        value
    }
}
