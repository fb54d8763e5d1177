use chrono::Datelike;

use crate::core::TimeSeriesPoint;

/// Month gridlines are thinned to one in this many by default.
pub const DEFAULT_GRIDLINE_THINNING: usize = 3;

/// Lazily yields indices of records falling on the first of a month, keeping
/// every `thinning`-th candidate starting with the first.
///
/// The iterator is a pure function of `points`; calling again restarts it.
/// A `thinning` of zero is treated as one.
pub fn month_gridlines(
    points: &[TimeSeriesPoint],
    thinning: usize,
) -> impl Iterator<Item = usize> + '_ {
    month_start_indices(points).step_by(thinning.max(1))
}

/// Every index whose date is the first day of its month.
pub fn month_start_indices(points: &[TimeSeriesPoint]) -> impl Iterator<Item = usize> + '_ {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| point.date.day() == 1)
        .map(|(index, _)| index)
}
