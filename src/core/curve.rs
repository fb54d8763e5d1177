use crate::core::{MetricBand, PlotData, scale_metric, scale_x};

/// Projects one metric of `plot` into viewbox points, one per record.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// exact same geometry. Missing values sit on the band baseline instead of
/// breaking the path.
#[must_use]
pub fn project_curve(plot: &PlotData, band: &MetricBand, multiplier: f64) -> Vec<(f64, f64)> {
    let count = plot.len();
    let max = plot.range().max(band.metric);
    plot.series()
        .data
        .iter()
        .enumerate()
        .map(|(index, point)| {
            (
                scale_x(index, count),
                scale_metric(point.value(band.metric), max, band, multiplier),
            )
        })
        .collect()
}
