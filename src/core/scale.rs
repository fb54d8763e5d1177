use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{BandNormalization, Metric, MetricBand, RegionSeries};

/// Largest finite value of each metric in one series.
///
/// `None` marks a metric with no finite value; its curve renders flat on the
/// band baseline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleRange {
    maxima: IndexMap<Metric, Option<f64>>,
}

impl ScaleRange {
    #[must_use]
    pub fn from_series(series: &RegionSeries) -> Self {
        let maxima = Metric::ALL
            .into_iter()
            .map(|metric| {
                let max = series
                    .data
                    .iter()
                    .map(|point| point.value(metric))
                    .filter(|value| value.is_finite())
                    .map(OrderedFloat)
                    .max()
                    .map(OrderedFloat::into_inner);
                (metric, max)
            })
            .collect();
        Self { maxima }
    }

    #[must_use]
    pub fn max(&self, metric: Metric) -> Option<f64> {
        self.maxima.get(&metric).copied().flatten()
    }
}

/// A series bundled with the scale range computed from it.
///
/// Both are only ever replaced together, so a scale can never reference a
/// superseded series.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    series: RegionSeries,
    range: ScaleRange,
}

impl PlotData {
    #[must_use]
    pub fn new(series: RegionSeries) -> Self {
        let range = ScaleRange::from_series(&series);
        Self { series, range }
    }

    #[must_use]
    pub fn series(&self) -> &RegionSeries {
        &self.series
    }

    #[must_use]
    pub fn range(&self) -> &ScaleRange {
        &self.range
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.data.is_empty()
    }

    /// Vertical coordinate of `metric` at record `index`.
    #[must_use]
    pub fn y_at(&self, band: &MetricBand, index: usize, multiplier: f64) -> Option<f64> {
        let point = self.series.data.get(index)?;
        Some(scale_metric(
            point.value(band.metric),
            self.range.max(band.metric),
            band,
            multiplier,
        ))
    }
}

/// Maps a metric value into its band, scaled by the layout multiplier.
///
/// Missing values, and series maxima that are missing or not positive, map to
/// the band baseline instead of producing NaN coordinates.
#[must_use]
pub fn scale_metric(value: f64, max: Option<f64>, band: &MetricBand, multiplier: f64) -> f64 {
    let baseline = band.baseline * multiplier;
    if !value.is_finite() {
        return baseline;
    }
    let ratio = match band.normalization {
        BandNormalization::SeriesMax => match max {
            Some(max) if max.is_finite() && max > 0.0 => value / max,
            _ => return baseline,
        },
        BandNormalization::Fixed { factor } => value * factor,
    };
    if !ratio.is_finite() {
        return baseline;
    }
    multiplier * (band.baseline + ratio.clamp(0.0, 1.0) * band.band_height)
}

/// Evenly spaced horizontal position of record `index` out of `count`.
///
/// Date gaps are ignored; every record gets the same width.
#[must_use]
pub fn scale_x(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 / count as f64
}
