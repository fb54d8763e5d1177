use serde::{Deserialize, Serialize};

use crate::core::Metric;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// How raw metric values are turned into a `0..=1` ratio inside a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandNormalization {
    /// Divide by the largest finite value of the metric in the current series.
    SeriesMax,
    /// Multiply by a constant; percentages use `0.01`.
    Fixed { factor: f64 },
}

/// Vertical sub-range of the viewbox reserved for one metric's curve.
///
/// A value maps to `baseline + ratio * band_height`. Negative heights draw
/// upward from the baseline since the viewbox y axis points down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBand {
    pub metric: Metric,
    pub baseline: f64,
    pub band_height: f64,
    pub normalization: BandNormalization,
    pub color: Color,
    pub label: String,
}

impl MetricBand {
    #[must_use]
    pub fn new(
        metric: Metric,
        baseline: f64,
        band_height: f64,
        normalization: BandNormalization,
        color: Color,
        label: impl Into<String>,
    ) -> Self {
        Self {
            metric,
            baseline,
            band_height,
            normalization,
            color,
            label: label.into(),
        }
    }

    /// Coordinate reached by the metric's largest value.
    #[must_use]
    pub fn extreme(&self) -> f64 {
        self.baseline + self.band_height
    }

    /// Lower and upper coordinate of the band regardless of direction.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let extreme = self.extreme();
        (self.baseline.min(extreme), self.baseline.max(extreme))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.baseline.is_finite() || !self.band_height.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "band for `{}` must have finite baseline and height",
                self.metric.field_name()
            )));
        }
        let (low, high) = self.bounds();
        if low < 0.0 || high > 1.0 {
            return Err(ChartError::InvalidData(format!(
                "band for `{}` must stay within [0, 1], got [{low}, {high}]",
                self.metric.field_name()
            )));
        }
        if let BandNormalization::Fixed { factor } = self.normalization {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "fixed normalization factor for `{}` must be finite and > 0",
                    self.metric.field_name()
                )));
            }
        }
        if self.label.trim().is_empty() {
            return Err(ChartError::InvalidData(format!(
                "band for `{}` needs a legend label",
                self.metric.field_name()
            )));
        }
        self.color.validate()
    }
}

const CASE_BASELINE: f64 = 0.5;
const CASE_EXTREME: f64 = 0.05;
const DEATH_TO_CASE_HEIGHT: f64 = 0.15;
const VACCINATION_BASELINE: f64 = 1.0;
const PERCENT_TO_FRACTION: f64 = 0.01;

/// Band table used when a chart config does not override it.
///
/// Entries are listed back to front: the deaths curve sits under the cases
/// curve, and both vaccination curves share one band drawn over them.
#[must_use]
pub fn default_band_table() -> Vec<MetricBand> {
    let case_height = CASE_EXTREME - CASE_BASELINE;
    vec![
        MetricBand::new(
            Metric::Deaths,
            CASE_BASELINE,
            case_height * DEATH_TO_CASE_HEIGHT,
            BandNormalization::SeriesMax,
            Color::rgb(1.0, 0.0, 0.0),
            "Deaths (7-day avg)",
        ),
        MetricBand::new(
            Metric::Cases,
            CASE_BASELINE,
            case_height,
            BandNormalization::SeriesMax,
            Color::from_rgb8(0xfc, 0xe2, 0xa2),
            "Cases (7-day avg)",
        ),
        MetricBand::new(
            Metric::PartiallyVaccinated,
            VACCINATION_BASELINE,
            case_height,
            BandNormalization::Fixed {
                factor: PERCENT_TO_FRACTION,
            },
            Color::from_rgb8(0x9e, 0xca, 0xe1),
            "Partially vaccinated",
        ),
        MetricBand::new(
            Metric::FullyVaccinated,
            VACCINATION_BASELINE,
            case_height,
            BandNormalization::Fixed {
                factor: PERCENT_TO_FRACTION,
            },
            Color::from_rgb8(0x31, 0x82, 0xbd),
            "Fully vaccinated",
        ),
    ]
}

/// Validates every band and rejects tables listing a metric twice.
pub fn validate_band_table(bands: &[MetricBand]) -> ChartResult<()> {
    for (index, band) in bands.iter().enumerate() {
        band.validate()?;
        if bands[..index].iter().any(|other| other.metric == band.metric) {
            return Err(ChartError::InvalidData(format!(
                "metric `{}` appears more than once in the band table",
                band.metric.field_name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{default_band_table, validate_band_table};
    use crate::core::Metric;

    #[test]
    fn default_table_is_valid_and_drawn_deaths_first() {
        let table = default_band_table();
        validate_band_table(&table).expect("default table");
        let order: Vec<Metric> = table.iter().map(|band| band.metric).collect();
        assert_eq!(
            order,
            vec![
                Metric::Deaths,
                Metric::Cases,
                Metric::PartiallyVaccinated,
                Metric::FullyVaccinated,
            ]
        );
    }

    #[test]
    fn duplicate_metric_is_rejected() {
        let mut table = default_band_table();
        table.push(table[1].clone());
        assert!(validate_band_table(&table).is_err());
    }
}
