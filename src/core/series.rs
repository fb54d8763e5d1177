use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChartError, ChartResult};

/// One day of regional figures.
///
/// Missing figures are stored as `f64::NAN` so a sequence stays dense and
/// index-addressable; scale functions map NaN to a band baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    #[serde(deserialize_with = "deserialize_calendar_day")]
    pub date: NaiveDate,
    #[serde(default = "missing", deserialize_with = "deserialize_figure")]
    pub cases_avg: f64,
    #[serde(default = "missing", deserialize_with = "deserialize_figure")]
    pub deaths_avg: f64,
    #[serde(default = "missing", deserialize_with = "deserialize_figure")]
    pub active_est: f64,
    #[serde(default = "missing", deserialize_with = "deserialize_figure")]
    pub deaths: f64,
    #[serde(default = "missing", deserialize_with = "deserialize_figure")]
    pub cases: f64,
    #[serde(default = "missing", deserialize_with = "deserialize_figure")]
    pub pvacc_pct: f64,
    #[serde(default = "missing", deserialize_with = "deserialize_figure")]
    pub fvacc_pct: f64,
}

impl TimeSeriesPoint {
    /// Point for `date` with every figure missing.
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            cases_avg: f64::NAN,
            deaths_avg: f64::NAN,
            active_est: f64::NAN,
            deaths: f64::NAN,
            cases: f64::NAN,
            pvacc_pct: f64::NAN,
            fvacc_pct: f64::NAN,
        }
    }

    #[must_use]
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        match metric {
            Metric::Cases => self.cases_avg = value,
            Metric::Deaths => self.deaths_avg = value,
            Metric::PartiallyVaccinated => self.pvacc_pct = value,
            Metric::FullyVaccinated => self.fvacc_pct = value,
        }
        self
    }

    #[must_use]
    pub fn with_active_estimate(mut self, value: f64) -> Self {
        self.active_est = value;
        self
    }

    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cases => self.cases_avg,
            Metric::Deaths => self.deaths_avg,
            Metric::PartiallyVaccinated => self.pvacc_pct,
            Metric::FullyVaccinated => self.fvacc_pct,
        }
    }
}

/// Curves a chart can draw, one per plotted `TimeSeriesPoint` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cases,
    Deaths,
    PartiallyVaccinated,
    FullyVaccinated,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Cases,
        Metric::Deaths,
        Metric::PartiallyVaccinated,
        Metric::FullyVaccinated,
    ];

    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::Cases => "cases_avg",
            Metric::Deaths => "deaths_avg",
            Metric::PartiallyVaccinated => "pvacc_pct",
            Metric::FullyVaccinated => "fvacc_pct",
        }
    }
}

/// Time series of one geographic region, chronological, one point per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSeries {
    pub name: String,
    pub data: Vec<TimeSeriesPoint>,
}

impl RegionSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<TimeSeriesPoint>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks that dates are strictly increasing.
    pub fn validate_chronological(&self) -> ChartResult<()> {
        for (index, pair) in self.data.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(ChartError::InvalidData(format!(
                    "region `{}` is not chronological at index {}: {} follows {}",
                    self.name,
                    index + 1,
                    pair[1].date,
                    pair[0].date
                )));
            }
        }
        Ok(())
    }
}

fn missing() -> f64 {
    f64::NAN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFigure {
    Number(f64),
    Text(String),
}

fn deserialize_figure<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let figure = match Option::<RawFigure>::deserialize(deserializer)? {
        Some(RawFigure::Number(value)) => value,
        Some(RawFigure::Text(text)) => text.trim().parse().unwrap_or(f64::NAN),
        None => f64::NAN,
    };
    Ok(figure)
}

fn deserialize_calendar_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_day(&raw).map_err(serde::de::Error::custom)
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into its calendar day.
pub fn parse_calendar_day(raw: &str) -> ChartResult<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|err| ChartError::InvalidData(format!("invalid calendar day `{raw}`: {err}")))
}
