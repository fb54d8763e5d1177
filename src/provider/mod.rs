//! Inbound data set: the JSON contract served by the dashboard API and an
//! optional blocking fetch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{RegionSeries, TimeSeriesPoint};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_ENDPOINT: &str = "https://api.bh.dev/covid";
pub const UNKNOWN_REGION: &str = "Unknown";

/// Geographic granularity of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionLevel {
    Country,
    State,
    County,
}

impl RegionLevel {
    pub const ALL: [RegionLevel; 3] = [RegionLevel::Country, RegionLevel::State, RegionLevel::County];

    /// Section heading used by the dashboard for this level.
    #[must_use]
    pub fn section_title(self) -> &'static str {
        match self {
            RegionLevel::Country => "United States",
            RegionLevel::State => "Missouri",
            RegionLevel::County => "St. Louis Area",
        }
    }
}

/// Region series grouped by level, in the order the API delivered them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataSet {
    pub countries: Vec<RegionSeries>,
    pub states: Vec<RegionSeries>,
    pub counties: Vec<RegionSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct RegionKeys {
    country: Option<String>,
    state: Option<String>,
    county: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    #[serde(default)]
    keys: RegionKeys,
    #[serde(default)]
    rows: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Deserialize)]
struct RawDataSet {
    #[serde(default, alias = "countryData")]
    countries: Option<Vec<RawRegion>>,
    #[serde(default, alias = "stateData")]
    states: Option<Vec<RawRegion>>,
    #[serde(default, alias = "countyData")]
    counties: Option<Vec<RawRegion>>,
}

impl DataSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the inbound contract; absent arrays are empty and regions
    /// without their level's key are named `Unknown`.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let raw: RawDataSet = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse data set: {e}")))?;
        let data_set = Self {
            countries: convert_level(raw.countries, RegionLevel::Country),
            states: convert_level(raw.states, RegionLevel::State),
            counties: convert_level(raw.counties, RegionLevel::County),
        };
        debug!(
            countries = data_set.countries.len(),
            states = data_set.states.len(),
            counties = data_set.counties.len(),
            "data set parsed"
        );
        Ok(data_set)
    }

    #[must_use]
    pub fn regions(&self, level: RegionLevel) -> &[RegionSeries] {
        match level {
            RegionLevel::Country => &self.countries,
            RegionLevel::State => &self.states,
            RegionLevel::County => &self.counties,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        RegionLevel::ALL
            .into_iter()
            .all(|level| self.regions(level).is_empty())
    }
}

fn convert_level(raw: Option<Vec<RawRegion>>, level: RegionLevel) -> Vec<RegionSeries> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|region| {
            let name = match level {
                RegionLevel::Country => region.keys.country,
                RegionLevel::State => region.keys.state,
                RegionLevel::County => region.keys.county,
            };
            let name = name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_REGION.to_owned());
            RegionSeries::new(name, region.rows)
        })
        .collect()
}

/// Performs the single blocking request for the data set.
#[cfg(feature = "fetch")]
pub fn fetch_dataset(url: &str) -> ChartResult<DataSet> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| ChartError::Fetch(format!("request to `{url}` failed: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ChartError::Fetch(format!("`{url}` returned {status}")));
    }
    let body = response
        .text()
        .map_err(|e| ChartError::Fetch(format!("failed to read `{url}` body: {e}")))?;
    if body.trim().is_empty() {
        return Err(ChartError::Fetch(format!("`{url}` returned no data")));
    }
    DataSet::from_json_str(&body)
}

/// Fetches the data set, logging and swallowing failures so callers can
/// still render empty panels.
#[cfg(feature = "fetch")]
#[must_use]
pub fn load_dataset_or_empty(url: &str) -> DataSet {
    match fetch_dataset(url) {
        Ok(data_set) => data_set,
        Err(err) => {
            tracing::error!(url, error = %err, "data set unavailable; rendering empty panels");
            DataSet::empty()
        }
    }
}
