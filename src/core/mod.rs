pub mod band;
pub mod curve;
pub mod gridlines;
pub mod scale;
pub mod series;
pub mod types;

pub use band::{BandNormalization, MetricBand, default_band_table, validate_band_table};
pub use curve::project_curve;
pub use gridlines::{DEFAULT_GRIDLINE_THINNING, month_gridlines, month_start_indices};
pub use scale::{PlotData, ScaleRange, scale_metric, scale_x};
pub use series::{Metric, RegionSeries, TimeSeriesPoint, parse_calendar_day};
pub use types::{ContainerSize, ViewBox, Viewport};
