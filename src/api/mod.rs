mod chart;
mod chart_config;
mod chart_snapshot;
mod crosshair_frame_builder;
mod dashboard;
pub mod label_format;
mod legend_frame_builder;
mod plot_frame_builder;
mod render_frame_builder;

pub use chart::Chart;
pub use chart_config::{ChartConfig, TooltipStyle};
pub use chart_snapshot::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1,
};
pub use dashboard::{Dashboard, DashboardSection};
