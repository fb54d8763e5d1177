//! covid-chart: headless chart engine for regional pandemic time series.
//!
//! Each region gets one panel with case, death and vaccination curves drawn
//! into a normalized view box, month gridlines, an optional key, and a
//! hit-tested crosshair with a tooltip. Hosts feed pointer and resize events
//! in and draw the backend-agnostic frames the engine produces.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod provider;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartSnapshot, Dashboard};
pub use error::{ChartError, ChartResult};
