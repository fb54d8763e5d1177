use tracing::{debug, trace, warn};

use crate::core::{
    ContainerSize, Metric, MetricBand, PlotData, RegionSeries, ScaleRange, month_gridlines,
    project_curve,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    PointerAction, PointerInput, ResolvedPoint, SurfaceRect, TooltipState, resolve_index,
};
use crate::layout::{ChartSizing, LayoutMetrics, LayoutObserver, ResizeHub};
use crate::render::Renderer;

use super::ChartConfig;

/// One titled chart panel for one region.
///
/// Owns its renderer, its series with the matching scale range, its tooltip
/// state and (when responsive) its single resize subscription. Nothing is
/// shared between charts.
pub struct Chart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) title: String,
    pub(super) config: ChartConfig,
    pub(super) sizing: ChartSizing,
    pub(super) plot: PlotData,
    pub(super) tooltip: TooltipState,
}

impl<R: Renderer> Chart<R> {
    pub fn new(
        renderer: R,
        title: impl Into<String>,
        config: ChartConfig,
        sizing: ChartSizing,
    ) -> ChartResult<Self> {
        config.validate()?;
        let title = title.into();
        debug!(title = %title, show_key = config.show_key, "chart created");
        Ok(Self {
            plot: PlotData::new(RegionSeries::empty(title.clone())),
            renderer,
            title,
            config,
            sizing,
            tooltip: TooltipState::default(),
        })
    }

    /// Chart drawn at a fixed target size.
    pub fn with_fixed_size(
        renderer: R,
        title: impl Into<String>,
        config: ChartConfig,
        size: ContainerSize,
    ) -> ChartResult<Self> {
        size.validate()?;
        let policy = config.layout;
        Self::new(renderer, title, config, ChartSizing::Fixed { size, policy })
    }

    /// Chart following a container through `hub`; subscribes one listener
    /// that lives exactly as long as the chart.
    pub fn mount(
        renderer: R,
        title: impl Into<String>,
        config: ChartConfig,
        hub: &ResizeHub,
    ) -> ChartResult<Self> {
        config.validate()?;
        let observer = LayoutObserver::mount(hub, config.show_key, config.layout)?;
        Self::new(renderer, title, config, ChartSizing::Responsive(observer))
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &RegionSeries {
        self.plot.series()
    }

    #[must_use]
    pub fn scale_range(&self) -> &ScaleRange {
        self.plot.range()
    }

    #[must_use]
    pub fn tooltip_state(&self) -> TooltipState {
        self.tooltip
    }

    #[must_use]
    pub fn sizing(&self) -> &ChartSizing {
        &self.sizing
    }

    #[must_use]
    pub fn show_key(&self) -> bool {
        self.config.show_key
    }

    pub fn set_show_key(&mut self, show_key: bool) {
        self.config.show_key = show_key;
    }

    /// Replaces the series; the scale range is recomputed in the same step
    /// and any tooltip pointing into the old series is dropped.
    pub fn set_series(&mut self, series: RegionSeries) {
        if let Err(err) = series.validate_chronological() {
            warn!(error = %err, "accepting series with out-of-order dates");
        }
        debug!(
            title = %self.title,
            region = %series.name,
            points = series.len(),
            "set series"
        );
        self.plot = PlotData::new(series);
        self.tooltip.hide();
    }

    pub fn layout_metrics(&self) -> ChartResult<LayoutMetrics> {
        self.sizing.metrics(self.config.show_key)
    }

    /// Feeds one pointer or touch event from the hit region.
    pub fn handle_pointer(&mut self, input: &PointerInput, surface: SurfaceRect) {
        match surface.resolve(input) {
            PointerAction::Track { fractional_x } => self.track_pointer(fractional_x, surface),
            PointerAction::Clear => {
                trace!(title = %self.title, "pointer left");
                self.tooltip.hide();
            }
            PointerAction::Ignore => {}
        }
    }

    pub fn pointer_leave(&mut self) {
        self.handle_pointer(&PointerInput::MouseLeave, SurfaceRect::new(0.0, 0.0));
    }

    /// Records the tooltip overlay width measured by the host.
    pub fn record_tooltip_width(&mut self, tooltip_width_px: f64) {
        let chart_width = self.chart_width_px(None);
        self.tooltip.record_measurement(tooltip_width_px, chart_width);
    }

    /// Indices of the month gridlines for the current series.
    #[must_use]
    pub fn gridline_indices(&self) -> Vec<usize> {
        month_gridlines(&self.plot.series().data, self.config.gridline_thinning).collect()
    }

    /// Viewbox points of one metric's curve at the current layout.
    pub fn curve_points(&self, metric: Metric) -> ChartResult<Vec<(f64, f64)>> {
        let band = self.band(metric)?;
        let metrics = self.layout_metrics()?;
        Ok(project_curve(&self.plot, band, metrics.aspect_multiplier))
    }

    pub fn band(&self, metric: Metric) -> ChartResult<&MetricBand> {
        self.config
            .bands
            .iter()
            .find(|band| band.metric == metric)
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "metric `{}` has no band in this chart",
                    metric.field_name()
                ))
            })
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn track_pointer(&mut self, fractional_x: f64, surface: SurfaceRect) {
        let resolved = resolve_index(fractional_x, self.plot.len()).and_then(|index| {
            self.plot
                .series()
                .data
                .get(index)
                .map(|point| ResolvedPoint {
                    index,
                    point: *point,
                })
        });
        trace!(
            title = %self.title,
            fractional_x,
            index = resolved.map(|r| r.index),
            "pointer tracked"
        );
        let chart_width = self.chart_width_px(Some(surface.width));
        self.tooltip.show_at(fractional_x, resolved, chart_width);
    }

    pub(super) fn chart_width_px(&self, fallback: Option<f64>) -> f64 {
        match self.layout_metrics() {
            Ok(metrics) => metrics.container.width,
            Err(_) => fallback.unwrap_or(0.0),
        }
    }
}
