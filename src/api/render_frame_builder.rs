use tracing::debug;

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::Chart;

impl<R: Renderer> Chart<R> {
    /// Materializes the full layered frame for the current state.
    ///
    /// Fails with `InvalidViewport` while the container size is unusable.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let metrics = self.layout_metrics()?;
        let mut frame = RenderFrame::new(
            metrics.container.to_viewport(),
            metrics.panel_box(),
            metrics.font_scale_em,
        );

        self.build_title_into(&mut frame);
        self.build_gridlines_into(&mut frame, &metrics);
        self.build_curves_into(&mut frame, &metrics);
        self.build_crosshair_into(&mut frame, &metrics);
        self.build_legend_into(&mut frame, &metrics);
        self.build_hit_region_into(&mut frame, &metrics);
        Ok(frame)
    }

    /// Builds, validates and draws one frame, then records the tooltip width
    /// when estimation is enabled.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        frame.validate()?;
        self.renderer.render(&frame)?;
        debug!(
            title = %self.title,
            points = self.plot.len(),
            lines = frame.lines().count(),
            polylines = frame.polylines().count(),
            tooltip = self.tooltip.visible(),
            "chart rendered"
        );

        if self.config.estimate_tooltip_width {
            let metrics = self.layout_metrics()?;
            if let Some(panel) = self.tooltip_panel(&metrics) {
                let width_px = panel.width / metrics.units_per_px();
                self.record_tooltip_width(width_px);
            }
        }
        Ok(())
    }
}
