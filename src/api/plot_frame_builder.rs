use crate::core::{month_gridlines, project_curve, scale_x};
use crate::layout::LayoutMetrics;
use crate::render::{
    ChartLayerKind, LinePrimitive, PolylinePrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::{Chart, label_format};

impl<R: Renderer> Chart<R> {
    /// Vertical month gridlines spanning the plot height, optionally labelled
    /// just above the bottom edge.
    pub(super) fn build_gridlines_into(&self, frame: &mut RenderFrame, metrics: &LayoutMetrics) {
        let data = &self.plot.series().data;
        let count = data.len();
        let bottom = metrics.aspect_multiplier;
        let label_size = self.config.label_font_size;

        for index in month_gridlines(data, self.config.gridline_thinning) {
            let x = scale_x(index, count);
            frame.push_line(
                ChartLayerKind::Gridlines,
                LinePrimitive::vertical(
                    x,
                    0.0,
                    bottom,
                    self.config.gridline_width,
                    self.config.gridline_color,
                ),
            );
            if self.config.gridline_labels {
                frame.push_text(
                    ChartLayerKind::Gridlines,
                    TextPrimitive::new(
                        label_format::format_month(data[index].date),
                        x + label_size * 0.2,
                        bottom - label_size * 0.4,
                        label_size,
                        self.config.gridline_color,
                        TextHAlign::Left,
                    ),
                );
            }
        }
    }

    /// One unsmoothed polyline per band, drawn in band-table order.
    pub(super) fn build_curves_into(&self, frame: &mut RenderFrame, metrics: &LayoutMetrics) {
        if self.plot.is_empty() {
            return;
        }
        for band in &self.config.bands {
            let points = project_curve(&self.plot, band, metrics.aspect_multiplier);
            frame.push_polyline(
                ChartLayerKind::Curves,
                PolylinePrimitive::new(points, self.config.stroke_width, band.color),
            );
        }
    }
}
