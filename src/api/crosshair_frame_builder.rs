use crate::core::scale_x;
use crate::interaction::ResolvedPoint;
use crate::layout::LayoutMetrics;
use crate::render::{
    ChartLayerKind, CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

use super::{Chart, label_format};

/// Tooltip box laid out in viewbox units.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct TooltipPanel {
    pub(super) lines: Vec<String>,
    pub(super) x: f64,
    pub(super) y: f64,
    pub(super) width: f64,
    pub(super) height: f64,
}

impl<R: Renderer> Chart<R> {
    /// Crosshair line, marker dots, tooltip panel and date label for the
    /// resolved record. Emits nothing while the tooltip is hidden.
    pub(super) fn build_crosshair_into(&self, frame: &mut RenderFrame, metrics: &LayoutMetrics) {
        if !self.tooltip.visible() {
            return;
        }
        let Some(resolved) = self.tooltip.resolved() else {
            return;
        };
        let bottom = metrics.aspect_multiplier;
        let x = scale_x(resolved.index, self.plot.len());

        frame.push_line(
            ChartLayerKind::Crosshair,
            LinePrimitive::vertical(
                x,
                0.0,
                bottom,
                self.config.crosshair_width,
                self.config.crosshair_color,
            ),
        );
        let label_size = self.config.label_font_size;
        frame.push_text(
            ChartLayerKind::Crosshair,
            TextPrimitive::new(
                label_format::format_tooltip_date(resolved.point.date),
                x,
                bottom - label_size * 0.4,
                label_size,
                self.config.text_color,
                TextHAlign::Center,
            ),
        );

        self.build_markers_into(frame, resolved, x, metrics);

        if let Some(panel) = self.tooltip_panel(metrics) {
            self.build_tooltip_into(frame, &panel);
        }
    }

    fn build_markers_into(
        &self,
        frame: &mut RenderFrame,
        resolved: ResolvedPoint,
        x: f64,
        metrics: &LayoutMetrics,
    ) {
        for band in &self.config.bands {
            if !resolved.point.value(band.metric).is_finite() {
                continue;
            }
            let Some(y) = self
                .plot
                .y_at(band, resolved.index, metrics.aspect_multiplier)
            else {
                continue;
            };
            frame.push_circle(
                ChartLayerKind::Markers,
                CirclePrimitive::new(x, y, self.config.marker_radius, band.color),
            );
        }
    }

    fn build_tooltip_into(&self, frame: &mut RenderFrame, panel: &TooltipPanel) {
        let style = &self.config.tooltip;
        let font_size = self.config.label_font_size;
        let mut rect = RectPrimitive::new(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            style.background,
        )
        .with_corner_radius(style.padding * 0.5);
        if style.border_width > 0.0 {
            rect = rect.with_border(style.border_width, style.border_color);
        }
        frame.push_rect(ChartLayerKind::Tooltip, rect);

        let line_step = font_size * style.line_height;
        for (row, line) in panel.lines.iter().enumerate() {
            frame.push_text(
                ChartLayerKind::Tooltip,
                TextPrimitive::new(
                    line.clone(),
                    panel.x + style.padding,
                    panel.y + style.padding + font_size + row as f64 * line_step,
                    font_size,
                    style.text_color,
                    TextHAlign::Left,
                ),
            );
        }
    }

    /// Tooltip layout for the current state, anchored at the pointer.
    ///
    /// The panel's left edge sits on the pointer; when flipped its right
    /// edge does.
    pub(super) fn tooltip_panel(&self, metrics: &LayoutMetrics) -> Option<TooltipPanel> {
        if !self.tooltip.visible() {
            return None;
        }
        let resolved = self.tooltip.resolved()?;
        let style = &self.config.tooltip;
        let font_size = self.config.label_font_size;

        let mut lines = Vec::with_capacity(self.config.bands.len() + 2);
        lines.push(label_format::format_tooltip_date(resolved.point.date));
        lines.extend(label_format::tooltip_lines(
            &resolved.point,
            &self.config.bands,
        ));

        let text_width = lines
            .iter()
            .map(|line| label_format::estimate_text_width(line, font_size))
            .fold(0.0, f64::max);
        let width = text_width + 2.0 * style.padding;
        let height = lines.len() as f64 * font_size * style.line_height + 2.0 * style.padding;

        let anchor = self.tooltip.fractional_x();
        let x = if self.tooltip.flipped() {
            anchor - width
        } else {
            anchor
        };
        Some(TooltipPanel {
            lines,
            x,
            y: style.top * metrics.aspect_multiplier,
            width,
            height,
        })
    }
}
