use crate::layout::LayoutMetrics;
use crate::render::{
    ChartLayerKind, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::Chart;

const LEGEND_MARGIN: f64 = 0.03;
const TITLE_MARGIN: f64 = 0.02;

impl<R: Renderer> Chart<R> {
    pub(super) fn build_title_into(&self, frame: &mut RenderFrame) {
        if self.title.trim().is_empty() {
            return;
        }
        let size = self.config.title_font_size;
        frame.push_text(
            ChartLayerKind::Title,
            TextPrimitive::new(
                self.title.clone(),
                TITLE_MARGIN,
                TITLE_MARGIN + size,
                size,
                self.config.text_color,
                TextHAlign::Left,
            ),
        );
    }

    /// Key below the plot: one swatch and label per band, stacked in rows
    /// inside the space left under the aspect multiplier.
    pub(super) fn build_legend_into(&self, frame: &mut RenderFrame, metrics: &LayoutMetrics) {
        if !self.config.show_key || self.config.bands.is_empty() {
            return;
        }
        let panel_height = metrics.panel_box().height;
        let top = metrics.aspect_multiplier;
        let available = panel_height - top;
        if available <= 0.0 {
            return;
        }

        let rows = self.config.bands.len() as f64;
        let row_height = (available - 2.0 * LEGEND_MARGIN).max(0.0) / rows;
        let font_size = self.config.label_font_size.min(row_height * 0.8);
        if font_size <= 0.0 {
            return;
        }
        let swatch = font_size * 0.8;

        for (row, band) in self.config.bands.iter().enumerate() {
            let center_y = top + LEGEND_MARGIN + (row as f64 + 0.5) * row_height;
            frame.push_rect(
                ChartLayerKind::Legend,
                RectPrimitive::new(
                    LEGEND_MARGIN,
                    center_y - swatch * 0.5,
                    swatch,
                    swatch,
                    band.color,
                ),
            );
            frame.push_text(
                ChartLayerKind::Legend,
                TextPrimitive::new(
                    band.label.clone(),
                    LEGEND_MARGIN + swatch * 1.6,
                    center_y + font_size * 0.35,
                    font_size,
                    self.config.text_color,
                    TextHAlign::Left,
                ),
            );
        }
    }

    /// Transparent pointer-capturing rect over the plot, always last.
    pub(super) fn build_hit_region_into(&self, frame: &mut RenderFrame, metrics: &LayoutMetrics) {
        let plot = metrics.plot_box();
        frame.push_rect(
            ChartLayerKind::HitRegion,
            RectPrimitive::hit_region(0.0, 0.0, plot.width, plot.height),
        );
    }
}
