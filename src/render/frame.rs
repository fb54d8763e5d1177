use crate::core::{ViewBox, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ChartLayerKind, ChartLayerStack, CirclePrimitive, LinePrimitive, PolylinePrimitive,
    RectPrimitive, TextPrimitive,
};

/// Primitives of one layer. Within a layer backends draw rects, lines,
/// polylines, circles and texts in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: ChartLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn empty(kind: ChartLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            polylines: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.polylines.is_empty()
            && self.rects.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }
}

/// Backend-agnostic scene for one chart panel draw pass.
///
/// Coordinates live in `view_box` space; `viewport` is the pixel size the
/// backend should map it onto.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub view_box: ViewBox,
    /// Root font scale for host chrome; primitives carry their own sizes.
    pub font_scale_em: f64,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, view_box: ViewBox, font_scale_em: f64) -> Self {
        Self::from_stack(viewport, view_box, font_scale_em, ChartLayerStack::canonical())
    }

    #[must_use]
    pub fn from_stack(
        viewport: Viewport,
        view_box: ViewBox,
        font_scale_em: f64,
        stack: ChartLayerStack,
    ) -> Self {
        Self {
            viewport,
            view_box,
            font_scale_em,
            layers: stack.layers.into_iter().map(LayerPrimitives::empty).collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: ChartLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn push_line(&mut self, kind: ChartLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_polyline(&mut self, kind: ChartLayerKind, polyline: PolylinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.polylines.push(polyline);
        }
    }

    pub fn push_rect(&mut self, kind: ChartLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_circle(&mut self, kind: ChartLayerKind, circle: CirclePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.circles.push(circle);
        }
    }

    pub fn push_text(&mut self, kind: ChartLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.layers.iter().flat_map(|layer| layer.lines.iter())
    }

    pub fn polylines(&self) -> impl Iterator<Item = &PolylinePrimitive> {
        self.layers.iter().flat_map(|layer| layer.polylines.iter())
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.layers.iter().flat_map(|layer| layer.rects.iter())
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.layers.iter().flat_map(|layer| layer.circles.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.layers.iter().flat_map(|layer| layer.texts.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.view_box.is_valid() {
            return Err(ChartError::InvalidData(
                "view box must be finite and > 0".to_owned(),
            ));
        }
        if !self.font_scale_em.is_finite() || self.font_scale_em <= 0.0 {
            return Err(ChartError::InvalidData(
                "font scale must be finite and > 0".to_owned(),
            ));
        }

        for layer in &self.layers {
            for line in &layer.lines {
                line.validate()?;
            }
            for polyline in &layer.polylines {
                polyline.validate()?;
            }
            for rect in &layer.rects {
                rect.validate()?;
            }
            for circle in &layer.circles {
                circle.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }

    fn layer_mut(&mut self, kind: ChartLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::{ViewBox, Viewport};
    use crate::render::{ChartLayerKind, Color, LinePrimitive, RectPrimitive};

    #[test]
    fn primitives_land_in_their_layer() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100), ViewBox::new(1.0, 1.0), 1.0);
        frame.push_rect(
            ChartLayerKind::HitRegion,
            RectPrimitive::hit_region(0.0, 0.0, 1.0, 1.0),
        );
        frame.push_line(
            ChartLayerKind::Gridlines,
            LinePrimitive::vertical(0.5, 0.0, 1.0, 0.001, Color::rgb(0.8, 0.8, 0.8)),
        );

        let kinds: Vec<ChartLayerKind> = frame
            .layers
            .iter()
            .filter(|layer| !layer.is_empty())
            .map(|layer| layer.kind)
            .collect();
        assert_eq!(kinds, vec![ChartLayerKind::Gridlines, ChartLayerKind::HitRegion]);
        frame.validate().expect("valid frame");
    }

    #[test]
    fn non_finite_line_fails_validation() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100), ViewBox::new(1.0, 1.0), 1.0);
        frame.push_line(
            ChartLayerKind::Crosshair,
            LinePrimitive::vertical(f64::NAN, 0.0, 1.0, 0.001, Color::rgb(0.0, 0.0, 0.0)),
        );
        assert!(frame.validate().is_err());
    }
}
