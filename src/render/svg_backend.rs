use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    ChartLayerKind, CirclePrimitive, Color, LayerPrimitives, LinePrimitive, PolylinePrimitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_written: usize,
    pub polylines_written: usize,
    pub rects_written: usize,
    pub circles_written: usize,
    pub texts_written: usize,
}

/// Serializes frames into standalone SVG documents.
///
/// The root element maps the frame's normalized view box onto the pixel
/// viewport with `preserveAspectRatio="none"`, so every coordinate stays a
/// fraction of the panel.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    background: Option<Color>,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    pub fn set_background(&mut self, color: Option<Color>) -> ChartResult<()> {
        if let Some(color) = color {
            color.validate()?;
        }
        self.background = color;
        Ok(())
    }

    /// Last rendered document; empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_frame(&self, out: &mut String, frame: &RenderFrame) -> ChartResult<SvgRenderStats> {
        let mut stats = SvgRenderStats::default();
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="none" style="font-size:{}em">"#,
            frame.viewport.width,
            frame.viewport.height,
            num(frame.view_box.width),
            num(frame.view_box.height),
            num(frame.font_scale_em),
        )
        .map_err(map_write_error)?;

        if let Some(background) = self.background {
            write!(
                out,
                r#"<rect x="0" y="0" width="{}" height="{}"{}/>"#,
                num(frame.view_box.width),
                num(frame.view_box.height),
                fill_attrs(background),
            )
            .map_err(map_write_error)?;
        }

        for layer in &frame.layers {
            if layer.is_empty() {
                continue;
            }
            write_layer(out, layer, &mut stats)?;
        }

        out.push_str("</svg>");
        Ok(stats)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut document = String::new();
        let stats = self.write_frame(&mut document, frame)?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

fn write_layer(
    out: &mut String,
    layer: &LayerPrimitives,
    stats: &mut SvgRenderStats,
) -> ChartResult<()> {
    write!(out, r#"<g data-layer="{}">"#, layer_name(layer.kind)).map_err(map_write_error)?;
    for rect in &layer.rects {
        write_rect(out, rect)?;
        stats.rects_written += 1;
    }
    for line in &layer.lines {
        write_line(out, line)?;
        stats.lines_written += 1;
    }
    for polyline in &layer.polylines {
        write_polyline(out, polyline)?;
        stats.polylines_written += 1;
    }
    for circle in &layer.circles {
        write_circle(out, circle)?;
        stats.circles_written += 1;
    }
    for text in &layer.texts {
        write_text(out, text)?;
        stats.texts_written += 1;
    }
    out.push_str("</g>");
    Ok(())
}

fn write_rect(out: &mut String, rect: &RectPrimitive) -> ChartResult<()> {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
    )
    .map_err(map_write_error)?;
    if rect.corner_radius > 0.0 {
        write!(out, r#" rx="{}""#, num(rect.corner_radius)).map_err(map_write_error)?;
    }
    if rect.captures_pointer {
        out.push_str(r#" fill="transparent" pointer-events="all" data-hit-region="true""#);
    } else {
        out.push_str(&fill_attrs(rect.fill_color));
    }
    if rect.border_width > 0.0 {
        out.push_str(&stroke_attrs(rect.border_color, rect.border_width));
    }
    out.push_str("/>");
    Ok(())
}

fn write_line(out: &mut String, line: &LinePrimitive) -> ChartResult<()> {
    write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2),
        stroke_attrs(line.color, line.stroke_width),
    )
    .map_err(map_write_error)
}

fn write_polyline(out: &mut String, polyline: &PolylinePrimitive) -> ChartResult<()> {
    let points = polyline
        .points
        .iter()
        .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
        .collect::<Vec<_>>()
        .join(" ");
    write!(
        out,
        r#"<polyline fill="none" stroke-linejoin="round" points="{points}"{}/>"#,
        stroke_attrs(polyline.color, polyline.stroke_width),
    )
    .map_err(map_write_error)
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> ChartResult<()> {
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
        num(circle.cx),
        num(circle.cy),
        num(circle.radius),
        fill_attrs(circle.fill_color),
    )
    .map_err(map_write_error)
}

fn write_text(out: &mut String, text: &TextPrimitive) -> ChartResult<()> {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{}>{}</text>"#,
        num(text.x),
        num(text.y),
        num(text.font_size),
        fill_attrs(text.color),
        escape_xml(&text.text),
    )
    .map_err(map_write_error)
}

fn fill_attrs(color: Color) -> String {
    if color.alpha < 1.0 {
        format!(
            r#" fill="{}" fill-opacity="{}""#,
            color.to_hex(),
            num(color.alpha)
        )
    } else {
        format!(r#" fill="{}""#, color.to_hex())
    }
}

fn stroke_attrs(color: Color, width: f64) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}""#,
        color.to_hex(),
        num(width)
    );
    if color.alpha < 1.0 {
        attrs.push_str(&format!(r#" stroke-opacity="{}""#, num(color.alpha)));
    }
    attrs
}

fn layer_name(kind: ChartLayerKind) -> &'static str {
    match kind {
        ChartLayerKind::Title => "title",
        ChartLayerKind::Gridlines => "gridlines",
        ChartLayerKind::Curves => "curves",
        ChartLayerKind::Crosshair => "crosshair",
        ChartLayerKind::Markers => "markers",
        ChartLayerKind::Tooltip => "tooltip",
        ChartLayerKind::Legend => "legend",
        ChartLayerKind::HitRegion => "hit-region",
    }
}

/// Fixed precision, trailing zeros trimmed.
fn num(value: f64) -> String {
    let formatted = format!("{value:.5}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-" | "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn map_write_error(err: std::fmt::Error) -> ChartError {
    ChartError::InvalidData(format!("failed to write svg document: {err}"))
}
