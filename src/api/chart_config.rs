use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_GRIDLINE_THINNING, MetricBand, default_band_table, validate_band_table};
use crate::error::{ChartError, ChartResult};
use crate::layout::LayoutPolicy;
use crate::render::Color;

/// Tooltip overlay styling, in viewbox units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipStyle {
    pub top: f64,
    pub padding: f64,
    pub line_height: f64,
    pub background: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub text_color: Color,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            top: 0.06,
            padding: 0.012,
            line_height: 1.35,
            background: Color::rgba(0.1, 0.1, 0.12, 0.9),
            border_color: Color::rgb(0.35, 0.35, 0.4),
            border_width: 0.002,
            text_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist and reload panel setup; every field has
/// a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub show_key: bool,
    #[serde(default = "default_band_table")]
    pub bands: Vec<MetricBand>,
    #[serde(default = "default_gridline_thinning")]
    pub gridline_thinning: usize,
    #[serde(default = "default_true")]
    pub gridline_labels: bool,
    #[serde(default)]
    pub layout: LayoutPolicy,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_gridline_width")]
    pub gridline_width: f64,
    #[serde(default = "default_gridline_color")]
    pub gridline_color: Color,
    #[serde(default = "default_crosshair_width")]
    pub crosshair_width: f64,
    #[serde(default = "default_crosshair_color")]
    pub crosshair_color: Color,
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: f64,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default)]
    pub tooltip: TooltipStyle,
    /// Record an estimated tooltip width after each render. Hosts that
    /// measure the real overlay turn this off and call
    /// `Chart::record_tooltip_width` instead.
    #[serde(default = "default_true")]
    pub estimate_tooltip_width: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            show_key: false,
            bands: default_band_table(),
            gridline_thinning: default_gridline_thinning(),
            gridline_labels: true,
            layout: LayoutPolicy::default(),
            stroke_width: default_stroke_width(),
            gridline_width: default_gridline_width(),
            gridline_color: default_gridline_color(),
            crosshair_width: default_crosshair_width(),
            crosshair_color: default_crosshair_color(),
            marker_radius: default_marker_radius(),
            title_font_size: default_title_font_size(),
            label_font_size: default_label_font_size(),
            text_color: default_text_color(),
            tooltip: TooltipStyle::default(),
            estimate_tooltip_width: true,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_show_key(mut self, show_key: bool) -> Self {
        self.show_key = show_key;
        self
    }

    #[must_use]
    pub fn with_bands(mut self, bands: Vec<MetricBand>) -> Self {
        self.bands = bands;
        self
    }

    #[must_use]
    pub fn with_gridline_thinning(mut self, thinning: usize) -> Self {
        self.gridline_thinning = thinning;
        self
    }

    #[must_use]
    pub fn with_gridline_labels(mut self, enabled: bool) -> Self {
        self.gridline_labels = enabled;
        self
    }

    #[must_use]
    pub fn with_layout_policy(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_tooltip_style(mut self, tooltip: TooltipStyle) -> Self {
        self.tooltip = tooltip;
        self
    }

    #[must_use]
    pub fn with_estimated_tooltip_width(mut self, enabled: bool) -> Self {
        self.estimate_tooltip_width = enabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_band_table(&self.bands)?;
        self.layout.validate()?;
        for (name, value) in [
            ("stroke_width", self.stroke_width),
            ("gridline_width", self.gridline_width),
            ("crosshair_width", self.crosshair_width),
            ("marker_radius", self.marker_radius),
            ("title_font_size", self.title_font_size),
            ("label_font_size", self.label_font_size),
            ("tooltip.line_height", self.tooltip.line_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart config `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("tooltip.top", self.tooltip.top),
            ("tooltip.padding", self.tooltip.padding),
            ("tooltip.border_width", self.tooltip.border_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart config `{name}` must be finite and >= 0"
                )));
            }
        }
        for color in [
            self.gridline_color,
            self.crosshair_color,
            self.text_color,
            self.tooltip.background,
            self.tooltip.border_color,
            self.tooltip.text_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

fn default_true() -> bool {
    true
}

fn default_gridline_thinning() -> usize {
    DEFAULT_GRIDLINE_THINNING
}

fn default_stroke_width() -> f64 {
    0.005
}

fn default_gridline_width() -> f64 {
    0.002
}

fn default_gridline_color() -> Color {
    Color::rgba(0.5, 0.5, 0.5, 0.4)
}

fn default_crosshair_width() -> f64 {
    0.003
}

fn default_crosshair_color() -> Color {
    Color::rgba(0.9, 0.9, 0.9, 0.8)
}

fn default_marker_radius() -> f64 {
    0.009
}

fn default_title_font_size() -> f64 {
    0.045
}

fn default_label_font_size() -> f64 {
    0.03
}

fn default_text_color() -> Color {
    Color::rgb(0.85, 0.85, 0.85)
}
