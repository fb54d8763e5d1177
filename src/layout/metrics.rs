use serde::{Deserialize, Serialize};

use crate::core::{ContainerSize, ViewBox};
use crate::error::{ChartError, ChartResult};

/// Tuning for size-derived layout values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPolicy {
    /// Container width that maps to a font scale of `1em`.
    pub font_scale_divisor: f64,
    /// Share of the panel height kept for the plot when the key is shown.
    pub key_fraction: f64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            font_scale_divisor: 250.0,
            key_fraction: 0.8,
        }
    }
}

impl LayoutPolicy {
    pub fn validate(self) -> ChartResult<()> {
        if !self.font_scale_divisor.is_finite() || self.font_scale_divisor <= 0.0 {
            return Err(ChartError::InvalidData(
                "layout font scale divisor must be finite and > 0".to_owned(),
            ));
        }
        if !self.key_fraction.is_finite() || self.key_fraction <= 0.0 || self.key_fraction > 1.0 {
            return Err(ChartError::InvalidData(
                "layout key fraction must be finite and in (0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Geometry derived from one container size.
///
/// Width and height are always taken from the same measurement; nothing is
/// cached across sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub container: ContainerSize,
    pub show_key: bool,
    /// Font size for host chrome around the plot, such as a wrapping
    /// element's title and key. Frame text is sized in view box units.
    pub font_scale_em: f64,
    pub aspect_multiplier: f64,
}

impl LayoutMetrics {
    pub fn compute(
        container: ContainerSize,
        show_key: bool,
        policy: LayoutPolicy,
    ) -> ChartResult<Self> {
        container.validate()?;
        policy.validate()?;
        let key_share = if show_key { policy.key_fraction } else { 1.0 };
        Ok(Self {
            container,
            show_key,
            font_scale_em: container.width / policy.font_scale_divisor,
            aspect_multiplier: container.height / container.width * key_share,
        })
    }

    /// Plot area in viewbox units: `1.0` wide, `aspect_multiplier` tall.
    #[must_use]
    pub fn plot_box(&self) -> ViewBox {
        ViewBox::new(1.0, self.aspect_multiplier)
    }

    /// Whole panel in viewbox units, key area included.
    #[must_use]
    pub fn panel_box(&self) -> ViewBox {
        ViewBox::new(1.0, self.container.height / self.container.width)
    }

    /// Viewbox units per container pixel.
    #[must_use]
    pub fn units_per_px(&self) -> f64 {
        1.0 / self.container.width
    }
}
