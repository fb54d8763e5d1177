use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::TimeSeriesPoint;

/// One touch contact; only the screen X coordinate is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub screen_x: f64,
}

/// Pointer and touch events delivered to a chart's hit region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    MouseMove { client_x: f64 },
    MouseLeave,
    TouchStart { touches: SmallVec<[TouchPoint; 2]> },
    TouchMove { touches: SmallVec<[TouchPoint; 2]> },
    TouchEnd,
}

impl PointerInput {
    #[must_use]
    pub fn mouse_move(client_x: f64) -> Self {
        Self::MouseMove { client_x }
    }

    #[must_use]
    pub fn touch_move(screen_x: f64) -> Self {
        Self::TouchMove {
            touches: SmallVec::from_slice(&[TouchPoint { screen_x }]),
        }
    }

    #[must_use]
    pub fn touch_start(screen_x: f64) -> Self {
        Self::TouchStart {
            touches: SmallVec::from_slice(&[TouchPoint { screen_x }]),
        }
    }
}

/// What a chart should do with one pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Pointer is over the surface at this horizontal fraction.
    Track { fractional_x: f64 },
    /// Pointer left; drop all tooltip state.
    Clear,
    /// Nothing usable in the event (for example a touch list with no touches).
    Ignore,
}

/// Horizontal extent of the hit region in the same space as pointer X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub width: f64,
}

impl SurfaceRect {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    #[must_use]
    pub fn resolve(self, input: &PointerInput) -> PointerAction {
        let pointer_x = match input {
            PointerInput::MouseMove { client_x } => *client_x,
            PointerInput::TouchStart { touches } | PointerInput::TouchMove { touches } => {
                match touches.first() {
                    Some(touch) => touch.screen_x,
                    None => return PointerAction::Ignore,
                }
            }
            PointerInput::MouseLeave | PointerInput::TouchEnd => return PointerAction::Clear,
        };
        PointerAction::Track {
            fractional_x: pointer_fraction(pointer_x, self.left, self.width),
        }
    }
}

/// `clamp((pointer_x - surface_left) / surface_width, 0, 1)`.
///
/// Degenerate surfaces and non-finite pointers resolve to the left edge.
#[must_use]
pub fn pointer_fraction(pointer_x: f64, surface_left: f64, surface_width: f64) -> f64 {
    if !surface_width.is_finite() || surface_width <= 0.0 {
        return 0.0;
    }
    let fraction = (pointer_x - surface_left) / surface_width;
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}

/// Nearest record for a horizontal fraction: `min(floor(x * n), n - 1)`.
///
/// This proportional policy is the only one used for hit-testing; it matches
/// the evenly spaced x scale, so record `i` owns `[i / n, (i + 1) / n)`.
#[must_use]
pub fn resolve_index(fractional_x: f64, record_count: usize) -> Option<usize> {
    if record_count == 0 {
        return None;
    }
    let fraction = if fractional_x.is_finite() {
        fractional_x.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let index = (fraction * record_count as f64).floor() as usize;
    Some(index.min(record_count - 1))
}

/// Whether a tooltip anchored at the pointer would overflow the chart's
/// right edge: `x * chart_width + tooltip_width > chart_width`.
#[must_use]
pub fn should_flip(fractional_x: f64, chart_width: f64, tooltip_width: f64) -> bool {
    fractional_x * chart_width + tooltip_width > chart_width
}

/// Record picked by the hit test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPoint {
    pub index: usize,
    pub point: TimeSeriesPoint,
}

/// Per-chart tooltip state, changed only through `show_at`,
/// `record_measurement` and `hide`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    visible: bool,
    fractional_x: f64,
    resolved: Option<ResolvedPoint>,
    flipped: bool,
    measured_width_px: Option<f64>,
}

impl TooltipState {
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn fractional_x(&self) -> f64 {
        self.fractional_x
    }

    #[must_use]
    pub fn resolved(&self) -> Option<ResolvedPoint> {
        self.resolved
    }

    #[must_use]
    pub fn resolved_point(&self) -> Option<TimeSeriesPoint> {
        self.resolved.map(|resolved| resolved.point)
    }

    #[must_use]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn measured_width_px(&self) -> Option<f64> {
        self.measured_width_px
    }

    /// Shows or moves the tooltip.
    ///
    /// The flip decision reuses the last measured overlay width, so the very
    /// first display is never flipped until a measurement is recorded.
    /// Without a resolved record the tooltip is cleared instead.
    pub fn show_at(
        &mut self,
        fractional_x: f64,
        resolved: Option<ResolvedPoint>,
        chart_width_px: f64,
    ) {
        let Some(resolved) = resolved else {
            self.hide();
            return;
        };
        self.visible = true;
        self.fractional_x = fractional_x;
        self.resolved = Some(resolved);
        self.flipped = self
            .measured_width_px
            .is_some_and(|width| should_flip(fractional_x, chart_width_px, width));
    }

    /// Stores the rendered overlay width and re-evaluates the flip.
    ///
    /// Ignored while hidden; non-finite or negative widths are dropped.
    pub fn record_measurement(&mut self, tooltip_width_px: f64, chart_width_px: f64) {
        if !self.visible || !tooltip_width_px.is_finite() || tooltip_width_px < 0.0 {
            return;
        }
        self.measured_width_px = Some(tooltip_width_px);
        self.flipped = should_flip(self.fractional_x, chart_width_px, tooltip_width_px);
    }

    pub fn hide(&mut self) {
        *self = Self::default();
    }
}
