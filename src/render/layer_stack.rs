use serde::{Deserialize, Serialize};

/// Drawing layers of one chart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartLayerKind {
    Title,
    Gridlines,
    Curves,
    Crosshair,
    Markers,
    Tooltip,
    Legend,
    /// Transparent event-capture surface; last so it sits above every curve.
    HitRegion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLayerStack {
    pub layers: Vec<ChartLayerKind>,
}

impl ChartLayerStack {
    /// Back-to-front order used by every chart panel.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                ChartLayerKind::Title,
                ChartLayerKind::Gridlines,
                ChartLayerKind::Curves,
                ChartLayerKind::Crosshair,
                ChartLayerKind::Markers,
                ChartLayerKind::Tooltip,
                ChartLayerKind::Legend,
                ChartLayerKind::HitRegion,
            ],
        }
    }

    #[must_use]
    pub fn position(&self, kind: ChartLayerKind) -> Option<usize> {
        self.layers.iter().position(|layer| *layer == kind)
    }
}
