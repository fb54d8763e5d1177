use tracing::debug;

use crate::core::ContainerSize;
use crate::error::ChartResult;
use crate::layout::ResizeHub;
use crate::provider::{DataSet, RegionLevel};
use crate::render::Renderer;

use super::{Chart, ChartConfig};

/// Panels of one region level under a common heading.
pub struct DashboardSection<R: Renderer> {
    pub level: RegionLevel,
    pub title: &'static str,
    pub panels: Vec<Chart<R>>,
}

impl<R: Renderer> DashboardSection<R> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// One chart panel per region, grouped into country, state and county
/// sections in that order.
pub struct Dashboard<R: Renderer> {
    sections: Vec<DashboardSection<R>>,
}

impl<R: Renderer> Dashboard<R> {
    /// Builds every panel at a fixed size.
    pub fn with_fixed_size<F>(
        data_set: &DataSet,
        config: &ChartConfig,
        size: ContainerSize,
        make_renderer: F,
    ) -> ChartResult<Self>
    where
        F: FnMut() -> R,
    {
        Self::build(data_set, make_renderer, |renderer, name| {
            Chart::with_fixed_size(renderer, name, config.clone(), size)
        })
    }

    /// Builds every panel responsive to `hub`; each panel owns one listener.
    pub fn mount<F>(
        data_set: &DataSet,
        config: &ChartConfig,
        hub: &ResizeHub,
        make_renderer: F,
    ) -> ChartResult<Self>
    where
        F: FnMut() -> R,
    {
        Self::build(data_set, make_renderer, |renderer, name| {
            Chart::mount(renderer, name, config.clone(), hub)
        })
    }

    fn build<F, C>(data_set: &DataSet, mut make_renderer: F, mut create: C) -> ChartResult<Self>
    where
        F: FnMut() -> R,
        C: FnMut(R, &str) -> ChartResult<Chart<R>>,
    {
        let mut sections = Vec::with_capacity(RegionLevel::ALL.len());
        for level in RegionLevel::ALL {
            let mut panels = Vec::new();
            for region in data_set.regions(level) {
                let mut chart = create(make_renderer(), &region.name)?;
                chart.set_series(region.clone());
                panels.push(chart);
            }
            debug!(level = ?level, panels = panels.len(), "dashboard section built");
            sections.push(DashboardSection {
                level,
                title: level.section_title(),
                panels,
            });
        }
        Ok(Self { sections })
    }

    #[must_use]
    pub fn sections(&self) -> &[DashboardSection<R>] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, level: RegionLevel) -> Option<&DashboardSection<R>> {
        self.sections.iter().find(|section| section.level == level)
    }

    pub fn section_mut(&mut self, level: RegionLevel) -> Option<&mut DashboardSection<R>> {
        self.sections
            .iter_mut()
            .find(|section| section.level == level)
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.sections.iter().map(|section| section.panels.len()).sum()
    }

    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut Chart<R>> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.panels.iter_mut())
    }

    /// Shows or hides the key on every panel.
    pub fn set_show_key(&mut self, show_key: bool) {
        for chart in self.panels_mut() {
            chart.set_show_key(show_key);
        }
    }

    /// Renders every panel, stopping at the first failure.
    pub fn render_all(&mut self) -> ChartResult<()> {
        for chart in self.panels_mut() {
            chart.render()?;
        }
        Ok(())
    }
}
