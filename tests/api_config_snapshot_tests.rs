use chrono::NaiveDate;
use covid_chart::api::{Chart, ChartConfig, ChartSnapshot, Dashboard};
use covid_chart::core::{
    BandNormalization, ContainerSize, Metric, MetricBand, RegionSeries, TimeSeriesPoint,
};
use covid_chart::interaction::{PointerInput, SurfaceRect};
use covid_chart::layout::ResizeHub;
use covid_chart::provider::{DataSet, RegionLevel};
use covid_chart::render::{Color, NullRenderer};

fn daily(name: &str, days: usize) -> RegionSeries {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).expect("start");
    let data = start
        .iter_days()
        .take(days)
        .enumerate()
        .map(|(i, date)| TimeSeriesPoint::empty(date).with_metric(Metric::Cases, i as f64))
        .collect();
    RegionSeries::new(name, data)
}

#[test]
fn partial_config_json_uses_defaults() {
    let config = ChartConfig::from_json_str(r#"{"show_key": true, "gridline_thinning": 1}"#)
        .expect("config");
    assert!(config.show_key);
    assert_eq!(config.gridline_thinning, 1);
    assert_eq!(config.bands, ChartConfig::default().bands);

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("restore");
    assert!(restored.show_key);
    assert_eq!(restored.gridline_thinning, 1);
    assert_eq!(restored.bands.len(), 4);
    assert_eq!(restored.bands[1].color.to_hex(), "#fce2a2");
}

#[test]
fn band_outside_unit_range_is_rejected() {
    let band = MetricBand::new(
        Metric::Cases,
        0.2,
        -0.5,
        BandNormalization::SeriesMax,
        Color::rgb(1.0, 1.0, 1.0),
        "Cases",
    );
    let config = ChartConfig::default().with_bands(vec![band]);
    assert!(config.validate().is_err());
    assert!(
        Chart::with_fixed_size(
            NullRenderer::default(),
            "x",
            config,
            ContainerSize::square(100.0)
        )
        .is_err()
    );
}

#[test]
fn snapshot_contract_round_trips() {
    let mut chart = Chart::with_fixed_size(
        NullRenderer::default(),
        "United States",
        ChartConfig::default(),
        ContainerSize::square(400.0),
    )
    .expect("chart");
    chart.set_series(daily("US", 120));
    chart.handle_pointer(&PointerInput::mouse_move(100.0), SurfaceRect::new(0.0, 400.0));

    let snapshot = chart.snapshot();
    assert_eq!(snapshot.point_count, 120);
    assert_eq!(snapshot.gridline_indices, vec![0, 90]);
    assert_eq!(snapshot.tooltip.resolved().map(|r| r.index), Some(30));
    assert_eq!(snapshot.scale_range.max(Metric::Cases), Some(119.0));

    let json = snapshot.to_json_contract_v1_pretty().expect("contract");
    assert!(json.contains("\"schema_version\": 1"));
    let restored = ChartSnapshot::from_json_compat_str(&json).expect("restore");
    assert_eq!(restored.title, "United States");
    assert_eq!(restored.gridline_indices, snapshot.gridline_indices);
    assert_eq!(restored.layout, snapshot.layout);
}

#[test]
fn dashboard_builds_one_panel_per_region() {
    let data_set = DataSet {
        countries: vec![daily("US", 40)],
        states: vec![daily("Missouri", 40)],
        counties: vec![daily("St. Louis", 40), daily("St. Charles", 40)],
    };
    let hub = ResizeHub::new(ContainerSize::square(300.0));
    let mut dashboard = Dashboard::mount(
        &data_set,
        &ChartConfig::default(),
        &hub,
        NullRenderer::default,
    )
    .expect("dashboard");

    assert_eq!(dashboard.panel_count(), 4);
    assert_eq!(hub.listener_count(), 4);
    let counties = dashboard.section(RegionLevel::County).expect("county section");
    assert_eq!(counties.title, "St. Louis Area");
    assert_eq!(counties.panels[1].series().name, "St. Charles");

    dashboard.render_all().expect("render");
    for section in dashboard.sections() {
        for panel in &section.panels {
            assert_eq!(panel.renderer().frames_rendered, 1);
        }
    }

    drop(dashboard);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn empty_data_set_builds_empty_sections() {
    let dashboard: Dashboard<NullRenderer> = Dashboard::with_fixed_size(
        &DataSet::empty(),
        &ChartConfig::default(),
        ContainerSize::square(300.0),
        NullRenderer::default,
    )
    .expect("dashboard");
    assert_eq!(dashboard.panel_count(), 0);
    assert_eq!(dashboard.sections().len(), 3);
    assert!(dashboard.sections().iter().all(|section| section.is_empty()));
}
