use approx::assert_relative_eq;
use chrono::NaiveDate;
use covid_chart::api::{Chart, ChartConfig};
use covid_chart::core::{ContainerSize, Metric, RegionSeries, TimeSeriesPoint};
use covid_chart::interaction::{PointerInput, SurfaceRect};
use covid_chart::render::{ChartLayerKind, ChartLayerStack, NullRenderer, SvgRenderer};

const CASES: [f64; 10] = [10.0, 20.0, 30.0, 40.0, 50.0, 100.0, 60.0, 70.0, 80.0, 90.0];

fn ten_day_series() -> RegionSeries {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).expect("start");
    let data = start
        .iter_days()
        .zip(CASES)
        .map(|(date, cases)| {
            TimeSeriesPoint::empty(date)
                .with_metric(Metric::Cases, cases)
                .with_metric(Metric::Deaths, cases / 50.0)
                .with_metric(Metric::PartiallyVaccinated, 30.0)
                .with_metric(Metric::FullyVaccinated, 20.0)
                .with_active_estimate(cases * 12.0)
        })
        .collect();
    RegionSeries::new("Missouri", data)
}

fn fixed_chart(config: ChartConfig) -> Chart<NullRenderer> {
    Chart::with_fixed_size(
        NullRenderer::default(),
        "Missouri",
        config,
        ContainerSize::square(400.0),
    )
    .expect("chart init")
}

#[test]
fn series_maximum_reaches_band_extreme() {
    let mut chart = fixed_chart(ChartConfig::default());
    chart.set_series(ten_day_series());

    let band = chart.band(Metric::Cases).expect("cases band").clone();
    let points = chart.curve_points(Metric::Cases).expect("curve");

    assert_eq!(points.len(), 10);
    assert_relative_eq!(points[5].0, 0.5);
    assert_relative_eq!(points[5].1, band.baseline + band.band_height);
    assert_relative_eq!(points[5].1, 0.05);
    assert!(points.iter().all(|(_, y)| *y >= 0.05 - 1e-12 && *y <= 0.5 + 1e-12));
    assert_eq!(chart.scale_range().max(Metric::Cases), Some(100.0));
}

#[test]
fn empty_series_draws_nothing_and_never_shows_tooltip() {
    let mut chart = fixed_chart(ChartConfig::default());
    chart.set_series(RegionSeries::empty("Nowhere"));

    assert!(chart.gridline_indices().is_empty());
    assert!(chart.curve_points(Metric::Cases).expect("curve").is_empty());

    chart.handle_pointer(&PointerInput::mouse_move(200.0), SurfaceRect::new(0.0, 400.0));
    assert!(!chart.tooltip_state().visible());

    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(frame.polylines().count(), 0);
    assert_eq!(frame.lines().count(), 0);
    assert_eq!(frame.rects().filter(|rect| rect.captures_pointer).count(), 1);

    chart.render().expect("render");
    assert!(!chart.tooltip_state().visible());
    assert_eq!(chart.renderer().frames_rendered, 1);
}

#[test]
fn layers_follow_canonical_order_with_hit_region_last() {
    let mut chart = fixed_chart(ChartConfig::default().with_show_key(true));
    chart.set_series(ten_day_series());
    chart.handle_pointer(&PointerInput::mouse_move(120.0), SurfaceRect::new(0.0, 400.0));

    let frame = chart.build_render_frame().expect("frame");
    frame.validate().expect("valid frame");

    let drawn: Vec<ChartLayerKind> = frame
        .layers
        .iter()
        .filter(|layer| !layer.is_empty())
        .map(|layer| layer.kind)
        .collect();
    assert_eq!(drawn, ChartLayerStack::canonical().layers);

    let curves = frame.layer(ChartLayerKind::Curves).expect("curves layer");
    let colors: Vec<String> = curves.polylines.iter().map(|p| p.color.to_hex()).collect();
    assert_eq!(colors, vec!["#ff0000", "#fce2a2", "#9ecae1", "#3182bd"]);

    let markers = frame.layer(ChartLayerKind::Markers).expect("markers layer");
    assert_eq!(markers.circles.len(), 4);

    let hit = frame.layer(ChartLayerKind::HitRegion).expect("hit layer");
    assert_eq!(hit.rects.len(), 1);
    assert!(hit.rects[0].captures_pointer);
    assert!(hit.rects[0].fill_color.is_transparent());
    assert_relative_eq!(hit.rects[0].height, 0.8);
}

#[test]
fn crosshair_sits_on_resolved_record() {
    let mut chart = fixed_chart(ChartConfig::default());
    chart.set_series(ten_day_series());
    chart.handle_pointer(&PointerInput::mouse_move(222.0), SurfaceRect::new(0.0, 400.0));

    let tooltip = chart.tooltip_state();
    assert!(tooltip.visible());
    assert_eq!(tooltip.resolved().map(|r| r.index), Some(5));
    assert_eq!(tooltip.resolved_point().map(|p| p.cases_avg), Some(100.0));

    let frame = chart.build_render_frame().expect("frame");
    let crosshair = frame.layer(ChartLayerKind::Crosshair).expect("crosshair");
    assert_eq!(crosshair.lines.len(), 1);
    assert_relative_eq!(crosshair.lines[0].x1, 0.5);

    let tooltip_layer = frame.layer(ChartLayerKind::Tooltip).expect("tooltip");
    assert_eq!(tooltip_layer.rects.len(), 1);
    assert_relative_eq!(tooltip_layer.rects[0].x, 222.0 / 400.0);
    assert!(
        tooltip_layer
            .texts
            .iter()
            .any(|text| text.text == "Cases (7-day avg): 100")
    );
}

#[test]
fn tooltip_flip_lags_one_measurement_behind() {
    let mut chart = fixed_chart(ChartConfig::default());
    chart.set_series(ten_day_series());
    let surface = SurfaceRect::new(0.0, 400.0);

    chart.handle_pointer(&PointerInput::mouse_move(360.0), surface);
    assert!(chart.tooltip_state().visible());
    assert!(!chart.tooltip_state().flipped());

    chart.render().expect("render");
    let measured = chart
        .tooltip_state()
        .measured_width_px()
        .expect("estimated width recorded");
    assert!(measured > 40.0);
    assert!(chart.tooltip_state().flipped());

    let frame = chart.build_render_frame().expect("flipped frame");
    let panel = frame.layer(ChartLayerKind::Tooltip).expect("tooltip").rects[0];
    assert_relative_eq!(panel.x + panel.width, 0.9, epsilon = 1e-12);
    assert!(panel.x < 0.9);

    chart.handle_pointer(&PointerInput::mouse_move(40.0), surface);
    assert!(!chart.tooltip_state().flipped());
    let frame = chart.build_render_frame().expect("unflipped frame");
    let panel = frame.layer(ChartLayerKind::Tooltip).expect("tooltip").rects[0];
    assert_relative_eq!(panel.x, 0.1, epsilon = 1e-12);

    chart.pointer_leave();
    assert_eq!(chart.tooltip_state(), Default::default());
}

#[test]
fn missing_metrics_sit_on_baseline_without_markers() {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).expect("start");
    let data = start
        .iter_days()
        .zip(CASES)
        .map(|(date, cases)| TimeSeriesPoint::empty(date).with_metric(Metric::Cases, cases))
        .collect();
    let mut chart = fixed_chart(ChartConfig::default());
    chart.set_series(RegionSeries::new("Sparse", data));
    chart.handle_pointer(&PointerInput::mouse_move(360.0), SurfaceRect::new(0.0, 400.0));
    chart.render().expect("render");

    let deaths = chart.curve_points(Metric::Deaths).expect("deaths curve");
    assert_eq!(deaths.len(), 10);
    assert!(deaths.iter().all(|(_, y)| *y == 0.5));

    let frame = chart.build_render_frame().expect("frame");
    frame.validate().expect("valid frame");
    let markers = frame.layer(ChartLayerKind::Markers).expect("markers layer");
    assert_eq!(markers.circles.len(), 1);
    assert_eq!(markers.circles[0].fill_color.to_hex(), "#fce2a2");

    let panel = frame.layer(ChartLayerKind::Tooltip).expect("tooltip").rects[0];
    assert!(chart.tooltip_state().flipped());
    assert_relative_eq!(panel.x + panel.width, 0.9, epsilon = 1e-12);
}

#[test]
fn host_measurement_drives_flip_when_estimation_is_off() {
    let mut chart = fixed_chart(ChartConfig::default().with_estimated_tooltip_width(false));
    chart.set_series(ten_day_series());
    chart.handle_pointer(&PointerInput::touch_move(300.0), SurfaceRect::new(0.0, 400.0));

    chart.render().expect("render");
    assert!(chart.tooltip_state().measured_width_px().is_none());

    chart.record_tooltip_width(120.0);
    assert!(chart.tooltip_state().flipped());
    chart.record_tooltip_width(50.0);
    assert!(!chart.tooltip_state().flipped());

    chart.handle_pointer(&PointerInput::TouchEnd, SurfaceRect::new(0.0, 400.0));
    assert!(!chart.tooltip_state().visible());
}

#[test]
fn replacing_series_recomputes_range_and_hides_tooltip() {
    let mut chart = fixed_chart(ChartConfig::default());
    chart.set_series(ten_day_series());
    chart.handle_pointer(&PointerInput::mouse_move(100.0), SurfaceRect::new(0.0, 400.0));
    assert!(chart.tooltip_state().visible());

    let date = NaiveDate::from_ymd_opt(2022, 1, 1).expect("date");
    chart.set_series(RegionSeries::new(
        "St. Louis",
        vec![TimeSeriesPoint::empty(date).with_metric(Metric::Cases, 7.0)],
    ));

    assert!(!chart.tooltip_state().visible());
    assert_eq!(chart.scale_range().max(Metric::Cases), Some(7.0));
    assert_eq!(chart.scale_range().max(Metric::Deaths), None);
}

#[test]
fn svg_document_contains_every_drawn_layer() {
    let mut chart = Chart::with_fixed_size(
        SvgRenderer::new(),
        "St. Louis <Area>",
        ChartConfig::default().with_show_key(true),
        ContainerSize::square(500.0),
    )
    .expect("chart init");
    chart.set_series(ten_day_series());
    chart.render().expect("render");

    let document = chart.renderer().document();
    assert!(document.starts_with("<svg"));
    assert!(document.contains(r#"viewBox="0 0 1 1""#));
    assert!(document.contains(r#"style="font-size:2em""#));
    assert!(document.contains(r#"data-layer="curves""#));
    assert!(document.contains(r#"data-layer="legend""#));
    assert!(document.contains(r#"data-hit-region="true""#));
    assert!(document.contains("St. Louis &lt;Area&gt;"));
    assert!(!document.contains(r#"data-layer="tooltip""#));
    assert_eq!(chart.renderer().last_stats().polylines_written, 4);
}

#[test]
fn invalid_fixed_size_is_rejected() {
    let result = Chart::with_fixed_size(
        NullRenderer::default(),
        "Broken",
        ChartConfig::default(),
        ContainerSize::new(0.0, 400.0),
    );
    assert!(result.is_err());
}
