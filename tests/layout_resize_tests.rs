use approx::assert_relative_eq;
use covid_chart::api::{Chart, ChartConfig};
use covid_chart::core::ContainerSize;
use covid_chart::layout::{LayoutObserver, LayoutPolicy, ResizeHub};
use covid_chart::render::NullRenderer;
use covid_chart::ChartError;

#[test]
fn resize_updates_font_scale_and_aspect_together() {
    let hub = ResizeHub::new(ContainerSize::square(400.0));
    let chart = Chart::mount(
        NullRenderer::default(),
        "United States",
        ChartConfig::default(),
        &hub,
    )
    .expect("mount");

    let before = chart.layout_metrics().expect("initial metrics");
    assert_relative_eq!(before.font_scale_em, 1.6);
    assert_relative_eq!(before.aspect_multiplier, 1.0);

    hub.dispatch(ContainerSize::new(800.0, 600.0));
    let after = chart.layout_metrics().expect("resized metrics");
    assert_relative_eq!(after.font_scale_em, 3.2);
    assert_relative_eq!(after.aspect_multiplier, 0.75);
    assert_eq!(after.container, ContainerSize::new(800.0, 600.0));

    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(frame.viewport.width, 800);
    assert_eq!(frame.viewport.height, 600);
}

#[test]
fn dropping_chart_removes_its_listener() {
    let hub = ResizeHub::new(ContainerSize::square(400.0));
    let first = Chart::mount(NullRenderer::default(), "A", ChartConfig::default(), &hub)
        .expect("first");
    let second = Chart::mount(NullRenderer::default(), "B", ChartConfig::default(), &hub)
        .expect("second");
    assert_eq!(hub.listener_count(), 2);

    drop(first);
    assert_eq!(hub.listener_count(), 1);
    hub.dispatch(ContainerSize::square(300.0));
    assert_relative_eq!(
        second.layout_metrics().expect("metrics").font_scale_em,
        1.2
    );

    drop(second);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn failed_mount_leaves_no_listener() {
    let hub = ResizeHub::new(ContainerSize::square(400.0));
    let config = ChartConfig::default().with_layout_policy(LayoutPolicy {
        font_scale_divisor: 0.0,
        key_fraction: 0.8,
    });
    let result = Chart::mount(NullRenderer::default(), "Broken", config, &hub);
    assert!(result.is_err());
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn toggling_key_recomputes_aspect() {
    let hub = ResizeHub::new(ContainerSize::square(500.0));
    let mut chart = Chart::mount(NullRenderer::default(), "A", ChartConfig::default(), &hub)
        .expect("mount");
    assert_relative_eq!(chart.layout_metrics().expect("m").aspect_multiplier, 1.0);

    chart.set_show_key(true);
    assert_relative_eq!(chart.layout_metrics().expect("m").aspect_multiplier, 0.8);
}

#[test]
fn unusable_size_is_ignored_until_a_valid_one_arrives() {
    let hub = ResizeHub::new(ContainerSize::square(400.0));
    let observer =
        LayoutObserver::mount(&hub, false, LayoutPolicy::default()).expect("observer");
    let chart = Chart::mount(NullRenderer::default(), "A", ChartConfig::default(), &hub)
        .expect("mount");

    hub.dispatch(ContainerSize::new(0.0, 0.0));
    assert!(observer.metrics().is_none());
    assert!(matches!(
        chart.build_render_frame(),
        Err(ChartError::InvalidViewport { .. })
    ));

    hub.dispatch(ContainerSize::square(250.0));
    assert_relative_eq!(observer.metrics().expect("metrics").font_scale_em, 1.0);
    assert!(chart.build_render_frame().is_ok());
    assert!(observer.is_subscribed());
}
