use covid_chart::interaction::{
    PointerAction, PointerInput, SurfaceRect, pointer_fraction, resolve_index, should_flip,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn resolve_index_is_proportional(x in 0.0f64..=1.0, n in 1usize..10_000) {
        let expected = ((x * n as f64).floor() as usize).min(n - 1);
        prop_assert_eq!(resolve_index(x, n), Some(expected));
    }

    #[test]
    fn resolved_index_is_always_in_range(x in -5.0f64..5.0, n in 1usize..10_000) {
        let index = resolve_index(x, n).expect("non-empty series");
        prop_assert!(index < n);
    }

    #[test]
    fn flip_matches_overflow_rule(
        x in 0.0f64..=1.0,
        chart_width in 1.0f64..4_000.0,
        tooltip_width in 0.0f64..2_000.0
    ) {
        let overflows = x * chart_width + tooltip_width > chart_width;
        prop_assert_eq!(should_flip(x, chart_width, tooltip_width), overflows);
    }

    #[test]
    fn pointer_fraction_is_clamped(
        pointer in -10_000.0f64..10_000.0,
        left in -1_000.0f64..1_000.0,
        width in 0.001f64..4_000.0
    ) {
        let fraction = pointer_fraction(pointer, left, width);
        prop_assert!((0.0..=1.0).contains(&fraction));
    }
}

#[test]
fn empty_series_resolves_nothing() {
    assert_eq!(resolve_index(0.5, 0), None);
}

#[test]
fn right_edge_resolves_last_record() {
    assert_eq!(resolve_index(1.0, 10), Some(9));
    assert_eq!(resolve_index(0.0, 10), Some(0));
    assert_eq!(resolve_index(0.55, 10), Some(5));
}

#[test]
fn degenerate_surface_resolves_left_edge() {
    assert_eq!(pointer_fraction(50.0, 0.0, 0.0), 0.0);
    assert_eq!(pointer_fraction(f64::NAN, 0.0, 100.0), 0.0);
}

#[test]
fn touch_uses_first_contact_screen_x() {
    let surface = SurfaceRect::new(100.0, 200.0);
    assert_eq!(
        surface.resolve(&PointerInput::touch_start(150.0)),
        PointerAction::Track { fractional_x: 0.25 }
    );
    assert_eq!(
        surface.resolve(&PointerInput::mouse_move(400.0)),
        PointerAction::Track { fractional_x: 1.0 }
    );
    assert_eq!(
        surface.resolve(&PointerInput::MouseLeave),
        PointerAction::Clear
    );
}
