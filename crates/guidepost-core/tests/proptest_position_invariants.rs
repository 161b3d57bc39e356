//! Property-based invariant tests for the position engine.
//!
//! 1. The backdrop contains the target and is exactly `radius` larger per side
//! 2. The arrow is horizontally centred on the target
//! 3. `Top` messages end above the backdrop, `Bottom` messages start below it
//! 4. Pass 2 never depends on the scroll offset the target was measured at
//! 5. Scroll destinations differ between placements by a fixed amount

use guidepost_core::geometry::{Measurement, Point, Rect};
use guidepost_core::position::{
    compute_backdrop, compute_message_geometry, compute_scroll_target,
};
use guidepost_core::{Placement, TourConfig};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (
        -2_000i32..2_000,
        0i32..20_000,
        0u32..1_000,
        0u32..1_000,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
}

fn config_strategy() -> impl Strategy<Value = TourConfig> {
    (0u32..40, 0u32..40, 0u32..120, 0u32..300).prop_map(|(radius, aw, ah, offset)| {
        TourConfig::default()
            .radius(radius as f64)
            .arrow_width(aw as f64)
            .arrow_height(ah as f64)
            .scroll_bottom_offset(offset as f64)
    })
}

fn placement_strategy() -> impl Strategy<Value = Placement> {
    prop_oneof![Just(Placement::Top), Just(Placement::Bottom)]
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Backdrop
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn backdrop_contains_target(target in rect_strategy(), config in config_strategy()) {
        let backdrop = compute_backdrop(target, &config);
        prop_assert!(backdrop.contains_rect(&target));
        prop_assert_eq!(target.x - backdrop.x, config.radius);
        prop_assert_eq!(backdrop.right() - target.right(), config.radius);
        prop_assert_eq!(target.y - backdrop.y, config.radius);
        prop_assert_eq!(backdrop.bottom() - target.bottom(), config.radius);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Arrow centring
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arrow_is_centred_on_target(
        target in rect_strategy(),
        config in config_strategy(),
        placement in placement_strategy(),
        h in 0u32..600,
    ) {
        let geo = compute_message_geometry(target, h as f64, placement, &config);
        let arrow_center = geo.arrow_origin.x + geo.arrow_size.width / 2.0;
        prop_assert!((arrow_center - target.center_x()).abs() < 1e-9);
        prop_assert_eq!(geo.arrow_size.width, config.arrow_width);
        prop_assert_eq!(geo.arrow_size.height, config.arrow_height);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Message lands on the requested side
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn top_message_ends_above_backdrop(
        target in rect_strategy(),
        config in config_strategy(),
        h in 0u32..600,
    ) {
        let h = h as f64;
        let backdrop = compute_backdrop(target, &config);
        let geo = compute_message_geometry(target, h, Placement::Top, &config);
        let message_bottom = geo.message_y + h;
        prop_assert!((backdrop.y - message_bottom - config.arrow_height).abs() < 1e-9);
        prop_assert_eq!(geo.arrow_origin.y, h);
    }

    #[test]
    fn bottom_message_starts_below_backdrop(
        target in rect_strategy(),
        config in config_strategy(),
        h in 0u32..600,
    ) {
        let backdrop = compute_backdrop(target, &config);
        let geo = compute_message_geometry(target, h as f64, Placement::Bottom, &config);
        prop_assert!((geo.message_y - backdrop.bottom() - config.arrow_height).abs() < 1e-9);
        prop_assert_eq!(geo.arrow_origin.y, -config.arrow_height);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Scroll independence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn geometry_is_scroll_independent(
        target in rect_strategy(),
        scroll_a in 0u32..10_000,
        scroll_b in 0u32..10_000,
        placement in placement_strategy(),
        h in 0u32..400,
    ) {
        let config = TourConfig::default();
        let measure_at = |scroll: f64| {
            let viewport_rect = Rect::new(target.x, target.y - scroll, target.width, target.height);
            Measurement::new(viewport_rect, Point::new(0.0, scroll)).to_document()
        };
        let a = compute_message_geometry(measure_at(scroll_a as f64), h as f64, placement, &config);
        let b = compute_message_geometry(measure_at(scroll_b as f64), h as f64, placement, &config);
        prop_assert_eq!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Placement scroll delta
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn top_minus_bottom_scroll_is_fixed(
        target in rect_strategy(),
        config in config_strategy(),
        viewport in 1u32..3_000,
    ) {
        let viewport = viewport as f64;
        let top = compute_scroll_target(target, Placement::Top, &config, viewport);
        let bottom = compute_scroll_target(target, Placement::Bottom, &config, viewport);
        let expected = -viewport + target.height + 2.0 * (config.radius + config.scroll_bottom_offset);
        prop_assert!((top.y - bottom.y - expected).abs() < 1e-9);
        prop_assert_eq!(top.x, 0.0);
        prop_assert_eq!(bottom.x, 0.0);
    }
}
