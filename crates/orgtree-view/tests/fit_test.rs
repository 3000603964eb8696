use orgtree_view::geom::point;
use orgtree_view::{Bounds, FitTransform, NodeExtent, ViewConfig, Viewport, compute_fit_transform};

fn assert_finite(t: &FitTransform) {
    assert!(t.translate_x.is_finite(), "translate_x {t:?}");
    assert!(t.translate_y.is_finite(), "translate_y {t:?}");
    assert!(t.scale.is_finite() && t.scale > 0.0, "scale {t:?}");
}

#[test]
fn bounds_cover_whole_cards() {
    let extents = [
        NodeExtent::new(0.0, 0.0, 100.0, 50.0),
        NodeExtent::new(300.0, 200.0, 100.0, 50.0),
    ];
    let b = Bounds::from_extents(&extents).unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-50.0, -25.0, 350.0, 225.0));
    assert_eq!(b.width(), 400.0);
    assert_eq!(b.height(), 250.0);
    assert_eq!(b.center(), point(150.0, 100.0));
}

#[test]
fn fit_is_idempotent() {
    let cfg = ViewConfig::default();
    let extents = [
        NodeExtent::new(0.0, 0.0, 180.0, 72.0),
        NodeExtent::new(-400.0, 128.0, 180.0, 72.0),
        NodeExtent::new(400.0, 128.0, 180.0, 72.0),
    ];
    let viewport = Viewport::new(1024.0, 768.0);
    let a = compute_fit_transform(&extents, viewport, &cfg);
    let b = compute_fit_transform(&extents, viewport, &cfg);
    assert_eq!(a, b);
}

#[test]
fn fit_scales_down_wide_trees_and_centres_them() {
    let cfg = ViewConfig::default();
    let extents = [
        NodeExtent::new(0.0, 0.0, 100.0, 100.0),
        NodeExtent::new(1900.0, 0.0, 100.0, 100.0),
    ];
    let viewport = Viewport::new(1080.0, 800.0);
    let t = compute_fit_transform(&extents, viewport, &cfg);

    // Box is 2000 x 100: (1080 - 80) / 2000 = 0.5 wins over (800 - 80) / 100.
    assert!((t.scale - 0.5).abs() < 1e-12);

    let centre = t.apply(point(950.0, 0.0));
    assert!((centre.x - 540.0).abs() < 1e-9);
    assert!((centre.y - (400.0 - cfg.vertical_bias)).abs() < 1e-9);
}

#[test]
fn fit_scale_is_clamped_to_fit_range() {
    let cfg = ViewConfig::default();
    let viewport = Viewport::new(800.0, 600.0);

    let tiny = [NodeExtent::new(0.0, 0.0, 10.0, 10.0)];
    assert_eq!(compute_fit_transform(&tiny, viewport, &cfg).scale, cfg.fit_max_scale);

    let huge = [
        NodeExtent::new(0.0, 0.0, 100.0, 100.0),
        NodeExtent::new(1_000_000.0, 0.0, 100.0, 100.0),
    ];
    assert_eq!(compute_fit_transform(&huge, viewport, &cfg).scale, cfg.fit_min_scale);
}

#[test]
fn single_point_node_is_finite() {
    let cfg = ViewConfig::default();
    let point_node = [NodeExtent::new(12.0, -7.0, 0.0, 0.0)];
    let t = compute_fit_transform(&point_node, Viewport::new(640.0, 480.0), &cfg);
    assert_finite(&t);
    assert_eq!(t.scale, cfg.fit_max_scale);
    assert_eq!(t.translate_x, 320.0 - 12.0);
}

#[test]
fn degenerate_viewports_stay_finite() {
    let cfg = ViewConfig::default();
    let extents = [NodeExtent::new(0.0, 0.0, 100.0, 40.0)];
    for viewport in [
        Viewport::new(0.0, 0.0),
        Viewport::new(10.0, 10.0),
        Viewport::new(f64::NAN, 600.0),
        Viewport::new(-50.0, f64::INFINITY),
    ] {
        let t = compute_fit_transform(&extents, viewport, &cfg);
        assert_finite(&t);
        assert_eq!(t.scale, cfg.fit_min_scale);
    }
}

#[test]
fn non_finite_extents_are_ignored() {
    let cfg = ViewConfig::default();
    let viewport = Viewport::new(800.0, 600.0);
    let clean = [NodeExtent::new(0.0, 0.0, 100.0, 40.0)];
    let noisy = [
        NodeExtent::new(0.0, 0.0, 100.0, 40.0),
        NodeExtent::new(f64::NAN, 0.0, 100.0, 40.0),
    ];
    assert_eq!(
        compute_fit_transform(&clean, viewport, &cfg),
        compute_fit_transform(&noisy, viewport, &cfg)
    );
}

#[test]
fn empty_extents_centre_the_origin() {
    let cfg = ViewConfig::default();
    let t = compute_fit_transform(&[], Viewport::new(800.0, 600.0), &cfg);
    assert_eq!(
        t,
        FitTransform {
            translate_x: 400.0,
            translate_y: 300.0 - cfg.vertical_bias,
            scale: cfg.fit_max_scale,
        }
    );
}

#[test]
fn zoom_steps_are_relative_and_clamped() {
    let cfg = ViewConfig::default();
    let viewport = Viewport::new(800.0, 600.0);
    let start = FitTransform {
        translate_x: 100.0,
        translate_y: 50.0,
        scale: 1.0,
    };

    let zoomed = start.zoom_in(viewport, &cfg);
    assert!((zoomed.scale - 1.2).abs() < 1e-12);

    // The world point under the viewport centre does not move.
    let anchor = viewport.center();
    let before = start.invert(anchor);
    let after = zoomed.invert(anchor);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);

    let mut t = start;
    for _ in 0..50 {
        t = t.zoom_in(viewport, &cfg);
    }
    assert_eq!(t.scale, cfg.max_scale);
    for _ in 0..100 {
        t = t.zoom_out(viewport, &cfg);
    }
    assert_eq!(t.scale, cfg.min_scale);

    assert_eq!(start.zoom_by(0.0, viewport, &cfg), start);
    assert_eq!(start.zoom_by(f64::NAN, viewport, &cfg), start);
}

#[test]
fn pan_and_euclid_transform_agree_with_apply() {
    let t = FitTransform {
        translate_x: 10.0,
        translate_y: -20.0,
        scale: 0.5,
    }
    .pan_by(5.0, 5.0);
    assert_eq!((t.translate_x, t.translate_y), (15.0, -15.0));

    let p = point(40.0, 80.0);
    let via_apply = t.apply(p);
    let via_euclid = t.to_transform().transform_point(p);
    assert!((via_apply.x - via_euclid.x).abs() < 1e-12);
    assert!((via_apply.y - via_euclid.y).abs() < 1e-12);
    assert_eq!(t.pan_by(f64::NAN, 1.0), t);
}

#[test]
fn transform_serializes_camel_case() {
    let t = FitTransform::default();
    let value = serde_json::to_value(t).unwrap();
    assert_eq!(value["translateX"], 0.0);
    assert_eq!(value["scale"], 1.0);
}
