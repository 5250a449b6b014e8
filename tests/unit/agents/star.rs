use super::*;
use crate::config::Density;

fn tick(
    params: &StarParams,
    bounds: LayoutSize,
    scale: f64,
    pointer: Option<Point>,
) -> Tick<'_, StarParams> {
    Tick {
        scale,
        bounds,
        density: Density::Normal,
        params,
        pointer,
        gathering: false,
    }
}

#[test]
fn layer_fraction_spans_unit_interval() {
    assert_eq!(layer_fraction(0, 3), 0.0);
    assert_eq!(layer_fraction(1, 3), 0.5);
    assert_eq!(layer_fraction(2, 3), 1.0);
    assert_eq!(layer_fraction(0, 1), 1.0);
    assert_eq!(layer_fraction(9, 3), 1.0);
}

#[test]
fn stars_never_leave_the_wrap_margin() {
    let mut params = StarParams::default();
    params.drift_speed = 7.5;
    let bounds = LayoutSize::new(320.0, 180.0);
    let eps = params.wrap_margin;
    for seed in 0..25 {
        let mut rng = Rng64::new(seed);
        let mut star = Star::spawn(&params, bounds, (seed % 3) as u32, 3, &mut rng);
        for i in 0..400 {
            let scale = 0.25 + (i % 7) as f64;
            let t = tick(&params, bounds, scale, None);
            star.update(&t);
            let p = star.position();
            assert!(p.x >= -eps && p.x <= bounds.width + eps, "x={} seed={seed}", p.x);
            assert!(p.y >= -eps && p.y <= bounds.height + eps, "y={} seed={seed}", p.y);
        }
    }
}

#[test]
fn opacity_stays_inside_twinkle_envelope() {
    let params = StarParams::default();
    let bounds = LayoutSize::new(800.0, 600.0);
    let mut rng = Rng64::new(77);
    let mut stars: Vec<Star> = (0..200)
        .map(|i| Star::spawn(&params, bounds, i % 3, 3, &mut rng))
        .collect();
    let t = tick(&params, bounds, 1.0, None);
    for _ in 0..50 {
        for star in &mut stars {
            star.update(&t);
            let (lo, hi) = star.twinkle_envelope();
            let a = star.opacity();
            assert!(a >= lo - 1e-12 && a <= hi + 1e-12);
            assert!((0.0..=1.0).contains(&a));
        }
    }
}

#[test]
fn drift_is_time_scale_independent() {
    let params = StarParams::default();
    let bounds = LayoutSize::new(5_000.0, 5_000.0);
    let mut rng = Rng64::new(5);
    let original = Star::spawn(&params, bounds, 2, 3, &mut rng);

    let mut a = original.clone();
    let mut b = original.clone();
    let t = tick(&params, bounds, 1.5, None);
    a.update(&t);
    a.update(&t);
    let t = tick(&params, bounds, 3.0, None);
    b.update(&t);

    assert!((a.position() - b.position()).hypot() < 1e-9);
    assert!((a.opacity() - b.opacity()).abs() < 1e-9);
}

#[test]
fn nearer_layers_drift_faster_on_average() {
    let params = StarParams::default();
    let bounds = LayoutSize::new(10_000.0, 10_000.0);
    let mut rng = Rng64::new(9);
    let mean_speed = |layer: u32, rng: &mut Rng64| {
        (0..200)
            .map(|_| Star::spawn(&params, bounds, layer, 3, rng).velocity.hypot())
            .sum::<f64>()
            / 200.0
    };
    let far = mean_speed(0, &mut rng);
    let near = mean_speed(2, &mut rng);
    assert!(near > far * 2.0);
}

#[test]
fn parallax_follows_pointer_and_relaxes() {
    let params = StarParams::default();
    let bounds = LayoutSize::new(400.0, 400.0);
    let mut rng = Rng64::new(3);
    let mut star = Star::spawn(&params, bounds, 2, 3, &mut rng);
    let pointer = Some(Point::new(400.0, 200.0));
    for _ in 0..400 {
        let t = tick(&params, bounds, 1.0, pointer);
        star.update(&t);
    }
    let target = -200.0 * params.parallax;
    assert!((star.parallax_offset().x - target).abs() < 1e-3);
    assert!(star.parallax_offset().y.abs() < 1e-9);

    for _ in 0..600 {
        let t = tick(&params, bounds, 1.0, None);
        star.update(&t);
    }
    assert!(star.parallax_offset().hypot() < 1e-6);
}

#[test]
fn far_layer_ignores_pointer() {
    let params = StarParams::default();
    let bounds = LayoutSize::new(400.0, 400.0);
    let mut rng = Rng64::new(3);
    let mut star = Star::spawn(&params, bounds, 0, 3, &mut rng);
    let t = tick(&params, bounds, 1.0, Some(Point::ZERO));
    star.update(&t);
    assert_eq!(star.parallax_offset(), Vec2::ZERO);
}

#[test]
fn glowing_stars_emit_a_halo_when_bright() {
    let params = StarParams::default();
    let bounds = LayoutSize::new(800.0, 600.0);
    let mut rng = Rng64::new(21);
    let star = (0..5_000)
        .map(|_| Star::spawn(&params, bounds, 2, 3, &mut rng))
        .find(|s| s.has_glow() && s.opacity() > params.glow_visible_alpha)
        .expect("a bright glowing star");
    let mut out = DrawList::new();
    star.draw(&params, &mut out);
    assert_eq!(out.len(), 2);
    assert!(matches!(out.commands()[1], crate::draw::DrawCmd::RadialGlow { .. }));
}
