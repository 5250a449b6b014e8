use super::*;
use crate::config::Density;

fn tick(params: &CometParams, scale: f64) -> Tick<'_, CometParams> {
    Tick {
        scale,
        bounds: LayoutSize::new(800.0, 600.0),
        density: Density::Normal,
        params,
        pointer: None,
        gathering: false,
    }
}

#[test]
fn pool_of_five_rejects_sixth_launch() {
    let params = CometParams::default();
    let bounds = LayoutSize::new(800.0, 600.0);
    let mut rng = Rng64::new(1);
    let mut pool = CometPool::with_capacity(&params, 5);

    for _ in 0..5 {
        assert!(pool.try_spawn(&params, bounds, &mut rng));
    }
    assert!(!pool.try_spawn(&params, bounds, &mut rng));
    assert_eq!(pool.active_count(), 5);
    assert_eq!(
        pool.stats(),
        PoolStats {
            launched: 5,
            rejected: 1
        }
    );

    let t = tick(&params, 1.0);
    for _ in 0..200 {
        pool.update(&t);
    }
    assert_eq!(pool.active_count(), 0);
    let mut rng = Rng64::new(2);
    assert!(pool.try_spawn(&params, bounds, &mut rng));
}

#[test]
fn active_count_never_exceeds_capacity() {
    let params = CometParams::default();
    let bounds = LayoutSize::new(640.0, 480.0);
    for seed in 0..20 {
        let mut rng = Rng64::new(seed);
        let mut pool = CometPool::new(&params);
        for i in 0..500 {
            if i % 3 == 0 {
                pool.try_spawn(&params, bounds, &mut rng);
            }
            let t = tick(&params, 1.0 + (i % 4) as f64);
            pool.update(&t);
            assert!(pool.active_count() <= pool.capacity());
            for c in pool.members() {
                assert!((0.0..=1.0).contains(&c.opacity()));
                assert!(c.trail_len() <= params.max_trail);
            }
        }
    }
}

#[test]
fn envelope_rises_then_decays() {
    assert_eq!(Comet::envelope(0.0, 100.0, 0.15), 0.0);
    assert!((Comet::envelope(15.0, 100.0, 0.15) - 1.0).abs() < 1e-12);
    assert!((Comet::envelope(57.5, 100.0, 0.15) - 0.5).abs() < 1e-12);
    assert_eq!(Comet::envelope(100.0, 100.0, 0.15), 0.0);
    assert_eq!(Comet::envelope(140.0, 100.0, 0.15), 0.0);
}

#[test]
fn motion_is_time_scale_independent() {
    let params = CometParams::default();
    let bounds = LayoutSize::new(800.0, 600.0);
    let mut rng = Rng64::new(8);
    let mut a = Comet::idle(&params);
    a.launch(&params, bounds, &mut rng);
    let mut b = a.clone();

    let t = tick(&params, 2.0);
    a.update(&t);
    a.update(&t);
    let t = tick(&params, 4.0);
    b.update(&t);

    assert!((a.position() - b.position()).hypot() < 1e-9);
    assert!((a.opacity() - b.opacity()).abs() < 1e-9);
}

#[test]
fn trail_tapers_from_head_to_tail() {
    let params = CometParams::default();
    let bounds = LayoutSize::new(800.0, 600.0);
    let mut rng = Rng64::new(12);
    let mut comet = Comet::idle(&params);
    comet.launch(&params, bounds, &mut rng);
    let t = tick(&params, 1.0);
    for _ in 0..12 {
        comet.update(&t);
    }
    assert_eq!(comet.trail_len(), 12);

    let mut out = DrawList::new();
    comet.draw(&params, &mut out);
    let widths: Vec<f64> = out
        .iter()
        .filter_map(|c| match c {
            crate::draw::DrawCmd::Segment { width, .. } => Some(*width),
            _ => None,
        })
        .collect();
    assert!(!widths.is_empty());
    assert!(widths.windows(2).all(|w| w[0] >= w[1]));
    assert!(matches!(
        out.commands().last(),
        Some(crate::draw::DrawCmd::RadialGlow { .. })
    ));
}

#[test]
fn inactive_comets_draw_nothing() {
    let params = CometParams::default();
    let comet = Comet::idle(&params);
    let mut out = DrawList::new();
    comet.draw(&params, &mut out);
    assert!(out.is_empty());
}
