use super::*;
use crate::config::Density;

fn tick(
    params: &SpringFieldParams,
    pointer: Option<Point>,
    gathering: bool,
) -> Tick<'_, SpringFieldParams> {
    Tick {
        scale: 1.0,
        bounds: LayoutSize::new(600.0, 400.0),
        density: Density::Normal,
        params,
        pointer,
        gathering,
    }
}

fn particle(params: &SpringFieldParams, home: Point, seed: u64) -> SpringParticle {
    let mut rng = Rng64::new(seed);
    SpringParticle::new(home, params, LayoutSize::new(600.0, 400.0), &mut rng)
}

#[test]
fn gathering_particles_settle_near_home_and_fade_in() {
    let params = SpringFieldParams::hero();
    let home = Point::new(300.0, 200.0);
    for seed in 0..10 {
        let mut p = particle(&params, home, seed);
        assert_eq!(p.opacity(), 0.0);
        let t = tick(&params, None, true);
        for _ in 0..600 {
            p.update(&t);
            assert!((0.0..=1.0).contains(&p.opacity()));
        }
        assert!(p.is_settled(), "seed {seed}");
        assert!((p.position() - home).hypot() < params.orbit_radius.max() + params.settle_distance);
        assert!(p.opacity() > 0.0);
    }
}

#[test]
fn pointer_pushes_particles_away_and_softens_the_spring() {
    let params = SpringFieldParams::hero();
    let home = Point::new(300.0, 200.0);
    let mut p = particle(&params, home, 4);
    let settle = tick(&params, None, true);
    for _ in 0..600 {
        p.update(&settle);
    }
    let pointer = p.position() + Vec2::new(-10.0, 0.0);
    let before = p.position();
    let t = tick(&params, Some(pointer), true);
    for _ in 0..5 {
        p.update(&t);
    }
    assert!(p.is_displaced());
    assert!(!p.is_settled());
    assert!(p.position().x > before.x);
}

#[test]
fn pointer_outside_radius_is_ignored() {
    let params = SpringFieldParams::hero();
    let home = Point::new(100.0, 100.0);
    let mut a = particle(&params, home, 9);
    let mut b = a.clone();
    let far = Some(Point::new(100_000.0, 100_000.0));
    let ta = tick(&params, far, true);
    let tb = tick(&params, None, true);
    for _ in 0..50 {
        a.update(&ta);
        b.update(&tb);
    }
    assert_eq!(a.position(), b.position());
    assert!(!a.is_displaced());
}

#[test]
fn scattering_fades_out_and_unsettles() {
    let params = SpringFieldParams::services();
    let home = Point::new(300.0, 200.0);
    let mut p = particle(&params, home, 2);
    let gather = tick(&params, None, true);
    for _ in 0..800 {
        p.update(&gather);
    }
    assert!(p.is_settled());
    let scatter = tick(&params, None, false);
    for _ in 0..200 {
        p.update(&scatter);
    }
    assert!(!p.is_settled());
    assert_eq!(p.opacity(), 0.0);
}

#[test]
fn scatter_jitter_comes_from_the_particle_stream() {
    let params = SpringFieldParams::services();
    let home = Point::new(300.0, 200.0);
    let mut a = particle(&params, home, 6);
    let mut b = a.clone();
    let mut other = particle(&params, home, 7);
    let scatter = tick(&params, None, false);
    for _ in 0..20 {
        a.update(&scatter);
        b.update(&scatter);
        other.update(&scatter);
    }
    assert_eq!(a.position(), b.position());
    assert_eq!(a.velocity(), b.velocity());
    assert_ne!(a.velocity(), other.velocity());
}

#[test]
fn coincident_pointer_does_not_produce_nan() {
    let params = SpringFieldParams::hero();
    let mut p = particle(&params, Point::new(50.0, 50.0), 3);
    let at = p.position();
    let t = tick(&params, Some(at), true);
    p.update(&t);
    assert!(p.position().x.is_finite() && p.position().y.is_finite());
}
