use super::*;
use crate::agents::Agent;
use crate::config::{Span, SpringFieldParams};
use crate::foundation::core::LayoutSize;
use crate::foundation::math::Rng64;

fn geometry(w: f64, h: f64) -> SurfaceGeometry {
    SurfaceGeometry::unscaled(LayoutSize::new(w, h))
}

fn all_systems(cfg: &EngineConfig, density: Density) -> Vec<Box<dyn ParticleSystem>> {
    SurfaceStyle::ALL
        .iter()
        .enumerate()
        .map(|(i, &style)| build_system(style, density, cfg, i as u64 + 1, None))
        .collect()
}

#[test]
fn factory_builds_requested_style() {
    let cfg = EngineConfig::default();
    for sys in all_systems(&cfg, Density::Light) {
        assert_eq!(sys.density(), Density::Light);
    }
    let styles: Vec<_> = all_systems(&cfg, Density::Normal)
        .iter()
        .map(|s| s.style())
        .collect();
    assert_eq!(styles, SurfaceStyle::ALL.to_vec());
}

#[test]
fn starlight_800_by_600_has_150_stars_inside_twinkle_envelope() {
    let cfg = EngineConfig::default();
    let mut sys = StarfieldSystem::new(&cfg.stars, Density::Normal, 42);
    sys.resize(geometry(800.0, 600.0), false);
    assert_eq!(sys.population(), 150);

    let mut out = DrawList::new();
    sys.animate(TimeStep::from_elapsed_ms(16.66), &mut out);
    for star in sys.field().stars() {
        let (lo, hi) = star.twinkle_envelope();
        assert!(star.opacity() >= lo - 1e-12 && star.opacity() <= hi + 1e-12);
    }
    assert!(!out.is_empty());
}

#[test]
fn population_formulas() {
    let cfg = EngineConfig::default();
    let b = LayoutSize::new(800.0, 600.0);
    assert_eq!(StarfieldSystem::population_for(&cfg.stars, b, Density::Light), 75);
    assert_eq!(CometSystem::population_for(&cfg.stars, b, Density::Normal), 114);
    assert_eq!(CometSystem::population_for(&cfg.stars, b, Density::Light), 62);
    assert_eq!(MoteSystem::population_for(&cfg.motes, b, Density::Normal), 40);
    assert_eq!(
        MoteSystem::population_for(&cfg.motes, LayoutSize::new(1920.0, 1080.0), Density::Normal),
        172
    );
    assert_eq!(MoteSystem::population_for(&cfg.motes, b, Density::Light), 16);
    assert_eq!(ShimmerSystem::population_for(&cfg.shimmer, b, Density::Normal), 32);
    assert_eq!(WaveSystem::population_for(&cfg.waves, Density::Normal), 5);
    assert_eq!(WaveSystem::population_for(&cfg.waves, Density::Light), 3);
    assert_eq!(
        StarfieldSystem::population_for(&cfg.stars, LayoutSize::new(0.0, 600.0), Density::Normal),
        0
    );
}

#[test]
fn layer_counts_favor_far_layers() {
    let counts = starfield::layer_counts(150, 3);
    assert_eq!(counts.iter().sum::<usize>(), 150);
    assert!(counts[0] > counts[1] && counts[1] > counts[2]);
    assert_eq!(starfield::layer_counts(7, 1), vec![7]);
    assert_eq!(starfield::layer_counts(0, 3), vec![0, 0, 0]);
}

#[test]
fn reduced_motion_always_yields_empty_population() {
    let cfg = EngineConfig::default();
    for mut sys in all_systems(&cfg, Density::Normal) {
        sys.resize(geometry(1024.0, 768.0), false);
        assert!(sys.population() > 0, "{}", sys.style());
        for _ in 0..3 {
            sys.resize(geometry(1024.0, 768.0), true);
            assert_eq!(sys.population(), 0, "{}", sys.style());
            let mut out = DrawList::new();
            sys.animate(TimeStep::NOMINAL, &mut out);
            assert!(out.is_empty(), "{}", sys.style());
        }
    }
}

#[test]
fn zero_size_surfaces_draw_nothing() {
    let cfg = EngineConfig::default();
    for mut sys in all_systems(&cfg, Density::Normal) {
        sys.resize(geometry(0.0, 0.0), false);
        let mut out = DrawList::new();
        for _ in 0..10 {
            sys.animate(TimeStep::NOMINAL, &mut out);
        }
        assert!(out.is_empty(), "{}", sys.style());
    }
}

#[test]
fn every_painted_opacity_is_within_unit_interval() {
    let cfg = EngineConfig::default();
    let mut rng = Rng64::new(0xA11CE);
    for seed in 0..6 {
        for (i, &style) in SurfaceStyle::ALL.iter().enumerate() {
            let density = if (seed + i) % 2 == 0 { Density::Normal } else { Density::Light };
            let mut sys = build_system(style, density, &cfg, seed as u64, None);
            sys.resize(geometry(rng.range(50.0, 900.0), rng.range(50.0, 700.0)), false);
            sys.set_pointer(Some(Point::new(rng.range(0.0, 900.0), rng.range(0.0, 700.0))));
            let mut out = DrawList::new();
            for _ in 0..60 {
                sys.animate(TimeStep::from_elapsed_ms(rng.range(-20.0, 250.0)), &mut out);
                for cmd in &out {
                    for a in cmd.alphas() {
                        assert!((0.0..=1.0).contains(&a), "{style}: {a}");
                    }
                }
            }
        }
    }
}

#[test]
fn same_seed_same_frames() {
    let cfg = EngineConfig::default();
    let mut a = build_system(SurfaceStyle::Motes, Density::Normal, &cfg, 9, None);
    let mut b = build_system(SurfaceStyle::Motes, Density::Normal, &cfg, 9, None);
    a.resize(geometry(400.0, 300.0), false);
    b.resize(geometry(400.0, 300.0), false);
    let (mut out_a, mut out_b) = (DrawList::new(), DrawList::new());
    for _ in 0..30 {
        a.animate(TimeStep::NOMINAL, &mut out_a);
        b.animate(TimeStep::NOMINAL, &mut out_b);
    }
    assert_eq!(out_a.commands(), out_b.commands());
}

#[test]
fn comet_pool_of_five_with_zero_interval() {
    let cfg = EngineConfig::default();
    let mut comets = cfg.comets.clone();
    comets.pool_size = 5;
    comets.first_interval_ms = Span(0.0, 0.0);
    comets.interval_ms = Span(0.0, 0.0);
    comets.max_life = Span(1_000.0, 1_000.0);

    let mut sys = CometSystem::new(&cfg.stars, &comets, Density::Normal, 3);
    sys.resize(geometry(800.0, 600.0), false);
    let mut out = DrawList::new();
    for _ in 0..6 {
        sys.animate(TimeStep::from_elapsed_ms(1.0), &mut out);
        assert!(sys.pool().active_count() <= 5);
    }
    assert_eq!(sys.pool().active_count(), 5);
    assert_eq!(sys.pool().stats().launched, 5);
    assert_eq!(sys.pool().stats().rejected, 1);
}

#[test]
fn comets_launch_after_first_interval() {
    let cfg = EngineConfig::default();
    let mut sys = CometSystem::new(&cfg.stars, &cfg.comets, Density::Normal, 17);
    sys.resize(geometry(800.0, 600.0), false);
    let wait = sys.next_launch_in_ms();
    assert!((4_000.0..12_000.0).contains(&wait));

    let mut out = DrawList::new();
    let mut elapsed = 0.0;
    while elapsed <= wait {
        sys.animate(TimeStep::from_elapsed_ms(50.0), &mut out);
        elapsed += 50.0;
    }
    assert_eq!(sys.pool().stats().launched, 1);
}

#[test]
fn spring_schedule_delays_then_cycles() {
    let hero = SpringFieldParams::hero();
    assert!(!spring::gathering_at(&hero, 0.0));
    assert!(!spring::gathering_at(&hero, 599.0));
    assert!(spring::gathering_at(&hero, 600.0));
    assert!(spring::gathering_at(&hero, 60_000.0));

    let services = SpringFieldParams::services();
    assert!(!spring::gathering_at(&services, 1_000.0));
    assert!(spring::gathering_at(&services, 1_200.0));
    assert!(spring::gathering_at(&services, 1_200.0 + 7_999.0));
    assert!(!spring::gathering_at(&services, 1_200.0 + 8_000.0));
    assert!(!spring::gathering_at(&services, 1_200.0 + 10_999.0));
    assert!(spring::gathering_at(&services, 1_200.0 + 11_000.0));
}

#[test]
fn spring_targets_are_subsampled_by_stride() {
    let cfg = EngineConfig::default();
    let targets: Vec<Point> = (0..1_000)
        .map(|i| Point::new((i % 100) as f64 * 5.0, (i / 100) as f64 * 5.0))
        .collect();
    let mut sys = SpringSystem::hero(&cfg.hero, Density::Normal, 5);
    sys.set_targets(Some(targets.as_slice()));
    sys.resize(geometry(600.0, 400.0), false);
    // ceil(1000 / 200) = 5
    assert_eq!(sys.population(), 200);
    assert_eq!(sys.particles()[1].home(), targets[5]);

    sys.set_targets(None);
    assert_eq!(*sys.layout(), HomeLayout::Scatter);
    sys.resize(geometry(600.0, 400.0), false);
    assert_eq!(sys.population(), 50);
}

#[test]
fn spring_links_are_drawn_before_particles() {
    let cfg = EngineConfig::default();
    let mut sys = SpringSystem::hero(&cfg.hero, Density::Normal, 8);
    let targets: Vec<Point> = (0..40).map(|i| Point::new(200.0 + i as f64, 200.0)).collect();
    sys.set_targets(Some(targets.as_slice()));
    sys.resize(geometry(400.0, 400.0), false);
    let mut out = DrawList::new();
    for _ in 0..400 {
        sys.animate(TimeStep::NOMINAL, &mut out);
    }
    let first_circle = out
        .iter()
        .position(|c| matches!(c, crate::draw::DrawCmd::Circle { .. }))
        .expect("particles are drawn");
    assert!(first_circle > 0);
    assert!(
        out.commands()[first_circle..]
            .iter()
            .all(|c| matches!(c, crate::draw::DrawCmd::Circle { .. }))
    );
}

#[test]
fn wave_light_density_keeps_three_dimmer_ribbons() {
    let cfg = EngineConfig::default();
    let mut normal = WaveSystem::new(&cfg.waves, Density::Normal);
    let mut light = WaveSystem::new(&cfg.waves, Density::Light);
    normal.resize(geometry(900.0, 300.0), false);
    light.resize(geometry(900.0, 300.0), false);
    assert_eq!(normal.population(), 5);
    assert_eq!(light.population(), 3);
    assert!(light.ribbons()[0].opacity() < normal.ribbons()[0].opacity());
}
