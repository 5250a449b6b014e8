use super::*;

#[test]
fn defaults_validate() {
    EngineConfig::default().validate().unwrap();
}

#[test]
fn style_tags_resolve_with_fallback() {
    assert_eq!(SurfaceStyle::from_tag("nebula"), SurfaceStyle::Nebula);
    assert_eq!(SurfaceStyle::from_tag("  Waves "), SurfaceStyle::Waves);
    assert_eq!(SurfaceStyle::from_tag("gold"), SurfaceStyle::Motes);
    assert_eq!(SurfaceStyle::from_tag("plasma"), SurfaceStyle::FALLBACK);
    assert_eq!(SurfaceStyle::from_tag(""), SurfaceStyle::FALLBACK);
    for style in SurfaceStyle::ALL {
        assert_eq!(SurfaceStyle::from_tag(style.tag()), style);
    }
}

#[test]
fn density_tags_resolve_with_fallback() {
    assert_eq!(Density::from_tag("light"), Density::Light);
    assert_eq!(Density::from_tag("LIGHT"), Density::Light);
    assert_eq!(Density::from_tag("heavy"), Density::Normal);
    assert_eq!(Density::Light.scale_count(150, 0.5), 75);
    assert_eq!(Density::Light.scale_count(41, 0.4), 16);
    assert_eq!(Density::Normal.scale_count(41, 0.4), 41);
}

#[test]
fn density_formula_clamps_and_scales() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.stars.starlight.count(800.0 * 600.0, Density::Normal), 150);
    assert_eq!(cfg.stars.starlight.count(800.0 * 600.0, Density::Light), 75);
    assert_eq!(cfg.stars.starlight.count(4000.0 * 4000.0, Density::Normal), 550);
    assert_eq!(cfg.motes.population.count(100.0 * 100.0, Density::Normal), 40);
    assert_eq!(cfg.motes.population.count(0.0, Density::Normal), 40);
    // floor(600000 / 12000)
    assert_eq!(cfg.motes.population.count(1000.0 * 600.0, Density::Normal), 50);
    assert_eq!(cfg.motes.population.count(3000.0 * 1000.0, Density::Normal), 200);
    assert_eq!(cfg.stars.nebula.count(f64::NAN, Density::Normal), 0);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg =
        EngineConfig::from_json_str(r#"{ "seed": 42, "comets": { "pool_size": 6 } }"#).unwrap();
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.comets.pool_size, 6);
    assert_eq!(cfg.comets.max_trail, CometParams::default().max_trail);
    assert_eq!(cfg.services, SpringFieldParams::services());
}

#[test]
fn json_round_trips_through_pretty_printer() {
    let cfg = EngineConfig::default();
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(EngineConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EngineConfig::from_json_str("{ seed: }").unwrap_err();
    assert!(matches!(err, AurumError::Serde(_)));
}

#[test]
fn validation_rejects_bad_values() {
    let mut cfg = EngineConfig::default();
    cfg.comets.pool_size = 0;
    assert!(matches!(cfg.validate(), Err(AurumError::Validation(_))));

    let mut cfg = EngineConfig::default();
    cfg.hero.damping = 1.2;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.motes.size = Span(2.0, 1.0);
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.max_pixel_ratio = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.shimmer.color = ColorRange::new([200, 100], [0, 1], [0, 1]);
    assert!(cfg.validate().is_err());
}
