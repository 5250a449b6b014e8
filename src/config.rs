//! Surface tags and the canonical tuning parameters for every system.
//!
//! All parameters deserialize from JSON with per-field defaults, so a config file only needs to
//! mention what it overrides.

use std::f64::consts::FRAC_PI_4;
use std::io::Read;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{AurumError, AurumResult};
use crate::foundation::math::Rng64;
use crate::foundation::time::{FRAME_CEILING_MS, NOMINAL_FRAME_MS};
use crate::palette::ColorRange;

/// Which system governs a surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceStyle {
    /// Layered twinkling starfield.
    #[default]
    Starlight,
    /// Starfield with occasional comets.
    Nebula,
    /// Rising gold dust.
    Motes,
    /// Near-static breathing gold points.
    Shimmer,
    /// Layered sinusoidal light ribbons.
    Waves,
    /// Interactive spring-particle field, bright preset.
    Hero,
    /// Spring-particle field, ghostly preset that periodically scatters.
    Services,
}

impl SurfaceStyle {
    /// Used for missing or unrecognized tags.
    pub const FALLBACK: Self = Self::Starlight;

    /// Every style, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Starlight,
        Self::Nebula,
        Self::Motes,
        Self::Shimmer,
        Self::Waves,
        Self::Hero,
        Self::Services,
    ];

    /// Resolve a container's style tag. Unknown tags fall back to [`SurfaceStyle::FALLBACK`].
    pub fn from_tag(tag: &str) -> Self {
        let norm = tag.trim().to_ascii_lowercase();
        match norm.as_str() {
            "starlight" | "stars" => Self::Starlight,
            "nebula" | "nebulae" | "comets" => Self::Nebula,
            "motes" | "dust" | "gold" => Self::Motes,
            "shimmer" => Self::Shimmer,
            "waves" | "wave" => Self::Waves,
            "hero" => Self::Hero,
            "services" => Self::Services,
            "" => Self::FALLBACK,
            other => {
                tracing::warn!(
                    tag = other,
                    fallback = Self::FALLBACK.tag(),
                    "unrecognized style tag"
                );
                Self::FALLBACK
            }
        }
    }

    /// Canonical tag string.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Starlight => "starlight",
            Self::Nebula => "nebula",
            Self::Motes => "motes",
            Self::Shimmer => "shimmer",
            Self::Waves => "waves",
            Self::Hero => "hero",
            Self::Services => "services",
        }
    }
}

impl std::fmt::Display for SurfaceStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Population and intensity scaling for a surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Normal,
    Light,
}

impl Density {
    /// Used for missing or unrecognized tags.
    pub const FALLBACK: Self = Self::Normal;

    /// Resolve a container's density tag. Unknown tags fall back to [`Density::Normal`].
    pub fn from_tag(tag: &str) -> Self {
        let norm = tag.trim().to_ascii_lowercase();
        match norm.as_str() {
            "normal" | "" => Self::Normal,
            "light" => Self::Light,
            other => {
                tracing::warn!(tag = other, "unrecognized density tag, using normal");
                Self::FALLBACK
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Light => "light",
        }
    }

    /// Multiply `count` by `light_factor` (floored) for light surfaces.
    pub fn scale_count(self, count: usize, light_factor: f64) -> usize {
        match self {
            Self::Normal => count,
            Self::Light => (count as f64 * light_factor).floor().max(0.0) as usize,
        }
    }
}

/// Closed interval `[min, max]` sampled uniformly. Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span(pub f64, pub f64);

impl Span {
    pub fn min(self) -> f64 {
        self.0
    }

    pub fn max(self) -> f64 {
        self.1
    }

    /// Uniform sample in `[min, max)`.
    pub fn sample(self, rng: &mut Rng64) -> f64 {
        rng.range(self.0, self.1)
    }

    fn validate(self, what: &str) -> AurumResult<()> {
        if !self.0.is_finite() || !self.1.is_finite() {
            return Err(AurumError::validation(format!("{what}: bounds must be finite")));
        }
        if self.0 > self.1 {
            return Err(AurumError::validation(format!("{what}: min must be <= max")));
        }
        Ok(())
    }
}

/// `count = clamp(floor(area / area_per_agent), min, max)`, then density scaling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DensityFormula {
    /// Square logical pixels per agent.
    pub area_per_agent: f64,
    /// Lower bound before density scaling.
    pub min_count: usize,
    /// Upper bound before density scaling.
    pub max_count: usize,
    /// Multiplier applied on light surfaces.
    pub light_factor: f64,
}

impl DensityFormula {
    /// Evaluate the formula for a surface area.
    pub fn count(&self, area: f64, density: Density) -> usize {
        let raw = if area.is_finite() && area > 0.0 {
            (area / self.area_per_agent).floor() as usize
        } else {
            0
        };
        let base = raw.min(self.max_count).max(self.min_count);
        density.scale_count(base, self.light_factor)
    }

    fn validate(&self, what: &str) -> AurumResult<()> {
        if !(self.area_per_agent.is_finite() && self.area_per_agent > 0.0) {
            return Err(AurumError::validation(format!("{what}: area_per_agent must be > 0")));
        }
        if self.min_count > self.max_count {
            return Err(AurumError::validation(format!("{what}: min_count must be <= max_count")));
        }
        unit_interval(self.light_factor, &format!("{what}: light_factor"))
    }
}

/// Rising gold dust.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MoteParams {
    pub population: DensityFormula,
    /// Upward speed, px per nominal frame.
    pub rise_speed: Span,
    /// Half-width of the horizontal drift speed.
    pub drift: f64,
    pub wobble_speed: Span,
    pub wobble_amp: Span,
    pub flicker_speed: Span,
    /// Opacity swing as a fraction of base opacity.
    pub flicker_depth: f64,
    pub size: Span,
    pub alpha: Span,
    pub size_light: Span,
    pub alpha_light: Span,
    /// Top fraction of the surface over which motes fade out.
    pub fade_zone: f64,
    /// Distance past an edge before a mote respawns.
    pub edge_margin: f64,
    /// Respawned motes start this far below the bottom edge.
    pub respawn_offset: f64,
    pub color: ColorRange,
}

impl Default for MoteParams {
    fn default() -> Self {
        Self {
            population: DensityFormula {
                area_per_agent: 12_000.0,
                min_count: 40,
                max_count: 200,
                light_factor: 0.4,
            },
            rise_speed: Span(0.08, 0.43),
            drift: 0.06,
            wobble_speed: Span(0.005, 0.023),
            wobble_amp: Span(0.15, 0.65),
            flicker_speed: Span(0.005, 0.025),
            flicker_depth: 0.3,
            size: Span(0.3, 1.8),
            alpha: Span(0.08, 0.48),
            size_light: Span(0.2, 1.0),
            alpha_light: Span(0.04, 0.22),
            fade_zone: 0.25,
            edge_margin: 8.0,
            respawn_offset: 5.0,
            color: ColorRange::new([175, 225], [130, 180], [15, 55]),
        }
    }
}

/// Twinkling stars, shared by the starlight and nebula surfaces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarParams {
    pub starlight: DensityFormula,
    pub nebula: DensityFormula,
    /// Depth layers; stars in layer 0 are farthest.
    pub layers: u32,
    /// Share of stars drawn from `small_size`.
    pub small_fraction: f64,
    pub small_size: Span,
    pub large_size: Span,
    pub base_alpha: Span,
    pub twinkle_speed: Span,
    pub twinkle_depth: Span,
    /// Drift speed of the nearest layer, px per nominal frame.
    pub drift_speed: f64,
    /// Drift heading in radians (0 points right, positive y points down).
    pub drift_heading: f64,
    pub drift_jitter: f64,
    /// Distance past an edge at which a star wraps to the opposite side.
    pub wrap_margin: f64,
    pub gold_fraction: f64,
    pub gold_color: ColorRange,
    pub white_range: [u8; 2],
    pub white_blue_lift: u8,
    pub glow_min_alpha: f64,
    pub glow_min_size: f64,
    /// A glowing star paints its halo only above this opacity.
    pub glow_visible_alpha: f64,
    /// Halo radius as a multiple of the star radius.
    pub glow_radius: f64,
    /// Halo centre opacity as a fraction of the star opacity.
    pub glow_strength: f64,
    /// Pointer offset per pixel of pointer displacement for the nearest layer.
    pub parallax: f64,
    /// Per-frame easing of the parallax offset toward its target.
    pub parallax_ease: f64,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            starlight: DensityFormula {
                area_per_agent: 3_200.0,
                min_count: 0,
                max_count: 550,
                light_factor: 0.5,
            },
            nebula: DensityFormula {
                area_per_agent: 4_200.0,
                min_count: 0,
                max_count: 420,
                light_factor: 0.55,
            },
            layers: 3,
            small_fraction: 0.85,
            small_size: Span(0.15, 0.85),
            large_size: Span(0.7, 2.0),
            base_alpha: Span(0.15, 0.80),
            twinkle_speed: Span(0.004, 0.022),
            twinkle_depth: Span(0.10, 0.55),
            drift_speed: 0.02,
            drift_heading: std::f64::consts::PI,
            drift_jitter: 0.15,
            wrap_margin: 2.0,
            gold_fraction: 0.15,
            gold_color: ColorRange::new([215, 255], [190, 230], [120, 170]),
            white_range: [195, 255],
            white_blue_lift: 25,
            glow_min_alpha: 0.60,
            glow_min_size: 0.80,
            glow_visible_alpha: 0.40,
            glow_radius: 3.0,
            glow_strength: 0.28,
            parallax: 0.02,
            parallax_ease: 0.06,
        }
    }
}

/// Pooled shooting stars on nebula surfaces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CometParams {
    pub pool_size: usize,
    /// Delay before the first launch attempt.
    pub first_interval_ms: Span,
    /// Delay between later launch attempts, re-rolled after each.
    pub interval_ms: Span,
    /// Spawn band as fractions of the surface width.
    pub spawn_x: Span,
    /// Spawn band as fractions of the surface height.
    pub spawn_y: Span,
    /// Mean heading in radians.
    pub angle: f64,
    /// Total width of the heading jitter.
    pub angle_jitter: f64,
    pub speed: Span,
    pub max_alpha: Span,
    /// Lifetime in nominal frames.
    pub max_life: Span,
    pub width: Span,
    pub max_trail: usize,
    /// Share of the lifetime spent fading in.
    pub attack: f64,
    /// Head glow radius as a multiple of the comet width.
    pub head_radius: f64,
    pub head_color: Rgb8,
    pub tint: ColorRange,
}

impl Default for CometParams {
    fn default() -> Self {
        Self {
            pool_size: 4,
            first_interval_ms: Span(4_000.0, 12_000.0),
            interval_ms: Span(4_000.0, 13_000.0),
            spawn_x: Span(0.1, 0.7),
            spawn_y: Span(0.0, 0.35),
            angle: FRAC_PI_4,
            angle_jitter: 0.6,
            speed: Span(6.0, 14.0),
            max_alpha: Span(0.55, 0.90),
            max_life: Span(55.0, 100.0),
            width: Span(1.0, 1.8),
            max_trail: 22,
            attack: 0.15,
            head_radius: 3.0,
            head_color: Rgb8::new(255, 255, 245),
            tint: ColorRange::new([215, 245], [195, 220], [150, 185]),
        }
    }
}

/// One sinusoidal ribbon.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RibbonParams {
    /// Radians per logical pixel.
    pub frequency: f64,
    /// Fraction of the surface height.
    pub amplitude: f64,
    /// Phase advance per nominal frame.
    pub speed: f64,
    pub phase: f64,
    /// Vertical centre as a fraction of the surface height.
    pub center: f64,
    pub color: Rgb8,
    pub core_alpha: f64,
    pub glow_alpha: f64,
}

/// Layered gold ribbons.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaveParams {
    pub ribbons: Vec<RibbonParams>,
    /// Ribbons kept on light surfaces.
    pub light_count: usize,
    /// Opacity multiplier on light surfaces.
    pub light_intensity: f64,
    /// Sampling step for surfaces up to `medium_width`.
    pub step_narrow: f64,
    /// Sampling step up to `wide_width`.
    pub step_medium: f64,
    /// Sampling step beyond `wide_width`.
    pub step_wide: f64,
    pub medium_width: f64,
    pub wide_width: f64,
    pub glow_width: f64,
    pub core_width: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        fn ribbon(
            frequency: f64,
            amplitude: f64,
            speed: f64,
            phase: f64,
            center: f64,
            color: Rgb8,
            core_alpha: f64,
            glow_alpha: f64,
        ) -> RibbonParams {
            RibbonParams {
                frequency,
                amplitude,
                speed,
                phase,
                center,
                color,
                core_alpha,
                glow_alpha,
            }
        }

        Self {
            ribbons: vec![
                ribbon(0.0040, 0.080, 0.012, 0.0, 0.50, Rgb8::new(212, 175, 55), 0.55, 0.10),
                ribbon(0.0065, 0.050, -0.018, 1.3, 0.46, Rgb8::new(235, 200, 110), 0.40, 0.08),
                ribbon(0.0028, 0.110, 0.008, 2.6, 0.55, Rgb8::new(190, 150, 60), 0.30, 0.07),
                ribbon(0.0090, 0.035, 0.025, 4.1, 0.52, Rgb8::new(245, 215, 140), 0.25, 0.05),
                ribbon(0.0050, 0.070, -0.010, 5.2, 0.58, Rgb8::new(200, 160, 80), 0.20, 0.05),
            ],
            light_count: 3,
            light_intensity: 0.7,
            step_narrow: 4.0,
            step_medium: 6.0,
            step_wide: 8.0,
            medium_width: 600.0,
            wide_width: 1200.0,
            glow_width: 6.0,
            core_width: 1.2,
        }
    }
}

/// Gather/scatter rhythm of a spring field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CycleParams {
    pub gather_ms: f64,
    pub scatter_ms: f64,
}

/// Spring-particle field tuning for one preset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringFieldParams {
    /// Population when homes are scattered; `max_count` also caps target layouts.
    pub population: DensityFormula,
    /// Particles start scattered and begin gathering after this delay.
    pub converge_delay_ms: f64,
    pub cycle: Option<CycleParams>,
    pub spring_far: f64,
    pub spring_rest: f64,
    /// Softer constant used after pointer repulsion until the particle resettles.
    pub spring_displaced: f64,
    pub far_distance: f64,
    pub settle_distance: f64,
    /// Velocity retained per nominal frame.
    pub damping: f64,
    pub repel_radius: f64,
    pub repel_strength: f64,
    pub orbit_radius: Span,
    pub orbit_speed: Span,
    pub breathe_speed: Span,
    /// Lowest breathing opacity as a fraction of the particle's target opacity.
    pub breathe_floor: f64,
    /// Half-width of each initial velocity component.
    pub initial_speed: f64,
    pub size: Span,
    pub alpha_target: Span,
    pub fade_in: f64,
    pub fade_out: f64,
    pub scatter_jitter: f64,
    pub scatter_damping: f64,
    /// Inset of scattered homes from each edge, as a fraction of the dimension.
    pub home_inset: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub color: ColorRange,
    /// Grid step in pixels when sampling a target mask.
    pub mask_step: u32,
}

impl SpringFieldParams {
    /// Bright interactive preset.
    pub fn hero() -> Self {
        Self {
            population: DensityFormula {
                area_per_agent: 9_000.0,
                min_count: 50,
                max_count: 200,
                light_factor: 0.6,
            },
            converge_delay_ms: 600.0,
            cycle: None,
            spring_far: 0.06,
            spring_rest: 0.04,
            spring_displaced: 0.015,
            far_distance: 60.0,
            settle_distance: 6.0,
            damping: 0.86,
            repel_radius: 110.0,
            repel_strength: 1.8,
            orbit_radius: Span(0.5, 2.0),
            orbit_speed: Span(0.008, 0.023),
            breathe_speed: Span(0.008, 0.023),
            breathe_floor: 0.65,
            initial_speed: 0.75,
            size: Span(0.4, 1.8),
            alpha_target: Span(0.35, 0.90),
            fade_in: 0.018,
            fade_out: 0.01,
            scatter_jitter: 0.06,
            scatter_damping: 0.97,
            home_inset: 0.08,
            link_distance: 90.0,
            link_alpha: 0.22,
            link_width: 0.6,
            color: ColorRange::new([170, 235], [130, 190], [8, 43]),
            mask_step: 5,
        }
    }

    /// Ghostly preset: fewer particles, slower gathering, periodic scattering.
    pub fn services() -> Self {
        Self {
            population: DensityFormula {
                area_per_agent: 9_000.0,
                min_count: 40,
                max_count: 120,
                light_factor: 0.6,
            },
            converge_delay_ms: 1_200.0,
            cycle: Some(CycleParams {
                gather_ms: 8_000.0,
                scatter_ms: 3_000.0,
            }),
            alpha_target: Span(0.20, 0.55),
            link_alpha: 0.14,
            mask_step: 6,
            ..Self::hero()
        }
    }
}

impl Default for SpringFieldParams {
    fn default() -> Self {
        Self::hero()
    }
}

/// Near-static breathing points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShimmerParams {
    pub population: DensityFormula,
    pub size: Span,
    pub max_alpha: Span,
    pub speed: Span,
    pub color: ColorRange,
}

impl Default for ShimmerParams {
    fn default() -> Self {
        Self {
            population: DensityFormula {
                area_per_agent: 15_000.0,
                min_count: 30,
                max_count: 120,
                light_factor: 0.5,
            },
            size: Span(0.1, 1.0),
            max_alpha: Span(0.02, 0.14),
            speed: Span(0.002, 0.010),
            color: ColorRange::new([180, 220], [140, 180], [20, 50]),
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root seed; each role derives its own stream from it.
    pub seed: u64,
    pub max_pixel_ratio: f64,
    pub nominal_frame_ms: f64,
    pub frame_ceiling_ms: f64,
    pub motes: MoteParams,
    pub stars: StarParams,
    pub comets: CometParams,
    pub waves: WaveParams,
    pub hero: SpringFieldParams,
    pub services: SpringFieldParams,
    pub shimmer: ShimmerParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x601D_5EED,
            max_pixel_ratio: 2.0,
            nominal_frame_ms: NOMINAL_FRAME_MS,
            frame_ceiling_ms: FRAME_CEILING_MS,
            motes: MoteParams::default(),
            stars: StarParams::default(),
            comets: CometParams::default(),
            waves: WaveParams::default(),
            hero: SpringFieldParams::hero(),
            services: SpringFieldParams::services(),
            shimmer: ShimmerParams::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> AurumResult<Self> {
        serde_json::from_str(s).map_err(|e| AurumError::serde(e.to_string()))
    }

    /// Parse a JSON config from a reader.
    pub fn from_json_reader(r: impl Read) -> AurumResult<Self> {
        serde_json::from_reader(r).map_err(|e| AurumError::serde(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> AurumResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AurumError::serde(e.to_string()))
    }

    /// Reject values the simulation cannot integrate sanely.
    pub fn validate(&self) -> AurumResult<()> {
        positive(self.max_pixel_ratio, "max_pixel_ratio")?;
        positive(self.nominal_frame_ms, "nominal_frame_ms")?;
        positive(self.frame_ceiling_ms, "frame_ceiling_ms")?;

        let m = &self.motes;
        m.population.validate("motes.population")?;
        for (span, what) in [
            (m.rise_speed, "motes.rise_speed"),
            (m.wobble_speed, "motes.wobble_speed"),
            (m.wobble_amp, "motes.wobble_amp"),
            (m.flicker_speed, "motes.flicker_speed"),
            (m.size, "motes.size"),
            (m.alpha, "motes.alpha"),
            (m.size_light, "motes.size_light"),
            (m.alpha_light, "motes.alpha_light"),
        ] {
            span.validate(what)?;
        }
        unit_interval(m.flicker_depth, "motes.flicker_depth")?;
        unit_interval(m.fade_zone, "motes.fade_zone")?;
        non_negative(m.edge_margin, "motes.edge_margin")?;
        color(&m.color, "motes.color")?;

        let s = &self.stars;
        s.starlight.validate("stars.starlight")?;
        s.nebula.validate("stars.nebula")?;
        if s.layers == 0 {
            return Err(AurumError::validation("stars.layers must be > 0"));
        }
        for (span, what) in [
            (s.small_size, "stars.small_size"),
            (s.large_size, "stars.large_size"),
            (s.base_alpha, "stars.base_alpha"),
            (s.twinkle_speed, "stars.twinkle_speed"),
            (s.twinkle_depth, "stars.twinkle_depth"),
        ] {
            span.validate(what)?;
        }
        unit_interval(s.small_fraction, "stars.small_fraction")?;
        unit_interval(s.gold_fraction, "stars.gold_fraction")?;
        unit_interval(s.twinkle_depth.max(), "stars.twinkle_depth")?;
        positive(s.wrap_margin, "stars.wrap_margin")?;
        non_negative(s.drift_speed, "stars.drift_speed")?;
        unit_interval(s.parallax_ease, "stars.parallax_ease")?;
        color(&s.gold_color, "stars.gold_color")?;

        let c = &self.comets;
        if c.pool_size == 0 {
            return Err(AurumError::validation("comets.pool_size must be > 0"));
        }
        if c.max_trail == 0 {
            return Err(AurumError::validation("comets.max_trail must be > 0"));
        }
        for (span, what) in [
            (c.first_interval_ms, "comets.first_interval_ms"),
            (c.interval_ms, "comets.interval_ms"),
            (c.spawn_x, "comets.spawn_x"),
            (c.spawn_y, "comets.spawn_y"),
            (c.speed, "comets.speed"),
            (c.max_alpha, "comets.max_alpha"),
            (c.max_life, "comets.max_life"),
            (c.width, "comets.width"),
        ] {
            span.validate(what)?;
        }
        if c.interval_ms.min() < 0.0 || c.first_interval_ms.min() < 0.0 {
            return Err(AurumError::validation("comets intervals must be >= 0"));
        }
        if c.max_life.min() <= 0.0 {
            return Err(AurumError::validation("comets.max_life must be > 0"));
        }
        if !(c.attack > 0.0 && c.attack < 1.0) {
            return Err(AurumError::validation("comets.attack must be in (0, 1)"));
        }
        color(&c.tint, "comets.tint")?;

        let w = &self.waves;
        for (i, r) in w.ribbons.iter().enumerate() {
            if ![r.frequency, r.amplitude, r.speed, r.phase, r.center]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(AurumError::validation(format!("waves.ribbons[{i}] must be finite")));
            }
            unit_interval(r.core_alpha, &format!("waves.ribbons[{i}].core_alpha"))?;
            unit_interval(r.glow_alpha, &format!("waves.ribbons[{i}].glow_alpha"))?;
        }
        positive(w.step_narrow, "waves.step_narrow")?;
        positive(w.step_medium, "waves.step_medium")?;
        positive(w.step_wide, "waves.step_wide")?;
        unit_interval(w.light_intensity, "waves.light_intensity")?;

        for (p, what) in [(&self.hero, "hero"), (&self.services, "services")] {
            p.population.validate(&format!("{what}.population"))?;
            if !(p.damping > 0.0 && p.damping <= 1.0) {
                return Err(AurumError::validation(format!("{what}.damping must be in (0, 1]")));
            }
            if !(p.scatter_damping > 0.0 && p.scatter_damping <= 1.0) {
                return Err(AurumError::validation(format!(
                    "{what}.scatter_damping must be in (0, 1]"
                )));
            }
            for (v, field) in [
                (p.spring_far, "spring_far"),
                (p.spring_rest, "spring_rest"),
                (p.spring_displaced, "spring_displaced"),
                (p.converge_delay_ms, "converge_delay_ms"),
                (p.link_distance, "link_distance"),
                (p.repel_strength, "repel_strength"),
            ] {
                non_negative(v, &format!("{what}.{field}"))?;
            }
            positive(p.repel_radius, &format!("{what}.repel_radius"))?;
            if p.mask_step == 0 {
                return Err(AurumError::validation(format!("{what}.mask_step must be > 0")));
            }
            unit_interval(p.breathe_floor, &format!("{what}.breathe_floor"))?;
            unit_interval(p.link_alpha, &format!("{what}.link_alpha"))?;
            if let Some(cycle) = p.cycle {
                positive(cycle.gather_ms + cycle.scatter_ms, &format!("{what}.cycle"))?;
                non_negative(cycle.gather_ms, &format!("{what}.cycle.gather_ms"))?;
                non_negative(cycle.scatter_ms, &format!("{what}.cycle.scatter_ms"))?;
            }
            for (span, field) in [
                (p.orbit_radius, "orbit_radius"),
                (p.orbit_speed, "orbit_speed"),
                (p.breathe_speed, "breathe_speed"),
                (p.size, "size"),
                (p.alpha_target, "alpha_target"),
            ] {
                span.validate(&format!("{what}.{field}"))?;
            }
            color(&p.color, &format!("{what}.color"))?;
        }

        let sh = &self.shimmer;
        sh.population.validate("shimmer.population")?;
        sh.size.validate("shimmer.size")?;
        sh.max_alpha.validate("shimmer.max_alpha")?;
        sh.speed.validate("shimmer.speed")?;
        color(&sh.color, "shimmer.color")?;

        Ok(())
    }
}

fn positive(v: f64, what: &str) -> AurumResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(AurumError::validation(format!("{what} must be finite and > 0")))
    }
}

fn non_negative(v: f64, what: &str) -> AurumResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(AurumError::validation(format!("{what} must be finite and >= 0")))
    }
}

fn unit_interval(v: f64, what: &str) -> AurumResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(AurumError::validation(format!("{what} must be within [0, 1]")))
    }
}

fn color(range: &ColorRange, what: &str) -> AurumResult<()> {
    if range.is_ordered() {
        Ok(())
    } else {
        Err(AurumError::validation(format!("{what}: channel ranges must be ordered")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
