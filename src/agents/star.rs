use super::{Agent, Tick};
use crate::config::StarParams;
use crate::draw::{DrawList, GlowStop};
use crate::foundation::core::{LayoutSize, Point, Rgb8, Vec2};
use crate::foundation::math::{Rng64, clamp01, lerp, wrap_coord};
use crate::palette::sample_cool_white;

/// A twinkling point of light on one depth layer.
///
/// Stars drift slowly and wrap around every edge, keeping their identity; they are only re-rolled
/// when the whole population is rebuilt.
#[derive(Clone, Debug)]
pub struct Star {
    pos: Point,
    velocity: Vec2,
    /// Pointer parallax, applied at paint time only.
    offset: Vec2,
    layer_fraction: f64,
    size: f64,
    base_alpha: f64,
    alpha: f64,
    twinkle: f64,
    twinkle_speed: f64,
    twinkle_depth: f64,
    color: Rgb8,
    glow: bool,
}

impl Star {
    /// Spawn a star on `layer` of `layers` (layer 0 is farthest).
    pub fn spawn(
        params: &StarParams,
        bounds: LayoutSize,
        layer: u32,
        layers: u32,
        rng: &mut Rng64,
    ) -> Self {
        let f = layer_fraction(layer, layers);
        let pos = Point::new(rng.next_f64() * bounds.width, rng.next_f64() * bounds.height);

        let raw_size = if rng.chance(params.small_fraction) {
            params.small_size.sample(rng)
        } else {
            params.large_size.sample(rng)
        };
        let size = (raw_size * lerp(0.55, 1.0, f)).max(f64::EPSILON);
        let base_alpha = clamp01(params.base_alpha.sample(rng) * lerp(0.6, 1.0, f));

        let twinkle = rng.angle();
        let twinkle_speed = params.twinkle_speed.sample(rng);
        let twinkle_depth = clamp01(params.twinkle_depth.sample(rng));

        let color = if rng.chance(params.gold_fraction) {
            params.gold_color.sample(rng)
        } else {
            sample_cool_white(params.white_range, params.white_blue_lift, rng)
        };

        let heading = params.drift_heading + rng.signed(params.drift_jitter);
        let speed = params.drift_speed * lerp(0.25, 1.0, f) * rng.range(0.8, 1.2);
        let velocity = Vec2::new(heading.cos(), heading.sin()) * speed;

        Self {
            pos,
            velocity,
            offset: Vec2::ZERO,
            layer_fraction: f,
            size,
            base_alpha,
            alpha: base_alpha,
            twinkle,
            twinkle_speed,
            twinkle_depth,
            color,
            glow: base_alpha > params.glow_min_alpha && size > params.glow_min_size,
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn layer_fraction(&self) -> f64 {
        self.layer_fraction
    }

    pub fn base_alpha(&self) -> f64 {
        self.base_alpha
    }

    pub fn twinkle_depth(&self) -> f64 {
        self.twinkle_depth
    }

    pub fn parallax_offset(&self) -> Vec2 {
        self.offset
    }

    pub fn has_glow(&self) -> bool {
        self.glow
    }

    /// Lowest and highest opacity the twinkle can reach.
    pub fn twinkle_envelope(&self) -> (f64, f64) {
        (self.base_alpha * (1.0 - self.twinkle_depth), self.base_alpha)
    }

    fn ease_parallax(
        &mut self,
        params: &StarParams,
        bounds: LayoutSize,
        pointer: Option<Point>,
        ts: f64,
    ) {
        let target = match pointer {
            Some(p) => -(p - bounds.center()) * (params.parallax * self.layer_fraction),
            None => Vec2::ZERO,
        };
        let k = (params.parallax_ease * ts).min(1.0);
        self.offset += (target - self.offset) * k;
    }
}

/// Depth of `layer` in `[0, 1]`; a single layer counts as nearest.
pub fn layer_fraction(layer: u32, layers: u32) -> f64 {
    if layers <= 1 {
        1.0
    } else {
        f64::from(layer.min(layers - 1)) / f64::from(layers - 1)
    }
}

impl Agent for Star {
    type Params = StarParams;

    fn update(&mut self, tick: &Tick<'_, StarParams>) {
        let ts = tick.scale;
        let params = tick.params;

        self.twinkle += self.twinkle_speed * ts;
        let t = 0.5 + 0.5 * self.twinkle.sin();
        self.alpha = clamp01(self.base_alpha * (1.0 - self.twinkle_depth + self.twinkle_depth * t));

        self.pos += self.velocity * ts;
        self.pos.x = wrap_coord(self.pos.x, tick.bounds.width, params.wrap_margin);
        self.pos.y = wrap_coord(self.pos.y, tick.bounds.height, params.wrap_margin);

        self.ease_parallax(params, tick.bounds, tick.pointer, ts);
    }

    fn draw(&self, params: &StarParams, out: &mut DrawList) {
        let at = self.pos + self.offset;
        out.circle(at, self.size, self.color, self.alpha);
        if self.glow && self.alpha > params.glow_visible_alpha {
            out.glow(
                at,
                self.size * params.glow_radius,
                &[
                    GlowStop::new(0.0, self.color, self.alpha * params.glow_strength),
                    GlowStop::new(1.0, self.color, 0.0),
                ],
            );
        }
    }

    fn opacity(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
#[path = "../../tests/unit/agents/star.rs"]
mod tests;
