use super::{Agent, Tick};
use crate::config::{Density, MoteParams};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point, Rgb8};
use crate::foundation::math::{Rng64, clamp01};

/// A speck of gold dust rising with a sideways wobble.
///
/// Motes never wrap: once one leaves the surface every field is re-rolled from the mote's own
/// stream and it reappears just below the bottom edge.
#[derive(Clone, Debug)]
pub struct Mote {
    rng: Rng64,
    pos: Point,
    vx: f64,
    vy: f64,
    wobble: f64,
    wobble_speed: f64,
    wobble_amp: f64,
    flicker: f64,
    flicker_speed: f64,
    size: f64,
    base_alpha: f64,
    alpha: f64,
    color: Rgb8,
}

impl Mote {
    /// Spawn anywhere on the surface (initial population).
    pub fn scattered(
        params: &MoteParams,
        bounds: LayoutSize,
        density: Density,
        rng: &mut Rng64,
    ) -> Self {
        let y = rng.next_f64() * bounds.height;
        Self::spawn_at_height(params, bounds, density, rng, y)
    }

    /// Spawn just below the bottom edge (respawn).
    pub fn from_bottom(
        params: &MoteParams,
        bounds: LayoutSize,
        density: Density,
        rng: &mut Rng64,
    ) -> Self {
        Self::spawn_at_height(
            params,
            bounds,
            density,
            rng,
            bounds.height + params.respawn_offset,
        )
    }

    fn spawn_at_height(
        params: &MoteParams,
        bounds: LayoutSize,
        density: Density,
        rng: &mut Rng64,
        y: f64,
    ) -> Self {
        let (size, alpha) = match density {
            Density::Normal => (params.size, params.alpha),
            Density::Light => (params.size_light, params.alpha_light),
        };
        let x = rng.next_f64() * bounds.width;
        let base_alpha = clamp01(alpha.sample(rng));
        let mut mote = Self {
            rng: rng.fork(),
            pos: Point::new(x, y),
            vx: rng.signed(params.drift),
            vy: -params.rise_speed.sample(rng),
            wobble: rng.angle(),
            wobble_speed: params.wobble_speed.sample(rng),
            wobble_amp: params.wobble_amp.sample(rng),
            flicker: rng.angle(),
            flicker_speed: params.flicker_speed.sample(rng),
            size: size.sample(rng).max(f64::EPSILON),
            base_alpha,
            alpha: 0.0,
            color: params.color.sample_gold(rng),
        };
        mote.alpha = mote.shade(params, bounds);
        mote
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn color(&self) -> Rgb8 {
        self.color
    }

    fn shade(&self, params: &MoteParams, bounds: LayoutSize) -> f64 {
        let flicker = self.base_alpha + self.flicker.sin() * self.base_alpha * params.flicker_depth;
        let zone = params.fade_zone * bounds.height;
        let fade = if zone > 0.0 {
            clamp01(self.pos.y / zone)
        } else {
            1.0
        };
        clamp01(flicker * fade)
    }

    fn escaped(&self, params: &MoteParams, bounds: LayoutSize) -> bool {
        let m = params.edge_margin;
        self.pos.y < -m || self.pos.x < -m || self.pos.x > bounds.width + m
    }
}

impl Agent for Mote {
    type Params = MoteParams;

    fn update(&mut self, tick: &Tick<'_, MoteParams>) {
        let ts = tick.scale;
        self.wobble += self.wobble_speed * ts;
        self.flicker += self.flicker_speed * ts;
        self.pos.x += (self.vx + self.wobble.sin() * self.wobble_amp) * ts;
        self.pos.y += self.vy * ts;

        if self.escaped(tick.params, tick.bounds) {
            let mut rng = self.rng.clone();
            *self = Self::from_bottom(tick.params, tick.bounds, tick.density, &mut rng);
            return;
        }
        self.alpha = self.shade(tick.params, tick.bounds);
    }

    fn draw(&self, _params: &MoteParams, out: &mut DrawList) {
        out.circle(self.pos, self.size, self.color, self.alpha);
    }

    fn opacity(&self) -> f64 {
        self.alpha
    }
}
