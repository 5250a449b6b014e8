use super::{Agent, Tick};
use crate::config::SpringFieldParams;
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point, Rgb8, Vec2};
use crate::foundation::math::{Rng64, clamp01};

/// A particle tethered to a slowly orbiting home point.
///
/// While the field is gathering, a spring pulls the particle home and the pointer pushes it away.
/// A particle pushed by the pointer returns on a softer spring until it is back within the settle
/// distance. While scattering, the spring is released and the particle drifts and fades.
#[derive(Clone, Debug)]
pub struct SpringParticle {
    rng: Rng64,
    home: Point,
    pos: Point,
    vel: Vec2,
    orbit: f64,
    orbit_speed: f64,
    orbit_radius: f64,
    breathe: f64,
    breathe_speed: f64,
    size: f64,
    alpha: f64,
    alpha_target: f64,
    color: Rgb8,
    settled: bool,
    displaced: bool,
}

impl SpringParticle {
    /// Spawn at a random point on the surface, tethered to `home`, fully transparent.
    pub fn new(
        home: Point,
        params: &SpringFieldParams,
        bounds: LayoutSize,
        rng: &mut Rng64,
    ) -> Self {
        let pos = Point::new(rng.next_f64() * bounds.width, rng.next_f64() * bounds.height);
        let vel = Vec2::new(rng.signed(params.initial_speed), rng.signed(params.initial_speed));
        Self {
            rng: rng.fork(),
            home,
            pos,
            vel,
            orbit: rng.angle(),
            orbit_speed: params.orbit_speed.sample(rng),
            orbit_radius: params.orbit_radius.sample(rng),
            breathe: rng.angle(),
            breathe_speed: params.breathe_speed.sample(rng),
            size: params.size.sample(rng).max(f64::EPSILON),
            alpha: 0.0,
            alpha_target: clamp01(params.alpha_target.sample(rng)),
            color: params.color.sample_gold(rng),
            settled: false,
            displaced: false,
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn home(&self) -> Point {
        self.home
    }

    pub fn color(&self) -> Rgb8 {
        self.color
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Whether the pointer has pushed this particle since it last settled.
    pub fn is_displaced(&self) -> bool {
        self.displaced
    }

    /// Home point displaced by the particle's small orbit.
    pub fn target(&self) -> Point {
        self.home + Vec2::new(self.orbit.cos(), self.orbit.sin()) * self.orbit_radius
    }

    fn gather(&mut self, params: &SpringFieldParams, ts: f64) {
        let d = self.target() - self.pos;
        let dist = d.hypot();
        let k = if self.displaced {
            params.spring_displaced
        } else if dist > params.far_distance {
            params.spring_far
        } else {
            params.spring_rest
        };
        self.vel += d * (k * ts);
        self.vel *= params.damping.powf(ts);
        self.alpha = (self.alpha + params.fade_in * ts).min(self.alpha_target);

        if dist < params.settle_distance {
            self.settled = true;
            self.displaced = false;
        }
    }

    fn scatter(&mut self, params: &SpringFieldParams, ts: f64) {
        let half = params.scatter_jitter * 0.5;
        let jitter = Vec2::new(self.rng.signed(half), self.rng.signed(half));
        self.vel += jitter * ts;
        self.vel *= params.scatter_damping.powf(ts);
        self.alpha = (self.alpha - params.fade_out * ts).max(0.0);
        self.settled = false;
    }

    fn repel(&mut self, params: &SpringFieldParams, pointer: Point, ts: f64) {
        let away = self.pos - pointer;
        let dist = away.hypot();
        if dist >= params.repel_radius || dist <= f64::EPSILON {
            return;
        }
        let push = params.repel_strength * (params.repel_radius - dist) / params.repel_radius;
        self.vel += away / dist * (push * ts);
        self.displaced = true;
        self.settled = false;
    }
}

impl Agent for SpringParticle {
    type Params = SpringFieldParams;

    fn update(&mut self, tick: &Tick<'_, SpringFieldParams>) {
        let ts = tick.scale;
        let params = tick.params;
        self.orbit += self.orbit_speed * ts;
        self.breathe += self.breathe_speed * ts;

        if tick.gathering {
            self.gather(params, ts);
        } else {
            self.scatter(params, ts);
        }
        if let Some(pointer) = tick.pointer {
            self.repel(params, pointer, ts);
        }
        if self.settled {
            let floor = params.breathe_floor;
            self.alpha = self.alpha_target * (floor + (1.0 - floor) * self.breathe.sin());
        }
        self.alpha = clamp01(self.alpha);

        self.pos += self.vel * ts;
    }

    fn draw(&self, _params: &SpringFieldParams, out: &mut DrawList) {
        out.circle(self.pos, self.size, self.color, self.alpha);
    }

    fn opacity(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
#[path = "../../tests/unit/agents/spring.rs"]
mod tests;
