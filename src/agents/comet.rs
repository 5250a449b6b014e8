use std::collections::VecDeque;

use super::{Agent, Tick};
use crate::config::CometParams;
use crate::draw::{DrawList, GlowStop};
use crate::foundation::core::{LayoutSize, Point, Rgb8, Vec2};
use crate::foundation::math::{Rng64, clamp01};

/// A transient streak with a tapering trail. Lives in a [`CometPool`].
///
/// Lifecycle: inactive until [`Comet::launch`], rising over the attack share of its lifetime,
/// decaying for the rest, and inactive again once `life >= max_life`.
#[derive(Clone, Debug)]
pub struct Comet {
    active: bool,
    pos: Point,
    velocity: Vec2,
    /// Past head positions, most recent first.
    trail: VecDeque<Point>,
    alpha: f64,
    max_alpha: f64,
    life: f64,
    max_life: f64,
    width: f64,
    tint: Rgb8,
}

impl Comet {
    /// An inactive pool member.
    pub fn idle(params: &CometParams) -> Self {
        Self {
            active: false,
            pos: Point::ZERO,
            velocity: Vec2::ZERO,
            trail: VecDeque::with_capacity(params.max_trail),
            alpha: 0.0,
            max_alpha: 0.0,
            life: 0.0,
            max_life: 1.0,
            width: 1.0,
            tint: Rgb8::WHITE,
        }
    }

    /// Re-roll every field and activate. Only valid on an inactive comet.
    pub fn launch(&mut self, params: &CometParams, bounds: LayoutSize, rng: &mut Rng64) {
        debug_assert!(!self.active, "launch on an active comet");

        let x = params.spawn_x.sample(rng) * bounds.width;
        let y = params.spawn_y.sample(rng) * bounds.height;
        let angle = params.angle + rng.signed(params.angle_jitter * 0.5);
        let speed = params.speed.sample(rng);

        self.pos = Point::new(x, y);
        self.velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
        self.trail.clear();
        self.alpha = 0.0;
        self.max_alpha = clamp01(params.max_alpha.sample(rng));
        self.life = 0.0;
        self.max_life = params.max_life.sample(rng).max(f64::EPSILON);
        self.width = params.width.sample(rng).max(f64::EPSILON);
        self.tint = params.tint.sample(rng);
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Piecewise-linear life envelope: fast attack, long linear decay.
    pub fn envelope(life: f64, max_life: f64, attack: f64) -> f64 {
        let t = life / max_life;
        let level = if t < attack {
            t / attack
        } else {
            1.0 - (t - attack) / (1.0 - attack)
        };
        clamp01(level)
    }

    fn retire(&mut self) {
        self.active = false;
        self.alpha = 0.0;
        self.trail.clear();
    }
}

impl Agent for Comet {
    type Params = CometParams;

    fn update(&mut self, tick: &Tick<'_, CometParams>) {
        if !self.active {
            return;
        }
        let ts = tick.scale;
        self.life += ts;
        self.alpha = self.max_alpha * Self::envelope(self.life, self.max_life, tick.params.attack);

        self.trail.push_front(self.pos);
        self.trail.truncate(tick.params.max_trail);
        self.pos += self.velocity * ts;

        if self.life >= self.max_life {
            self.retire();
        }
    }

    fn draw(&self, params: &CometParams, out: &mut DrawList) {
        if !self.active {
            return;
        }

        let segments = self.trail.len();
        let mut prev = self.pos;
        for (i, &p) in self.trail.iter().enumerate() {
            let f = 1.0 - i as f64 / segments as f64;
            let taper = f * f;
            out.segment(prev, p, self.width * taper, self.tint, self.alpha * taper);
            prev = p;
        }

        out.glow(
            self.pos,
            self.width * params.head_radius,
            &[
                GlowStop::new(0.0, params.head_color, self.alpha),
                GlowStop::new(0.4, self.tint, self.alpha * 0.5),
                GlowStop::new(1.0, self.tint, 0.0),
            ],
        );
    }

    fn opacity(&self) -> f64 {
        self.alpha
    }
}

/// Launch bookkeeping for a [`CometPool`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub launched: u64,
    /// Launch attempts that found every member busy.
    pub rejected: u64,
}

/// Fixed-capacity set of comets reused through their active flag.
#[derive(Clone, Debug)]
pub struct CometPool {
    members: Vec<Comet>,
    stats: PoolStats,
}

impl CometPool {
    pub fn new(params: &CometParams) -> Self {
        Self::with_capacity(params, params.pool_size)
    }

    pub fn with_capacity(params: &CometParams, capacity: usize) -> Self {
        Self {
            members: (0..capacity).map(|_| Comet::idle(params)).collect(),
            stats: PoolStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.members.len()
    }

    pub fn active_count(&self) -> usize {
        self.members.iter().filter(|c| c.is_active()).count()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn members(&self) -> &[Comet] {
        &self.members
    }

    /// Launch the first inactive member. Returns `false` when every member is busy.
    pub fn try_spawn(&mut self, params: &CometParams, bounds: LayoutSize, rng: &mut Rng64) -> bool {
        match self.members.iter_mut().find(|c| !c.is_active()) {
            Some(free) => {
                free.launch(params, bounds, rng);
                self.stats.launched = self.stats.launched.saturating_add(1);
                true
            }
            None => {
                self.stats.rejected = self.stats.rejected.saturating_add(1);
                false
            }
        }
    }

    pub fn update(&mut self, tick: &Tick<'_, CometParams>) {
        for comet in self.members.iter_mut().filter(|c| c.is_active()) {
            comet.update(tick);
        }
    }

    pub fn draw(&self, params: &CometParams, out: &mut DrawList) {
        for comet in &self.members {
            comet.draw(params, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/agents/comet.rs"]
mod tests;
