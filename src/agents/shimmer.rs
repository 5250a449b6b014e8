use super::{Agent, Tick};
use crate::config::ShimmerParams;
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point, Rgb8};
use crate::foundation::math::{Rng64, clamp01};

/// A fixed gold point whose opacity breathes between zero and its peak.
#[derive(Clone, Debug)]
pub struct Glint {
    pos: Point,
    size: f64,
    max_alpha: f64,
    phase: f64,
    speed: f64,
    alpha: f64,
    color: Rgb8,
}

impl Glint {
    pub fn spawn(params: &ShimmerParams, bounds: LayoutSize, rng: &mut Rng64) -> Self {
        let pos = Point::new(rng.next_f64() * bounds.width, rng.next_f64() * bounds.height);
        let max_alpha = clamp01(params.max_alpha.sample(rng));
        let phase = rng.angle();
        Self {
            pos,
            size: params.size.sample(rng).max(f64::EPSILON),
            max_alpha,
            phase,
            speed: params.speed.sample(rng),
            alpha: Self::breathe(max_alpha, phase),
            color: params.color.sample_gold(rng),
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    fn breathe(max_alpha: f64, phase: f64) -> f64 {
        clamp01(max_alpha * (0.5 + 0.5 * phase.sin()))
    }
}

impl Agent for Glint {
    type Params = ShimmerParams;

    fn update(&mut self, tick: &Tick<'_, ShimmerParams>) {
        self.phase += self.speed * tick.scale;
        self.alpha = Self::breathe(self.max_alpha, self.phase);
    }

    fn draw(&self, _params: &ShimmerParams, out: &mut DrawList) {
        out.circle(self.pos, self.size, self.color, self.alpha);
    }

    fn opacity(&self) -> f64 {
        self.alpha
    }
}
