use super::ParticleSystem;
use super::starfield::{Starfield, star_count};
use crate::agents::Tick;
use crate::agents::comet::CometPool;
use crate::config::{CometParams, Density, StarParams, SurfaceStyle};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point, SurfaceGeometry};
use crate::foundation::math::Rng64;
use crate::foundation::time::TimeStep;

/// Nebula sky: a sparser starfield plus pooled comets launched at irregular intervals.
pub struct CometSystem {
    stars: StarParams,
    comets: CometParams,
    density: Density,
    geometry: SurfaceGeometry,
    seed: u64,
    rng: Rng64,
    field: Starfield,
    pool: CometPool,
    spawn_timer_ms: f64,
    spawn_interval_ms: f64,
    pointer: Option<Point>,
    live: bool,
}

impl CometSystem {
    pub fn new(stars: &StarParams, comets: &CometParams, density: Density, seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let spawn_interval_ms = comets.first_interval_ms.sample(&mut rng);
        Self {
            stars: stars.clone(),
            comets: comets.clone(),
            density,
            geometry: SurfaceGeometry::default(),
            seed,
            rng,
            field: Starfield::default(),
            pool: CometPool::new(comets),
            spawn_timer_ms: 0.0,
            spawn_interval_ms,
            pointer: None,
            live: false,
        }
    }

    /// Background star count: `min(420, floor(w*h / 4200))`, scaled by 0.55 for light density.
    pub fn population_for(params: &StarParams, bounds: LayoutSize, density: Density) -> usize {
        star_count(&params.nebula, bounds, density)
    }

    pub fn pool(&self) -> &CometPool {
        &self.pool
    }

    pub fn field(&self) -> &Starfield {
        &self.field
    }

    /// Milliseconds until the next launch attempt.
    pub fn next_launch_in_ms(&self) -> f64 {
        (self.spawn_interval_ms - self.spawn_timer_ms).max(0.0)
    }

    fn advance_spawn_timer(&mut self, dt_ms: f64) {
        self.spawn_timer_ms += dt_ms;
        if self.spawn_timer_ms > self.spawn_interval_ms {
            self.spawn_timer_ms = 0.0;
            self.spawn_interval_ms = self.comets.interval_ms.sample(&mut self.rng);
            self.pool.try_spawn(&self.comets, self.geometry.logical, &mut self.rng);
        }
    }
}

impl ParticleSystem for CometSystem {
    fn style(&self) -> SurfaceStyle {
        SurfaceStyle::Nebula
    }

    fn density(&self) -> Density {
        self.density
    }

    fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    fn resize(&mut self, geometry: SurfaceGeometry, reduced_motion: bool) {
        self.geometry = geometry;
        self.rng = Rng64::new(self.seed);
        self.field.clear();
        self.pool = CometPool::new(&self.comets);
        self.spawn_timer_ms = 0.0;
        self.spawn_interval_ms = self.comets.first_interval_ms.sample(&mut self.rng);
        self.live = !reduced_motion && !geometry.logical.is_empty();
        if !self.live {
            return;
        }
        let count = Self::population_for(&self.stars, geometry.logical, self.density);
        self.field.populate(&self.stars, geometry.logical, count, &mut self.rng);
    }

    fn animate(&mut self, step: TimeStep, out: &mut DrawList) {
        out.clear();
        if !self.live {
            return;
        }

        let tick = Tick {
            scale: step.scale,
            bounds: self.geometry.logical,
            density: self.density,
            params: &self.stars,
            pointer: self.pointer,
            gathering: false,
        };
        self.field.step(&tick, out);

        self.advance_spawn_timer(step.dt_ms);

        let tick = Tick {
            scale: step.scale,
            bounds: self.geometry.logical,
            density: self.density,
            params: &self.comets,
            pointer: None,
            gathering: false,
        };
        self.pool.update(&tick);
        self.pool.draw(&self.comets, out);
    }

    fn population(&self) -> usize {
        self.field.len() + self.pool.active_count()
    }

    fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }
}
