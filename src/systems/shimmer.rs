use super::{ParticleSystem, step_agents};
use crate::agents::{Glint, Tick};
use crate::config::{Density, ShimmerParams, SurfaceStyle};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, SurfaceGeometry};
use crate::foundation::math::Rng64;
use crate::foundation::time::TimeStep;

/// Sparse, nearly static gold points that slowly breathe.
pub struct ShimmerSystem {
    params: ShimmerParams,
    density: Density,
    geometry: SurfaceGeometry,
    seed: u64,
    rng: Rng64,
    glints: Vec<Glint>,
}

impl ShimmerSystem {
    pub fn new(params: &ShimmerParams, density: Density, seed: u64) -> Self {
        Self {
            params: params.clone(),
            density,
            geometry: SurfaceGeometry::default(),
            seed,
            rng: Rng64::new(seed),
            glints: Vec::new(),
        }
    }

    /// `max(30, min(floor(w*h / 15000), 120))`, halved for light density.
    pub fn population_for(params: &ShimmerParams, bounds: LayoutSize, density: Density) -> usize {
        if bounds.is_empty() {
            return 0;
        }
        params.population.count(bounds.area(), density)
    }
}

impl ParticleSystem for ShimmerSystem {
    fn style(&self) -> SurfaceStyle {
        SurfaceStyle::Shimmer
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
        self.glints.clear();
        if reduced_motion {
            return;
        }
        let bounds = geometry.logical;
        let count = Self::population_for(&self.params, bounds, self.density);
        for _ in 0..count {
            let glint = Glint::spawn(&self.params, bounds, &mut self.rng);
            self.glints.push(glint);
        }
    }

    fn animate(&mut self, step: TimeStep, out: &mut DrawList) {
        out.clear();
        if self.glints.is_empty() {
            return;
        }
        let tick = Tick {
            scale: step.scale,
            bounds: self.geometry.logical,
            density: self.density,
            params: &self.params,
            pointer: None,
            gathering: false,
        };
        step_agents(&mut self.glints, &tick, out);
    }

    fn population(&self) -> usize {
        self.glints.len()
    }
}
