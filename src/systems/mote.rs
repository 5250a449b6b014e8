use super::{ParticleSystem, step_agents};
use crate::agents::{Mote, Tick};
use crate::config::{Density, MoteParams, SurfaceStyle};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, SurfaceGeometry};
use crate::foundation::math::Rng64;
use crate::foundation::time::TimeStep;

/// Rising gold dust.
pub struct MoteSystem {
    params: MoteParams,
    density: Density,
    geometry: SurfaceGeometry,
    seed: u64,
    rng: Rng64,
    motes: Vec<Mote>,
}

impl MoteSystem {
    pub fn new(params: &MoteParams, density: Density, seed: u64) -> Self {
        Self {
            params: params.clone(),
            density,
            geometry: SurfaceGeometry::default(),
            seed,
            rng: Rng64::new(seed),
            motes: Vec::new(),
        }
    }

    /// `max(40, min(floor(w*h / 12000), 200))`, scaled for light density.
    pub fn population_for(params: &MoteParams, bounds: LayoutSize, density: Density) -> usize {
        if bounds.is_empty() {
            return 0;
        }
        params.population.count(bounds.area(), density)
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }
}

impl ParticleSystem for MoteSystem {
    fn style(&self) -> SurfaceStyle {
        SurfaceStyle::Motes
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
        self.motes.clear();
        if reduced_motion {
            return;
        }
        let bounds = geometry.logical;
        let count = Self::population_for(&self.params, bounds, self.density);
        self.motes.reserve(count);
        for _ in 0..count {
            let mote = Mote::scattered(&self.params, bounds, self.density, &mut self.rng);
            self.motes.push(mote);
        }
    }

    fn animate(&mut self, step: TimeStep, out: &mut DrawList) {
        out.clear();
        if self.motes.is_empty() {
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
        step_agents(&mut self.motes, &tick, out);
    }

    fn population(&self) -> usize {
        self.motes.len()
    }
}
