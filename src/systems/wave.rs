use super::{ParticleSystem, step_agents};
use crate::agents::wave::sample_step;
use crate::agents::{Ribbon, Tick};
use crate::config::{Density, SurfaceStyle, WaveParams};
use crate::draw::DrawList;
use crate::foundation::core::SurfaceGeometry;
use crate::foundation::time::TimeStep;

/// Layered gold ribbons. Fully deterministic: ribbons carry fixed shapes, not random draws.
pub struct WaveSystem {
    params: WaveParams,
    density: Density,
    geometry: SurfaceGeometry,
    ribbons: Vec<Ribbon>,
}

impl WaveSystem {
    pub fn new(params: &WaveParams, density: Density) -> Self {
        Self {
            params: params.clone(),
            density,
            geometry: SurfaceGeometry::default(),
            ribbons: Vec::new(),
        }
    }

    /// Every ribbon for normal density, the first `light_count` for light density.
    pub fn population_for(params: &WaveParams, density: Density) -> usize {
        match density {
            Density::Normal => params.ribbons.len(),
            Density::Light => params.light_count.min(params.ribbons.len()),
        }
    }

    pub fn ribbons(&self) -> &[Ribbon] {
        &self.ribbons
    }
}

impl ParticleSystem for WaveSystem {
    fn style(&self) -> SurfaceStyle {
        SurfaceStyle::Waves
    }

    fn density(&self) -> Density {
        self.density
    }

    fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    fn resize(&mut self, geometry: SurfaceGeometry, reduced_motion: bool) {
        self.geometry = geometry;
        self.ribbons.clear();
        let bounds = geometry.logical;
        if reduced_motion || bounds.is_empty() {
            return;
        }
        let intensity = match self.density {
            Density::Normal => 1.0,
            Density::Light => self.params.light_intensity,
        };
        let step = sample_step(&self.params, bounds.width);
        let count = Self::population_for(&self.params, self.density);
        self.ribbons.extend(
            self.params.ribbons[..count]
                .iter()
                .map(|shape| Ribbon::new(*shape, bounds, intensity, step)),
        );
    }

    fn animate(&mut self, step: TimeStep, out: &mut DrawList) {
        out.clear();
        if self.ribbons.is_empty() {
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
        step_agents(&mut self.ribbons, &tick, out);
    }

    fn population(&self) -> usize {
        self.ribbons.len()
    }
}
