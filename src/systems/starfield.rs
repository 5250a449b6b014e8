use super::{ParticleSystem, step_agents};
use crate::agents::{Star, Tick};
use crate::config::{Density, DensityFormula, StarParams, SurfaceStyle};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point, SurfaceGeometry};
use crate::foundation::math::Rng64;
use crate::foundation::time::TimeStep;

/// Layered stars, stored back layer first so painting in order gives correct depth.
#[derive(Clone, Debug, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Discard all stars and spawn `count` new ones across `params.layers` layers.
    ///
    /// Farther layers receive more stars (layer `l` of `L` is weighted `L - l`); rounding leftovers
    /// go to the farthest layer.
    pub fn populate(
        &mut self,
        params: &StarParams,
        bounds: LayoutSize,
        count: usize,
        rng: &mut Rng64,
    ) {
        self.stars.clear();
        self.stars.reserve(count);
        for (layer, n) in layer_counts(count, params.layers).into_iter().enumerate() {
            for _ in 0..n {
                let star = Star::spawn(params, bounds, layer as u32, params.layers, rng);
                self.stars.push(star);
            }
        }
    }

    pub fn clear(&mut self) {
        self.stars.clear();
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn step(&mut self, tick: &Tick<'_, StarParams>, out: &mut DrawList) {
        step_agents(&mut self.stars, tick, out);
    }
}

/// Split `count` stars over `layers` layers, farthest first.
pub fn layer_counts(count: usize, layers: u32) -> Vec<usize> {
    let layers = layers.max(1) as usize;
    let total_weight = layers * (layers + 1) / 2;
    let mut counts: Vec<usize> = (0..layers)
        .map(|l| count * (layers - l) / total_weight)
        .collect();
    let assigned: usize = counts.iter().sum();
    counts[0] += count - assigned;
    counts
}

/// Star count for a surface: density formula with zero for empty surfaces.
pub(crate) fn star_count(formula: &DensityFormula, bounds: LayoutSize, density: Density) -> usize {
    if bounds.is_empty() {
        0
    } else {
        formula.count(bounds.area(), density)
    }
}

/// Starlight headliner: many tiny twinkling stars with pointer parallax.
pub struct StarfieldSystem {
    params: StarParams,
    density: Density,
    geometry: SurfaceGeometry,
    seed: u64,
    rng: Rng64,
    field: Starfield,
    pointer: Option<Point>,
}

impl StarfieldSystem {
    pub fn new(params: &StarParams, density: Density, seed: u64) -> Self {
        Self {
            params: params.clone(),
            density,
            geometry: SurfaceGeometry::default(),
            seed,
            rng: Rng64::new(seed),
            field: Starfield::default(),
            pointer: None,
        }
    }

    /// `min(550, floor(w*h / 3200))`, halved for light density.
    pub fn population_for(params: &StarParams, bounds: LayoutSize, density: Density) -> usize {
        star_count(&params.starlight, bounds, density)
    }

    pub fn field(&self) -> &Starfield {
        &self.field
    }
}

impl ParticleSystem for StarfieldSystem {
    fn style(&self) -> SurfaceStyle {
        SurfaceStyle::Starlight
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
        if reduced_motion {
            return;
        }
        let count = Self::population_for(&self.params, geometry.logical, self.density);
        self.field.populate(&self.params, geometry.logical, count, &mut self.rng);
    }

    fn animate(&mut self, step: TimeStep, out: &mut DrawList) {
        out.clear();
        if self.field.is_empty() {
            return;
        }
        let tick = Tick {
            scale: step.scale,
            bounds: self.geometry.logical,
            density: self.density,
            params: &self.params,
            pointer: self.pointer,
            gathering: false,
        };
        self.field.step(&tick, out);
    }

    fn population(&self) -> usize {
        self.field.len()
    }

    fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }
}
