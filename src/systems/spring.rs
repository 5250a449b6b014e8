use super::ParticleSystem;
use crate::agents::{Agent, SpringParticle, Tick};
use crate::config::{Density, SpringFieldParams, SurfaceStyle};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point, SurfaceGeometry};
use crate::foundation::math::Rng64;
use crate::foundation::time::TimeStep;

/// Where spring particles make their home.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HomeLayout {
    /// Random homes inside the surface, count from the density formula.
    #[default]
    Scatter,
    /// Homes taken from a point set (for example a sampled logo mask), subsampled by stride.
    Targets(Vec<Point>),
}

impl HomeLayout {
    /// Resolve into concrete home points for `bounds`.
    pub fn homes(
        &self,
        params: &SpringFieldParams,
        bounds: LayoutSize,
        density: Density,
        rng: &mut Rng64,
    ) -> Vec<Point> {
        if bounds.is_empty() {
            return Vec::new();
        }
        match self {
            HomeLayout::Targets(points) if !points.is_empty() => {
                let max = density
                    .scale_count(params.population.max_count, params.population.light_factor)
                    .max(1);
                let stride = points.len().div_ceil(max);
                points.iter().step_by(stride).copied().collect()
            }
            _ => {
                let count = params.population.count(bounds.area(), density);
                let inset_x = bounds.width * params.home_inset;
                let inset_y = bounds.height * params.home_inset;
                (0..count)
                    .map(|_| {
                        Point::new(
                            rng.range(inset_x, bounds.width - inset_x),
                            rng.range(inset_y, bounds.height - inset_y),
                        )
                    })
                    .collect()
            }
        }
    }
}

/// Interactive field of spring-tethered particles joined by proximity lines.
///
/// Particles start scattered and begin gathering after the converge delay. A preset with a cycle
/// then alternates between gathering and scattering, measured from the end of the delay.
pub struct SpringSystem {
    style: SurfaceStyle,
    params: SpringFieldParams,
    density: Density,
    geometry: SurfaceGeometry,
    seed: u64,
    rng: Rng64,
    layout: HomeLayout,
    particles: Vec<SpringParticle>,
    elapsed_ms: f64,
    pointer: Option<Point>,
}

impl SpringSystem {
    /// Bright hero field.
    pub fn hero(params: &SpringFieldParams, density: Density, seed: u64) -> Self {
        Self::with_style(SurfaceStyle::Hero, params, density, seed)
    }

    /// Ghostly services field.
    pub fn services(params: &SpringFieldParams, density: Density, seed: u64) -> Self {
        Self::with_style(SurfaceStyle::Services, params, density, seed)
    }

    fn with_style(
        style: SurfaceStyle,
        params: &SpringFieldParams,
        density: Density,
        seed: u64,
    ) -> Self {
        Self {
            style,
            params: params.clone(),
            density,
            geometry: SurfaceGeometry::default(),
            seed,
            rng: Rng64::new(seed),
            layout: HomeLayout::Scatter,
            particles: Vec::new(),
            elapsed_ms: 0.0,
            pointer: None,
        }
    }

    pub fn layout(&self) -> &HomeLayout {
        &self.layout
    }

    pub fn particles(&self) -> &[SpringParticle] {
        &self.particles
    }

    /// Whether particles are currently pulled toward their homes.
    pub fn is_gathering(&self) -> bool {
        gathering_at(&self.params, self.elapsed_ms)
    }

    fn draw_links(&self, out: &mut DrawList) {
        let max = self.params.link_distance;
        if max <= 0.0 {
            return;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let d = (a.position() - b.position()).hypot();
                if d >= max {
                    continue;
                }
                let fade = (1.0 - d / max) * a.opacity().min(b.opacity());
                let alpha = fade * self.params.link_alpha;
                out.segment(a.position(), b.position(), self.params.link_width, a.color(), alpha);
            }
        }
    }
}

/// Gather/scatter phase after `elapsed_ms` of animation.
pub fn gathering_at(params: &SpringFieldParams, elapsed_ms: f64) -> bool {
    if elapsed_ms < params.converge_delay_ms {
        return false;
    }
    match params.cycle {
        Some(cycle) => {
            let period = cycle.gather_ms + cycle.scatter_ms;
            if period <= 0.0 {
                return true;
            }
            (elapsed_ms - params.converge_delay_ms) % period < cycle.gather_ms
        }
        None => true,
    }
}

impl ParticleSystem for SpringSystem {
    fn style(&self) -> SurfaceStyle {
        self.style
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
        self.particles.clear();
        self.elapsed_ms = 0.0;
        if reduced_motion {
            return;
        }
        let bounds = geometry.logical;
        let homes = self.layout.homes(&self.params, bounds, self.density, &mut self.rng);
        self.particles.reserve(homes.len());
        for home in homes {
            let p = SpringParticle::new(home, &self.params, bounds, &mut self.rng);
            self.particles.push(p);
        }
    }

    fn animate(&mut self, step: TimeStep, out: &mut DrawList) {
        out.clear();
        if self.particles.is_empty() {
            return;
        }
        self.elapsed_ms += step.dt_ms;
        let gathering = self.is_gathering();

        let tick = Tick {
            scale: step.scale,
            bounds: self.geometry.logical,
            density: self.density,
            params: &self.params,
            pointer: self.pointer,
            gathering,
        };
        for p in &mut self.particles {
            p.update(&tick);
        }

        self.draw_links(out);
        for p in &self.particles {
            p.draw(&self.params, out);
        }
    }

    fn population(&self) -> usize {
        self.particles.len()
    }

    fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    fn set_targets(&mut self, targets: Option<&[Point]>) {
        self.layout = match targets {
            Some(points) if !points.is_empty() => HomeLayout::Targets(points.to_vec()),
            _ => HomeLayout::Scatter,
        };
    }
}
