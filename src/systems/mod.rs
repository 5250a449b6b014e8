//! Systems own every agent bound to one surface: population sizing, the per-tick update and draw
//! pass, and pooling for transient agents.

pub mod comet;
pub mod mote;
pub mod shimmer;
pub mod spring;
pub mod starfield;
pub mod wave;

pub use comet::CometSystem;
pub use mote::MoteSystem;
pub use shimmer::ShimmerSystem;
pub use spring::{HomeLayout, SpringSystem};
pub use starfield::{Starfield, StarfieldSystem};
pub use wave::WaveSystem;

use crate::agents::{Agent, Tick};
use crate::config::{Density, EngineConfig, SurfaceStyle};
use crate::draw::DrawList;
use crate::foundation::core::{Point, SurfaceGeometry};
use crate::foundation::time::TimeStep;

/// Uniform interface the engine drives every system through.
pub trait ParticleSystem: Send {
    fn style(&self) -> SurfaceStyle;

    fn density(&self) -> Density;

    fn geometry(&self) -> SurfaceGeometry;

    /// Discard the population and rebuild it for `geometry`.
    ///
    /// With `reduced_motion` set the population is left empty and the surface stays clear.
    fn resize(&mut self, geometry: SurfaceGeometry, reduced_motion: bool);

    /// Advance one tick and record this tick's paint into `out` (which is cleared first).
    fn animate(&mut self, step: TimeStep, out: &mut DrawList);

    /// Number of live agents (pooled comets count only while active).
    fn population(&self) -> usize;

    /// Surface-local pointer position, or `None` when the pointer left the surface.
    fn set_pointer(&mut self, _pointer: Option<Point>) {}

    /// Replace the home layout used by the next [`ParticleSystem::resize`].
    fn set_targets(&mut self, _targets: Option<&[Point]>) {}
}

/// Build the system that governs `style`. `seed` seeds the system's private random stream.
pub fn build_system(
    style: SurfaceStyle,
    density: Density,
    cfg: &EngineConfig,
    seed: u64,
    targets: Option<&[Point]>,
) -> Box<dyn ParticleSystem> {
    match style {
        SurfaceStyle::Starlight => Box::new(StarfieldSystem::new(&cfg.stars, density, seed)),
        SurfaceStyle::Nebula => Box::new(CometSystem::new(&cfg.stars, &cfg.comets, density, seed)),
        SurfaceStyle::Motes => Box::new(MoteSystem::new(&cfg.motes, density, seed)),
        SurfaceStyle::Shimmer => Box::new(ShimmerSystem::new(&cfg.shimmer, density, seed)),
        SurfaceStyle::Waves => Box::new(WaveSystem::new(&cfg.waves, density)),
        SurfaceStyle::Hero => {
            let mut sys = SpringSystem::hero(&cfg.hero, density, seed);
            sys.set_targets(targets);
            Box::new(sys)
        }
        SurfaceStyle::Services => {
            let mut sys = SpringSystem::services(&cfg.services, density, seed);
            sys.set_targets(targets);
            Box::new(sys)
        }
    }
}

/// Update then draw every agent in order.
pub(crate) fn step_agents<A: Agent>(
    agents: &mut [A],
    tick: &Tick<'_, A::Params>,
    out: &mut DrawList,
) {
    for agent in agents.iter_mut() {
        agent.update(tick);
        agent.draw(tick.params, out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/systems.rs"]
mod tests;
