//! Individual visual agents: state, motion, and paint.
//!
//! An agent owns its position, velocity and visual state. It advances itself from a [`Tick`]
//! and records paint operations into a [`DrawList`]; it never sees the surface it is drawn on.

pub mod comet;
pub mod mote;
pub mod shimmer;
pub mod spring;
pub mod star;
pub mod wave;

pub use comet::Comet;
pub use mote::Mote;
pub use shimmer::Glint;
pub use spring::SpringParticle;
pub use star::Star;
pub use wave::Ribbon;

use crate::config::Density;
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point};

/// Everything an agent may read while advancing by one tick.
pub struct Tick<'a, P> {
    /// Elapsed time in nominal frames.
    pub scale: f64,
    /// Logical size of the surface.
    pub bounds: LayoutSize,
    pub density: Density,
    pub params: &'a P,
    /// Surface-local pointer position, if the pointer is over the surface.
    pub pointer: Option<Point>,
    /// Spring fields only: whether particles are pulled home or left to scatter.
    pub gathering: bool,
}

/// Shared capability of every agent variant.
pub trait Agent {
    /// Tuning parameters this agent reads.
    type Params;

    /// Advance by `tick.scale` nominal frames.
    fn update(&mut self, tick: &Tick<'_, Self::Params>);

    /// Record this agent's paint operations.
    fn draw(&self, params: &Self::Params, out: &mut DrawList);

    /// Current opacity, always within `[0, 1]`.
    fn opacity(&self) -> f64;
}
