//! Aurum animates the decorative surfaces of a music-label site: drifting gold dust, layered
//! twinkling starfields with shooting stars, light ribbons, and spring-bound particle fields that
//! gather into a logo and scatter under the pointer.
//!
//! The host drives everything explicitly:
//!
//! - Build an [`Engine`] from an [`EngineConfig`]
//! - [`Engine::resize`] with the surfaces currently on the page
//! - [`Engine::animate`] once per frame, then read each role's [`DrawList`] or rasterize it with
//!   [`CpuRasterizer`]
#![forbid(unsafe_code)]

mod foundation;

pub mod agents;
pub mod config;
pub mod draw;
pub mod engine;
pub mod mask;
pub mod palette;
pub mod render;
pub mod systems;

pub use crate::foundation::core::{LayoutSize, Point, Rect, Rgb8, SurfaceGeometry, Vec2};
pub use crate::foundation::error::{AurumError, AurumResult};
pub use crate::foundation::math::{Rng64, clamp01, lerp};
pub use crate::foundation::time::{FRAME_CEILING_MS, FrameClock, NOMINAL_FRAME_MS, TimeStep};

pub use crate::config::{Density, EngineConfig, SurfaceStyle};
pub use crate::draw::{DrawCmd, DrawList, GlowStop};
pub use crate::engine::{Engine, Role, SurfaceDesc};
pub use crate::mask::{DEFAULT_THRESHOLD, alpha_channel, sample_mask_targets, targets_from_image};
pub use crate::render::{
    BackendKind, CpuRasterizer, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::systems::{ParticleSystem, build_system};
