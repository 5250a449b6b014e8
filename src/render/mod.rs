//! Raster output for draw lists.

pub mod backend;
pub mod cpu;

pub use backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use cpu::CpuRasterizer;
