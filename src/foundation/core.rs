pub use kurbo::{Point, Rect, Vec2};

/// Straight-alpha RGB colour. Agents pick one at spawn and keep it for their lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Return `true` for the warm "golden" ordering: red above green, and blue far below both.
    pub fn is_golden(self) -> bool {
        self.r > self.g && self.g > self.b && self.g - self.b >= 40
    }
}

/// Layout size of a surface's container in logical pixels.
///
/// Non-finite or negative inputs are stored as zero; a zero-size surface is a normal state
/// (not yet laid out, or hidden).
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct LayoutSize {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl LayoutSize {
    /// Create a sanitized layout size.
    pub fn new(width: f64, height: f64) -> Self {
        fn sane(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 { v } else { 0.0 }
        }
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    /// Area in square logical pixels.
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Return `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Centre point of the surface.
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Logical and backing-store dimensions of one drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    /// Size the simulation works in.
    pub logical: LayoutSize,
    /// Effective pixel ratio after capping.
    pub pixel_ratio: f64,
    /// Backing-store width in device pixels.
    pub backing_width: u32,
    /// Backing-store height in device pixels.
    pub backing_height: u32,
}

impl SurfaceGeometry {
    /// Compute the backing resolution for `logical` at `device_pixel_ratio`, capped at `max_ratio`.
    ///
    /// Invalid ratios fall back to 1.0.
    pub fn new(logical: LayoutSize, device_pixel_ratio: f64, max_ratio: f64) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let cap = if max_ratio.is_finite() && max_ratio > 0.0 {
            max_ratio
        } else {
            1.0
        };
        let pixel_ratio = ratio.min(cap);
        Self {
            logical,
            pixel_ratio,
            backing_width: (logical.width * pixel_ratio).floor() as u32,
            backing_height: (logical.height * pixel_ratio).floor() as u32,
        }
    }

    /// Geometry with a 1:1 pixel ratio.
    pub fn unscaled(logical: LayoutSize) -> Self {
        Self::new(logical, 1.0, 1.0)
    }
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self::unscaled(LayoutSize::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
