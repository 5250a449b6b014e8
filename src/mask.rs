//! Home points for spring fields, sampled from an alpha mask (for example a rendered logo).

use crate::foundation::core::{LayoutSize, Point, Vec2};
use crate::foundation::error::{AurumError, AurumResult};

/// Alpha values must exceed this to yield a target.
pub const DEFAULT_THRESHOLD: u8 = 100;

/// Largest share of either surface dimension a fitted mask may cover.
pub const MASK_FIT: f64 = 0.8;

/// Scan a row-major alpha mask on a `step`-pixel grid and return every grid point whose alpha
/// exceeds `threshold`, top row first.
pub fn sample_mask_targets(
    alpha: &[u8],
    width: u32,
    height: u32,
    step: u32,
    threshold: u8,
) -> AurumResult<Vec<Point>> {
    if step == 0 {
        return Err(AurumError::validation("mask sampling step must be > 0"));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| AurumError::validation("mask dimensions overflow"))?;
    if alpha.len() < expected {
        return Err(AurumError::validation(format!(
            "mask has {} alpha values, expected {expected} for {width}x{height}",
            alpha.len()
        )));
    }

    let mut targets = Vec::new();
    for y in (0..height).step_by(step as usize) {
        let row = y as usize * width as usize;
        for x in (0..width).step_by(step as usize) {
            if alpha[row + x as usize] > threshold {
                targets.push(Point::new(f64::from(x), f64::from(y)));
            }
        }
    }
    Ok(targets)
}

/// Fit `mask` centred inside `layout` (aspect preserved) and sample its alpha channel.
///
/// Returned points are in surface coordinates.
pub fn targets_from_image(
    mask: &image::DynamicImage,
    layout: LayoutSize,
    step: u32,
    threshold: u8,
) -> AurumResult<Vec<Point>> {
    let (mw, mh) = (mask.width(), mask.height());
    if layout.is_empty() || mw == 0 || mh == 0 {
        return Ok(Vec::new());
    }
    let scale =
        (layout.width * MASK_FIT / f64::from(mw)).min(layout.height * MASK_FIT / f64::from(mh));
    let fw = ((f64::from(mw) * scale).round() as u32).max(1);
    let fh = ((f64::from(mh) * scale).round() as u32).max(1);
    let fitted = mask
        .resize_exact(fw, fh, image::imageops::FilterType::Triangle)
        .to_rgba8();

    let offset = Vec2::new(
        ((layout.width - f64::from(fw)) * 0.5).floor(),
        ((layout.height - f64::from(fh)) * 0.5).floor(),
    );
    let targets = sample_mask_targets(&alpha_channel(fitted.as_raw()), fw, fh, step, threshold)?;
    Ok(targets.into_iter().map(|p| p + offset).collect())
}

/// Alpha channel of an RGBA8 buffer.
pub fn alpha_channel(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4).map(|px| px[3]).collect()
}
