//! Colour distributions agents sample from at spawn.

use crate::foundation::core::Rgb8;
use crate::foundation::math::Rng64;

/// Minimum green-to-blue distance a golden colour keeps.
const GOLD_BLUE_GAP: u8 = 40;

/// Half-open per-channel ranges `[lo, hi)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorRange {
    /// Red range.
    pub r: [u8; 2],
    /// Green range.
    pub g: [u8; 2],
    /// Blue range.
    pub b: [u8; 2],
}

impl ColorRange {
    /// Build from `(lo, hi)` pairs.
    pub const fn new(r: [u8; 2], g: [u8; 2], b: [u8; 2]) -> Self {
        Self { r, g, b }
    }

    /// Sample each channel independently.
    pub fn sample(&self, rng: &mut Rng64) -> Rgb8 {
        Rgb8::new(
            channel(self.r, rng),
            channel(self.g, rng),
            channel(self.b, rng),
        )
    }

    /// Sample a warm gold: red above green, blue well below green.
    ///
    /// Ranges that overlap are resolved by capping the lower channel.
    pub fn sample_gold(&self, rng: &mut Rng64) -> Rgb8 {
        let r = channel(self.r, rng).max(GOLD_BLUE_GAP + 2);
        let g = channel(self.g, rng).min(r - 1).max(GOLD_BLUE_GAP + 1);
        let b = channel(self.b, rng).min(g - GOLD_BLUE_GAP);
        Rgb8::new(r, g, b)
    }

    pub(crate) fn is_ordered(&self) -> bool {
        self.r[0] <= self.r[1] && self.g[0] <= self.g[1] && self.b[0] <= self.b[1]
    }
}

fn channel([lo, hi]: [u8; 2], rng: &mut Rng64) -> u8 {
    if hi <= lo {
        return lo;
    }
    let span = f64::from(hi - lo);
    lo + (rng.next_f64() * span).floor() as u8
}

/// Cool white with a slight blue lift: `(v, v, min(255, v + lift))`.
pub fn sample_cool_white(range: [u8; 2], blue_lift: u8, rng: &mut Rng64) -> Rgb8 {
    let v = channel(range, rng);
    Rgb8::new(v, v, v.saturating_add(blue_lift))
}
