//! Backend-agnostic draw commands.
//!
//! Systems never touch pixels: each tick they fill a [`DrawList`] which a backend (or a test)
//! consumes afterwards. Every constructor clamps opacity into `[0, 1]` and keeps sizes positive,
//! so anything stored in a list is already safe to paint.

use crate::foundation::core::{Point, Rgb8};
use crate::foundation::math::clamp01;

/// Commands fainter than this are not recorded.
pub const MIN_VISIBLE_ALPHA: f64 = 0.005;

/// Smallest radius or stroke width a command may carry.
pub const MIN_EXTENT: f64 = 0.05;

/// One colour stop of a radial glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStop {
    /// Position along the radius, `0.0` at the centre and `1.0` at the rim.
    pub offset: f32,
    /// Stop colour.
    pub color: Rgb8,
    /// Stop opacity.
    pub alpha: f64,
}

impl GlowStop {
    /// Create a stop; offset and alpha are clamped.
    pub fn new(offset: f32, color: Rgb8, alpha: f64) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
            alpha: clamp01(alpha),
        }
    }
}

/// A single paint operation in logical surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Filled disc.
    Circle {
        center: Point,
        radius: f64,
        color: Rgb8,
        alpha: f64,
    },
    /// Disc filled with a radial gradient that fades out towards the rim.
    RadialGlow {
        center: Point,
        radius: f64,
        stops: Vec<GlowStop>,
    },
    /// Round-capped polyline.
    Stroke {
        points: Vec<Point>,
        width: f64,
        color: Rgb8,
        alpha: f64,
    },
    /// Round-capped straight segment.
    Segment {
        from: Point,
        to: Point,
        width: f64,
        color: Rgb8,
        alpha: f64,
    },
}

impl DrawCmd {
    /// Every opacity value this command paints with.
    pub fn alphas(&self) -> Vec<f64> {
        match self {
            DrawCmd::Circle { alpha, .. }
            | DrawCmd::Stroke { alpha, .. }
            | DrawCmd::Segment { alpha, .. } => vec![*alpha],
            DrawCmd::RadialGlow { stops, .. } => stops.iter().map(|s| s.alpha).collect(),
        }
    }
}

/// Ordered commands for one surface and one tick; earlier commands paint underneath later ones.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.cmds.iter()
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Record a filled disc.
    pub fn circle(&mut self, center: Point, radius: f64, color: Rgb8, alpha: f64) {
        let alpha = clamp01(alpha);
        if alpha < MIN_VISIBLE_ALPHA || !finite_point(center) {
            return;
        }
        self.cmds.push(DrawCmd::Circle {
            center,
            radius: extent(radius),
            color,
            alpha,
        });
    }

    /// Record a radial glow. Skipped when every stop is invisible.
    pub fn glow(&mut self, center: Point, radius: f64, stops: &[GlowStop]) {
        if stops.is_empty()
            || !finite_point(center)
            || stops.iter().all(|s| s.alpha < MIN_VISIBLE_ALPHA)
        {
            return;
        }
        self.cmds.push(DrawCmd::RadialGlow {
            center,
            radius: extent(radius),
            stops: stops.to_vec(),
        });
    }

    /// Record a polyline. Needs at least two points.
    pub fn stroke(&mut self, points: Vec<Point>, width: f64, color: Rgb8, alpha: f64) {
        let alpha = clamp01(alpha);
        if alpha < MIN_VISIBLE_ALPHA
            || points.len() < 2
            || !points.iter().copied().all(finite_point)
        {
            return;
        }
        self.cmds.push(DrawCmd::Stroke {
            points,
            width: extent(width),
            color,
            alpha,
        });
    }

    /// Record a straight segment.
    pub fn segment(&mut self, from: Point, to: Point, width: f64, color: Rgb8, alpha: f64) {
        let alpha = clamp01(alpha);
        if alpha < MIN_VISIBLE_ALPHA || !finite_point(from) || !finite_point(to) {
            return;
        }
        self.cmds.push(DrawCmd::Segment {
            from,
            to,
            width: extent(width),
            color,
            alpha,
        });
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCmd;
    type IntoIter = std::slice::Iter<'a, DrawCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

fn extent(v: f64) -> f64 {
    if v.is_finite() { v.max(MIN_EXTENT) } else { MIN_EXTENT }
}

fn finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
