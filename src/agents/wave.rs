use std::f64::consts::TAU;

use super::{Agent, Tick};
use crate::config::{RibbonParams, WaveParams};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point};
use crate::foundation::math::clamp01;

/// One sinusoidal light ribbon spanning the full surface width.
#[derive(Clone, Debug)]
pub struct Ribbon {
    shape: RibbonParams,
    phase: f64,
    intensity: f64,
    bounds: LayoutSize,
    step: f64,
}

impl Ribbon {
    pub fn new(shape: RibbonParams, bounds: LayoutSize, intensity: f64, step: f64) -> Self {
        Self {
            phase: shape.phase.rem_euclid(TAU),
            shape,
            intensity: clamp01(intensity),
            bounds,
            step: if step.is_finite() && step > 0.0 { step } else { 1.0 },
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Vertical position of the ribbon at `x`.
    pub fn y_at(&self, x: f64) -> f64 {
        let h = self.bounds.height;
        let swing = (x * self.shape.frequency + self.phase).sin();
        self.shape.center * h + swing * self.shape.amplitude * h
    }

    /// Sample points left to right, always ending exactly at the right edge.
    pub fn samples(&self) -> Vec<Point> {
        let width = self.bounds.width;
        if width.is_nan() || width <= 0.0 {
            return Vec::new();
        }
        let n = (width / self.step).ceil() as usize;
        let mut pts = Vec::with_capacity(n + 1);
        for i in 0..n {
            let x = i as f64 * self.step;
            pts.push(Point::new(x, self.y_at(x)));
        }
        pts.push(Point::new(width, self.y_at(width)));
        pts
    }
}

/// Sampling step for a surface of `width`: coarser on wider surfaces.
pub fn sample_step(params: &WaveParams, width: f64) -> f64 {
    if width <= params.medium_width {
        params.step_narrow
    } else if width <= params.wide_width {
        params.step_medium
    } else {
        params.step_wide
    }
}

impl Agent for Ribbon {
    type Params = WaveParams;

    fn update(&mut self, tick: &Tick<'_, WaveParams>) {
        self.phase = (self.phase + self.shape.speed * tick.scale).rem_euclid(TAU);
    }

    fn draw(&self, params: &WaveParams, out: &mut DrawList) {
        let pts = self.samples();
        if pts.len() < 2 {
            return;
        }
        out.stroke(
            pts.clone(),
            params.glow_width,
            self.shape.color,
            self.shape.glow_alpha * self.intensity,
        );
        out.stroke(
            pts,
            params.core_width,
            self.shape.color,
            self.shape.core_alpha * self.intensity,
        );
    }

    fn opacity(&self) -> f64 {
        clamp01(self.shape.core_alpha * self.intensity)
    }
}
