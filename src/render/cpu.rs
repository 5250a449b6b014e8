use std::collections::HashMap;
use std::sync::Arc;

use kurbo::{PathEl, Shape};

use crate::draw::{DrawCmd, DrawList, GlowStop};
use crate::foundation::core::{Point, Rgb8, SurfaceGeometry};
use crate::foundation::error::{AurumError, AurumResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};

/// Flattening tolerance in logical pixels.
const TOLERANCE: f64 = 0.1;

/// Glow sprites are rasterized at one of these edge lengths and scaled into place.
const MIN_SPRITE: u32 = 4;
const MAX_SPRITE: u32 = 256;

/// Sprite cache entries kept before the cache is flushed.
const SPRITE_CACHE_LIMIT: usize = 1024;

/// Software rasterizer for [`DrawList`]s, built on `vello_cpu`.
///
/// Draw lists are in logical pixels; the rasterizer scales them by the surface pixel ratio.
pub struct CpuRasterizer {
    settings: RenderSettings,
    sprite_cache: HashMap<SpriteKey, vello_cpu::Image>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SpriteKey {
    size: u32,
    /// `(offset * 1000, straight rgba)` with alpha normalized to the brightest stop.
    stops: Vec<(u16, [u8; 4])>,
}

impl CpuRasterizer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            sprite_cache: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Number of cached glow sprites.
    pub fn cached_sprites(&self) -> usize {
        self.sprite_cache.len()
    }

    fn draw_cmd(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: vello_cpu::kurbo::Affine,
        pixel_ratio: f64,
        cmd: &DrawCmd,
    ) -> AurumResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(base);

        match cmd {
            DrawCmd::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.set_paint(solid(*color, *alpha));
                let disc = kurbo::Circle::new(*center, *radius);
                ctx.fill_path(&els_to_cpu(disc.path_elements(TOLERANCE)));
            }
            DrawCmd::Stroke {
                points,
                width,
                color,
                alpha,
            } => {
                ctx.set_paint(solid(*color, *alpha));
                ctx.fill_path(&stroke_outline(points, *width));
            }
            DrawCmd::Segment {
                from,
                to,
                width,
                color,
                alpha,
            } => {
                ctx.set_paint(solid(*color, *alpha));
                ctx.fill_path(&stroke_outline(&[*from, *to], *width));
            }
            DrawCmd::RadialGlow {
                center,
                radius,
                stops,
            } => {
                let peak = stops.iter().fold(0.0f64, |m, s| m.max(s.alpha));
                if peak <= 0.0 {
                    return Ok(());
                }
                let size = sprite_size(*radius * pixel_ratio);
                let key = SpriteKey::new(stops, peak, size);
                let sprite = self.sprite_for(key)?;

                let side = f64::from(size);
                let placement = vello_cpu::kurbo::Affine::translate((
                    center.x - radius,
                    center.y - radius,
                )) * vello_cpu::kurbo::Affine::scale(2.0 * radius / side);
                ctx.set_transform(base * placement);
                ctx.set_paint(sprite);

                if peak < 1.0 {
                    ctx.push_opacity_layer(peak as f32);
                }
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, side, side));
                if peak < 1.0 {
                    ctx.pop_layer();
                }
            }
        }
        Ok(())
    }

    fn sprite_for(&mut self, key: SpriteKey) -> AurumResult<vello_cpu::Image> {
        if let Some(img) = self.sprite_cache.get(&key).cloned() {
            return Ok(img);
        }
        if self.sprite_cache.len() >= SPRITE_CACHE_LIMIT {
            tracing::debug!(entries = self.sprite_cache.len(), "flushing glow sprite cache");
            self.sprite_cache.clear();
        }
        let img = rasterize_glow(&key)?;
        self.sprite_cache.insert(key, img.clone());
        Ok(img)
    }
}

impl RenderBackend for CpuRasterizer {
    #[tracing::instrument(skip_all, fields(cmds = list.len()))]
    fn render(&mut self, list: &DrawList, geometry: &SurfaceGeometry) -> AurumResult<FrameRGBA> {
        let (width, height) = (geometry.backing_width, geometry.backing_height);
        if width == 0 || height == 0 {
            return Ok(FrameRGBA::transparent(width, height));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| AurumError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| AurumError::render("surface height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }
        let base = vello_cpu::kurbo::Affine::scale(geometry.pixel_ratio);
        for cmd in list {
            self.draw_cmd(&mut ctx, base, geometry.pixel_ratio, cmd)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl SpriteKey {
    fn new(stops: &[GlowStop], peak: f64, size: u32) -> Self {
        let mut stops: Vec<(u16, [u8; 4])> = stops
            .iter()
            .map(|s| {
                let a = (s.alpha / peak * 255.0).round().clamp(0.0, 255.0) as u8;
                let offset = (s.offset * 1000.0).round() as u16;
                (offset, [s.color.r, s.color.g, s.color.b, a])
            })
            .collect();
        stops.sort_by_key(|(offset, _)| *offset);
        Self { size, stops }
    }

    /// Straight RGBA at normalized radius `t`.
    fn sample(&self, t: f64) -> [u8; 4] {
        let pos = (t * 1000.0).clamp(0.0, 1000.0);
        let Some(&(first_at, first)) = self.stops.first() else {
            return [0; 4];
        };
        if pos <= f64::from(first_at) {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (a_at, a) = pair[0];
            let (b_at, b) = pair[1];
            if pos <= f64::from(b_at) {
                let span = f64::from(b_at) - f64::from(a_at);
                let f = if span <= 0.0 {
                    1.0
                } else {
                    (pos - f64::from(a_at)) / span
                };
                let mix = |x: u8, y: u8| -> u8 {
                    (f64::from(x) + (f64::from(y) - f64::from(x)) * f).round() as u8
                };
                return [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), mix(a[3], b[3])];
            }
        }
        self.stops.last().map(|(_, c)| *c).unwrap_or([0; 4])
    }
}

fn rasterize_glow(key: &SpriteKey) -> AurumResult<vello_cpu::Image> {
    let size = key.size;
    let half = f64::from(size) * 0.5;
    let mut bytes = vec![0u8; (size as usize) * (size as usize) * 4];
    for y in 0..size {
        for x in 0..size {
            let dx = f64::from(x) + 0.5 - half;
            let dy = f64::from(y) + 0.5 - half;
            let t = dx.hypot(dy) / half;
            if t > 1.0 {
                continue;
            }
            let idx = ((y as usize) * (size as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&premul_rgba8(key.sample(t)));
        }
    }
    rgba_premul_to_image(&bytes, size, size)
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> AurumResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AurumError::render("sprite width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AurumError::render("sprite height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(AurumError::render("sprite byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Sprite edge for a glow of `radius_px` device pixels: the next power of two of its diameter.
fn sprite_size(radius_px: f64) -> u32 {
    let diameter = (2.0 * radius_px).ceil();
    let diameter = if diameter.is_finite() { diameter as u32 } else { MAX_SPRITE };
    diameter.clamp(MIN_SPRITE, MAX_SPRITE).next_power_of_two()
}

fn solid(color: Rgb8, alpha: f64) -> vello_cpu::peniko::Color {
    let a = (alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, a)
}

fn stroke_outline(points: &[Point], width: f64) -> vello_cpu::kurbo::BezPath {
    let mut line = kurbo::BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        line.move_to(*first);
        for p in it {
            line.line_to(*p);
        }
    }
    let style = kurbo::Stroke::new(width)
        .with_caps(kurbo::Cap::Round)
        .with_join(kurbo::Join::Round);
    let outline = kurbo::stroke(line.iter(), &style, &kurbo::StrokeOpts::default(), TOLERANCE);
    els_to_cpu(outline.iter())
}

fn els_to_cpu(els: impl IntoIterator<Item = PathEl>) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in els {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3))
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
