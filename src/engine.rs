//! Surface registry: one system per logical role, driven by the host's frame loop.
//!
//! Lifecycle is `new → resize* → animate* → dispose`. The host owns the [`Engine`] and passes it
//! around explicitly; nothing here is global.

use crate::config::{Density, EngineConfig, SurfaceStyle};
use crate::draw::DrawList;
use crate::foundation::core::{LayoutSize, Point, SurfaceGeometry};
use crate::foundation::error::{AurumError, AurumResult};
use crate::foundation::math::{Fnv1a64, mix_seed};
use crate::foundation::time::TimeStep;
use crate::render::{FrameRGBA, RenderBackend};
use crate::systems::{ParticleSystem, build_system};

/// Logical slot a drawing surface fills on the page.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hero,
    Services,
    /// Decorative section backgrounds, numbered in page order.
    Background(u32),
}

impl Role {
    /// Stable per-role salt for the engine seed.
    fn salt(self) -> u64 {
        let mut h = Fnv1a64::new_default();
        match self {
            Self::Hero => h.write_u8(1),
            Self::Services => h.write_u8(2),
            Self::Background(i) => {
                h.write_u8(3);
                h.write_u32(i);
            }
        }
        h.finish()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hero => f.write_str("hero"),
            Self::Services => f.write_str("services"),
            Self::Background(i) => write!(f, "background-{i}"),
        }
    }
}

/// A surface present on the page at resize time.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceDesc {
    pub role: Role,
    /// Container layout size in logical pixels.
    pub layout: LayoutSize,
    /// Device pixel ratio; capped by [`EngineConfig::max_pixel_ratio`].
    pub pixel_ratio: f64,
    pub style: SurfaceStyle,
    pub density: Density,
    /// Home points for spring fields; ignored by other styles.
    pub targets: Option<Vec<Point>>,
}

impl SurfaceDesc {
    pub fn new(role: Role, layout: LayoutSize) -> Self {
        Self {
            role,
            layout,
            pixel_ratio: 1.0,
            style: SurfaceStyle::FALLBACK,
            density: Density::FALLBACK,
            targets: None,
        }
    }

    /// Resolve the container's style and density tags.
    pub fn from_tags(role: Role, layout: LayoutSize, style: &str, density: &str) -> Self {
        Self::new(role, layout)
            .with_style(SurfaceStyle::from_tag(style))
            .with_density(Density::from_tag(density))
    }

    pub fn with_style(mut self, style: SurfaceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn with_targets(mut self, targets: Vec<Point>) -> Self {
        self.targets = Some(targets);
        self
    }
}

struct Entry {
    role: Role,
    system: Box<dyn ParticleSystem>,
    draw: DrawList,
}

/// Explicit registry of the systems animating a page's surfaces.
pub struct Engine {
    cfg: EngineConfig,
    entries: Vec<Entry>,
}

impl Engine {
    /// Create an empty engine. Fails when `cfg` does not validate.
    pub fn new(cfg: EngineConfig) -> AurumResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            entries: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Reconcile the registry with the surfaces currently on the page and rebuild every
    /// population.
    ///
    /// A role whose style and density are unchanged keeps its system; anything else gets a fresh
    /// one. Roles missing from `surfaces` are dropped. With `reduced_motion` set every population
    /// is built empty.
    #[tracing::instrument(
        skip_all,
        fields(surfaces = surfaces.len(), reduced_motion = reduced_motion)
    )]
    pub fn resize(&mut self, surfaces: &[SurfaceDesc], reduced_motion: bool) {
        let mut previous = std::mem::take(&mut self.entries);

        for desc in surfaces {
            if self.entries.iter().any(|e| e.role == desc.role) {
                tracing::warn!(role = %desc.role, "duplicate surface role, keeping the first");
                continue;
            }

            let kept = previous
                .iter()
                .position(|e| e.role == desc.role)
                .map(|i| previous.swap_remove(i));
            let mut entry = match kept {
                Some(e) if e.system.style() == desc.style && e.system.density() == desc.density => {
                    e
                }
                Some(e) => {
                    tracing::info!(
                        role = %desc.role,
                        from = %e.system.style(),
                        to = %desc.style,
                        density = desc.density.tag(),
                        "replacing surface system"
                    );
                    self.spawn(desc)
                }
                None => self.spawn(desc),
            };

            let geometry =
                SurfaceGeometry::new(desc.layout, desc.pixel_ratio, self.cfg.max_pixel_ratio);
            entry.system.set_targets(desc.targets.as_deref());
            entry.system.resize(geometry, reduced_motion);
            entry.draw.clear();

            tracing::debug!(
                role = %entry.role,
                style = %desc.style,
                density = desc.density.tag(),
                width = geometry.logical.width,
                height = geometry.logical.height,
                backing_width = geometry.backing_width,
                backing_height = geometry.backing_height,
                population = entry.system.population(),
                "surface ready"
            );
            self.entries.push(entry);
        }

        for gone in previous {
            tracing::debug!(role = %gone.role, "surface removed");
        }
    }

    /// Advance every registered system by one tick of `elapsed_ms`, in registration order.
    pub fn animate(&mut self, elapsed_ms: f64) {
        let step = TimeStep::with_limits(
            elapsed_ms,
            self.cfg.nominal_frame_ms,
            self.cfg.frame_ceiling_ms,
        );
        for entry in &mut self.entries {
            entry.system.animate(step, &mut entry.draw);
        }
        tracing::trace!(scale = step.scale, surfaces = self.entries.len(), "tick");
    }

    /// Feed surface-local pointer coordinates to `role`.
    ///
    /// Coordinates outside the surface's logical bounds (or non-finite) mean "no pointer".
    /// Returns `false` when the role is not registered.
    pub fn set_pointer(&mut self, role: Role, x: f64, y: f64) -> bool {
        match self.entry_mut(role) {
            Some(entry) => {
                let bounds = entry.system.geometry().logical;
                let inside = x.is_finite()
                    && y.is_finite()
                    && (0.0..=bounds.width).contains(&x)
                    && (0.0..=bounds.height).contains(&y);
                let pointer = inside.then(|| Point::new(x, y));
                entry.system.set_pointer(pointer);
                true
            }
            None => false,
        }
    }

    pub fn clear_pointer(&mut self, role: Role) -> bool {
        match self.entry_mut(role) {
            Some(entry) => {
                entry.system.set_pointer(None);
                true
            }
            None => false,
        }
    }

    /// Paint recorded for `role` by the last [`Engine::animate`].
    pub fn draw_list(&self, role: Role) -> Option<&DrawList> {
        self.entry(role).map(|e| &e.draw)
    }

    pub fn population(&self, role: Role) -> Option<usize> {
        self.entry(role).map(|e| e.system.population())
    }

    pub fn geometry(&self, role: Role) -> Option<SurfaceGeometry> {
        self.entry(role).map(|e| e.system.geometry())
    }

    pub fn style(&self, role: Role) -> Option<SurfaceStyle> {
        self.entry(role).map(|e| e.system.style())
    }

    /// Registered roles in registration order.
    pub fn roles(&self) -> Vec<Role> {
        self.entries.iter().map(|e| e.role).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rasterize the last recorded paint of `role`.
    pub fn render(&self, role: Role, backend: &mut dyn RenderBackend) -> AurumResult<FrameRGBA> {
        let entry = self
            .entry(role)
            .ok_or_else(|| AurumError::config(format!("no surface registered for {role}")))?;
        backend.render(&entry.draw, &entry.system.geometry())
    }

    /// Drop every system.
    pub fn dispose(&mut self) {
        tracing::debug!(surfaces = self.entries.len(), "disposing engine");
        self.entries.clear();
    }

    fn spawn(&self, desc: &SurfaceDesc) -> Entry {
        let seed = mix_seed(self.cfg.seed, desc.role.salt());
        Entry {
            role: desc.role,
            system: build_system(
                desc.style,
                desc.density,
                &self.cfg,
                seed,
                desc.targets.as_deref(),
            ),
            draw: DrawList::new(),
        }
    }

    fn entry(&self, role: Role) -> Option<&Entry> {
        self.entries.iter().find(|e| e.role == role)
    }

    fn entry_mut(&mut self, role: Role) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.role == role)
    }
}
