//! The particle field simulation object.
//!
//! [`ParticleField`] owns the particle store, the pointer slot, and the
//! renderer, and exposes the host-facing lifecycle: mount, resize, start,
//! tick, teardown. It has no notion of frame scheduling; the host calls
//! [`ParticleField::tick`] once per display refresh.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::error::{ConfigError, FieldError};
use crate::input::PointerState;
use crate::integrator;
use crate::lifecycle::{LoopHandle, Phase};
use crate::particle::{Particle, ParticleStore, SurfaceSize};
use crate::render::{DrawSurface, Frame, Renderer};

/// A pointer-reactive particle field.
///
/// Use method chaining to configure, then drive the lifecycle:
///
/// ```ignore
/// let mut field = ParticleField::new().with_seed(7);
/// field.mount(SurfaceSize::new(800.0, 600.0))?;
/// let handle = field.start()?;
/// while handle.is_active() {
///     field.tick(&mut canvas);
/// }
/// ```
pub struct ParticleField {
    config: FieldConfig,
    store: ParticleStore,
    pointer: PointerState,
    renderer: Renderer,
    rng: SmallRng,
    phase: Phase,
    handle: LoopHandle,
    ticks: u64,
}

impl ParticleField {
    /// Create an unmounted field with default settings.
    pub fn new() -> Self {
        let config = FieldConfig::default();
        Self {
            renderer: Renderer::new(config.style.clone()),
            config,
            store: ParticleStore::new(),
            pointer: PointerState::default(),
            rng: SmallRng::from_entropy(),
            phase: Phase::Uninitialized,
            handle: LoopHandle::new(),
            ticks: 0,
        }
    }

    /// Replace the configuration after validating it.
    pub fn with_config(mut self, config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.renderer = Renderer::new(config.style.clone());
        self.config = config;
        Ok(self)
    }

    /// Seed the layout generator for reproducible particle placement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current generation of particles.
    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Handle to the shared pointer slot, for wiring up an input adapter.
    pub fn pointer(&self) -> PointerState {
        self.pointer.clone()
    }

    /// Surface the field is laid out for.
    pub fn size(&self) -> SurfaceSize {
        self.store.size()
    }

    /// Ticks run since `start`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Attach to a surface: lay out particles and park the pointer at the center.
    pub fn mount(&mut self, size: SurfaceSize) -> Result<(), FieldError> {
        match self.phase {
            Phase::Uninitialized => {}
            Phase::Initialized | Phase::Running => return Err(FieldError::AlreadyMounted),
            Phase::TornDown => return Err(FieldError::TornDown),
        }

        self.store.regenerate(size, &self.config.spawn, &mut self.rng);
        self.pointer.set(size.center());
        self.phase = Phase::Initialized;
        log::info!(
            "Mounted particle field on {}x{} surface with {} particles",
            size.width,
            size.height,
            self.store.len()
        );
        Ok(())
    }

    /// React to the surface changing size.
    ///
    /// A real change discards the current generation and lays out a new one;
    /// the pointer is left where it is. Ignored while unmounted.
    pub fn resize(&mut self, size: SurfaceSize) {
        if !self.phase.is_mounted() {
            log::debug!(
                "Ignoring resize to {}x{} in phase {:?}",
                size.width,
                size.height,
                self.phase
            );
            return;
        }
        if size == self.store.size() {
            return;
        }

        self.store.regenerate(size, &self.config.spawn, &mut self.rng);
        log::debug!(
            "Regenerated {} particles for {}x{} (generation {})",
            self.store.len(),
            size.width,
            size.height,
            self.store.generation()
        );
    }

    /// Begin the tick loop. The returned handle goes inactive on teardown.
    pub fn start(&mut self) -> Result<LoopHandle, FieldError> {
        match self.phase {
            Phase::Initialized => {
                self.phase = Phase::Running;
                self.handle.activate();
                log::debug!("Particle field running");
                Ok(self.handle.clone())
            }
            Phase::Running => Ok(self.handle.clone()),
            Phase::Uninitialized => Err(FieldError::NotMounted),
            Phase::TornDown => Err(FieldError::TornDown),
        }
    }

    /// Pointer moved to surface-local `position`.
    pub fn pointer_moved(&self, position: Vec2) {
        self.pointer.set(position);
    }

    /// Pointer left the surface: park it at the center.
    pub fn pointer_left(&self) {
        self.pointer.set(self.store.size().center());
    }

    /// Advance the physics by one tick without drawing. Returns false outside `Running`.
    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::Running || !self.handle.is_active() {
            return false;
        }

        let pointer = self.pointer.get();
        let bounds = self.store.size();
        integrator::step(self.store.particles_mut(), pointer, bounds, &self.config.forces);
        self.ticks += 1;
        true
    }

    /// Draw the current state without advancing it.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        self.renderer.draw(self.store.particles(), surface);
    }

    /// Run one tick: integrate every particle, then redraw `surface`.
    ///
    /// Returns false, touching neither particles nor surface, unless running.
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.advance() {
            return false;
        }
        self.render(surface);
        true
    }

    /// Run one tick and return its draw calls.
    pub fn tick_frame(&mut self) -> Option<Frame> {
        let mut frame = Frame::new();
        self.tick(&mut frame).then_some(frame)
    }

    /// Detach from the surface and stop the loop. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.handle.cancel();
        self.phase = Phase::TornDown;
        log::info!("Particle field torn down after {} ticks", self.ticks);
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        // Any loop still holding a handle must stop scheduling.
        self.handle.cancel();
    }
}
