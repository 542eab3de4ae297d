//! # particle-field
//!
//! A pointer-reactive particle field: a sparse cloud of glowing dots that
//! drift apart from the pointer, spring back home when it leaves, and are
//! joined by faint lines when they sit close together.
//!
//! The simulation is plain CPU code that draws through the [`DrawSurface`]
//! trait, so the same field can render into a software [`Canvas`], a recorded
//! [`Frame`] for inspection, or any surface you implement. A desktop host
//! built on winit and wgpu is included.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_field::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     particle_field::run(FieldConfig::default())
//! }
//! ```
//!
//! ## Driving the field yourself
//!
//! ```ignore
//! use particle_field::prelude::*;
//!
//! let mut canvas = Canvas::new(800, 600).with_background(Color::rgb(10, 10, 18));
//! let mut field = ParticleField::new().with_seed(42);
//! field.mount(SurfaceSize::new(800.0, 600.0))?;
//! let handle = field.start()?;
//!
//! field.pointer_moved(Vec2::new(400.0, 300.0));
//! while handle.is_active() && field.ticks() < 120 {
//!     field.tick(&mut canvas);
//! }
//! canvas.save_png("field.png")?;
//! field.teardown();
//! ```
//!
//! ## Lifecycle
//!
//! A field moves through [`Phase::Uninitialized`] → [`Phase::Initialized`]
//! (mounted on a surface) → [`Phase::Running`] → [`Phase::TornDown`].
//! Ticks outside `Running` are no-ops, and once torn down the [`LoopHandle`]
//! handed out by [`ParticleField::start`] reports inactive so the driver
//! stops scheduling.
//!
//! ## Configuration
//!
//! Every constant of the motion and drawing model lives in [`FieldConfig`],
//! which can be loaded from JSON. The defaults reproduce the classic look.

pub mod config;
pub mod error;
mod gpu;
pub mod input;
pub mod integrator;
pub mod lifecycle;
pub mod particle;
pub mod raster;
pub mod render;
mod simulation;
pub mod time;
pub mod visuals;
mod window;

pub use config::{FieldConfig, ForceConfig, HostConfig, SpawnConfig, StyleConfig};
pub use error::{CaptureError, ConfigError, FieldError, GpuError, SimulationError};
pub use glam::Vec2;
pub use input::{PointerInput, PointerState};
pub use lifecycle::{LoopHandle, Phase};
pub use particle::{Particle, ParticleStore, SurfaceSize};
pub use raster::Canvas;
pub use render::{DrawCommand, DrawSurface, Frame, Renderer};
pub use simulation::ParticleField;
pub use visuals::{Color, PALETTE};
pub use window::run;

pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::error::{FieldError, SimulationError};
    pub use crate::input::{PointerInput, PointerState};
    pub use crate::lifecycle::{LoopHandle, Phase};
    pub use crate::particle::SurfaceSize;
    pub use crate::raster::Canvas;
    pub use crate::render::{DrawSurface, Frame};
    pub use crate::simulation::ParticleField;
    pub use crate::time::Time;
    pub use crate::visuals::{Color, PALETTE};
    pub use crate::Vec2;
}
