//! Desktop host: a winit window that drives a [`ParticleField`].
//!
//! The window is the field's surface. Its physical pixel size is the surface
//! size, cursor events feed the pointer slot, and every redraw runs the due
//! ticks, rasterizes into a [`Canvas`] and presents it through wgpu.
//!
//! Keys: `Space` pauses, `S` saves the current frame as PNG, `Escape` quits.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::{ConfigError, SimulationError};
use crate::gpu::GpuState;
use crate::input::PointerInput;
use crate::lifecycle::LoopHandle;
use crate::particle::SurfaceSize;
use crate::raster::Canvas;
use crate::simulation::ParticleField;
use crate::time::Time;

/// Frames between window title refreshes.
const TITLE_INTERVAL: u64 = 30;

struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    canvas: Canvas,
    field: ParticleField,
    input: PointerInput,
    time: Time,
    handle: Option<LoopHandle>,
    /// First fatal error raised inside the event loop.
    error: Option<SimulationError>,
}

impl App {
    fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        let field = ParticleField::new().with_config(config.clone())?;
        let input = PointerInput::new(field.pointer());
        Ok(Self {
            canvas: Canvas::new(0, 0).with_background(config.style.background),
            time: Time::new().with_tick_rate(config.host.tick_rate),
            window: None,
            gpu: None,
            field,
            input,
            handle: None,
            error: None,
            config,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let host = &self.config.host;
        let window_attrs = Window::default_attributes()
            .with_title(host.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(host.width, host.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone(), self.config.style.background))?;

        let PhysicalSize { width, height } = window.inner_size();
        let size = SurfaceSize::from((width, height));
        self.canvas.resize(width, height);
        self.input.set_region(Vec2::ZERO, size);

        self.field.mount(size)?;
        self.handle = Some(self.field.start()?);

        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Minimized windows report zero; keep the last layout until restored.
        if width == 0 || height == 0 {
            return;
        }
        let size = SurfaceSize::from((width, height));
        self.field.resize(size);
        self.canvas.resize(width, height);
        self.input.set_region(Vec2::ZERO, size);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
    }

    fn key_pressed(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Space) => {
                self.time.toggle_pause();
                log::info!("{}", if self.time.is_paused() { "Paused" } else { "Resumed" });
            }
            PhysicalKey::Code(KeyCode::KeyS) => self.capture(),
            PhysicalKey::Code(KeyCode::Escape) => self.shutdown(event_loop),
            _ => {}
        }
    }

    fn capture(&self) {
        let path = format!("frame-{:06}.png", self.field.ticks());
        match self.canvas.save_png(&path) {
            Ok(()) => log::info!("Saved {}", path),
            Err(e) => log::warn!("{}", e),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.field.teardown();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.handle.as_ref().is_some_and(LoopHandle::is_active) {
            return;
        }

        self.time.update();
        for _ in 0..self.time.ticks_due() {
            self.field.advance();
        }
        self.field.render(&mut self.canvas);

        if let Some(gpu) = &mut self.gpu {
            gpu.upload(&self.canvas);
            match gpu.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu.resize(gpu.config.width, gpu.config.height)
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    self.field.teardown();
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            if self.time.frame() % TITLE_INTERVAL == 0 {
                window.set_title(&format!(
                    "{} - {} particles - {:.0} FPS",
                    self.config.host.title,
                    self.field.particles().len(),
                    self.time.fps()
                ));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            self.field.teardown();
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.input.handle_event(&event) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => self.key_pressed(event_loop, &event),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open a window and run the field until it is closed.
pub fn run(config: FieldConfig) -> Result<(), SimulationError> {
    let mut app = App::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
