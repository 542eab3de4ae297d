//! Render a short pointer sweep without a window and save it as PNG frames.
//!
//! Run with: `cargo run --example headless_frames -- [out_dir] [config.json]`

use std::error::Error;
use std::path::PathBuf;

use particle_field::prelude::*;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;
const FRAMES: u32 = 180;
/// Save every Nth frame.
const SAVE_EVERY: u32 = 15;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "frames".to_string()));
    let config = match args.next() {
        Some(path) => FieldConfig::load(path)?,
        None => FieldConfig::default(),
    };
    std::fs::create_dir_all(&out_dir)?;

    let mut canvas = Canvas::new(WIDTH, HEIGHT).with_background(config.style.background);
    let mut field = ParticleField::new().with_config(config)?.with_seed(2024);
    let size = SurfaceSize::from((WIDTH, HEIGHT));

    field.mount(size)?;
    let handle = field.start()?;

    let mut input = PointerInput::new(field.pointer());
    input.set_region(Vec2::ZERO, size);

    for frame in 0..FRAMES {
        if !handle.is_active() {
            break;
        }

        // Sweep left to right along a gentle wave, then leave the surface.
        if frame < FRAMES * 2 / 3 {
            let t = frame as f32 / (FRAMES * 2 / 3) as f32;
            let x = t * WIDTH as f32;
            let y = HEIGHT as f32 * (0.5 + 0.25 * (t * std::f32::consts::TAU).sin());
            input.moved(Vec2::new(x, y));
        } else if input.is_inside() {
            input.left();
            log::info!("Pointer left at frame {}", frame);
        }

        field.tick(&mut canvas);

        if frame % SAVE_EVERY == 0 {
            let path = out_dir.join(format!("frame-{:04}.png", frame));
            canvas.save_png(&path)?;
            log::info!("Saved {}", path.display());
        }
    }

    field.teardown();
    Ok(())
}
