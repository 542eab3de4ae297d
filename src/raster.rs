//! Software rasterizer implementing [`DrawSurface`].
//!
//! Draws into an RGBA8 [`image::RgbaImage`] with source-over blending in
//! sRGB space, which is what a browser 2D canvas does. Circles get one pixel
//! of edge antialiasing and an optional quadratic-falloff halo; lines use
//! Wu-style coverage split across the two nearest pixels.

use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::error::CaptureError;
use crate::render::DrawSurface;
use crate::visuals::Color;

/// Halo brightness relative to the disc it surrounds.
const GLOW_INTENSITY: f32 = 0.5;

/// A CPU-side pixel surface.
pub struct Canvas {
    image: RgbaImage,
    background: Rgba<u8>,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            background: Rgba([0, 0, 0, 0]),
        }
    }

    /// Paint an opaque background on every clear instead of transparency.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Rgba([color.r, color.g, color.b, 255]);
        self.image.pixels_mut().for_each(|p| *p = self.background);
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Reallocate for a new size, cleared to the background.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != self.image.dimensions() {
            self.image = RgbaImage::from_pixel(width, height, self.background);
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major, for uploading to a texture.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Encode the current contents as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst.0[3] as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }

        for (channel, src) in dst.0[..3].iter_mut().zip(color.channels()) {
            let blended = (src as f32 * alpha + *channel as f32 * dst_a * (1.0 - alpha)) / out_a;
            *channel = blended.round().clamp(0.0, 255.0) as u8;
        }
        dst.0[3] = (out_a * 255.0).round() as u8;
    }
}

impl DrawSurface for Canvas {
    fn clear(&mut self) {
        let background = self.background;
        self.image.pixels_mut().for_each(|p| *p = background);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32) {
        if !(radius > 0.0) || !(alpha > 0.0) || !center.is_finite() {
            return;
        }

        let reach = radius + glow.max(0.0) + 1.0;
        let min_x = (center.x - reach).floor() as i64;
        let max_x = (center.x + reach).ceil() as i64;
        let min_y = (center.y - reach).floor() as i64;
        let max_y = (center.y + reach).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = pixel_center.distance(center);

                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                let halo = if glow > 0.0 && distance > radius - 0.5 {
                    let t = (1.0 - (distance - radius) / glow).clamp(0.0, 1.0);
                    t * t * GLOW_INTENSITY
                } else {
                    0.0
                };

                let intensity = coverage.max(halo);
                if intensity > 0.0 {
                    self.blend(x, y, color, alpha * intensity);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32, width: f32) {
        if !(alpha > 0.0) || !from.is_finite() || !to.is_finite() {
            return;
        }
        // Sub-pixel widths draw a 1px line at proportionally lower alpha.
        let alpha = alpha * width.clamp(0.0, 1.0);
        let thickness = width.max(1.0);

        let delta = to - from;
        let steep = delta.y.abs() > delta.x.abs();
        // Walk along the major axis one pixel at a time.
        let (a, b) = if steep {
            (Vec2::new(from.y, from.x), Vec2::new(to.y, to.x))
        } else {
            (from, to)
        };
        let (a, b) = if a.x > b.x { (b, a) } else { (a, b) };

        let run = b.x - a.x;
        let gradient = if run.abs() < f32::EPSILON { 0.0 } else { (b.y - a.y) / run };
        let half = (thickness - 1.0) * 0.5;

        let start = a.x.floor() as i64;
        let end = b.x.ceil() as i64;
        for major in start..=end {
            let sample = (major as f32 + 0.5).clamp(a.x, b.x);
            let minor = a.y + gradient * (sample - a.x) - 0.5;
            let base = minor.floor();
            let frac = minor - base;

            let lo = (base - half.ceil()) as i64;
            let hi = (base + 1.0 + half.ceil()) as i64;
            for m in lo..=hi {
                let weight = if m == lo {
                    1.0 - frac
                } else if m == hi {
                    frac
                } else {
                    1.0
                };
                let (px, py) = if steep { (m, major) } else { (major, m) };
                self.blend(px, py, color, alpha * weight);
            }
        }
    }
}
