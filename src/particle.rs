//! Particle records and the store that owns them.
//!
//! A store holds exactly one *generation* of particles. Every resize throws
//! the generation away and lays out a fresh one; nothing carries over.

use glam::Vec2;
use rand::Rng;

use crate::config::SpawnConfig;
use crate::visuals::{random_palette_color, Color};

/// A single point in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Index within its generation.
    pub id: u32,
    pub position: Vec2,
    /// Spawn position the return spring pulls toward.
    pub anchor: Vec2,
    pub velocity: Vec2,
    /// Radius in pixels.
    pub size: f32,
    pub opacity: f32,
    pub color: Color,
}

/// Width and height of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// Create a size, treating negative or non-finite extents as zero.
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }
}

impl From<(u32, u32)> for SurfaceSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}

/// Number of particles a surface of the given size holds.
///
/// One particle per `area_per_particle` square pixels, rounded down.
pub fn particle_count(size: SurfaceSize, area_per_particle: f32) -> usize {
    if size.is_empty() || !(area_per_particle > 0.0) {
        return 0;
    }
    // f64 keeps the floor exact for large surfaces.
    (size.width as f64 * size.height as f64 / area_per_particle as f64).floor() as usize
}

/// Lay out a fresh generation of particles.
pub fn generate<R: Rng>(size: SurfaceSize, spawn: &SpawnConfig, rng: &mut R) -> Vec<Particle> {
    let count = particle_count(size, spawn.area_per_particle);

    (0..count)
        .map(|i| {
            let position = Vec2::new(rng.gen::<f32>() * size.width, rng.gen::<f32>() * size.height);
            Particle {
                id: i as u32,
                position,
                anchor: position,
                velocity: Vec2::ZERO,
                size: spawn.min_size + rng.gen::<f32>() * (spawn.max_size - spawn.min_size),
                opacity: spawn.min_opacity
                    + rng.gen::<f32>() * (spawn.max_opacity - spawn.min_opacity),
                color: random_palette_color(rng),
            }
        })
        .collect()
}

/// Owner of the current particle generation.
#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    size: SurfaceSize,
    generation: u64,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole particle set with a new layout for `size`.
    pub fn regenerate<R: Rng>(&mut self, size: SurfaceSize, spawn: &SpawnConfig, rng: &mut R) {
        self.particles = generate(size, spawn, rng);
        self.size = size;
        self.generation += 1;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Surface the current generation was laid out for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Incremented on every regeneration; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::visuals::PALETTE;

    #[test]
    fn test_particle_count_formula() {
        assert_eq!(particle_count(SurfaceSize::new(600.0, 500.0), 6000.0), 50);
        assert_eq!(particle_count(SurfaceSize::new(1920.0, 1080.0), 6000.0), 345);
        assert_eq!(particle_count(SurfaceSize::new(77.0, 77.0), 6000.0), 0);
        assert_eq!(particle_count(SurfaceSize::new(0.0, 500.0), 6000.0), 0);
    }

    #[test]
    fn test_surface_size_sanitizes() {
        assert_eq!(SurfaceSize::new(-5.0, f32::NAN), SurfaceSize::new(0.0, 0.0));
        assert!(SurfaceSize::new(f32::INFINITY, 10.0).is_empty());
        assert_eq!(SurfaceSize::new(800.0, 600.0).center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_generate_spawn_bounds() {
        let mut rng = SmallRng::seed_from_u64(42);
        let size = SurfaceSize::new(640.0, 480.0);
        let particles = generate(size, &SpawnConfig::default(), &mut rng);

        assert_eq!(particles.len(), 51);
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.id, i as u32);
            assert!(p.position.x >= 0.0 && p.position.x <= size.width);
            assert!(p.position.y >= 0.0 && p.position.y <= size.height);
            assert!(p.size >= 0.5 && p.size <= 2.5);
            assert!(p.opacity >= 0.2 && p.opacity <= 1.0);
            assert!(PALETTE.contains(&p.color));
            assert_eq!(p.anchor, p.position);
            assert_eq!(p.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_generate_is_reproducible_with_seed() {
        let size = SurfaceSize::new(300.0, 200.0);
        let a = generate(size, &SpawnConfig::default(), &mut SmallRng::seed_from_u64(9));
        let b = generate(size, &SpawnConfig::default(), &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_regenerate_replaces_everything() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut store = ParticleStore::new();
        assert_eq!(store.generation(), 0);

        store.regenerate(SurfaceSize::new(600.0, 500.0), &SpawnConfig::default(), &mut rng);
        assert_eq!(store.len(), 50);
        assert_eq!(store.generation(), 1);
        let first: Vec<Vec2> = store.particles().iter().map(|p| p.anchor).collect();

        store.regenerate(SurfaceSize::new(1200.0, 500.0), &SpawnConfig::default(), &mut rng);
        assert_eq!(store.len(), 100);
        assert_eq!(store.generation(), 2);
        assert_eq!(store.size(), SurfaceSize::new(1200.0, 500.0));
        let second: Vec<Vec2> = store.particles()[..50].iter().map(|p| p.anchor).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_zero_area_store_is_empty() {
        let mut store = ParticleStore::new();
        let mut rng = SmallRng::seed_from_u64(3);
        store.regenerate(SurfaceSize::new(0.0, 0.0), &SpawnConfig::default(), &mut rng);
        assert!(store.is_empty());
    }
}
