//! Per-tick force integration.
//!
//! Each particle independently:
//!
//! 1. measures its distance to the pointer;
//! 2. inside the interaction radius, is pushed straight away from the pointer
//!    with linear falloff and brightens/grows with proximity;
//!    otherwise it is pulled back toward its anchor and fades/shrinks;
//! 3. has its velocity damped, then integrated into its position;
//! 4. bounces off the surface edges, losing energy, and is clamped inside.
//!
//! The step is per-tick rather than per-second: damping below 1 keeps it
//! stable whatever the frame interval.

use glam::Vec2;

use crate::config::ForceConfig;
use crate::particle::{Particle, SurfaceSize};

/// Repulsion strength at `distance` from the pointer.
///
/// Falls linearly from 1 at the pointer to 0 at `radius` and stays 0 beyond.
#[inline]
pub fn falloff(distance: f32, radius: f32) -> f32 {
    ((radius - distance) / radius).max(0.0)
}

/// Advance every particle by one tick.
pub fn step(particles: &mut [Particle], pointer: Vec2, bounds: SurfaceSize, forces: &ForceConfig) {
    for particle in particles.iter_mut() {
        step_particle(particle, pointer, bounds, forces);
    }
}

/// Advance a single particle by one tick.
pub fn step_particle(p: &mut Particle, pointer: Vec2, bounds: SurfaceSize, forces: &ForceConfig) {
    let offset = p.position - pointer;
    let distance = offset.length();

    // distance == 0 falls through to the return branch: there is no direction to push.
    if distance > 0.0 && distance < forces.interaction_radius {
        let force = falloff(distance, forces.interaction_radius);
        let angle = offset.y.atan2(offset.x);
        p.velocity += Vec2::new(angle.cos(), angle.sin()) * force * forces.push_strength;

        p.opacity = (forces.opacity_base + force * forces.opacity_gain).min(1.0);
        p.size = (forces.size_base + force * forces.size_gain).max(forces.size_floor);
    } else {
        p.velocity += (p.anchor - p.position) * forces.return_force;

        p.opacity = (p.opacity * forces.opacity_decay).max(forces.opacity_floor);
        p.size = (p.size * forces.size_decay).max(forces.size_floor);
    }

    p.velocity *= forces.damping;
    p.position += p.velocity;

    if p.position.x < 0.0 || p.position.x > bounds.width {
        p.velocity.x *= -forces.bounce;
    }
    if p.position.y < 0.0 || p.position.y > bounds.height {
        p.velocity.y *= -forces.bounce;
    }
    p.position = p.position.clamp(Vec2::ZERO, bounds.as_vec2());
}
