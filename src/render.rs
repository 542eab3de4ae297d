//! Frame rendering against an abstract drawing surface.
//!
//! The renderer never touches pixels directly. It issues three kinds of
//! calls on a [`DrawSurface`]: clear, filled circle (with optional glow), and
//! stroked line. [`Canvas`](crate::Canvas) rasterizes them in software;
//! [`Frame`] records them so a host can replay them onto whatever backend it
//! owns.
//!
//! Each particle is drawn as a glowing colored disc with a small white core,
//! then linked to every *later* particle closer than the link distance, so
//! each pair is considered exactly once.

use glam::Vec2;

use crate::config::StyleConfig;
use crate::particle::Particle;
use crate::visuals::Color;

/// Capability interface the renderer draws through.
pub trait DrawSurface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a circle. `glow` is the halo radius in pixels; 0 draws a hard disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32, width: f32);
}

/// One recorded drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
        glow: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        alpha: f32,
        width: f32,
    },
}

/// A recorded frame: the draw calls of one tick, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded circles (two per particle).
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Number of recorded connection lines.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Issue the recorded calls, in order, on another surface.
    pub fn replay<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match *command {
                DrawCommand::Clear => surface.clear(),
                DrawCommand::Circle { center, radius, color, alpha, glow } => {
                    surface.fill_circle(center, radius, color, alpha, glow)
                }
                DrawCommand::Line { from, to, color, alpha, width } => {
                    surface.stroke_line(from, to, color, alpha, width)
                }
            }
        }
    }
}

impl DrawSurface for Frame {
    fn clear(&mut self) {
        // Anything before a clear is invisible anyway.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
            glow,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
    }
}

/// Alpha of the line joining two particles `distance` apart, or `None` when
/// they are too far apart to be linked.
#[inline]
pub fn link_alpha(distance: f32, a: &Particle, b: &Particle, style: &StyleConfig) -> Option<f32> {
    if distance < style.link_distance {
        let closeness = (style.link_distance - distance) / style.link_distance;
        Some(closeness * style.link_alpha * a.opacity.min(b.opacity))
    } else {
        None
    }
}

/// Draws particle state onto a surface. Holds only style, never particle data.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    style: StyleConfig,
}

impl Renderer {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Clear the surface and draw every particle and connection.
    pub fn draw<S: DrawSurface + ?Sized>(&self, particles: &[Particle], surface: &mut S) {
        let style = &self.style;
        surface.clear();

        for (index, particle) in particles.iter().enumerate() {
            surface.fill_circle(
                particle.position,
                particle.size,
                particle.color,
                particle.opacity,
                particle.size * style.glow_factor,
            );
            surface.fill_circle(
                particle.position,
                particle.size * style.core_scale,
                style.core_color,
                particle.opacity * style.core_alpha,
                0.0,
            );

            for other in &particles[index + 1..] {
                let distance = particle.position.distance(other.position);
                if let Some(alpha) = link_alpha(distance, particle, other, style) {
                    surface.stroke_line(
                        particle.position,
                        other.position,
                        particle.color,
                        alpha,
                        style.link_width,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(id: u32, x: f32, y: f32, opacity: f32, color: Color) -> Particle {
        Particle {
            id,
            position: Vec2::new(x, y),
            anchor: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            size: 2.0,
            opacity,
            color,
        }
    }

    #[test]
    fn test_empty_set_only_clears() {
        let mut frame = Frame::new();
        Renderer::default().draw(&[], &mut frame);
        assert_eq!(frame.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_particle_draws_glow_then_core() {
        let mut frame = Frame::new();
        let p = particle(0, 10.0, 20.0, 0.5, Color::MAGENTA);
        Renderer::default().draw(&[p], &mut frame);

        let commands = frame.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[1],
            DrawCommand::Circle {
                center: Vec2::new(10.0, 20.0),
                radius: 2.0,
                color: Color::MAGENTA,
                alpha: 0.5,
                glow: 6.0,
            }
        );
        match commands[2] {
            DrawCommand::Circle { radius, color, alpha, glow, .. } => {
                assert!((radius - 0.6).abs() < 1e-6);
                assert_eq!(color, Color::WHITE);
                assert!((alpha - 0.4).abs() < 1e-6);
                assert_eq!(glow, 0.0);
            }
            other => panic!("expected core circle, got {:?}", other),
        }
    }

    #[test]
    fn test_connection_alpha_and_color() {
        let mut frame = Frame::new();
        let a = particle(0, 0.0, 0.0, 0.8, Color::CYAN);
        let b = particle(1, 50.0, 0.0, 0.4, Color::GREEN);
        Renderer::default().draw(&[a, b], &mut frame);

        let lines: Vec<_> = frame
            .commands()
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Line { color, alpha, width, .. } => Some((color, alpha, width)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 1);
        let (color, alpha, width) = lines[0];
        // (100 - 50) / 100 * 0.3 * min(0.8, 0.4)
        assert_eq!(color, Color::CYAN);
        assert!((alpha - 0.06).abs() < 1e-6);
        assert_eq!(width, 0.5);
    }

    #[test]
    fn test_far_particles_are_not_linked() {
        let mut frame = Frame::new();
        let a = particle(0, 0.0, 0.0, 1.0, Color::CYAN);
        let b = particle(1, 100.0, 0.0, 1.0, Color::CYAN);
        Renderer::default().draw(&[a, b], &mut frame);
        assert_eq!(frame.line_count(), 0);
        assert_eq!(frame.circle_count(), 4);
    }

    #[test]
    fn test_each_pair_linked_once() {
        let mut frame = Frame::new();
        let cluster: Vec<Particle> = (0..5)
            .map(|i| particle(i, i as f32 * 5.0, 0.0, 1.0, Color::YELLOW))
            .collect();
        Renderer::default().draw(&cluster, &mut frame);
        assert_eq!(frame.line_count(), 10);
    }

    #[test]
    fn test_draw_does_not_mutate() {
        let particles = vec![
            particle(0, 1.0, 1.0, 0.3, Color::CYAN),
            particle(1, 5.0, 5.0, 0.9, Color::YELLOW),
        ];
        let before = particles.clone();
        Renderer::default().draw(&particles, &mut Frame::new());
        assert_eq!(particles, before);
    }

    #[test]
    fn test_replay_reproduces_frame() {
        let particles = vec![
            particle(0, 1.0, 1.0, 0.3, Color::CYAN),
            particle(1, 5.0, 5.0, 0.9, Color::YELLOW),
        ];
        let mut recorded = Frame::new();
        Renderer::default().draw(&particles, &mut recorded);

        let mut copy = Frame::new();
        recorded.replay(&mut copy);
        assert_eq!(copy, recorded);
    }
}
