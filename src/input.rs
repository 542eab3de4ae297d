//! Pointer tracking for the particle field.
//!
//! The pointer is the only state shared between the host's event handlers and
//! the tick loop. [`PointerState`] is a single slot holding one `(x, y)` pair:
//! the input side overwrites it, the integrator reads it once per tick.
//! Both coordinates live in one atomic word, so a reader on another thread can
//! never see a new `x` next to a stale `y`.
//!
//! [`PointerInput`] is the boundary adapter. It turns window events (viewport
//! coordinates) into surface-local writes, and recenters the pointer when it
//! leaves the surface so particles relax back home.
//!
//! ```ignore
//! let mut input = PointerInput::new(field.pointer());
//! input.set_region(Vec2::new(40.0, 80.0), SurfaceSize::new(600.0, 400.0));
//! input.handle_event(&event);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::Vec2;
use winit::event::WindowEvent;

use crate::particle::SurfaceSize;

/// Shared, tear-free pointer position in surface-local pixels.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    slot: Arc<AtomicU64>,
}

impl PointerState {
    pub fn new(position: Vec2) -> Self {
        let state = Self::default();
        state.set(position);
        state
    }

    /// Overwrite the pointer position.
    pub fn set(&self, position: Vec2) {
        self.slot.store(pack(position), Ordering::Release);
    }

    /// Current pointer position.
    pub fn get(&self) -> Vec2 {
        unpack(self.slot.load(Ordering::Acquire))
    }
}

fn pack(position: Vec2) -> u64 {
    ((position.x.to_bits() as u64) << 32) | position.y.to_bits() as u64
}

fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

/// Translates host pointer events into [`PointerState`] writes.
#[derive(Debug, Clone)]
pub struct PointerInput {
    pointer: PointerState,
    /// Top-left corner of the surface in viewport coordinates.
    origin: Vec2,
    size: SurfaceSize,
    inside: bool,
}

impl PointerInput {
    /// Create an adapter writing into `pointer`.
    pub fn new(pointer: PointerState) -> Self {
        Self {
            pointer,
            origin: Vec2::ZERO,
            size: SurfaceSize::default(),
            inside: false,
        }
    }

    /// Update where the surface sits in the viewport and how big it is.
    pub fn set_region(&mut self, origin: Vec2, size: SurfaceSize) {
        self.origin = origin;
        self.size = size;
    }

    /// Whether the last move landed inside the surface.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Pointer moved to `viewport` coordinates.
    ///
    /// Moves outside the surface rectangle count as leaving it.
    pub fn moved(&mut self, viewport: Vec2) {
        let local = viewport - self.origin;
        let within = local.x >= 0.0
            && local.y >= 0.0
            && local.x <= self.size.width
            && local.y <= self.size.height;

        if within {
            self.inside = true;
            self.pointer.set(local);
        } else if self.inside {
            self.left();
        }
    }

    /// Pointer left the surface: park it at the center.
    pub fn left(&mut self) {
        self.inside = false;
        self.pointer.set(self.size.center());
    }

    /// Process a winit window event. Returns true if it was a pointer event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.moved(Vec2::new(position.x as f32, position.y as f32));
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.left();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_roundtrip_preserves_both_axes() {
        let state = PointerState::new(Vec2::new(-12.5, 1024.25));
        assert_eq!(state.get(), Vec2::new(-12.5, 1024.25));
    }

    #[test]
    fn test_clones_share_slot() {
        let writer = PointerState::default();
        let reader = writer.clone();
        writer.set(Vec2::new(3.0, 4.0));
        assert_eq!(reader.get(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_concurrent_reads_never_tear() {
        let pointer = PointerState::new(Vec2::new(0.0, 0.0));
        let writer = pointer.clone();

        let handle = std::thread::spawn(move || {
            for i in 0..10_000 {
                let v = i as f32;
                writer.set(Vec2::new(v, v));
            }
        });

        for _ in 0..10_000 {
            let p = pointer.get();
            assert_eq!(p.x, p.y);
        }
        handle.join().unwrap();
    }

    #[test]
    fn test_move_translates_to_surface_local() {
        let pointer = PointerState::default();
        let mut input = PointerInput::new(pointer.clone());
        input.set_region(Vec2::new(100.0, 50.0), SurfaceSize::new(600.0, 400.0));

        input.moved(Vec2::new(130.0, 90.0));
        assert_eq!(pointer.get(), Vec2::new(30.0, 40.0));
        assert!(input.is_inside());
    }

    #[test]
    fn test_leave_recenters() {
        let pointer = PointerState::default();
        let mut input = PointerInput::new(pointer.clone());
        input.set_region(Vec2::ZERO, SurfaceSize::new(600.0, 400.0));

        input.moved(Vec2::new(10.0, 10.0));
        input.left();
        assert_eq!(pointer.get(), Vec2::new(300.0, 200.0));
        assert!(!input.is_inside());
    }

    #[test]
    fn test_move_outside_region_counts_as_leave() {
        let pointer = PointerState::default();
        let mut input = PointerInput::new(pointer.clone());
        input.set_region(Vec2::new(100.0, 100.0), SurfaceSize::new(200.0, 200.0));

        input.moved(Vec2::new(150.0, 150.0));
        assert_eq!(pointer.get(), Vec2::new(50.0, 50.0));

        input.moved(Vec2::new(20.0, 20.0));
        assert_eq!(pointer.get(), Vec2::new(100.0, 100.0));

        // Further outside moves leave it parked.
        pointer.set(Vec2::new(1.0, 1.0));
        input.moved(Vec2::new(10.0, 10.0));
        assert_eq!(pointer.get(), Vec2::new(1.0, 1.0));
    }
}
