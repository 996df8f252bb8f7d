//! Seams to the outside world: where the pointer is, which container owns
//! the slots, and how a slot is moved.
//!
//! Real desktop integrations live outside this crate. The in-process
//! implementations here drive the headless binary and the tests.

use std::collections::HashSet;

use swarm_core::{Bounds, Container, Result, SwarmError};

/// Reports the pointer position once per frame
pub trait PointerSource: Send + Sync {
    fn poll_pointer_position(&mut self) -> [f32; 2];
}

/// Finds the slot container at start-up
pub trait ContainerSource {
    fn discover_container(&mut self) -> Result<Container>;
}

/// Moves one slot to an already clamped pixel coordinate
pub trait PlacementSink: Send + Sync {
    fn place(&mut self, slot: usize, x: i32, y: i32) -> Result<()>;
}

/// A pointer that never moves
#[derive(Debug, Clone, Copy)]
pub struct FixedPointer(pub [f32; 2]);

impl PointerSource for FixedPointer {
    fn poll_pointer_position(&mut self) -> [f32; 2] {
        self.0
    }
}

/// A pointer sweeping a circle, advancing a fixed angle per poll
#[derive(Debug, Clone, Copy)]
pub struct OrbitingPointer {
    pub center: [f32; 2],
    pub radius: f32,
    /// Radians per poll
    pub step: f32,
    angle: f32,
}

impl OrbitingPointer {
    pub fn new(center: [f32; 2], radius: f32, step: f32) -> Self {
        Self {
            center,
            radius,
            step,
            angle: 0.0,
        }
    }
}

impl PointerSource for OrbitingPointer {
    fn poll_pointer_position(&mut self) -> [f32; 2] {
        let pos = [
            self.center[0] + self.radius * self.angle.cos(),
            self.center[1] + self.radius * self.angle.sin(),
        ];
        self.angle = (self.angle + self.step) % std::f32::consts::TAU;
        pos
    }
}

/// In-memory stand-in for a desktop: a fixed set of slots on a screen.
///
/// Remembers the last coordinate placed in each slot. Slots can be marked
/// invalid to simulate items vanishing mid-run.
#[derive(Debug, Clone)]
pub struct VirtualDesktop {
    handle: u64,
    bounds: Bounds,
    slots: Vec<Option<(i32, i32)>>,
    invalid: HashSet<usize>,
    available: bool,
}

impl VirtualDesktop {
    pub fn new(slot_count: usize, bounds: Bounds) -> Self {
        Self {
            handle: 0x5eed,
            bounds,
            slots: vec![None; slot_count],
            invalid: HashSet::new(),
            available: true,
        }
    }

    /// A desktop whose container cannot be found
    pub fn unavailable(bounds: Bounds) -> Self {
        Self {
            available: false,
            ..Self::new(0, bounds)
        }
    }

    /// Make every later `place` on `slot` fail
    pub fn invalidate(&mut self, slot: usize) {
        self.invalid.insert(slot);
    }

    pub fn slot(&self, slot: usize) -> Option<(i32, i32)> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<(i32, i32)>] {
        &self.slots
    }
}

impl ContainerSource for VirtualDesktop {
    fn discover_container(&mut self) -> Result<Container> {
        if !self.available {
            return Err(SwarmError::ContainerUnavailable(
                "virtual desktop is offline".to_string(),
            ));
        }
        Ok(Container {
            handle: self.handle,
            slot_count: self.slots.len(),
            bounds: self.bounds,
        })
    }
}

impl PlacementSink for VirtualDesktop {
    fn place(&mut self, slot: usize, x: i32, y: i32) -> Result<()> {
        if self.invalid.contains(&slot) {
            return Err(SwarmError::Placement {
                slot,
                reason: "slot no longer exists".to_string(),
            });
        }
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = Some((x, y));
                Ok(())
            }
            None => Err(SwarmError::Placement {
                slot,
                reason: format!("container only has {} slots", self.slots.len()),
            }),
        }
    }
}
