//! Core state types for the simulation.
//!
//! Defines:
//! - `PointMass` - one particle (position, velocity, acceleration, mass)
//! - `IdAllocator` - hands out particle ids for one session
//! - `Bounds` - axis-aligned rectangle used for the domain and tree cells
//! - `System` - the particle collection, its domain and the time `t`

use crate::simulation::vector::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub id: u64, // ordering only, never used by the physics
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration from the previous step
    pub m: f64, // mass (G folded in)
}

impl PointMass {
    pub fn new(id: u64, x: NVec2, v: NVec2, m: f64) -> Self {
        Self {
            id,
            x,
            v,
            a: NVec2::zeros(),
            m,
        }
    }
}

/// Monotonic id source, owned by whoever creates particles.
/// One allocator per simulation session; ids restart with a new allocator.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Create a point mass at rest acceleration-wise with a fresh id
    pub fn spawn(&mut self, x: NVec2, v: NVec2, m: f64) -> PointMass {
        PointMass::new(self.next_id(), x, v, m)
    }
}

/// Axis-aligned rectangle `[corner, corner + (width, height)]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub corner: NVec2,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(corner: NVec2, width: f64, height: f64) -> Self {
        Self { corner, width, height }
    }

    #[inline]
    pub fn midpoint(&self) -> NVec2 {
        NVec2::new(
            self.corner.x + self.width / 2.0,
            self.corner.y + self.height / 2.0,
        )
    }

    /// Largest side, used as the cell "size" by the opening-angle test
    #[inline]
    pub fn extent(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Inclusive on every edge
    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.corner.x
            && p.x <= self.corner.x + self.width
            && p.y >= self.corner.y
            && p.y <= self.corner.y + self.height
    }

    /// Quadrant index of `p` relative to this rectangle's midpoint.
    ///
    /// - Bit 0 (value 1): x >= mid x
    /// - Bit 1 (value 2): y >= mid y
    ///
    /// Points outside the rectangle still get a well-defined quadrant.
    #[inline]
    pub fn quadrant_of(&self, p: &NVec2) -> usize {
        let mid = self.midpoint();
        let mut idx = 0;
        if p.x >= mid.x { idx |= 1; }
        if p.y >= mid.y { idx |= 2; }
        idx
    }

    /// The quarter of this rectangle with quadrant index `idx` (same bit encoding
    /// as [`Bounds::quadrant_of`])
    pub fn quadrant(&self, idx: usize) -> Bounds {
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        Bounds {
            corner: NVec2::new(
                self.corner.x + (idx & 1) as f64 * w,
                self.corner.y + ((idx >> 1) & 1) as f64 * h,
            ),
            width: w,
            height: h,
        }
    }

    /// Clamp each axis of `p` into the rectangle independently
    pub fn clamp(&self, p: &NVec2) -> NVec2 {
        NVec2::new(
            p.x.min(self.corner.x + self.width).max(self.corner.x),
            p.y.min(self.corner.y + self.height).max(self.corner.y),
        )
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<PointMass>, // particle collection, updated in place each step
    pub domain: Bounds, // persistent tree root region and clamp box
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<PointMass>, domain: Bounds) -> Self {
        Self { bodies, domain, t: 0.0 }
    }
}
