//! 2D vector primitive
//!
//! `NVec2` is nalgebra's `Vector2<f64>`; arithmetic, dot products and norms
//! come straight from nalgebra. [`Vec2Ext`] adds the few helpers the
//! simulation needs on top of that.

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Below this length `tolerant_normalize` leaves the vector alone
pub const NORMALIZE_EPSILON: f64 = 1e-6;

pub trait Vec2Ext {
    /// |v|^2 without the square root
    fn square_length(&self) -> f64;

    fn length(&self) -> f64;

    /// Unit vector in the same direction, or `self` unchanged when the
    /// length is below [`NORMALIZE_EPSILON`]
    fn tolerant_normalize(&self) -> Self;

    /// Rescale down to `max_length` keeping direction; vectors already
    /// within the bound are returned as-is
    fn clamp_length(&self, max_length: f64) -> Self;
}

impl Vec2Ext for NVec2 {
    #[inline]
    fn square_length(&self) -> f64 {
        self.dot(self)
    }

    #[inline]
    fn length(&self) -> f64 {
        self.square_length().sqrt()
    }

    fn tolerant_normalize(&self) -> Self {
        let len = self.length();
        if len < NORMALIZE_EPSILON {
            return *self;
        }
        *self / len
    }

    fn clamp_length(&self, max_length: f64) -> Self {
        if self.length() > max_length {
            return self.tolerant_normalize() * max_length;
        }
        *self
    }
}
