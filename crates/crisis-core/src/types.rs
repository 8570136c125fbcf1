//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
///
/// All timers in the simulation compare against `elapsed_ms`; nothing reads
/// the wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of `update` steps taken.
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one step of `delta_ms`.
    pub fn advance(&mut self, delta_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += delta_ms;
    }

    /// Milliseconds elapsed since `since`, or `None` if `since` is unset.
    pub fn since(&self, since: Option<f64>) -> Option<f64> {
        since.map(|t| self.elapsed_ms - t)
    }
}

/// Axis-aligned bounding box. `min` is the top-left corner (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes. Boxes that only touch along an edge do
    /// not collide.
    pub fn collides(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Kinematic body shared by the player and enemies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner.
    pub position: DVec2,
    pub velocity: DVec2,
    /// Width and height of the bounding box.
    pub size: DVec2,
    /// Set while the body is off the ground (jumping, for the player).
    pub airborne: bool,
}

impl Body {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            size: DVec2::new(width, height),
            airborne: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.position,
            size: self.size,
        }
    }

    /// Horizontal distance between the left edges of two bodies.
    pub fn horizontal_distance_to(&self, x: f64) -> f64 {
        (self.position.x - x).abs()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Hit points, always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Fraction of max health remaining (0.0 when max is zero).
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.current) / f64::from(self.max)
        }
    }

    /// Subtract `amount`, clamping into `[0, max]`. Negative amounts cannot
    /// push health above max.
    pub fn take_damage(&mut self, amount: i64) {
        self.set_clamped(i64::from(self.current).saturating_sub(amount));
    }

    /// Add `amount`, clamping into `[0, max]`.
    pub fn heal(&mut self, amount: i64) {
        self.set_clamped(i64::from(self.current).saturating_add(amount));
    }

    /// Refill to max.
    pub fn restore(&mut self) {
        self.current = self.max;
    }

    fn set_clamped(&mut self, value: i64) {
        // Clamped into [0, max] so the narrowing is lossless.
        self.current = value.clamp(0, i64::from(self.max)) as u32;
    }
}
