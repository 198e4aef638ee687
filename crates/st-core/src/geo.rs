//! Waypoint coordinates.
//!
//! Waypoints sit on an integer grid within their system.  Distances are
//! truncated to whole units, the same way the remote world charges fuel and
//! travel time.

use serde::{Deserialize, Serialize};

/// A position on a system's integer grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance, truncated toward zero.
    pub fn distance(self, other: Coord) -> u32 {
        self.distance_exact(other) as u32
    }

    /// Euclidean distance without truncation.
    pub fn distance_exact(self, other: Coord) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
