//! Emitter definition.

use std::fmt;

/// A transmitter at a fixed 3D position demanding a number of distinct
/// frequencies.
///
/// # Examples
///
/// ```
/// use u_fap::model::Emitter;
///
/// let a = Emitter::new("A", 0.0, 0.0, 0.0, 2);
/// let b = Emitter::new("B", 3.0, 4.0, 0.0, 1);
/// assert!((a.distance(&b) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Emitter {
    /// Unique identifier.
    pub id: String,
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
    /// Z-coordinate.
    pub z: f64,
    /// Number of distinct frequencies required.
    pub demand: u32,
}

impl Emitter {
    /// Creates a new emitter.
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: f64, demand: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z,
            demand,
        }
    }

    /// Euclidean distance to another emitter.
    pub fn distance(&self, other: &Emitter) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}, {}): {}",
            self.id, self.x, self.y, self.z, self.demand
        )
    }
}
