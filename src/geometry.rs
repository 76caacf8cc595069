//! Fundamental vector types shared by the profile and the result aggregator.
//!
//! Lengths are millimetres and forces are newtons throughout the crate.

use std::ops::Add;

use nalgebra::{Vector2, Vector3};

/// Position in the cross-section sketch plane measured in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SketchPoint {
    /// Horizontal coordinate, zero on the symmetry axis.
    pub x: f64,
    /// Vertical coordinate, zero at the tube centre.
    pub y: f64,
}

impl SketchPoint {
    /// Create a [`SketchPoint`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Place the sketch point at position `z` along the extrusion axis.
    #[must_use]
    pub const fn at(self, z: f64) -> Point {
        Point::new(self.x, self.y, z)
    }

    /// Midpoint between two sketch points.
    #[must_use]
    pub fn midpoint(self, other: SketchPoint) -> SketchPoint {
        let mid = (Vector2::new(self.x, self.y) + Vector2::new(other.x, other.y)) / 2.0;
        SketchPoint::new(mid.x, mid.y)
    }
}

/// Position in three dimensional space measured in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the extrusion axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Reaction force on a node in newtons.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Force {
    /// Component along the global X axis.
    pub x: f64,
    /// Component along the global Y axis.
    pub y: f64,
    /// Component along the extrusion axis.
    pub z: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the force into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Force {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<[f64; 3]> for Force {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Force {
    type Output = Force;

    fn add(self, rhs: Force) -> Force {
        Force::from(self.to_vector() + rhs.to_vector())
    }
}

/// Nodal translation in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    /// Component along the global X axis.
    pub x: f64,
    /// Vertical component; negative is downward.
    pub y: f64,
    /// Component along the extrusion axis.
    pub z: f64,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Length of the translation vector.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        Vector3::new(self.x, self.y, self.z).norm()
    }
}

impl From<[f64; 3]> for Displacement {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use quadbeam::point;
///
/// let node = point(0.0, 28.0, 370.0);
/// assert_eq!(node.y, 28.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for creating [`Force`] instances.
#[must_use]
pub const fn force(x: f64, y: f64, z: f64) -> Force {
    Force::new(x, y, z)
}

/// Convenience helper for creating [`Displacement`] instances.
///
/// # Examples
/// ```
/// use quadbeam::displacement;
///
/// let sag = displacement(0.0, -1.2, 0.0);
/// assert!(sag.y.is_sign_negative());
/// ```
#[must_use]
pub const fn displacement(x: f64, y: f64, z: f64) -> Displacement {
    Displacement::new(x, y, z)
}
