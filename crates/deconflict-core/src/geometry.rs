//! Cartesian vector math shared by every trajectory model.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or displacement) in local Cartesian space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpatialPoint {
    pub const ORIGIN: SpatialPoint = SpatialPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the vector.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(&self, other: &SpatialPoint) -> f64 {
        (*self - *other).norm()
    }

    /// Linear blend: `self` at `ratio = 0`, `other` at `ratio = 1`.
    pub fn lerp(&self, other: &SpatialPoint, ratio: f64) -> SpatialPoint {
        *self + (*other - *self) * ratio
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for SpatialPoint {
    type Output = SpatialPoint;

    fn add(self, rhs: SpatialPoint) -> SpatialPoint {
        SpatialPoint::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for SpatialPoint {
    type Output = SpatialPoint;

    fn sub(self, rhs: SpatialPoint) -> SpatialPoint {
        SpatialPoint::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for SpatialPoint {
    type Output = SpatialPoint;

    fn mul(self, rhs: f64) -> SpatialPoint {
        SpatialPoint::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<(f64, f64, f64)> for SpatialPoint {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 3]> for SpatialPoint {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_of_pythagorean_triple() {
        assert_eq!(SpatialPoint::new(3.0, 4.0, 0.0).norm(), 5.0);
        assert_eq!(SpatialPoint::new(2.0, 3.0, 6.0).norm(), 7.0);
    }

    #[test]
    fn arithmetic_is_component_wise() {
        let a = SpatialPoint::new(1.0, 2.0, 3.0);
        let b = SpatialPoint::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, SpatialPoint::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, SpatialPoint::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, SpatialPoint::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = SpatialPoint::ORIGIN;
        let b = SpatialPoint::new(10.0, 0.0, -4.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), SpatialPoint::new(5.0, 0.0, -2.0));
    }

    #[test]
    fn deserializes_from_named_fields() {
        let point: SpatialPoint = serde_json::from_str(r#"{"x":1.0,"y":2.0,"z":3.5}"#).unwrap();
        assert_eq!(point, SpatialPoint::new(1.0, 2.0, 3.5));
    }
}
