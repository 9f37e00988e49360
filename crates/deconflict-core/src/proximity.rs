//! Distance metric and the buffer predicate.

use crate::error::{DeconflictError, Result};
use crate::geometry::SpatialPoint;

/// Euclidean distance between two points.
pub fn distance(p1: &SpatialPoint, p2: &SpatialPoint) -> f64 {
    p1.distance_to(p2)
}

/// Outcome of a single comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub distance: f64,
    pub conflict: bool,
}

/// Classifies separations against a buffer distance.
///
/// A separation exactly equal to the buffer is not a conflict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityEvaluator {
    buffer_distance: f64,
}

impl ProximityEvaluator {
    pub fn new(buffer_distance: f64) -> Result<Self> {
        if !buffer_distance.is_finite() || buffer_distance <= 0.0 {
            return Err(DeconflictError::InvalidBufferDistance(buffer_distance));
        }
        Ok(Self { buffer_distance })
    }

    pub fn buffer_distance(&self) -> f64 {
        self.buffer_distance
    }

    pub fn evaluate(&self, p1: &SpatialPoint, p2: &SpatialPoint) -> Proximity {
        let distance = distance(p1, p2);
        Proximity {
            distance,
            conflict: distance < self.buffer_distance,
        }
    }

    pub fn is_conflict(&self, p1: &SpatialPoint, p2: &SpatialPoint) -> bool {
        self.evaluate(p1, p2).conflict
    }
}
