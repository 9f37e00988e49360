//! Error types for deconfliction scans.

use thiserror::Error;

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, DeconflictError>;

/// Failures surfaced to the caller of a scan.
///
/// A scan either completes with a full report or fails with one of these
/// before any report is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeconflictError {
    /// Too few waypoints, or a zero-length window where a per-point
    /// interval has to be derived.
    #[error("degenerate trajectory '{id}': {reason}")]
    DegenerateTrajectory { id: String, reason: String },

    /// Position requested outside the trajectory's validity window.
    #[error("time {time} is outside the window [{start}, {end}] of trajectory '{id}'")]
    OutOfRangeQuery {
        id: String,
        time: f64,
        start: f64,
        end: f64,
    },

    #[error("buffer distance must be a positive finite number, got {0}")]
    InvalidBufferDistance(f64),

    #[error("time step must be a positive finite number, got {0}")]
    InvalidTimeStep(f64),

    #[error("invalid time window [{start}, {end}] for trajectory '{id}'")]
    InvalidTimeWindow { id: String, start: f64, end: f64 },

    /// Explicit waypoint timestamps must strictly increase.
    #[error("timestamp of waypoint {index} in trajectory '{id}' does not increase")]
    NonIncreasingTimestamps { id: String, index: usize },

    /// Waypoint trajectories only answer at their own timestamps.
    #[error("trajectory '{id}' has no waypoint at time {time}")]
    UnsampledInstant { id: String, time: f64 },

    #[error("trajectory '{id}' must be a {expected} trajectory for this scan")]
    UnsupportedModel { id: String, expected: &'static str },

    #[error("trajectory id '{0}' appears more than once")]
    DuplicateTrajectoryId(String),

    #[error("sampling would produce {requested} instants, limit is {limit}")]
    TooManySamples { requested: usize, limit: usize },
}
