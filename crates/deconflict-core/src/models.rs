//! Input descriptors for scan requests.
//!
//! These are the plain, serializer-friendly shapes callers hand over; each
//! converts into a validated [`Trajectory`].

use crate::error::Result;
use crate::geometry::SpatialPoint;
use crate::trajectory::{TimedPoint, Trajectory};
use serde::{Deserialize, Serialize};

fn default_primary_id() -> String {
    "primary".to_string()
}

/// The mission under review: waypoints spread evenly over a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionDescriptor {
    #[serde(default = "default_primary_id")]
    pub id: String,
    pub waypoints: Vec<SpatialPoint>,
    /// (start, end) in seconds
    #[serde(alias = "window")]
    pub time_window: (f64, f64),
}

impl MissionDescriptor {
    pub fn to_trajectory(&self) -> Result<Trajectory> {
        let (start, end) = self.time_window;
        Trajectory::waypoints(self.id.clone(), self.waypoints.clone(), start, end)
    }
}

/// Waypoint carrying its own timestamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimedWaypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(alias = "t", alias = "time")]
    pub timestamp: f64,
}

impl From<TimedWaypoint> for TimedPoint {
    fn from(wp: TimedWaypoint) -> Self {
        TimedPoint {
            position: SpatialPoint::new(wp.x, wp.y, wp.z),
            time: wp.timestamp,
        }
    }
}

/// Another drone's planned track, compared against the mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetTrackDescriptor {
    pub id: String,
    pub waypoints: Vec<TimedWaypoint>,
}

impl FleetTrackDescriptor {
    pub fn to_trajectory(&self) -> Result<Trajectory> {
        let points = self.waypoints.iter().copied().map(TimedPoint::from).collect();
        Trajectory::timed_waypoints(self.id.clone(), points)
    }
}

/// Constant-velocity track for fleet sweeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicDescriptor {
    pub id: String,
    #[serde(alias = "start")]
    pub initial_position: SpatialPoint,
    pub velocity: SpatialPoint,
    pub start_time: f64,
    pub end_time: f64,
}

impl KinematicDescriptor {
    pub fn to_trajectory(&self) -> Result<Trajectory> {
        Trajectory::kinematic(
            self.id.clone(),
            self.initial_position,
            self.velocity,
            self.start_time,
            self.end_time,
        )
    }
}

/// Full mission-scan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionScanInput {
    pub primary: MissionDescriptor,
    #[serde(default, alias = "simulated")]
    pub others: Vec<FleetTrackDescriptor>,
}

impl MissionScanInput {
    /// Mission trajectory followed by the fleet trajectories.
    pub fn to_trajectories(&self) -> Result<(Trajectory, Vec<Trajectory>)> {
        let primary = self.primary.to_trajectory()?;
        let others = self
            .others
            .iter()
            .map(FleetTrackDescriptor::to_trajectory)
            .collect::<Result<Vec<_>>>()?;
        Ok((primary, others))
    }
}

/// Full fleet-sweep request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetScanInput {
    #[serde(alias = "drones")]
    pub trajectories: Vec<KinematicDescriptor>,
}

impl FleetScanInput {
    pub fn to_trajectories(&self) -> Result<Vec<Trajectory>> {
        self.trajectories
            .iter()
            .map(KinematicDescriptor::to_trajectory)
            .collect()
    }
}
