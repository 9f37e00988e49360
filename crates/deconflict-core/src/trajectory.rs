//! Trajectory models: waypoint lists and constant-velocity tracks.
//!
//! Both variants share a validity window and answer position queries only
//! inside it. Neither variant extrapolates.

use crate::error::{DeconflictError, Result};
use crate::geometry::SpatialPoint;
use serde::{Deserialize, Serialize};

/// Tolerance used when matching a query time to a waypoint timestamp.
pub const TIME_EPSILON: f64 = 1e-9;

/// Closed validity interval of a trajectory, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// `t` clamped into the window when it lies within `slack` of it.
    ///
    /// Sampled instants drift off exact boundaries through rounding
    /// (`3.0 * 0.1 > 0.3`); this maps them back onto the window.
    pub fn snap(&self, t: f64, slack: f64) -> Option<f64> {
        if t >= self.start - slack && t <= self.end + slack {
            Some(t.clamp(self.start, self.end))
        } else {
            None
        }
    }
}

/// A waypoint together with the time it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPoint {
    pub position: SpatialPoint,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryShape {
    /// Ordered waypoints with strictly increasing timestamps.
    Waypoint { points: Vec<TimedPoint> },
    /// `initial + velocity * (t - start)` over the window.
    Kinematic {
        initial: SpatialPoint,
        velocity: SpatialPoint,
    },
}

/// One drone's path as a function of time. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    id: String,
    window: TimeWindow,
    shape: TrajectoryShape,
}

impl Trajectory {
    /// Build a waypoint trajectory whose points are spread evenly across
    /// `[start, end]`.
    ///
    /// Point `i` is reached at `start + i * (end - start) / (count - 1)`.
    /// At least two points and a non-empty window are required.
    pub fn waypoints(
        id: impl Into<String>,
        positions: Vec<SpatialPoint>,
        start: f64,
        end: f64,
    ) -> Result<Self> {
        let id = id.into();
        let window = checked_window(&id, start, end)?;
        check_positions(&id, positions.iter())?;

        if positions.len() < 2 {
            return Err(DeconflictError::DegenerateTrajectory {
                id,
                reason: format!("{} waypoint(s), at least 2 required", positions.len()),
            });
        }
        if window.duration() <= 0.0 {
            return Err(DeconflictError::DegenerateTrajectory {
                id,
                reason: "zero-length time window".to_string(),
            });
        }

        let last = positions.len() - 1;
        let interval = window.duration() / last as f64;
        let points = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| TimedPoint {
                position,
                time: if index == last {
                    end
                } else {
                    start + index as f64 * interval
                },
            })
            .collect();

        Ok(Self {
            id,
            window,
            shape: TrajectoryShape::Waypoint { points },
        })
    }

    /// Build a waypoint trajectory from points that carry their own
    /// timestamps. The window spans the first to the last timestamp.
    pub fn timed_waypoints(id: impl Into<String>, points: Vec<TimedPoint>) -> Result<Self> {
        let id = id.into();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(DeconflictError::DegenerateTrajectory {
                id,
                reason: "no waypoints".to_string(),
            });
        };
        let window = checked_window(&id, first.time, last.time)?;
        check_positions(&id, points.iter().map(|p| &p.position))?;

        for (index, pair) in points.windows(2).enumerate() {
            if !pair[1].time.is_finite() || pair[1].time <= pair[0].time {
                return Err(DeconflictError::NonIncreasingTimestamps {
                    id,
                    index: index + 1,
                });
            }
        }

        Ok(Self {
            id,
            window,
            shape: TrajectoryShape::Waypoint { points },
        })
    }

    /// Build a constant-velocity trajectory valid over `[start, end]`.
    pub fn kinematic(
        id: impl Into<String>,
        initial: SpatialPoint,
        velocity: SpatialPoint,
        start: f64,
        end: f64,
    ) -> Result<Self> {
        let id = id.into();
        let window = checked_window(&id, start, end)?;
        check_positions(&id, [&initial, &velocity])?;

        Ok(Self {
            id,
            window,
            shape: TrajectoryShape::Kinematic { initial, velocity },
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn shape(&self) -> &TrajectoryShape {
        &self.shape
    }

    pub fn is_kinematic(&self) -> bool {
        matches!(self.shape, TrajectoryShape::Kinematic { .. })
    }

    /// Timed waypoints, or `None` for a kinematic trajectory.
    pub fn points(&self) -> Option<&[TimedPoint]> {
        match &self.shape {
            TrajectoryShape::Waypoint { points } => Some(points),
            TrajectoryShape::Kinematic { .. } => None,
        }
    }

    /// Instants the trajectory is defined by: waypoint timestamps, or the
    /// window bounds for a kinematic track.
    pub fn own_instants(&self) -> Vec<f64> {
        match &self.shape {
            TrajectoryShape::Waypoint { points } => points.iter().map(|p| p.time).collect(),
            TrajectoryShape::Kinematic { .. } => {
                if self.window.duration() > 0.0 {
                    vec![self.window.start, self.window.end]
                } else {
                    vec![self.window.start]
                }
            }
        }
    }

    /// Position at time `t`.
    ///
    /// Fails with `OutOfRangeQuery` outside the window. Waypoint
    /// trajectories do not interpolate: only their own timestamps resolve.
    pub fn position_at(&self, t: f64) -> Result<SpatialPoint> {
        if !self.window.contains(t) {
            return Err(DeconflictError::OutOfRangeQuery {
                id: self.id.clone(),
                time: t,
                start: self.window.start,
                end: self.window.end,
            });
        }

        match &self.shape {
            TrajectoryShape::Kinematic { initial, velocity } => {
                Ok(*initial + *velocity * (t - self.window.start))
            }
            TrajectoryShape::Waypoint { points } => points
                .iter()
                .find(|p| (p.time - t).abs() <= TIME_EPSILON)
                .map(|p| p.position)
                .ok_or_else(|| DeconflictError::UnsampledInstant {
                    id: self.id.clone(),
                    time: t,
                }),
        }
    }

    /// Spacing between consecutive waypoint timestamps when the window is
    /// divided evenly: `(end - start) / (count - 1)`.
    pub fn waypoint_interval(&self) -> Result<f64> {
        let Some(points) = self.points() else {
            return Err(DeconflictError::UnsupportedModel {
                id: self.id.clone(),
                expected: "waypoint",
            });
        };
        if points.len() < 2 {
            return Err(DeconflictError::DegenerateTrajectory {
                id: self.id.clone(),
                reason: format!("{} waypoint(s), at least 2 required", points.len()),
            });
        }
        if self.window.duration() <= 0.0 {
            return Err(DeconflictError::DegenerateTrajectory {
                id: self.id.clone(),
                reason: "zero-length time window".to_string(),
            });
        }
        Ok(self.window.duration() / (points.len() - 1) as f64)
    }

    /// Position at `t` along the leg that joins waypoint `index` to its
    /// neighbour on the side of `t`, clamped to that leg.
    ///
    /// A `t` past either end of the path resolves to the end waypoint.
    /// Kinematic trajectories clamp `t` to their window. Returns `None` for
    /// an out-of-bounds index.
    pub fn leg_position(&self, index: usize, t: f64) -> Option<SpatialPoint> {
        let points = match &self.shape {
            TrajectoryShape::Kinematic { initial, velocity } => {
                let t = t.clamp(self.window.start, self.window.end);
                return Some(*initial + *velocity * (t - self.window.start));
            }
            TrajectoryShape::Waypoint { points } => points,
        };

        let anchor = points.get(index)?;
        let (from, to) = if t >= anchor.time {
            match points.get(index + 1) {
                Some(next) => (anchor, next),
                None => return Some(anchor.position),
            }
        } else {
            match index.checked_sub(1).and_then(|prev| points.get(prev)) {
                Some(prev) => (prev, anchor),
                None => return Some(anchor.position),
            }
        };

        let span = to.time - from.time;
        if span <= 0.0 {
            return Some(anchor.position);
        }
        let ratio = ((t - from.time) / span).clamp(0.0, 1.0);
        Some(from.position.lerp(&to.position, ratio))
    }
}

fn checked_window(id: &str, start: f64, end: f64) -> Result<TimeWindow> {
    if !start.is_finite() || !end.is_finite() || start > end {
        return Err(DeconflictError::InvalidTimeWindow {
            id: id.to_string(),
            start,
            end,
        });
    }
    Ok(TimeWindow { start, end })
}

fn check_positions<'a>(
    id: &str,
    positions: impl IntoIterator<Item = &'a SpatialPoint>,
) -> Result<()> {
    if positions.into_iter().all(SpatialPoint::is_finite) {
        Ok(())
    } else {
        Err(DeconflictError::DegenerateTrajectory {
            id: id.to_string(),
            reason: "non-finite coordinate".to_string(),
        })
    }
}
