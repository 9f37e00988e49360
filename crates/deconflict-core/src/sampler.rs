//! Time sampling policies.
//!
//! `Exact` reuses the timestamps trajectories already carry; `FixedStep`
//! resamples the union of their windows uniformly.

use crate::error::{DeconflictError, Result};
use crate::trajectory::Trajectory;

/// Fraction of a step treated as floating-point noise at the range end.
pub const END_SLACK: f64 = 1e-9;

/// Upper bound used when no explicit limit is configured.
pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSampler {
    /// Each trajectory's own timestamps, merged and sorted.
    Exact,
    /// Uniform samples `step` apart over `[min start, max end]`,
    /// including the end.
    FixedStep { step: f64 },
}

impl TimeSampler {
    /// Sampling instants for `trajectories`, ascending.
    pub fn instants(&self, trajectories: &[Trajectory]) -> Result<Vec<f64>> {
        self.instants_with_limit(trajectories, DEFAULT_MAX_SAMPLES)
    }

    /// Same as [`TimeSampler::instants`] but refuses to produce more than
    /// `limit` instants.
    pub fn instants_with_limit(&self, trajectories: &[Trajectory], limit: usize) -> Result<Vec<f64>> {
        match *self {
            TimeSampler::Exact => {
                let mut instants: Vec<f64> =
                    trajectories.iter().flat_map(Trajectory::own_instants).collect();
                if instants.len() > limit {
                    return Err(DeconflictError::TooManySamples {
                        requested: instants.len(),
                        limit,
                    });
                }
                instants.sort_by(f64::total_cmp);
                instants.dedup();
                Ok(instants)
            }
            TimeSampler::FixedStep { step } => {
                validate_step(step)?;
                let Some((start, end)) = union_range(trajectories) else {
                    return Ok(Vec::new());
                };
                fixed_step(start, end, step, limit)
            }
        }
    }
}

pub fn validate_step(step: f64) -> Result<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(DeconflictError::InvalidTimeStep(step))
    }
}

/// `[min start, max end]` over every trajectory, or `None` when empty.
pub fn union_range(trajectories: &[Trajectory]) -> Option<(f64, f64)> {
    trajectories.iter().map(Trajectory::window).fold(None, |acc, window| {
        Some(match acc {
            None => (window.start, window.end),
            Some((start, end)) => (f64::min(start, window.start), f64::max(end, window.end)),
        })
    })
}

/// Uniform samples over `[start, end]`.
///
/// Samples are `start + i * step` (never accumulated). The final boundary
/// is always present: a last sample that undershoots `end` by rounding
/// noise is snapped to `end`, a real undershoot gets `end` appended.
pub fn fixed_step(start: f64, end: f64, step: f64, limit: usize) -> Result<Vec<f64>> {
    validate_step(step)?;
    if end < start {
        return Ok(Vec::new());
    }

    let steps = ((end - start) / step + END_SLACK).floor();
    // One extra slot for a possibly appended end sample.
    let requested = if steps.is_finite() && steps < usize::MAX as f64 - 2.0 {
        steps as usize + 2
    } else {
        usize::MAX
    };
    if requested > limit.saturating_add(1) {
        return Err(DeconflictError::TooManySamples { requested, limit });
    }

    let steps = steps as usize;
    let mut instants: Vec<f64> = (0..=steps)
        .map(|i| f64::min(start + i as f64 * step, end))
        .collect();

    if let Some(last) = instants.last_mut() {
        if *last < end {
            if end - *last <= step * END_SLACK {
                *last = end;
            } else {
                instants.push(end);
            }
        }
    }

    if instants.len() > limit {
        return Err(DeconflictError::TooManySamples {
            requested: instants.len(),
            limit,
        });
    }
    Ok(instants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SpatialPoint;
    use crate::trajectory::TimedPoint;

    fn kin(id: &str, start: f64, end: f64) -> Trajectory {
        Trajectory::kinematic(id, SpatialPoint::ORIGIN, SpatialPoint::ORIGIN, start, end).unwrap()
    }

    #[test]
    fn fixed_step_includes_both_bounds() {
        let samples = fixed_step(0.0, 10.0, 0.1, DEFAULT_MAX_SAMPLES).unwrap();
        assert_eq!(samples.len(), 101);
        assert_eq!(samples[0], 0.0);
        assert_eq!(*samples.last().unwrap(), 10.0);
    }

    #[test]
    fn fixed_step_appends_end_when_step_does_not_divide_range() {
        let samples = fixed_step(0.0, 1.0, 0.3, DEFAULT_MAX_SAMPLES).unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(*samples.last().unwrap(), 1.0);
        assert!((samples[3] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn fixed_step_degenerate_range_yields_single_sample() {
        assert_eq!(fixed_step(4.0, 4.0, 0.5, 10).unwrap(), vec![4.0]);
    }

    #[test]
    fn fixed_step_is_strictly_ascending() {
        let samples = fixed_step(-3.7, 12.25, 0.35, DEFAULT_MAX_SAMPLES).unwrap();
        assert!(samples.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn invalid_steps_are_rejected() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = TimeSampler::FixedStep { step }
                .instants(&[kin("a", 0.0, 1.0)])
                .unwrap_err();
            assert!(matches!(err, DeconflictError::InvalidTimeStep(_)));
        }
    }

    #[test]
    fn sample_limit_is_enforced() {
        let err = fixed_step(0.0, 1000.0, 0.001, 1000).unwrap_err();
        assert!(matches!(err, DeconflictError::TooManySamples { .. }));
    }

    #[test]
    fn fixed_step_covers_union_of_windows() {
        let trajectories = vec![kin("a", 2.0, 4.0), kin("b", 0.0, 3.0)];
        let samples = TimeSampler::FixedStep { step: 1.0 }
            .instants(&trajectories)
            .unwrap();
        assert_eq!(samples, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn exact_merges_own_timestamps() {
        let timed = Trajectory::timed_waypoints(
            "o",
            vec![
                TimedPoint { position: SpatialPoint::ORIGIN, time: 1.0 },
                TimedPoint { position: SpatialPoint::ORIGIN, time: 2.5 },
            ],
        )
        .unwrap();
        let samples = TimeSampler::Exact
            .instants(&[timed, kin("k", 0.0, 2.5)])
            .unwrap();
        assert_eq!(samples, vec![0.0, 1.0, 2.5]);
    }

    #[test]
    fn no_trajectories_no_samples() {
        assert!(TimeSampler::FixedStep { step: 1.0 }.instants(&[]).unwrap().is_empty());
        assert!(TimeSampler::Exact.instants(&[]).unwrap().is_empty());
    }
}
