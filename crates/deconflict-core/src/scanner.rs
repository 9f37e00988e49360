//! Conflict scans.
//!
//! Two scan modes share the same sampling and proximity primitives:
//!
//! - **Mission scan** checks one planned waypoint mission against a fleet of
//!   timestamped tracks with two independent passes (spatial and temporal).
//! - **Fleet sweep** samples a set of constant-velocity tracks at a fixed
//!   step and checks every pair at every instant.
//!
//! Either mode can stop at the first conflict or collect all of them; see
//! [`ScanPolicy`]. Every input is validated before the first comparison, so
//! a scan either fails up front or returns a complete report.

use crate::error::{DeconflictError, Result};
use crate::proximity::ProximityEvaluator;
use crate::report::{ConflictKind, ConflictRecord, ConflictReport, ReportBuilder, ScanPolicy};
use crate::rules::ScanRules;
use crate::sampler::{validate_step, TimeSampler, END_SLACK};
use crate::trajectory::{TimedPoint, Trajectory};
use rayon::prelude::*;
use std::collections::HashSet;

/// Records and work done by one pass or one sampled instant.
#[derive(Debug, Default)]
struct PassOutcome {
    records: Vec<ConflictRecord>,
    evaluations: usize,
}

/// A fleet track resolved to its own timestamped samples.
struct SampledTrack<'a> {
    trajectory: &'a Trajectory,
    samples: Vec<TimedPoint>,
}

/// Orchestrates sampling, position queries and proximity checks.
#[derive(Debug, Clone)]
pub struct ConflictScanner {
    evaluator: ProximityEvaluator,
    rules: ScanRules,
}

impl ConflictScanner {
    /// Scanner with default rules and the given buffer distance.
    pub fn new(buffer_distance: f64) -> Result<Self> {
        Self::with_rules(&ScanRules::with_buffer(buffer_distance))
    }

    pub fn with_rules(rules: &ScanRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            evaluator: ProximityEvaluator::new(rules.buffer_distance_m)?,
            rules: rules.clone(),
        })
    }

    pub fn rules(&self) -> &ScanRules {
        &self.rules
    }

    pub fn evaluator(&self) -> &ProximityEvaluator {
        &self.evaluator
    }

    /// Check a planned mission against a fleet of timestamped tracks.
    ///
    /// The spatial pass compares every mission waypoint with every fleet
    /// sample, ignoring time. The temporal pass pairs each fleet sample
    /// `(t_s, p_s)` with each mission waypoint `i` reached at `t_i`; the
    /// pair conflicts when `|t_i - t_s|` is below the temporal tolerance
    /// and the mission's position at `t_s` on the leg adjoining waypoint
    /// `i` is within the buffer of `p_s`. Both passes always run.
    pub fn scan_mission(
        &self,
        primary: &Trajectory,
        others: &[Trajectory],
        policy: ScanPolicy,
    ) -> Result<ConflictReport> {
        let Some(mission) = primary.points() else {
            return Err(DeconflictError::UnsupportedModel {
                id: primary.id().to_string(),
                expected: "waypoint",
            });
        };
        let interval = primary.waypoint_interval()?;
        let tolerance = self.rules.temporal_tolerance_s.unwrap_or(interval);
        ensure_unique_ids(std::iter::once(primary).chain(others))?;

        let tracks = others
            .iter()
            .map(|trajectory| self.sample_exact(trajectory))
            .collect::<Result<Vec<_>>>()?;
        let fleet_samples: usize = tracks.iter().map(|track| track.samples.len()).sum();

        let spatial = self.spatial_pass(primary, mission, &tracks, policy);
        let temporal = self.temporal_pass(primary, mission, &tracks, tolerance, policy);

        let mut builder = ReportBuilder::new(policy);
        builder
            .extend(spatial.records)
            .extend(temporal.records)
            .record_samples(mission.len() + fleet_samples)
            .record_evaluations(spatial.evaluations + temporal.evaluations);
        Ok(builder.build())
    }

    /// Sweep a set of constant-velocity tracks at a fixed time step.
    ///
    /// At every instant of the union window, each unordered pair of tracks
    /// active at that instant is evaluated once. Records come out ordered by
    /// time, then by the pair's position in the input list. An instant
    /// within rounding noise of a track's window bound counts as that bound.
    pub fn scan_fleet(
        &self,
        trajectories: &[Trajectory],
        step: f64,
        policy: ScanPolicy,
    ) -> Result<ConflictReport> {
        validate_step(step)?;
        if let Some(track) = trajectories.iter().find(|t| !t.is_kinematic()) {
            return Err(DeconflictError::UnsupportedModel {
                id: track.id().to_string(),
                expected: "kinematic",
            });
        }
        ensure_unique_ids(trajectories)?;

        let instants = TimeSampler::FixedStep { step }
            .instants_with_limit(trajectories, self.rules.max_samples)?;

        let mut builder = ReportBuilder::new(policy);
        builder.record_samples(instants.len());
        if trajectories.len() < 2 {
            return Ok(builder.build());
        }

        let outcomes: Vec<PassOutcome> = match policy {
            ScanPolicy::FirstConflict => {
                let mut swept = PassOutcome::default();
                for &t in &instants {
                    let outcome = self.sweep_instant(trajectories, t, step, true)?;
                    swept.evaluations += outcome.evaluations;
                    if !outcome.records.is_empty() {
                        swept.records = outcome.records;
                        break;
                    }
                }
                vec![swept]
            }
            ScanPolicy::Exhaustive if self.rules.parallel => instants
                .par_iter()
                .map(|&t| self.sweep_instant(trajectories, t, step, false))
                .collect::<Result<Vec<_>>>()?,
            ScanPolicy::Exhaustive => instants
                .iter()
                .map(|&t| self.sweep_instant(trajectories, t, step, false))
                .collect::<Result<Vec<_>>>()?,
        };

        for outcome in outcomes {
            builder
                .record_evaluations(outcome.evaluations)
                .extend(outcome.records);
        }
        Ok(builder.build())
    }

    fn sample_exact<'a>(&self, trajectory: &'a Trajectory) -> Result<SampledTrack<'a>> {
        let samples = match trajectory.points() {
            Some(points) => {
                if points.len() > self.rules.max_samples {
                    return Err(DeconflictError::TooManySamples {
                        requested: points.len(),
                        limit: self.rules.max_samples,
                    });
                }
                points.to_vec()
            }
            None => TimeSampler::Exact
                .instants_with_limit(std::slice::from_ref(trajectory), self.rules.max_samples)?
                .into_iter()
                .map(|time| {
                    trajectory
                        .position_at(time)
                        .map(|position| TimedPoint { position, time })
                })
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(SampledTrack {
            trajectory,
            samples,
        })
    }

    fn spatial_pass(
        &self,
        primary: &Trajectory,
        mission: &[TimedPoint],
        tracks: &[SampledTrack<'_>],
        policy: ScanPolicy,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::default();

        for (index, waypoint) in mission.iter().enumerate() {
            for track in tracks {
                for sample in &track.samples {
                    let proximity = self.evaluator.evaluate(&waypoint.position, &sample.position);
                    outcome.evaluations += 1;
                    if !proximity.conflict {
                        continue;
                    }

                    outcome.records.push(ConflictRecord {
                        participants: [primary.id().to_string(), track.trajectory.id().to_string()],
                        time: None,
                        positions: [waypoint.position, sample.position],
                        distance: proximity.distance,
                        kind: ConflictKind::Spatial,
                        waypoint_index: Some(index),
                    });
                    if policy == ScanPolicy::FirstConflict {
                        return outcome;
                    }
                }
            }
        }

        outcome
    }

    fn temporal_pass(
        &self,
        primary: &Trajectory,
        mission: &[TimedPoint],
        tracks: &[SampledTrack<'_>],
        tolerance: f64,
        policy: ScanPolicy,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::default();

        for track in tracks {
            for sample in &track.samples {
                for (index, waypoint) in mission.iter().enumerate() {
                    if (waypoint.time - sample.time).abs() >= tolerance {
                        continue;
                    }
                    let Some(position) = primary.leg_position(index, sample.time) else {
                        continue;
                    };

                    let proximity = self.evaluator.evaluate(&position, &sample.position);
                    outcome.evaluations += 1;
                    if !proximity.conflict {
                        continue;
                    }

                    outcome.records.push(ConflictRecord {
                        participants: [primary.id().to_string(), track.trajectory.id().to_string()],
                        time: Some(sample.time),
                        positions: [position, sample.position],
                        distance: proximity.distance,
                        kind: ConflictKind::Temporal,
                        waypoint_index: Some(index),
                    });
                    if policy == ScanPolicy::FirstConflict {
                        return outcome;
                    }
                    // One record per fleet sample.
                    break;
                }
            }
        }

        outcome
    }

    fn sweep_instant(
        &self,
        trajectories: &[Trajectory],
        t: f64,
        step: f64,
        stop_at_first: bool,
    ) -> Result<PassOutcome> {
        let mut outcome = PassOutcome::default();
        let slack = step * END_SLACK;

        for (i, first) in trajectories.iter().enumerate() {
            let Some(first_time) = first.window().snap(t, slack) else {
                continue;
            };
            let first_position = first.position_at(first_time)?;

            for second in &trajectories[i + 1..] {
                let Some(second_time) = second.window().snap(t, slack) else {
                    continue;
                };
                let second_position = second.position_at(second_time)?;

                let proximity = self.evaluator.evaluate(&first_position, &second_position);
                outcome.evaluations += 1;
                if !proximity.conflict {
                    continue;
                }

                outcome.records.push(ConflictRecord {
                    participants: [first.id().to_string(), second.id().to_string()],
                    time: Some(t),
                    positions: [first_position, second_position],
                    distance: proximity.distance,
                    kind: ConflictKind::Spatiotemporal,
                    waypoint_index: None,
                });
                if stop_at_first {
                    return Ok(outcome);
                }
            }
        }

        Ok(outcome)
    }
}

fn ensure_unique_ids<'a>(trajectories: impl IntoIterator<Item = &'a Trajectory>) -> Result<()> {
    let mut seen = HashSet::new();
    for trajectory in trajectories {
        if !seen.insert(trajectory.id()) {
            return Err(DeconflictError::DuplicateTrajectoryId(
                trajectory.id().to_string(),
            ));
        }
    }
    Ok(())
}
