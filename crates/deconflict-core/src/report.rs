//! Conflict records and the report handed back to callers.

use crate::geometry::SpatialPoint;
use crate::proximity::distance;
use serde::{Deserialize, Serialize};

/// What a conflict record was found by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    /// Paths pass too close, regardless of timing
    Spatial,
    /// Too close within the mission's temporal tolerance
    Temporal,
    /// Too close at the same sampled instant
    Spatiotemporal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Clear,
    Conflict,
}

/// Whether a scan stops at its first finding or collects all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    FirstConflict,
    Exhaustive,
}

/// One separation violation between two trajectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub participants: [String; 2],
    /// Instant of the violation; absent for spatial findings
    pub time: Option<f64>,
    /// Positions of the participants, in participant order
    pub positions: [SpatialPoint; 2],
    pub distance: f64,
    pub kind: ConflictKind,
    /// Index of the mission waypoint involved (mission scans only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoint_index: Option<usize>,
}

impl ConflictRecord {
    /// Distance recomputed from the stored positions.
    pub fn recomputed_distance(&self) -> f64 {
        distance(&self.positions[0], &self.positions[1])
    }

    /// Re-check the finding independently of the scanner.
    pub fn verify(&self, buffer_distance: f64) -> bool {
        let recomputed = self.recomputed_distance();
        (recomputed - self.distance).abs() <= 1e-9 * self.distance.max(1.0)
            && recomputed < buffer_distance
    }

    pub fn involves(&self, id: &str) -> bool {
        self.participants.iter().any(|p| p == id)
    }
}

/// Result of a scan. Owned by the caller; never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub status: ReportStatus,
    pub policy: ScanPolicy,
    pub conflicts: Vec<ConflictRecord>,
    /// Sampling instants examined
    pub samples: usize,
    /// Distance evaluations performed
    pub evaluations: usize,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.status == ReportStatus::Clear
    }

    pub fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &ConflictRecord> {
        self.conflicts.iter().filter(move |c| c.kind == kind)
    }

    /// First spatial finding, if any.
    pub fn spatial(&self) -> Option<&ConflictRecord> {
        self.of_kind(ConflictKind::Spatial).next()
    }

    /// First temporal finding, if any.
    pub fn temporal(&self) -> Option<&ConflictRecord> {
        self.of_kind(ConflictKind::Temporal).next()
    }
}

/// Accumulates pass results into a [`ConflictReport`].
#[derive(Debug)]
pub struct ReportBuilder {
    policy: ScanPolicy,
    conflicts: Vec<ConflictRecord>,
    samples: usize,
    evaluations: usize,
}

impl ReportBuilder {
    pub fn new(policy: ScanPolicy) -> Self {
        Self {
            policy,
            conflicts: Vec::new(),
            samples: 0,
            evaluations: 0,
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ConflictRecord>) -> &mut Self {
        self.conflicts.extend(records);
        self
    }

    pub fn record_samples(&mut self, samples: usize) -> &mut Self {
        self.samples += samples;
        self
    }

    pub fn record_evaluations(&mut self, evaluations: usize) -> &mut Self {
        self.evaluations += evaluations;
        self
    }

    pub fn build(self) -> ConflictReport {
        let status = if self.conflicts.is_empty() {
            ReportStatus::Clear
        } else {
            ReportStatus::Conflict
        };
        ConflictReport {
            status,
            policy: self.policy,
            conflicts: self.conflicts,
            samples: self.samples,
            evaluations: self.evaluations,
        }
    }
}
