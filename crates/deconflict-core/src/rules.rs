//! Scan parameters for deconfliction requests.

use crate::error::{DeconflictError, Result};
use crate::sampler::{validate_step, DEFAULT_MAX_SAMPLES};
use serde::{Deserialize, Serialize};

/// Configuration for a conflict scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanRules {
    /// Minimum separation between any two drones
    pub buffer_distance_m: f64,
    /// Sampling step for fleet sweeps in seconds
    pub time_step_s: f64,
    /// Temporal tolerance for mission scans. `None` uses the mission's own
    /// waypoint spacing.
    pub temporal_tolerance_s: Option<f64>,
    /// Spread fleet sweeps across the rayon thread pool
    pub parallel: bool,
    /// Refuse sweeps that would sample more instants than this
    pub max_samples: usize,
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            buffer_distance_m: 2.0,
            time_step_s: 0.1,
            temporal_tolerance_s: None,
            parallel: true,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

impl ScanRules {
    pub fn with_buffer(buffer_distance_m: f64) -> Self {
        Self {
            buffer_distance_m,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.buffer_distance_m.is_finite() || self.buffer_distance_m <= 0.0 {
            return Err(DeconflictError::InvalidBufferDistance(self.buffer_distance_m));
        }
        validate_step(self.time_step_s)?;
        if let Some(tolerance) = self.temporal_tolerance_s {
            validate_step(tolerance)?;
        }
        Ok(())
    }
}
