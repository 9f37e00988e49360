//! CLI configuration from environment.

use deconflict_core::ScanRules;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub buffer_distance_m: f64,
    pub time_step_s: f64,
    pub parallel: bool,
    pub max_samples: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        let rules = ScanRules::default();
        Self {
            buffer_distance_m: rules.buffer_distance_m,
            time_step_s: rules.time_step_s,
            parallel: rules.parallel,
            max_samples: rules.max_samples,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            buffer_distance_m: lookup("DECONFLICT_BUFFER_M")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.buffer_distance_m),
            time_step_s: lookup("DECONFLICT_STEP_S")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.time_step_s),
            parallel: lookup("DECONFLICT_PARALLEL")
                .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.parallel),
            max_samples: lookup("DECONFLICT_MAX_SAMPLES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_samples),
            log_format: match lookup("DECONFLICT_LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }

    /// Scan rules for the core engine.
    pub fn rules(&self) -> ScanRules {
        ScanRules {
            buffer_distance_m: self.buffer_distance_m,
            time_step_s: self.time_step_s,
            temporal_tolerance_s: None,
            parallel: self.parallel,
            max_samples: self.max_samples,
        }
    }

    /// Scan rules with command-line values taking precedence over the
    /// environment.
    pub fn rules_with(&self, buffer_distance_m: Option<f64>, time_step_s: Option<f64>) -> ScanRules {
        let mut rules = self.rules();
        if let Some(buffer) = buffer_distance_m {
            rules.buffer_distance_m = buffer;
        }
        if let Some(step) = time_step_s {
            rules.time_step_s = step;
        }
        rules
    }
}
