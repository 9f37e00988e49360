//! Strategic deconfliction for planned drone flights.
//!
//! Checks whether a planned flight path comes closer than a buffer distance,
//! at an overlapping time, to other drones' planned or predicted paths.

pub mod error;
pub mod geometry;
pub mod models;
pub mod proximity;
pub mod report;
pub mod rules;
pub mod sampler;
pub mod scanner;
pub mod trajectory;

pub use error::{DeconflictError, Result};
pub use geometry::SpatialPoint;
pub use models::{
    FleetScanInput, FleetTrackDescriptor, KinematicDescriptor, MissionDescriptor,
    MissionScanInput, TimedWaypoint,
};
pub use proximity::{distance, Proximity, ProximityEvaluator};
pub use report::{
    ConflictKind, ConflictRecord, ConflictReport, ReportBuilder, ReportStatus, ScanPolicy,
};
pub use rules::ScanRules;
pub use sampler::TimeSampler;
pub use scanner::ConflictScanner;
pub use trajectory::{TimeWindow, TimedPoint, Trajectory, TrajectoryShape};
