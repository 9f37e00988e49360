//! Pre-defined deconfliction scenarios for demos and smoke tests.

use deconflict_core::{
    ConflictReport, ConflictScanner, FleetScanInput, FleetTrackDescriptor, KinematicDescriptor,
    MissionDescriptor, MissionScanInput, Result, ScanPolicy, ScanRules, SpatialPoint,
    TimedWaypoint,
};

/// What a scenario asks the scanner to do.
#[derive(Debug, Clone)]
pub enum ScenarioRequest {
    Mission(MissionScanInput),
    Fleet { input: FleetScanInput, step_s: f64 },
}

/// A named scan request with the buffer it is meant to be run with.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub buffer_distance_m: f64,
    pub request: ScenarioRequest,
}

impl Scenario {
    /// Run with `rules`, keeping the scenario's own buffer distance.
    pub fn run(&self, rules: &ScanRules) -> Result<ConflictReport> {
        let rules = ScanRules {
            buffer_distance_m: self.buffer_distance_m,
            ..rules.clone()
        };
        let scanner = ConflictScanner::with_rules(&rules)?;

        match &self.request {
            ScenarioRequest::Mission(input) => {
                let (primary, others) = input.to_trajectories()?;
                scanner.scan_mission(&primary, &others, ScanPolicy::FirstConflict)
            }
            ScenarioRequest::Fleet { input, step_s } => {
                scanner.scan_fleet(&input.to_trajectories()?, *step_s, ScanPolicy::Exhaustive)
            }
        }
    }
}

fn straight_mission() -> MissionDescriptor {
    MissionDescriptor {
        id: "primary".to_string(),
        waypoints: vec![SpatialPoint::new(0.0, 0.0, 0.0), SpatialPoint::new(10.0, 0.0, 0.0)],
        time_window: (0.0, 10.0),
    }
}

fn track(id: &str, points: &[(f64, f64, f64, f64)]) -> FleetTrackDescriptor {
    FleetTrackDescriptor {
        id: id.to_string(),
        waypoints: points
            .iter()
            .map(|&(x, y, z, timestamp)| TimedWaypoint { x, y, z, timestamp })
            .collect(),
    }
}

/// Another drone loiters on the mission's midpoint exactly when the
/// mission passes it.
pub fn create_midpoint_scenario() -> Scenario {
    Scenario {
        name: "midpoint".to_string(),
        description: "Drone parked on the mission midpoint at t=5".to_string(),
        buffer_distance_m: 2.0,
        request: ScenarioRequest::Mission(MissionScanInput {
            primary: straight_mission(),
            others: vec![track("drone_1", &[(5.0, 0.0, 0.0, 5.0)])],
        }),
    }
}

/// Another drone flies a parallel track 10m above and to the side.
pub fn create_offset_scenario() -> Scenario {
    Scenario {
        name: "offset".to_string(),
        description: "Parallel track offset by 10m laterally and vertically".to_string(),
        buffer_distance_m: 2.0,
        request: ScenarioRequest::Mission(MissionScanInput {
            primary: straight_mission(),
            others: vec![track(
                "drone_1",
                &[(0.0, 10.0, 10.0, 1.0), (10.0, 10.0, 10.0, 9.0)],
            )],
        }),
    }
}

/// Two constant-velocity drones converging on the same point around t=5.
pub fn create_converging_scenario() -> Scenario {
    Scenario {
        name: "converging".to_string(),
        description: "Two drones converging near (5, 5) around t=5".to_string(),
        buffer_distance_m: 2.5,
        request: ScenarioRequest::Fleet {
            input: FleetScanInput {
                trajectories: vec![
                    KinematicDescriptor {
                        id: "A".to_string(),
                        initial_position: SpatialPoint::new(0.0, 0.0, 0.0),
                        velocity: SpatialPoint::new(1.0, 1.0, 0.2),
                        start_time: 0.0,
                        end_time: 10.0,
                    },
                    KinematicDescriptor {
                        id: "B".to_string(),
                        initial_position: SpatialPoint::new(10.0, 10.0, 0.0),
                        velocity: SpatialPoint::new(-1.0, -1.0, 0.0),
                        start_time: 0.0,
                        end_time: 10.0,
                    },
                ],
            },
            step_s: 0.1,
        },
    }
}

pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        create_midpoint_scenario(),
        create_offset_scenario(),
        create_converging_scenario(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use deconflict_core::ReportStatus;

    #[test]
    fn scenarios_produce_expected_status() {
        let rules = ScanRules::default();
        let statuses: Vec<(String, ReportStatus)> = all_scenarios()
            .iter()
            .map(|s| (s.name.clone(), s.run(&rules).unwrap().status))
            .collect();

        assert_eq!(
            statuses,
            vec![
                ("midpoint".to_string(), ReportStatus::Conflict),
                ("offset".to_string(), ReportStatus::Clear),
                ("converging".to_string(), ReportStatus::Conflict),
            ]
        );
    }
}
