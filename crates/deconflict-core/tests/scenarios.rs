//! End-to-end scan scenarios for both scan modes.

use deconflict_core::{
    ConflictKind, ConflictScanner, DeconflictError, ReportStatus, ScanPolicy, ScanRules,
    SpatialPoint, TimedPoint, Trajectory,
};

fn p(x: f64, y: f64, z: f64) -> SpatialPoint {
    SpatialPoint::new(x, y, z)
}

fn mission() -> Trajectory {
    Trajectory::waypoints("primary", vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)], 0.0, 10.0).unwrap()
}

fn timed(id: &str, points: &[(SpatialPoint, f64)]) -> Trajectory {
    Trajectory::timed_waypoints(
        id,
        points
            .iter()
            .map(|&(position, time)| TimedPoint { position, time })
            .collect(),
    )
    .unwrap()
}

fn converging_pair() -> Vec<Trajectory> {
    vec![
        Trajectory::kinematic("A", p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.2), 0.0, 10.0).unwrap(),
        Trajectory::kinematic("B", p(10.0, 10.0, 0.0), p(-1.0, -1.0, 0.0), 0.0, 10.0).unwrap(),
    ]
}

#[test]
fn mission_on_top_of_fleet_sample_is_a_temporal_conflict() {
    let scanner = ConflictScanner::new(2.0).unwrap();
    let others = vec![timed("drone_1", &[(p(5.0, 0.0, 0.0), 5.0)])];

    let report = scanner
        .scan_mission(&mission(), &others, ScanPolicy::FirstConflict)
        .unwrap();

    assert_eq!(report.status, ReportStatus::Conflict);
    assert!(report.spatial().is_none());
    let temporal = report.temporal().expect("temporal conflict");
    assert_eq!(temporal.time, Some(5.0));
    assert_eq!(temporal.distance, 0.0);
    assert_eq!(temporal.positions[0], p(5.0, 0.0, 0.0));
    assert!(temporal.verify(2.0));
}

#[test]
fn distant_fleet_leaves_mission_clear() {
    let scanner = ConflictScanner::new(2.0).unwrap();
    let others = vec![timed(
        "drone_1",
        &[(p(0.0, 10.0, 10.0), 1.0), (p(10.0, 10.0, 10.0), 9.0)],
    )];

    let report = scanner
        .scan_mission(&mission(), &others, ScanPolicy::FirstConflict)
        .unwrap();

    assert_eq!(report.status, ReportStatus::Clear);
    assert!(report.conflicts.is_empty());
    assert_eq!(report.samples, 4);
    // 2x2 spatial comparisons plus 2 samples against 2 waypoints.
    assert_eq!(report.evaluations, 8);
}

#[test]
fn converging_kinematic_pair_conflicts_near_midpoint() {
    let scanner = ConflictScanner::new(2.5).unwrap();
    let report = scanner
        .scan_fleet(&converging_pair(), 0.1, ScanPolicy::Exhaustive)
        .unwrap();

    assert_eq!(report.status, ReportStatus::Conflict);
    assert_eq!(report.samples, 101);
    assert_eq!(report.evaluations, 101);
    assert_eq!(report.conflicts.len(), 16);

    let first = report.conflicts.first().unwrap();
    let last = report.conflicts.last().unwrap();
    assert!((first.time.unwrap() - 4.2).abs() < 1e-9);
    assert!((last.time.unwrap() - 5.7).abs() < 1e-9);

    for record in &report.conflicts {
        assert_eq!(record.kind, ConflictKind::Spatiotemporal);
        assert_eq!(record.participants, ["A".to_string(), "B".to_string()]);
        assert!(record.distance < 2.5);
        assert!(record.verify(2.5));
    }

    let closest = report
        .conflicts
        .iter()
        .find(|c| (c.time.unwrap() - 5.0).abs() < 1e-9)
        .unwrap();
    assert!((closest.distance - 1.0).abs() < 1e-9);
}

#[test]
fn samples_far_from_midpoint_stay_outside_buffer() {
    let fleet = converging_pair();
    for t in [0.0, 2.0, 4.0, 6.0, 8.0, 10.0] {
        let a = fleet[0].position_at(t).unwrap();
        let b = fleet[1].position_at(t).unwrap();
        assert!(a.distance_to(&b) > 2.5, "t={t}");
    }
}

#[test]
fn parallel_and_sequential_sweeps_agree() {
    let fleet: Vec<Trajectory> = (0..6)
        .map(|i| {
            let i = i as f64;
            Trajectory::kinematic(
                format!("D{i}"),
                p(i * 3.0, 0.0, 0.0),
                p(-i * 0.5, 0.3 * i, 0.0),
                0.0,
                20.0,
            )
            .unwrap()
        })
        .collect();

    let parallel = ConflictScanner::with_rules(&ScanRules {
        buffer_distance_m: 4.0,
        parallel: true,
        ..ScanRules::default()
    })
    .unwrap();
    let sequential = ConflictScanner::with_rules(&ScanRules {
        buffer_distance_m: 4.0,
        parallel: false,
        ..ScanRules::default()
    })
    .unwrap();

    let a = parallel.scan_fleet(&fleet, 0.25, ScanPolicy::Exhaustive).unwrap();
    let b = sequential.scan_fleet(&fleet, 0.25, ScanPolicy::Exhaustive).unwrap();
    let again = parallel.scan_fleet(&fleet, 0.25, ScanPolicy::Exhaustive).unwrap();

    assert!(!a.conflicts.is_empty());
    assert_eq!(a, b);
    assert_eq!(a, again);
}

#[test]
fn exhaustive_sweep_counts_every_pair_at_every_sample() {
    let fleet: Vec<Trajectory> = (0..4)
        .map(|i| {
            Trajectory::kinematic(
                format!("D{i}"),
                p(i as f64 * 100.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                0.0,
                5.0,
            )
            .unwrap()
        })
        .collect();
    let scanner = ConflictScanner::new(1.0).unwrap();

    let report = scanner.scan_fleet(&fleet, 0.5, ScanPolicy::Exhaustive).unwrap();

    assert_eq!(report.samples, 11);
    assert_eq!(report.evaluations, 11 * 4 * 3 / 2);
    assert!(report.is_clear());
}

#[test]
fn sweep_orders_by_time_then_pair() {
    let fleet: Vec<Trajectory> = ["a", "b", "c"]
        .iter()
        .map(|id| Trajectory::kinematic(*id, p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.0, 1.0).unwrap())
        .collect();
    let scanner = ConflictScanner::new(1.0).unwrap();

    let report = scanner.scan_fleet(&fleet, 0.5, ScanPolicy::Exhaustive).unwrap();

    let order: Vec<(f64, &str, &str)> = report
        .conflicts
        .iter()
        .map(|c| (c.time.unwrap(), c.participants[0].as_str(), c.participants[1].as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (0.0, "a", "b"),
            (0.0, "a", "c"),
            (0.0, "b", "c"),
            (0.5, "a", "b"),
            (0.5, "a", "c"),
            (0.5, "b", "c"),
            (1.0, "a", "b"),
            (1.0, "a", "c"),
            (1.0, "b", "c"),
        ]
    );
}

#[test]
fn swapping_inputs_keeps_status() {
    let scanner = ConflictScanner::new(2.5).unwrap();
    let forward = converging_pair();
    let reversed: Vec<Trajectory> = forward.iter().rev().cloned().collect();

    let a = scanner.scan_fleet(&forward, 0.1, ScanPolicy::Exhaustive).unwrap();
    let b = scanner.scan_fleet(&reversed, 0.1, ScanPolicy::Exhaustive).unwrap();

    assert_eq!(a.status, b.status);
    assert_eq!(a.conflicts.len(), b.conflicts.len());
    for (x, y) in a.conflicts.iter().zip(&b.conflicts) {
        assert_eq!(x.time, y.time);
        assert_eq!(x.participants[0], y.participants[1]);
        assert!((x.distance - y.distance).abs() < 1e-12);
    }
}

#[test]
fn separation_equal_to_buffer_is_not_reported() {
    let fleet = vec![
        Trajectory::kinematic("a", p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), 0.0, 4.0).unwrap(),
        Trajectory::kinematic("b", p(0.0, 3.0, 0.0), p(1.0, 0.0, 0.0), 0.0, 4.0).unwrap(),
    ];

    let at_buffer = ConflictScanner::new(3.0).unwrap();
    assert!(at_buffer
        .scan_fleet(&fleet, 1.0, ScanPolicy::Exhaustive)
        .unwrap()
        .is_clear());

    let just_above = ConflictScanner::new(3.0 + 1e-9).unwrap();
    let report = just_above.scan_fleet(&fleet, 1.0, ScanPolicy::Exhaustive).unwrap();
    assert_eq!(report.conflicts.len(), 5);
}

#[test]
fn invalid_inputs_fail_before_any_report() {
    assert!(matches!(
        ConflictScanner::new(0.0),
        Err(DeconflictError::InvalidBufferDistance(_))
    ));

    let scanner = ConflictScanner::new(1.0).unwrap();
    assert!(matches!(
        scanner.scan_fleet(&converging_pair(), 0.0, ScanPolicy::Exhaustive),
        Err(DeconflictError::InvalidTimeStep(_))
    ));

    let limited = ConflictScanner::with_rules(&ScanRules {
        buffer_distance_m: 1.0,
        max_samples: 10,
        ..ScanRules::default()
    })
    .unwrap();
    assert!(matches!(
        limited.scan_fleet(&converging_pair(), 0.1, ScanPolicy::Exhaustive),
        Err(DeconflictError::TooManySamples { .. })
    ));
}
