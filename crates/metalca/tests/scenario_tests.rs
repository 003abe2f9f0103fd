//! Tests for scenario simulation through the engine.

mod common;

use std::sync::Arc;

use common::{aluminum_project, scenario, ProjectBuilder, StageBuilder};
use metalca::{
    EnergySource, LcaEngine, LcaError, MetalType, ScenarioChanges, ScenarioRequest,
    TransportMode,
};

#[test]
fn test_renewable_scenario_improves_energy() {
    let engine = LcaEngine::with_defaults();
    let project = ProjectBuilder::new(MetalType::Aluminum)
        .energies(&[1.2, 3.5, 15.8])
        .build();

    let result = engine
        .simulate(&project, scenario(EnergySource::Renewable, TransportMode::Truck))
        .unwrap();

    assert_eq!(result.original_totals.linear.energy, 20.5);
    assert!(result.predicted_score.sustainability >= result.original_score.sustainability);
    assert!(result.improvements.energy_reduction > 0.0);
}

#[test]
fn test_simulation_does_not_mutate_stages() {
    let engine = LcaEngine::with_defaults();
    let project = aluminum_project();
    let stages_before = project.stages().to_vec();
    let scores_before = project.scores;

    engine
        .simulate(&project, scenario(EnergySource::Nuclear, TransportMode::Ship))
        .unwrap();

    assert_eq!(project.stages(), stages_before.as_slice());
    assert_eq!(project.scores, scores_before);
    assert_eq!(project.history.len(), 1);
}

#[test]
fn test_each_simulation_appends_one_record() {
    let engine = LcaEngine::with_defaults();
    let project = aluminum_project();

    for (i, source) in [
        EnergySource::Renewable,
        EnergySource::Fossil,
        EnergySource::Mixed,
    ]
    .into_iter()
    .enumerate()
    {
        let result = engine
            .simulate(&project, scenario(source, TransportMode::Rail))
            .unwrap();
        assert_eq!(result.sequence, i + 1);
        assert_eq!(project.history.len(), i + 1);
    }

    let records = project.history.records();
    assert_eq!(records[1].scenario_changes.energy_source, EnergySource::Fossil);
}

#[test]
fn test_concurrent_simulations_get_distinct_sequences() {
    let engine = LcaEngine::with_defaults();
    let project = Arc::new(aluminum_project());

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let engine = engine.clone();
            let project = Arc::clone(&project);
            std::thread::spawn(move || {
                engine.simulate(&project, scenario(EnergySource::Renewable, TransportMode::Rail))
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().expect("every concurrent simulation is recorded");
    }

    let sequences: Vec<_> = project.history.records().iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (1..=6).collect::<Vec<_>>());
}

#[test]
fn test_percentages_zero_for_empty_flows() {
    let engine = LcaEngine::with_defaults();
    let project = ProjectBuilder::new(MetalType::Steel)
        .stage(StageBuilder::new("Idle").flows(0.0, 0.0, 0.0, 0.0).build())
        .build();

    let result = engine
        .simulate(&project, scenario(EnergySource::Renewable, TransportMode::Pipeline))
        .unwrap();
    for (_, value) in result.improvements.as_flow_set().iter() {
        assert_eq!(value, 0.0);
    }
}

#[test]
fn test_transport_only_affects_moving_stages() {
    let engine = LcaEngine::with_defaults();
    let stationary = ProjectBuilder::new(MetalType::Copper)
        .stage(
            StageBuilder::new("Casting")
                .transport(TransportMode::Truck, 0.0)
                .build(),
        )
        .build();

    let result = engine
        .simulate(&stationary, scenario(EnergySource::Mixed, TransportMode::Ship))
        .unwrap();
    assert!(result.improvements.co2_reduction.abs() < 1e-9);
}

#[test]
fn test_status_quo_scenario_changes_nothing() {
    let engine = LcaEngine::with_defaults();

    for mode in [
        TransportMode::Truck,
        TransportMode::Rail,
        TransportMode::Ship,
        TransportMode::Pipeline,
    ] {
        let project = ProjectBuilder::new(MetalType::Aluminum)
            .stage(StageBuilder::new("Hauling").transport(mode, 500.0).build())
            .stage(StageBuilder::new("Casting").transport(mode, 0.0).build())
            .build();

        let result = engine
            .simulate(&project, scenario(EnergySource::Mixed, mode))
            .unwrap();
        for (flow, value) in result.improvements.as_flow_set().iter() {
            assert!(value.abs() < 1e-9, "{} {:?}: {}", mode, flow, value);
        }
    }
}

#[test]
fn test_ship_to_truck_worsens_co2() {
    let engine = LcaEngine::with_defaults();
    let project = ProjectBuilder::new(MetalType::Copper)
        .stage(
            StageBuilder::new("Import")
                .transport(TransportMode::Ship, 2_000.0)
                .build(),
        )
        .build();

    let result = engine
        .simulate(&project, scenario(EnergySource::Mixed, TransportMode::Truck))
        .unwrap();
    assert!(result.improvements.co2_reduction < 0.0);
    assert!(result.improvements.energy_reduction.abs() < 1e-9);
}

/// Represents a single invalid scenario request.
struct InvalidScenarioCase {
    name: &'static str,
    energy_source: &'static str,
    transport_mode: &'static str,
    recycling_rate: f64,
    efficiency: f64,
    expected_field: &'static str,
}

const INVALID_SCENARIOS: &[InvalidScenarioCase] = &[
    InvalidScenarioCase {
        name: "unknown_energy_source",
        energy_source: "solar-wind",
        transport_mode: "rail",
        recycling_rate: 50.0,
        efficiency: 80.0,
        expected_field: "energySource",
    },
    InvalidScenarioCase {
        name: "unknown_transport_mode",
        energy_source: "renewable",
        transport_mode: "airship",
        recycling_rate: 50.0,
        efficiency: 80.0,
        expected_field: "transportMode",
    },
    InvalidScenarioCase {
        name: "mixed_transport_mode",
        energy_source: "renewable",
        transport_mode: "mixed",
        recycling_rate: 50.0,
        efficiency: 80.0,
        expected_field: "transportMode",
    },
    InvalidScenarioCase {
        name: "recycling_above_range",
        energy_source: "nuclear",
        transport_mode: "ship",
        recycling_rate: 100.5,
        efficiency: 80.0,
        expected_field: "recyclingRate",
    },
    InvalidScenarioCase {
        name: "negative_efficiency",
        energy_source: "fossil",
        transport_mode: "truck",
        recycling_rate: 20.0,
        efficiency: -1.0,
        expected_field: "efficiency",
    },
];

#[test]
fn test_invalid_scenario_requests() {
    for test_case in INVALID_SCENARIOS {
        let request = ScenarioRequest {
            energy_source: test_case.energy_source.to_string(),
            transport_mode: test_case.transport_mode.to_string(),
            recycling_rate: test_case.recycling_rate,
            efficiency: test_case.efficiency,
        };

        let err = request
            .into_changes()
            .expect_err(&format!("Test '{}': expected rejection", test_case.name));
        assert!(
            err.has_field(test_case.expected_field),
            "Test '{}': expected error on '{}', got {}",
            test_case.name,
            test_case.expected_field,
            err
        );
    }
}

#[test]
fn test_invalid_changes_leave_history_empty() {
    let engine = LcaEngine::with_defaults();
    let project = aluminum_project();
    let changes = ScenarioChanges {
        efficiency: 140.0,
        ..scenario(EnergySource::Renewable, TransportMode::Rail)
    };

    let result = engine.simulate(&project, changes);
    assert!(matches!(result, Err(LcaError::Validation(_))));
    assert!(project.history.is_empty());
}

#[test]
fn test_scenario_request_from_json() {
    let request: ScenarioRequest = serde_json::from_str(
        r#"{"energySource": "renewable", "transportMode": "rail", "recyclingRate": 70, "efficiency": 92}"#,
    )
    .unwrap();
    let changes = request.into_changes().unwrap();
    assert_eq!(changes.energy_source, EnergySource::Renewable);
    assert_eq!(changes.recycling_rate, 70.0);
}
