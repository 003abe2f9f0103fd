//! Tests for report assembly.

mod common;

use common::{aluminum_project, scenario, ProjectBuilder};
use metalca::{EnergySource, ImpactCategory, LcaEngine, LcaError, MetalType, ReportDocument, TransportMode};

/// Represents a single report selector case.
struct SelectorTestCase {
    name: &'static str,
    selector: &'static str,
    expected: Option<&'static str>,
}

const SELECTOR_TESTS: &[SelectorTestCase] = &[
    SelectorTestCase {
        name: "executive_lowercase",
        selector: "executive",
        expected: Some("executive"),
    },
    SelectorTestCase {
        name: "full_mixed_case",
        selector: "Full",
        expected: Some("full"),
    },
    SelectorTestCase {
        name: "technical",
        selector: "technical",
        expected: Some("technical"),
    },
    SelectorTestCase {
        name: "unknown",
        selector: "quarterly",
        expected: None,
    },
    SelectorTestCase {
        name: "empty",
        selector: "",
        expected: None,
    },
];

#[test]
fn test_report_selectors() {
    let engine = LcaEngine::with_defaults();
    let project = aluminum_project();

    for test_case in SELECTOR_TESTS {
        let result = engine.report(&project, test_case.selector);
        match test_case.expected {
            Some(tag) => {
                let document = result.unwrap_or_else(|e| {
                    panic!("Test '{}': Expected report, got {}", test_case.name, e)
                });
                let json = serde_json::to_value(&document).unwrap();
                assert_eq!(json["reportType"], tag, "Test '{}'", test_case.name);
            }
            None => match result {
                Err(LcaError::Validation(err)) => {
                    assert!(err.has_field("reportType"), "Test '{}'", test_case.name)
                }
                other => panic!("Test '{}': Expected validation error, got {:?}", test_case.name, other),
            },
        }
    }
}

#[test]
fn test_header_defaults_applied() {
    let engine = LcaEngine::with_defaults();
    let project = ProjectBuilder::new(MetalType::Copper).name("   ").energies(&[4.0]).build();

    let document = engine.report(&project, "executive").unwrap();
    let header = document.header();
    assert_eq!(header.project_name, "Untitled project");
    assert_eq!(header.production_route, "Unspecified");
    assert_eq!(header.region, "Unspecified");
    assert_eq!(header.metal_type, "Copper");
}

#[test]
fn test_executive_report_content() {
    let engine = LcaEngine::with_defaults();
    let project = aluminum_project();
    let assessment = engine.assess(&project).unwrap();

    let document = engine.report(&project, "executive").unwrap();
    let ReportDocument::Executive(report) = document else {
        panic!("expected executive report");
    };

    assert_eq!(report.scores, assessment.aggregate.scores);
    assert_eq!(report.headline_reductions.len(), 4);
    assert!(
        (report.headline_reductions[0].reduction_percent
            - assessment.aggregate.reductions.energy * 100.0)
            .abs()
            < 1e-9
    );
    assert_eq!(report.climate_change.category, ImpactCategory::ClimateChange);
    assert_eq!(report.climate_change.unit, "kg CO2-eq");
    assert!(report.confidence > 0.0 && report.confidence <= 1.0);
    for pair in report.top_opportunities.windows(2) {
        assert!(pair[0].points >= pair[1].points);
    }
}

#[test]
fn test_full_report_includes_history() {
    let engine = LcaEngine::with_defaults();
    let project = aluminum_project();
    engine
        .simulate(&project, scenario(EnergySource::Renewable, TransportMode::Rail))
        .unwrap();
    engine
        .simulate(&project, scenario(EnergySource::Fossil, TransportMode::Truck))
        .unwrap();

    let ReportDocument::Full(report) = engine.report(&project, "full").unwrap() else {
        panic!("expected full report");
    };

    assert_eq!(report.history.len(), 2);
    assert_eq!(report.history[0].sequence, 1);
    assert_eq!(report.history[1].energy_source, EnergySource::Fossil);
    assert_eq!(report.stages.len(), 3);
    assert!(report.stages.iter().all(|row| row.reduction_factor.is_none()));
    assert_eq!(report.impacts.len(), 4);
    assert_eq!(report.totals[0].linear, 20.5);
    assert_eq!(report.benchmarks.len(), 3);
}

#[test]
fn test_technical_report_adds_methodology() {
    let engine = LcaEngine::with_defaults();
    let project = aluminum_project();

    let ReportDocument::Technical(report) = engine.report(&project, "technical").unwrap() else {
        panic!("expected technical report");
    };

    assert_eq!(report.reference_version, "1.0");
    assert_eq!(report.methodology, "metalca-default-2024");
    assert_eq!(report.characterization_factors.len(), 4);
    assert!((report.score_weights.sum() - 1.0).abs() < 1e-9);
    assert!(report.full.stages.iter().all(|row| row.reduction_factor.is_some()));

    let json = serde_json::to_value(ReportDocument::Technical(report)).unwrap();
    assert!(json["header"].is_object());
    assert!(json["characterizationFactors"].is_array());
}

#[test]
fn test_report_of_empty_project() {
    let engine = LcaEngine::with_defaults();
    let project = ProjectBuilder::new(MetalType::Steel).build();

    let ReportDocument::Full(report) = engine.report(&project, "full").unwrap() else {
        panic!("expected full report");
    };
    assert!(report.stages.is_empty());
    assert_eq!(report.confidence, 0.0);
    for row in &report.totals {
        assert_eq!(row.reduction_percent, 0.0);
    }
}
