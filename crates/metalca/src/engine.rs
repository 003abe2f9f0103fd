//! Entry point tying the calculators together over one reference snapshot.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info_span};

use crate::benchmark::{BenchmarkEvaluation, BenchmarkEvaluator};
use crate::error::Result;
use crate::impact::{ImpactAssessment, ImpactCharacterizationEngine};
use crate::metrics::{StageMetrics, StageMetricsCalculator};
use crate::model::{Project, ProjectSubmission, StageRecord};
use crate::reference::{ReferenceData, ReferenceDataStore};
use crate::report::{ReportAssembler, ReportDocument, ReportType};
use crate::scenario::{ScenarioChanges, ScenarioSimulator, SimulationResult};
use crate::scoring::{aggregate_project, Aggregate};

/// Everything computed for one project. Input to report assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub metrics: Vec<StageMetrics>,
    pub aggregate: Aggregate,
    pub impacts: ImpactAssessment,
    pub benchmark: BenchmarkEvaluation,
    pub reference_version: String,
    pub methodology: String,
}

/// Facade over the calculators.
///
/// Every call takes a single snapshot of the reference data, so a concurrent
/// [`ReferenceDataStore::reload`] never mixes two tables within one result.
#[derive(Clone)]
pub struct LcaEngine {
    store: Arc<ReferenceDataStore>,
}

impl LcaEngine {
    pub fn new(store: Arc<ReferenceDataStore>) -> Self {
        Self { store }
    }

    /// Engine over the built-in reference data.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(ReferenceDataStore::with_defaults()))
    }

    pub fn store(&self) -> &Arc<ReferenceDataStore> {
        &self.store
    }

    /// Validates a submission against the current reference ranges and builds
    /// the project.
    pub fn submit(&self, submission: ProjectSubmission) -> Result<Project> {
        let reference = self.store.snapshot();
        let _span = info_span!("submit", stages = submission.stages.len()).entered();

        let project = Project::from_submission(submission, Some(&reference.validation))?;
        debug!(project_id = %project.id, "Project submitted");
        Ok(project)
    }

    /// Replaces the project's stages with validated records. The cached
    /// scores are cleared; nothing changes when any record is rejected.
    pub fn resubmit(&self, project: &mut Project, records: Vec<StageRecord>) -> Result<()> {
        let reference = self.store.snapshot();
        let _span = info_span!("resubmit", project_id = %project.id, stages = records.len()).entered();

        project.resubmit_stages(records, Some(&reference.validation))?;
        Ok(())
    }

    pub fn assess(&self, project: &Project) -> Result<Assessment> {
        let reference = self.store.snapshot();
        assess_with(&reference, project)
    }

    /// Recomputes and caches the project's scores, e.g. after its stages
    /// were re-submitted.
    pub fn refresh_scores(&self, project: &mut Project) -> Result<()> {
        let reference = self.store.snapshot();
        let _span = info_span!("refresh_scores", project_id = %project.id).entered();

        let metrics =
            StageMetricsCalculator::new(&reference).calculate_all(project.stages(), project.metal_type)?;
        let aggregate = aggregate_project(&reference, project.metal_type, &metrics)?;
        project.scores = Some(aggregate.scores);
        debug!(scores = ?aggregate.scores, "Scores refreshed");
        Ok(())
    }

    pub fn simulate(&self, project: &Project, changes: ScenarioChanges) -> Result<SimulationResult> {
        let reference = self.store.snapshot();
        let _span = info_span!("simulate",
            project_id = %project.id,
            energy_source = %changes.energy_source,
            transport_mode = %changes.transport_mode,
        )
        .entered();

        let result = ScenarioSimulator::new(&reference).simulate(project, &changes)?;
        debug!(
            sequence = result.sequence,
            original = result.original_score.sustainability,
            predicted = result.predicted_score.sustainability,
            "Scenario simulated"
        );
        Ok(result)
    }

    pub fn report(&self, project: &Project, selector: &str) -> Result<ReportDocument> {
        let report_type = selector.parse::<ReportType>()?;
        let reference = self.store.snapshot();
        let _span = info_span!("report", project_id = %project.id, report_type = report_type.as_str()).entered();

        let assessment = assess_with(&reference, project)?;
        let document = {
            let _step = info_span!("assemble_report").entered();
            ReportAssembler::new(&reference).assemble_type(project, &assessment, report_type)
        };
        Ok(document)
    }
}

fn assess_with(reference: &ReferenceData, project: &Project) -> Result<Assessment> {
    let _span = info_span!("assess",
        project_id = %project.id,
        metal = %project.metal_type,
        stages = project.stages().len(),
    )
    .entered();

    // Step 1: per-stage metrics
    let metrics = {
        let _step = info_span!("stage_metrics").entered();
        StageMetricsCalculator::new(reference).calculate_all(project.stages(), project.metal_type)?
    };

    // Step 2: totals and scores
    let aggregate = {
        let _step = info_span!("aggregate_scores").entered();
        let aggregate = aggregate_project(reference, project.metal_type, &metrics)?;
        debug!(scores = ?aggregate.scores, "Aggregated");
        aggregate
    };

    // Step 3: impact categories
    let impacts = {
        let _step = info_span!("characterize_impacts").entered();
        ImpactCharacterizationEngine::new(&reference.characterization).assess(&aggregate.totals)
    };

    // Step 4: industry benchmarks
    let benchmark = {
        let _step = info_span!("benchmark").entered();
        BenchmarkEvaluator::new(reference).evaluate(project.metal_type, project.stages(), &aggregate)?
    };

    Ok(Assessment {
        metrics,
        aggregate,
        impacts,
        benchmark,
        reference_version: reference.version.clone(),
        methodology: reference.methodology.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LcaError;
    use crate::model::{EnergySource, MetalType, Stage, TransportMode};
    use crate::reference::builtin;

    fn project() -> Project {
        let mut project = Project::new("owner", "Wire drawing", MetalType::Copper);
        project
            .replace_stages(vec![Stage {
                name: "Drawing".to_string(),
                material_type: "Copper".to_string(),
                energy_usage: 12.0,
                water_usage: 6.0,
                waste_generated: 1.5,
                co2_emissions: 7.0,
                transport_mode: TransportMode::Rail,
                transport_distance: 400.0,
                fuel_type: "electricity".to_string(),
                recycling_percentage: 45.0,
                efficiency: 88.0,
            }])
            .unwrap();
        project
    }

    #[test]
    fn test_refresh_scores_caches_aggregate() {
        let engine = LcaEngine::with_defaults();
        let mut project = project();
        engine.refresh_scores(&mut project).unwrap();

        let assessment = engine.assess(&project).unwrap();
        assert_eq!(project.scores, Some(assessment.aggregate.scores));
    }

    #[test]
    fn test_assess_carries_reference_labels() {
        let engine = LcaEngine::with_defaults();
        let assessment = engine.assess(&project()).unwrap();
        assert_eq!(assessment.reference_version, "1.0");
        assert_eq!(assessment.methodology, "metalca-default-2024");
        assert_eq!(assessment.metrics.len(), 1);
    }

    #[test]
    fn test_reload_changes_later_results_only() {
        let engine = LcaEngine::with_defaults();
        let project = project();
        let before = engine.assess(&project).unwrap();

        let mut data = builtin();
        data.metals.get_mut("copper").unwrap().circularity.base_factor = 0.3;
        engine.store().reload(data).unwrap();

        let after = engine.assess(&project).unwrap();
        assert!(after.aggregate.scores.sustainability > before.aggregate.scores.sustainability);
    }

    #[test]
    fn test_simulate_appends_to_history() {
        let engine = LcaEngine::with_defaults();
        let project = project();
        let changes = ScenarioChanges {
            energy_source: EnergySource::Nuclear,
            transport_mode: TransportMode::Ship,
            recycling_rate: 60.0,
            efficiency: 90.0,
        };
        let result = engine.simulate(&project, changes).unwrap();
        assert_eq!(result.sequence, 1);
        assert_eq!(project.history.len(), 1);
    }

    #[test]
    fn test_unknown_selector_rejected_before_assessment() {
        let engine = LcaEngine::with_defaults();
        let mut data = builtin();
        data.metals.remove("copper");
        engine.store().reload(data).unwrap();
        let project = project();

        match engine.report(&project, "quarterly") {
            Err(LcaError::Validation(err)) => assert!(err.has_field("reportType")),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
        assert!(matches!(
            engine.report(&project, "full"),
            Err(LcaError::Computation(_))
        ));
    }

    #[test]
    fn test_submit_applies_reference_ranges() {
        let engine = LcaEngine::with_defaults();
        let submission = ProjectSubmission {
            owner_id: "owner".to_string(),
            project_name: "Cathode plant".to_string(),
            metal_type: "copper".to_string(),
            stages: vec![StageRecord {
                stage_name: "Electrowinning".to_string(),
                energy_usage: 150.0,
                transport_mode: "rail".to_string(),
                recycling_percentage: 20.0,
                efficiency: 75.0,
                ..StageRecord::default()
            }],
            ..ProjectSubmission::default()
        };

        let err = match engine.submit(submission) {
            Err(LcaError::Validation(err)) => err,
            other => panic!("expected validation error, got {:?}", other.map(|p| p.id)),
        };
        assert!(err.has_field("stages[0].energyUsage"));
    }
}
