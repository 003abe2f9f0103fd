use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::metrics::StageMetricsCalculator;
use crate::model::{fractional_reduction, Project, Stage};
use crate::reference::ReferenceData;
use crate::scoring::{aggregate_project, Aggregate};

use super::{Improvements, ScenarioChanges, SimulationResult};

/// Applies scenario changes to copies of `stages`.
///
/// Recycling and efficiency are replaced outright. Energy and the
/// energy-attributable share of CO2 scale with the energy-source multiplier.
/// The transport-attributable share of CO2 only exists for stages that
/// travel, and scales with the ratio of the target mode's multiplier to the
/// stage's current one, so keeping a stage's own mode leaves it unchanged.
pub fn apply_scenario(
    reference: &ReferenceData,
    stages: &[Stage],
    changes: &ScenarioChanges,
) -> Result<Vec<Stage>> {
    changes.validate()?;

    let energy_multiplier = reference.energy_sources.get(changes.energy_source);
    let modes = reference.transport_modes;
    let shares = reference.emission_shares;

    Ok(stages
        .iter()
        .map(|stage| {
            let transport_share = if stage.transport_distance > 0.0 {
                shares.transport
            } else {
                0.0
            };
            let energy_co2 = stage.co2_emissions * shares.energy;
            let transport_co2 = stage.co2_emissions * transport_share;
            let other_co2 = stage.co2_emissions - energy_co2 - transport_co2;
            let transport_multiplier = modes.ratio(stage.transport_mode, changes.transport_mode);

            Stage {
                energy_usage: stage.energy_usage * energy_multiplier,
                co2_emissions: (other_co2
                    + energy_co2 * energy_multiplier
                    + transport_co2 * transport_multiplier)
                    .max(0.0),
                transport_mode: changes.transport_mode,
                recycling_percentage: changes.recycling_rate,
                efficiency: changes.efficiency,
                ..stage.clone()
            }
        })
        .collect())
}

/// Runs what-if scenarios against a project's stages without touching them.
pub struct ScenarioSimulator<'a> {
    reference: &'a ReferenceData,
}

impl<'a> ScenarioSimulator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Simulates `changes` and appends the outcome to the project's history.
    ///
    /// Concurrent simulations of one project all get recorded, each under its
    /// own sequence number.
    pub fn simulate(&self, project: &Project, changes: &ScenarioChanges) -> Result<SimulationResult> {
        self.simulate_at(project, changes, Utc::now())
    }

    pub fn simulate_at(
        &self,
        project: &Project,
        changes: &ScenarioChanges,
        timestamp: DateTime<Utc>,
    ) -> Result<SimulationResult> {
        let result = self.predict(project, changes, timestamp)?;

        // The prediction is independent of the history; only the append retries.
        let mut attempt = 1usize;
        loop {
            let expected = project.history.len();
            match project.history.append_if_len(expected, result.clone()) {
                Ok(sequence) => {
                    tracing::debug!(sequence, attempt, "Simulation recorded");
                    return Ok(SimulationResult { sequence, ..result });
                }
                Err(conflict) => {
                    tracing::debug!(
                        expected = conflict.expected,
                        actual = conflict.actual,
                        attempt,
                        "Simulation history changed during append, retrying"
                    );
                    attempt += 1;
                }
            }
        }
    }

    /// Computes the outcome without recording it. The returned sequence is 0.
    pub fn predict(
        &self,
        project: &Project,
        changes: &ScenarioChanges,
        timestamp: DateTime<Utc>,
    ) -> Result<SimulationResult> {
        let original = self.aggregate(project, project.stages())?;
        let simulated_stages = apply_scenario(self.reference, project.stages(), changes)?;
        let predicted = self.aggregate(project, &simulated_stages)?;

        let improvements = Improvements::from_percentages(original.totals.circular.map(
            |flow, before| 100.0 * fractional_reduction(before, predicted.totals.circular.get(flow)),
        ));

        Ok(SimulationResult {
            sequence: 0,
            original_score: original.scores,
            predicted_score: predicted.scores,
            original_totals: original.totals,
            predicted_totals: predicted.totals,
            improvements,
            scenario_changes: *changes,
            timestamp,
        })
    }

    fn aggregate(&self, project: &Project, stages: &[Stage]) -> Result<Aggregate> {
        let metrics =
            StageMetricsCalculator::new(self.reference).calculate_all(stages, project.metal_type)?;
        Ok(aggregate_project(self.reference, project.metal_type, &metrics)?)
    }
}
