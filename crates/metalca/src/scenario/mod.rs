//! What-if scenarios: hypothetical changes applied to a copy of a project's
//! stages, and the append-only log of their outcomes.

pub mod history;
pub mod simulator;

pub use history::SimulationHistory;
pub use simulator::{apply_scenario, ScenarioSimulator};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};
use crate::model::{EnergySource, FlowSet, TransportMode};
use crate::scoring::{ComparativeTotals, ScoreSet};

/// Hypothetical changes applied uniformly to every stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioChanges {
    pub energy_source: EnergySource,
    /// Target transport mode. `Mixed` is not a valid target.
    pub transport_mode: TransportMode,
    /// Recycling percentage, 0-100.
    pub recycling_rate: f64,
    /// Process efficiency, 0-100.
    pub efficiency: f64,
}

impl ScenarioChanges {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        if self.transport_mode == TransportMode::Mixed {
            errors.push(FieldError::new(
                "transportMode",
                "mixed is not a scenario target, expected one of: truck, rail, ship, pipeline",
            ));
        }
        check_rate(&mut errors, "recyclingRate", self.recycling_rate);
        check_rate(&mut errors, "efficiency", self.efficiency);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

fn check_rate(errors: &mut Vec<FieldError>, field: &str, value: f64) {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        errors.push(FieldError::new(
            field,
            format!("must be between 0 and 100, got {}", value),
        ));
    }
}

/// Scenario as submitted, with the enumerations still as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    pub energy_source: String,
    pub transport_mode: String,
    pub recycling_rate: f64,
    pub efficiency: f64,
}

impl ScenarioRequest {
    /// Parses and validates the request, reporting every bad field at once.
    pub fn into_changes(self) -> Result<ScenarioChanges, ValidationError> {
        let mut errors = Vec::new();

        let energy_source = self
            .energy_source
            .parse::<EnergySource>()
            .map_err(|reason| errors.push(FieldError::new("energySource", reason)))
            .ok();
        let transport_mode = self
            .transport_mode
            .parse::<TransportMode>()
            .map_err(|reason| errors.push(FieldError::new("transportMode", reason)))
            .ok();

        match (energy_source, transport_mode) {
            (Some(energy_source), Some(transport_mode)) => {
                let changes = ScenarioChanges {
                    energy_source,
                    transport_mode,
                    recycling_rate: self.recycling_rate,
                    efficiency: self.efficiency,
                };
                match changes.validate() {
                    Ok(()) if errors.is_empty() => Ok(changes),
                    Ok(()) => Err(ValidationError::new(errors)),
                    Err(e) => {
                        errors.extend(e.errors);
                        Err(ValidationError::new(errors))
                    }
                }
            }
            _ => {
                check_rate(&mut errors, "recyclingRate", self.recycling_rate);
                check_rate(&mut errors, "efficiency", self.efficiency);
                Err(ValidationError::new(errors))
            }
        }
    }
}

impl TryFrom<ScenarioRequest> for ScenarioChanges {
    type Error = ValidationError;

    fn try_from(request: ScenarioRequest) -> Result<Self, Self::Error> {
        request.into_changes()
    }
}

/// Per-flow percentage reductions of the circular totals. Negative when the
/// scenario makes a flow worse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvements {
    pub energy_reduction: f64,
    pub water_reduction: f64,
    pub waste_reduction: f64,
    pub co2_reduction: f64,
}

impl Improvements {
    pub(crate) fn from_percentages(percentages: FlowSet) -> Self {
        Self {
            energy_reduction: percentages.energy,
            water_reduction: percentages.water,
            waste_reduction: percentages.waste,
            co2_reduction: percentages.co2,
        }
    }

    pub fn as_flow_set(&self) -> FlowSet {
        FlowSet::new(
            self.energy_reduction,
            self.water_reduction,
            self.waste_reduction,
            self.co2_reduction,
        )
    }
}

/// Outcome of one simulation. Immutable once appended to a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// 1-based position in the project's history.
    pub sequence: usize,
    pub original_score: ScoreSet,
    pub predicted_score: ScoreSet,
    pub original_totals: ComparativeTotals,
    pub predicted_totals: ComparativeTotals,
    pub improvements: Improvements,
    pub scenario_changes: ScenarioChanges,
    pub timestamp: DateTime<Utc>,
}
