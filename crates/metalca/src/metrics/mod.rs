//! Per-stage linear/circular flow metrics.

use serde::{Deserialize, Serialize};

use crate::error::{LcaError, ValidationError};
use crate::model::{FlowSet, MetalType, Stage};
use crate::reference::defaults::MAX_REDUCTION_FACTOR;
use crate::reference::{CircularityParameters, ReferenceData};

/// Linear and circular flows of one stage. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageMetrics {
    pub stage_name: String,
    pub linear: FlowSet,
    pub circular: FlowSet,
    pub reduction_factor: f64,
}

/// `clamp(base + k1 * recycling + k2 * (100 - efficiency), 0, 0.95)`.
pub fn reduction_factor(params: &CircularityParameters, recycling: f64, efficiency: f64) -> f64 {
    let raw = params.base_factor + params.k1 * recycling + params.k2 * (100.0 - efficiency);
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_REDUCTION_FACTOR)
}

/// Converts stages into [`StageMetrics`] using the circularity parameters
/// from a reference snapshot.
pub struct StageMetricsCalculator<'a> {
    reference: &'a ReferenceData,
}

impl<'a> StageMetricsCalculator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Computes metrics for one stage of a project producing `project_metal`.
    ///
    /// The stage's own material type selects the parameters when it names a
    /// known metal; otherwise the project's metal type does.
    pub fn calculate(&self, stage: &Stage, project_metal: MetalType) -> Result<StageMetrics, LcaError> {
        let metal = stage
            .material_type
            .parse::<MetalType>()
            .ok()
            .filter(|m| self.reference.metals.contains_key(m.as_str()))
            .unwrap_or(project_metal);
        let params = self.reference.circularity_for(metal, &stage.name)?;
        Ok(Self::calculate_with(stage, &params)?)
    }

    /// Computes metrics for every stage, preserving stage order.
    pub fn calculate_all(
        &self,
        stages: &[Stage],
        project_metal: MetalType,
    ) -> Result<Vec<StageMetrics>, LcaError> {
        stages
            .iter()
            .enumerate()
            .map(|(index, stage)| {
                self.calculate(stage, project_metal).map_err(|e| match e {
                    LcaError::Validation(v) => {
                        LcaError::Validation(v.with_prefix(&format!("stages[{}]", index)))
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Computes metrics with explicit parameters.
    pub fn calculate_with(
        stage: &Stage,
        params: &CircularityParameters,
    ) -> Result<StageMetrics, ValidationError> {
        stage.validate()?;

        let factor = reduction_factor(params, stage.recycling_percentage, stage.efficiency);
        let linear = stage.flows();
        let circular = linear.map(|_, value| value * (1.0 - factor));

        Ok(StageMetrics {
            stage_name: stage.name.clone(),
            linear,
            circular,
            reduction_factor: factor,
        })
    }
}
