//! Projects: an ordered set of stages plus derived score cache and
//! simulation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::reference::ValidationRanges;
use crate::scenario::SimulationHistory;
use crate::scoring::ScoreSet;

use super::stage::{Stage, StageRecord};
use super::types::{MetalType, ProductionRoute};

/// A submitted LCA project.
///
/// Stages are only replaced wholesale through [`Project::replace_stages`];
/// simulations never touch them and only append to [`Project::history`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub metal_type: MetalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_route: Option<ProductionRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    stages: Vec<Stage>,
    /// Cached scores for the current stages. Cleared whenever stages change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreSet>,
    #[serde(default)]
    pub history: SimulationHistory,
}

impl Project {
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>, metal_type: MetalType) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: name.into(),
            metal_type,
            production_route: None,
            region: None,
            created_at: Utc::now(),
            stages: Vec::new(),
            scores: None,
            history: SimulationHistory::new(),
        }
    }

    /// Builds a project from a submission, validating every stage record.
    pub fn from_submission(
        submission: ProjectSubmission,
        ranges: Option<&ValidationRanges>,
    ) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        if submission.project_name.trim().is_empty() {
            errors.push(crate::error::FieldError::new("projectName", "must not be empty"));
        }

        let metal_type = match submission.metal_type.parse::<MetalType>() {
            Ok(metal) => Some(metal),
            Err(reason) => {
                errors.push(crate::error::FieldError::new("metalType", reason));
                None
            }
        };

        let production_route = match submission.production_route.as_deref() {
            None | Some("") => None,
            Some(route) => match route.parse::<ProductionRoute>() {
                Ok(route) => Some(route),
                Err(reason) => {
                    errors.push(crate::error::FieldError::new("productionRoute", reason));
                    None
                }
            },
        };

        let stages = collect_stages(submission.stages, ranges, &mut errors);

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        let metal_type = metal_type
            .ok_or_else(|| ValidationError::single("metalType", "missing metal type"))?;

        let mut project = Project::new(
            submission.owner_id,
            submission.project_name.trim(),
            metal_type,
        );
        project.production_route = production_route;
        project.region = submission
            .region
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        project.stages = stages;
        Ok(project)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Replaces all stages (re-submission). Invalidates cached scores.
    pub fn replace_stages(&mut self, stages: Vec<Stage>) -> Result<(), ValidationError> {
        for (index, stage) in stages.iter().enumerate() {
            stage
                .validate()
                .map_err(|e| e.with_prefix(&format!("stages[{}]", index)))?;
        }
        self.stages = stages;
        self.scores = None;
        Ok(())
    }

    /// Re-submits stage records, replacing all stages on success.
    pub fn resubmit_stages(
        &mut self,
        records: Vec<StageRecord>,
        ranges: Option<&ValidationRanges>,
    ) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        let stages = collect_stages(records, ranges, &mut errors);
        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }
        self.stages = stages;
        self.scores = None;
        Ok(())
    }
}

fn collect_stages(
    records: Vec<StageRecord>,
    ranges: Option<&ValidationRanges>,
    errors: &mut Vec<crate::error::FieldError>,
) -> Vec<Stage> {
    let mut stages = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match record.into_stage(ranges) {
            Ok(stage) => stages.push(stage),
            Err(e) => errors.extend(e.with_prefix(&format!("stages[{}]", index)).errors),
        }
    }
    stages
}

/// Raw project submission as received from the form/upload layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubmission {
    pub owner_id: String,
    pub project_name: String,
    pub metal_type: String,
    #[serde(default)]
    pub production_route: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub stages: Vec<StageRecord>,
}
