//! Serializable report view models. Every field is populated; optional
//! project data has already been defaulted by the assembler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::benchmark::{BenchmarkComparison, ImprovementPotential, Opportunity};
use crate::impact::{CategoryValues, ImpactCategory};
use crate::model::{EnergySource, Flow, FlowSet, TransportMode};
use crate::scenario::Improvements;
use crate::scoring::ScoreSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub project_id: Uuid,
    pub project_name: String,
    pub owner_id: String,
    pub metal_type: String,
    pub production_route: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub stage_count: usize,
}

/// Linear vs. circular total of one flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowComparison {
    pub flow: Flow,
    pub label: String,
    pub unit: String,
    pub linear: f64,
    pub circular: f64,
    pub reduction_percent: f64,
}

/// Headline reduction of one flow, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReduction {
    pub flow: Flow,
    pub label: String,
    pub reduction_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactComparison {
    pub category: ImpactCategory,
    pub label: String,
    pub unit: String,
    pub linear: f64,
    pub circular: f64,
    pub reduction_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRow {
    pub position: usize,
    pub stage_name: String,
    pub linear: FlowSet,
    pub circular: FlowSet,
    /// Only present in technical reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_factor: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityItem {
    pub opportunity: Opportunity,
    pub label: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub sequence: usize,
    pub timestamp: DateTime<Utc>,
    pub energy_source: EnergySource,
    pub transport_mode: TransportMode,
    pub recycling_rate: f64,
    pub efficiency: f64,
    pub original_sustainability: f64,
    pub predicted_sustainability: f64,
    pub improvements: Improvements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterizationRow {
    pub flow: Flow,
    pub factors: CategoryValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveReport {
    pub header: ReportHeader,
    pub scores: ScoreSet,
    pub headline_reductions: Vec<FlowReduction>,
    pub climate_change: ImpactComparison,
    pub confidence: f64,
    pub top_opportunities: Vec<OpportunityItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullReport {
    pub header: ReportHeader,
    pub scores: ScoreSet,
    pub totals: Vec<FlowComparison>,
    pub stages: Vec<StageRow>,
    pub impacts: Vec<ImpactComparison>,
    pub benchmarks: Vec<BenchmarkComparison>,
    pub confidence: f64,
    pub improvement_potential: ImprovementPotential,
    pub history: Vec<HistorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalReport {
    #[serde(flatten)]
    pub full: FullReport,
    pub reference_version: String,
    pub methodology: String,
    pub characterization_factors: Vec<CharacterizationRow>,
    pub score_weights: FlowSet,
}

/// Assembled report, tagged with its type when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reportType", rename_all = "lowercase")]
pub enum ReportDocument {
    Executive(ExecutiveReport),
    Full(FullReport),
    Technical(TechnicalReport),
}

impl ReportDocument {
    pub fn header(&self) -> &ReportHeader {
        match self {
            ReportDocument::Executive(r) => &r.header,
            ReportDocument::Full(r) => &r.header,
            ReportDocument::Technical(r) => &r.full.header,
        }
    }

    pub fn scores(&self) -> &ScoreSet {
        match self {
            ReportDocument::Executive(r) => &r.scores,
            ReportDocument::Full(r) => &r.scores,
            ReportDocument::Technical(r) => &r.full.scores,
        }
    }
}
