//! Projection of assessments into report view models.

pub mod view;

pub use view::{
    CharacterizationRow, ExecutiveReport, FlowComparison, FlowReduction, FullReport,
    HistorySummary, ImpactComparison, OpportunityItem, ReportDocument, ReportHeader, StageRow,
    TechnicalReport,
};

use serde::{Deserialize, Serialize};

use crate::engine::Assessment;
use crate::error::ValidationError;
use crate::impact::ImpactCategory;
use crate::model::{Flow, Project};
use crate::reference::ReferenceData;

pub const UNTITLED_PROJECT: &str = "Untitled project";
pub const UNSPECIFIED: &str = "Unspecified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Executive,
    Full,
    Technical,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Executive => "executive",
            ReportType::Full => "full",
            ReportType::Technical => "technical",
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "executive" => Ok(ReportType::Executive),
            "full" => Ok(ReportType::Full),
            "technical" => Ok(ReportType::Technical),
            _ => Err(ValidationError::single(
                "reportType",
                format!(
                    "Unknown report type '{}', expected one of: executive, full, technical",
                    s
                ),
            )),
        }
    }
}

/// Builds report documents from an [`Assessment`]. Only re-projects values:
/// fractions become percentages and missing header fields get placeholders.
pub struct ReportAssembler<'a> {
    reference: &'a ReferenceData,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    pub fn assemble(
        &self,
        project: &Project,
        assessment: &Assessment,
        selector: &str,
    ) -> Result<ReportDocument, ValidationError> {
        let report_type = selector.parse::<ReportType>()?;
        Ok(self.assemble_type(project, assessment, report_type))
    }

    pub fn assemble_type(
        &self,
        project: &Project,
        assessment: &Assessment,
        report_type: ReportType,
    ) -> ReportDocument {
        match report_type {
            ReportType::Executive => ReportDocument::Executive(self.executive(project, assessment)),
            ReportType::Full => ReportDocument::Full(self.full(project, assessment, false)),
            ReportType::Technical => {
                ReportDocument::Technical(self.technical(project, assessment))
            }
        }
    }

    fn executive(&self, project: &Project, assessment: &Assessment) -> ExecutiveReport {
        let headline_reductions = Flow::all()
            .iter()
            .map(|&flow| FlowReduction {
                flow,
                label: flow.label().to_string(),
                reduction_percent: percent(assessment.aggregate.reductions.get(flow)),
            })
            .collect();

        let top_opportunities = assessment
            .benchmark
            .improvement_potential
            .ranked()
            .into_iter()
            .map(|(opportunity, points)| OpportunityItem {
                opportunity,
                label: opportunity.label().to_string(),
                points,
            })
            .collect();

        ExecutiveReport {
            header: header(project, assessment),
            scores: assessment.aggregate.scores,
            headline_reductions,
            climate_change: impact_row(assessment, ImpactCategory::ClimateChange),
            confidence: assessment.benchmark.confidence,
            top_opportunities,
        }
    }

    fn full(&self, project: &Project, assessment: &Assessment, with_factors: bool) -> FullReport {
        let totals = &assessment.aggregate.totals;
        let flow_rows = Flow::all()
            .iter()
            .map(|&flow| FlowComparison {
                flow,
                label: flow.label().to_string(),
                unit: flow.unit().to_string(),
                linear: totals.linear.get(flow),
                circular: totals.circular.get(flow),
                reduction_percent: percent(assessment.aggregate.reductions.get(flow)),
            })
            .collect();

        let stages = assessment
            .metrics
            .iter()
            .enumerate()
            .map(|(index, m)| StageRow {
                position: index + 1,
                stage_name: m.stage_name.clone(),
                linear: m.linear,
                circular: m.circular,
                reduction_factor: with_factors.then_some(m.reduction_factor),
            })
            .collect();

        let impacts = ImpactCategory::all()
            .iter()
            .map(|&category| impact_row(assessment, category))
            .collect();

        let history = project
            .history
            .records()
            .into_iter()
            .map(|r| HistorySummary {
                sequence: r.sequence,
                timestamp: r.timestamp,
                energy_source: r.scenario_changes.energy_source,
                transport_mode: r.scenario_changes.transport_mode,
                recycling_rate: r.scenario_changes.recycling_rate,
                efficiency: r.scenario_changes.efficiency,
                original_sustainability: r.original_score.sustainability,
                predicted_sustainability: r.predicted_score.sustainability,
                improvements: r.improvements,
            })
            .collect();

        FullReport {
            header: header(project, assessment),
            scores: assessment.aggregate.scores,
            totals: flow_rows,
            stages,
            impacts,
            benchmarks: assessment.benchmark.comparisons.clone(),
            confidence: assessment.benchmark.confidence,
            improvement_potential: assessment.benchmark.improvement_potential,
            history,
        }
    }

    fn technical(&self, project: &Project, assessment: &Assessment) -> TechnicalReport {
        let characterization_factors = Flow::all()
            .iter()
            .map(|&flow| CharacterizationRow {
                flow,
                factors: *self.reference.characterization.factors(flow),
            })
            .collect();

        TechnicalReport {
            full: self.full(project, assessment, true),
            reference_version: assessment.reference_version.clone(),
            methodology: assessment.methodology.clone(),
            characterization_factors,
            score_weights: self.reference.score_weights,
        }
    }
}

fn header(project: &Project, assessment: &Assessment) -> ReportHeader {
    ReportHeader {
        project_id: project.id,
        project_name: non_empty(Some(project.name.as_str()), UNTITLED_PROJECT),
        owner_id: non_empty(Some(project.owner_id.as_str()), UNSPECIFIED),
        metal_type: project.metal_type.to_string(),
        production_route: project
            .production_route
            .map(|r| r.to_string())
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        region: non_empty(project.region.as_deref(), UNSPECIFIED),
        created_at: project.created_at,
        stage_count: assessment.aggregate.stage_count,
    }
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

fn impact_row(assessment: &Assessment, category: ImpactCategory) -> ImpactComparison {
    let impacts = &assessment.impacts;
    ImpactComparison {
        category,
        label: category.label().to_string(),
        unit: category.unit().to_string(),
        linear: impacts.linear.get(category),
        circular: impacts.circular.get(category),
        reduction_percent: percent(impacts.reductions.get(category)),
    }
}

fn percent(fraction: f64) -> f64 {
    fraction * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_parse() {
        assert_eq!("Executive".parse::<ReportType>(), Ok(ReportType::Executive));
        assert_eq!(" technical ".parse::<ReportType>(), Ok(ReportType::Technical));

        let err = "summary".parse::<ReportType>().unwrap_err();
        assert!(err.has_field("reportType"));
    }

    #[test]
    fn test_non_empty_defaults() {
        assert_eq!(non_empty(None, UNSPECIFIED), "Unspecified");
        assert_eq!(non_empty(Some("  "), UNTITLED_PROJECT), "Untitled project");
        assert_eq!(non_empty(Some(" Asia "), UNSPECIFIED), "Asia");
    }
}
