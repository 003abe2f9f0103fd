//! Comparison of a project's footprint with industry ranges, plus a
//! confidence indicator and the improvement headroom shown in reports.

use serde::{Deserialize, Serialize};

use crate::error::ComputationError;
use crate::model::{Flow, MetalType, Stage};
use crate::reference::{BenchmarkRange, ReferenceData};
use crate::scoring::Aggregate;

const BASE_CONFIDENCE: f64 = 0.8;
const CONFIDENCE_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePosition {
    BelowRange,
    WithinRange,
    AboveRange,
}

impl RangePosition {
    pub fn classify(value: f64, range: &BenchmarkRange) -> Self {
        if value < range.min {
            RangePosition::BelowRange
        } else if value > range.max {
            RangePosition::AboveRange
        } else {
            RangePosition::WithinRange
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangePosition::BelowRange => "below_range",
            RangePosition::WithinRange => "within_range",
            RangePosition::AboveRange => "above_range",
        }
    }
}

/// Per-stage circular intensity of one flow against its industry range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub flow: Flow,
    pub intensity: f64,
    pub range: BenchmarkRange,
    pub position: RangePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opportunity {
    EnergyEfficiency,
    RecyclingImpact,
    TransportOptimization,
}

impl Opportunity {
    pub fn label(&self) -> &'static str {
        match self {
            Opportunity::EnergyEfficiency => "Energy efficiency",
            Opportunity::RecyclingImpact => "Recycling",
            Opportunity::TransportOptimization => "Transport optimization",
        }
    }
}

/// Improvement headroom in percentage points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementPotential {
    pub energy_efficiency: f64,
    pub recycling_impact: f64,
    pub transport_optimization: f64,
    pub potential_score: f64,
}

impl ImprovementPotential {
    /// Non-zero opportunities, largest first.
    pub fn ranked(&self) -> Vec<(Opportunity, f64)> {
        let mut ranked: Vec<_> = [
            (Opportunity::EnergyEfficiency, self.energy_efficiency),
            (Opportunity::RecyclingImpact, self.recycling_impact),
            (Opportunity::TransportOptimization, self.transport_optimization),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkEvaluation {
    pub comparisons: Vec<BenchmarkComparison>,
    /// 0.0-1.0
    pub confidence: f64,
    pub improvement_potential: ImprovementPotential,
}

pub struct BenchmarkEvaluator<'a> {
    reference: &'a ReferenceData,
}

impl<'a> BenchmarkEvaluator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    pub fn evaluate(
        &self,
        metal: MetalType,
        stages: &[Stage],
        aggregate: &Aggregate,
    ) -> Result<BenchmarkEvaluation, ComputationError> {
        if stages.is_empty() || aggregate.stage_count == 0 {
            return Ok(BenchmarkEvaluation::default());
        }

        let industry = self.reference.metal_profile(metal)?.industry_benchmark;
        let count = aggregate.stage_count as f64;

        let comparisons = Flow::all()
            .iter()
            .filter_map(|&flow| {
                let range = *industry.range(flow)?;
                let intensity = aggregate.totals.circular.get(flow) / count;
                Some(BenchmarkComparison {
                    flow,
                    intensity,
                    range,
                    position: RangePosition::classify(intensity, &range),
                })
            })
            .collect();

        Ok(BenchmarkEvaluation {
            comparisons,
            confidence: confidence(aggregate),
            improvement_potential: improvement_potential(stages, aggregate.scores.sustainability),
        })
    }
}

fn confidence(aggregate: &Aggregate) -> f64 {
    let scores = &aggregate.scores;
    let mut confidence = BASE_CONFIDENCE;
    if (30.0..=95.0).contains(&scores.sustainability) {
        confidence += CONFIDENCE_STEP;
    }
    if scores.circular > scores.linear {
        confidence += CONFIDENCE_STEP;
    }
    confidence.min(1.0)
}

fn improvement_potential(stages: &[Stage], sustainability: f64) -> ImprovementPotential {
    let mean = |f: fn(&Stage) -> f64| stages.iter().map(f).sum::<f64>() / stages.len() as f64;

    let energy_efficiency = ((mean(|s| s.efficiency) - 60.0).max(0.0) * 0.5).min(25.0);
    let recycling_impact = (mean(|s| s.recycling_percentage) * 0.4).min(30.0);
    let transport_optimization = ((1000.0 - mean(|s| s.transport_distance)).max(0.0) / 100.0).min(15.0);

    let total = energy_efficiency + recycling_impact + transport_optimization;
    ImprovementPotential {
        energy_efficiency,
        recycling_impact,
        transport_optimization,
        potential_score: (sustainability + 0.5 * total).min(100.0),
    }
}
