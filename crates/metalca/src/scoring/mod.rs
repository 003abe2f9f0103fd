//! Project totals and composite scores.

use serde::{Deserialize, Serialize};

use crate::error::ComputationError;
use crate::metrics::StageMetrics;
use crate::model::{fractional_reduction, Flow, FlowSet, MetalType};
use crate::reference::ReferenceData;

/// Scores are rounded to this many decimal places so that mathematically
/// equal results compare equal regardless of summation order.
pub const SCORE_DECIMALS: i32 = 6;

/// Composite indicators, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub sustainability: f64,
    pub circular: f64,
    pub linear: f64,
}

impl ScoreSet {
    pub const fn zero() -> Self {
        Self {
            sustainability: 0.0,
            circular: 0.0,
            linear: 0.0,
        }
    }
}

/// Project-level flow totals for both archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparativeTotals {
    pub linear: FlowSet,
    pub circular: FlowSet,
}

impl ComparativeTotals {
    /// Per-flow `(linear - circular) / linear`, 0 where linear is 0.
    pub fn reductions(&self) -> FlowSet {
        self.linear
            .map(|flow, linear| fractional_reduction(linear, self.circular.get(flow)))
    }
}

/// Output of [`ScoreAggregator::aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub stage_count: usize,
    pub totals: ComparativeTotals,
    /// Fractional reductions per flow (0.0-0.95).
    pub reductions: FlowSet,
    pub scores: ScoreSet,
}

impl Aggregate {
    pub fn empty() -> Self {
        Self {
            stage_count: 0,
            totals: ComparativeTotals::default(),
            reductions: FlowSet::zero(),
            scores: ScoreSet::zero(),
        }
    }
}

/// Sums stage metrics and derives the [`ScoreSet`].
///
/// - sustainability: `100 * Σ w_f * reduction_f`
/// - circular: `100 * Σ w_f * b_f / (b_f + circular_f)`
/// - linear: `100 * Σ w_f * b_f / (b_f + linear_f)`
///
/// where `w` are the reference score weights and `b` the metal benchmark.
pub struct ScoreAggregator {
    weights: FlowSet,
    benchmark: FlowSet,
}

impl ScoreAggregator {
    pub fn new(weights: FlowSet, benchmark: FlowSet) -> Self {
        Self { weights, benchmark }
    }

    /// Aggregator using the reference score weights and the benchmark of
    /// `metal`.
    pub fn for_metal(reference: &ReferenceData, metal: MetalType) -> Result<Self, ComputationError> {
        Ok(Self::new(reference.score_weights, reference.score_benchmark(metal)?))
    }

    pub fn aggregate(&self, metrics: &[StageMetrics]) -> Aggregate {
        if metrics.is_empty() {
            return Aggregate::empty();
        }

        let totals = sum_metrics(metrics);
        let reductions = totals.reductions();

        let sustainability = 100.0 * weighted(&self.weights, &reductions);
        let circular = 100.0 * weighted(&self.weights, &self.normalize(&totals.circular));
        let linear = 100.0 * weighted(&self.weights, &self.normalize(&totals.linear));

        Aggregate {
            stage_count: metrics.len(),
            totals,
            reductions,
            scores: ScoreSet {
                sustainability: finalize_score(sustainability),
                circular: finalize_score(circular),
                linear: finalize_score(linear),
            },
        }
    }

    /// `b / (b + x)` per flow: 1 at zero flow, 0.5 at benchmark, 0 if the
    /// benchmark is 0.
    fn normalize(&self, totals: &FlowSet) -> FlowSet {
        totals.map(|flow, value| {
            let benchmark = self.benchmark.get(flow);
            let denominator = benchmark + value;
            if benchmark <= 0.0 || denominator <= 0.0 {
                0.0
            } else {
                benchmark / denominator
            }
        })
    }
}

/// Aggregates a project's stage metrics. A project without stages scores
/// zero and never consults the benchmark table.
pub fn aggregate_project(
    reference: &ReferenceData,
    metal: MetalType,
    metrics: &[StageMetrics],
) -> Result<Aggregate, ComputationError> {
    if metrics.is_empty() {
        return Ok(Aggregate::empty());
    }
    Ok(ScoreAggregator::for_metal(reference, metal)?.aggregate(metrics))
}

/// Left-to-right per-flow sum in stage order.
pub fn sum_metrics(metrics: &[StageMetrics]) -> ComparativeTotals {
    metrics
        .iter()
        .fold(ComparativeTotals::default(), |acc, m| ComparativeTotals {
            linear: acc.linear.add(&m.linear),
            circular: acc.circular.add(&m.circular),
        })
}

fn weighted(weights: &FlowSet, values: &FlowSet) -> f64 {
    Flow::all()
        .iter()
        .map(|&flow| weights.get(flow) * values.get(flow))
        .sum()
}

fn finalize_score(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(SCORE_DECIMALS);
    ((value * factor).round() / factor).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(name: &str, linear: FlowSet, factor: f64) -> StageMetrics {
        StageMetrics {
            stage_name: name.to_string(),
            linear,
            circular: linear.map(|_, v| v * (1.0 - factor)),
            reduction_factor: factor,
        }
    }

    fn aggregator() -> ScoreAggregator {
        ScoreAggregator::new(FlowSet::uniform(0.25), FlowSet::new(18.5, 12.0, 5.0, 15.0))
    }

    #[test]
    fn test_empty_project_scores_zero() {
        let aggregate = aggregator().aggregate(&[]);
        assert_eq!(aggregate.scores, ScoreSet::zero());
        assert_eq!(aggregate.totals, ComparativeTotals::default());
        assert_eq!(aggregate.stage_count, 0);
    }

    #[test]
    fn test_energy_totals_sum_exactly() {
        let stages = vec![
            metrics("a", FlowSet::new(1.2, 1.0, 1.0, 1.0), 0.2),
            metrics("b", FlowSet::new(3.5, 1.0, 1.0, 1.0), 0.2),
            metrics("c", FlowSet::new(15.8, 1.0, 1.0, 1.0), 0.2),
        ];
        let aggregate = aggregator().aggregate(&stages);
        assert_eq!(aggregate.totals.linear.energy, 20.5);
    }

    #[test]
    fn test_sustainability_is_weighted_reduction() {
        let stages = vec![metrics("a", FlowSet::new(10.0, 10.0, 10.0, 10.0), 0.4)];
        let aggregate = aggregator().aggregate(&stages);
        assert!((aggregate.scores.sustainability - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_linear_flow_contributes_nothing() {
        let stages = vec![metrics("a", FlowSet::new(10.0, 0.0, 0.0, 0.0), 0.4)];
        let aggregate = aggregator().aggregate(&stages);
        assert_eq!(aggregate.reductions.water, 0.0);
        assert!((aggregate.scores.sustainability - 10.0).abs() < 1e-6);
        assert!(aggregate.scores.circular.is_finite());
    }

    #[test]
    fn test_circular_score_not_below_linear_score() {
        let stages = vec![
            metrics("a", FlowSet::new(12.0, 6.0, 2.0, 9.0), 0.3),
            metrics("b", FlowSet::new(8.0, 3.0, 1.0, 4.0), 0.1),
        ];
        let scores = aggregator().aggregate(&stages).scores;
        assert!(scores.circular >= scores.linear);
        assert!(scores.linear > 0.0 && scores.circular <= 100.0);
    }

    #[test]
    fn test_flow_at_benchmark_scores_fifty() {
        let benchmark = FlowSet::new(18.5, 12.0, 5.0, 15.0);
        let stages = vec![metrics("a", benchmark, 0.0)];
        let scores = aggregator().aggregate(&stages).scores;
        assert!((scores.linear - 50.0).abs() < 1e-6);
        assert!((scores.circular - 50.0).abs() < 1e-6);
        assert_eq!(scores.sustainability, 0.0);
    }

    #[test]
    fn test_aggregate_project_skips_benchmark_for_empty_projects() {
        let mut reference = crate::reference::builtin();
        reference.metals.clear();
        let aggregate = aggregate_project(&reference, MetalType::Copper, &[]).unwrap();
        assert_eq!(aggregate, Aggregate::empty());

        let stages = vec![metrics("a", FlowSet::uniform(1.0), 0.1)];
        assert!(matches!(
            aggregate_project(&reference, MetalType::Copper, &stages),
            Err(ComputationError::MissingBenchmark { .. })
        ));
    }

    #[test]
    fn test_zero_benchmark_is_guarded() {
        let agg = ScoreAggregator::new(FlowSet::uniform(0.25), FlowSet::zero());
        let stages = vec![metrics("a", FlowSet::zero(), 0.5)];
        let scores = agg.aggregate(&stages).scores;
        assert_eq!(scores.circular, 0.0);
        assert_eq!(scores.linear, 0.0);
    }
}
