//! Comparative linear/circular life-cycle assessment for metal production.
//!
//! A [`Project`] is an ordered list of process [`Stage`]s. The engine turns
//! each stage into linear and circular flow metrics, aggregates them into
//! totals and scores, characterizes the totals into impact categories, runs
//! what-if scenarios and assembles report view models. All constants come
//! from a swappable [`ReferenceData`] table.

pub mod benchmark;
pub mod engine;
pub mod error;
pub mod impact;
pub mod metrics;
pub mod model;
pub mod reference;
pub mod report;
pub mod scenario;
pub mod scoring;
pub mod synthetic;
pub mod telemetry;

pub use benchmark::{BenchmarkEvaluation, BenchmarkEvaluator, ImprovementPotential, RangePosition};
pub use engine::{Assessment, LcaEngine};
pub use error::{
    ComputationError, FieldError, HistoryConflict, LcaError, ReferenceDataError, Result,
    ValidationError,
};
pub use impact::{
    CategoryValues, ImpactAssessment, ImpactCategory, ImpactCategoryTotals,
    ImpactCharacterizationEngine,
};
pub use metrics::{StageMetrics, StageMetricsCalculator};
pub use model::{
    EnergySource, Flow, FlowSet, MetalType, ProductionRoute, Project, ProjectSubmission, Stage,
    StageRecord, TransportMode,
};
pub use reference::{
    load_reference_data, load_reference_data_from_str, ReferenceData, ReferenceDataStore,
};
pub use report::{ReportAssembler, ReportDocument, ReportType};
pub use scenario::{
    Improvements, ScenarioChanges, ScenarioRequest, ScenarioSimulator, SimulationHistory,
    SimulationResult,
};
pub use scoring::{Aggregate, ComparativeTotals, ScoreAggregator, ScoreSet};
pub use synthetic::SyntheticProjectGenerator;
pub use telemetry::{init_logging, LogFormat, LoggingConfig};
