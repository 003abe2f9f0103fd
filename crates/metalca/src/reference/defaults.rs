//! Built-in reference dataset.
//!
//! Every number the engine uses without an explicit reference file lives
//! here. The values are illustrative defaults for metal production, not
//! certified LCA data; deployments that need a specific database load their
//! own table through [`load_reference_data`](super::load_reference_data).
//!
//! Units: energy in GJ, water in m3, waste in t, CO2 in t. Characterization
//! factors convert those into kg CO2-eq, kg SO2-eq, kg PO4-eq and MJ.

use std::collections::BTreeMap;

use crate::impact::CategoryValues;
use crate::model::{FlowSet, MetalType};

use super::schema::{
    default_score_weights, BenchmarkRange, CharacterizationTable, CircularityParameters,
    EmissionShares, EnergySourceMultipliers, IndustryBenchmark, MetalProfile, ReferenceData,
    TransportMultipliers, ValidationRanges,
};

pub const REFERENCE_DATA_VERSION: &str = "1.0";
pub const DEFAULT_METHODOLOGY: &str = "metalca-default-2024";

/// Upper bound of the circular reduction factor.
pub const MAX_REDUCTION_FACTOR: f64 = 0.95;

// Circularity parameters: (base_factor, k1 per recycled %, k2 per inefficiency %).
const ALUMINUM_CIRCULARITY: CircularityParameters = CircularityParameters {
    base_factor: 0.10,
    k1: 0.0040,
    k2: 0.0010,
};
const COPPER_CIRCULARITY: CircularityParameters = CircularityParameters {
    base_factor: 0.08,
    k1: 0.0035,
    k2: 0.0010,
};
const STEEL_CIRCULARITY: CircularityParameters = CircularityParameters {
    base_factor: 0.06,
    k1: 0.0030,
    k2: 0.0008,
};
const TITANIUM_CIRCULARITY: CircularityParameters = CircularityParameters {
    base_factor: 0.05,
    k1: 0.0025,
    k2: 0.0008,
};

// Project totals that score 50 on the circular/linear scales
// (energy GJ, water m3, waste t, CO2 t).
const ALUMINUM_SCORE_BENCHMARK: FlowSet = FlowSet::new(18.5, 12.0, 5.0, 15.0);
const COPPER_SCORE_BENCHMARK: FlowSet = FlowSet::new(22.0, 16.0, 6.0, 18.0);
const STEEL_SCORE_BENCHMARK: FlowSet = FlowSet::new(26.0, 20.0, 8.0, 22.0);
const TITANIUM_SCORE_BENCHMARK: FlowSet = FlowSet::new(35.0, 25.0, 7.0, 30.0);

const fn range(min: f64, max: f64, avg: f64) -> BenchmarkRange {
    BenchmarkRange { min, max, avg }
}

// Per-stage industry intensity ranges (min, max, avg).
const ALUMINUM_INDUSTRY: IndustryBenchmark = IndustryBenchmark {
    energy: range(12.0, 25.0, 18.5),
    water: range(8.0, 20.0, 12.0),
    co2: range(10.0, 20.0, 15.0),
};
const COPPER_INDUSTRY: IndustryBenchmark = IndustryBenchmark {
    energy: range(15.0, 30.0, 22.0),
    water: range(10.0, 25.0, 16.0),
    co2: range(12.0, 25.0, 18.0),
};
const STEEL_INDUSTRY: IndustryBenchmark = IndustryBenchmark {
    energy: range(18.0, 35.0, 26.0),
    water: range(12.0, 30.0, 20.0),
    co2: range(15.0, 30.0, 22.0),
};
const TITANIUM_INDUSTRY: IndustryBenchmark = IndustryBenchmark {
    energy: range(25.0, 50.0, 35.0),
    water: range(15.0, 35.0, 25.0),
    co2: range(20.0, 40.0, 30.0),
};

// Characterization factors per unit of flow:
// (climate change kg CO2-eq, acidification kg SO2-eq, eutrophication kg PO4-eq, energy demand MJ).
const ENERGY_FACTORS: CategoryValues = CategoryValues::new(0.0, 0.18, 0.012, 1000.0);
const WATER_FACTORS: CategoryValues = CategoryValues::new(0.3, 0.0, 0.0005, 2.5);
const WASTE_FACTORS: CategoryValues = CategoryValues::new(50.0, 0.4, 0.15, 0.0);
const CO2_FACTORS: CategoryValues = CategoryValues::new(1000.0, 0.0, 0.0, 0.0);

const ENERGY_SOURCE_MULTIPLIERS: EnergySourceMultipliers = EnergySourceMultipliers {
    mixed: 1.00,
    renewable: 0.70,
    fossil: 1.10,
    nuclear: 0.85,
};

const TRANSPORT_MULTIPLIERS: TransportMultipliers = TransportMultipliers {
    truck: 1.00,
    rail: 0.45,
    ship: 0.30,
    pipeline: 0.25,
    mixed: 1.00,
};

fn profile(
    circularity: CircularityParameters,
    score_benchmark: FlowSet,
    industry_benchmark: IndustryBenchmark,
) -> MetalProfile {
    MetalProfile {
        circularity,
        stage_overrides: BTreeMap::new(),
        score_benchmark,
        industry_benchmark,
    }
}

/// The built-in dataset, equivalent to the documented defaults above.
pub fn builtin() -> ReferenceData {
    let mut metals = BTreeMap::new();
    metals.insert(
        MetalType::Aluminum.as_str().to_string(),
        profile(ALUMINUM_CIRCULARITY, ALUMINUM_SCORE_BENCHMARK, ALUMINUM_INDUSTRY),
    );
    metals.insert(
        MetalType::Copper.as_str().to_string(),
        profile(COPPER_CIRCULARITY, COPPER_SCORE_BENCHMARK, COPPER_INDUSTRY),
    );
    metals.insert(
        MetalType::Steel.as_str().to_string(),
        profile(STEEL_CIRCULARITY, STEEL_SCORE_BENCHMARK, STEEL_INDUSTRY),
    );
    metals.insert(
        MetalType::Titanium.as_str().to_string(),
        profile(TITANIUM_CIRCULARITY, TITANIUM_SCORE_BENCHMARK, TITANIUM_INDUSTRY),
    );

    ReferenceData {
        version: REFERENCE_DATA_VERSION.to_string(),
        methodology: DEFAULT_METHODOLOGY.to_string(),
        metals,
        characterization: CharacterizationTable {
            energy: ENERGY_FACTORS,
            water: WATER_FACTORS,
            waste: WASTE_FACTORS,
            co2: CO2_FACTORS,
        },
        energy_sources: ENERGY_SOURCE_MULTIPLIERS,
        transport_modes: TRANSPORT_MULTIPLIERS,
        emission_shares: EmissionShares::default(),
        score_weights: default_score_weights(),
        validation: ValidationRanges::default(),
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        builtin()
    }
}
