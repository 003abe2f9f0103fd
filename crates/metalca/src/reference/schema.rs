use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ComputationError;
use crate::impact::CategoryValues;
use crate::model::{EnergySource, Flow, FlowSet, MetalType, TransportMode};

/// The complete reference dataset used by every computation.
///
/// Read-only once loaded. Replace it through
/// [`ReferenceDataStore::reload`](super::ReferenceDataStore::reload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub version: String,
    /// Label of the characterization methodology, shown in technical reports.
    pub methodology: String,
    /// Per-metal parameters keyed by lowercase metal name.
    pub metals: BTreeMap<String, MetalProfile>,
    pub characterization: CharacterizationTable,
    pub energy_sources: EnergySourceMultipliers,
    pub transport_modes: TransportMultipliers,
    #[serde(default)]
    pub emission_shares: EmissionShares,
    #[serde(default = "default_score_weights")]
    pub score_weights: FlowSet,
    #[serde(default)]
    pub validation: ValidationRanges,
}

pub(crate) fn default_score_weights() -> FlowSet {
    FlowSet::uniform(0.25)
}

impl ReferenceData {
    pub fn metal_profile(&self, metal: MetalType) -> Result<&MetalProfile, ComputationError> {
        self.metals
            .get(metal.as_str())
            .ok_or_else(|| ComputationError::MissingMetalParameters {
                metal: metal.as_str().to_string(),
            })
    }

    /// Resolves the circularity parameters for one stage. A per-stage override
    /// (case-insensitive stage name) wins over the metal-level parameters.
    pub fn circularity_for(
        &self,
        metal: MetalType,
        stage_name: &str,
    ) -> Result<CircularityParameters, ComputationError> {
        let profile = self.metal_profile(metal)?;
        let key = stage_name.trim().to_lowercase();
        let params = profile
            .stage_overrides
            .iter()
            .find(|(name, _)| name.to_lowercase() == key)
            .map(|(_, params)| *params)
            .unwrap_or(profile.circularity);
        Ok(params)
    }

    pub fn score_benchmark(&self, metal: MetalType) -> Result<FlowSet, ComputationError> {
        self.metals
            .get(metal.as_str())
            .map(|p| p.score_benchmark)
            .ok_or_else(|| ComputationError::MissingBenchmark {
                metal: metal.as_str().to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalProfile {
    pub circularity: CircularityParameters,
    /// Overrides keyed by stage name, e.g. `"smelting"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stage_overrides: BTreeMap<String, CircularityParameters>,
    /// Project-total flow level that scores 50 on the circular/linear scales.
    pub score_benchmark: FlowSet,
    pub industry_benchmark: IndustryBenchmark,
}

/// Constants of the circular reduction factor:
/// `clamp(base_factor + k1 * recycling + k2 * (100 - efficiency), 0, 0.95)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularityParameters {
    pub base_factor: f64,
    /// Reduction per recycled percentage point.
    pub k1: f64,
    /// Reduction per percentage point of inefficiency.
    pub k2: f64,
}

/// Per-stage intensity ranges observed in industry, per flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub energy: BenchmarkRange,
    pub water: BenchmarkRange,
    pub co2: BenchmarkRange,
}

impl IndustryBenchmark {
    pub fn range(&self, flow: Flow) -> Option<&BenchmarkRange> {
        match flow {
            Flow::Energy => Some(&self.energy),
            Flow::Water => Some(&self.water),
            Flow::Co2 => Some(&self.co2),
            Flow::Waste => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Characterization factors per flow, each holding one factor per impact
/// category. Complete by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterizationTable {
    pub energy: CategoryValues,
    pub water: CategoryValues,
    pub waste: CategoryValues,
    pub co2: CategoryValues,
}

impl CharacterizationTable {
    pub fn factors(&self, flow: Flow) -> &CategoryValues {
        match flow {
            Flow::Energy => &self.energy,
            Flow::Water => &self.water,
            Flow::Waste => &self.waste,
            Flow::Co2 => &self.co2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySourceMultipliers {
    pub mixed: f64,
    pub renewable: f64,
    pub fossil: f64,
    pub nuclear: f64,
}

impl EnergySourceMultipliers {
    pub fn get(&self, source: EnergySource) -> f64 {
        match source {
            EnergySource::Mixed => self.mixed,
            EnergySource::Renewable => self.renewable,
            EnergySource::Fossil => self.fossil,
            EnergySource::Nuclear => self.nuclear,
        }
    }
}

/// Transport emission intensity per mode, relative to truck. Must be
/// positive: scenarios rescale a stage's transport CO2 by the ratio of the
/// target mode to the stage's own mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportMultipliers {
    pub truck: f64,
    pub rail: f64,
    pub ship: f64,
    pub pipeline: f64,
    /// Stages declared as `mixed`. Never a scenario target.
    #[serde(default = "default_mixed_transport")]
    pub mixed: f64,
}

fn default_mixed_transport() -> f64 {
    1.0
}

impl TransportMultipliers {
    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Truck => self.truck,
            TransportMode::Rail => self.rail,
            TransportMode::Ship => self.ship,
            TransportMode::Pipeline => self.pipeline,
            TransportMode::Mixed => self.mixed,
        }
    }

    /// Factor applied to transport CO2 when a stage moves from `from` to `to`.
    pub fn ratio(&self, from: TransportMode, to: TransportMode) -> f64 {
        if from == to {
            return 1.0;
        }
        self.get(to) / self.get(from)
    }
}

/// Fractions of a stage's CO2 attributed to energy supply and to transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionShares {
    #[serde(default = "default_energy_share")]
    pub energy: f64,
    #[serde(default = "default_transport_share")]
    pub transport: f64,
}

fn default_energy_share() -> f64 {
    0.60
}

fn default_transport_share() -> f64 {
    0.15
}

impl Default for EmissionShares {
    fn default() -> Self {
        Self {
            energy: default_energy_share(),
            transport: default_transport_share(),
        }
    }
}

/// Plausibility bounds for submitted stage magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRanges {
    #[serde(default = "default_energy_range")]
    pub energy_usage: ValueRange,
    #[serde(default = "default_water_range")]
    pub water_usage: ValueRange,
    #[serde(default = "default_waste_range")]
    pub waste_generated: ValueRange,
    #[serde(default = "default_co2_range")]
    pub co2_emissions: ValueRange,
    #[serde(default = "default_distance_range")]
    pub transport_distance: ValueRange,
}

fn default_energy_range() -> ValueRange {
    ValueRange::new(0.0, 100.0)
}

fn default_water_range() -> ValueRange {
    ValueRange::new(0.0, 1_000.0)
}

fn default_waste_range() -> ValueRange {
    ValueRange::new(0.0, 500.0)
}

fn default_co2_range() -> ValueRange {
    ValueRange::new(0.0, 500.0)
}

fn default_distance_range() -> ValueRange {
    ValueRange::new(0.0, 20_000.0)
}

impl Default for ValidationRanges {
    fn default() -> Self {
        Self {
            energy_usage: default_energy_range(),
            water_usage: default_water_range(),
            waste_generated: default_waste_range(),
            co2_emissions: default_co2_range(),
            transport_distance: default_distance_range(),
        }
    }
}

impl ValidationRanges {
    pub(crate) fn named(&self) -> [(&'static str, &ValueRange); 5] {
        [
            ("energyUsage", &self.energy_usage),
            ("waterUsage", &self.water_usage),
            ("wasteGenerated", &self.waste_generated),
            ("co2Emissions", &self.co2_emissions),
            ("transportDistance", &self.transport_distance),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}
