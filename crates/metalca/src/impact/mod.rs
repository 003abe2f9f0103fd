//! Characterization of aggregated flows into impact categories.

use serde::{Deserialize, Serialize};

use crate::model::{fractional_reduction, Flow, FlowSet};
use crate::reference::CharacterizationTable;
use crate::scoring::ComparativeTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactCategory {
    ClimateChange,
    Acidification,
    Eutrophication,
    EnergyDemand,
}

impl ImpactCategory {
    pub fn all() -> &'static [ImpactCategory] {
        &[
            ImpactCategory::ClimateChange,
            ImpactCategory::Acidification,
            ImpactCategory::Eutrophication,
            ImpactCategory::EnergyDemand,
        ]
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ImpactCategory::ClimateChange => "kg CO2-eq",
            ImpactCategory::Acidification => "kg SO2-eq",
            ImpactCategory::Eutrophication => "kg PO4-eq",
            ImpactCategory::EnergyDemand => "MJ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactCategory::ClimateChange => "Climate change",
            ImpactCategory::Acidification => "Acidification",
            ImpactCategory::Eutrophication => "Eutrophication",
            ImpactCategory::EnergyDemand => "Energy demand",
        }
    }

    /// Field name used in reference data files.
    pub fn key(&self) -> &'static str {
        match self {
            ImpactCategory::ClimateChange => "climateChange",
            ImpactCategory::Acidification => "acidification",
            ImpactCategory::Eutrophication => "eutrophication",
            ImpactCategory::EnergyDemand => "energyDemand",
        }
    }
}

impl std::fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per impact category: totals, reductions or characterization
/// factors of a single flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValues {
    pub climate_change: f64,
    pub acidification: f64,
    pub eutrophication: f64,
    pub energy_demand: f64,
}

/// Impact totals of one archetype.
pub type ImpactCategoryTotals = CategoryValues;

impl CategoryValues {
    pub const fn new(
        climate_change: f64,
        acidification: f64,
        eutrophication: f64,
        energy_demand: f64,
    ) -> Self {
        Self {
            climate_change,
            acidification,
            eutrophication,
            energy_demand,
        }
    }

    pub fn get(&self, category: ImpactCategory) -> f64 {
        match category {
            ImpactCategory::ClimateChange => self.climate_change,
            ImpactCategory::Acidification => self.acidification,
            ImpactCategory::Eutrophication => self.eutrophication,
            ImpactCategory::EnergyDemand => self.energy_demand,
        }
    }

    fn set(&mut self, category: ImpactCategory, value: f64) {
        match category {
            ImpactCategory::ClimateChange => self.climate_change = value,
            ImpactCategory::Acidification => self.acidification = value,
            ImpactCategory::Eutrophication => self.eutrophication = value,
            ImpactCategory::EnergyDemand => self.energy_demand = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ImpactCategory, f64)> + '_ {
        ImpactCategory::all()
            .iter()
            .map(move |&category| (category, self.get(category)))
    }
}

/// Characterized totals for both archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub linear: ImpactCategoryTotals,
    pub circular: ImpactCategoryTotals,
    /// Fractional reduction per category, 0 where the linear total is 0.
    pub reductions: CategoryValues,
}

pub struct ImpactCharacterizationEngine<'a> {
    table: &'a CharacterizationTable,
}

impl<'a> ImpactCharacterizationEngine<'a> {
    pub fn new(table: &'a CharacterizationTable) -> Self {
        Self { table }
    }

    pub fn assess(&self, totals: &ComparativeTotals) -> ImpactAssessment {
        let linear = self.characterize(&totals.linear);
        let circular = self.characterize(&totals.circular);

        let mut reductions = CategoryValues::default();
        for &category in ImpactCategory::all() {
            reductions.set(
                category,
                fractional_reduction(linear.get(category), circular.get(category)),
            );
        }

        ImpactAssessment {
            linear,
            circular,
            reductions,
        }
    }

    /// `Σ_flow quantity × factor[flow][category]` for every category.
    pub fn characterize(&self, flows: &FlowSet) -> ImpactCategoryTotals {
        let mut totals = CategoryValues::default();
        for &category in ImpactCategory::all() {
            let total: f64 = Flow::all()
                .iter()
                .map(|&flow| flows.get(flow) * self.table.factors(flow).get(category))
                .sum();
            totals.set(category, if total.is_finite() { total.max(0.0) } else { 0.0 });
        }
        totals
    }
}
