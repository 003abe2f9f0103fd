//! Process stages and their submission records.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};
use crate::reference::{ValidationRanges, ValueRange};

use super::flow::FlowSet;
use super::types::TransportMode;

/// One production step of a project, in production order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub name: String,
    pub material_type: String,
    /// GJ
    pub energy_usage: f64,
    /// m3
    pub water_usage: f64,
    /// t
    pub waste_generated: f64,
    /// t CO2
    pub co2_emissions: f64,
    pub transport_mode: TransportMode,
    /// km
    pub transport_distance: f64,
    pub fuel_type: String,
    /// Share of recycled input, 0-100.
    pub recycling_percentage: f64,
    /// Process efficiency, 0-100.
    pub efficiency: f64,
}

impl Stage {
    /// The submitted flows, i.e. the linear archetype.
    pub fn flows(&self) -> FlowSet {
        FlowSet::new(
            self.energy_usage,
            self.water_usage,
            self.waste_generated,
            self.co2_emissions,
        )
    }

    /// Checks the structural invariants: finite, non-negative magnitudes and
    /// percentages within 0-100. Plausibility ranges apply to submissions
    /// only, see [`LcaEngine::submit`](crate::LcaEngine::submit).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = StageValidator::new(None);
        validator.validate_stage(self);
        validator.finish()
    }
}

/// Raw stage submission as received from the upload/form layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    pub stage_name: String,
    #[serde(default)]
    pub material_type: String,
    pub energy_usage: f64,
    pub water_usage: f64,
    pub waste_generated: f64,
    pub co2_emissions: f64,
    pub transport_mode: String,
    #[serde(default)]
    pub transport_distance: f64,
    #[serde(default)]
    pub fuel_type: String,
    pub recycling_percentage: f64,
    pub efficiency: f64,
}

impl StageRecord {
    /// Validates the record and converts it into a [`Stage`]. All field
    /// problems are reported together.
    pub fn into_stage(self, ranges: Option<&ValidationRanges>) -> Result<Stage, ValidationError> {
        let mut validator = StageValidator::new(ranges);

        if self.stage_name.trim().is_empty() {
            validator.push("stageName", "must not be empty");
        }

        let transport_mode = match self.transport_mode.parse::<TransportMode>() {
            Ok(mode) => Some(mode),
            Err(reason) => {
                validator.push("transportMode", reason);
                None
            }
        };

        validator.check_magnitude("energyUsage", self.energy_usage, |r| &r.energy_usage);
        validator.check_magnitude("waterUsage", self.water_usage, |r| &r.water_usage);
        validator.check_magnitude("wasteGenerated", self.waste_generated, |r| {
            &r.waste_generated
        });
        validator.check_magnitude("co2Emissions", self.co2_emissions, |r| &r.co2_emissions);
        validator.check_magnitude("transportDistance", self.transport_distance, |r| {
            &r.transport_distance
        });
        validator.check_percentage("recyclingPercentage", self.recycling_percentage);
        validator.check_percentage("efficiency", self.efficiency);

        validator.finish()?;

        let transport_mode = transport_mode.ok_or_else(|| {
            ValidationError::single("transportMode", "missing transport mode")
        })?;

        Ok(Stage {
            name: self.stage_name.trim().to_string(),
            material_type: self.material_type.trim().to_string(),
            energy_usage: self.energy_usage,
            water_usage: self.water_usage,
            waste_generated: self.waste_generated,
            co2_emissions: self.co2_emissions,
            transport_mode,
            transport_distance: self.transport_distance,
            fuel_type: self.fuel_type.trim().to_string(),
            recycling_percentage: self.recycling_percentage,
            efficiency: self.efficiency,
        })
    }
}

/// Collects every field problem of a stage before reporting.
pub(crate) struct StageValidator<'a> {
    ranges: Option<&'a ValidationRanges>,
    errors: Vec<FieldError>,
}

impl<'a> StageValidator<'a> {
    pub(crate) fn new(ranges: Option<&'a ValidationRanges>) -> Self {
        Self {
            ranges,
            errors: Vec::new(),
        }
    }

    pub(crate) fn validate_stage(&mut self, stage: &Stage) {
        if stage.name.trim().is_empty() {
            self.push("stageName", "must not be empty");
        }
        self.check_magnitude("energyUsage", stage.energy_usage, |r| &r.energy_usage);
        self.check_magnitude("waterUsage", stage.water_usage, |r| &r.water_usage);
        self.check_magnitude("wasteGenerated", stage.waste_generated, |r| {
            &r.waste_generated
        });
        self.check_magnitude("co2Emissions", stage.co2_emissions, |r| &r.co2_emissions);
        self.check_magnitude("transportDistance", stage.transport_distance, |r| {
            &r.transport_distance
        });
        self.check_percentage("recyclingPercentage", stage.recycling_percentage);
        self.check_percentage("efficiency", stage.efficiency);
    }

    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn check_magnitude(
        &mut self,
        field: &str,
        value: f64,
        range: impl Fn(&ValidationRanges) -> &ValueRange,
    ) {
        if !value.is_finite() {
            self.push(field, "must be a finite number");
            return;
        }
        if value < 0.0 {
            self.push(field, format!("must be >= 0, got {}", value));
            return;
        }
        if let Some(ranges) = self.ranges {
            let range = range(ranges);
            if !range.contains(value) {
                self.push(
                    field,
                    format!("must be between {} and {}, got {}", range.min, range.max, value),
                );
            }
        }
    }

    pub(crate) fn check_percentage(&mut self, field: &str, value: f64) {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            self.push(field, format!("must be between 0 and 100, got {}", value));
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}
