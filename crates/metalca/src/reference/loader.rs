use std::path::Path;

use crate::error::ReferenceDataError;
use crate::model::{Flow, MetalType};

use super::defaults::{MAX_REDUCTION_FACTOR, REFERENCE_DATA_VERSION};
use super::schema::{BenchmarkRange, CircularityParameters, ReferenceData};

const SCHEMA_JSON: &str = include_str!("../../schema/reference-data-v1.json");

/// Tolerance for the score weights summing to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Loads reference data from a JSON or YAML file (by extension).
pub fn load_reference_data<P: AsRef<Path>>(path: P) -> Result<ReferenceData, ReferenceDataError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ReferenceDataError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        load_reference_data_from_yaml_str(&content)
    } else {
        load_reference_data_from_str(&content)
    }
}

pub fn load_reference_data_from_str(content: &str) -> Result<ReferenceData, ReferenceDataError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;
    load_reference_data_from_value(json_value)
}

pub fn load_reference_data_from_yaml_str(
    content: &str,
) -> Result<ReferenceData, ReferenceDataError> {
    let json_value: serde_json::Value = serde_yaml::from_str(content)?;
    load_reference_data_from_value(json_value)
}

fn load_reference_data_from_value(
    json_value: serde_json::Value,
) -> Result<ReferenceData, ReferenceDataError> {
    validate_schema(&json_value)?;

    let data: ReferenceData = serde_json::from_value(json_value)?;

    validate_reference_data(&data)?;

    log::debug!(
        "Loaded reference data v{} ({}, {} metals)",
        data.version,
        data.methodology,
        data.metals.len()
    );

    Ok(data)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ReferenceDataError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ReferenceDataError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator =
        jsonschema::validator_for(&schema).map_err(|e| ReferenceDataError::Validation {
            message: format!("Failed to compile JSON schema: {}", e),
        })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();

    if !error_messages.is_empty() {
        return Err(ReferenceDataError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

/// Semantic checks the schema cannot express. Also applied to datasets built
/// in code before they enter a store.
pub fn validate_reference_data(data: &ReferenceData) -> Result<(), ReferenceDataError> {
    if data.version != REFERENCE_DATA_VERSION {
        return Err(ReferenceDataError::UnsupportedVersion(data.version.clone()));
    }

    let mut validator = ReferenceValidator::new();
    validator.validate(data);
    validator.finish()
}

struct ReferenceValidator {
    errors: Vec<String>,
}

impl ReferenceValidator {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn validate(&mut self, data: &ReferenceData) {
        if data.methodology.trim().is_empty() {
            self.errors.push("methodology is required".to_string());
        }

        if data.metals.is_empty() {
            self.errors.push("at least one metal profile is required".to_string());
        }

        for (key, profile) in &data.metals {
            match key.parse::<MetalType>() {
                Ok(metal) if metal.as_str() == key => {}
                Ok(metal) => self.errors.push(format!(
                    "metals.{}: key must be the canonical lowercase name '{}'",
                    key,
                    metal.as_str()
                )),
                Err(reason) => self.errors.push(format!("metals.{}: {}", key, reason)),
            }

            self.validate_circularity(&format!("metals.{}.circularity", key), &profile.circularity);
            for (stage, params) in &profile.stage_overrides {
                self.validate_circularity(
                    &format!("metals.{}.stageOverrides.{}", key, stage),
                    params,
                );
            }

            for (flow, value) in profile.score_benchmark.iter() {
                self.check_non_negative(
                    &format!("metals.{}.scoreBenchmark.{}", key, flow.label().to_lowercase()),
                    value,
                );
            }

            for &flow in Flow::all() {
                if let Some(range) = profile.industry_benchmark.range(flow) {
                    self.validate_benchmark_range(
                        &format!("metals.{}.industryBenchmark.{}", key, flow.label().to_lowercase()),
                        range,
                    );
                }
            }
        }

        for &flow in Flow::all() {
            let factors = data.characterization.factors(flow);
            for (category, value) in factors.iter() {
                self.check_non_negative(
                    &format!("characterization.{}.{}", flow.label().to_lowercase(), category.key()),
                    value,
                );
            }
        }

        let weights = &data.score_weights;
        for (flow, value) in weights.iter() {
            self.check_non_negative(
                &format!("scoreWeights.{}", flow.label().to_lowercase()),
                value,
            );
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            self.errors.push(format!(
                "scoreWeights must sum to 1, got {}",
                weights.sum()
            ));
        }

        let shares = &data.emission_shares;
        if !(0.0..=1.0).contains(&shares.energy) || !(0.0..=1.0).contains(&shares.transport) {
            self.errors
                .push("emissionShares values must be between 0 and 1".to_string());
        } else if shares.energy + shares.transport > 1.0 {
            self.errors.push(format!(
                "emissionShares.energy + emissionShares.transport must not exceed 1, got {}",
                shares.energy + shares.transport
            ));
        }

        let sources = &data.energy_sources;
        for (name, value) in [
            ("mixed", sources.mixed),
            ("renewable", sources.renewable),
            ("fossil", sources.fossil),
            ("nuclear", sources.nuclear),
        ] {
            self.check_non_negative(&format!("energySources.{}", name), value);
        }

        let modes = &data.transport_modes;
        for (name, value) in [
            ("truck", modes.truck),
            ("rail", modes.rail),
            ("ship", modes.ship),
            ("pipeline", modes.pipeline),
            ("mixed", modes.mixed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                self.errors.push(format!(
                    "transportModes.{} must be a positive number, got {}",
                    name, value
                ));
            }
        }

        for (name, range) in data.validation.named() {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                self.errors.push(format!(
                    "validation.{}: min must not exceed max ({} > {})",
                    name, range.min, range.max
                ));
            }
        }
    }

    fn validate_circularity(&mut self, path: &str, params: &CircularityParameters) {
        self.check_non_negative(&format!("{}.baseFactor", path), params.base_factor);
        self.check_non_negative(&format!("{}.k1", path), params.k1);
        self.check_non_negative(&format!("{}.k2", path), params.k2);
        if params.base_factor > MAX_REDUCTION_FACTOR {
            self.errors.push(format!(
                "{}.baseFactor must not exceed {}",
                path, MAX_REDUCTION_FACTOR
            ));
        }
    }

    fn validate_benchmark_range(&mut self, path: &str, range: &BenchmarkRange) {
        if !(range.min <= range.avg && range.avg <= range.max) {
            self.errors.push(format!(
                "{}: expected min <= avg <= max, got {} / {} / {}",
                path, range.min, range.avg, range.max
            ));
        }
    }

    fn check_non_negative(&mut self, path: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.errors
                .push(format!("{} must be a non-negative number, got {}", path, value));
        }
    }

    fn finish(self) -> Result<(), ReferenceDataError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ReferenceDataError::Validation {
                message: self.errors.join("; "),
            })
        }
    }
}
