//! Enumerated input values shared by stages, projects and scenarios.

use serde::{Deserialize, Serialize};

/// Metal produced by a project. Reference data is keyed by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalType {
    Aluminum,
    Copper,
    Steel,
    Titanium,
}

impl MetalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalType::Aluminum => "aluminum",
            MetalType::Copper => "copper",
            MetalType::Steel => "steel",
            MetalType::Titanium => "titanium",
        }
    }

    pub fn all() -> &'static [MetalType] {
        &[
            MetalType::Aluminum,
            MetalType::Copper,
            MetalType::Steel,
            MetalType::Titanium,
        ]
    }
}

impl std::fmt::Display for MetalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetalType::Aluminum => write!(f, "Aluminum"),
            MetalType::Copper => write!(f, "Copper"),
            MetalType::Steel => write!(f, "Steel"),
            MetalType::Titanium => write!(f, "Titanium"),
        }
    }
}

impl std::str::FromStr for MetalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aluminum" | "aluminium" => Ok(MetalType::Aluminum),
            "copper" => Ok(MetalType::Copper),
            "steel" => Ok(MetalType::Steel),
            "titanium" => Ok(MetalType::Titanium),
            _ => Err(format!(
                "Unknown metal type '{}', expected one of: aluminum, copper, steel, titanium",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionRoute {
    Primary,
    Secondary,
}

impl std::fmt::Display for ProductionRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductionRoute::Primary => write!(f, "Primary"),
            ProductionRoute::Secondary => write!(f, "Secondary"),
        }
    }
}

impl std::str::FromStr for ProductionRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(ProductionRoute::Primary),
            "secondary" => Ok(ProductionRoute::Secondary),
            _ => Err(format!(
                "Unknown production route '{}', expected one of: primary, secondary",
                s
            )),
        }
    }
}

/// How material moves between stages. `Mixed` is accepted on submitted
/// stages but is not a valid scenario target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Truck,
    Rail,
    Ship,
    Pipeline,
    Mixed,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Truck => "truck",
            TransportMode::Rail => "rail",
            TransportMode::Ship => "ship",
            TransportMode::Pipeline => "pipeline",
            TransportMode::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truck" => Ok(TransportMode::Truck),
            "rail" => Ok(TransportMode::Rail),
            "ship" => Ok(TransportMode::Ship),
            "pipeline" => Ok(TransportMode::Pipeline),
            "mixed" => Ok(TransportMode::Mixed),
            _ => Err(format!(
                "Unknown transport mode '{}', expected one of: truck, rail, ship, pipeline, mixed",
                s
            )),
        }
    }
}

/// Electricity/heat supply assumed by a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    Mixed,
    Renewable,
    Fossil,
    Nuclear,
}

impl EnergySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergySource::Mixed => "mixed",
            EnergySource::Renewable => "renewable",
            EnergySource::Fossil => "fossil",
            EnergySource::Nuclear => "nuclear",
        }
    }
}

impl std::fmt::Display for EnergySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnergySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mixed" => Ok(EnergySource::Mixed),
            "renewable" => Ok(EnergySource::Renewable),
            "fossil" => Ok(EnergySource::Fossil),
            "nuclear" => Ok(EnergySource::Nuclear),
            _ => Err(format!(
                "Unknown energy source '{}', expected one of: mixed, renewable, fossil, nuclear",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_type_parse_is_case_insensitive() {
        assert_eq!("Aluminum".parse::<MetalType>(), Ok(MetalType::Aluminum));
        assert_eq!("STEEL".parse::<MetalType>(), Ok(MetalType::Steel));
        assert_eq!("aluminium".parse::<MetalType>(), Ok(MetalType::Aluminum));
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!("gold".parse::<MetalType>().is_err());
        assert!("tertiary".parse::<ProductionRoute>().is_err());
        assert!("plane".parse::<TransportMode>().is_err());
        assert!("solar".parse::<EnergySource>().is_err());
        assert!("".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_transport_mode_round_trips_through_as_str() {
        for mode in [
            TransportMode::Truck,
            TransportMode::Rail,
            TransportMode::Ship,
            TransportMode::Pipeline,
            TransportMode::Mixed,
        ] {
            assert_eq!(mode.as_str().parse::<TransportMode>(), Ok(mode));
        }
    }
}
