//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use metalca::{
    EnergySource, MetalType, ProductionRoute, Project, ScenarioChanges, Stage, StageRecord,
    TransportMode,
};

/// Builder for creating `Stage` instances.
pub struct StageBuilder {
    stage: Stage,
}

impl StageBuilder {
    /// Create a new builder with moderate, valid values.
    pub fn new(name: &str) -> Self {
        Self {
            stage: Stage {
                name: name.to_string(),
                material_type: String::new(),
                energy_usage: 5.0,
                water_usage: 3.0,
                waste_generated: 1.0,
                co2_emissions: 4.0,
                transport_mode: TransportMode::Truck,
                transport_distance: 250.0,
                fuel_type: "diesel".to_string(),
                recycling_percentage: 30.0,
                efficiency: 80.0,
            },
        }
    }

    pub fn material(mut self, material: &str) -> Self {
        self.stage.material_type = material.to_string();
        self
    }

    /// Set all four flows at once.
    pub fn flows(mut self, energy: f64, water: f64, waste: f64, co2: f64) -> Self {
        self.stage.energy_usage = energy;
        self.stage.water_usage = water;
        self.stage.waste_generated = waste;
        self.stage.co2_emissions = co2;
        self
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.stage.energy_usage = energy;
        self
    }

    pub fn co2(mut self, co2: f64) -> Self {
        self.stage.co2_emissions = co2;
        self
    }

    pub fn transport(mut self, mode: TransportMode, distance: f64) -> Self {
        self.stage.transport_mode = mode;
        self.stage.transport_distance = distance;
        self
    }

    pub fn recycling(mut self, recycling: f64) -> Self {
        self.stage.recycling_percentage = recycling;
        self
    }

    pub fn efficiency(mut self, efficiency: f64) -> Self {
        self.stage.efficiency = efficiency;
        self
    }

    pub fn build(self) -> Stage {
        self.stage
    }

    /// Build the equivalent raw submission record.
    pub fn record(self) -> StageRecord {
        let s = self.stage;
        StageRecord {
            stage_name: s.name,
            material_type: s.material_type,
            energy_usage: s.energy_usage,
            water_usage: s.water_usage,
            waste_generated: s.waste_generated,
            co2_emissions: s.co2_emissions,
            transport_mode: s.transport_mode.as_str().to_string(),
            transport_distance: s.transport_distance,
            fuel_type: s.fuel_type,
            recycling_percentage: s.recycling_percentage,
            efficiency: s.efficiency,
        }
    }
}

/// Builder for creating `Project` instances.
pub struct ProjectBuilder {
    owner_id: String,
    name: String,
    metal_type: MetalType,
    production_route: Option<ProductionRoute>,
    region: Option<String>,
    stages: Vec<Stage>,
}

impl ProjectBuilder {
    pub fn new(metal_type: MetalType) -> Self {
        Self {
            owner_id: "owner-1".to_string(),
            name: "Test project".to_string(),
            metal_type,
            production_route: None,
            region: None,
            stages: vec![],
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn route(mut self, route: ProductionRoute) -> Self {
        self.production_route = Some(route);
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Add one stage per energy value, other fields at builder defaults.
    pub fn energies(mut self, energies: &[f64]) -> Self {
        for (i, energy) in energies.iter().enumerate() {
            self.stages
                .push(StageBuilder::new(&format!("Stage {}", i + 1)).energy(*energy).build());
        }
        self
    }

    pub fn build(self) -> Project {
        let mut project = Project::new(self.owner_id, self.name, self.metal_type);
        project.production_route = self.production_route;
        project.region = self.region;
        project
            .replace_stages(self.stages)
            .expect("ProjectBuilder stages must be valid");
        project
    }
}

/// The three-stage aluminum project used across tests: energies 1.2, 3.5 and
/// 15.8 GJ.
pub fn aluminum_project() -> Project {
    ProjectBuilder::new(MetalType::Aluminum)
        .name("Extrusion plant")
        .route(ProductionRoute::Primary)
        .stage(
            StageBuilder::new("Mining")
                .flows(1.2, 4.0, 2.5, 1.0)
                .transport(TransportMode::Truck, 600.0)
                .build(),
        )
        .stage(
            StageBuilder::new("Refining")
                .flows(3.5, 8.0, 1.5, 2.8)
                .transport(TransportMode::Rail, 900.0)
                .build(),
        )
        .stage(
            StageBuilder::new("Smelting")
                .flows(15.8, 2.0, 0.8, 11.0)
                .transport(TransportMode::Truck, 0.0)
                .build(),
        )
        .build()
}

/// Scenario changes keeping recycling and efficiency at the builder
/// defaults.
pub fn scenario(energy_source: EnergySource, transport_mode: TransportMode) -> ScenarioChanges {
    ScenarioChanges {
        energy_source,
        transport_mode,
        recycling_rate: 30.0,
        efficiency: 80.0,
    }
}
