pub mod defaults;
pub mod loader;
pub mod schema;
pub mod store;

pub use defaults::builtin;
pub use loader::{
    load_reference_data, load_reference_data_from_str, load_reference_data_from_yaml_str,
    validate_reference_data,
};
pub use schema::{
    BenchmarkRange, CharacterizationTable, CircularityParameters, EmissionShares,
    EnergySourceMultipliers, IndustryBenchmark, MetalProfile, ReferenceData,
    TransportMultipliers, ValidationRanges, ValueRange,
};
pub use store::ReferenceDataStore;
