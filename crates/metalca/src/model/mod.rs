pub mod flow;
pub mod project;
pub mod stage;
pub mod types;

pub use flow::{fractional_reduction, Flow, FlowSet};
pub use project::{Project, ProjectSubmission};
pub use stage::{Stage, StageRecord};
pub use types::{EnergySource, MetalType, ProductionRoute, TransportMode};
