pub mod breach;
pub mod config;
pub mod constants;
pub mod defense;
pub mod engine;
pub mod layout;
pub mod location;
pub mod offense;
pub mod orchestrator;
pub mod risk;
pub mod sim;
pub mod telemetry;
pub mod units;
pub mod upkeep;

pub use breach::{BreachEvent, BreachMemory, Region, RegionBias};
pub use config::{ConfigError, MatchConfig, UnitSpec};
pub use engine::{place_each, TurnHandle, PLACE_ALL};
pub use location::{BoardEdge, Location};
pub use orchestrator::{OrchestratorBuilder, TurnOrchestrator};
pub use units::{MobileKind, PlacedUnit, PlacementIntent, ResourcePool, Side, StructureKind, UnitKind};
