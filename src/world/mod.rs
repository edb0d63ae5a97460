//! Procedurally generated world graph: areas, locations, connections.

pub mod generation;
pub mod names;
pub mod types;

pub use generation::{area_count, WorldGraph};
pub use types::{Area, AreaId, Connection, ConnectionId, Location, LocationId, LocationKind};
