//! `lt-core` — ids, geometry and time shared by every `lanetrack` crate.
//!
//! # Modules
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EdgeId`, `LaneId`, `LinkId`, `TlsId`, `VehicleId`    |
//! | [`geo`]         | `Position`, planar distance and segment projection    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig` (JSON via `serde`)    |
//! | [`error`]       | `LtError`, `LtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` for ids, positions, config |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

pub use error::{LtError, LtResult};
pub use geo::Position;
pub use ids::{EdgeId, LaneId, LinkId, TlsId, VehicleId};
pub use time::{SimClock, SimConfig, Tick};
