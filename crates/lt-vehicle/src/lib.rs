//! `lt-vehicle` — vehicle state and the three route-relative operations built
//! on it: distances, signal lookahead and forced relocation.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`state`]        | `VehicleState`, `Stop`                                       |
//! | [`store`]        | `VehicleStore` — slot arena + string id map                  |
//! | [`occupancy`]    | `LaneOccupancy` — per-lane vehicle lists sorted by offset    |
//! | [`reminder`]     | `MoveReminder`, `Lifecycle` callbacks, `Notification`        |
//! | [`best_lanes`]   | `BestLanes` and the route-following default                  |
//! | [`distance`]     | odometer, driving distance (edge offset or planar point)     |
//! | [`lookahead`]    | `UpcomingSignals` — lazy scan of controlled links ahead      |
//! | [`relocation`]   | `plan` / `RelocationPlan::apply` — forced move to a lane     |
//! | [`error`]        | `VehicleError`, `VehicleResult<T>`                           |
//!
//! # Route position on junctions
//!
//! Routes hold normal edges only.  While a vehicle crosses a junction its
//! lane is internal and `route_index` still points at the edge in front of
//! the junction; every operation here accounts for that.

pub mod best_lanes;
pub mod distance;
pub mod error;
pub mod lookahead;
pub mod occupancy;
pub mod relocation;
pub mod reminder;
pub mod state;
pub mod store;


pub use best_lanes::BestLanes;
pub use error::{VehicleError, VehicleResult};
pub use lookahead::{NextSignal, UpcomingSignals, upcoming_signals};
pub use occupancy::LaneOccupancy;
pub use relocation::{RelocationPlan, Transition};
pub use reminder::{Lifecycle, MoveReminder, NoopReminder, Notification};
pub use state::{Stop, VehicleState};
pub use store::VehicleStore;
