//! `lt-sim` — string-id query and control facade.
//!
//! [`Simulation`] resolves vehicle, edge, lane and traffic-light ids, turns
//! lower-layer failures into readable [`SimError`]s, and drives the vehicle
//! crate's three operations:
//!
//! | Query / command          | Backed by                                  |
//! |--------------------------|--------------------------------------------|
//! | `distance`               | `lt_vehicle::distance::odometer`           |
//! | `driving_distance[_2d]`  | `lt_vehicle::distance::driving_distance*`  |
//! | `next_tls`               | `lt_vehicle::upcoming_signals`             |
//! | `move_to`                | `lt_vehicle::relocation::relocate`         |
//! | `set_stop`, `set_route`  | [`stops`], `lt_network::Route`             |
//!
//! Vehicles are added pending (`add_vehicle`), put on the road with
//! `insert_vehicle` or `move_to`, and leave through `remove_vehicle` or by
//! arriving, after which `step` removes them.
//!
//! # Logging
//!
//! Commands that change state emit `tracing` events at `debug` level;
//! rejected relocations and stops are logged at `warn`.  Install a
//! subscriber in the application to see them.

pub mod builder;
pub mod error;
pub mod insertion;
pub mod report;
pub mod sim;
pub mod stops;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use insertion::InsertionControl;
pub use report::{BestLanesReport, SignalAhead};
pub use sim::Simulation;
pub use stops::StopRequest;
