//! Callbacks fired when a vehicle enters, leaves or is placed on lanes.

use lt_core::{LaneId, VehicleId};

/// Why a vehicle moved between lanes or on/off the network.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// First placement on the network.
    Departed,
    /// Forced relocation.
    Teleport,
    /// Reached the end of its route.
    Arrived,
    /// Removed on request.
    Vaporized,
}

/// Observers of vehicle movement (detectors, output writers, …).
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait MoveReminder {
    /// The vehicle is taken off the network as a whole.
    fn on_leave_network(&mut self, _vehicle: VehicleId, _kind: Notification) {}

    /// The vehicle leaves `lane`.
    fn on_leave_lane(&mut self, _vehicle: VehicleId, _lane: LaneId, _kind: Notification) {}

    /// The vehicle enters `lane` at its start without being inserted into
    /// the lane's occupancy.
    fn on_enter_lane(&mut self, _vehicle: VehicleId, _lane: LaneId, _kind: Notification) {}

    /// The vehicle is inserted on `lane` at `pos`.
    fn on_place(&mut self, _vehicle: VehicleId, _lane: LaneId, _pos: f64, _kind: Notification) {}
}

/// A [`MoveReminder`] that does nothing.
pub struct NoopReminder;

impl MoveReminder for NoopReminder {}

/// Insertion and removal bookkeeping owned by whoever drives the vehicles.
pub trait Lifecycle {
    /// A vehicle that was not on the road is being placed on it by force.
    fn already_departed(&mut self, _vehicle: VehicleId) {}

    /// A vehicle completed its route and must be removed at the end of the
    /// current step.
    fn schedule_removal(&mut self, _vehicle: VehicleId) {}
}
