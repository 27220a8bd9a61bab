//! Insertion and removal bookkeeping.

use lt_core::VehicleId;
use lt_vehicle::Lifecycle;

/// Tracks vehicles waiting for insertion, how many have departed, and
/// vehicles scheduled for removal at the end of the current step.
#[derive(Debug, Default)]
pub struct InsertionControl {
    pending:  Vec<VehicleId>,
    departed: usize,
    removals: Vec<VehicleId>,
}

impl InsertionControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pending(&mut self, vehicle: VehicleId) {
        self.pending.push(vehicle);
    }

    /// Vehicles added but not yet on the road, in the order they were added.
    pub fn pending(&self) -> &[VehicleId] {
        &self.pending
    }

    /// Number of vehicles that entered the road since the start.
    pub fn departed_count(&self) -> usize {
        self.departed
    }

    pub fn is_scheduled_for_removal(&self, vehicle: VehicleId) -> bool {
        self.removals.contains(&vehicle)
    }

    /// Drain the removal schedule.
    pub fn take_removals(&mut self) -> Vec<VehicleId> {
        std::mem::take(&mut self.removals)
    }

    /// Forget everything about `vehicle`.
    pub fn forget(&mut self, vehicle: VehicleId) {
        self.pending.retain(|&v| v != vehicle);
        self.removals.retain(|&v| v != vehicle);
    }
}

impl Lifecycle for InsertionControl {
    fn already_departed(&mut self, vehicle: VehicleId) {
        if let Some(idx) = self.pending.iter().position(|&v| v == vehicle) {
            self.pending.remove(idx);
            self.departed += 1;
        }
    }

    fn schedule_removal(&mut self, vehicle: VehicleId) {
        if !self.removals.contains(&vehicle) {
            self.removals.push(vehicle);
        }
    }
}
