//! Which vehicles are on which lane.

use lt_core::{LaneId, VehicleId};

use crate::VehicleStore;

/// Per-lane vehicle lists, each sorted by ascending lane offset.
pub struct LaneOccupancy {
    lanes: Vec<Vec<VehicleId>>,
}

impl LaneOccupancy {
    /// Empty occupancy for a network with `lane_count` lanes.
    pub fn new(lane_count: usize) -> Self {
        Self { lanes: vec![Vec::new(); lane_count] }
    }

    /// Insert `vehicle` on `lane`, keeping the list sorted by the offsets
    /// currently held in `store`.
    pub fn insert(&mut self, store: &VehicleStore, lane: LaneId, vehicle: VehicleId) {
        let pos_of = |id: VehicleId| store.get(id).map_or(0.0, |s| s.pos);
        let veh_pos = pos_of(vehicle);
        let list = &mut self.lanes[lane.index()];
        let idx = list
            .iter()
            .map(|&id| pos_of(id))
            .position(|pos| pos > veh_pos)
            .unwrap_or(list.len());
        list.insert(idx, vehicle);
    }

    /// Remove `vehicle` from `lane`.  Returns `false` if it was not there.
    pub fn remove(&mut self, lane: LaneId, vehicle: VehicleId) -> bool {
        let list = &mut self.lanes[lane.index()];
        match list.iter().rposition(|&v| v == vehicle) {
            Some(idx) => {
                list.remove(idx);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn vehicles_on(&self, lane: LaneId) -> &[VehicleId] {
        &self.lanes[lane.index()]
    }

    /// Total number of vehicles on all lanes.
    pub fn total(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }
}
