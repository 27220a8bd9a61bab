//! The `VehicleStore` — every known vehicle, pending or on road.

use rustc_hash::FxHashMap;

use lt_core::VehicleId;

use crate::VehicleState;

/// Holds the state of every vehicle, indexed by `VehicleId`.
///
/// Ids are handed out in insertion order and never reused; a removed
/// vehicle leaves an empty slot behind.
#[derive(Default)]
pub struct VehicleStore {
    states: Vec<Option<VehicleState>>,
    ids:    FxHashMap<String, VehicleId>,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vehicle.  Returns `None` if a vehicle with the same string id
    /// is already known.
    pub fn insert(&mut self, state: VehicleState) -> Option<VehicleId> {
        if self.ids.contains_key(&state.id) {
            return None;
        }
        let id = VehicleId(self.states.len() as u32);
        self.ids.insert(state.id.clone(), id);
        self.states.push(Some(state));
        Some(id)
    }

    pub fn remove(&mut self, id: VehicleId) -> Option<VehicleState> {
        let state = self.states.get_mut(id.index())?.take()?;
        self.ids.remove(&state.id);
        Some(state)
    }

    #[inline]
    pub fn lookup(&self, id: &str) -> Option<VehicleId> {
        self.ids.get(id).copied()
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&VehicleState> {
        self.states.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut VehicleState> {
        self.states.get_mut(id.index())?.as_mut()
    }

    /// Live vehicles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &VehicleState)> {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (VehicleId(i as u32), s)))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
