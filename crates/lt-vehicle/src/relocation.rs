//! Forced relocation of a vehicle onto an arbitrary lane and offset.
//!
//! Relocation happens in two phases:
//!
//! 1. [`plan`] validates the target and walks the route up to the target
//!    edge, producing the ordered [`Transition`]s.  Nothing is mutated, so a
//!    rejected request leaves the vehicle exactly where it was.
//! 2. [`RelocationPlan::apply`] executes the transitions against the store,
//!    the lane occupancy, the move reminders and the lifecycle hooks.
//!
//! ```text
//! LeaveNetwork ─▶ LeaveLane | Tentative ─▶ (EnterLane [ScheduleRemoval])* ─▶ AlreadyDeparted ─▶ Place
//! ```

use lt_core::{LaneId, VehicleId};
use lt_network::RoadNetwork;

use crate::reminder::{Lifecycle, MoveReminder, Notification};
use crate::{LaneOccupancy, VehicleError, VehicleResult, VehicleState, VehicleStore};

/// One discrete step of a relocation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Transition {
    /// Release the vehicle from the network as a whole.
    LeaveNetwork { kind: Notification },
    /// Take the vehicle off the lane it occupies.
    LeaveLane { lane: LaneId, kind: Notification },
    /// Record the target for a vehicle that occupied no lane.
    Tentative { lane: LaneId, pos: f64 },
    /// Advance to the next route edge, entering its first lane.
    EnterLane { lane: LaneId, kind: Notification },
    /// The vehicle completed its route while advancing.
    ScheduleRemoval,
    /// Tell the insertion bookkeeping the vehicle is on the road now.
    AlreadyDeparted,
    /// Insert the vehicle on the target lane.
    Place { lane: LaneId, pos: f64, kind: Notification },
}

/// The validated steps of one relocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RelocationPlan {
    pub transitions: Vec<Transition>,
}

/// Plan moving `state` to `target_pos` on `target_lane`.
///
/// The target lane's edge must lie on the route at or after the current
/// route position.  Advancing along the route takes at most
/// `route.len() + slack` steps.
///
/// # Errors
///
/// - [`VehicleError::InvalidTarget`] if the route does not pass the target.
/// - [`VehicleError::PositionOutOfLane`] if `target_pos` is negative or
///   beyond the end of `target_lane`.
/// - [`VehicleError::RelocationUnreachable`] if the route ends, or the step
///   bound is hit, before the target edge.
/// - [`VehicleError::Network`] if an intermediate route edge has no lanes.
pub fn plan(
    state:       &VehicleState,
    network:     &RoadNetwork,
    target_lane: LaneId,
    target_pos:  f64,
    slack:       usize,
) -> VehicleResult<RelocationPlan> {
    let target_edge = network.lane_edge(target_lane);
    let route = &state.route;
    if !route.will_pass(state.route_index, target_edge) {
        return Err(VehicleError::InvalidTarget {
            vehicle: state.id.clone(),
            lane:    network.lane(target_lane).id.clone(),
        });
    }
    let length = network.lane_length(target_lane);
    if !(0.0..=length).contains(&target_pos) {
        return Err(VehicleError::PositionOutOfLane {
            vehicle: state.id.clone(),
            lane:    network.lane(target_lane).id.clone(),
            pos:     target_pos,
            length,
        });
    }
    let unreachable_err = || VehicleError::RelocationUnreachable {
        vehicle: state.id.clone(),
        edge:    network.edge(target_edge).id.clone(),
    };

    let teleport = Notification::Teleport;
    let mut transitions = vec![Transition::LeaveNetwork { kind: teleport }];
    match state.lane {
        Some(lane) => transitions.push(Transition::LeaveLane { lane, kind: teleport }),
        None => transitions.push(Transition::Tentative { lane: target_lane, pos: target_pos }),
    }

    let arrival = state.arrival_offset(network);
    let last_index = route.len().saturating_sub(1);
    let mut index = state.route_index;
    let mut steps = 0;
    // Never exceeded once `will_pass` holds; bounds the walk all the same.
    while route.edge(index) != Some(target_edge) {
        steps += 1;
        if steps > route.len() + slack {
            return Err(unreachable_err());
        }
        let next = route.succ_edge(index, 1).ok_or_else(unreachable_err)?;
        let lane = network.first_lane(next)?;
        index += 1;
        transitions.push(Transition::EnterLane { lane, kind: teleport });
        if index == last_index && arrival <= 0.0 && !state.has_stop_at(index) {
            transitions.push(Transition::ScheduleRemoval);
        }
    }

    transitions.push(Transition::AlreadyDeparted);
    let kind = if state.departed { Notification::Teleport } else { Notification::Departed };
    transitions.push(Transition::Place { lane: target_lane, pos: target_pos, kind });
    Ok(RelocationPlan { transitions })
}

impl RelocationPlan {
    /// Execute the plan for `vehicle`.
    ///
    /// The old lane's occupancy loses the vehicle once, the target lane's
    /// gains it once; intermediate lanes are entered without touching
    /// occupancy.  Best lanes are recomputed for the new route position.
    pub fn apply<M: MoveReminder, L: Lifecycle>(
        &self,
        vehicle:   VehicleId,
        store:     &mut VehicleStore,
        occupancy: &mut LaneOccupancy,
        network:   &RoadNetwork,
        reminder:  &mut M,
        lifecycle: &mut L,
    ) {
        for &transition in &self.transitions {
            match transition {
                Transition::LeaveNetwork { kind } => {
                    reminder.on_leave_network(vehicle, kind);
                    if let Some(state) = store.get_mut(vehicle) {
                        state.on_road = false;
                    }
                }
                Transition::LeaveLane { lane, kind } => {
                    occupancy.remove(lane, vehicle);
                    reminder.on_leave_lane(vehicle, lane, kind);
                }
                Transition::Tentative { lane, pos } => {
                    if let Some(state) = store.get_mut(vehicle) {
                        state.tentative = Some((lane, pos));
                    }
                }
                Transition::EnterLane { lane, kind } => {
                    if let Some(state) = store.get_mut(vehicle) {
                        state.route_index += 1;
                        state.lane = Some(lane);
                        state.pos = 0.0;
                    }
                    reminder.on_enter_lane(vehicle, lane, kind);
                }
                Transition::ScheduleRemoval => lifecycle.schedule_removal(vehicle),
                Transition::AlreadyDeparted => lifecycle.already_departed(vehicle),
                Transition::Place { lane, pos, kind } => {
                    if let Some(state) = store.get_mut(vehicle) {
                        if !state.departed {
                            state.depart_pos = pos;
                        }
                        state.lane = Some(lane);
                        state.pos = pos;
                        state.on_road = true;
                        state.departed = true;
                        state.tentative = None;
                        state.refresh_best_lanes(network);
                    }
                    occupancy.insert(store, lane, vehicle);
                    reminder.on_place(vehicle, lane, pos, kind);
                }
            }
        }
    }
}

/// Plan and apply in one call.  On error nothing has changed.
#[allow(clippy::too_many_arguments)]
pub fn relocate<M: MoveReminder, L: Lifecycle>(
    vehicle:     VehicleId,
    store:       &mut VehicleStore,
    occupancy:   &mut LaneOccupancy,
    network:     &RoadNetwork,
    target_lane: LaneId,
    target_pos:  f64,
    slack:       usize,
    reminder:    &mut M,
    lifecycle:   &mut L,
) -> VehicleResult<RelocationPlan> {
    let Some(state) = store.get(vehicle) else {
        return Err(VehicleError::UnknownVehicle(vehicle));
    };
    let plan = plan(state, network, target_lane, target_pos, slack)?;
    plan.apply(vehicle, store, occupancy, network, reminder, lifecycle);
    Ok(plan)
}
