//! The `Simulation` facade.

use tracing::{debug, warn};

use lt_core::{EdgeId, LaneId, Position, SimClock, SimConfig, Tick, VehicleId};
use lt_network::{LinkState, RoadNetwork, Route};
use lt_vehicle::{
    LaneOccupancy, MoveReminder, Notification, VehicleState, VehicleStore, distance, relocation,
    upcoming_signals,
};

use crate::insertion::InsertionControl;
use crate::report::{BestLanesReport, SignalAhead};
use crate::stops::{self, StopRequest};
use crate::{SimError, SimResult};

/// Vehicle queries and control by string id.
///
/// Owns the network, every vehicle, lane occupancy, insertion bookkeeping
/// and the move reminder `M` notified on every lane change it performs.
///
/// Distances are `Ok(None)` when unmeasurable; errors are reserved for
/// unknown ids and rejected requests.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<M: MoveReminder> {
    pub config: SimConfig,
    pub clock:  SimClock,

    pub network:   RoadNetwork,
    pub vehicles:  VehicleStore,
    pub occupancy: LaneOccupancy,
    pub insertion: InsertionControl,

    /// Notified on every placement, lane entry and lane exit.
    pub reminder: M,

    /// Counter for the ids of replacement routes.
    pub(crate) route_variants: u32,
}

impl<M: MoveReminder> Simulation<M> {
    // ── Lookup helpers ────────────────────────────────────────────────────

    fn resolve(&self, vehicle: &str) -> SimResult<VehicleId> {
        self.vehicles
            .lookup(vehicle)
            .ok_or_else(|| SimError::VehicleNotFound(vehicle.to_owned()))
    }

    fn state(&self, vehicle: &str) -> SimResult<&VehicleState> {
        let id = self.resolve(vehicle)?;
        self.vehicles
            .get(id)
            .ok_or_else(|| SimError::VehicleNotFound(vehicle.to_owned()))
    }

    fn state_mut(&mut self, vehicle: &str) -> SimResult<&mut VehicleState> {
        let id = self.resolve(vehicle)?;
        self.vehicles
            .get_mut(id)
            .ok_or_else(|| SimError::VehicleNotFound(vehicle.to_owned()))
    }

    fn parse_edges(&self, edges: &[&str]) -> SimResult<Vec<EdgeId>> {
        edges
            .iter()
            .map(|&e| {
                self.network
                    .edge_by_id(e)
                    .map_err(|_| SimError::EdgeNotFound(e.to_owned()))
            })
            .collect()
    }

    // ── Vehicle list ──────────────────────────────────────────────────────

    /// Ids of all known vehicles, pending ones included, in insertion order.
    pub fn vehicle_ids(&self) -> Vec<String> {
        self.vehicles.iter().map(|(_, s)| s.id.clone()).collect()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Position queries ──────────────────────────────────────────────────

    /// Id of the edge the vehicle is on; `None` when it is not on the road.
    pub fn road_id(&self, vehicle: &str) -> SimResult<Option<String>> {
        let s = self.state(vehicle)?;
        Ok(s.road_lane()
            .map(|l| self.network.edge(self.network.lane_edge(l)).id.clone()))
    }

    pub fn lane_id(&self, vehicle: &str) -> SimResult<Option<String>> {
        let s = self.state(vehicle)?;
        Ok(s.road_lane().map(|l| self.network.lane(l).id.clone()))
    }

    pub fn lane_index(&self, vehicle: &str) -> SimResult<Option<u32>> {
        let s = self.state(vehicle)?;
        Ok(s.road_lane().map(|l| self.network.lane(l).index))
    }

    pub fn lane_position(&self, vehicle: &str) -> SimResult<Option<f64>> {
        let s = self.state(vehicle)?;
        Ok(s.road_lane().map(|_| s.pos))
    }

    /// Planar position of the vehicle; `None` when it is not on the road.
    pub fn position(&self, vehicle: &str) -> SimResult<Option<Position>> {
        let s = self.state(vehicle)?;
        Ok(s.road_lane().and_then(|l| self.network.position_on_lane(l, s.pos)))
    }

    // ── Route queries ─────────────────────────────────────────────────────

    pub fn route_id(&self, vehicle: &str) -> SimResult<String> {
        Ok(self.state(vehicle)?.route.id.clone())
    }

    /// Current route position; `None` before departure.
    pub fn route_index(&self, vehicle: &str) -> SimResult<Option<usize>> {
        let s = self.state(vehicle)?;
        Ok(s.departed.then_some(s.route_index))
    }

    pub fn route_edges(&self, vehicle: &str) -> SimResult<Vec<String>> {
        let s = self.state(vehicle)?;
        Ok(s.route
            .edges
            .iter()
            .map(|&e| self.network.edge(e).id.clone())
            .collect())
    }

    /// `true` if every pair of consecutive route edges is connected.
    pub fn is_route_valid(&self, vehicle: &str) -> SimResult<bool> {
        Ok(self.state(vehicle)?.route.is_connected(&self.network))
    }

    /// Best-lane continuations for the lanes of the current edge.  Empty when
    /// the vehicle is not on the road.
    pub fn best_lanes(&self, vehicle: &str) -> SimResult<Vec<BestLanesReport>> {
        let s = self.state(vehicle)?;
        if s.road_lane().is_none() {
            return Ok(Vec::new());
        }
        let lane_id = |l: LaneId| self.network.lane(l).id.clone();
        Ok(s.best_lanes
            .iter()
            .map(|b| BestLanesReport {
                lane_id:             lane_id(b.lane),
                length:              b.length,
                best_lane_offset:    b.best_lane_offset,
                allows_continuation: b.allows_continuation,
                continuation:        b.continuation.iter().map(|&l| lane_id(l)).collect(),
            })
            .collect())
    }

    // ── Distances ─────────────────────────────────────────────────────────

    /// Distance driven since departure.
    pub fn distance(&self, vehicle: &str) -> SimResult<Option<f64>> {
        Ok(distance::odometer(self.state(vehicle)?, &self.network))
    }

    /// Distance to drive to `pos` on `edge`.
    pub fn driving_distance(&self, vehicle: &str, edge: &str, pos: f64) -> SimResult<Option<f64>> {
        let s = self.state(vehicle)?;
        let edge = self
            .network
            .edge_by_id(edge)
            .map_err(|_| SimError::EdgeNotFound(edge.to_owned()))?;
        Ok(distance::driving_distance(s, &self.network, edge, pos))
    }

    /// Distance to drive to the lane position nearest to `(x, y)`.
    pub fn driving_distance_2d(&self, vehicle: &str, x: f64, y: f64) -> SimResult<Option<f64>> {
        let s = self.state(vehicle)?;
        Ok(distance::driving_distance_to_point(s, &self.network, Position::new(x, y)))
    }

    // ── Signals ───────────────────────────────────────────────────────────

    /// Traffic-light controlled links ahead, nearest first.
    pub fn next_tls(&self, vehicle: &str) -> SimResult<Vec<SignalAhead>> {
        let s = self.state(vehicle)?;
        Ok(upcoming_signals(s, &self.network)
            .map(|n| SignalAhead {
                tls_id:     self.network.light(n.tls).id.clone(),
                link_index: n.link_index,
                distance:   n.distance,
                state:      n.state,
            })
            .collect())
    }

    /// Replace the state string of a traffic light.
    pub fn set_tls_state(&mut self, tls: &str, state: &str) -> SimResult<()> {
        let id = self.network.tls_by_id(tls)?;
        self.network.set_tls_state(id, state)?;
        Ok(())
    }

    pub fn tls_state(&self, tls: &str) -> SimResult<Vec<LinkState>> {
        let id = self.network.tls_by_id(tls)?;
        Ok(self.network.light(id).state.clone())
    }

    // ── Relocation ────────────────────────────────────────────────────────

    /// Move `vehicle` to `pos` on `lane`, which must lie on the remaining
    /// route.  A pending vehicle departs there.
    pub fn move_to(&mut self, vehicle: &str, lane: &str, pos: f64) -> SimResult<()> {
        let id = self.resolve(vehicle)?;
        let lane_id = self
            .network
            .lane_by_id(lane)
            .map_err(|_| SimError::LaneNotFound(lane.to_owned()))?;
        let result = relocation::relocate(
            id,
            &mut self.vehicles,
            &mut self.occupancy,
            &self.network,
            lane_id,
            pos,
            self.config.relocation_slack,
            &mut self.reminder,
            &mut self.insertion,
        );
        match result {
            Ok(plan) => {
                debug!(vehicle, lane, pos, transitions = plan.transitions.len(), "relocated vehicle");
                Ok(())
            }
            Err(e) => {
                warn!(vehicle, lane, pos, error = %e, "relocation rejected");
                Err(e.into())
            }
        }
    }

    // ── Stops ─────────────────────────────────────────────────────────────

    /// Add a stop on the vehicle's remaining route.
    ///
    /// Repeating a stop (same lane and end offset) changes its duration;
    /// repeating it with a zero duration cancels it.
    pub fn set_stop(&mut self, vehicle: &str, request: StopRequest) -> SimResult<()> {
        let s = self.state(vehicle)?;
        let stop = match stops::resolve(s, &self.network, &request) {
            Ok(stop) => stop,
            Err(reason) => {
                warn!(vehicle, edge = %request.edge, %reason, "stop rejected");
                return Err(SimError::InvalidStop { vehicle: vehicle.to_owned(), reason });
            }
        };
        let (route_index, end_pos) = (stop.route_index, stop.end_pos);
        let change = stops::merge(&mut self.state_mut(vehicle)?.stops, stop);
        debug!(vehicle, edge = %request.edge, route_index, end_pos, ?change, "stop set");
        Ok(())
    }

    /// Pending stops as `(lane id, end offset)`, in route order.
    pub fn stops(&self, vehicle: &str) -> SimResult<Vec<(String, f64)>> {
        let s = self.state(vehicle)?;
        Ok(s.stops
            .iter()
            .map(|st| (self.network.lane(st.lane).id.clone(), st.end_pos))
            .collect())
    }

    // ── Route replacement ─────────────────────────────────────────────────

    /// Replace the route of `vehicle` with `edges`.
    ///
    /// The new route must be non-empty, connected, and start with the
    /// vehicle's current edge if it is on the road.  Stops on edges the new
    /// route no longer visits are dropped.
    pub fn set_route(&mut self, vehicle: &str, edges: &[&str]) -> SimResult<()> {
        let edge_ids = self.parse_edges(edges)?;
        let fail = |reason: String| SimError::RouteReplacement { vehicle: vehicle.to_owned(), reason };

        let variant = self.route_variants;
        let route = Route::new(format!("!{vehicle}!var#{}", variant + 1), edge_ids, &self.network)
            .map_err(|e| fail(e.to_string()))?;
        if !route.is_connected(&self.network) {
            return Err(fail("edges are not connected".into()));
        }
        let s = self.state(vehicle)?;
        if s.road_lane().is_some() && route.edge(0) != s.current_edge() {
            return Err(fail("the new route must start at the current edge".into()));
        }

        let id = self.resolve(vehicle)?;
        self.route_variants += 1;
        let network = &self.network;
        let Some(s) = self.vehicles.get_mut(id) else {
            return Err(SimError::VehicleNotFound(vehicle.to_owned()));
        };
        let before = s.stops.len();
        s.stops.retain_mut(|st| match route.position_of(st.edge, 0) {
            Some(i) => {
                st.route_index = i;
                true
            }
            None => false,
        });
        debug!(vehicle, route = %route.id, edges = route.len(), dropped_stops = before - s.stops.len(), "route replaced");
        s.route = route;
        s.route_index = 0;
        s.refresh_best_lanes(network);
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Register a vehicle that departs later from `depart_pos` on the first
    /// edge of the route `edges`.
    pub fn add_vehicle(&mut self, vehicle: &str, route_id: &str, edges: &[&str], depart_pos: f64) -> SimResult<()> {
        if self.vehicles.lookup(vehicle).is_some() {
            return Err(SimError::DuplicateVehicle(vehicle.to_owned()));
        }
        let route = Route::new(route_id, self.parse_edges(edges)?, &self.network)?;
        let state = VehicleState::new(vehicle, route, depart_pos);
        let id = self
            .vehicles
            .insert(state)
            .ok_or_else(|| SimError::DuplicateVehicle(vehicle.to_owned()))?;
        self.insertion.add_pending(id);
        debug!(vehicle, route = route_id, "vehicle added");
        Ok(())
    }

    /// Place a pending vehicle at its depart position on the first lane of
    /// its first route edge.
    pub fn insert_vehicle(&mut self, vehicle: &str) -> SimResult<()> {
        let s = self.state(vehicle)?;
        if s.departed {
            return Err(SimError::AlreadyDeparted(vehicle.to_owned()));
        }
        let first = s.route.edge(0).ok_or_else(|| SimError::RouteReplacement {
            vehicle: vehicle.to_owned(),
            reason:  "route is empty".into(),
        })?;
        let lane = self.network.first_lane(first)?;
        let pos = s.depart_pos.clamp(0.0, self.network.lane_length(lane));
        let lane_id = self.network.lane(lane).id.clone();
        self.move_to(vehicle, &lane_id, pos)
    }

    /// Remove a vehicle immediately.
    pub fn remove_vehicle(&mut self, vehicle: &str) -> SimResult<()> {
        let id = self.resolve(vehicle)?;
        self.remove(id, Notification::Vaporized);
        Ok(())
    }

    fn remove(&mut self, id: VehicleId, kind: Notification) {
        let Some(state) = self.vehicles.remove(id) else {
            return;
        };
        if let Some(lane) = state.road_lane() {
            self.occupancy.remove(lane, id);
            self.reminder.on_leave_lane(id, lane, kind);
            self.reminder.on_leave_network(id, kind);
        }
        self.insertion.forget(id);
        debug!(vehicle = %state.id, ?kind, "vehicle removed");
    }

    /// Finish the current step: remove vehicles that arrived and advance the
    /// clock.  Returns the number of vehicles removed.
    pub fn step(&mut self) -> usize {
        let removals = self.insertion.take_removals();
        let removed = removals.len();
        for id in removals {
            self.remove(id, Notification::Arrived);
        }
        self.clock.advance();
        debug!(tick = %self.clock.current_tick, removed, "step finished");
        removed
    }
}
