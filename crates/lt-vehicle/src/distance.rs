//! Route-relative distances for a single vehicle.
//!
//! All functions return `None` when the distance is unmeasurable: the
//! vehicle is not on the road, or the two positions share no forward path
//! along the remaining route.

use lt_core::{EdgeId, Position};
use lt_network::RoadNetwork;

use crate::VehicleState;

/// Distance driven since departure, measured along the route.
///
/// On an internal lane the vehicle's route edge is the one in front of the
/// junction, so the distance is composed of the run up to the end of that
/// edge plus the way into the junction.
pub fn odometer(state: &VehicleState, network: &RoadNetwork) -> Option<f64> {
    let lane = state.road_lane()?;
    let route = &state.route;
    let index = state.route_index;

    if network.is_internal_lane(lane) {
        let edge = route.edge(index)?;
        let edge_len = network.edge_length(edge);
        let to_junction = route.distance_between_indices(state.depart_pos, edge_len, 0, index, network)?;
        let into_junction = route.distance_between(
            edge_len,
            state.pos,
            edge,
            network.lane_edge(lane),
            network,
            index,
        )?;
        Some(to_junction + into_junction)
    } else {
        route.distance_between_indices(state.depart_pos, state.pos, 0, index, network)
    }
}

/// Distance still to drive from the vehicle's position to `pos` on `edge`.
pub fn driving_distance(state: &VehicleState, network: &RoadNetwork, edge: EdgeId, pos: f64) -> Option<f64> {
    let lane = state.road_lane()?;
    state.route.distance_between(
        state.pos,
        pos,
        network.lane_edge(lane),
        edge,
        network,
        state.route_index,
    )
}

/// Like [`driving_distance`], with the target given as a planar point that
/// is first mapped onto the nearest lane.
pub fn driving_distance_to_point(state: &VehicleState, network: &RoadNetwork, point: Position) -> Option<f64> {
    let (lane, pos) = network.convert_to_road(point)?;
    driving_distance(state, network, network.lane_edge(lane), pos)
}
