//! Preferred forward lane sequences.
//!
//! For every lane of the vehicle's current route edge, a continuation lists
//! the lanes a vehicle starting on that lane drives through when it follows
//! the route: element 0 is the lane itself, element `n` a lane of the route
//! edge `n` steps ahead.  Internal lanes are never part of a continuation.
//!
//! The movement model normally maintains these; [`follow_route`] is the
//! default used after insertion, relocation and route replacement.

use lt_core::LaneId;
use lt_network::{RoadNetwork, Route};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestLanes {
    pub lane: LaneId,
    /// Summed length of the lanes in `continuation`.
    pub length: f64,
    /// Lane index of the best lane minus the index of `lane`.
    pub best_lane_offset: i32,
    /// `true` if the route can be continued from this lane.
    pub allows_continuation: bool,
    pub continuation: Vec<LaneId>,
}

/// Continuations for the lanes of route edge `route_index`.
///
/// Each continuation takes, at every step, the first link of the current
/// lane that leads onto the next route edge.  The best lane is the one with
/// the longest continuation, lowest index on ties.
pub fn follow_route(network: &RoadNetwork, route: &Route, route_index: usize) -> Vec<BestLanes> {
    let Some(edge) = route.edge(route_index) else {
        return Vec::new();
    };
    let is_last = route_index + 1 >= route.len();

    let mut out: Vec<BestLanes> = network
        .edge(edge)
        .lanes
        .iter()
        .map(|&lane| {
            let continuation = continuation_from(network, route, route_index, lane);
            BestLanes {
                lane,
                length: continuation.iter().map(|&l| network.lane_length(l)).sum(),
                best_lane_offset: 0,
                allows_continuation: is_last || continuation.len() > 1,
                continuation,
            }
        })
        .collect();

    let best = out
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| {
            a.continuation
                .len()
                .cmp(&b.continuation.len())
                .then(ib.cmp(ia))
        })
        .map(|(i, _)| i as i32)
        .unwrap_or(0);
    for (i, entry) in out.iter_mut().enumerate() {
        entry.best_lane_offset = best - i as i32;
    }
    out
}

fn continuation_from(network: &RoadNetwork, route: &Route, route_index: usize, start: LaneId) -> Vec<LaneId> {
    let mut continuation = vec![start];
    let mut current = start;
    for &next in &route.edges[route_index + 1..] {
        let step = network
            .lane(current)
            .links
            .iter()
            .map(|&l| network.link(l).to)
            .find(|&to| network.lane_edge(to) == next);
        match step {
            Some(to) => {
                continuation.push(to);
                current = to;
            }
            None => break,
        }
    }
    continuation
}
