//! Per-vehicle spatial state.

use lt_core::{EdgeId, LaneId};
use lt_network::{RoadNetwork, Route};

use crate::best_lanes::{self, BestLanes};

/// A pending stop on the vehicle's route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub edge: EdgeId,
    pub lane: LaneId,
    /// Route position of `edge` this stop belongs to.
    pub route_index: usize,
    pub start_pos: f64,
    pub end_pos: f64,
    pub duration_ms: u64,
    /// Earliest departure, in milliseconds of simulated time.
    pub until_ms: Option<u64>,
    pub parking: bool,
    /// Waits for a person to board before continuing.
    pub triggered: bool,
    /// Waits for a container to be loaded before continuing.
    pub container_triggered: bool,
}

/// The spatial state of one vehicle.
///
/// A vehicle is either **pending** (`lane == None`, not yet inserted), or
/// **on road** (`lane == Some(..)`, `pos` measured from the lane start).
/// `route_index` always points at the normal route edge the vehicle is on,
/// or, while it crosses a junction, at the edge in front of that junction.
#[derive(Debug, Clone)]
pub struct VehicleState {
    pub id: String,
    pub route: Route,
    pub route_index: usize,

    pub lane: Option<LaneId>,
    pub pos:  f64,

    /// Offset on the first route edge the trip started from.
    pub depart_pos: f64,
    /// Offset on the last route edge at which the trip ends; `None` means the
    /// end of that edge.
    pub arrival_pos: Option<f64>,

    /// `true` once the vehicle has been placed on the network at least once.
    pub departed: bool,
    pub on_road:  bool,

    /// Lane and offset requested for a vehicle that was not on a lane when
    /// it got relocated.  Cleared once it is placed.
    pub tentative: Option<(LaneId, f64)>,

    /// Pending stops, in route order.
    pub stops: Vec<Stop>,

    /// Best-lane continuations for the lanes of the current route edge.
    pub best_lanes: Vec<BestLanes>,
}

impl VehicleState {
    /// A pending vehicle at the start of `route`.
    pub fn new(id: impl Into<String>, route: Route, depart_pos: f64) -> Self {
        Self {
            id: id.into(),
            route,
            route_index: 0,
            lane:        None,
            pos:         0.0,
            depart_pos,
            arrival_pos: None,
            departed:    false,
            on_road:     false,
            tentative:   None,
            stops:       Vec::new(),
            best_lanes:  Vec::new(),
        }
    }

    /// Route edge at `route_index`.
    #[inline]
    pub fn current_edge(&self) -> Option<EdgeId> {
        self.route.edge(self.route_index)
    }

    /// The lane the vehicle is on, if it is on the road.
    #[inline]
    pub fn road_lane(&self) -> Option<LaneId> {
        if self.on_road { self.lane } else { None }
    }

    /// Offset on the last route edge at which the vehicle arrives.
    pub fn arrival_offset(&self, network: &RoadNetwork) -> f64 {
        match (self.arrival_pos, self.route.last()) {
            (Some(pos), _) => pos,
            (None, Some(last)) => network.edge_length(last),
            (None, None) => 0.0,
        }
    }

    /// `true` if a stop is pending on route position `index`.
    pub fn has_stop_at(&self, index: usize) -> bool {
        self.stops.iter().any(|s| s.route_index == index)
    }

    /// The best-lane continuation for the lane the vehicle is on.
    ///
    /// On an internal lane this is the continuation of the route-edge lane
    /// whose link crosses the junction on that internal lane.
    pub fn continuation<'a>(&'a self, network: &RoadNetwork) -> &'a [LaneId] {
        let Some(lane) = self.lane else {
            return &[];
        };
        let entry = if network.is_internal_lane(lane) {
            self.best_lanes.iter().find(|b| {
                network
                    .lane(b.lane)
                    .links
                    .iter()
                    .any(|&l| network.link(l).via == Some(lane))
            })
        } else {
            self.best_lanes.iter().find(|b| b.lane == lane)
        };
        entry.map(|b| b.continuation.as_slice()).unwrap_or(&[])
    }

    /// Recompute `best_lanes` from the route, starting at `route_index`.
    pub fn refresh_best_lanes(&mut self, network: &RoadNetwork) {
        self.best_lanes = best_lanes::follow_route(network, &self.route, self.route_index);
    }
}
