//! Forward scan for traffic-light controlled links.
//!
//! The scan walks the vehicle's best-lane continuation link by link, summing
//! the lengths of the lanes it passes (internal lanes included), and yields
//! every signal-controlled link it crosses from a normal lane.  It ends where
//! the route, the continuation or the network ends.

use lt_core::{LaneId, LinkId, TlsId};
use lt_network::{LinkState, RoadNetwork, Route};

use crate::VehicleState;

/// One controlled link ahead of a vehicle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NextSignal {
    pub tls: TlsId,
    /// Signal index of the link within its traffic light.
    pub link_index: usize,
    /// Distance from the vehicle to the end of the lane holding the link.
    pub distance: f64,
    pub state: LinkState,
}

/// Lazy iterator over the controlled links ahead, in increasing distance.
pub struct UpcomingSignals<'a> {
    network:      &'a RoadNetwork,
    route:        &'a Route,
    route_index:  usize,
    continuation: &'a [LaneId],

    lane: LaneId,
    link: Option<LinkId>,
    seen: f64,
    view: usize,
}

/// Start a scan from the vehicle's current position.  Empty if the vehicle
/// is not on the road.
pub fn upcoming_signals<'a>(state: &'a VehicleState, network: &'a RoadNetwork) -> UpcomingSignals<'a> {
    let mut scan = UpcomingSignals {
        network,
        route:        &state.route,
        route_index:  state.route_index,
        continuation: state.continuation(network),
        lane:         LaneId::INVALID,
        link:         None,
        seen:         0.0,
        view:         1,
    };
    if let Some(lane) = state.road_lane() {
        scan.lane = lane;
        scan.seen = network.lane_length(lane) - state.pos;
        scan.link = scan.succ_link();
    }
    scan
}

impl UpcomingSignals<'_> {
    fn succ_link(&self) -> Option<LinkId> {
        let next = self.route.succ_edge(self.route_index, self.view);
        self.network.succ_link(self.lane, next, self.view, self.continuation)
    }
}

impl Iterator for UpcomingSignals<'_> {
    type Item = NextSignal;

    fn next(&mut self) -> Option<NextSignal> {
        while let Some(link_id) = self.link {
            let link = self.network.link(link_id);
            let found = if self.network.is_internal_lane(self.lane) {
                None
            } else {
                link.signal().map(|(tls, link_index)| NextSignal {
                    tls,
                    link_index,
                    distance: self.seen,
                    state: self.network.link_state(link_id),
                })
            };

            self.lane = link.via_or_target();
            if !self.network.is_internal_lane(self.lane) {
                self.view += 1;
            }
            self.seen += self.network.lane_length(self.lane);
            self.link = self.succ_link();

            if found.is_some() {
                return found;
            }
        }
        None
    }
}
