//! The demo network.
//!
//! ```text
//!  W1 ──(:A, 12 m, A#0)──▶ C1 ──(:B, 12 m, B#0)──▶ E1
//!   0 … 150               162 … 412               424 … 574
//! ```
//!
//! C1 has two lanes; only the right one continues onto E1.  The bus stop
//! "market" covers 100 … 120 on C1_0.

use lt_core::Position;
use lt_network::{EdgeKind, LinkState, NetworkResult, RoadNetwork, RoadNetworkBuilder, StoppingPlaceKind};

fn straight(x0: f64, x1: f64, y: f64) -> Vec<Position> {
    vec![Position::new(x0, y), Position::new(x1, y)]
}

pub fn build_network() -> NetworkResult<RoadNetwork> {
    let mut b = RoadNetworkBuilder::new();

    let w1 = b.add_edge("W1", EdgeKind::Normal);
    let a  = b.add_edge(":A", EdgeKind::Internal);
    let c1 = b.add_edge("C1", EdgeKind::Normal);
    let bj = b.add_edge(":B", EdgeKind::Internal);
    let e1 = b.add_edge("E1", EdgeKind::Normal);

    let w1_0 = b.add_lane(w1, 150.0, straight(0.0, 150.0, 0.0));
    let a_0  = b.add_lane(a, 12.0, straight(150.0, 162.0, 0.0));
    let a_1  = b.add_lane(a, 12.0, straight(150.0, 162.0, 3.2));
    let c1_0 = b.add_lane(c1, 250.0, straight(162.0, 412.0, 0.0));
    let c1_1 = b.add_lane(c1, 250.0, straight(162.0, 412.0, 3.2));
    let b_0  = b.add_lane(bj, 12.0, straight(412.0, 424.0, 0.0));
    let e1_0 = b.add_lane(e1, 150.0, straight(424.0, 574.0, 0.0));

    let straight_on = b.connect_via(w1_0, c1_0, a_0, LinkState::Major);
    let left_lane   = b.connect_via(w1_0, c1_1, a_1, LinkState::Major);
    let onward      = b.connect_via(c1_0, e1_0, b_0, LinkState::Major);

    let tls_a = b.add_traffic_light("A", "GG");
    let tls_b = b.add_traffic_light("B", "r");
    b.control_link(straight_on, tls_a, 0);
    b.control_link(left_lane, tls_a, 1);
    b.control_link(onward, tls_b, 0);

    b.add_stopping_place("market", StoppingPlaceKind::BusStop, c1_0, 100.0, 120.0);

    b.build()
}
