//! String-id views returned by the query facade.

use lt_network::LinkState;

/// One entry of the best-lanes query.
#[derive(Clone, Debug, PartialEq)]
pub struct BestLanesReport {
    pub lane_id:             String,
    pub length:              f64,
    pub best_lane_offset:    i32,
    pub allows_continuation: bool,
    pub continuation:        Vec<String>,
}

/// One upcoming traffic-light controlled link.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalAhead {
    pub tls_id:     String,
    pub link_index: usize,
    pub distance:   f64,
    pub state:      LinkState,
}
