//! Routes and the forward driving-distance primitive.
//!
//! A route is an ordered list of *normal* edges.  Internal (junction) edges
//! never appear in it, so a position on an internal edge is measured through
//! the normal edge before it (its first predecessor) or, when both ends sit
//! in the same junction, directly.
//!
//! # Units
//!
//! Offsets and distances are metres.  "Unmeasurable" is `None`: the two
//! positions share no forward path inside the route.  It is never an error
//! and never the same thing as `Some(0.0)`.

use lt_core::EdgeId;

use crate::network::RoadNetwork;
use crate::{NetworkError, NetworkResult};

/// An immutable edge sequence assigned to a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: String,
    pub edges: Vec<EdgeId>,
}

impl Route {
    /// Build a route, rejecting empty edge lists and internal edges.
    ///
    /// Connectivity is *not* checked here; see [`Route::is_connected`].
    pub fn new(id: impl Into<String>, edges: Vec<EdgeId>, network: &RoadNetwork) -> NetworkResult<Route> {
        let id = id.into();
        if edges.is_empty() {
            return Err(NetworkError::InvalidRoute(format!("route '{id}' has no edges")));
        }
        if let Some(&internal) = edges.iter().find(|&&e| network.edge(e).is_internal()) {
            return Err(NetworkError::InvalidRoute(format!(
                "route '{id}' contains internal edge '{}'",
                network.edge(internal).id
            )));
        }
        Ok(Route { id, edges })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn edge(&self, index: usize) -> Option<EdgeId> {
        self.edges.get(index).copied()
    }

    #[inline]
    pub fn last(&self) -> Option<EdgeId> {
        self.edges.last().copied()
    }

    /// The edge `n` steps after route position `current`.
    #[inline]
    pub fn succ_edge(&self, current: usize, n: usize) -> Option<EdgeId> {
        self.edges.get(current + n).copied()
    }

    /// First route position at or after `from` holding `edge`.
    pub fn position_of(&self, edge: EdgeId, from: usize) -> Option<usize> {
        self.edges
            .get(from..)?
            .iter()
            .position(|&e| e == edge)
            .map(|i| from + i)
    }

    /// `true` if a vehicle at route position `current` still has `edge`
    /// ahead of it (the current edge counts).
    pub fn will_pass(&self, current: usize, edge: EdgeId) -> bool {
        self.position_of(edge, current).is_some()
    }

    /// `true` if every pair of consecutive edges is joined by a link.
    pub fn is_connected(&self, network: &RoadNetwork) -> bool {
        self.edges.windows(2).all(|w| network.are_connected(w[0], w[1]))
    }

    /// Total driving length of the route: every edge plus the internal
    /// lanes between them.
    pub fn length(&self, network: &RoadNetwork) -> f64 {
        let Some(last) = self.last() else {
            return 0.0;
        };
        self.distance_between_indices(0.0, network.edge_length(last), 0, self.len() - 1, network)
            .unwrap_or(0.0)
    }

    /// Forward distance from `from_pos` on route position `from_idx` to
    /// `to_pos` on route position `to_idx`.
    ///
    /// Each edge passed contributes its length plus the internal lanes
    /// leading onto the next route edge.
    pub fn distance_between_indices(
        &self,
        from_pos: f64,
        to_pos:   f64,
        from_idx: usize,
        to_idx:   usize,
        network:  &RoadNetwork,
    ) -> Option<f64> {
        if from_idx >= self.len() || to_idx >= self.len() {
            return None;
        }
        if from_idx == to_idx {
            return (from_pos <= to_pos).then(|| to_pos - from_pos);
        }
        if from_idx > to_idx {
            return None;
        }
        let mut distance = -from_pos;
        for w in self.edges[from_idx..=to_idx].windows(2) {
            distance += network.edge_length(w[0]) + network.internal_length_between(w[0], w[1]);
        }
        Some(distance + to_pos)
    }

    /// Forward distance between two `(edge, offset)` positions, searching the
    /// route from `route_position` onwards.
    ///
    /// Either edge may be internal; it is then measured through its first
    /// predecessor, which is the route edge in front of the junction.  A
    /// target behind an internal origin is unmeasurable.
    pub fn distance_between(
        &self,
        from_pos:       f64,
        to_pos:         f64,
        from_edge:      EdgeId,
        to_edge:        EdgeId,
        network:        &RoadNetwork,
        route_position: usize,
    ) -> Option<f64> {
        if route_position >= self.len() {
            return None;
        }
        let from = network.edge(from_edge);
        let to = network.edge(to_edge);

        if from.is_internal() && to.is_internal() {
            if from_edge == to_edge {
                return (from_pos <= to_pos).then(|| to_pos - from_pos);
            }
            if from.successors.first() == Some(&to_edge) {
                return Some(from.length - from_pos + to_pos);
            }
        }
        if from.is_internal() {
            let pred = *from.predecessors.first()?;
            return self
                .distance_between(network.edge_length(pred), to_pos, pred, to_edge, network, route_position)
                .and_then(|d| (d >= from_pos).then(|| d - from_pos));
        }
        if to.is_internal() {
            let pred = *to.predecessors.first()?;
            return self
                .distance_between(from_pos, network.edge_length(pred), from_edge, pred, network, route_position)
                .map(|d| d + to_pos);
        }

        let from_idx = self.position_of(from_edge, route_position)?;
        let to_idx = if from_edge == to_edge && from_pos > to_pos {
            // Backwards on the same edge: only reachable on a later visit.
            self.position_of(to_edge, from_idx + 1)?
        } else {
            self.position_of(to_edge, from_idx)?
        };
        self.distance_between_indices(from_pos, to_pos, from_idx, to_idx, network)
    }
}
