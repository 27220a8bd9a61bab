//! Road network representation and builder.
//!
//! # Data layout
//!
//! The network is an arena of four flat vectors (`edges`, `lanes`, `links`,
//! `lights`) indexed by the typed ids from `lt-core`.  Every back reference
//! (lane → edge, link → lane, link → traffic light) is an id, so the graph
//! has no ownership cycles and every hop is an O(1) index.
//!
//! ```text
//! Edge ──lanes──▶ Lane ──links──▶ Link ──to/via──▶ Lane
//!  ▲                │                  └─control─▶ TrafficLight
//!  └──────edge──────┘
//! ```
//!
//! Edges are either `Normal` (addressable in routes) or `Internal` (the
//! junction-interior pieces a vehicle crosses between two route edges).
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over lane shape segments maps an `(x, y)` point to
//! the nearest lane and the offset along it.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use lt_core::geo::{polyline_length, polyline_point};
use lt_core::{EdgeId, LaneId, LinkId, Position, TlsId};

use crate::link::{Link, LinkControl, LinkState, TrafficLight};
use crate::stopping::{StoppingPlace, StoppingPlaceKind};
use crate::{NetworkError, NetworkResult};

// ── R-tree lane segment entry ─────────────────────────────────────────────────

/// One straight piece of a lane shape, stored in the R-tree.
#[derive(Clone)]
struct LaneSegment {
    a: [f64; 2],
    b: [f64; 2],
    lane: LaneId,
    /// Shape distance from the start of the lane to `a`.
    start_offset: f64,
}

impl LaneSegment {
    fn project(&self, point: &[f64; 2]) -> (f64, f64) {
        Position::new(point[0], point[1]).project_onto_segment(
            Position::new(self.a[0], self.a[1]),
            Position::new(self.b[0], self.b[1]),
        )
    }
}

impl RTreeObject for LaneSegment {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.a, self.b)
    }
}

impl PointDistance for LaneSegment {
    /// Squared distance from `point` to the closest point of the segment.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.project(point).1
    }
}

// ── Edge / Lane ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    #[default]
    Normal,
    /// Junction interior; never part of a route.
    Internal,
}

/// A set of parallel lanes between two junctions (or inside one).
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: String,
    pub kind: EdgeKind,
    /// Lanes ordered by index, rightmost first.
    pub lanes: Vec<LaneId>,
    /// Length of the edge; equal to the length of its first lane.
    pub length: f64,
    /// Edges with a link into this one, derived when the network is built.
    pub predecessors: Vec<EdgeId>,
    /// Edges this one has a link into, derived when the network is built.
    pub successors: Vec<EdgeId>,
}

impl Edge {
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.kind == EdgeKind::Internal
    }
}

#[derive(Clone, Debug)]
pub struct Lane {
    /// `<edge id>_<index>`.
    pub id: String,
    pub edge: EdgeId,
    pub index: u32,
    pub length: f64,
    pub shape: Vec<Position>,
    /// Outgoing links in insertion order.
    pub links: Vec<LinkId>,
    pub internal: bool,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Lane-level road graph plus a spatial index of lane geometry.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].  Ids handed out by
/// the builder index straight into the arenas; an id from another network
/// panics like any out-of-bounds index.
pub struct RoadNetwork {
    pub edges:  Vec<Edge>,
    pub lanes:  Vec<Lane>,
    pub links:  Vec<Link>,
    pub lights: Vec<TrafficLight>,

    pub stopping_places: Vec<StoppingPlace>,

    edge_ids:  FxHashMap<String, EdgeId>,
    lane_ids:  FxHashMap<String, LaneId>,
    tls_ids:   FxHashMap<String, TlsId>,
    place_ids: FxHashMap<(StoppingPlaceKind, String), usize>,

    spatial_idx: RTree<LaneSegment>,
}

impl RoadNetwork {
    /// A network with nothing in it.
    pub fn empty() -> Self {
        Self {
            edges:       Vec::new(),
            lanes:       Vec::new(),
            links:       Vec::new(),
            lights:      Vec::new(),
            stopping_places: Vec::new(),
            edge_ids:    FxHashMap::default(),
            lane_ids:    FxHashMap::default(),
            tls_ids:     FxHashMap::default(),
            place_ids:   FxHashMap::default(),
            spatial_idx: RTree::new(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn edge_count(&self) -> usize { self.edges.len() }
    pub fn lane_count(&self) -> usize { self.lanes.len() }
    pub fn link_count(&self) -> usize { self.links.len() }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    // ── Arena access ──────────────────────────────────────────────────────

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn lane(&self, id: LaneId) -> &Lane {
        &self.lanes[id.index()]
    }

    #[inline]
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    #[inline]
    pub fn light(&self, id: TlsId) -> &TrafficLight {
        &self.lights[id.index()]
    }

    #[inline]
    pub fn edge_length(&self, id: EdgeId) -> f64 {
        self.edges[id.index()].length
    }

    #[inline]
    pub fn lane_length(&self, id: LaneId) -> f64 {
        self.lanes[id.index()].length
    }

    #[inline]
    pub fn lane_edge(&self, id: LaneId) -> EdgeId {
        self.lanes[id.index()].edge
    }

    #[inline]
    pub fn is_internal_lane(&self, id: LaneId) -> bool {
        self.lanes[id.index()].internal
    }

    // ── Lookup by string id ───────────────────────────────────────────────

    pub fn edge_by_id(&self, id: &str) -> NetworkResult<EdgeId> {
        self.edge_ids
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::EdgeNotFound(id.to_owned()))
    }

    pub fn lane_by_id(&self, id: &str) -> NetworkResult<LaneId> {
        self.lane_ids
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::LaneNotFound(id.to_owned()))
    }

    pub fn tls_by_id(&self, id: &str) -> NetworkResult<TlsId> {
        self.tls_ids
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::TlsNotFound(id.to_owned()))
    }

    /// The stopping place of `kind` called `id`.
    pub fn stopping_place(&self, kind: StoppingPlaceKind, id: &str) -> NetworkResult<&StoppingPlace> {
        self.place_ids
            .get(&(kind, id.to_owned()))
            .map(|&i| &self.stopping_places[i])
            .ok_or_else(|| NetworkError::StoppingPlaceNotFound { kind, id: id.to_owned() })
    }

    /// The rightmost lane of `edge`.
    pub fn first_lane(&self, edge: EdgeId) -> NetworkResult<LaneId> {
        let e = self.edge(edge);
        e.lanes
            .first()
            .copied()
            .ok_or_else(|| NetworkError::EmptyEdge(e.id.clone()))
    }

    /// Lane `index` of `edge`, if the edge has that many lanes.
    pub fn lane_at(&self, edge: EdgeId, index: usize) -> Option<LaneId> {
        self.edge(edge).lanes.get(index).copied()
    }

    // ── Links and signals ─────────────────────────────────────────────────

    /// Current state of a link: the controller's signal for controlled links,
    /// the fixed priority state otherwise.
    pub fn link_state(&self, link: LinkId) -> LinkState {
        match self.link(link).control {
            LinkControl::Uncontrolled(state) => state,
            LinkControl::Signal { tls, index } => self.light(tls).signal(index),
        }
    }

    /// Replace the current state string of a traffic light.
    ///
    /// The string must use the [`LinkState`] alphabet and have one character
    /// per signal index of the controller.
    pub fn set_tls_state(&mut self, tls: TlsId, state: &str) -> NetworkResult<()> {
        let light = &mut self.lights[tls.index()];
        match LinkState::parse_all(state) {
            Some(parsed) if parsed.len() == light.state.len() => {
                light.state = parsed;
                Ok(())
            }
            _ => Err(NetworkError::InvalidSignalState {
                tls:   light.id.clone(),
                state: state.to_owned(),
            }),
        }
    }

    /// Resolve the link a vehicle takes out of `source`.
    ///
    /// - `next_edge` is the route edge `view` steps ahead of the vehicle's
    ///   current route edge; `None` (past the route end) means no link.
    /// - An internal source lane has exactly one way out: its first link.
    /// - Otherwise the link must lead onto `next_edge` and into
    ///   `continuation[view]`; a continuation shorter than `view + 1` is a
    ///   dead end.
    pub fn succ_link(
        &self,
        source:       LaneId,
        next_edge:    Option<EdgeId>,
        view:         usize,
        continuation: &[LaneId],
    ) -> Option<LinkId> {
        let next_edge = next_edge?;
        let lane = self.lane(source);
        if lane.internal {
            return lane.links.first().copied();
        }
        let wanted = *continuation.get(view)?;
        lane.links.iter().copied().find(|&id| {
            let link = self.link(id);
            link.to == wanted && self.lane_edge(link.to) == next_edge
        })
    }

    /// First link from any lane of `from` that ends on a lane of `to`.
    pub fn link_between(&self, from: EdgeId, to: EdgeId) -> Option<LinkId> {
        self.edge(from)
            .lanes
            .iter()
            .flat_map(|&lane| self.lane(lane).links.iter().copied())
            .find(|&id| self.lane_edge(self.link(id).to) == to)
    }

    /// `true` if some lane of `from` has a link onto `to`.
    pub fn are_connected(&self, from: EdgeId, to: EdgeId) -> bool {
        self.link_between(from, to).is_some()
    }

    /// Length of the internal lanes crossed when driving from the end of
    /// `from` onto `to`.  Zero when the connection has no via lane or when
    /// the edges are not connected at all.
    pub fn internal_length_between(&self, from: EdgeId, to: EdgeId) -> f64 {
        let Some(link) = self.link_between(from, to) else {
            return 0.0;
        };
        let mut total = 0.0;
        let mut lane = self.link(link).via;
        while let Some(current) = lane {
            if !self.is_internal_lane(current) {
                break;
            }
            total += self.lane_length(current);
            lane = self
                .lane(current)
                .links
                .first()
                .map(|&next| self.link(next).via_or_target());
        }
        total
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The planar point at `offset` on `lane`, the inverse of
    /// [`convert_to_road`](Self::convert_to_road).  `None` if the lane has no
    /// shape.
    pub fn position_on_lane(&self, lane: LaneId, offset: f64) -> Option<Position> {
        let lane = self.lane(lane);
        let shape_len = polyline_length(&lane.shape);
        let factor = if lane.length > 0.0 { shape_len / lane.length } else { 1.0 };
        polyline_point(&lane.shape, offset * factor)
    }

    /// Map a planar point to the nearest lane and the offset along it.
    ///
    /// Shape distances are rescaled to the lane's nominal length.  Returns
    /// `None` only if no lane has a shape.
    pub fn convert_to_road(&self, pos: Position) -> Option<(LaneId, f64)> {
        let point = pos.as_array();
        let seg = self.spatial_idx.nearest_neighbor(&point)?;
        let lane = self.lane(seg.lane);
        let shape_len = polyline_length(&lane.shape);
        let along = seg.start_offset + seg.project(&point).0;
        let factor = if shape_len > 0.0 { lane.length / shape_len } else { 1.0 };
        Some((seg.lane, (along * factor).clamp(0.0, lane.length)))
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use lt_core::Position;
/// use lt_network::{EdgeKind, LinkState, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let e1 = b.add_edge("E1", EdgeKind::Normal);
/// let e2 = b.add_edge("E2", EdgeKind::Normal);
/// let l1 = b.add_lane(e1, 100.0, vec![Position::new(0.0, 0.0), Position::new(100.0, 0.0)]);
/// let l2 = b.add_lane(e2, 100.0, vec![Position::new(100.0, 0.0), Position::new(200.0, 0.0)]);
/// b.add_link(l1, l2, None, LinkState::Major);
/// let net = b.build().unwrap();
/// assert_eq!(net.lane(l1).id, "E1_0");
/// assert!(net.are_connected(e1, e2));
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    edges:  Vec<Edge>,
    lanes:  Vec<Lane>,
    links:  Vec<Link>,
    lights: Vec<(String, String)>,
    places: Vec<StoppingPlace>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge with no lanes yet.
    pub fn add_edge(&mut self, id: impl Into<String>, kind: EdgeKind) -> EdgeId {
        let edge_id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id: id.into(),
            kind,
            lanes: Vec::new(),
            length: 0.0,
            predecessors: Vec::new(),
            successors: Vec::new(),
        });
        edge_id
    }

    /// Append a lane to `edge`.  Its id is `<edge id>_<index>`.
    pub fn add_lane(&mut self, edge: EdgeId, length: f64, shape: Vec<Position>) -> LaneId {
        let lane_id = LaneId(self.lanes.len() as u32);
        let e = &mut self.edges[edge.index()];
        let index = e.lanes.len() as u32;
        if index == 0 {
            e.length = length;
        }
        e.lanes.push(lane_id);
        self.lanes.push(Lane {
            id: format!("{}_{}", e.id, index),
            edge,
            index,
            length,
            shape,
            links: Vec::new(),
            internal: e.kind == EdgeKind::Internal,
        });
        lane_id
    }

    /// Add a link from the end of `from` to the start of `to`.
    pub fn add_link(&mut self, from: LaneId, to: LaneId, via: Option<LaneId>, state: LinkState) -> LinkId {
        let link_id = LinkId(self.links.len() as u32);
        self.links.push(Link { from, to, via, control: LinkControl::Uncontrolled(state) });
        self.lanes[from.index()].links.push(link_id);
        link_id
    }

    /// Connect `from` to `to` across the internal lane `via`: adds the
    /// junction link `from → to (via)` and the internal lane's own link
    /// `via → to`.  Returns the junction link.
    pub fn connect_via(&mut self, from: LaneId, to: LaneId, via: LaneId, state: LinkState) -> LinkId {
        let link = self.add_link(from, to, Some(via), state);
        self.add_link(via, to, None, state);
        link
    }

    /// Register a traffic light with its initial state string.
    pub fn add_traffic_light(&mut self, id: impl Into<String>, state: impl Into<String>) -> TlsId {
        let tls_id = TlsId(self.lights.len() as u32);
        self.lights.push((id.into(), state.into()));
        tls_id
    }

    /// Register a stopping place covering `start_pos..=end_pos` of `lane`.
    pub fn add_stopping_place(
        &mut self,
        id:        impl Into<String>,
        kind:      StoppingPlaceKind,
        lane:      LaneId,
        start_pos: f64,
        end_pos:   f64,
    ) {
        self.places.push(StoppingPlace { id: id.into(), kind, lane, start_pos, end_pos });
    }

    /// Hand control of `link` to signal `index` of `tls`.
    pub fn control_link(&mut self, link: LinkId, tls: TlsId, index: usize) {
        self.links[link.index()].control = LinkControl::Signal { tls, index };
    }

    /// Validate ids and signal states, derive edge adjacency, and bulk-load
    /// the R-tree.
    pub fn build(self) -> NetworkResult<RoadNetwork> {
        let mut edges = self.edges;
        let lanes = self.lanes;
        let links = self.links;

        // ── Id maps ───────────────────────────────────────────────────────
        let mut edge_ids = FxHashMap::default();
        for (i, e) in edges.iter().enumerate() {
            if edge_ids.insert(e.id.clone(), EdgeId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateId(e.id.clone()));
            }
        }
        let mut lane_ids = FxHashMap::default();
        for (i, l) in lanes.iter().enumerate() {
            if lane_ids.insert(l.id.clone(), LaneId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateId(l.id.clone()));
            }
        }

        let mut lights = Vec::with_capacity(self.lights.len());
        let mut tls_ids = FxHashMap::default();
        for (i, (id, state)) in self.lights.into_iter().enumerate() {
            let parsed = LinkState::parse_all(&state)
                .ok_or_else(|| NetworkError::InvalidSignalState { tls: id.clone(), state: state.clone() })?;
            if tls_ids.insert(id.clone(), TlsId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateId(id));
            }
            lights.push(TrafficLight { id, state: parsed });
        }
        for link in &links {
            if let LinkControl::Signal { tls, index } = link.control {
                let light = &lights[tls.index()];
                if index >= light.state.len() {
                    return Err(NetworkError::InvalidSignalState {
                        tls:   light.id.clone(),
                        state: light.state_string(),
                    });
                }
            }
        }

        // ── Stopping places ───────────────────────────────────────────────
        let stopping_places = self.places;
        let mut place_ids = FxHashMap::default();
        for (i, p) in stopping_places.iter().enumerate() {
            let length = lanes[p.lane.index()].length;
            if p.start_pos < 0.0 || p.end_pos < p.start_pos || p.end_pos > length {
                return Err(NetworkError::InvalidStoppingPlace(p.id.clone()));
            }
            if place_ids.insert((p.kind, p.id.clone()), i).is_some() {
                return Err(NetworkError::DuplicateId(p.id.clone()));
            }
        }

        // ── Edge adjacency ────────────────────────────────────────────────
        //
        // A link from lane a (edge A) to lane b (edge B) via v (edge V):
        //   A → B, and V sits between them (pred A, succ B).
        // Links leaving an internal lane only extend that lane's successors;
        // normal edges never list internal edges as neighbours.
        fn push_unique(v: &mut Vec<EdgeId>, id: EdgeId) {
            if !v.contains(&id) {
                v.push(id);
            }
        }
        for link in &links {
            let from = lanes[link.from.index()].edge;
            let to = lanes[link.to.index()].edge;
            push_unique(&mut edges[from.index()].successors, to);
            if edges[from.index()].is_internal() {
                continue;
            }
            push_unique(&mut edges[to.index()].predecessors, from);
            if let Some(via) = link.via {
                let via = lanes[via.index()].edge;
                push_unique(&mut edges[via.index()].predecessors, from);
                push_unique(&mut edges[via.index()].successors, to);
            }
        }

        // ── Spatial index ─────────────────────────────────────────────────
        let mut entries = Vec::new();
        for (i, lane) in lanes.iter().enumerate() {
            let mut start_offset = 0.0;
            for w in lane.shape.windows(2) {
                entries.push(LaneSegment {
                    a: w[0].as_array(),
                    b: w[1].as_array(),
                    lane: LaneId(i as u32),
                    start_offset,
                });
                start_offset += w[0].distance_to(w[1]);
            }
        }
        let spatial_idx = RTree::bulk_load(entries);

        Ok(RoadNetwork {
            edges,
            lanes,
            links,
            lights,
            stopping_places,
            edge_ids,
            lane_ids,
            tls_ids,
            place_ids,
            spatial_idx,
        })
    }
}
