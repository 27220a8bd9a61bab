//! Stop requests and their validation.

use lt_network::{RoadNetwork, StoppingPlaceKind};
use lt_vehicle::{Stop, VehicleState};

/// Bit flags accepted by [`StopRequest::flags`].
pub mod flags {
    pub const PARKING:             u8 = 1;
    pub const TRIGGERED:           u8 = 2;
    pub const CONTAINER_TRIGGERED: u8 = 4;
    pub const BUS_STOP:            u8 = 8;
    pub const CONTAINER_STOP:      u8 = 16;
    pub const CHARGING_STATION:    u8 = 32;
    pub const PARKING_AREA:        u8 = 64;

    /// Any of the stopping-place flags.
    pub const STOPPING_PLACE: u8 = BUS_STOP | CONTAINER_STOP | CHARGING_STATION | PARKING_AREA;
}

/// A request to stop on lane `lane_index` of `edge` between `start_pos` and
/// `end_pos`.
#[derive(Clone, Debug, PartialEq)]
pub struct StopRequest {
    pub edge:        String,
    pub end_pos:     f64,
    pub lane_index:  usize,
    pub duration_ms: u64,
    pub flags:       u8,
    pub start_pos:   f64,
    pub until_ms:    Option<u64>,
}

impl StopRequest {
    /// A plain stop on lane 0 ending at `end_pos`, starting at the lane start.
    pub fn new(edge: impl Into<String>, end_pos: f64) -> Self {
        Self {
            edge: edge.into(),
            end_pos,
            lane_index:  0,
            duration_ms: 0,
            flags:       0,
            start_pos:   0.0,
            until_ms:    None,
        }
    }

    pub fn lane_index(mut self, index: usize) -> Self {
        self.lane_index = index;
        self
    }

    pub fn start_pos(mut self, pos: f64) -> Self {
        self.start_pos = pos;
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn until_ms(mut self, ms: u64) -> Self {
        self.until_ms = Some(ms);
        self
    }

    pub fn flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }
}

/// Offsets closer than this name the same stop.
const POSITION_EPS: f64 = 0.1;

/// The stopping-place kind named by `flags`; the highest flag wins.
fn place_kind(bits: u8) -> Option<StoppingPlaceKind> {
    if bits & flags::PARKING_AREA != 0 {
        Some(StoppingPlaceKind::ParkingArea)
    } else if bits & flags::CHARGING_STATION != 0 {
        Some(StoppingPlaceKind::ChargingStation)
    } else if bits & flags::CONTAINER_STOP != 0 {
        Some(StoppingPlaceKind::ContainerStop)
    } else if bits & flags::BUS_STOP != 0 {
        Some(StoppingPlaceKind::BusStop)
    } else {
        None
    }
}

/// Turn `request` into a [`Stop`] for `state`, or explain why it is refused.
///
/// With a stopping-place flag `request.edge` names the stopping place and
/// its lane stretch replaces the requested lane and offsets.  The stop must
/// lie on the remaining route; on the vehicle's current edge it must not end
/// behind the vehicle.
pub(crate) fn resolve(state: &VehicleState, network: &RoadNetwork, request: &StopRequest) -> Result<Stop, String> {
    let (edge, lane, start_pos, end_pos) = match place_kind(request.flags) {
        Some(kind) => {
            let place = network.stopping_place(kind, &request.edge).map_err(|e| e.to_string())?;
            (network.lane_edge(place.lane), place.lane, place.start_pos, place.end_pos)
        }
        None => {
            if request.start_pos < 0.0 {
                return Err("position on lane must not be negative".into());
            }
            if request.end_pos < request.start_pos {
                return Err("end position on lane must be after start position".into());
            }
            let edge = network
                .edge_by_id(&request.edge)
                .map_err(|_| format!("unable to retrieve road '{}'", request.edge))?;
            let lane = network
                .lane_at(edge, request.lane_index)
                .ok_or_else(|| format!("no lane with index '{}' on road '{}'", request.lane_index, request.edge))?;
            if request.end_pos > network.lane_length(lane) {
                return Err(format!(
                    "stop position {} exceeds the length of lane '{}'",
                    request.end_pos,
                    network.lane(lane).id
                ));
            }
            (edge, lane, request.start_pos, request.end_pos)
        }
    };
    let edge_id = &network.edge(edge).id;

    let mut route_index = state
        .route
        .position_of(edge, state.route_index)
        .ok_or_else(|| format!("edge '{edge_id}' is not on the remaining route"))?;
    let on_current_edge = state.road_lane().map(|l| network.lane_edge(l)) == Some(edge);
    if on_current_edge && route_index == state.route_index && end_pos < state.pos {
        route_index = state
            .route
            .position_of(edge, route_index + 1)
            .ok_or_else(|| format!("stop on edge '{edge_id}' is behind the vehicle"))?;
    }

    Ok(Stop {
        edge,
        lane,
        route_index,
        start_pos,
        end_pos,
        duration_ms:         request.duration_ms,
        until_ms:            request.until_ms,
        parking:             request.flags & flags::PARKING != 0,
        triggered:           request.flags & flags::TRIGGERED != 0,
        container_triggered: request.flags & flags::CONTAINER_TRIGGERED != 0,
    })
}

/// What [`merge`] did with a stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum StopChange {
    Added,
    Updated,
    Cancelled,
}

/// Add `stop` to `stops`, kept in route order.
///
/// A stop on the same lane ending within [`POSITION_EPS`] of an existing one
/// updates that stop's duration and deadline instead; a zero duration
/// cancels it.
pub(crate) fn merge(stops: &mut Vec<Stop>, stop: Stop) -> StopChange {
    let same = stops
        .iter()
        .position(|s| s.lane == stop.lane && (s.end_pos - stop.end_pos).abs() < POSITION_EPS);
    if let Some(idx) = same {
        if stop.duration_ms == 0 {
            stops.remove(idx);
            return StopChange::Cancelled;
        }
        stops[idx].duration_ms = stop.duration_ms;
        stops[idx].until_ms = stop.until_ms;
        return StopChange::Updated;
    }
    let idx = stops
        .iter()
        .position(|s| (s.route_index, s.end_pos) > (stop.route_index, stop.end_pos))
        .unwrap_or(stops.len());
    stops.insert(idx, stop);
    StopChange::Added
}
