//! Integration tests for lt-sim.

use lt_core::{LaneId, Position, SimConfig, VehicleId};
use lt_network::{EdgeKind, LinkState, RoadNetwork, RoadNetworkBuilder};
use lt_vehicle::{MoveReminder, Notification, NoopReminder, VehicleError};

use crate::{SimBuilder, SimError, Simulation, StopRequest};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn straight(x0: f64, x1: f64) -> Vec<Position> {
    vec![Position::new(x0, 0.0), Position::new(x1, 0.0)]
}

/// E1 ─▶ E2 ─(:J2, 20 m)─▶ E3, normal edges 100 m each.
fn corridor() -> RoadNetwork {
    corridor_with(|_, _| {})
}

/// The corridor, with `extra` run on the builder before it is built.  The
/// lanes are passed as `[E1_0, E2_0, :J2_0, E3_0]`.
fn corridor_with(extra: impl FnOnce(&mut RoadNetworkBuilder, [LaneId; 4])) -> RoadNetwork {
    let mut b = RoadNetworkBuilder::new();
    let e1 = b.add_edge("E1", EdgeKind::Normal);
    let e2 = b.add_edge("E2", EdgeKind::Normal);
    let j2 = b.add_edge(":J2", EdgeKind::Internal);
    let e3 = b.add_edge("E3", EdgeKind::Normal);
    let e1_0 = b.add_lane(e1, 100.0, straight(0.0, 100.0));
    let e2_0 = b.add_lane(e2, 100.0, straight(100.0, 200.0));
    let j2_0 = b.add_lane(j2, 20.0, straight(200.0, 220.0));
    let e3_0 = b.add_lane(e3, 100.0, straight(220.0, 320.0));
    b.add_link(e1_0, e2_0, None, LinkState::Major);
    b.connect_via(e2_0, e3_0, j2_0, LinkState::Major);
    extra(&mut b, [e1_0, e2_0, j2_0, e3_0]);
    b.build().unwrap()
}

/// E1 (100) ─(:J1, 10, J1#0)─▶ E2 (170) ─(:J2, 10, J2#0)─▶ E3 (100).
fn signal_corridor() -> RoadNetwork {
    let mut b = RoadNetworkBuilder::new();
    let e1 = b.add_edge("E1", EdgeKind::Normal);
    let j1 = b.add_edge(":J1", EdgeKind::Internal);
    let e2 = b.add_edge("E2", EdgeKind::Normal);
    let j2 = b.add_edge(":J2", EdgeKind::Internal);
    let e3 = b.add_edge("E3", EdgeKind::Normal);
    let e1_0 = b.add_lane(e1, 100.0, straight(0.0, 100.0));
    let j1_0 = b.add_lane(j1, 10.0, straight(100.0, 110.0));
    let e2_0 = b.add_lane(e2, 170.0, straight(110.0, 280.0));
    let j2_0 = b.add_lane(j2, 10.0, straight(280.0, 290.0));
    let e3_0 = b.add_lane(e3, 100.0, straight(290.0, 390.0));
    let first = b.connect_via(e1_0, e2_0, j1_0, LinkState::Major);
    let second = b.connect_via(e2_0, e3_0, j2_0, LinkState::Major);
    let t1 = b.add_traffic_light("J1", "G");
    let t2 = b.add_traffic_light("J2", "r");
    b.control_link(first, t1, 0);
    b.control_link(second, t2, 0);
    b.build().unwrap()
}

#[derive(Default)]
struct Counter {
    left_network: Vec<Notification>,
    entered:      Vec<LaneId>,
    placed:       Vec<(LaneId, Notification)>,
}

impl MoveReminder for Counter {
    fn on_leave_network(&mut self, _v: VehicleId, kind: Notification) {
        self.left_network.push(kind);
    }
    fn on_enter_lane(&mut self, _v: VehicleId, lane: LaneId, _kind: Notification) {
        self.entered.push(lane);
    }
    fn on_place(&mut self, _v: VehicleId, lane: LaneId, _pos: f64, kind: Notification) {
        self.placed.push((lane, kind));
    }
}

fn sim(network: RoadNetwork) -> Simulation<Counter> {
    SimBuilder::new(network, Counter::default()).build().unwrap()
}

/// Corridor with vehicle `v0` on route E1 E2 E3, inserted at E1 offset 0.
fn inserted() -> Simulation<Counter> {
    let mut s = sim(corridor());
    s.add_vehicle("v0", "r0", &["E1", "E2", "E3"], 0.0).unwrap();
    s.insert_vehicle("v0").unwrap();
    s
}

fn lane(s: &Simulation<Counter>, id: &str) -> LaneId {
    s.network.lane_by_id(id).unwrap()
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let s = SimBuilder::new(corridor(), NoopReminder).build().unwrap();
        assert_eq!(s.vehicle_count(), 0);
        assert_eq!(s.config, SimConfig::default());
        assert_eq!(s.current_tick().0, 0);
    }

    #[test]
    fn zero_step_length_rejected() {
        let config = SimConfig { step_length_ms: 0, ..SimConfig::default() };
        let err = SimBuilder::new(corridor(), NoopReminder).config(config).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn begin_tick_applied() {
        let config = SimConfig { begin_tick: 7, ..SimConfig::default() };
        let s = SimBuilder::new(corridor(), NoopReminder).config(config).build().unwrap();
        assert_eq!(s.current_tick().0, 7);
    }
}

// ── Vehicle lifecycle ─────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn pending_vehicle_has_no_position() {
        let mut s = sim(corridor());
        s.add_vehicle("v0", "r0", &["E1", "E2"], 0.0).unwrap();
        assert_eq!(s.vehicle_ids(), vec!["v0".to_string()]);
        assert_eq!(s.road_id("v0").unwrap(), None);
        assert_eq!(s.lane_index("v0").unwrap(), None);
        assert_eq!(s.route_index("v0").unwrap(), None);
        assert_eq!(s.distance("v0").unwrap(), None);
        assert!(s.best_lanes("v0").unwrap().is_empty());
        assert!(s.next_tls("v0").unwrap().is_empty());
        assert_eq!(s.insertion.pending().len(), 1);
    }

    #[test]
    fn add_rejects_duplicates_and_unknown_edges() {
        let mut s = sim(corridor());
        s.add_vehicle("v0", "r0", &["E1"], 0.0).unwrap();
        assert!(matches!(
            s.add_vehicle("v0", "r0", &["E1"], 0.0),
            Err(SimError::DuplicateVehicle(id)) if id == "v0"
        ));
        assert!(matches!(
            s.add_vehicle("v1", "r1", &["E1", "nowhere"], 0.0),
            Err(SimError::EdgeNotFound(id)) if id == "nowhere"
        ));
        assert_eq!(s.vehicle_count(), 1);
    }

    #[test]
    fn insert_places_on_first_lane() {
        let mut s = sim(corridor());
        s.add_vehicle("v0", "r0", &["E1", "E2", "E3"], 12.0).unwrap();
        s.insert_vehicle("v0").unwrap();
        assert_eq!(s.lane_id("v0").unwrap().as_deref(), Some("E1_0"));
        assert_eq!(s.road_id("v0").unwrap().as_deref(), Some("E1"));
        assert_eq!(s.lane_position("v0").unwrap(), Some(12.0));
        assert_eq!(s.route_index("v0").unwrap(), Some(0));
        assert_eq!(s.reminder.placed, vec![(lane(&s, "E1_0"), Notification::Departed)]);
        assert_eq!(s.insertion.departed_count(), 1);
        assert!(s.insertion.pending().is_empty());
        assert_eq!(s.occupancy.vehicles_on(lane(&s, "E1_0")).len(), 1);
        assert_eq!(s.distance("v0").unwrap(), Some(0.0));
    }

    #[test]
    fn insert_twice_fails() {
        let mut s = inserted();
        assert!(matches!(s.insert_vehicle("v0"), Err(SimError::AlreadyDeparted(_))));
    }

    #[test]
    fn remove_clears_occupancy() {
        let mut s = inserted();
        s.remove_vehicle("v0").unwrap();
        assert_eq!(s.vehicle_count(), 0);
        assert_eq!(s.occupancy.total(), 0);
        assert_eq!(s.reminder.left_network.last(), Some(&Notification::Vaporized));
        assert!(matches!(s.lane_id("v0"), Err(SimError::VehicleNotFound(_))));
        assert!(matches!(s.remove_vehicle("v0"), Err(SimError::VehicleNotFound(_))));
    }

    #[test]
    fn step_advances_clock() {
        let mut s = inserted();
        assert_eq!(s.step(), 0);
        assert_eq!(s.current_tick().0, 1);
        assert_eq!(s.vehicle_count(), 1);
    }

    #[test]
    fn unknown_vehicle_is_named() {
        let s = sim(corridor());
        let err = s.distance("ghost").unwrap_err();
        assert_eq!(err.to_string(), "vehicle 'ghost' is not known");
    }
}

// ── Route queries and distances ───────────────────────────────────────────────

#[cfg(test)]
mod distances {
    use super::*;

    #[test]
    fn route_queries() {
        let s = inserted();
        assert_eq!(s.route_id("v0").unwrap(), "r0");
        assert_eq!(s.route_edges("v0").unwrap(), vec!["E1", "E2", "E3"]);
        assert!(s.is_route_valid("v0").unwrap());
    }

    #[test]
    fn disconnected_route_is_invalid() {
        let mut s = sim(corridor());
        s.add_vehicle("v0", "r0", &["E1", "E3"], 0.0).unwrap();
        assert!(!s.is_route_valid("v0").unwrap());
    }

    #[test]
    fn odometer_on_second_edge() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        assert_eq!(s.distance("v0").unwrap(), Some(140.0));
        assert_eq!(s.route_index("v0").unwrap(), Some(1));
    }

    #[test]
    fn odometer_inside_junction() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        // Movement onto the junction lane happens outside the facade.
        let j2 = lane(&s, ":J2_0");
        let id = s.vehicles.lookup("v0").unwrap();
        let v = s.vehicles.get_mut(id).unwrap();
        v.lane = Some(j2);
        v.pos = 15.0;
        assert_eq!(s.distance("v0").unwrap(), Some(215.0));
        assert_eq!(s.driving_distance("v0", "E3", 30.0).unwrap(), Some(35.0));
        // Nothing behind the vehicle is reachable from inside the junction.
        assert_eq!(s.driving_distance("v0", ":J2", 5.0).unwrap(), None);
        assert_eq!(s.driving_distance("v0", "E2", 100.0).unwrap(), None);
    }

    #[test]
    fn planar_position() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        assert_eq!(s.position("v0").unwrap(), Some(Position::new(140.0, 0.0)));

        s.add_vehicle("v1", "r1", &["E1", "E2", "E3"], 0.0).unwrap();
        assert_eq!(s.position("v1").unwrap(), None);
        assert!(matches!(s.position("v9"), Err(SimError::VehicleNotFound(_))));
    }

    #[test]
    fn driving_distance_forward_and_back() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        assert_eq!(s.driving_distance("v0", "E3", 30.0).unwrap(), Some(110.0));
        assert_eq!(s.driving_distance("v0", "E1", 30.0).unwrap(), None);
        assert!(matches!(
            s.driving_distance("v0", "E9", 0.0),
            Err(SimError::EdgeNotFound(id)) if id == "E9"
        ));
    }

    #[test]
    fn driving_distance_to_point() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        assert_eq!(s.driving_distance_2d("v0", 250.0, 0.0).unwrap(), Some(110.0));
    }

    #[test]
    fn best_lanes_report() {
        let s = inserted();
        let report = s.best_lanes("v0").unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].lane_id, "E1_0");
        assert_eq!(report[0].continuation, vec!["E1_0", "E2_0", "E3_0"]);
        assert!(report[0].allows_continuation);
        assert_eq!(report[0].best_lane_offset, 0);
    }
}

// ── Signals ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod signals {
    use super::*;

    fn on_e1_at_50() -> Simulation<Counter> {
        let mut s = sim(signal_corridor());
        s.add_vehicle("v0", "r0", &["E1", "E2", "E3"], 50.0).unwrap();
        s.insert_vehicle("v0").unwrap();
        s
    }

    #[test]
    fn next_tls_in_order() {
        let s = on_e1_at_50();
        let ahead = s.next_tls("v0").unwrap();
        let summary: Vec<_> = ahead
            .iter()
            .map(|a| (a.tls_id.as_str(), a.link_index, a.distance, a.state))
            .collect();
        assert_eq!(summary, vec![
            ("J1", 0, 50.0, LinkState::GreenMajor),
            ("J2", 0, 230.0, LinkState::Red),
        ]);
    }

    #[test]
    fn tls_state_update_visible() {
        let mut s = on_e1_at_50();
        s.set_tls_state("J2", "G").unwrap();
        assert_eq!(s.tls_state("J2").unwrap(), vec![LinkState::GreenMajor]);
        assert_eq!(s.next_tls("v0").unwrap()[1].state, LinkState::GreenMajor);
        assert!(s.set_tls_state("J2", "GG").is_err());
        assert!(s.set_tls_state("nope", "G").is_err());
    }

    #[test]
    fn passed_signals_disappear() {
        let mut s = on_e1_at_50();
        s.move_to("v0", "E2_0", 100.0).unwrap();
        let ahead = s.next_tls("v0").unwrap();
        assert_eq!(ahead.len(), 1);
        assert_eq!(ahead[0].tls_id, "J2");
        assert_eq!(ahead[0].distance, 70.0);
    }
}

// ── Relocation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod relocation {
    use super::*;

    #[test]
    fn backwards_target_rejected() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        let err = s.move_to("v0", "E1_0", 10.0).unwrap_err();
        assert!(matches!(err, SimError::Vehicle(VehicleError::InvalidTarget { .. })));
        assert_eq!(s.lane_id("v0").unwrap().as_deref(), Some("E2_0"));
        assert_eq!(s.lane_position("v0").unwrap(), Some(40.0));
        assert_eq!(s.occupancy.total(), 1);
    }

    #[test]
    fn offset_beyond_lane_rejected() {
        let mut s = inserted();
        let err = s.move_to("v0", "E2_0", 5000.0).unwrap_err();
        assert!(matches!(err, SimError::Vehicle(VehicleError::PositionOutOfLane { .. })));
        assert_eq!(s.lane_id("v0").unwrap().as_deref(), Some("E1_0"));
        assert_eq!(s.lane_position("v0").unwrap(), Some(0.0));
        assert_eq!(s.distance("v0").unwrap(), Some(0.0));
        assert!(s.reminder.entered.is_empty());
    }

    #[test]
    fn unknown_lane_rejected() {
        let mut s = inserted();
        assert!(matches!(
            s.move_to("v0", "E7_0", 0.0),
            Err(SimError::LaneNotFound(id)) if id == "E7_0"
        ));
    }

    #[test]
    fn across_two_edges() {
        let mut s = inserted();
        s.move_to("v0", "E3_0", 30.0).unwrap();
        let (e1_0, e2_0, e3_0) = (lane(&s, "E1_0"), lane(&s, "E2_0"), lane(&s, "E3_0"));
        assert_eq!(s.lane_id("v0").unwrap().as_deref(), Some("E3_0"));
        assert_eq!(s.lane_position("v0").unwrap(), Some(30.0));
        assert_eq!(s.reminder.entered, vec![e2_0, e3_0]);
        assert_eq!(s.reminder.placed.last(), Some(&(e3_0, Notification::Teleport)));
        assert!(s.occupancy.vehicles_on(e1_0).is_empty());
        assert!(s.occupancy.vehicles_on(e2_0).is_empty());
        assert_eq!(s.occupancy.vehicles_on(e3_0).len(), 1);
        assert_eq!(s.distance("v0").unwrap(), Some(250.0));
    }

    #[test]
    fn pending_vehicle_departs_on_move() {
        let mut s = sim(corridor());
        s.add_vehicle("v0", "r0", &["E1", "E2", "E3"], 0.0).unwrap();
        s.move_to("v0", "E2_0", 5.0).unwrap();
        assert_eq!(s.reminder.placed, vec![(lane(&s, "E2_0"), Notification::Departed)]);
        assert_eq!(s.insertion.departed_count(), 1);
        assert_eq!(s.route_index("v0").unwrap(), Some(1));
        assert!(matches!(s.insert_vehicle("v0"), Err(SimError::AlreadyDeparted(_))));
    }

    #[test]
    fn arrival_removed_at_step() {
        let mut s = inserted();
        let id = s.vehicles.lookup("v0").unwrap();
        s.vehicles.get_mut(id).unwrap().arrival_pos = Some(0.0);
        s.move_to("v0", "E3_0", 0.0).unwrap();
        assert!(s.insertion.is_scheduled_for_removal(id));
        assert_eq!(s.step(), 1);
        assert_eq!(s.vehicle_count(), 0);
        assert_eq!(s.occupancy.total(), 0);
        assert_eq!(s.reminder.left_network.last(), Some(&Notification::Arrived));
    }
}

// ── Stops ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stops {
    use super::*;
    use crate::stops::flags;

    fn on_e2_at_40() -> Simulation<Counter> {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        s
    }

    fn reason(err: SimError) -> String {
        match err {
            SimError::InvalidStop { reason, .. } => reason,
            other => panic!("expected InvalidStop, got {other:?}"),
        }
    }

    #[test]
    fn stops_kept_in_route_order() {
        let mut s = on_e2_at_40();
        s.set_stop("v0", StopRequest::new("E3", 50.0).duration_ms(20_000)).unwrap();
        s.set_stop("v0", StopRequest::new("E2", 80.0).start_pos(70.0)).unwrap();
        assert_eq!(s.stops("v0").unwrap(), vec![
            ("E2_0".to_string(), 80.0),
            ("E3_0".to_string(), 50.0),
        ]);
    }

    #[test]
    fn invalid_requests() {
        let mut s = on_e2_at_40();
        let err = s.set_stop("v0", StopRequest::new("E3", 10.0).start_pos(-1.0)).unwrap_err();
        assert!(reason(err).contains("negative"));
        let err = s.set_stop("v0", StopRequest::new("E3", 10.0).start_pos(20.0)).unwrap_err();
        assert!(reason(err).contains("after start"));
        let err = s.set_stop("v0", StopRequest::new("E8", 10.0)).unwrap_err();
        assert!(reason(err).contains("E8"));
        let err = s.set_stop("v0", StopRequest::new("E3", 10.0).lane_index(3)).unwrap_err();
        assert!(reason(err).contains("index '3'"));
        let err = s.set_stop("v0", StopRequest::new("E3", 10.0).flags(flags::BUS_STOP)).unwrap_err();
        assert!(reason(err).contains("bus stop 'E3' is not known"));
        let err = s.set_stop("v0", StopRequest::new("E3", 150.0)).unwrap_err();
        assert!(reason(err).contains("exceeds"));
        assert!(s.stops("v0").unwrap().is_empty());
    }

    #[test]
    fn stop_behind_vehicle_rejected() {
        let mut s = on_e2_at_40();
        assert!(matches!(
            s.set_stop("v0", StopRequest::new("E1", 50.0)),
            Err(SimError::InvalidStop { .. })
        ));
        let err = s.set_stop("v0", StopRequest::new("E2", 30.0)).unwrap_err();
        assert!(reason(err).contains("behind"));
    }

    #[test]
    fn repeated_stop_updates_duration() {
        let mut s = on_e2_at_40();
        s.set_stop("v0", StopRequest::new("E2", 50.0).duration_ms(10_000)).unwrap();
        s.set_stop("v0", StopRequest::new("E2", 50.05).duration_ms(25_000).until_ms(90_000)).unwrap();
        assert_eq!(s.stops("v0").unwrap(), vec![("E2_0".to_string(), 50.0)]);
        let id = s.vehicles.lookup("v0").unwrap();
        let stop = &s.vehicles.get(id).unwrap().stops[0];
        assert_eq!((stop.duration_ms, stop.until_ms), (25_000, Some(90_000)));
    }

    #[test]
    fn zero_duration_cancels_stop() {
        let mut s = on_e2_at_40();
        s.set_stop("v0", StopRequest::new("E2", 50.0).duration_ms(10_000)).unwrap();
        s.set_stop("v0", StopRequest::new("E3", 20.0).duration_ms(10_000)).unwrap();
        s.set_stop("v0", StopRequest::new("E2", 50.0)).unwrap();
        assert_eq!(s.stops("v0").unwrap(), vec![("E3_0".to_string(), 20.0)]);
    }

    #[test]
    fn bus_stop_supplies_lane_and_offsets() {
        use lt_network::StoppingPlaceKind;

        let net = corridor_with(|b, [_, _, _, e3_0]| {
            b.add_stopping_place("central", StoppingPlaceKind::BusStop, e3_0, 30.0, 45.0);
        });
        let mut s = sim(net);
        s.add_vehicle("v0", "r0", &["E1", "E2", "E3"], 0.0).unwrap();
        s.insert_vehicle("v0").unwrap();

        s.set_stop("v0", StopRequest::new("central", 0.0).flags(flags::BUS_STOP).duration_ms(5_000)).unwrap();
        assert_eq!(s.stops("v0").unwrap(), vec![("E3_0".to_string(), 45.0)]);
        let id = s.vehicles.lookup("v0").unwrap();
        let stop = &s.vehicles.get(id).unwrap().stops[0];
        assert_eq!((stop.start_pos, stop.route_index), (30.0, 2));

        // Same name, other kind.
        let err = s
            .set_stop("v0", StopRequest::new("central", 0.0).flags(flags::PARKING_AREA))
            .unwrap_err();
        assert!(reason(err).contains("parking area 'central'"));
    }

    #[test]
    fn flags_recorded() {
        let mut s = on_e2_at_40();
        s.set_stop("v0", StopRequest::new("E3", 50.0).flags(flags::PARKING | flags::TRIGGERED)).unwrap();
        let id = s.vehicles.lookup("v0").unwrap();
        let stop = &s.vehicles.get(id).unwrap().stops[0];
        assert!(stop.parking && stop.triggered && !stop.container_triggered);
        assert_eq!(stop.route_index, 2);
    }
}

// ── Route replacement ─────────────────────────────────────────────────────────

#[cfg(test)]
mod set_route {
    use super::*;

    #[test]
    fn replace_from_current_edge() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        s.set_route("v0", &["E2", "E3"]).unwrap();
        assert_eq!(s.route_edges("v0").unwrap(), vec!["E2", "E3"]);
        assert_eq!(s.route_id("v0").unwrap(), "!v0!var#1");
        assert_eq!(s.route_index("v0").unwrap(), Some(0));
        assert_eq!(s.driving_distance("v0", "E3", 30.0).unwrap(), Some(110.0));
    }

    #[test]
    fn rejects_bad_routes() {
        let mut s = inserted();
        let is_replacement = |r: Result<(), SimError>| matches!(r, Err(SimError::RouteReplacement { .. }));
        assert!(is_replacement(s.set_route("v0", &[])));
        assert!(is_replacement(s.set_route("v0", &["E1", "E3"])));
        assert!(is_replacement(s.set_route("v0", &["E2", "E3"])));
        assert!(matches!(s.set_route("v0", &["X"]), Err(SimError::EdgeNotFound(_))));
        assert_eq!(s.route_edges("v0").unwrap(), vec!["E1", "E2", "E3"]);
    }

    #[test]
    fn pending_vehicle_may_start_anywhere() {
        let mut s = sim(corridor());
        s.add_vehicle("v0", "r0", &["E1", "E2"], 0.0).unwrap();
        s.set_route("v0", &["E2", "E3"]).unwrap();
        s.insert_vehicle("v0").unwrap();
        assert_eq!(s.road_id("v0").unwrap().as_deref(), Some("E2"));
    }

    #[test]
    fn stops_off_the_new_route_dropped() {
        let mut s = inserted();
        s.move_to("v0", "E2_0", 40.0).unwrap();
        s.set_stop("v0", StopRequest::new("E3", 50.0)).unwrap();
        s.set_stop("v0", StopRequest::new("E2", 90.0)).unwrap();
        s.set_route("v0", &["E2"]).unwrap();
        assert_eq!(s.stops("v0").unwrap(), vec![("E2_0".to_string(), 90.0)]);
    }
}
