//! Unit tests for lt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, LaneId, LinkId, VehicleId};

    #[test]
    fn index_is_arena_slot() {
        assert_eq!(LaneId(42).index(), 42);
        assert!(EdgeId(0) < EdgeId(1));
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(LaneId::default(), LaneId::INVALID);
        assert_eq!(LinkId::INVALID.0, u32::MAX);
        assert!(!EdgeId::INVALID.is_valid());
        assert!(EdgeId(3).is_valid());
    }

    #[test]
    fn display_names_the_arena() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId#7");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;
    use crate::geo::{polyline_length, polyline_point};

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn projection_inside_segment() {
        let p = Position::new(40.0, 3.0);
        let (along, d2) = p.project_onto_segment(Position::new(0.0, 0.0), Position::new(100.0, 0.0));
        assert!((along - 40.0).abs() < 1e-9);
        assert!((d2 - 9.0).abs() < 1e-9);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, 0.0);
        let (before, _) = Position::new(-5.0, 0.0).project_onto_segment(a, b);
        let (after, d2) = Position::new(15.0, 0.0).project_onto_segment(a, b);
        assert_eq!(before, 0.0);
        assert!((after - 10.0).abs() < 1e-9);
        assert!((d2 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segment() {
        let a = Position::new(1.0, 1.0);
        let (along, d2) = Position::new(4.0, 5.0).project_onto_segment(a, a);
        assert_eq!(along, 0.0);
        assert!((d2 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn point_along_polyline() {
        let shape = [Position::new(0.0, 0.0), Position::new(3.0, 4.0), Position::new(3.0, 14.0)];
        assert_eq!(polyline_point(&shape, 0.0), Some(Position::new(0.0, 0.0)));
        assert_eq!(polyline_point(&shape, 10.0), Some(Position::new(3.0, 9.0)));
        assert_eq!(polyline_point(&shape, 99.0), Some(Position::new(3.0, 14.0)));
        assert_eq!(polyline_point(&shape, -5.0), Some(Position::new(0.0, 0.0)));
        assert_eq!(polyline_point(&[], 1.0), None);
    }

    #[test]
    fn polyline() {
        let shape = [Position::new(0.0, 0.0), Position::new(3.0, 4.0), Position::new(3.0, 14.0)];
        assert!((polyline_length(&shape) - 15.0).abs() < 1e-12);
        assert_eq!(polyline_length(&shape[..1]), 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn clock_advances_one_tick_per_step() {
        let mut c = SimClock::new(500, Tick(2));
        assert_eq!(c.now_ms(), 1_000);
        c.advance();
        assert_eq!(c.current_tick, Tick(3));
        assert_eq!(c.now_ms(), 1_500);
        assert_eq!(c.to_string(), "T3 at 1500 ms");
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.relocation_slack, 2);
        assert_eq!(cfg.make_clock().current_tick, Tick(0));
    }

    #[test]
    fn begin_tick_sets_clock() {
        let cfg = SimConfig { begin_tick: 10, ..SimConfig::default() };
        assert_eq!(cfg.make_clock().current_tick, Tick(10));
    }

    #[test]
    fn zero_step_length_rejected() {
        let cfg = SimConfig { step_length_ms: 0, ..SimConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("step_length_ms"));
    }
}
