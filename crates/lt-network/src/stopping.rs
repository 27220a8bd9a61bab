//! Stopping places: bus stops, container stops, charging stations and
//! parking areas, each a stretch of one lane.

use std::fmt;

use lt_core::LaneId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoppingPlaceKind {
    BusStop,
    ContainerStop,
    ChargingStation,
    ParkingArea,
}

impl fmt::Display for StoppingPlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoppingPlaceKind::BusStop         => "bus stop",
            StoppingPlaceKind::ContainerStop   => "container stop",
            StoppingPlaceKind::ChargingStation => "charging station",
            StoppingPlaceKind::ParkingArea     => "parking area",
        })
    }
}

/// The stretch `start_pos..=end_pos` of `lane`.
#[derive(Clone, Debug)]
pub struct StoppingPlace {
    pub id:        String,
    pub kind:      StoppingPlaceKind,
    pub lane:      LaneId,
    pub start_pos: f64,
    pub end_pos:   f64,
}
