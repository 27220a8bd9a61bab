use lt_core::VehicleId;
use lt_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("vehicle {0} is not in the store")]
    UnknownVehicle(VehicleId),

    #[error("vehicle '{vehicle}' may be set onto an edge to pass only (lane '{lane}')")]
    InvalidTarget { vehicle: String, lane: String },

    #[error("position {pos} for vehicle '{vehicle}' lies outside lane '{lane}' of length {length}")]
    PositionOutOfLane { vehicle: String, lane: String, pos: f64, length: f64 },

    #[error("vehicle '{vehicle}' cannot reach edge '{edge}' along its route")]
    RelocationUnreachable { vehicle: String, edge: String },

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
