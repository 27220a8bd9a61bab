use lt_core::LtError;
use lt_network::NetworkError;
use lt_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] LtError),

    #[error("vehicle '{0}' is not known")]
    VehicleNotFound(String),

    #[error("edge '{0}' is not known")]
    EdgeNotFound(String),

    #[error("lane '{0}' is not known")]
    LaneNotFound(String),

    #[error("the vehicle '{0}' to add already exists")]
    DuplicateVehicle(String),

    #[error("vehicle '{0}' has already departed")]
    AlreadyDeparted(String),

    #[error("invalid stop for vehicle '{vehicle}': {reason}")]
    InvalidStop { vehicle: String, reason: String },

    #[error("route replacement failed for vehicle '{vehicle}': {reason}")]
    RouteReplacement { vehicle: String, reason: String },

    #[error("vehicle error: {0}")]
    Vehicle(#[from] VehicleError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
