//! Network-layer error type.

use thiserror::Error;

use crate::StoppingPlaceKind;

/// Errors produced by `lt-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("edge '{0}' is not known")]
    EdgeNotFound(String),

    #[error("lane '{0}' is not known")]
    LaneNotFound(String),

    #[error("traffic light '{0}' is not known")]
    TlsNotFound(String),

    #[error("duplicate id '{0}' in network")]
    DuplicateId(String),

    #[error("{kind} '{id}' is not known")]
    StoppingPlaceNotFound { kind: StoppingPlaceKind, id: String },

    #[error("stopping place '{0}' does not fit on its lane")]
    InvalidStoppingPlace(String),

    #[error("edge '{0}' has no lanes")]
    EmptyEdge(String),

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("invalid signal state {state:?} for traffic light '{tls}'")]
    InvalidSignalState { tls: String, state: String },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
