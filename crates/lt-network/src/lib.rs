//! `lt-network` — lane-level road network, signal state, and route distances.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork` (edge/lane/link arena + R-tree), builder        |
//! | [`link`]     | `Link`, `LinkControl`, `LinkState`, `TrafficLight`            |
//! | [`route`]    | `Route` and its forward distance primitive                    |
//! | [`stopping`] | `StoppingPlace`, `StoppingPlaceKind`                          |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on plain data types.       |

pub mod error;
pub mod link;
pub mod network;
pub mod route;
pub mod stopping;


pub use error::{NetworkError, NetworkResult};
pub use link::{Link, LinkControl, LinkState, TrafficLight};
pub use network::{Edge, EdgeKind, Lane, RoadNetwork, RoadNetworkBuilder};
pub use route::Route;
pub use stopping::{StoppingPlace, StoppingPlaceKind};
