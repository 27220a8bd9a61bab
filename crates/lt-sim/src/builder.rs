//! Fluent builder for constructing a [`Simulation`].

use lt_core::SimConfig;
use lt_network::RoadNetwork;
use lt_vehicle::{LaneOccupancy, MoveReminder, VehicleStore};

use crate::insertion::InsertionControl;
use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation<M>`].
///
/// # Required inputs
///
/// - [`RoadNetwork`] — from [`lt_network::RoadNetworkBuilder`]
/// - `M: MoveReminder` — notified of every lane change the facade performs
///   (use [`lt_vehicle::NoopReminder`] if nothing listens)
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                 |
/// |-----------------|-------------------------|
/// | `.config(c)`    | `SimConfig::default()`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(network, NoopReminder)
///     .config(config)
///     .build()?;
/// sim.add_vehicle("v0", "r0", &["E1", "E2"], 0.0)?;
/// sim.insert_vehicle("v0")?;
/// ```
pub struct SimBuilder<M: MoveReminder> {
    config:   SimConfig,
    network:  RoadNetwork,
    reminder: M,
}

impl<M: MoveReminder> SimBuilder<M> {
    pub fn new(network: RoadNetwork, reminder: M) -> Self {
        Self { config: SimConfig::default(), network, reminder }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and return an empty [`Simulation`].
    pub fn build(self) -> SimResult<Simulation<M>> {
        self.config.validate()?;
        Ok(Simulation {
            clock:          self.config.make_clock(),
            config:         self.config,
            occupancy:      LaneOccupancy::new(self.network.lane_count()),
            network:        self.network,
            vehicles:       VehicleStore::new(),
            insertion:      InsertionControl::new(),
            reminder:       self.reminder,
            route_variants: 0,
        })
    }
}
