//! Arena indices.
//!
//! Edges, lanes, links and traffic lights live in the `RoadNetwork` arenas,
//! vehicles in the `VehicleStore`.  Cross references between them (lane →
//! edge, link → via lane, vehicle → lane) are these `u32` newtypes.  String
//! ids exist only at the facade boundary.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for a slot that was never assigned.
            pub const INVALID: $name = $name(u32::MAX);

            /// Position in the owning arena.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

typed_id!(
    /// A normal road edge or a junction-internal edge.
    EdgeId
);
typed_id!(LaneId);
typed_id!(
    /// A lane-to-lane connection, possibly crossing a junction on a via lane.
    LinkId
);
typed_id!(TlsId);
typed_id!(
    /// A slot in the vehicle store.  Slots are never reused.
    VehicleId
);
