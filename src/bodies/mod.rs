mod body;
mod shape;

pub use self::body::Body;
pub use self::shape::Shape;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Host-assigned meaning of a body.
///
/// The physics core never inspects this; it exists so the host can tell its
/// entities apart in collision listeners without side tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyRole {
    #[default]
    None,
    Projectile,
    Block,
    Target,
    Ground,
}

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct BodyFlags: u32 {
            /// Body can go to sleep when inactive
            const CAN_SLEEP = 0x01;

            /// Body is currently sleeping
            const SLEEPING = 0x02;
        }
    }
}
