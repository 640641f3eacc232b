use core::fmt;

use crate::{collection::RequestId, types::KinematicState};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Altitude,
    Attitude,
    Position,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Altitude => "ALT",
            Self::Attitude => "ATT",
            Self::Position => "POS",
        };
        f.write_str(name)
    }
}

/// Client events understood by the host
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Suspend (true) or resume (false) native physics of one axis
    Freeze(Axis, bool),
    ParkingBrakeToggle,
}

/// Host refused an outbound call synchronously
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rejected(pub i32);

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "host status {:#010x}", self.0)
    }
}

/// Outbound side of the host connection.
///
/// Both calls are fire-and-forget: `Ok` only means the request was queued, failures
/// may still arrive later as an exception naming the returned id.
pub trait Host {
    fn transmit(&mut self, event: Event) -> Result<RequestId, Rejected>;
    fn set_kinematic_state(&mut self, state: &KinematicState) -> Result<RequestId, Rejected>;
}
