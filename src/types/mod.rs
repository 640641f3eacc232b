pub mod control;
pub mod measurement;
pub mod state;

pub use control::{ClimbCommand, ControlInputs};
pub use state::{FreezeFlags, KinematicState, Readonly, Sample, Timestamp};
