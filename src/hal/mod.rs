pub mod host;
#[cfg(test)]
pub mod mock;

pub use host::{Axis, Event, Host, Rejected};
