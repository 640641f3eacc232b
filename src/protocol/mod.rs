use crate::{collection::RequestId, types::Sample};

/// Inbound notifications the controller reacts to.
///
/// Anything else the host sends is dropped by the transport before it gets here.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Message {
    /// Host simulation paused or resumed
    Pause(bool),
    /// Periodic per-frame delivery
    Telemetry(Sample),
    /// Asynchronous failure of an earlier call identified by `send_id`
    Exception { code: u32, send_id: RequestId, index: u32 },
}
