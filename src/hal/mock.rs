use std::vec::Vec;

use super::host::{Axis, Event, Host, Rejected};
use crate::{
    collection::RequestId,
    types::{FreezeFlags, KinematicState},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Transmit(Event),
    SetKinematicState(KinematicState),
}

/// Records outbound calls and mirrors freeze events into its reported flags.
#[derive(Default)]
pub struct MockHost {
    pub calls: Vec<Call>,
    pub freeze: FreezeFlags,
    pub next_id: RequestId,
    /// Reject the n-th call, counted from zero
    pub reject_at: Option<usize>,
}

impl MockHost {
    fn accept(&mut self, call: Call) -> Result<RequestId, Rejected> {
        if self.reject_at == Some(self.calls.len()) {
            return Err(Rejected(-1));
        }
        self.calls.push(call);
        self.next_id += 1;
        Ok(self.next_id)
    }

    pub fn written(&self) -> Vec<KinematicState> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetKinematicState(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<Event> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Transmit(event) => Some(*event),
                _ => None,
            })
            .collect()
    }
}

impl Host for MockHost {
    fn transmit(&mut self, event: Event) -> Result<RequestId, Rejected> {
        let id = self.accept(Call::Transmit(event))?;
        if let Event::Freeze(axis, on) = event {
            match axis {
                Axis::Altitude => self.freeze.altitude = on,
                Axis::Attitude => self.freeze.attitude = on,
                Axis::Position => self.freeze.position = on,
            }
        }
        Ok(id)
    }

    fn set_kinematic_state(&mut self, state: &KinematicState) -> Result<RequestId, Rejected> {
        self.accept(Call::SetKinematicState(*state))
    }
}
