use crate::types::{ControlInputs, KinematicState, Readonly, Sample};

pub const HISTORY_LENGTH: usize = 10;

#[derive(Copy, Clone)]
struct Slot {
    sample: Option<Sample>,
    output: KinematicState,
}

impl Default for Slot {
    fn default() -> Self {
        Self { sample: None, output: KinematicState::default() }
    }
}

/// Last `N` samples received from the host together with the state commanded on each of them.
///
/// Slot `current` always holds the latest record. The output of a fresh slot starts as a
/// copy of the previous output, so whatever a tick leaves untouched carries over.
pub struct History<const N: usize = HISTORY_LENGTH> {
    slots: [Slot; N],
    length: usize,
    current: usize,
    previous: usize,
    rounds: usize,
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> History<N> {
    pub fn new() -> Self {
        assert!(N >= 2, "History needs at least two slots");
        Self { slots: [Slot::default(); N], length: 0, current: 0, previous: 0, rounds: 0 }
    }

    /// Appends `sample`, evicting the oldest record when full.
    ///
    /// Post-condition: `output()` equals the output of the previous record.
    pub fn record(&mut self, sample: Sample) {
        self.rounds += 1;
        if self.length < N {
            self.length += 1;
        }
        self.previous = self.current;
        self.current = (self.current + 1) % N;
        let output = self.slots[self.previous].output;
        self.slots[self.current] = Slot { sample: Some(sample), output };
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of records ever made
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Zero until two records exist, never negative.
    pub fn elapsed_millis(&self) -> u64 {
        if self.length < 2 {
            return 0;
        }
        let timestamps = (self.slots[self.current].sample, self.slots[self.previous].sample);
        match timestamps {
            (Some(current), Some(previous)) => current
                .timestamp
                .checked_sub(previous.timestamp)
                .map(|elapsed| elapsed.to_millis())
                .unwrap_or(0),
            _ => 0,
        }
    }

    pub fn sample(&self) -> Option<&Sample> {
        self.slots[self.current].sample.as_ref()
    }

    pub fn readonly(&self) -> Option<&Readonly> {
        self.sample().map(|sample| &sample.readonly)
    }

    pub fn inputs(&self) -> Option<&ControlInputs> {
        self.readonly().map(|readonly| &readonly.inputs)
    }

    /// State reported by the host on the latest record
    pub fn state(&self) -> Option<&KinematicState> {
        self.sample().map(|sample| &sample.state)
    }

    pub fn output(&self) -> &KinematicState {
        &self.slots[self.current].output
    }

    pub fn output_mut(&mut self) -> &mut KinematicState {
        &mut self.slots[self.current].output
    }

    /// Iterates records from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = (&Sample, &KinematicState)> + '_ {
        (0..self.length).filter_map(move |age| {
            let slot = &self.slots[(self.current + N - age) % N];
            slot.sample.as_ref().map(|sample| (sample, &slot.output))
        })
    }
}

mod test {
    #[cfg(test)]
    fn sample_at(millis: u64, msl: f64) -> crate::types::Sample {
        use crate::types::{KinematicState, Readonly, Sample, Timestamp};

        let state = KinematicState { msl, ..Default::default() };
        Sample::new(Timestamp::millis(millis), Readonly::default(), state)
    }

    #[test]
    fn test_elapsed_millis() {
        use super::History;

        let mut history: History<4> = History::new();
        assert_eq!(history.elapsed_millis(), 0);
        history.record(sample_at(1000, 0.0));
        assert_eq!(history.elapsed_millis(), 0);
        history.record(sample_at(1016, 0.0));
        assert_eq!(history.elapsed_millis(), 16);
        history.record(sample_at(1050, 0.0));
        assert_eq!(history.elapsed_millis(), 34);

        // Out of order timestamp clamps to zero
        history.record(sample_at(1040, 0.0));
        assert_eq!(history.elapsed_millis(), 0);
    }

    #[test]
    fn test_copy_forward_output() {
        use super::History;

        let mut history: History<3> = History::new();
        history.record(sample_at(0, 0.0));
        history.output_mut().heading = 1.5;
        history.output_mut().vel_body_z = 20.0;
        history.record(sample_at(10, 0.0));
        assert_eq!(history.output().heading, 1.5);
        assert_eq!(history.output().vel_body_z, 20.0);
        history.output_mut().heading = 2.0;
        for i in 0..5 {
            history.record(sample_at(20 + i * 10, 0.0));
        }
        assert_eq!(history.output().heading, 2.0);
    }

    #[test]
    fn test_eviction() {
        use super::History;

        let mut history: History<3> = History::new();
        for i in 0..5 {
            history.record(sample_at(i * 10, i as f64));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.rounds(), 5);
        assert_eq!(history.state().map(|s| s.msl), Some(4.0));
        assert_eq!(history.inputs().map(|inputs| inputs.ignition), Some(false));
        let altitudes: std::vec::Vec<f64> = history.iter().map(|(s, _)| s.state.msl).collect();
        assert_eq!(altitudes, std::vec![4.0, 3.0, 2.0]);
    }
}
