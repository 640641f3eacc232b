use crate::types::Readonly;

/// Margin above static CG height that counts as airborne while we hold the vehicle
pub const CONTROLLED_MARGIN: f64 = 1.0;
/// Margin required to consider a released vehicle airborne again
pub const RELEASED_MARGIN: f64 = 2.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    None,
    TakingOff,
    Landing,
}

impl Default for Transition {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Disengaged,
    EngagedAirborne,
    EngagedGrounded,
}

/// Who moves the vehicle, and whether it is flying.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ownership {
    /// Ignition was on last time we looked
    pub armed: bool,
    /// Host physics suspended on our request
    pub frozen: bool,
    /// A motionless snapshot was taken in the air and is being integrated
    pub got_first_state: bool,
    pub transition: Transition,
    static_cg_height: f64,
}

impl Ownership {
    pub fn new(static_cg_height: f64) -> Self {
        Self { static_cg_height, ..Default::default() }
    }

    pub fn phase(&self) -> Phase {
        match (self.armed, self.got_first_state) {
            (false, _) => Phase::Disengaged,
            (true, true) => Phase::EngagedAirborne,
            (true, false) => Phase::EngagedGrounded,
        }
    }

    pub fn is_taking_off(&self) -> bool {
        self.transition == Transition::TakingOff
    }

    pub fn is_landing(&self) -> bool {
        self.transition == Transition::Landing
    }

    /// Airborne classification with hysteresis.
    ///
    /// While holding the vehicle we keep flying down to `static_cg_height + 1`; once
    /// released or landing, it takes `static_cg_height + 2` and no ground contact.
    /// A takeoff in progress is always airborne.
    pub fn above_ground(&self, readonly: &Readonly) -> bool {
        match self.transition {
            Transition::None if self.frozen => {
                readonly.agl > self.static_cg_height + CONTROLLED_MARGIN
            }
            Transition::TakingOff => true,
            _ => !readonly.inputs.on_ground && readonly.agl > self.static_cg_height + RELEASED_MARGIN,
        }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.got_first_state = false;
        self.transition = Transition::None;
    }

    pub fn begin_takeoff(&mut self) {
        self.transition = Transition::TakingOff;
    }

    /// Takeoff is over once clear of the released margin
    pub fn update_takeoff(&mut self, agl: f64) {
        if self.is_taking_off() && agl > self.static_cg_height + RELEASED_MARGIN {
            self.transition = Transition::None;
        }
    }

    pub fn acquire(&mut self) {
        self.got_first_state = true;
        if self.is_landing() {
            self.transition = Transition::None;
        }
    }

    pub fn begin_landing(&mut self) {
        self.transition = Transition::Landing;
        self.got_first_state = false;
    }

    /// Forces a fresh motionless snapshot on the next airborne tick
    pub fn reacquire(&mut self) {
        self.got_first_state = false;
        self.transition = Transition::None;
    }
}

mod test {
    #[cfg(test)]
    fn readonly(agl: f64, on_ground: bool) -> crate::types::Readonly {
        let mut readonly = crate::types::Readonly::default();
        readonly.agl = agl;
        readonly.inputs.on_ground = on_ground;
        readonly
    }

    #[test]
    fn test_hysteresis() {
        use super::Ownership;

        let mut ownership = Ownership::new(3.0);
        // Released: needs more than 5ft and no ground contact
        assert!(!ownership.above_ground(&readonly(4.5, false)));
        assert!(!ownership.above_ground(&readonly(6.0, true)));
        assert!(ownership.above_ground(&readonly(5.5, false)));

        // Held: anything above 4ft is flying
        ownership.frozen = true;
        assert!(ownership.above_ground(&readonly(4.5, true)));
        assert!(!ownership.above_ground(&readonly(4.0, false)));
    }

    #[test]
    fn test_takeoff() {
        use super::{Ownership, Transition};

        let mut ownership = Ownership::new(3.0);
        ownership.frozen = true;
        ownership.begin_takeoff();
        assert!(ownership.above_ground(&readonly(0.0, true)));
        ownership.update_takeoff(4.9);
        assert!(ownership.is_taking_off());
        ownership.update_takeoff(5.1);
        assert_eq!(ownership.transition, Transition::None);
    }

    #[test]
    fn test_transitions_exclusive() {
        use super::{Ownership, Phase, Transition};

        let mut ownership = Ownership::new(0.0);
        assert_eq!(ownership.phase(), Phase::Disengaged);
        ownership.arm();
        assert_eq!(ownership.phase(), Phase::EngagedGrounded);
        ownership.acquire();
        assert_eq!(ownership.phase(), Phase::EngagedAirborne);
        ownership.begin_landing();
        assert!(ownership.is_landing() && !ownership.is_taking_off());
        assert_eq!(ownership.phase(), Phase::EngagedGrounded);
        ownership.begin_takeoff();
        assert!(ownership.is_taking_off() && !ownership.is_landing());
        ownership.disarm();
        assert_eq!(ownership.transition, Transition::None);
        assert_eq!(ownership.phase(), Phase::Disengaged);
    }
}
