pub mod error;
pub mod ownership;

use log::Level;

pub use error::Error;
pub use ownership::{Ownership, Phase, Transition};

use crate::{
    collection::{CallTable, RequestId},
    config::Config,
    datastructures::History,
    hal::{Axis, Event, Host},
    ins::INS,
    protocol::Message,
    types::{FreezeFlags, KinematicState, Sample},
};

/// The first deliveries after (re)opening are dropped while the host settles
pub const WARMUP_CALLBACKS: usize = 5;

const NULL_ISLAND: f64 = 0.0001;
const MIN_ALTITUDE: f64 = -100.0;
const MAX_ALTITUDE: f64 = 100_000.0;

const DUMP_BELOW_AGL: f64 = 10.0;
const DUMP_PERIOD: usize = 500;
const DUMP_ROUNDS: usize = 5;

const AXES: [Axis; 3] = [Axis::Altitude, Axis::Attitude, Axis::Position];

/// Issues a host call and remembers which source line it came from.
macro_rules! record {
    ($calls:expr, $call:expr) => {
        match $call {
            Ok(id) => {
                $calls.insert(id, stringify!($call));
                Ok(id)
            }
            Err(rejected) => {
                Err(Error::Rejected { line: line!(), call: stringify!($call), status: rejected })
            }
        }
    };
}

/// Host in the main menu parks the vehicle at 0N 0E or far out of any sensible altitude
fn is_zombie(sample: &Sample) -> bool {
    let state = &sample.state;
    if libm::fabs(state.latitude) < NULL_ISLAND && libm::fabs(state.longitude) < NULL_ISLAND {
        return true;
    }
    let plausible = MIN_ALTITUDE..=MAX_ALTITUDE;
    !plausible.contains(&sample.readonly.agl) || !plausible.contains(&state.msl)
}

fn flag(freeze: &mut FreezeFlags, axis: Axis) -> &mut bool {
    match axis {
        Axis::Altitude => &mut freeze.altitude,
        Axis::Attitude => &mut freeze.attitude,
        Axis::Position => &mut freeze.position,
    }
}

/// One connection to the host, from open to close.
///
/// While ignition is on and the vehicle is airborne, the host's own physics is frozen
/// and the vehicle state is written every tick from pilot inputs. On the ground or with
/// ignition off, the host is left in charge.
pub struct ControllerSession<H> {
    host: H,
    config: Config,
    ins: INS,
    history: History,
    ownership: Ownership,
    /// Host freeze flags as of the current tick, including our own requests
    freeze: FreezeFlags,
    calls: CallTable,
    callbacks: usize,
    paused: bool,
    /// Next engaged tick re-snapshots instead of integrating across the pause
    resumed: bool,
    failed: bool,
}

impl<H: Host> ControllerSession<H> {
    pub fn new(host: H, config: Config) -> Self {
        info!("Static CG height {}ft, release position {}", config.static_cg_height, config.release_position);
        Self {
            host,
            config,
            ins: INS::new(&config.limits),
            history: History::new(),
            ownership: Ownership::new(config.static_cg_height),
            freeze: FreezeFlags::default(),
            calls: CallTable::new(),
            callbacks: 0,
            paused: false,
            resumed: false,
            failed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    pub fn phase(&self) -> Phase {
        self.ownership.phase()
    }

    /// Sticky until `reopen`
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Source call that produced request `id`, if still remembered
    pub fn call(&self, id: RequestId) -> Option<&'static str> {
        self.calls.get(id)
    }

    /// Starts over as if freshly connected
    pub fn reopen(&mut self) {
        info!("Session reopened");
        self.history = History::new();
        self.ownership = Ownership::new(self.config.static_cg_height);
        self.freeze = FreezeFlags::default();
        self.calls.clear();
        self.callbacks = 0;
        self.paused = false;
        self.resumed = false;
        self.failed = false;
    }

    pub fn dispatch(&mut self, message: Message) {
        if self.failed {
            return;
        }
        match message {
            Message::Pause(paused) => self.on_pause_changed(paused),
            Message::Telemetry(sample) => self.on_telemetry(sample),
            Message::Exception { code, send_id, index } => self.on_exception(code, send_id, index),
        }
    }

    pub fn on_pause_changed(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        info!("Simulation {}", if paused { "paused" } else { "resumed" });
        self.paused = paused;
        match paused {
            true => self.ownership.reacquire(),
            false => self.resumed = true,
        }
    }

    pub fn on_exception(&mut self, code: u32, send_id: RequestId, index: u32) {
        let error = Error::Exception { code, call: self.calls.get(send_id), index };
        error!("{}", error);
        self.failed = true;
    }

    pub fn on_telemetry(&mut self, sample: Sample) {
        if self.failed || self.paused {
            return;
        }
        if let Err(error) = self.tick(sample) {
            error!("{}", error);
            self.failed = true;
        }
    }

    fn verbose(&self) -> bool {
        let agl = self.history.readonly().map(|readonly| readonly.agl).unwrap_or_default();
        agl < DUMP_BELOW_AGL || self.history.rounds() % DUMP_PERIOD < DUMP_ROUNDS
    }

    fn dump(&self, what: &str, state: &KinematicState) {
        let level = if self.verbose() { Level::Debug } else { Level::Trace };
        log!(level, "{:5} {}: {}", self.callbacks, what, state);
    }

    fn set_freeze(&mut self, axis: Axis, on: bool) -> Result<(), Error> {
        if *flag(&mut self.freeze, axis) == on {
            return Ok(());
        }
        info!("{} {}", if on { "Freezing" } else { "Unfreezing" }, axis);
        record!(self.calls, self.host.transmit(Event::Freeze(axis, on)))?;
        *flag(&mut self.freeze, axis) = on;
        Ok(())
    }

    fn freeze(&mut self) -> Result<(), Error> {
        for axis in AXES {
            self.set_freeze(axis, true)?;
        }
        self.ownership.frozen = true;
        Ok(())
    }

    fn unfreeze(&mut self) -> Result<(), Error> {
        for axis in AXES {
            if axis == Axis::Position && !self.config.release_position {
                continue;
            }
            self.set_freeze(axis, false)?;
        }
        self.ownership.frozen = false;
        Ok(())
    }

    fn set_motionless(&mut self, state: &KinematicState) {
        *self.history.output_mut() = state.motionless();
        self.dump("Set motionless state", self.history.output());
    }

    fn apply(&mut self) -> Result<(), Error> {
        let output = *self.history.output();
        self.dump("Set state", &output);
        record!(self.calls, self.host.set_kinematic_state(&output))?;
        Ok(())
    }

    fn tick(&mut self, sample: Sample) -> Result<(), Error> {
        if is_zombie(&sample) {
            trace!("Implausible state {}", sample.state);
            return Ok(());
        }

        let readonly = sample.readonly;
        let inputs = readonly.inputs;
        self.freeze = readonly.freeze;

        if self.ownership.armed && !inputs.ignition {
            info!("Ignition off, handing vehicle back");
            self.unfreeze()?;
            self.ownership.disarm();
            return Ok(());
        }

        self.callbacks += 1;
        if self.callbacks < WARMUP_CALLBACKS {
            return Ok(());
        }

        self.history.record(sample);

        if !self.ownership.armed && inputs.ignition {
            info!("Ignition on, taking control");
            self.ownership.arm();
            self.freeze()?;
            self.set_motionless(&sample.state);
        } else if !inputs.ignition {
            return Ok(());
        }

        let level = if self.verbose() { Level::Debug } else { Level::Trace };
        log!(level, "{:5} Got readonly: {}", self.callbacks, readonly);
        log!(level, "{:5} Got state: {}", self.callbacks, sample.state);

        if inputs.on_ground && readonly.parking_brake < 0.5 {
            info!("Setting parking brake");
            record!(self.calls, self.host.transmit(Event::ParkingBrakeToggle))?;
        }

        let mut elapsed = self.history.elapsed_millis();
        if self.resumed {
            self.resumed = false;
            self.set_motionless(&sample.state);
            elapsed = 0;
        }

        if self.ownership.above_ground(&readonly) {
            self.ownership.update_takeoff(readonly.agl);
            self.freeze()?;
            if !self.ownership.got_first_state {
                self.set_motionless(&sample.state);
                self.ownership.acquire();
                info!("Airborne, holding vehicle");
            } else {
                self.ins.update(&inputs, elapsed, self.history.output_mut());
            }
            return self.apply();
        }

        if self.ins.variometer().vertical_speed(inputs.climb) > 0.0 {
            if !self.ownership.is_taking_off() {
                info!("Taking off");
            }
            self.ownership.begin_takeoff();
            self.ins.climb(&inputs, elapsed, self.history.output_mut());
            self.freeze()?;
            self.apply()
        } else if self.ownership.got_first_state {
            info!("Landed, handing vehicle back");
            self.ownership.begin_landing();
            self.set_motionless(&sample.state);
            self.apply()?;
            self.unfreeze()
        } else {
            Ok(())
        }
    }
}

mod test {
    #[cfg(test)]
    use crate::{
        hal::mock::MockHost,
        types::{KinematicState, Readonly},
    };

    #[cfg(test)]
    type Session = super::ControllerSession<MockHost>;

    #[cfg(test)]
    const CG_HEIGHT: f64 = 2.0;

    #[cfg(test)]
    fn airborne() -> Readonly {
        let mut readonly = Readonly::default();
        readonly.agl = 100.0;
        readonly.parking_brake = 1.0;
        readonly.inputs.ignition = true;
        readonly
    }

    #[cfg(test)]
    fn grounded() -> Readonly {
        let mut readonly = airborne();
        readonly.agl = CG_HEIGHT;
        readonly.inputs.on_ground = true;
        readonly
    }

    #[cfg(test)]
    fn position() -> KinematicState {
        KinematicState {
            heading: 0.3,
            latitude: 0.6,
            longitude: -2.1,
            msl: 1000.0,
            ..Default::default()
        }
    }

    #[cfg(test)]
    fn session(release_position: bool) -> Session {
        let config = crate::config::Config {
            static_cg_height: CG_HEIGHT,
            release_position,
            ..Default::default()
        };
        super::ControllerSession::new(MockHost::default(), config)
    }

    /// Delivers one sample, reporting the freeze flags the host currently has
    #[cfg(test)]
    fn tick(session: &mut Session, millis: u64, mut readonly: Readonly, state: KinematicState) {
        use crate::types::{Sample, Timestamp};

        readonly.freeze = session.host().freeze;
        session.on_telemetry(Sample::new(Timestamp::millis(millis), readonly, state));
    }

    #[cfg(test)]
    fn warm_up(session: &mut Session, readonly: Readonly) {
        for i in 0..super::WARMUP_CALLBACKS - 1 {
            tick(session, i as u64 * 10, readonly, position());
        }
    }

    /// Armed and holding the vehicle in the air as of t = 1s
    #[cfg(test)]
    fn engaged() -> Session {
        let mut session = session(false);
        warm_up(&mut session, airborne());
        tick(&mut session, 1000, airborne(), position());
        session
    }

    #[cfg(test)]
    fn last_written(session: &Session) -> KinematicState {
        *session.host().written().last().unwrap()
    }

    #[test]
    fn test_warm_up() {
        let mut session = session(false);
        warm_up(&mut session, airborne());
        assert!(session.host().calls.is_empty());
        assert_eq!(session.history().rounds(), 0);
        tick(&mut session, 1000, airborne(), position());
        assert_eq!(session.history().rounds(), 1);
        assert_eq!(session.host().written().len(), 1);
    }

    #[test]
    fn test_freeze_before_write() {
        use crate::hal::{mock::Call, Axis, Event};

        use super::Phase;

        let session = engaged();
        assert_eq!(session.phase(), Phase::EngagedAirborne);
        let calls = &session.host().calls;
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], Call::Transmit(Event::Freeze(Axis::Altitude, true)));
        assert_eq!(calls[1], Call::Transmit(Event::Freeze(Axis::Attitude, true)));
        assert_eq!(calls[2], Call::Transmit(Event::Freeze(Axis::Position, true)));
        assert_eq!(calls[3], Call::SetKinematicState(position().motionless()));
    }

    #[test]
    fn test_freeze_idempotent() {
        let mut session = engaged();
        for i in 2..10 {
            tick(&mut session, i * 1000, airborne(), position());
        }
        assert_eq!(session.host().events().len(), 3);
        assert_eq!(session.host().written().len(), 9);
    }

    #[test]
    fn test_full_rudder_turns_45_degrees_per_second() {
        use core::f64::consts::FRAC_PI_4;

        let mut session = engaged();
        let mut readonly = airborne();
        readonly.inputs.rudder = 1.0;
        tick(&mut session, 2000, readonly, position());
        let heading = last_written(&session).heading;
        assert!((heading - (0.3 + FRAC_PI_4)).abs() < 1e-9);
    }

    #[test]
    fn test_full_forward_stick() {
        use crate::types::measurement::kn2fps;

        let mut session = engaged();
        let mut readonly = airborne();
        readonly.inputs.elevator = -1.0;
        tick(&mut session, 1500, readonly, position());
        let state = last_written(&session);
        assert!((state.vel_body_z - kn2fps(100.0)).abs() < 1e-9);
        assert!((state.kias - 100.0).abs() < 1e-3);
        // Heading 0.3 rad is north-east
        assert!(state.latitude > position().latitude);
        assert!(state.longitude > position().longitude);
        assert_eq!(state.msl, position().msl);
    }

    #[test]
    fn test_heading_stays_wrapped() {
        use core::f64::consts::TAU;

        let mut session = engaged();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut millis = 1000;
        for _ in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let mut readonly = airborne();
            readonly.inputs.rudder = ((seed >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0;
            millis += (seed >> 54) + 1;
            tick(&mut session, millis, readonly, position());
            let heading = last_written(&session).heading;
            assert!(heading >= 0.0 && heading < TAU);
        }
    }

    #[test]
    fn test_takeoff_from_ground() {
        use crate::hal::Event;

        use super::Phase;

        let mut session = session(false);
        warm_up(&mut session, grounded());
        tick(&mut session, 1000, grounded(), position());
        assert_eq!(session.phase(), Phase::EngagedGrounded);
        assert!(session.host().written().is_empty());
        assert_eq!(session.host().events().len(), 3);

        let mut readonly = grounded();
        readonly.inputs.climb = crate::types::ClimbCommand::Throttle { position: 1.0 };
        tick(&mut session, 2000, readonly, position());
        let state = last_written(&session);
        assert!((state.vs - 1000.0).abs() < 1e-6);
        assert!((state.msl - (position().msl + 1000.0 / 60.0)).abs() < 1e-6);
        assert!(session.ownership().is_taking_off());
        assert!(!session.host().events().contains(&Event::ParkingBrakeToggle));

        // Still at ground level, but a takeoff in progress counts as airborne
        tick(&mut session, 3000, readonly, state);
        assert_eq!(session.phase(), Phase::EngagedAirborne);
        assert!(session.ownership().is_taking_off());

        readonly.agl = CG_HEIGHT + 2.5;
        readonly.inputs.on_ground = false;
        tick(&mut session, 4000, readonly, state);
        assert!(!session.ownership().is_taking_off());
    }

    #[test]
    fn test_zombie_state_ignored() {
        let mut session = engaged();
        let mut readonly = airborne();
        readonly.inputs.elevator = -1.0;
        tick(&mut session, 2000, readonly, position());
        let calls = session.host().calls.len();
        let output = *session.history().output();

        let null_island = KinematicState { latitude: 0.00005, longitude: -0.00005, ..position() };
        tick(&mut session, 3000, readonly, null_island);
        let stratosphere = KinematicState { msl: 150_000.0, ..position() };
        tick(&mut session, 4000, readonly, stratosphere);
        let mut underground = readonly;
        underground.agl = -200.0;
        tick(&mut session, 5000, underground, position());

        assert_eq!(session.host().calls.len(), calls);
        assert_eq!(*session.history().output(), output);
        assert_eq!(session.history().rounds(), 2);
        assert!(!session.is_failed());
    }

    #[test]
    fn test_hysteresis_does_not_chatter() {
        use crate::hal::{Axis, Event};

        use super::{Phase, Transition};

        let mut session = engaged();
        let events = session.host().events().len();
        let mut phase = session.phase();
        let mut changes = 0;
        for i in 0..20u64 {
            let mut readonly = airborne();
            readonly.agl = if i % 2 == 0 { CG_HEIGHT + 0.5 } else { CG_HEIGHT - 0.5 };
            readonly.inputs.on_ground = i % 2 == 1;
            tick(&mut session, 2000 + i * 100, readonly, position());
            if session.phase() != phase {
                changes += 1;
                phase = session.phase();
            }
        }
        assert_eq!(changes, 1);
        assert_eq!(session.phase(), Phase::EngagedGrounded);
        assert_eq!(session.ownership().transition, Transition::Landing);
        let released = session.host().events();
        let expected =
            [Event::Freeze(Axis::Altitude, false), Event::Freeze(Axis::Attitude, false)];
        assert_eq!(&released[events..], &expected[..]);
    }

    #[test]
    fn test_landing_releases_position_when_configured() {
        use crate::hal::{mock::Call, Axis, Event};

        let mut session = session(true);
        warm_up(&mut session, airborne());
        tick(&mut session, 1000, airborne(), position());
        let moving = KinematicState { vel_body_z: 20.0, vs: -300.0, ..position() };
        tick(&mut session, 2000, grounded(), moving);

        let calls = &session.host().calls;
        let tail = &calls[calls.len() - 4..];
        assert_eq!(tail[0], Call::SetKinematicState(position().motionless()));
        assert_eq!(tail[1], Call::Transmit(Event::Freeze(Axis::Altitude, false)));
        assert_eq!(tail[2], Call::Transmit(Event::Freeze(Axis::Attitude, false)));
        assert_eq!(tail[3], Call::Transmit(Event::Freeze(Axis::Position, false)));
        assert!(!session.ownership().frozen);
    }

    #[test]
    fn test_reengagement_is_idempotent() {
        let mut session = engaged();
        let mut readonly = airborne();
        readonly.inputs.elevator = -1.0;
        readonly.inputs.rudder = 0.5;
        tick(&mut session, 2000, readonly, position());
        tick(&mut session, 3000, readonly, position());
        readonly.inputs.ignition = false;
        tick(&mut session, 4000, readonly, position());
        assert_eq!(session.phase(), super::Phase::Disengaged);

        let snapshot = KinematicState {
            heading: 1.2,
            bank: 0.1,
            latitude: 0.61,
            longitude: -2.09,
            msl: 1200.0,
            vel_body_z: 30.0,
            vs: -120.0,
            ..Default::default()
        };
        tick(&mut session, 5000, airborne(), snapshot);

        let mut fresh = self::session(false);
        warm_up(&mut fresh, airborne());
        tick(&mut fresh, 1000, airborne(), snapshot);

        assert_eq!(last_written(&session), snapshot.motionless());
        assert_eq!(last_written(&fresh), snapshot.motionless());
        assert_eq!(session.phase(), fresh.phase());
    }

    #[test]
    fn test_ignition_off_keeps_position_frozen() {
        use crate::hal::{Axis, Event};

        let mut session = engaged();
        let mut readonly = airborne();
        readonly.inputs.ignition = false;
        tick(&mut session, 2000, readonly, position());
        let events = session.host().events();
        let expected =
            [Event::Freeze(Axis::Altitude, false), Event::Freeze(Axis::Attitude, false)];
        assert_eq!(&events[3..], &expected[..]);
        assert!(session.host().freeze.position);

        // Nothing happens while disarmed
        let calls = session.host().calls.len();
        tick(&mut session, 3000, readonly, position());
        assert_eq!(session.host().calls.len(), calls);
    }

    #[test]
    fn test_parking_brake() {
        use crate::hal::Event;

        let mut readonly = grounded();
        readonly.parking_brake = 0.0;

        let mut session = session(false);
        warm_up(&mut session, readonly);
        tick(&mut session, 1000, readonly, position());
        assert_eq!(session.host().events().last(), Some(&Event::ParkingBrakeToggle));

        // Not ours to touch while disarmed
        let mut session = self::session(false);
        readonly.inputs.ignition = false;
        warm_up(&mut session, readonly);
        tick(&mut session, 1000, readonly, position());
        assert!(session.host().calls.is_empty());
    }

    #[test]
    fn test_pause_forces_reacquire() {
        use crate::protocol::Message;

        let mut session = engaged();
        let mut readonly = airborne();
        readonly.inputs.elevator = -1.0;
        tick(&mut session, 2000, readonly, position());
        assert!(last_written(&session).vel_body_z > 0.0);

        session.dispatch(Message::Pause(true));
        let calls = session.host().calls.len();
        tick(&mut session, 3000, readonly, position());
        assert_eq!(session.host().calls.len(), calls);

        session.dispatch(Message::Pause(false));
        tick(&mut session, 4000, readonly, position());
        assert_eq!(last_written(&session), position().motionless());
        tick(&mut session, 5000, readonly, position());
        assert!(last_written(&session).vel_body_z > 0.0);
    }

    #[test]
    fn test_resume_on_ground_does_not_integrate_pause() {
        use crate::{protocol::Message, types::ClimbCommand};

        let mut session = session(false);
        warm_up(&mut session, grounded());
        tick(&mut session, 1000, grounded(), position());

        let mut readonly = grounded();
        readonly.inputs.climb = ClimbCommand::Throttle { position: 1.0 };
        session.dispatch(Message::Pause(true));
        tick(&mut session, 2000, readonly, position());
        session.dispatch(Message::Pause(false));
        let writes = session.host().written().len();

        // A minute later, still on the ground at full throttle
        tick(&mut session, 61000, readonly, position());
        let written = session.host().written();
        assert_eq!(written.len(), writes + 1);
        let state = written[writes];
        assert_eq!(state.msl, position().msl);
        assert_eq!(state.vel_body_z, 0.0);
        assert!(session.ownership().is_taking_off());

        tick(&mut session, 62000, readonly, state);
        tick(&mut session, 63000, readonly, state);
        let climbed = last_written(&session).msl - position().msl;
        assert!((climbed - 1000.0 / 60.0).abs() < 1e-6);
    }

    #[cfg(test)]
    fn oscillate(session: &mut Session, center: f64, start: u64) -> usize {
        let mut phase = session.phase();
        let mut changes = 0;
        for i in 0..20u64 {
            let mut readonly = airborne();
            readonly.agl = if i % 2 == 0 { center - 0.5 } else { center + 0.5 };
            tick(session, start + i * 100, readonly, position());
            if session.phase() != phase {
                changes += 1;
                phase = session.phase();
            }
        }
        changes
    }

    #[test]
    fn test_hysteresis_band_edges() {
        use super::Phase;

        let mut session = engaged();
        // Held vehicle drops below cg + 1 once, then cannot climb back without clearing cg + 2
        assert_eq!(oscillate(&mut session, CG_HEIGHT + 1.0, 2000), 1);
        assert_eq!(session.phase(), Phase::EngagedGrounded);
        assert!(!session.ownership().frozen);

        // Clearing cg + 2 takes it back, and the held band keeps it there
        assert_eq!(oscillate(&mut session, CG_HEIGHT + 2.0, 4000), 1);
        assert_eq!(session.phase(), Phase::EngagedAirborne);
        assert!(session.ownership().frozen);
    }

    #[test]
    fn test_rejected_call_fails_session() {
        let mut session = session(false);
        session.host_mut().reject_at = Some(1);
        warm_up(&mut session, airborne());
        tick(&mut session, 1000, airborne(), position());
        assert!(session.is_failed());
        assert_eq!(session.host().calls.len(), 1);

        tick(&mut session, 2000, airborne(), position());
        assert_eq!(session.host().calls.len(), 1);

        session.host_mut().reject_at = None;
        session.reopen();
        assert!(!session.is_failed());
        warm_up(&mut session, airborne());
        assert_eq!(session.host().calls.len(), 1);
        tick(&mut session, 3000, airborne(), position());
        assert_eq!(session.host().written().len(), 1);
    }

    #[test]
    fn test_exception_names_call() {
        use crate::protocol::Message;

        let mut session = engaged();
        let id = session.host().next_id;
        let call = session.call(id).unwrap();
        assert!(call.contains("set_kinematic_state"));
        assert!(session.call(1).unwrap().contains("transmit"));

        session.dispatch(Message::Exception { code: 7, send_id: id, index: 1 });
        assert!(session.is_failed());
        let calls = session.host().calls.len();
        tick(&mut session, 2000, airborne(), position());
        assert_eq!(session.host().calls.len(), calls);
    }
}
