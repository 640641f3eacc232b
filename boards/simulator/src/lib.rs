#[macro_use]
extern crate log;
extern crate brick_control;

pub mod host;

use brick_control::config::Config;
use brick_control::fcs::{ControllerSession, Phase};
use brick_control::protocol::Message;
use brick_control::types::{ControlInputs, KinematicState, Readonly, Timestamp};
use serde::Serialize;

pub use host::HostModel;

#[derive(Copy, Clone, Debug, Serialize)]
pub struct Telemetry {
    pub millis: u64,
    pub phase: Phase,
    pub paused: bool,
    pub failed: bool,
    pub readonly: Readonly,
    pub state: KinematicState,
}

/// Drives a controller session against the host model on a virtual clock.
pub struct Simulator {
    session: ControllerSession<HostModel>,
    time: Timestamp,
}

impl Simulator {
    pub fn new(config: Config, host: HostModel) -> Self {
        Self { session: ControllerSession::new(host, config), time: Timestamp::millis(0) }
    }

    pub fn session(&self) -> &ControllerSession<HostModel> {
        &self.session
    }

    pub fn get_telemetry(&self) -> Telemetry {
        let host = self.session.host();
        Telemetry {
            millis: self.time.to_millis(),
            phase: self.session.phase(),
            paused: self.session.is_paused(),
            failed: self.session.is_failed(),
            readonly: host.readonly,
            state: host.state,
        }
    }

    /// Ground contact stays whatever the host model says
    pub fn update_input(&mut self, inputs: ControlInputs) {
        let readonly = &mut self.session.host_mut().readonly;
        let on_ground = readonly.inputs.on_ground;
        readonly.inputs = ControlInputs { on_ground, ..inputs };
    }

    pub fn pause(&mut self, paused: bool) {
        self.session.dispatch(Message::Pause(paused));
    }

    pub fn reopen(&mut self) {
        self.session.reopen();
    }

    pub fn step(&mut self, elapsed_ms: u64) {
        self.time = self.time + Timestamp::millis(elapsed_ms);
        if !self.session.is_paused() {
            self.session.host_mut().advance(elapsed_ms);
        }
        let sample = self.session.host().sample(self.time);
        trace!("Step to {}ms, agl {:.1}", self.time.to_millis(), sample.readonly.agl);
        self.session.dispatch(Message::Telemetry(sample));
    }
}

mod test {
    #[cfg(test)]
    const CG_HEIGHT: f64 = 2.0;

    #[cfg(test)]
    fn simulator() -> super::Simulator {
        let config =
            brick_control::config::Config { static_cg_height: CG_HEIGHT, ..Default::default() };
        let host = super::HostModel::new(0.6, -2.1, 500.0, CG_HEIGHT);
        super::Simulator::new(config, host)
    }

    #[cfg(test)]
    fn run(simulator: &mut super::Simulator, steps: usize) {
        for _ in 0..steps {
            simulator.step(100);
        }
    }

    #[test]
    fn test_takeoff_cruise_landing() {
        use brick_control::fcs::Phase;
        use brick_control::types::{ClimbCommand, ControlInputs};

        let mut simulator = simulator();
        let mut inputs = ControlInputs { ignition: true, ..Default::default() };
        simulator.update_input(inputs);
        run(&mut simulator, 5);
        let telemetry = simulator.get_telemetry();
        assert_eq!(telemetry.phase, Phase::EngagedGrounded);
        assert!(telemetry.readonly.freeze.altitude);
        assert_eq!(telemetry.readonly.parking_brake, 1.0);

        inputs.climb = ClimbCommand::Throttle { position: 1.0 };
        simulator.update_input(inputs);
        run(&mut simulator, 60);
        let telemetry = simulator.get_telemetry();
        assert_eq!(telemetry.phase, Phase::EngagedAirborne);
        assert!(telemetry.readonly.agl > 50.0);
        assert!(!telemetry.readonly.inputs.on_ground);
        assert!(!simulator.session().ownership().is_taking_off());

        let agl = telemetry.readonly.agl;
        inputs.climb = ClimbCommand::Throttle { position: 0.5 };
        inputs.elevator = -1.0;
        simulator.update_input(inputs);
        run(&mut simulator, 10);
        let telemetry = simulator.get_telemetry();
        assert!(telemetry.state.latitude > 0.6);
        assert!((telemetry.state.longitude + 2.1).abs() < 1e-12);
        assert!((telemetry.state.kias - 100.0).abs() < 1e-3);
        assert!((telemetry.readonly.agl - agl).abs() < 1e-9);

        inputs.climb = ClimbCommand::Throttle { position: 0.0 };
        inputs.elevator = 0.0;
        simulator.update_input(inputs);
        run(&mut simulator, 100);
        let telemetry = simulator.get_telemetry();
        assert_eq!(telemetry.phase, Phase::EngagedGrounded);
        assert!(telemetry.readonly.inputs.on_ground);
        assert!((telemetry.readonly.agl - CG_HEIGHT).abs() < 1e-9);
        assert!(!telemetry.readonly.freeze.altitude);
        assert!(!telemetry.readonly.freeze.attitude);
        assert!(telemetry.readonly.freeze.position);
        assert!(simulator.session().ownership().is_landing());
        assert!(!telemetry.failed);
    }

    #[test]
    fn test_ignition_off_in_flight() {
        use brick_control::fcs::Phase;
        use brick_control::types::{ClimbCommand, ControlInputs};

        let mut simulator = simulator();
        let climb = ClimbCommand::Throttle { position: 1.0 };
        let mut inputs = ControlInputs { ignition: true, climb, ..Default::default() };
        simulator.update_input(inputs);
        run(&mut simulator, 35);
        assert_eq!(simulator.get_telemetry().phase, Phase::EngagedAirborne);

        inputs.ignition = false;
        simulator.update_input(inputs);
        run(&mut simulator, 1);
        assert_eq!(simulator.get_telemetry().phase, Phase::Disengaged);

        run(&mut simulator, 40);
        let telemetry = simulator.get_telemetry();
        assert!(telemetry.readonly.inputs.on_ground);
        assert!((telemetry.readonly.agl - CG_HEIGHT).abs() < 1e-9);
        assert_eq!(telemetry.phase, Phase::Disengaged);
        assert!(telemetry.readonly.freeze.position);
    }

    #[test]
    fn test_pause_holds_vehicle() {
        use brick_control::types::{ClimbCommand, ControlInputs};

        let mut simulator = simulator();
        let climb = ClimbCommand::Throttle { position: 1.0 };
        simulator.update_input(ControlInputs { ignition: true, climb, ..Default::default() });
        run(&mut simulator, 20);
        let agl = simulator.get_telemetry().readonly.agl;

        simulator.pause(true);
        run(&mut simulator, 10);
        let telemetry = simulator.get_telemetry();
        assert!(telemetry.paused);
        assert_eq!(telemetry.readonly.agl, agl);

        simulator.pause(false);
        run(&mut simulator, 5);
        assert!(simulator.get_telemetry().readonly.agl > agl);
    }
}
