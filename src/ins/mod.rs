pub mod positioning;
pub mod speedometer;
pub mod variometer;

use core::f64::consts::TAU;

use speedometer::Speedometer;
use variometer::Variometer;

use crate::{
    config::Limits,
    types::{ControlInputs, KinematicState},
};

/// Wraps any finite angle into [0, 2π)
pub fn wrap_heading(heading: f64) -> f64 {
    if !heading.is_finite() {
        return 0.0;
    }
    let wrapped = heading - TAU * libm::floor(heading / TAU);
    match wrapped >= TAU || wrapped < 0.0 {
        true => 0.0,
        false => wrapped,
    }
}

/// Direct kinematic integrator: inputs set rates, rates integrate into the carried state.
pub struct INS {
    yaw_rate: f64, // rad/s
    deadband: f64,
    speedometer: Speedometer,
    variometer: Variometer,
}

impl INS {
    pub fn new(limits: &Limits) -> Self {
        Self {
            yaw_rate: limits.yaw_rate.to_radians(),
            deadband: limits.deadband,
            speedometer: Speedometer::new(limits),
            variometer: Variometer::new(limits),
        }
    }

    pub fn variometer(&self) -> &Variometer {
        &self.variometer
    }

    fn turn(&self, rudder: f64, elapsed_ms: u64, state: &mut KinematicState) {
        if libm::fabs(rudder) > self.deadband {
            state.heading += rudder * elapsed_ms as f64 / 1000.0 * self.yaw_rate;
        }
        state.heading = wrap_heading(state.heading);
    }

    /// Full update while flying
    pub fn update(&self, inputs: &ControlInputs, elapsed_ms: u64, state: &mut KinematicState) {
        self.turn(inputs.rudder, elapsed_ms, state);
        self.speedometer.update(inputs, state);
        positioning::update(elapsed_ms, state);
        self.variometer.update(inputs.climb, elapsed_ms, state);
    }

    /// Vertical channel only, used to lift off without steering on the ground
    pub fn climb(&self, inputs: &ControlInputs, elapsed_ms: u64, state: &mut KinematicState) {
        self.variometer.update(inputs.climb, elapsed_ms, state);
    }
}

mod test {
    #[test]
    fn test_wrap_heading() {
        use core::f64::consts::{PI, TAU};

        use super::wrap_heading;

        assert_eq!(wrap_heading(0.0), 0.0);
        assert_eq!(wrap_heading(TAU), 0.0);
        assert!((wrap_heading(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((wrap_heading(5.0 * PI) - PI).abs() < 1e-12);
        for heading in [-1e-17, -1e9, 1e9, TAU - 1e-16, f64::INFINITY, f64::NAN] {
            let wrapped = wrap_heading(heading);
            assert!(wrapped >= 0.0 && wrapped < TAU, "{} -> {}", heading, wrapped);
        }
    }

    #[test]
    fn test_full_yaw_rate() {
        use core::f64::consts::FRAC_PI_4;

        use crate::{
            config::Limits,
            types::{ControlInputs, KinematicState},
        };

        use super::INS;

        let ins = INS::new(&Limits::default());
        let mut inputs = ControlInputs::default();
        inputs.rudder = 1.0;
        let mut state = KinematicState { heading: 0.1, ..Default::default() };
        ins.update(&inputs, 1000, &mut state);
        assert!((state.heading - 0.1 - FRAC_PI_4).abs() < 1e-12);

        inputs.rudder = -1.0;
        ins.update(&inputs, 1000, &mut state);
        ins.update(&inputs, 1000, &mut state);
        assert!((state.heading - (0.1 - FRAC_PI_4 + core::f64::consts::TAU)).abs() < 1e-12);

        // Rudder inside the deadband leaves heading alone
        inputs.rudder = 0.01;
        let heading = state.heading;
        ins.update(&inputs, 1000, &mut state);
        assert_eq!(state.heading, heading);
    }

    #[test]
    fn test_climb_only() {
        use crate::{
            config::Limits,
            types::{ClimbCommand, ControlInputs, KinematicState},
        };

        use super::INS;

        let ins = INS::new(&Limits::default());
        let mut inputs = ControlInputs::default();
        inputs.rudder = 1.0;
        inputs.elevator = -1.0;
        inputs.climb = ClimbCommand::Throttle { position: 1.0 };
        let mut state = KinematicState { msl: 50.0, ..Default::default() };
        ins.climb(&inputs, 1000, &mut state);
        assert_eq!(state.heading, 0.0);
        assert_eq!(state.vel_body_z, 0.0);
        assert_eq!((state.latitude, state.longitude), (0.0, 0.0));
        assert!((state.vs - 1000.0).abs() < 1e-6);
        assert!(state.msl > 66.0 && state.msl < 67.0);
    }
}
