use nalgebra::{Rotation2, Vector2};

use crate::{
    config::Limits,
    types::{
        measurement::{fps2kn, kn2fps},
        ControlInputs, KinematicState,
    },
};

/// Maps stick deflection straight to ground speed, no inertia.
pub struct Speedometer {
    forward: f64,
    backward: f64,
    lateral: f64,
    deadband: f64,
}

impl Speedometer {
    pub fn new(limits: &Limits) -> Self {
        Self {
            forward: kn2fps(limits.max_forward),
            backward: kn2fps(limits.max_backward),
            lateral: kn2fps(limits.max_lateral),
            deadband: limits.deadband,
        }
    }

    /// Body frame (lateral, longitudinal) velocity in ft/s.
    ///
    /// Stick forward is negative elevator and moves the vehicle forward.
    pub fn body_velocity(&self, inputs: &ControlInputs) -> Vector2<f64> {
        let elevator = inputs.elevator;
        let longitudinal = match () {
            _ if elevator < -self.deadband => -elevator * self.forward,
            _ if elevator > self.deadband => -elevator * self.backward,
            _ => 0.0,
        };
        let lateral = match libm::fabs(inputs.aileron) > self.deadband {
            true => inputs.aileron * self.lateral,
            false => 0.0,
        };
        Vector2::new(lateral, longitudinal)
    }

    pub fn update(&self, inputs: &ControlInputs, state: &mut KinematicState) {
        let body = self.body_velocity(inputs);
        state.vel_body_x = body.x;
        state.vel_body_z = body.y;

        // Heading is clockwise from north, world X east and Z north
        let world = Rotation2::new(-state.heading) * body;
        state.vel_world_x = world.x;
        state.vel_world_z = world.y;

        state.kias = fps2kn(body.norm());
        state.ktas = state.kias;
    }
}

mod test {
    #[cfg(test)]
    fn assert_near(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_asymmetric_gain() {
        use crate::{config::Limits, types::ControlInputs};

        use super::Speedometer;

        let speedometer = Speedometer::new(&Limits::default());
        let mut inputs = ControlInputs::default();
        inputs.elevator = -1.0;
        assert_near(speedometer.body_velocity(&inputs).y, 100.0 * 1.68781042021544);
        inputs.elevator = 1.0;
        assert_near(speedometer.body_velocity(&inputs).y, -50.0 * 1.68781042021544);
        inputs.elevator = 0.5;
        inputs.aileron = -0.5;
        let body = speedometer.body_velocity(&inputs);
        assert_near(body.x, -25.0 * 1.68781042021544);
        assert_near(body.y, -25.0 * 1.68781042021544);
    }

    #[test]
    fn test_deadband_forces_zero() {
        use crate::{config::Limits, types::ControlInputs};

        use super::Speedometer;

        let speedometer = Speedometer::new(&Limits::default());
        for value in [0.01, -0.01, 0.005, -0.0099, 0.0] {
            let mut inputs = ControlInputs::default();
            inputs.elevator = value;
            inputs.aileron = value;
            let body = speedometer.body_velocity(&inputs);
            assert_eq!(body.x, 0.0);
            assert_eq!(body.y, 0.0);
        }
    }

    #[test]
    fn test_world_frame() {
        use core::f64::consts::FRAC_PI_2;

        use crate::{
            config::Limits,
            types::{ControlInputs, KinematicState},
        };

        use super::Speedometer;

        let speedometer = Speedometer::new(&Limits::default());
        let mut inputs = ControlInputs::default();
        inputs.elevator = -1.0;
        let forward = 100.0 * 1.68781042021544;

        // Flying north
        let mut state = KinematicState::default();
        speedometer.update(&inputs, &mut state);
        assert_near(state.vel_world_z, forward);
        assert_near(state.vel_world_x, 0.0);

        // Flying east
        let mut state = KinematicState { heading: FRAC_PI_2, ..Default::default() };
        speedometer.update(&inputs, &mut state);
        assert_near(state.vel_world_x, forward);
        assert_near(state.vel_world_z, 0.0);
        assert!((state.kias - 100.0).abs() < 1e-3);
        assert_eq!(state.kias, state.ktas);

        // Heading east, sliding right means moving south
        let mut inputs = ControlInputs::default();
        inputs.aileron = 1.0;
        speedometer.update(&inputs, &mut state);
        assert_near(state.vel_world_x, 0.0);
        assert_near(state.vel_world_z, -50.0 * 1.68781042021544);
    }
}
