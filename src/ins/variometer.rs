use crate::{
    config::Limits,
    types::{
        measurement::{fpm2fps, fps2fpm},
        ClimbCommand, KinematicState,
    },
};

/// Turns the climb command into a vertical speed and integrates it into altitude.
pub struct Variometer {
    climb: f64,
    dead_zone: (f64, f64),
    differential_climb: f64,
    deadband: f64,
}

impl Variometer {
    pub fn new(limits: &Limits) -> Self {
        Self {
            climb: limits.throttle_climb,
            dead_zone: limits.throttle_dead_zone,
            differential_climb: limits.differential_climb,
            deadband: limits.deadband,
        }
    }

    /// Commanded vertical speed in ft/s, positive up
    pub fn vertical_speed(&self, command: ClimbCommand) -> f64 {
        let fpm = match command {
            ClimbCommand::Throttle { position } => {
                let (low, high) = self.dead_zone;
                if position < low {
                    (position - low) / low * self.climb
                } else if position > high {
                    (position - high) / (1.0 - high) * self.climb
                } else {
                    0.0
                }
            }
            ClimbCommand::Differential { left, right } => {
                let differential = right - left;
                match libm::fabs(differential) > self.deadband {
                    true => differential * self.differential_climb,
                    false => 0.0,
                }
            }
        };
        fpm2fps(fpm)
    }

    pub fn update(&self, command: ClimbCommand, elapsed_ms: u64, state: &mut KinematicState) {
        let vs = self.vertical_speed(command);
        if vs == 0.0 {
            state.vel_body_y = 0.0;
            state.vel_world_y = 0.0;
            state.vs = 0.0;
            return;
        }
        state.vel_body_y = vs;
        state.vel_world_y = vs;
        state.msl += vs * elapsed_ms as f64 / 1000.0;
        state.vs = fps2fpm(vs);
    }
}

mod test {
    #[test]
    fn test_throttle_dead_zone() {
        use crate::{config::Limits, types::ClimbCommand};

        use super::Variometer;

        let variometer = Variometer::new(&Limits::default());
        let vs = |position| variometer.vertical_speed(ClimbCommand::Throttle { position });
        assert_eq!(vs(0.45), 0.0);
        assert_eq!(vs(0.5), 0.0);
        assert_eq!(vs(0.55), 0.0);
        assert!((vs(1.0) * 60.0 - 1000.0).abs() < 1e-6);
        assert!((vs(0.0) * 60.0 + 1000.0).abs() < 1e-6);
        assert!((vs(0.775) * 60.0 - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_differential() {
        use crate::{config::Limits, types::ClimbCommand};

        use super::Variometer;

        let variometer = Variometer::new(&Limits::default());
        let vs = |left, right| variometer.vertical_speed(ClimbCommand::Differential { left, right });
        assert!((vs(0.0, 1.0) * 60.0 - 500.0).abs() < 1e-9);
        assert!((vs(1.0, 0.0) * 60.0 + 500.0).abs() < 1e-9);
        assert_eq!(vs(0.3, 0.305), 0.0);
        assert_eq!(vs(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_update() {
        use crate::{
            config::Limits,
            types::{ClimbCommand, KinematicState},
        };

        use super::Variometer;

        let variometer = Variometer::new(&Limits::default());
        let mut state = KinematicState { msl: 100.0, ..Default::default() };
        variometer.update(ClimbCommand::Differential { left: 0.0, right: 1.0 }, 1200, &mut state);
        assert!((state.msl - 110.0).abs() < 1e-9);
        assert!((state.vs - 500.0).abs() < 1e-9);
        assert_eq!(state.vel_body_y, state.vel_world_y);

        variometer.update(ClimbCommand::Throttle { position: 0.5 }, 1200, &mut state);
        assert_eq!((state.vel_body_y, state.vel_world_y, state.vs), (0.0, 0.0, 0.0));
        assert!((state.msl - 110.0).abs() < 1e-9);
    }
}
