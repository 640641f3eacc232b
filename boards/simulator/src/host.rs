use brick_control::collection::RequestId;
use brick_control::hal::{Axis, Event, Host, Rejected};
use brick_control::ins::positioning;
use brick_control::types::measurement::fps2fpm;
use brick_control::types::{KinematicState, Readonly, Sample, Timestamp};

/// Vertical speed of a released vehicle, ft/s
pub const SINK_RATE: f64 = 25.0;
const CONTACT_TOLERANCE: f64 = 0.5;
const STANDARD_PRESSURE: f64 = 29.92;

/// Stand-in for the host simulation, with just enough native physics to take the
/// vehicle back: released altitude sinks to the ground, released attitude levels off
/// and released position keeps drifting while airborne.
pub struct HostModel {
    pub state: KinematicState,
    pub readonly: Readonly,
    elevation: f64,
    static_cg_height: f64,
    next_id: RequestId,
}

impl HostModel {
    /// Resting on the ground at the given position, radians and feet
    pub fn new(latitude: f64, longitude: f64, elevation: f64, static_cg_height: f64) -> Self {
        let msl = elevation + static_cg_height;
        let state = KinematicState { latitude, longitude, msl, ..Default::default() };
        let mut readonly = Readonly::default();
        readonly.pressure = STANDARD_PRESSURE;
        let mut model = Self { state, readonly, elevation, static_cg_height, next_id: 0 };
        model.settle();
        model
    }

    fn settle(&mut self) {
        let floor = self.elevation + self.static_cg_height;
        if self.state.msl < floor {
            self.state.msl = floor;
            self.state.vel_body_y = 0.0;
            self.state.vel_world_y = 0.0;
            self.state.vs = 0.0;
        }
        self.readonly.agl = self.state.msl - self.elevation;
        let contact = self.static_cg_height + CONTACT_TOLERANCE;
        self.readonly.inputs.on_ground = self.readonly.agl <= contact;
    }

    /// Runs native physics on the axes nobody froze
    pub fn advance(&mut self, elapsed_ms: u64) {
        let seconds = elapsed_ms as f64 / 1000.0;
        let freeze = self.readonly.freeze;
        let on_ground = self.readonly.inputs.on_ground;
        let airborne = self.readonly.agl > self.static_cg_height;
        let state = &mut self.state;
        if !freeze.altitude {
            let sink = if airborne { -SINK_RATE } else { 0.0 };
            state.vel_body_y = sink;
            state.vel_world_y = sink;
            state.vs = fps2fpm(sink);
            state.msl += sink * seconds;
        }
        if !freeze.attitude {
            state.bank = 0.0;
            state.pitch = 0.0;
        }
        if !freeze.position {
            if on_ground {
                state.vel_body_x = 0.0;
                state.vel_body_z = 0.0;
                state.vel_world_x = 0.0;
                state.vel_world_z = 0.0;
                state.kias = 0.0;
                state.ktas = 0.0;
            } else {
                positioning::update(elapsed_ms, state);
            }
        }
        self.settle();
    }

    pub fn sample(&self, timestamp: Timestamp) -> Sample {
        Sample::new(timestamp, self.readonly, self.state)
    }

    fn next_id(&mut self) -> RequestId {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for HostModel {
    fn transmit(&mut self, event: Event) -> Result<RequestId, Rejected> {
        match event {
            Event::Freeze(axis, on) => {
                trace!("{} freeze {}", axis, if on { "on" } else { "off" });
                let freeze = &mut self.readonly.freeze;
                match axis {
                    Axis::Altitude => freeze.altitude = on,
                    Axis::Attitude => freeze.attitude = on,
                    Axis::Position => freeze.position = on,
                }
            }
            Event::ParkingBrakeToggle => {
                let brake = &mut self.readonly.parking_brake;
                *brake = if *brake < 0.5 { 1.0 } else { 0.0 };
            }
        }
        Ok(self.next_id())
    }

    fn set_kinematic_state(&mut self, state: &KinematicState) -> Result<RequestId, Rejected> {
        self.state = *state;
        self.settle();
        Ok(self.next_id())
    }
}

mod test {
    #[test]
    fn test_released_vehicle_sinks_to_ground() {
        use brick_control::hal::Host;

        use super::HostModel;

        let mut model = HostModel::new(0.6, -2.1, 500.0, 2.0);
        assert!(model.readonly.inputs.on_ground);
        let mut state = model.state;
        state.msl = 520.0;
        model.set_kinematic_state(&state).unwrap();
        model.advance(100);
        assert!(!model.readonly.inputs.on_ground);
        assert!((model.readonly.agl - 17.5).abs() < 1e-9);
        for _ in 0..10 {
            model.advance(100);
        }
        assert!(model.readonly.inputs.on_ground);
        assert_eq!(model.readonly.agl, 2.0);
        assert_eq!(model.state.vs, 0.0);
    }

    #[test]
    fn test_frozen_axes_stay_put() {
        use brick_control::hal::{Axis, Event, Host};

        use super::HostModel;

        let mut model = HostModel::new(0.6, -2.1, 500.0, 2.0);
        model.transmit(Event::Freeze(Axis::Altitude, true)).unwrap();
        let mut state = model.state;
        state.msl = 600.0;
        model.set_kinematic_state(&state).unwrap();
        model.advance(1000);
        assert_eq!(model.state.msl, 600.0);

        model.transmit(Event::ParkingBrakeToggle).unwrap();
        assert_eq!(model.readonly.parking_brake, 1.0);
    }
}
