use core::fmt::{self, Display, Formatter};

use super::control::{ClimbCommand, ControlInputs};

/// Microseconds since the transport started delivering samples
pub type Timestamp = fugit::MicrosDurationU64;

/// Vehicle state the controller writes while it owns motion.
///
/// Angles and coordinates are in radians, distances in feet, velocities in feet per
/// second except `vs` which is in feet per minute, airspeeds in knots.
/// Body axes: X lateral, Y vertical, Z longitudinal. World axes: X east, Y up, Z north.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub heading: f64,
    pub bank: f64,
    pub pitch: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub msl: f64,
    pub vel_body_x: f64,
    pub vel_body_y: f64,
    pub vel_body_z: f64,
    pub vel_world_x: f64,
    pub vel_world_y: f64,
    pub vel_world_z: f64,
    pub kias: f64,
    pub ktas: f64,
    pub vs: f64,
}

impl KinematicState {
    /// Same heading and position, nothing moving and wings level
    pub fn motionless(&self) -> Self {
        Self {
            heading: self.heading,
            latitude: self.latitude,
            longitude: self.longitude,
            msl: self.msl,
            ..Default::default()
        }
    }
}

impl Display for KinematicState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "hdg:{:3}", self.heading.to_degrees() as i32)?;
        write!(f, " bnk:{:4} pit:{:4}", self.bank.to_degrees() as i32, self.pitch.to_degrees() as i32)?;
        let (lat, lon) = (self.latitude.to_degrees(), self.longitude.to_degrees());
        write!(f, " pos: {:.4}{}", libm::fabs(lat), if lat > 0.0 { 'N' } else { 'S' })?;
        write!(f, " {:.4}{}", libm::fabs(lon), if lon > 0.0 { 'E' } else { 'W' })?;
        write!(f, " msl:{:6.1} /", self.msl)?;
        write!(f, " bod:{:5.2},{:5.2},{:5.2}", self.vel_body_x, self.vel_body_y, self.vel_body_z)?;
        write!(f, " wld:{:5.2},{:5.2},{:5.2} /", self.vel_world_x, self.vel_world_y, self.vel_world_z)?;
        write!(f, " ias:{:3.0} tas:{:3.0} vs:{:6.1}", self.kias, self.ktas, self.vs)
    }
}

/// Per-axis motion freeze as reported by the host
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeFlags {
    pub altitude: bool,
    pub attitude: bool,
    pub position: bool,
}

/// Host-reported telemetry the controller never writes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Readonly {
    #[serde(flatten)]
    pub inputs: ControlInputs,
    /// Height above ground in feet
    pub agl: f64,
    /// Wind along the body axes, ft/s
    pub wind: [f64; 3],
    /// 0 released, 1 fully set
    pub parking_brake: f64,
    pub freeze: FreezeFlags,
    /// inHg
    pub pressure: f64,
}

fn yes_no(value: bool) -> char {
    if value {
        'Y'
    } else {
        'N'
    }
}

impl Display for Readonly {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let inputs = &self.inputs;
        write!(f, "rud:{:5.2} ail:{:5.2} ele:{:5.2}", inputs.rudder, inputs.aileron, inputs.elevator)?;
        match inputs.climb {
            ClimbCommand::Throttle { position } => write!(f, " thr:{:5.2}", position)?,
            ClimbCommand::Differential { left, right } => {
                write!(f, " brk:{:5.2},{:5.2}", left, right)?
            }
        }
        write!(f, " / agl:{:6.1}", self.agl)?;
        let [x, y, z] = self.wind;
        write!(f, " wind:{:5.1},{:5.1},{:5.1}", x, y, z)?;
        write!(f, " gnd: {} ign: {}", yes_no(inputs.on_ground), yes_no(inputs.ignition))?;
        write!(f, " pbrk:{:5.2}", self.parking_brake)?;
        let freeze = &self.freeze;
        let flags = [freeze.altitude, freeze.attitude, freeze.position].map(yes_no);
        write!(f, " frz: {}{}{}", flags[0], flags[1], flags[2])?;
        write!(f, " pres:{:8.6}", self.pressure)
    }
}

/// One delivery from the transport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub readonly: Readonly,
    pub state: KinematicState,
}

impl Sample {
    pub fn new(timestamp: Timestamp, readonly: Readonly, state: KinematicState) -> Self {
        Self { timestamp, readonly, state }
    }
}

mod test {
    #[test]
    fn test_motionless() {
        use super::KinematicState;

        let state = KinematicState {
            heading: 1.0,
            bank: 0.2,
            pitch: -0.1,
            latitude: 0.5,
            longitude: -2.0,
            msl: 1500.0,
            vel_body_x: 10.0,
            vel_body_y: -3.0,
            vel_body_z: 100.0,
            vel_world_x: 50.0,
            vel_world_y: -3.0,
            vel_world_z: 80.0,
            kias: 60.0,
            ktas: 60.0,
            vs: -180.0,
        };
        let expected = KinematicState {
            heading: 1.0,
            latitude: 0.5,
            longitude: -2.0,
            msl: 1500.0,
            ..Default::default()
        };
        assert_eq!(state.motionless(), expected);
    }

    #[test]
    fn test_display_readonly() {
        use std::string::ToString;

        use super::Readonly;

        let mut readonly = Readonly::default();
        readonly.agl = 3.25;
        readonly.inputs.on_ground = true;
        readonly.freeze.attitude = true;
        readonly.wind = [1.5, 0.0, -12.25];
        let string = readonly.to_string();
        assert!(string.contains("agl:   3.2") || string.contains("agl:   3.3"));
        assert!(string.contains("gnd: Y ign: N"));
        assert!(string.contains("frz: NYN"));
        assert!(string.contains("wind:  1.5,  0.0,-12.2") || string.contains("wind:  1.5,  0.0,-12.3"));
    }

    #[test]
    fn test_serialize_readonly() {
        use serde_json::json;

        use super::Readonly;

        let value = serde_json::to_value(&Readonly::default()).unwrap();
        assert_eq!(value["climb"], json!({"type": "throttle", "position": 0.5}));
        assert_eq!(value["ignition"], json!(false));
        assert_eq!(value["freeze"], json!({"altitude": false, "attitude": false, "position": false}));
    }
}
