pub mod ini;

pub const CONTACT_POINTS: &str = "CONTACT_POINTS";
pub const STATIC_CG_HEIGHT: &str = "static_cg_height";

/// Tuning of the direct controller.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Limits {
    /// Yaw rate at full rudder, deg/s
    pub yaw_rate: f64,
    /// Ground speed at full forward stick, knots
    pub max_forward: f64,
    /// Ground speed at full back stick, knots
    pub max_backward: f64,
    /// Sideways speed at full aileron, knots
    pub max_lateral: f64,
    /// Command magnitude treated as zero
    pub deadband: f64,
    /// Vertical speed at throttle extremes, ft/min
    pub throttle_climb: f64,
    /// Throttle band producing no vertical speed
    pub throttle_dead_zone: (f64, f64),
    /// Vertical speed at full brake differential, ft/min
    pub differential_climb: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            yaw_rate: 45.0,
            max_forward: 100.0,
            max_backward: 50.0,
            max_lateral: 50.0,
            deadband: 0.01,
            throttle_climb: 1000.0,
            throttle_dead_zone: (0.45, 0.55),
            differential_climb: 500.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Height of the center of gravity above ground when resting on the gear, feet
    pub static_cg_height: f64,
    pub limits: Limits,
    /// Hand horizontal position back to the host together with altitude and attitude.
    /// Off by default, the host lets wind push a released vehicle around.
    pub release_position: bool,
}

impl Config {
    /// Picks the settings this crate cares about out of an aircraft flight model file.
    ///
    /// Missing or malformed keys leave the current values untouched.
    pub fn load_flight_model(&mut self, text: &str) {
        ini::browse(text, |section, key, value| {
            if !section.eq_ignore_ascii_case(CONTACT_POINTS)
                || !key.eq_ignore_ascii_case(STATIC_CG_HEIGHT)
            {
                return true;
            }
            match value.parse::<f64>() {
                Ok(height) => {
                    self.static_cg_height = height;
                    info!("Static CG height from flight model: {}ft", height);
                }
                Err(_) => warn!("Malformed {} value {:?}", STATIC_CG_HEIGHT, value),
            }
            false
        });
    }
}

pub fn read_config(flight_model: &str) -> Config {
    let mut config = Config::default();
    config.load_flight_model(flight_model);
    config
}

mod test {
    #[test]
    fn test_read_config() {
        use super::read_config;

        let text = "[VERSION]\nmajor = 1\n\n[contact_points]\nStatic_CG_Height = 2.75 ; feet\n\
                    static_cg_height = 9.0\n";
        let config = read_config(text);
        assert_eq!(config.static_cg_height, 2.75);
        assert_eq!(config.release_position, false);
    }

    #[test]
    fn test_missing_or_malformed_key() {
        use super::{read_config, Config};

        let config = read_config("[CONTACT_POINTS]\nstatic_pitch = 0.0\n");
        assert_eq!(config, Config::default());

        let mut config = Config::default();
        config.static_cg_height = 4.0;
        config.load_flight_model("[CONTACT_POINTS]\nstatic_cg_height = tall\n");
        assert_eq!(config.static_cg_height, 4.0);

        // Key outside of its section is not picked up
        config.load_flight_model("[WEIGHT]\nstatic_cg_height = 1.0\n");
        assert_eq!(config.static_cg_height, 4.0);
    }
}
