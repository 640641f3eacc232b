/// Climb axis, either a single throttle lever or a pair of differential brakes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum ClimbCommand {
    /// Lever position in [0, 1]
    Throttle { position: f64 },
    /// Brake positions in [0, 1], right minus left climbs
    Differential { left: f64, right: f64 },
}

impl Default for ClimbCommand {
    fn default() -> Self {
        Self::Throttle { position: 0.5 }
    }
}

/// Pilot inputs, normalized to [-1, 1] unless noted otherwise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    pub rudder: f64,
    pub aileron: f64,
    /// Negative is stick forward
    pub elevator: f64,
    pub climb: ClimbCommand,
    pub on_ground: bool,
    /// Arming signal, the controller owns motion only while this is on
    pub ignition: bool,
}

mod test {
    #[test]
    fn test_deserialize_climb_command() {
        use super::ClimbCommand;

        let json = r#"{"type": "throttle", "position": 0.8}"#;
        let climb: ClimbCommand = serde_json::from_str(json).unwrap();
        assert_eq!(climb, ClimbCommand::Throttle { position: 0.8 });

        let json = r#"{"type": "differential", "left": 0.0, "right": 1.0}"#;
        let climb: ClimbCommand = serde_json::from_str(json).unwrap();
        assert_eq!(climb, ClimbCommand::Differential { left: 0.0, right: 1.0 });
    }
}
