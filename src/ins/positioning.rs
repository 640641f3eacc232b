use crate::types::{measurement::EARTH_RADIUS_FEET, KinematicState};

/// Moves latitude and longitude along the world frame velocity.
///
/// Spherical earth; the poles and the antimeridian are not handled.
pub fn update(elapsed_ms: u64, state: &mut KinematicState) {
    let seconds = elapsed_ms as f64 / 1000.0;
    state.latitude += state.vel_world_z * seconds / EARTH_RADIUS_FEET;
    state.longitude += state.vel_world_x * seconds * libm::cos(state.latitude) / EARTH_RADIUS_FEET;
}

mod test {
    #[test]
    fn test_position_update() {
        use crate::types::{measurement::EARTH_RADIUS_FEET, KinematicState};

        let mut state = KinematicState::default();
        state.vel_world_z = EARTH_RADIUS_FEET / 1000.0;
        super::update(500, &mut state);
        assert!((state.latitude - 0.0005).abs() < 1e-12);
        assert_eq!(state.longitude, 0.0);

        let mut state = KinematicState { latitude: 1.0, ..Default::default() };
        state.vel_world_x = EARTH_RADIUS_FEET;
        super::update(1000, &mut state);
        assert!((state.longitude - libm::cos(1.0)).abs() < 1e-12);
    }
}
