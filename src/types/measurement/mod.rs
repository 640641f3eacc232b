//! Unit conversions between what the host reports and what the integrator works in.
//!
//! The host speaks feet, feet per second, feet per minute, knots and radians.

pub const FEET_PER_METER: f64 = 1.0 / (12.0 * 0.0254);

pub const EARTH_RADIUS_METER: f64 = 6_371_000.0;
pub const EARTH_RADIUS_FEET: f64 = EARTH_RADIUS_METER * FEET_PER_METER;

const KNOT_IN_FPS: f64 = 1.68781042021544;
const FPS_IN_KNOT: f64 = 0.592484;

macro_rules! conversions {
    ($($(#[$attr:meta])* $name:ident: $expr:expr),+) => {
        $(
            $(#[$attr])*
            #[inline]
            pub fn $name(value: f64) -> f64 {
                let convert: fn(f64) -> f64 = $expr;
                convert(value)
            }
        )+
    };
}

conversions! {
    /// knots to feet per second
    kn2fps: |kn| kn * KNOT_IN_FPS,
    fps2kn: |fps| fps * FPS_IN_KNOT,
    fpm2fps: |fpm| fpm / 60.0,
    fps2fpm: |fps| fps * 60.0
}

mod test {
    #[test]
    fn test_conversions() {
        use super::{fpm2fps, fps2fpm, kn2fps};

        assert!((kn2fps(100.0) - 168.781042021544).abs() < 1e-9);
        assert_eq!(fpm2fps(600.0), 10.0);
        assert_eq!(fps2fpm(10.0), 600.0);
    }

    #[test]
    fn test_earth_radius() {
        use super::EARTH_RADIUS_FEET;

        assert!((EARTH_RADIUS_FEET - 20_902_230.97).abs() < 0.01);
    }
}
