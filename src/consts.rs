use std::f64::consts::PI;

// NASA fact-sheet values for the Earth-Moon system
pub const EARTH_MASS: f64 = 5.972e24;
pub const MOON_MASS: f64 = 7.34767309e22;
pub const LUNAR_DISTANCE: f64 = 3.844e8;

pub fn circular_velocity(radius: f64, mu: f64) -> f64 {
    (mu / radius).sqrt()
}

pub fn orbital_period(radius: f64, mu: f64) -> f64 {
    2.0 * PI * (radius.powi(3) / mu).sqrt()
}
