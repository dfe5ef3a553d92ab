use nalgebra::Vector3;

/// Newtonian gravitational constant, in m^3 kg^-1 s^-2.
pub const G: f64 = 6.6743e-11;

/// Gravitational acceleration due to a point mass fixed at the origin.
///
/// The result points from `position` back toward the origin, with magnitude
/// `g * central_mass / r^2`. A body sitting exactly on the attractor gets the
/// zero vector instead of a division by zero.
pub fn acceleration(position: Vector3<f64>, g: f64, central_mass: f64) -> Vector3<f64> {
    let r = position.norm();
    if r == 0.0 {
        return Vector3::zeros();
    }
    -g * central_mass / (r * r * r) * position
}

/// Advances `(position, velocity)` by `dt` seconds with one classical RK4
/// step: four stages (at t, twice at the midpoint, and at t + dt), combined
/// with weights (1,2,2,1)/6 for both the position and velocity increments.
///
/// Pure and deterministic; all inputs are assumed finite. Local truncation
/// error is O(dt^5) per step, and no step-size adaptation happens here, so
/// accuracy is entirely up to the caller's choice of `dt`.
pub fn rk4_step(
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    dt: f64,
    g: f64,
    central_mass: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let k1_v = dt * acceleration(position, g, central_mass);
    let k1_p = dt * velocity;

    let k2_v = dt * acceleration(position + 0.5 * k1_p, g, central_mass);
    let k2_p = dt * (velocity + 0.5 * k1_v);

    let k3_v = dt * acceleration(position + 0.5 * k2_p, g, central_mass);
    let k3_p = dt * (velocity + 0.5 * k2_v);

    let k4_v = dt * acceleration(position + k3_p, g, central_mass);
    let k4_p = dt * (velocity + k3_v);

    let new_position = position + (k1_p + 2.0 * k2_p + 2.0 * k3_p + k4_p) / 6.0;
    let new_velocity = velocity + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) / 6.0;

    (new_position, new_velocity)
}
