use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};

use rust_luna::physics::G;
use rust_luna::sim::{BodyID, BodyInfo, OrbitSimulator, SimulationConfig, Trail};

const EARTH_MASS: f64 = 5.972e24;
const MOON_MASS: f64 = 7.34767309e22;
const LUNAR_DISTANCE: f64 = 3.844e8;
const TIME_STEP: f64 = 3600.0;

// One orbit's worth of trail, like the bodies file carries.
const TRAIL_CAP: f64 = 2.0 * PI * LUNAR_DISTANCE;

fn info(name: &str, mass: f64, radius: f32) -> BodyInfo {
    BodyInfo {
        name: name.to_owned(),
        mass,
        radius,
        color: Point3::new(1.0, 1.0, 1.0),
    }
}

/// Earth fixed at the origin, Moon on a circular orbit in the xy-plane,
/// stepped one hour at a time. Returns the simulator and the two IDs.
fn lunar_simulator() -> (OrbitSimulator, BodyID, BodyID) {
    let config = SimulationConfig::new(G, EARTH_MASS, TIME_STEP);
    let mut simulator = OrbitSimulator::new(config);

    let earth = simulator.add_fixed_body(info("Earth", EARTH_MASS, 6.371e6));
    let moon = simulator.add_body(
        info("Moon", MOON_MASS, 1.737e6),
        Vector3::x() * LUNAR_DISTANCE,
        Vector3::y() * (G * EARTH_MASS / LUNAR_DISTANCE).sqrt(),
    );

    (simulator, earth, moon)
}

fn sidereal_month() -> f64 {
    2.0 * PI * (LUNAR_DISTANCE.powi(3) / (G * EARTH_MASS)).sqrt()
}

/// After one full orbital period, accumulated in hour-long ticks, the Moon
/// comes back to within 1% of its starting point. For these constants the
/// period is about 2.372e6 s, i.e. 659 ticks (27.5 days).
#[test]
fn moon_returns_after_one_period() {
    let n_ticks = (sidereal_month() / TIME_STEP).round() as u64;

    let (mut simulator, _, moon) = lunar_simulator();
    for _ in 0..n_ticks {
        simulator.tick();
    }

    let position = simulator.get_body(moon).position();
    let miss = (position - Vector3::x() * LUNAR_DISTANCE).norm();
    assert!(
        miss < 0.01 * LUNAR_DISTANCE,
        "moon ended {:.3e} m ({:.2}% of its orbital radius) from the start",
        miss,
        100.0 * miss / LUNAR_DISTANCE
    );
}

#[test]
fn orbit_stays_circular_throughout() {
    let n_ticks = (sidereal_month() / TIME_STEP).round() as u64;

    let (mut simulator, _, moon) = lunar_simulator();
    for _ in 0..n_ticks {
        simulator.tick();
        let r = simulator.get_body(moon).position().norm();
        assert!(
            (r - LUNAR_DISTANCE).abs() < 1e-3 * LUNAR_DISTANCE,
            "orbital radius drifted to {:.6e} m",
            r
        );
    }
}

#[test]
fn central_body_is_invariant_under_ticks() {
    let (mut simulator, earth, _) = lunar_simulator();

    for _ in 0..100 {
        let before_position = simulator.get_body(earth).position();
        let before_velocity = simulator.get_body(earth).velocity();
        simulator.tick();
        assert_eq!(simulator.get_body(earth).position(), before_position);
        assert_eq!(simulator.get_body(earth).velocity(), before_velocity);
    }
}

#[test]
fn trail_never_exceeds_one_orbit_of_history() {
    let (mut simulator, _, moon) = lunar_simulator();
    simulator.attach_trail(moon, Trail::new(TRAIL_CAP));

    // Two full orbits: the trail has to wrap and start trimming.
    let n_ticks = 2 * (sidereal_month() / TIME_STEP).round() as u64;
    for _ in 0..n_ticks {
        simulator.tick();

        let trail = simulator.get_trail(moon).unwrap();
        assert!(
            trail.arc_length() <= TRAIL_CAP || trail.len() == 1,
            "trail arc length {:.4e} exceeds the cap",
            trail.arc_length()
        );
    }

    // The trail wrapped, so it holds just under one orbit of points.
    let trail = simulator.get_trail(moon).unwrap();
    let expected_points = (sidereal_month() / TIME_STEP) as usize;
    assert!(trail.len() > expected_points / 2);
    assert!(trail.len() <= expected_points + 1);
}

#[test]
fn trail_tracks_the_moon_with_a_fading_ramp() {
    let (mut simulator, _, moon) = lunar_simulator();
    simulator.attach_trail(moon, Trail::new(TRAIL_CAP));

    for _ in 0..50 {
        simulator.tick();
    }

    let trail = simulator.get_trail(moon).unwrap();
    assert_eq!(trail.len(), 50);

    let (points, opacities) = trail.renderable(1.0e-6);

    // Newest point sits where the Moon is, in display units.
    let moon_position: Point3<f32> =
        nalgebra::convert(Point3::from(simulator.get_body(moon).position() * 1.0e-6));
    approx::assert_relative_eq!(*points.last().unwrap(), moon_position, max_relative = 1e-5);

    // Fade is monotone with exact endpoints.
    assert_eq!(opacities.first(), Some(&0.0));
    assert_eq!(opacities.last(), Some(&1.0));
    for pair in opacities.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}
