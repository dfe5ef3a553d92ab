use std::fs;

use nalgebra::{Point3, Vector3};

use crate::physics;
use crate::sim::{BodyInfo, OrbitSimulator, SimulationConfig, Trail};

/// Builds a simulator from a bodies file. Whitespace-separated columns, one
/// body per line, header skipped:
///
/// ```text
/// name mass radius color parent x y z vx vy vz trail
/// ```
///
/// The single line whose parent is `-` is the fixed central body; its
/// remaining columns are omitted. Orbiting lines give the initial position
/// and velocity in SI units, then either a trail arc-length cap in meters or
/// `-` for no trail.
pub fn read_file(filename: &str, dt: f64) -> OrbitSimulator {
    // Rows are gathered first: the central body's mass has to be known
    // before the simulator can be configured.
    let mut parsed = Vec::new();

    // Read lines, skipping header
    for line in fs::read_to_string(filename).unwrap().lines().skip(1) {
        let mut fields = line.split_ascii_whitespace();

        macro_rules! next_string {
            () => {
                fields.next().unwrap()
            };
        }

        macro_rules! next_f64 {
            () => {
                fields.next().unwrap().parse::<f64>().unwrap()
            };
        }

        let name = next_string!();
        let info = BodyInfo {
            name: name.to_owned(),
            mass: next_f64!(),
            radius: next_f64!() as f32,
            color: parse_color(next_string!()),
        };

        let parent = next_string!();
        if parent == "-" {
            parsed.push((info, None));
            continue;
        }

        let position = Vector3::new(next_f64!(), next_f64!(), next_f64!());
        let velocity = Vector3::new(next_f64!(), next_f64!(), next_f64!());
        let trail_cap = match next_string!() {
            "-" => None,
            cap => Some(cap.parse::<f64>().unwrap()),
        };
        parsed.push((info, Some((parent.to_owned(), position, velocity, trail_cap))));
    }

    let central = parsed
        .iter()
        .find(|(_, orbit)| orbit.is_none())
        .map(|(info, _)| info)
        .expect("bodies file names no central body");
    let central_name = central.name.clone();

    let config = SimulationConfig::new(physics::G, central.mass, dt);
    let mut simulator = OrbitSimulator::new(config);

    for (info, orbit) in parsed {
        match orbit {
            None => {
                simulator.add_fixed_body(info);
            }
            Some((parent, position, velocity, trail_cap)) => {
                assert!(
                    parent == central_name,
                    "body {} orbits {}, but the central body is {}",
                    info.name,
                    parent,
                    central_name
                );
                let id = simulator.add_body(info, position, velocity);
                if let Some(cap) = trail_cap {
                    simulator.attach_trail(id, Trail::new(cap));
                }
            }
        }
    }

    simulator
}

fn parse_color(s: &str) -> Point3<f32> {
    assert_eq!(s.len(), 6);
    let r = u8::from_str_radix(&s[0..2], 16).unwrap();
    let g = u8::from_str_radix(&s[2..4], 16).unwrap();
    let b = u8::from_str_radix(&s[4..6], 16).unwrap();

    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
