use std::collections::HashMap;

use nalgebra::Vector3;

use super::body::{Body, BodyID, BodyInfo, BodyState};
use super::config::SimulationConfig;
use super::trail::Trail;
use crate::physics;

/// Owns the simulated bodies and drives them forward one fixed step at a
/// time. Each `tick()` advances every orbiting body by `config.dt` seconds
/// and feeds any attached trail; the fixed body is never touched.
pub struct OrbitSimulator {
    config: SimulationConfig,
    bodies: Vec<Body>,
    trails: HashMap<BodyID, Trail>,
}

impl OrbitSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        OrbitSimulator {
            config,
            bodies: Vec::new(),
            trails: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Registers the body fixed at the origin. At most one may exist.
    pub fn add_fixed_body(&mut self, info: BodyInfo) -> BodyID {
        assert!(
            !self.bodies.iter().any(|body| body.is_fixed()),
            "a fixed body is already registered"
        );
        self.insert_new_body(info, BodyState::FixedAtOrigin)
    }

    /// Registers an orbiting body with its initial state, in SI units.
    pub fn add_body(
        &mut self,
        info: BodyInfo,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> BodyID {
        self.insert_new_body(info, BodyState::Orbiting { position, velocity })
    }

    fn insert_new_body(&mut self, info: BodyInfo, state: BodyState) -> BodyID {
        let id = BodyID(self.bodies.len());
        self.bodies.push(Body { id, info, state });
        id
    }

    /// Attaches a trail to an already-registered body, replacing any
    /// previous one. Panics if no such body exists.
    pub fn attach_trail(&mut self, id: BodyID, trail: Trail) {
        assert!(
            id.0 < self.bodies.len(),
            "cannot attach a trail to unregistered body {:?}",
            id
        );
        self.trails.insert(id, trail);
    }

    /// Bodies in registration order.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn get_trail(&self, id: BodyID) -> Option<&Trail> {
        self.trails.get(&id)
    }

    /// Trails paired with their owners, in body registration order.
    pub fn trails(&self) -> impl Iterator<Item = (BodyID, &Trail)> {
        self.bodies
            .iter()
            .filter_map(move |body| self.trails.get(&body.id).map(|trail| (body.id, trail)))
    }

    /// Advances every orbiting body by one `dt`. Bodies are visited in
    /// registration order; each update reads only that body's own prior
    /// state, so the visit order has no effect on the result.
    pub fn tick(&mut self) {
        assert!(
            self.bodies.iter().any(|body| body.is_fixed()),
            "no fixed body registered"
        );

        let SimulationConfig {
            g,
            central_mass,
            dt,
        } = self.config;

        for body in self.bodies.iter_mut() {
            let (position, velocity) = match body.state {
                BodyState::FixedAtOrigin => continue,
                BodyState::Orbiting { position, velocity } => (position, velocity),
            };

            let (new_position, new_velocity) =
                physics::rk4_step(position, velocity, dt, g, central_mass);
            body.state = BodyState::Orbiting {
                position: new_position,
                velocity: new_velocity,
            };

            if let Some(trail) = self.trails.get_mut(&body.id) {
                trail.add_point(new_position);
                trail.cap();
            }
        }
    }
}
