use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body. The radius and color only matter to
// the renderer; dynamics cares about the mass alone.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub mass: f64,
    pub radius: f32,
    pub color: Point3<f32>,
}

/// A body's dynamic role. The fixed body is the gravitational source sitting
/// at the origin; orbiting bodies carry the state the integrator advances.
#[derive(Debug, Clone)]
pub enum BodyState {
    FixedAtOrigin,
    Orbiting {
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    pub state: BodyState,
}

impl Body {
    pub fn is_fixed(&self) -> bool {
        matches!(self.state, BodyState::FixedAtOrigin)
    }

    /// Current position in SI meters; the fixed body is always at the origin.
    pub fn position(&self) -> Vector3<f64> {
        match self.state {
            BodyState::FixedAtOrigin => Vector3::zeros(),
            BodyState::Orbiting { position, .. } => position,
        }
    }

    /// Current velocity in SI meters per second.
    pub fn velocity(&self) -> Vector3<f64> {
        match self.state {
            BodyState::FixedAtOrigin => Vector3::zeros(),
            BodyState::Orbiting { velocity, .. } => velocity,
        }
    }
}
