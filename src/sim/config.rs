/// Immutable per-run parameters: the gravitational constant, the mass of the
/// central body, and the fixed step size in simulated seconds per tick.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub g: f64,
    pub central_mass: f64,
    pub dt: f64,
}

impl SimulationConfig {
    /// Panics unless `central_mass` and `dt` are positive and finite. A bad
    /// configuration is a caller bug, caught here rather than mid-run.
    pub fn new(g: f64, central_mass: f64, dt: f64) -> Self {
        assert!(
            g > 0.0 && g.is_finite(),
            "gravitational constant must be positive, got {}",
            g
        );
        assert!(
            central_mass > 0.0 && central_mass.is_finite(),
            "central mass must be positive, got {}",
            central_mass
        );
        assert!(
            dt > 0.0 && dt.is_finite(),
            "time step must be positive, got {}",
            dt
        );

        SimulationConfig {
            g,
            central_mass,
            dt,
        }
    }
}
