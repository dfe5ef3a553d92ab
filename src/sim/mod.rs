mod body;
mod config;
mod simulator;
mod trail;

pub use body::{Body, BodyID, BodyInfo, BodyState};
pub use config::SimulationConfig;
pub use simulator::OrbitSimulator;
pub use trail::Trail;
