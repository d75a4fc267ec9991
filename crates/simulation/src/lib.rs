use bevy::prelude::*;

pub mod config;
pub mod flight_camera;
pub mod heightfield;
pub mod sim_rng;

pub use flight_camera::FlightCamera;
pub use heightfield::{FaultParams, Heightfield, HeightfieldError};
pub use sim_rng::SimRng;

/// Registers the core state: the deterministic RNG and the flight camera.
/// The terrain itself lives in mesh assets owned by the rendering crate;
/// it is generated once at startup from `SimRng`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>();
        app.init_resource::<FlightCamera>();
    }
}
