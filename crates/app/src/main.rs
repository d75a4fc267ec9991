use bevy::prelude::*;
use bevy::window::PresentMode;

use rendering::logo::LogoPlugin;
use rendering::RenderingPlugin;
use simulation::{SimRng, SimulationPlugin};

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Faultline".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    // Explicit seed for reproducible terrain; falls back to the default
    // seed when unset or unparseable.
    if let Ok(seed) = std::env::var("FAULTLINE_SEED") {
        match seed.parse::<u64>() {
            Ok(seed) => {
                app.insert_resource(SimRng::from_seed_u64(seed));
            }
            Err(_) => warn!("FAULTLINE_SEED {seed:?} is not a u64, using default seed"),
        }
    }

    // Logo demo mode: renders the animated logo instead of the terrain.
    if std::env::var("FAULTLINE_LOGO").is_ok() {
        app.add_plugins((SimulationPlugin, LogoPlugin));
    } else {
        app.add_plugins((SimulationPlugin, RenderingPlugin));
    }

    app.run();
}
