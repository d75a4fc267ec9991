use bevy::prelude::*;

pub mod camera;
pub mod color_ramps;
pub mod display;
pub mod flight_input;
pub mod logo;
pub mod terrain_render;

use display::{DisplayMode, FogState};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisplayMode>()
            .init_resource::<FogState>()
            .add_systems(
                Startup,
                (
                    camera::setup_flight_camera,
                    setup_lighting,
                    terrain_render::spawn_terrain,
                ),
            )
            .add_systems(
                Update,
                (
                    flight_input::flight_keys,
                    camera::apply_flight_camera.after(flight_input::flight_keys),
                ),
            )
            .add_systems(
                Update,
                (
                    display::display_keys,
                    display::apply_display_mode.after(display::display_keys),
                    display::apply_fog.after(display::display_keys),
                    terrain_render::regenerate_terrain,
                ),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
