//! Flight camera frame integration.

use bevy::prelude::*;

use simulation::FlightCamera;

pub fn setup_flight_camera(mut commands: Commands, camera: Res<FlightCamera>) {
    commands.spawn((Camera3d::default(), camera.view_transform()));
}

/// System: consume pending roll/pitch, advance the eye, and write the
/// resulting look-at transform to the camera entity. Runs after the input
/// systems so a keypress lands in the same frame.
pub fn apply_flight_camera(
    mut camera: ResMut<FlightCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    camera.integrate_frame();
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = camera.view_transform();
}
