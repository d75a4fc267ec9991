//! Keyboard boundary into the flight camera.
//!
//! Arrow keys bank roll/pitch steps into the `FlightCamera` resource while
//! held; `=`/`-` bump the speed factor; R restores the initial state. The
//! pending degrees are consumed by `camera::apply_flight_camera` later in
//! the same frame.

use bevy::prelude::*;

use simulation::config::{PITCH_STEP_DEGREES, ROLL_STEP_DEGREES};
use simulation::FlightCamera;

pub fn flight_keys(keys: Res<ButtonInput<KeyCode>>, mut camera: ResMut<FlightCamera>) {
    if keys.pressed(KeyCode::ArrowUp) {
        camera.pitch_degrees += PITCH_STEP_DEGREES;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        camera.pitch_degrees -= PITCH_STEP_DEGREES;
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        camera.roll_degrees -= ROLL_STEP_DEGREES;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        camera.roll_degrees += ROLL_STEP_DEGREES;
    }

    if keys.just_pressed(KeyCode::Equal) {
        camera.adjust_speed(1);
    }
    if keys.just_pressed(KeyCode::Minus) {
        camera.adjust_speed(-1);
    }

    if keys.just_pressed(KeyCode::KeyR) {
        camera.reset();
        info!("flight camera reset");
    }
}
