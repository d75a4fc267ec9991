//! Quaternion flight-camera integrator.
//!
//! Maintains an orthonormal `(view_dir, up)` pair plus an eye position.
//! Input systems bank pending roll/pitch degrees and a speed factor into
//! the resource; once per frame `integrate_frame` consumes the pending
//! rotations (roll before pitch, since the pitch axis depends on the
//! post-roll orientation) and advances the eye along the view direction.

use bevy::prelude::*;

use crate::config::{
    CAMERA_EYE, CAMERA_UP, CAMERA_VIEW_DIR, SPEED_MAX, SPEED_MIN, SPEED_STEP,
};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlightCamera {
    pub eye: Vec3,
    /// Unit view direction.
    pub view_dir: Vec3,
    /// Unit up vector, orthogonal to `view_dir` by construction.
    pub up: Vec3,
    /// Pending roll, in degrees, consumed by the next `integrate_frame`.
    pub roll_degrees: f32,
    /// Pending pitch, in degrees, consumed by the next `integrate_frame`.
    pub pitch_degrees: f32,
    /// Forward speed per frame, clamped to [SPEED_MIN, SPEED_MAX].
    pub speed_factor: f32,
}

impl Default for FlightCamera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            view_dir: CAMERA_VIEW_DIR,
            up: CAMERA_UP,
            roll_degrees: 0.0,
            pitch_degrees: 0.0,
            speed_factor: SPEED_MIN,
        }
    }
}

impl FlightCamera {
    /// Roll: spin `up` around the forward axis. `view_dir` is rotated by
    /// the same quaternion so the pair stays bit-for-bit consistent.
    pub fn apply_roll(&mut self, delta_degrees: f32) {
        let q = Quat::from_axis_angle(self.view_dir, delta_degrees.to_radians());
        self.view_dir = q * self.view_dir;
        self.up = q * self.up;
    }

    /// Pitch: rotate both vectors about the right vector `view_dir x up`.
    pub fn apply_pitch(&mut self, delta_degrees: f32) {
        let axis = self.view_dir.cross(self.up);
        let q = Quat::from_axis_angle(axis, delta_degrees.to_radians());
        self.view_dir = q * self.view_dir;
        self.up = q * self.up;
    }

    /// Move the eye forward by the clamped speed factor.
    pub fn advance(&mut self) {
        self.speed_factor = self.speed_factor.clamp(SPEED_MIN, SPEED_MAX);
        self.eye += self.view_dir * self.speed_factor;
    }

    /// Per-frame integration: consume pending roll, then pending pitch,
    /// then advance. Pending degrees are zeroed after application; held
    /// keys re-add their step each frame through the input layer, so a
    /// single tap turns the aircraft once instead of forever.
    pub fn integrate_frame(&mut self) {
        let roll = std::mem::take(&mut self.roll_degrees);
        if roll != 0.0 {
            self.apply_roll(roll);
        }
        let pitch = std::mem::take(&mut self.pitch_degrees);
        if pitch != 0.0 {
            self.apply_pitch(pitch);
        }
        self.advance();
    }

    /// Bump the speed factor one step up or down.
    pub fn adjust_speed(&mut self, sign: i32) {
        self.speed_factor =
            (self.speed_factor + sign as f32 * SPEED_STEP).clamp(SPEED_MIN, SPEED_MAX);
    }

    /// Look-at transform from the eye toward `eye + view_dir`.
    pub fn view_transform(&self) -> Transform {
        Transform::from_translation(self.eye).looking_at(self.eye + self.view_dir, self.up)
    }

    /// Restore the exact initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    #[test]
    fn test_orthonormal_after_rotation_sequence() {
        let mut cam = FlightCamera::default();
        for i in 0..200 {
            cam.apply_roll(3.7);
            cam.apply_pitch(if i % 2 == 0 { 5.1 } else { -2.3 });
            cam.advance();
        }
        assert!((cam.view_dir.length() - 1.0).abs() < TOL);
        assert!((cam.up.length() - 1.0).abs() < TOL);
        assert!(cam.view_dir.dot(cam.up).abs() < TOL);
    }

    #[test]
    fn test_pitch_round_trip_restores_view_dir() {
        let mut cam = FlightCamera::default();
        let original = cam.view_dir;
        cam.apply_pitch(90.0);
        cam.apply_pitch(90.0);
        cam.apply_pitch(-180.0);
        assert!((cam.view_dir - original).length() < TOL);
    }

    #[test]
    fn test_roll_leaves_view_dir_fixed() {
        let mut cam = FlightCamera::default();
        let original = cam.view_dir;
        cam.apply_roll(47.0);
        assert!((cam.view_dir - original).length() < TOL);
        // Up actually rotated.
        assert!((cam.up - CAMERA_UP).length() > 0.1);
    }

    #[test]
    fn test_speed_stays_clamped() {
        let mut cam = FlightCamera::default();
        for _ in 0..100 {
            cam.adjust_speed(1);
        }
        assert_eq!(cam.speed_factor, SPEED_MAX);
        for _ in 0..100 {
            cam.adjust_speed(-1);
        }
        assert_eq!(cam.speed_factor, SPEED_MIN);
    }

    #[test]
    fn test_advance_moves_along_view_dir() {
        let mut cam = FlightCamera::default();
        let before = cam.eye;
        cam.advance();
        assert!((cam.eye - (before + cam.view_dir * SPEED_MIN)).length() < TOL);
    }

    #[test]
    fn test_integrate_frame_consumes_pending_degrees() {
        let mut cam = FlightCamera::default();
        cam.roll_degrees = 10.0;
        cam.pitch_degrees = -5.0;
        cam.integrate_frame();
        assert_eq!(cam.roll_degrees, 0.0);
        assert_eq!(cam.pitch_degrees, 0.0);

        // A second frame with no new input must not rotate further.
        let up_after_first = cam.up;
        cam.integrate_frame();
        assert!((cam.up - up_after_first).length() < TOL);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut cam = FlightCamera::default();
        cam.roll_degrees = 2.0;
        cam.pitch_degrees = 1.0;
        cam.adjust_speed(3);
        cam.integrate_frame();
        cam.reset();
        assert_eq!(cam, FlightCamera::default());
    }

    #[test]
    fn test_view_transform_looks_along_view_dir() {
        let cam = FlightCamera::default();
        let t = cam.view_transform();
        assert!((t.translation - CAMERA_EYE).length() < TOL);
        let forward: Vec3 = t.forward().into();
        assert!((forward - cam.view_dir).length() < TOL);
    }
}
