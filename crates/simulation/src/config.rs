use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Terrain generation
// ---------------------------------------------------------------------------

/// Subdivisions per axis of the terrain lattice: (div+1)^2 vertices.
pub const TERRAIN_DIV: u32 = 100;
pub const TERRAIN_MIN_X: f32 = -0.8;
pub const TERRAIN_MAX_X: f32 = 0.8;
pub const TERRAIN_MIN_Y: f32 = -0.8;
pub const TERRAIN_MAX_Y: f32 = 0.8;

/// Number of random fault planes accumulated into the heightfield.
pub const FAULT_ITERATIONS: u32 = 150;
/// Elevation delta applied on each side of a fault line.
pub const FAULT_DELTA: f32 = 0.0037;

// ---------------------------------------------------------------------------
// Flight camera
// ---------------------------------------------------------------------------

pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, -0.1, -0.6);
pub const CAMERA_VIEW_DIR: Vec3 = Vec3::new(0.0, 0.0, -1.0);
pub const CAMERA_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub const SPEED_MIN: f32 = 0.001;
pub const SPEED_MAX: f32 = 0.006;
pub const SPEED_STEP: f32 = 0.001;

/// Degrees of roll/pitch accumulated per input tick while a key is held.
pub const ROLL_STEP_DEGREES: f32 = 0.05;
pub const PITCH_STEP_DEGREES: f32 = 0.05;

// ---------------------------------------------------------------------------
// Scene placement
// ---------------------------------------------------------------------------

/// World-space offset of the terrain patch in front of the starting camera.
pub const TERRAIN_TRANSLATION: Vec3 = Vec3::new(0.0, -0.5, -2.1);
/// Tilt of the terrain patch toward the viewer, in degrees about X.
pub const TERRAIN_TILT_DEGREES: f32 = -75.0;
