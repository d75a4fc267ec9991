//! Display mode and fog state.
//!
//! The draw mode is an explicit resource set from key presses and cached
//! here, never re-derived from any UI state. Solid shows the lit surface,
//! Wireframe shows white edges alone, SolidPlusEdges overlays black edges
//! on the lit surface.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::terrain_render::{TerrainEdges, TerrainSurface};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Solid,
    Wireframe,
    SolidPlusEdges,
}

/// Whether distance fog is applied to the flight camera.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FogState {
    pub enabled: bool,
}

pub fn display_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<DisplayMode>,
    mut fog: ResMut<FogState>,
) {
    if keys.just_pressed(KeyCode::Digit1) {
        *mode = DisplayMode::Solid;
    }
    if keys.just_pressed(KeyCode::Digit2) {
        *mode = DisplayMode::Wireframe;
    }
    if keys.just_pressed(KeyCode::Digit3) {
        *mode = DisplayMode::SolidPlusEdges;
    }
    if keys.just_pressed(KeyCode::KeyF) {
        fog.enabled = !fog.enabled;
        info!("fog {}", if fog.enabled { "on" } else { "off" });
    }
}

/// System: apply the cached display mode to the terrain entities.
#[allow(clippy::type_complexity)]
pub fn apply_display_mode(
    mode: Res<DisplayMode>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut surfaces: Query<
        &mut Visibility,
        (With<TerrainSurface>, Without<TerrainEdges>),
    >,
    mut edges: Query<
        (&mut Visibility, &MeshMaterial3d<StandardMaterial>),
        (With<TerrainEdges>, Without<TerrainSurface>),
    >,
) {
    if !mode.is_changed() {
        return;
    }

    let (surface_visible, edges_visible, edge_color) = match *mode {
        DisplayMode::Solid => (Visibility::Visible, Visibility::Hidden, Color::BLACK),
        DisplayMode::Wireframe => (Visibility::Hidden, Visibility::Visible, Color::WHITE),
        DisplayMode::SolidPlusEdges => (Visibility::Visible, Visibility::Visible, Color::BLACK),
    };

    for mut visibility in &mut surfaces {
        *visibility = surface_visible;
    }
    for (mut visibility, material_handle) in &mut edges {
        *visibility = edges_visible;
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = edge_color;
        }
    }
}

/// System: add or remove the `DistanceFog` component on the camera when
/// the fog toggle changes. Linear falloff spanning the terrain depth.
pub fn apply_fog(
    fog: Res<FogState>,
    mut commands: Commands,
    cameras: Query<Entity, With<Camera3d>>,
) {
    if !fog.is_changed() {
        return;
    }

    for entity in &cameras {
        if fog.enabled {
            commands.entity(entity).insert(DistanceFog {
                color: Color::srgba(0.85, 0.87, 0.90, 1.0),
                falloff: FogFalloff::Linear {
                    start: 0.5,
                    end: 3.5,
                },
                ..default()
            });
        } else {
            commands.entity(entity).remove::<DistanceFog>();
        }
    }
}
