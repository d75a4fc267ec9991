//! Terrain mesh upload and regeneration.
//!
//! Converts a generated `Heightfield` into two GPU meshes: a triangle-list
//! surface with elevation-ramp vertex colors, and a line-list wireframe
//! built from the edge index list. Both are spawned once at startup and
//! swapped wholesale when the terrain is regenerated.

use bevy::prelude::*;
use bevy::render::mesh::Indices;

use simulation::config::{
    TERRAIN_DIV, TERRAIN_MAX_X, TERRAIN_MAX_Y, TERRAIN_MIN_X, TERRAIN_MIN_Y,
    TERRAIN_TILT_DEGREES, TERRAIN_TRANSLATION,
};
use simulation::{Heightfield, SimRng};

use crate::color_ramps;

/// Marks the solid terrain surface entity.
#[derive(Component)]
pub struct TerrainSurface;

/// Marks the wireframe edge-list entity.
#[derive(Component)]
pub struct TerrainEdges;

/// Terrain diffuse tint under the vertex-color ramp (central-Illinois tan).
const SURFACE_BASE_COLOR: Color = Color::srgb(205.0 / 255.0, 163.0 / 255.0, 63.0 / 255.0);

pub fn spawn_terrain(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let heightfield = match Heightfield::generate(
        TERRAIN_DIV,
        TERRAIN_MIN_X,
        TERRAIN_MAX_X,
        TERRAIN_MIN_Y,
        TERRAIN_MAX_Y,
        &mut rng.0,
    ) {
        Ok(hf) => hf,
        Err(err) => {
            error!("terrain generation failed: {err}");
            return;
        }
    };
    info!(
        "terrain: {} vertices, {} faces, z range [{:.4}, {:.4}]",
        heightfield.vertex_count(),
        heightfield.face_count(),
        heightfield.min_z(),
        heightfield.max_z(),
    );

    let transform = terrain_transform();

    commands.spawn((
        Mesh3d(meshes.add(build_surface_mesh(&heightfield))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: SURFACE_BASE_COLOR,
            perceptual_roughness: 0.9,
            ..default()
        })),
        transform,
        TerrainSurface,
    ));

    commands.spawn((
        Mesh3d(meshes.add(build_edge_mesh(&heightfield))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK,
            unlit: true,
            ..default()
        })),
        transform,
        TerrainEdges,
        Visibility::Hidden,
    ));
}

/// G key: replace the terrain with a freshly generated heightfield.
///
/// Both replacement meshes are built in full before either asset is
/// touched, so a frame only ever observes the old terrain or the new one.
pub fn regenerate_terrain(
    keys: Res<ButtonInput<KeyCode>>,
    mut rng: ResMut<SimRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    surface: Query<&Mesh3d, With<TerrainSurface>>,
    edges: Query<&Mesh3d, (With<TerrainEdges>, Without<TerrainSurface>)>,
) {
    if !keys.just_pressed(KeyCode::KeyG) {
        return;
    }

    let heightfield = match Heightfield::generate(
        TERRAIN_DIV,
        TERRAIN_MIN_X,
        TERRAIN_MAX_X,
        TERRAIN_MIN_Y,
        TERRAIN_MAX_Y,
        &mut rng.0,
    ) {
        Ok(hf) => hf,
        Err(err) => {
            warn!("terrain regeneration failed, keeping current mesh: {err}");
            return;
        }
    };

    let surface_mesh = build_surface_mesh(&heightfield);
    let edge_mesh = build_edge_mesh(&heightfield);

    if let Ok(handle) = surface.get_single() {
        meshes.insert(&handle.0, surface_mesh);
    }
    if let Ok(handle) = edges.get_single() {
        meshes.insert(&handle.0, edge_mesh);
    }
    info!(
        "regenerated terrain, z range [{:.4}, {:.4}]",
        heightfield.min_z(),
        heightfield.max_z()
    );
}

/// Scene placement shared by both terrain entities: pushed away from the
/// starting camera and tilted toward the viewer.
fn terrain_transform() -> Transform {
    Transform::from_translation(TERRAIN_TRANSLATION)
        .with_rotation(Quat::from_rotation_x(TERRAIN_TILT_DEGREES.to_radians()))
}

pub fn build_surface_mesh(heightfield: &Heightfield) -> Mesh {
    let positions: Vec<[f32; 3]> = heightfield.positions().to_vec();
    let normals: Vec<[f32; 3]> = heightfield.normals().to_vec();

    // Elevation ramp baked into vertex colors; the shader-side fog and
    // lighting run against these.
    let span = (heightfield.max_z() - heightfield.min_z()).max(f32::EPSILON);
    let colors: Vec<[f32; 4]> = heightfield
        .positions()
        .iter()
        .map(|p| color_ramps::TERRAIN.sample_rgba((p[2] - heightfield.min_z()) / span))
        .collect();

    let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; positions.len()];
    Mesh::new(
        bevy::render::mesh::PrimitiveTopology::TriangleList,
        bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
            | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(heightfield.triangle_indices().to_vec()))
}

pub fn build_edge_mesh(heightfield: &Heightfield) -> Mesh {
    let positions: Vec<[f32; 3]> = heightfield.positions().to_vec();
    let normals: Vec<[f32; 3]> = heightfield.normals().to_vec();

    Mesh::new(
        bevy::render::mesh::PrimitiveTopology::LineList,
        bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
            | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U32(heightfield.edge_indices().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn heightfield() -> Heightfield {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        Heightfield::generate(8, -0.8, 0.8, -0.8, 0.8, &mut rng).unwrap()
    }

    #[test]
    fn test_surface_mesh_buffers_match_heightfield() {
        let hf = heightfield();
        let mesh = build_surface_mesh(&hf);
        assert_eq!(mesh.count_vertices(), hf.vertex_count());
        match mesh.indices() {
            Some(Indices::U32(idx)) => assert_eq!(idx.len(), 3 * hf.face_count()),
            other => panic!("expected u32 indices, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_mesh_index_count() {
        let hf = heightfield();
        let mesh = build_edge_mesh(&hf);
        match mesh.indices() {
            Some(Indices::U32(idx)) => assert_eq!(idx.len(), 6 * hf.face_count()),
            other => panic!("expected u32 indices, got {other:?}"),
        }
    }
}
