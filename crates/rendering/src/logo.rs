//! Secondary demo: a flat animated block-letter logo.
//!
//! Unrelated to the terrain scene; selected at startup instead of it. A
//! block-letter "I" spins about Z at 90 degrees per second while morphing
//! between degenerate and full size, reversing direction each full turn
//! and re-randomizing part of the accent color. Tab switches to a second
//! scene where two triangle halves of a square slide apart and back. The
//! logo mesh is rebuilt every frame, mirroring a dynamic vertex buffer.

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use rand::Rng;

use simulation::SimRng;

/// Degrees of spin per second.
const SPIN_RATE: f32 = 90.0;
/// Clip-space logo coordinates scaled to pixels for the 2D camera.
const LOGO_UNIT: f32 = 400.0;

const LETTER_COLOR: Color = Color::srgb(250.0 / 255.0, 92.0 / 255.0, 0.0);

/// Block-letter "I" as a triangle list (top bar, stem, bottom bar).
#[rustfmt::skip]
const LETTER_VERTICES: [[f32; 2]; 48] = [
    // Top bar
    [-0.4,  0.3], [-0.4,  0.6], [-0.2,  0.3],
    [-0.2,  0.3], [-0.4,  0.6], [-0.2,  0.6],
    [-0.2,  0.6], [-0.2,  0.3], [ 0.2,  0.6],
    [ 0.2,  0.6], [ 0.2,  0.3], [-0.2,  0.3],
    [ 0.2,  0.3], [ 0.2,  0.6], [ 0.4,  0.6],
    [ 0.4,  0.6], [ 0.4,  0.3], [ 0.2,  0.3],
    // Stem
    [-0.2,  0.3], [-0.2,  0.0], [ 0.2,  0.3],
    [ 0.2,  0.3], [ 0.2,  0.0], [-0.2,  0.0],
    [-0.2,  0.0], [-0.2, -0.3], [ 0.2,  0.0],
    [ 0.2,  0.0], [ 0.2, -0.3], [-0.2, -0.3],
    // Bottom bar
    [-0.4, -0.3], [-0.4, -0.6], [-0.2, -0.3],
    [-0.2, -0.3], [-0.4, -0.6], [-0.2, -0.6],
    [-0.2, -0.6], [-0.2, -0.3], [ 0.2, -0.6],
    [ 0.2, -0.6], [ 0.2, -0.3], [-0.2, -0.3],
    [ 0.2, -0.3], [ 0.2, -0.6], [ 0.4, -0.6],
    [ 0.4, -0.6], [ 0.4, -0.3], [ 0.2, -0.3],
];

/// A square split along its diagonal into two sliding triangle halves.
#[rustfmt::skip]
const SQUARE_VERTICES: [[f32; 2]; 6] = [
    [-0.3, -0.3], [-0.3,  0.3], [ 0.3,  0.3],
    [ 0.3,  0.3], [ 0.3, -0.3], [-0.3, -0.3],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoScene {
    #[default]
    BlockLetter,
    SlidingSquares,
}

#[derive(Resource)]
pub struct LogoAnimation {
    /// Current spin angle in degrees, wrapped at 360.
    pub rot_degrees: f32,
    /// Spin direction; flips each full turn.
    pub reverse: bool,
    pub scene: LogoScene,
    pub color_r: f32,
    pub color_g: f32,
}

impl Default for LogoAnimation {
    fn default() -> Self {
        Self {
            rot_degrees: 0.0,
            reverse: false,
            scene: LogoScene::default(),
            color_r: 0.9,
            color_g: 0.6,
        }
    }
}

#[derive(Component)]
pub struct LogoMesh;

pub struct LogoPlugin;

impl Plugin for LogoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LogoAnimation>()
            .add_systems(Startup, setup_logo)
            .add_systems(Update, (logo_keys, animate_logo).chain());
    }
}

fn setup_logo(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);
    commands.spawn((
        Mesh2d(meshes.add(build_logo_mesh(LogoScene::BlockLetter, 1.0))),
        MeshMaterial2d(materials.add(ColorMaterial::from(LETTER_COLOR))),
        Transform::default(),
        LogoMesh,
    ));
}

/// Tab: switch between the block-letter and sliding-squares scenes.
fn logo_keys(keys: Res<ButtonInput<KeyCode>>, mut anim: ResMut<LogoAnimation>) {
    if keys.just_pressed(KeyCode::Tab) {
        anim.scene = match anim.scene {
            LogoScene::BlockLetter => LogoScene::SlidingSquares,
            LogoScene::SlidingSquares => LogoScene::BlockLetter,
        };
        anim.rot_degrees = 0.0;
        anim.reverse = false;
    }
}

#[allow(clippy::type_complexity)]
fn animate_logo(
    time: Res<Time>,
    mut anim: ResMut<LogoAnimation>,
    mut rng: ResMut<SimRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<
        (&Mesh2d, &MeshMaterial2d<ColorMaterial>, &mut Transform),
        With<LogoMesh>,
    >,
) {
    anim.rot_degrees += SPIN_RATE * time.delta_secs();
    if anim.rot_degrees > 360.0 {
        anim.rot_degrees = 0.0;
        anim.reverse = !anim.reverse;
        // Re-randomize one accent channel per turn, alternating.
        if anim.reverse {
            anim.color_g = rng.0.gen_range(0.0..0.7);
        } else {
            anim.color_r = rng.0.gen_range(0.0..0.5);
        }
    }

    let Ok((mesh_handle, material_handle, mut transform)) = query.get_single_mut() else {
        return;
    };

    let turn = anim.rot_degrees / 360.0;
    let phase = if anim.reverse { 1.0 - turn } else { turn };

    match anim.scene {
        LogoScene::BlockLetter => {
            let angle = anim.rot_degrees.to_radians();
            transform.rotation =
                Quat::from_rotation_z(if anim.reverse { -angle } else { angle });
            meshes.insert(&mesh_handle.0, build_logo_mesh(anim.scene, phase));
            if let Some(material) = materials.get_mut(&material_handle.0) {
                material.color = LETTER_COLOR;
            }
        }
        LogoScene::SlidingSquares => {
            transform.rotation = Quat::IDENTITY;
            meshes.insert(&mesh_handle.0, build_logo_mesh(anim.scene, 0.7 * phase));
            if let Some(material) = materials.get_mut(&material_handle.0) {
                material.color = Color::srgb(anim.color_r, anim.color_g, 0.3);
            }
        }
    }
}

/// Build the logo mesh for the given scene and animation parameter.
///
/// BlockLetter scales every vertex toward the origin; SlidingSquares
/// translates the two triangle halves apart along the diagonal.
pub fn build_logo_mesh(scene: LogoScene, param: f32) -> Mesh {
    let positions: Vec<[f32; 3]> = match scene {
        LogoScene::BlockLetter => LETTER_VERTICES
            .iter()
            .map(|v| [v[0] * param * LOGO_UNIT, v[1] * param * LOGO_UNIT, 0.0])
            .collect(),
        LogoScene::SlidingSquares => SQUARE_VERTICES
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let shift = if i < 3 { -param } else { param };
                [
                    (v[0] + shift) * LOGO_UNIT,
                    (v[1] + shift) * LOGO_UNIT,
                    0.0,
                ]
            })
            .collect(),
    };

    let count = positions.len() as u32;
    let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; positions.len()];
    Mesh::new(
        bevy::render::mesh::PrimitiveTopology::TriangleList,
        bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
            | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32((0..count).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_mesh_vertex_count() {
        let mesh = build_logo_mesh(LogoScene::BlockLetter, 1.0);
        assert_eq!(mesh.count_vertices(), 48);
    }

    #[test]
    fn test_letter_scale_collapses_to_origin() {
        let mesh = build_logo_mesh(LogoScene::BlockLetter, 0.0);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .expect("position attribute");
        assert!(positions.iter().all(|p| *p == [0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_square_halves_slide_apart() {
        let mesh = build_logo_mesh(LogoScene::SlidingSquares, 0.5);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .expect("position attribute");
        // First half shifted negative, second half positive.
        assert!(positions[0][0] < -0.3 * LOGO_UNIT);
        assert!(positions[3][0] > 0.3 * LOGO_UNIT);
    }
}
