//! Fault-displacement heightfield mesh.
//!
//! Builds a regular (div+1) x (div+1) lattice over a bounding rectangle,
//! displaces it with repeated random fault planes, then computes smooth
//! per-vertex normals, elevation bounds, and a wireframe edge list. The
//! mesh is immutable after generation; regeneration produces a whole new
//! `Heightfield` that the renderer swaps in atomically.

use std::fmt;

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::{FAULT_DELTA, FAULT_ITERATIONS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur constructing a heightfield.
///
/// Construction failure is reported synchronously to the caller; the
/// generator never substitutes default geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightfieldError {
    /// `div` must be at least 1 (a single grid cell).
    InvalidSubdivisions(u32),
    /// The bounding rectangle has zero area on at least one axis, which
    /// would make the grid step degenerate.
    DegenerateBounds {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },
}

impl fmt::Display for HeightfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightfieldError::InvalidSubdivisions(div) => {
                write!(f, "subdivision count must be >= 1, got {div}")
            }
            HeightfieldError::DegenerateBounds {
                min_x,
                max_x,
                min_y,
                max_y,
            } => write!(
                f,
                "degenerate bounds: x [{min_x}, {max_x}], y [{min_y}, {max_y}]"
            ),
        }
    }
}

impl std::error::Error for HeightfieldError {}

// ---------------------------------------------------------------------------
// Fault schedule
// ---------------------------------------------------------------------------

/// Fault displacement schedule: how many random fault planes to apply and
/// how far each one raises/lowers the terrain.
#[derive(Debug, Clone, Copy)]
pub struct FaultParams {
    pub iterations: u32,
    pub delta: f32,
}

impl Default for FaultParams {
    fn default() -> Self {
        Self {
            iterations: FAULT_ITERATIONS,
            delta: FAULT_DELTA,
        }
    }
}

// ---------------------------------------------------------------------------
// Heightfield
// ---------------------------------------------------------------------------

/// A generated terrain mesh: vertex positions and normals, triangle and
/// wireframe-edge index lists, and elevation bounds.
///
/// Vertices are laid out row-major, index `i * (div + 1) + j` for row `i`
/// (along y) and column `j` (along x). Each grid cell contributes two
/// triangles with consistent winding.
#[derive(Debug, Clone)]
pub struct Heightfield {
    div: u32,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    triangle_indices: Vec<u32>,
    edge_indices: Vec<u32>,
    min_z: f32,
    max_z: f32,
}

impl Heightfield {
    /// Generate a heightfield with the default fault schedule.
    pub fn generate(
        div: u32,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self, HeightfieldError> {
        Self::generate_with(div, min_x, max_x, min_y, max_y, &FaultParams::default(), rng)
    }

    /// Generate a heightfield with an explicit fault schedule.
    pub fn generate_with(
        div: u32,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        faults: &FaultParams,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self, HeightfieldError> {
        if div < 1 {
            return Err(HeightfieldError::InvalidSubdivisions(div));
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(HeightfieldError::DegenerateBounds {
                min_x,
                max_x,
                min_y,
                max_y,
            });
        }

        let side = (div + 1) as usize;
        let dx = (max_x - min_x) / div as f32;
        let dy = (max_y - min_y) / div as f32;

        // Flat lattice at z = 0.
        let mut positions = Vec::with_capacity(side * side);
        for i in 0..side {
            for j in 0..side {
                positions.push([min_x + j as f32 * dx, min_y + i as f32 * dy, 0.0]);
            }
        }

        // Two triangles per cell. The shared diagonal runs from the cell's
        // (j+1, i) corner to its (j, i+1) corner.
        let mut triangle_indices = Vec::with_capacity(6 * (div * div) as usize);
        for i in 0..div {
            for j in 0..div {
                let vid = i * (div + 1) + j;
                triangle_indices.extend_from_slice(&[vid, vid + 1, vid + div + 1]);
                triangle_indices.extend_from_slice(&[vid + 1, vid + div + 2, vid + div + 1]);
            }
        }

        apply_faults(&mut positions, min_x, max_x, min_y, max_y, faults, rng);

        let normals = compute_vertex_normals(&positions, &triangle_indices);
        let (min_z, max_z) = elevation_bounds(&positions);
        let edge_indices = derive_edge_list(&triangle_indices);

        Ok(Self {
            div,
            positions,
            normals,
            triangle_indices,
            edge_indices,
            min_z,
            max_z,
        })
    }

    pub fn div(&self) -> u32 {
        self.div
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    /// Directed edge index pairs, three per face, duplicates retained.
    /// Only used for line-mode rendering, so deduplication buys nothing.
    pub fn edge_indices(&self) -> &[u32] {
        &self.edge_indices
    }

    pub fn min_z(&self) -> f32 {
        self.min_z
    }

    pub fn max_z(&self) -> f32 {
        self.max_z
    }
}

/// Displace the lattice with random fault planes.
///
/// Each iteration picks a random point inside the bounds and a random unit
/// direction in the XY plane; every vertex on the facing side of that line
/// is raised by `delta`, every other vertex lowered. One iteration creates
/// a single linear fault; repeated faults accumulate into rolling hills.
fn apply_faults(
    positions: &mut [[f32; 3]],
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
    faults: &FaultParams,
    rng: &mut ChaCha8Rng,
) {
    for _ in 0..faults.iterations {
        let px = rng.gen_range(min_x..max_x);
        let py = rng.gen_range(min_y..max_y);
        let angle = rng.gen_range(0.0_f32..360.0).to_radians();
        let fault_dir = Vec2::new(angle.cos(), angle.sin());

        for p in positions.iter_mut() {
            let offset = Vec2::new(p[0] - px, p[1] - py);
            if offset.dot(fault_dir) >= 0.0 {
                p[2] += faults.delta;
            } else {
                p[2] -= faults.delta;
            }
        }
    }
}

/// Area-weighted smooth vertex normals.
///
/// Face normals are left unnormalized when accumulated (magnitude is
/// proportional to face area, so larger faces weigh more), then each
/// vertex sum is normalized. A vertex touching zero faces keeps a zero
/// vector rather than going NaN.
fn compute_vertex_normals(positions: &[[f32; 3]], triangle_indices: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for tri in triangle_indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let va = Vec3::from(positions[a]);
        let vb = Vec3::from(positions[b]);
        let vc = Vec3::from(positions[c]);
        let face_normal = (vb - va).cross(vc - va);

        sums[a] += face_normal;
        sums[b] += face_normal;
        sums[c] += face_normal;
    }

    sums.iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

/// Single scan for min/max elevation, primed from the first vertex so the
/// result is correct whatever range the faults produced.
fn elevation_bounds(positions: &[[f32; 3]]) -> (f32, f32) {
    let first = positions[0][2];
    positions.iter().fold((first, first), |(lo, hi), p| {
        (lo.min(p[2]), hi.max(p[2]))
    })
}

/// Emit the three directed edges of every face as index pairs.
fn derive_edge_list(triangle_indices: &[u32]) -> Vec<u32> {
    let mut edges = Vec::with_capacity(triangle_indices.len() * 2);
    for tri in triangle_indices.chunks_exact(3) {
        edges.extend_from_slice(&[tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]]);
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_vertex_and_face_counts() {
        for div in [1, 2, 7, 100] {
            let hf =
                Heightfield::generate(div, -0.8, 0.8, -0.8, 0.8, &mut rng(1)).unwrap();
            let side = (div + 1) as usize;
            assert_eq!(hf.vertex_count(), side * side);
            assert_eq!(hf.face_count(), 2 * (div * div) as usize);
            assert_eq!(hf.edge_indices().len(), 6 * hf.face_count());
        }
    }

    #[test]
    fn test_normals_unit_length() {
        let hf = Heightfield::generate(32, -0.8, 0.8, -0.8, 0.8, &mut rng(7)).unwrap();
        for n in hf.normals() {
            let len = Vec3::from(*n).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }

    #[test]
    fn test_elevation_bounds_envelope() {
        let hf = Heightfield::generate(32, -0.8, 0.8, -0.8, 0.8, &mut rng(3)).unwrap();
        for p in hf.positions() {
            assert!(hf.min_z() <= p[2] && p[2] <= hf.max_z(), "z {} outside bounds", p[2]);
        }
        assert!(hf.min_z() < hf.max_z(), "150 faults should displace the grid");
    }

    #[test]
    fn test_zero_iterations_yields_flat_grid() {
        let faults = FaultParams {
            iterations: 0,
            delta: FAULT_DELTA,
        };
        let hf =
            Heightfield::generate_with(2, -1.0, 1.0, -1.0, 1.0, &faults, &mut rng(9)).unwrap();

        assert_eq!(hf.vertex_count(), 9);
        assert_eq!(hf.face_count(), 8);
        for p in hf.positions() {
            assert_eq!(p[2], 0.0);
        }
        for n in hf.normals() {
            assert_eq!(*n, [0.0, 0.0, 1.0]);
        }
        assert_eq!(hf.min_z(), 0.0);
        assert_eq!(hf.max_z(), 0.0);
    }

    #[test]
    fn test_grid_positions_regular() {
        let faults = FaultParams {
            iterations: 0,
            delta: FAULT_DELTA,
        };
        let hf =
            Heightfield::generate_with(2, -1.0, 1.0, -1.0, 1.0, &faults, &mut rng(9)).unwrap();
        // Row-major: row 0 spans x at y = -1.
        assert_eq!(hf.positions()[0], [-1.0, -1.0, 0.0]);
        assert_eq!(hf.positions()[1], [0.0, -1.0, 0.0]);
        assert_eq!(hf.positions()[2], [1.0, -1.0, 0.0]);
        assert_eq!(hf.positions()[3], [-1.0, 0.0, 0.0]);
        assert_eq!(hf.positions()[8], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = Heightfield::generate(16, -0.8, 0.8, -0.8, 0.8, &mut rng(42)).unwrap();
        let b = Heightfield::generate(16, -0.8, 0.8, -0.8, 0.8, &mut rng(42)).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.normals(), b.normals());

        let c = Heightfield::generate(16, -0.8, 0.8, -0.8, 0.8, &mut rng(43)).unwrap();
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn test_invalid_subdivisions_rejected() {
        let err = Heightfield::generate(0, -0.8, 0.8, -0.8, 0.8, &mut rng(1)).unwrap_err();
        assert_eq!(err, HeightfieldError::InvalidSubdivisions(0));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let err = Heightfield::generate(4, 0.5, 0.5, -0.8, 0.8, &mut rng(1)).unwrap_err();
        assert!(matches!(err, HeightfieldError::DegenerateBounds { .. }));

        let err = Heightfield::generate(4, -0.8, 0.8, 0.2, -0.2, &mut rng(1)).unwrap_err();
        assert!(matches!(err, HeightfieldError::DegenerateBounds { .. }));
    }

    #[test]
    fn test_edge_list_mirrors_faces() {
        let hf = Heightfield::generate(2, -1.0, 1.0, -1.0, 1.0, &mut rng(5)).unwrap();
        let tris = hf.triangle_indices();
        let edges = hf.edge_indices();
        // First face (0, 1, 3) -> edges (0,1), (1,3), (3,0).
        assert_eq!(&tris[..3], &[0, 1, 3]);
        assert_eq!(&edges[..6], &[0, 1, 1, 3, 3, 0]);
    }

    #[test]
    fn test_fault_displacement_moves_whole_columns() {
        // A single fault splits the grid into a raised and a lowered half,
        // so every vertex sits at exactly +delta or -delta.
        let faults = FaultParams {
            iterations: 1,
            delta: FAULT_DELTA,
        };
        let hf =
            Heightfield::generate_with(8, -0.8, 0.8, -0.8, 0.8, &faults, &mut rng(11)).unwrap();
        let mut raised = 0;
        let mut lowered = 0;
        for p in hf.positions() {
            if p[2] == FAULT_DELTA {
                raised += 1;
            } else if p[2] == -FAULT_DELTA {
                lowered += 1;
            } else {
                panic!("vertex z {} is not +/-delta after one fault", p[2]);
            }
        }
        assert_eq!(raised + lowered, hf.vertex_count());
    }
}
