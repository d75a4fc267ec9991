//! Elevation color ramp baked into terrain vertex colors.
//!
//! The ramp is defined in sRGB space as evenly-spaced control points and
//! interpolated linearly for intermediate values; the renderer samples it
//! at the normalized elevation of every vertex.

use bevy::prelude::*;

/// A continuous color ramp defined by evenly-spaced sRGB control points.
/// Interpolates linearly in sRGB space for a given `t` in `[0, 1]`.
pub struct ColorRamp {
    /// Control points as `[r, g, b]` in sRGB, evenly spaced from t=0..1.
    points: &'static [[f32; 3]],
}

impl ColorRamp {
    /// Sample the ramp at parameter `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let n = self.points.len();
        if n == 0 {
            return Color::BLACK;
        }
        if n == 1 {
            let p = self.points[0];
            return Color::srgb(p[0], p[1], p[2]);
        }
        let max_idx = (n - 1) as f32;
        let scaled = t * max_idx;
        let lo = (scaled as usize).min(n - 2);
        let hi = lo + 1;
        let frac = scaled - lo as f32;
        let a = self.points[lo];
        let b = self.points[hi];
        Color::srgb(
            a[0] + (b[0] - a[0]) * frac,
            a[1] + (b[1] - a[1]) * frac,
            a[2] + (b[2] - a[2]) * frac,
        )
    }

    /// Sample the ramp and return as an `[f32; 4]` RGBA array (alpha = 1).
    pub fn sample_rgba(&self, t: f32) -> [f32; 4] {
        let c = self.sample(t);
        let s = c.to_srgba();
        [s.red, s.green, s.blue, 1.0]
    }
}

/// Low valleys through prairie grass up to bare rock and snow caps.
/// Anchored on the central-Illinois tan (205, 163, 63) in the midrange.
pub static TERRAIN: ColorRamp = ColorRamp {
    points: &[
        [0.18, 0.32, 0.16], // valley floor - dark grass
        [0.35, 0.45, 0.22],
        [0.60, 0.55, 0.30],
        [0.80, 0.64, 0.25], // midland tan
        [0.62, 0.50, 0.40],
        [0.55, 0.52, 0.50], // rock
        [0.95, 0.95, 0.97], // snow
    ],
};
