//! Cube-to-sphere projection
//!
//! Maps a point on the surface of the `[0, resolution]^3` cube grid onto the
//! unit sphere with Nowell's per-axis warp:
//!
//! ```text
//! sx = x * sqrt(1 - y²/2 - z²/2 + y²z²/3)
//! sy = y * sqrt(1 - x²/2 - z²/2 + x²z²/3)
//! sz = z * sqrt(1 - x²/2 - y²/2 + x²y²/3)
//! ```
//!
//! Naive normalization crowds cells near the cube corners; this warp keeps
//! grid cells close to equal area.

use glam::Vec3;

/// Project a cube-grid point onto the unit sphere
///
/// `point` is expressed in cube-grid units (`[0, resolution]` per axis) and
/// must lie on one of the six cube faces. The result doubles as the vertex
/// normal. The arithmetic order is fixed so results are reproducible.
#[inline]
pub fn project(point: Vec3, resolution: f32) -> Vec3 {
    let v = point * 2.0 / resolution - Vec3::ONE;
    let x2 = v.x * v.x;
    let y2 = v.y * v.y;
    let z2 = v.z * v.z;

    Vec3::new(
        v.x * (1.0 - y2 / 2.0 - z2 / 2.0 + y2 * z2 / 3.0).sqrt(),
        v.y * (1.0 - x2 / 2.0 - z2 / 2.0 + x2 * z2 / 3.0).sqrt(),
        v.z * (1.0 - x2 / 2.0 - y2 / 2.0 + x2 * y2 / 3.0).sqrt(),
    )
}
