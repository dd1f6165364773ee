//! The six cube faces and their fixed axis permutations
//!
//! Every face maps its two free grid axes `(u, v)` onto two of the three cube
//! axes and pins the remaining axis at `0` or `resolution`. The mesh builder
//! and the texture synthesizer both read the same table, so a grid point and a
//! texel with equal face coordinates always land on the same cube point.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cube axis
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// Component index of this axis in a `Vec3`
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Axis permutation for one face
///
/// `(p01 - p00) x (p10 - p00)` points outward for every entry, i.e.
/// `v_axis x u_axis` is the outward normal of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceDescriptor {
    /// Cube axis driven by the horizontal face coordinate (UV `u`)
    pub u_axis: Axis,
    /// Cube axis driven by the vertical face coordinate (UV `v`)
    pub v_axis: Axis,
    /// Cube axis held constant over the face
    pub fixed_axis: Axis,
    /// Whether the fixed axis sits at `resolution` (true) or `0` (false)
    pub fixed_at_max: bool,
}

impl FaceDescriptor {
    /// Place face coordinates `(u, v)`, in cube-grid units, onto the cube surface
    #[inline]
    pub fn cube_point(&self, u: f32, v: f32, resolution: f32) -> Vec3 {
        let mut point = [0.0_f32; 3];
        point[self.u_axis.index()] = u;
        point[self.v_axis.index()] = v;
        point[self.fixed_axis.index()] = if self.fixed_at_max { resolution } else { 0.0 };
        Vec3::from_array(point)
    }
}

const FACE_TABLE: [FaceDescriptor; 6] = [
    // +X
    FaceDescriptor { u_axis: Axis::Z, v_axis: Axis::Y, fixed_axis: Axis::X, fixed_at_max: true },
    // -X
    FaceDescriptor { u_axis: Axis::Y, v_axis: Axis::Z, fixed_axis: Axis::X, fixed_at_max: false },
    // +Y
    FaceDescriptor { u_axis: Axis::X, v_axis: Axis::Z, fixed_axis: Axis::Y, fixed_at_max: true },
    // -Y
    FaceDescriptor { u_axis: Axis::Z, v_axis: Axis::X, fixed_axis: Axis::Y, fixed_at_max: false },
    // +Z
    FaceDescriptor { u_axis: Axis::Y, v_axis: Axis::X, fixed_axis: Axis::Z, fixed_at_max: true },
    // -Z
    FaceDescriptor { u_axis: Axis::X, v_axis: Axis::Y, fixed_axis: Axis::Z, fixed_at_max: false },
];

/// The six faces of the cube-sphere, in face-id order
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in face-id order
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Face id in `0..6`
    #[inline]
    pub fn id(self) -> usize {
        self as usize
    }

    /// Look up a face by id, `None` outside `0..6`
    pub fn from_id(id: usize) -> Option<CubeFace> {
        Self::ALL.get(id).copied()
    }

    /// Axis permutation used by this face
    #[inline]
    pub fn descriptor(self) -> &'static FaceDescriptor {
        &FACE_TABLE[self.id()]
    }

    /// Outward unit normal of the flat cube face
    pub fn normal(self) -> Vec3 {
        let d = self.descriptor();
        if d.fixed_at_max {
            d.fixed_axis.unit()
        } else {
            -d.fixed_axis.unit()
        }
    }
}
