//! Mesh generation for the cube-sphere
//!
//! Generates engine-agnostic vertex buffers for all six faces plus one
//! independent triangle index list per face, so each face can be drawn as its
//! own sub-mesh with its own texture.

use crate::error::{Result, SurfaceError};
use crate::face::CubeFace;
use crate::projection::project;
use glam::{Vec2, Vec3};

/// A single vertex of the cube-sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position on the sphere of the mesh radius
    pub position: Vec3,
    /// Unit normal (the projected sphere point)
    pub normal: Vec3,
    /// Face-local texture coordinate in `[0, 1]^2`
    pub uv: Vec2,
    /// Face owning this vertex
    pub face: CubeFace,
}

/// Vertex range owned by one face in the flat buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRange {
    /// Face owning the range
    pub face: CubeFace,
    /// First vertex of the face
    pub start: u32,
    /// Number of vertices, `(resolution + 1)^2`
    pub count: u32,
}

impl FaceRange {
    /// Check whether a vertex index belongs to this face
    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        index >= self.start && index < self.start + self.count
    }
}

/// Engine-agnostic cube-sphere mesh
///
/// Vertices on shared cube edges are duplicated per face because their UV
/// coordinates differ. Indices are absolute into the flat vertex buffers.
///
/// - Bevy: one `Mesh` with six sub-meshes or six meshes sharing attributes
/// - wgpu: upload the buffers once, draw each face's index range with its texture
#[derive(Debug, Clone)]
pub struct PlanetMesh {
    resolution: u32,
    radius: f32,
    /// Vertex positions (sphere point scaled by radius)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (unit sphere point)
    pub normals: Vec<[f32; 3]>,
    /// Face-local UV coordinates
    pub uvs: Vec<[f32; 2]>,
    faces: [FaceRange; 6],
    face_indices: [Vec<u32>; 6],
}

impl PlanetMesh {
    /// Build the cube-sphere mesh for a subdivision resolution
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `resolution < 2` or `radius` is not positive,
    /// and `Consistency` if the generated buffers break an invariant.
    pub fn build(resolution: u32, radius: f32) -> Result<Self> {
        if resolution < 2 {
            return Err(SurfaceError::InvalidConfig(format!(
                "mesh resolution must be >= 2 (got {})",
                resolution
            )));
        }
        if !(radius > 0.0) {
            return Err(SurfaceError::InvalidConfig(format!(
                "radius must be positive (got {})",
                radius
            )));
        }

        let side = resolution + 1;
        let per_face = side * side;
        let total = (per_face * 6) as usize;
        let r = resolution as f32;

        let mut positions = Vec::with_capacity(total);
        let mut normals = Vec::with_capacity(total);
        let mut uvs = Vec::with_capacity(total);
        let mut faces = [FaceRange { face: CubeFace::PosX, start: 0, count: 0 }; 6];
        let mut face_indices: [Vec<u32>; 6] = Default::default();

        for face in CubeFace::ALL {
            let descriptor = face.descriptor();
            let start = positions.len() as u32;

            // Row-major: v selects the row, u the column
            for v in 0..=resolution {
                for u in 0..=resolution {
                    let cube = descriptor.cube_point(u as f32, v as f32, r);
                    let normal = project(cube, r);
                    let position = normal * radius;

                    positions.push(position.to_array());
                    normals.push(normal.to_array());
                    uvs.push([u as f32 / r, v as f32 / r]);
                }
            }

            faces[face.id()] = FaceRange { face, start, count: per_face };
            face_indices[face.id()] = triangulate_face(start, resolution);
        }

        let mesh = Self {
            resolution,
            radius,
            positions,
            normals,
            uvs,
            faces,
            face_indices,
        };
        mesh.check_consistency()?;

        log::debug!(
            "built cube-sphere mesh: resolution {}, {} vertices, {} triangles",
            resolution,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    /// Subdivision resolution this mesh was built with
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Sphere radius of the vertex positions
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles over all faces
    pub fn triangle_count(&self) -> usize {
        self.face_indices.iter().map(|i| i.len() / 3).sum()
    }

    /// Vertex range owned by a face
    #[inline]
    pub fn face_range(&self, face: CubeFace) -> FaceRange {
        self.faces[face.id()]
    }

    /// Triangle indices of a single face
    #[inline]
    pub fn face_indices(&self, face: CubeFace) -> &[u32] {
        &self.face_indices[face.id()]
    }

    /// All six index lists concatenated in face-id order
    pub fn all_indices(&self) -> Vec<u32> {
        self.face_indices.iter().flatten().copied().collect()
    }

    /// Face owning a vertex, `None` if out of bounds
    pub fn face_of(&self, index: u32) -> Option<CubeFace> {
        self.faces.iter().find(|r| r.contains(index)).map(|r| r.face)
    }

    /// Assemble a full vertex by index
    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        let face = self.face_of(u32::try_from(index).ok()?)?;
        Some(Vertex {
            position: Vec3::from_array(self.positions[index]),
            normal: Vec3::from_array(self.normals[index]),
            uv: Vec2::from_array(self.uvs[index]),
            face,
        })
    }

    /// Verify buffer sizes and per-face index ownership
    ///
    /// # Errors
    ///
    /// Returns `Consistency` describing the first violated invariant.
    pub fn check_consistency(&self) -> Result<()> {
        let side = (self.resolution + 1) as usize;
        let expected_vertices = 6 * side * side;
        let expected_indices = (self.resolution * self.resolution * 6) as usize;

        if self.positions.len() != expected_vertices
            || self.normals.len() != self.positions.len()
            || self.uvs.len() != self.positions.len()
        {
            return Err(SurfaceError::Consistency(format!(
                "buffer sizes differ: {} positions, {} normals, {} uvs, expected {}",
                self.positions.len(),
                self.normals.len(),
                self.uvs.len(),
                expected_vertices
            )));
        }

        for face in CubeFace::ALL {
            let range = self.face_range(face);
            let indices = self.face_indices(face);
            if indices.len() != expected_indices {
                return Err(SurfaceError::Consistency(format!(
                    "{:?} has {} indices, expected {}",
                    face,
                    indices.len(),
                    expected_indices
                )));
            }
            if let Some(bad) = indices.iter().find(|&&i| !range.contains(i)) {
                return Err(SurfaceError::Consistency(format!(
                    "{:?} references vertex {} outside its range {}..{}",
                    face,
                    bad,
                    range.start,
                    range.start + range.count
                )));
            }
        }

        Ok(())
    }
}

/// Split each grid cell of one face into two triangles
///
/// Corners `v00` (bottom-left), `v10` (bottom-right), `v01` (top-left) and
/// `v11` (top-right) emit `(v00, v01, v10)` and `(v10, v01, v11)`.
fn triangulate_face(start: u32, resolution: u32) -> Vec<u32> {
    let side = resolution + 1;
    let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);

    for v in 0..resolution {
        for u in 0..resolution {
            let v00 = start + v * side + u;
            let v10 = v00 + 1;
            let v01 = v00 + side;
            let v11 = v01 + 1;

            indices.extend_from_slice(&[v00, v01, v10]);
            indices.extend_from_slice(&[v10, v01, v11]);
        }
    }

    indices
}
