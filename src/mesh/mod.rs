//! `Mesh` struct: the triangulated surface that gets sliced and drawn.

use crate::aabb::Aabb;
use crate::centerline::file_label;
use crate::errors::{Result, SliceError};
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};
use std::path::Path;
use std::sync::OnceLock;

pub mod plane;
pub mod slice;
pub mod tube;

/// Triangle soup as read from an STL file.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Triangles with counter-clockwise winding seen from outside.
    pub triangles: Vec<[Point3<Real>; 3]>,

    /// Lazily calculated AABB that spans `triangles`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a Mesh from an existing triangle list
    pub fn from_triangles(triangles: Vec<[Point3<Real>; 3]>) -> Self {
        Self { triangles, bounding_box: OnceLock::new() }
    }

    /// Read an STL file (binary or ASCII).
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SliceError::MissingFile { name: file_label(path), path: path.to_path_buf() }
            } else {
                SliceError::Stl { path: path.to_path_buf(), source }
            }
        })?;
        let mesh = Self::from_stl(&bytes)
            .map_err(|source| SliceError::Stl { path: path.to_path_buf(), source })?;
        log::info!("loaded {} triangle(s) from {}", mesh.len(), path.display());
        Ok(mesh)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box of all triangles, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        if self.triangles.is_empty() {
            return None;
        }
        let aabb = self.bounding_box.get_or_init(|| {
            let first = self.triangles[0][0];
            let mut aabb = Aabb::new(first, first);
            for tri in &self.triangles {
                for p in tri {
                    aabb.grow(p);
                }
            }
            aabb
        });
        Some(*aabb)
    }

    /// Invalidates the cached bounding box; call after editing `triangles`.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Unit face normal from the winding order; zero for degenerate triangles.
    pub fn face_normal(tri: &[Point3<Real>; 3]) -> Vector3<Real> {
        let n = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
        n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros)
    }
}
