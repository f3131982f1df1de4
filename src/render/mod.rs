//! The geometry/rendering collaborator of the pipeline.
//!
//! The pipeline never touches mesh files, slicing or pixels itself: it goes
//! through [`SliceBackend`], which owns those concerns. [`RasterBackend`]
//! is the implementation shipped with the crate; tests drive the pipeline
//! with a recording fake instead.

use crate::aabb::Aabb;
use crate::errors::Result;
use crate::mesh::{Mesh, slice::Contour};
use crate::planner::CuttingPlane;
use std::path::Path;

pub mod raster;
pub mod view;

pub use raster::RasterBackend;
pub use view::{Camera, View};

/// Geometry the view can fit its camera to.
pub trait Bounded {
    /// `None` when there is nothing to show.
    fn bounds(&self) -> Option<Aabb>;
}

impl Bounded for Mesh {
    fn bounds(&self) -> Option<Aabb> {
        self.bounding_box()
    }
}

impl Bounded for Contour {
    fn bounds(&self) -> Option<Aabb> {
        self.bounding_box()
    }
}

/// Mesh loading, slicing and drawing, behind one narrow interface.
pub trait SliceBackend {
    type Mesh: Bounded;
    type Contour: Bounded;

    /// Load a surface mesh from disk.
    fn load_mesh(&mut self, path: &Path) -> Result<Self::Mesh>;

    /// Intersect `mesh` with `plane`; a miss is an empty contour, not an error.
    fn slice(&mut self, mesh: &Self::Mesh, plane: &CuttingPlane) -> Self::Contour;

    /// Draw the current view state.
    fn render(&mut self, view: &View<Self::Mesh, Self::Contour>) -> Result<()>;

    /// Write the view to `path` as a `width` x `height` image.
    fn snapshot(
        &mut self,
        view: &View<Self::Mesh, Self::Contour>,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<()>;
}
