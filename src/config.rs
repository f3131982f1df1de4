//! Compiled-in constants and the run configuration built from them.
//!
//! There is no configuration file: colors, widths, the snapshot stride and
//! resolution are constants. [`PipelineConfig`] gathers
//! them (plus the input/output locations) into one value handed to the
//! pipeline driver, so tests and the CLI can override individual fields.

use crate::errors::{Result, SliceError};
use crate::float_types::Real;
use std::path::{Path, PathBuf};

/// Contour color of the first mesh (red-toned).
pub const EDGE_COLOR_1: [Real; 3] = [1.0, 0.2, 0.1];
/// Contour line width of the first mesh, in pixels.
pub const EDGE_WIDTH_1: Real = 3.0;
/// Contour color of the second mesh (blue-toned).
pub const EDGE_COLOR_2: [Real; 3] = [0.1, 0.3, 1.0];
/// Contour line width of the second mesh, in pixels.
pub const EDGE_WIDTH_2: Real = 3.0;
/// Opacity of the dimmed background surfaces.
pub const SURFACE_OPACITY: Real = 0.25;
/// Base color of the background surfaces.
pub const SURFACE_COLOR: [Real; 3] = [0.75, 0.75, 0.75];
/// View background.
pub const BACKGROUND_COLOR: [Real; 3] = [1.0, 1.0, 1.0];

/// Only every `SNAPSHOT_STRIDE`-th segment index is written to disk.
pub const SNAPSHOT_STRIDE: usize = 10;
pub const SNAPSHOT_WIDTH: u32 = 800;
pub const SNAPSHOT_HEIGHT: u32 = 800;
/// Output subdirectory, relative to the base directory.
pub const OUTPUT_DIR_NAME: &str = "slices";

pub const MESH_FILE_1: &str = "input.stl";
pub const MESH_FILE_2: &str = "input2.stl";
pub const CENTERLINE_FILE: &str = "centerline.csv";
pub const CENTERLINE_RESAMPLED_FILE: &str = "centerline_resampled.csv";

/// Extra room around the fitted geometry when the camera is reset.
pub const CAMERA_MARGIN: Real = 1.1;

/// What to do with a centerline row that does not start with three numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Stop loading with [`SliceError::MalformedRow`].
    #[default]
    Abort,
    /// Log a warning and drop the row.
    Skip,
}

/// Direction the camera looks in after each reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraAlignment {
    /// Look down the segment direction so the contour is seen face-on.
    #[default]
    AlongNormal,
    /// Keep the initial view direction (-Z, Y up) for every snapshot.
    Fixed,
}

/// Display style of one input mesh and its contours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStyle {
    pub edge_color: [Real; 3],
    pub edge_width: Real,
    pub surface_color: [Real; 3],
    pub surface_opacity: Real,
}

impl MeshStyle {
    pub const fn new(edge_color: [Real; 3], edge_width: Real) -> Self {
        Self {
            edge_color,
            edge_width,
            surface_color: SURFACE_COLOR,
            surface_opacity: SURFACE_OPACITY,
        }
    }

    /// Style of the `n`-th mesh (0-based). Meshes past the second reuse the first style.
    pub const fn for_mesh(n: usize) -> Self {
        match n {
            1 => Self::new(EDGE_COLOR_2, EDGE_WIDTH_2),
            _ => Self::new(EDGE_COLOR_1, EDGE_WIDTH_1),
        }
    }
}

/// One mesh input: file name relative to the base directory and its style.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInput {
    pub file: PathBuf,
    pub style: MeshStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory every relative path is resolved against.
    pub base_dir: PathBuf,
    /// One or two meshes, sliced in this order.
    pub meshes: Vec<MeshInput>,
    pub centerline: PathBuf,
    pub output_dir: PathBuf,
    pub stride: usize,
    pub width: u32,
    pub height: u32,
    pub background: [Real; 3],
    pub row_policy: RowPolicy,
    pub camera: CameraAlignment,
}

impl Default for PipelineConfig {
    /// The dual-mesh setup: `input.stl`, `input2.stl` and `centerline.csv` in
    /// the current directory, snapshots in `slices/`.
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            meshes: vec![
                MeshInput { file: MESH_FILE_1.into(), style: MeshStyle::for_mesh(0) },
                MeshInput { file: MESH_FILE_2.into(), style: MeshStyle::for_mesh(1) },
            ],
            centerline: CENTERLINE_FILE.into(),
            output_dir: OUTPUT_DIR_NAME.into(),
            stride: SNAPSHOT_STRIDE,
            width: SNAPSHOT_WIDTH,
            height: SNAPSHOT_HEIGHT,
            background: BACKGROUND_COLOR,
            row_policy: RowPolicy::Abort,
            camera: CameraAlignment::AlongNormal,
        }
    }
}

impl PipelineConfig {
    /// The single-mesh setup: only `input.stl`, centerline read from
    /// `centerline_resampled.csv`.
    pub fn single_mesh() -> Self {
        let mut config = Self::default();
        config.meshes.truncate(1);
        config.centerline = CENTERLINE_RESAMPLED_FILE.into();
        config
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Replace the mesh list; styles are assigned by position.
    pub fn with_meshes<P: Into<PathBuf>>(mut self, files: impl IntoIterator<Item = P>) -> Self {
        self.meshes = files
            .into_iter()
            .enumerate()
            .map(|(n, file)| MeshInput { file: file.into(), style: MeshStyle::for_mesh(n) })
            .collect();
        self
    }

    pub fn with_centerline(mut self, centerline: impl Into<PathBuf>) -> Self {
        self.centerline = centerline.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
        self.row_policy = row_policy;
        self
    }

    pub fn with_camera(mut self, camera: CameraAlignment) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// `path` joined onto the base directory (absolute paths are kept as-is).
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.meshes.is_empty() || self.meshes.len() > 2 {
            return Err(SliceError::InvalidConfig(format!(
                "expected 1 or 2 meshes, got {}",
                self.meshes.len()
            )));
        }
        if self.stride == 0 {
            return Err(SliceError::InvalidConfig("snapshot stride must be at least 1".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SliceError::InvalidConfig(format!(
                "snapshot resolution {}x{} is empty",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dual_mesh() {
        let config = PipelineConfig::default();
        assert_eq!(config.meshes.len(), 2);
        assert_eq!(config.meshes[0].file, PathBuf::from("input.stl"));
        assert_eq!(config.meshes[1].file, PathBuf::from("input2.stl"));
        assert_eq!(config.meshes[0].style.edge_color, EDGE_COLOR_1);
        assert_eq!(config.meshes[1].style.edge_color, EDGE_COLOR_2);
        assert_eq!((config.width, config.height), (800, 800));
        assert_eq!(config.stride, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn single_mesh_reads_resampled_centerline() {
        let config = PipelineConfig::single_mesh();
        assert_eq!(config.meshes.len(), 1);
        assert_eq!(config.centerline, PathBuf::from("centerline_resampled.csv"));
    }

    #[test]
    fn rejects_three_meshes_and_zero_stride() {
        let config = PipelineConfig::default().with_meshes(["a.stl", "b.stl", "c.stl"]);
        assert!(matches!(config.validate(), Err(SliceError::InvalidConfig(_))));

        let config = PipelineConfig::default().with_stride(0);
        assert!(matches!(config.validate(), Err(SliceError::InvalidConfig(_))));
    }
}
