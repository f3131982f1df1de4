//! Every `stride`-th segment's view written to `slice_NNN.png`.

use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::render::{SliceBackend, View};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SnapshotExporter {
    dir: PathBuf,
    stride: usize,
    width: u32,
    height: u32,
    dir_ready: bool,
}

impl SnapshotExporter {
    pub fn new(dir: impl Into<PathBuf>, stride: usize, width: u32, height: u32) -> Self {
        Self {
            dir: dir.into(),
            stride: stride.max(1),
            width,
            height,
            dir_ready: false,
        }
    }

    /// Output directory resolved against the base directory, sizes and stride from `config`.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.resolve(&config.output_dir), config.stride, config.width, config.height)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `slice_007.png`; indices past 999 simply get more digits.
    pub fn file_name(index: usize) -> String {
        format!("slice_{index:03}.png")
    }

    #[inline]
    pub const fn should_export(&self, index: usize) -> bool {
        index % self.stride == 0
    }

    /// Where segment `index` would be written, `None` if it is not a snapshot index.
    pub fn path_for(&self, index: usize) -> Option<PathBuf> {
        self.should_export(index)
            .then(|| self.dir.join(Self::file_name(index)))
    }

    /// Write the snapshot of segment `index` if it falls on the stride.
    ///
    /// The output directory is created on first write; existing files are overwritten.
    pub fn export<B: SliceBackend>(
        &mut self,
        backend: &mut B,
        view: &View<B::Mesh, B::Contour>,
        index: usize,
    ) -> Result<Option<PathBuf>> {
        let Some(path) = self.path_for(index) else {
            return Ok(None);
        };
        if !self.dir_ready {
            std::fs::create_dir_all(&self.dir)?;
            self.dir_ready = true;
        }
        backend.snapshot(view, &path, self.width, self.height)?;
        log::info!("snapshot {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(SnapshotExporter::file_name(0), "slice_000.png");
        assert_eq!(SnapshotExporter::file_name(40), "slice_040.png");
        assert_eq!(SnapshotExporter::file_name(1230), "slice_1230.png");
    }

    #[test]
    fn only_stride_indices_have_paths() {
        let exporter = SnapshotExporter::new("out", 10, 800, 800);
        assert_eq!(exporter.path_for(0), Some(PathBuf::from("out/slice_000.png")));
        assert_eq!(exporter.path_for(7), None);
        assert_eq!(exporter.path_for(20), Some(PathBuf::from("out/slice_020.png")));
    }
}
