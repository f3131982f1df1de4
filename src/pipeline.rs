//! The batch driver: load inputs, walk the centerline, slice, render, export.

use crate::centerline::{Centerline, file_label};
use crate::config::{CameraAlignment, PipelineConfig};
use crate::errors::{Result, SliceError};
use crate::float_types::Real;
use crate::render::{Bounded, SliceBackend, View};
use crate::snapshot::SnapshotExporter;
use std::path::PathBuf;

/// Resolved input paths, all known to exist.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFiles {
    pub meshes: Vec<PathBuf>,
    pub centerline: PathBuf,
}

impl InputFiles {
    /// Resolve every input against the base directory and check it exists.
    ///
    /// Meshes are checked first, in order, then the centerline; the first
    /// missing one is reported.
    pub fn locate(config: &PipelineConfig) -> Result<Self> {
        let meshes = config
            .meshes
            .iter()
            .map(|input| require(config.resolve(&input.file)))
            .collect::<Result<Vec<_>>>()?;
        let centerline = require(config.resolve(&config.centerline))?;
        Ok(Self { meshes, centerline })
    }
}

fn require(path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(SliceError::MissingFile { name: file_label(&path), path })
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Segments considered, including degenerate ones.
    pub segments: usize,
    /// Segments that produced a cutting plane.
    pub planes: usize,
    /// Indices of zero-length segments.
    pub degenerate: Vec<usize>,
    /// (segment, mesh) slices that did not intersect.
    pub empty_contours: usize,
    /// Snapshot files written, in order.
    pub snapshots: Vec<PathBuf>,
}

/// Run the whole pipeline described by `config` on `backend`.
///
/// Inputs are located before the backend is touched, so a missing file
/// fails without side effects. One view is created and owned here; the
/// backgrounds persist across segments while each segment's contours are
/// dropped before the next one.
pub fn run<B: SliceBackend>(config: &PipelineConfig, backend: &mut B) -> Result<RunReport> {
    config.validate()?;
    let inputs = InputFiles::locate(config)?;

    let centerline = Centerline::load(&inputs.centerline, config.row_policy)?;
    if centerline.len() < 2 {
        return Err(SliceError::TooFewPoints {
            path: inputs.centerline,
            count: centerline.len(),
        });
    }

    let aspect = config.width as Real / config.height as Real;
    let mut view: View<B::Mesh, B::Contour> = View::new(config.background, aspect);
    for (path, input) in inputs.meshes.iter().zip(&config.meshes) {
        let mesh = backend.load_mesh(path)?;
        view.add_background(mesh, input.style);
    }
    view.reset_camera();
    view.set_parallel_projection(true);

    let mut exporter = SnapshotExporter::from_config(config);
    let mut report = RunReport::default();

    for segment in centerline.segments() {
        report.segments += 1;
        let Some(plane) = segment.plane() else {
            log::debug!("segment {} has zero length, skipping", segment.index);
            report.degenerate.push(segment.index);
            continue;
        };
        report.planes += 1;

        for (n, input) in config.meshes.iter().enumerate() {
            let contour = backend.slice(view.mesh(n), &plane);
            if contour.bounds().is_none() {
                log::debug!("plane {} misses mesh {n}", segment.index);
                report.empty_contours += 1;
            }
            view.add_slice(n, contour, input.style);
            view.set_background_visible(n, false);
        }

        if config.camera == CameraAlignment::AlongNormal {
            view.camera_mut().look_along(plane.normal);
        }
        view.reset_camera();
        view.set_parallel_projection(true);
        backend.render(&view)?;

        if let Some(path) = exporter.export(backend, &view, segment.index)? {
            report.snapshots.push(path);
        }

        view.clear_slices();
        view.show_all_backgrounds();
    }

    log::info!(
        "{} segment(s), {} degenerate, {} snapshot(s) in {}",
        report.segments,
        report.degenerate.len(),
        report.snapshots.len(),
        exporter.dir().display()
    );
    Ok(report)
}
