//! Cross-section snapshots of tubular surface meshes along a centerline.
//!
//! For every segment of a centerline polyline a cutting plane is placed at the
//! segment midpoint, perpendicular to it. One or two STL surfaces are sliced
//! by that plane and the contours drawn over a dimmed rendering of the
//! surfaces, with an orthographic camera fitted to them. Every tenth segment
//! the view is written to `slices/slice_NNN.png`.
//!
//! ```no_run
//! use centerline_slicer::{PipelineConfig, RasterBackend, run};
//!
//! let config = PipelineConfig::default().with_base_dir("case_01");
//! let report = run(&config, &mut RasterBackend::default())?;
//! println!("{} snapshot(s)", report.snapshots.len());
//! # Ok::<(), centerline_slicer::errors::SliceError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod centerline;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod pipeline;
pub mod planner;
pub mod render;
pub mod snapshot;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use centerline::Centerline;
pub use config::PipelineConfig;
pub use mesh::Mesh;
pub use pipeline::{RunReport, run};
pub use planner::{CuttingPlane, Segment};
pub use render::{RasterBackend, SliceBackend, View};
