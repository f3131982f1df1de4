//! File formats read and written by the slicer.
//!
//! Meshes come in as [STL](https://en.wikipedia.org/wiki/STL_(file_format)),
//! binary or ASCII; snapshots leave as PNG through the raster backend.

pub mod stl;
