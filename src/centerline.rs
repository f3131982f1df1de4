//! Centerline polylines read from delimited text.
//!
//! The file format is a header line followed by one point per row:
//!
//! ```text
//! x,y,z,radius
//! 0.0,0.0,0.0,1.2
//! 0.0,0.0,2.0,1.1
//! ```
//!
//! The first three fields are the coordinates, an optional fourth numeric
//! field is the vessel radius at that point, any further column is ignored.
//! Fields may be separated by `,`, `;` or tabs (or whitespace when none of
//! those appear). Blank lines and lines starting with `#` carry no data.

use crate::aabb::Aabb;
use crate::config::RowPolicy;
use crate::errors::{Result, SliceError};
use crate::float_types::Real;
use crate::planner::Segment;
use nalgebra::Point3;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterlinePoint {
    pub position: Point3<Real>,
    pub radius: Option<Real>,
}

impl CenterlinePoint {
    pub const fn new(position: Point3<Real>) -> Self {
        Self { position, radius: None }
    }

    pub const fn with_radius(position: Point3<Real>, radius: Real) -> Self {
        Self { position, radius: Some(radius) }
    }
}

/// Ordered polyline approximating the medial axis of a vessel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Centerline {
    pub points: Vec<CenterlinePoint>,
    /// The skipped first line, if the input had one.
    pub header: Option<String>,
    /// 1-based line numbers of rows dropped under [`RowPolicy::Skip`].
    pub skipped_rows: Vec<usize>,
}

impl Centerline {
    pub fn from_points<I: IntoIterator<Item = Point3<Real>>>(points: I) -> Self {
        Self {
            points: points.into_iter().map(CenterlinePoint::new).collect(),
            ..Default::default()
        }
    }

    /// Read and parse a centerline file.
    pub fn load(path: &Path, policy: RowPolicy) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                SliceError::MissingFile {
                    name: file_label(path),
                    path: path.to_path_buf(),
                }
            } else {
                SliceError::Io(error)
            }
        })?;
        let centerline = Self::parse(&text, policy)?;
        log::info!(
            "loaded {} centerline point(s) from {}",
            centerline.len(),
            path.display()
        );
        Ok(centerline)
    }

    /// Parse centerline text. Exactly one leading line is treated as the header.
    pub fn parse(text: &str, policy: RowPolicy) -> Result<Self> {
        let mut lines = text.lines().enumerate();
        let mut centerline = Self::default();

        if let Some((_, first)) = lines.next() {
            if parse_row(first).is_some() {
                log::warn!("first line {first:?} looks like data but is skipped as the header");
            }
            centerline.header = Some(first.to_string());
        }

        for (n, line) in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match parse_row(trimmed) {
                Some(point) => centerline.points.push(point),
                None => match policy {
                    RowPolicy::Abort => {
                        return Err(SliceError::MalformedRow {
                            line: n + 1,
                            content: line.to_string(),
                        });
                    }
                    RowPolicy::Skip => {
                        log::warn!("skipping malformed centerline row {}: {line:?}", n + 1);
                        centerline.skipped_rows.push(n + 1);
                    }
                },
            }
        }

        Ok(centerline)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs, indexed from 0. `N` points yield `N - 1` segments.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .enumerate()
            .map(|(index, pair)| Segment::new(index, pair[0].position, pair[1].position))
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.points.iter().map(|p| &p.position))
    }

    /// Sum of the segment lengths.
    pub fn length(&self) -> Real {
        self.segments().map(|s| s.length()).sum()
    }

    pub fn summary(&self) -> CenterlineSummary {
        let radii: Vec<Real> = self.points.iter().filter_map(|p| p.radius).collect();
        let radius = (!radii.is_empty()).then(|| RadiusStats {
            count: radii.len(),
            min: radii.iter().copied().fold(Real::INFINITY, Real::min),
            max: radii.iter().copied().fold(Real::NEG_INFINITY, Real::max),
            mean: radii.iter().sum::<Real>() / radii.len() as Real,
        });

        CenterlineSummary {
            point_count: self.len(),
            has_header: self.header.as_deref().is_some_and(|h| parse_row(h).is_none()),
            bounds: self.bounding_box(),
            start: self.points.first().map(|p| p.position),
            end: self.points.last().map(|p| p.position),
            length: self.length(),
            degenerate_segments: self.segments().filter(|s| s.plane().is_none()).count(),
            skipped_rows: self.skipped_rows.len(),
            radius,
        }
    }
}

/// Parse one data row into a point, `None` if the first three fields are not finite numbers.
fn parse_row(line: &str) -> Option<CenterlinePoint> {
    let line = line.trim();
    let fields: Vec<&str> = if line.contains([',', ';', '\t']) {
        line.split([',', ';', '\t']).map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };
    if fields.len() < 3 {
        return None;
    }

    let number = |s: &str| {
        let s = s.trim();
        let s = s
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(s);
        s.trim().parse::<Real>().ok().filter(|v| v.is_finite())
    };
    let x = number(fields[0])?;
    let y = number(fields[1])?;
    let z = number(fields[2])?;
    let radius = fields.get(3).and_then(|s| number(s));

    Some(CenterlinePoint { position: Point3::new(x, y, z), radius })
}

/// File name used in error messages, falling back to the full path.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusStats {
    pub count: usize,
    pub min: Real,
    pub max: Real,
    pub mean: Real,
}

/// Overview of a centerline: extent, endpoints and radius statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterlineSummary {
    pub point_count: usize,
    /// Whether the skipped first line was a real (non-numeric) header.
    pub has_header: bool,
    pub bounds: Option<Aabb>,
    pub start: Option<Point3<Real>>,
    pub end: Option<Point3<Real>>,
    pub length: Real,
    pub degenerate_segments: usize,
    pub skipped_rows: usize,
    /// Only present when at least one row carried a radius column.
    pub radius: Option<RadiusStats>,
}

impl fmt::Display for CenterlineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "points: {}", self.point_count)?;
        if self.has_header {
            write!(f, " (header)")?;
        }
        writeln!(f)?;
        if let Some(b) = &self.bounds {
            writeln!(
                f,
                "aabb: [{}, {}, {}] - [{}, {}, {}]",
                b.mins.x, b.mins.y, b.mins.z, b.maxs.x, b.maxs.y, b.maxs.z
            )?;
        }
        if let (Some(s), Some(e)) = (self.start, self.end) {
            writeln!(f, "start: ({}, {}, {})", s.x, s.y, s.z)?;
            writeln!(f, "end: ({}, {}, {})", e.x, e.y, e.z)?;
        }
        writeln!(f, "length: {}", self.length)?;
        if self.degenerate_segments > 0 {
            writeln!(f, "zero-length segments: {}", self.degenerate_segments)?;
        }
        if self.skipped_rows > 0 {
            writeln!(f, "skipped rows: {}", self.skipped_rows)?;
        }
        if let Some(r) = &self.radius {
            writeln!(
                f,
                "radius ({} points): min={}, max={}, mean={}",
                r.count, r.min, r.max, r.mean
            )?;
        }
        Ok(())
    }
}
