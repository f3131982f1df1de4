//! Plane/mesh intersection.
//!
//! Every triangle is classified against the plane the same way polygons are
//! classified when building a BSP tree; spanning triangles contribute one
//! segment, the segments are then stitched into polylines by matching
//! endpoints.

use crate::aabb::Aabb;
use crate::float_types::{Real, tolerance};
use crate::mesh::Mesh;
use crate::mesh::plane::{BACK, COPLANAR, FRONT, Plane, SPANNING};
use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;

/// Connected run of contour points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point3<Real>>,
    /// The last point connects back to the first; it is not repeated.
    pub closed: bool,
}

impl Polyline {
    /// Point pairs to draw, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point3<Real>, Point3<Real>)> + '_ {
        let closing = (self.closed && self.points.len() > 2)
            .then(|| (self.points[self.points.len() - 1], self.points[0]));
        self.points.windows(2).map(|w| (w[0], w[1])).chain(closing)
    }

    pub fn length(&self) -> Real {
        self.edges().map(|(a, b)| (b - a).norm()).sum()
    }
}

/// Intersection of one mesh with one plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub plane: Option<Plane>,
    pub polylines: Vec<Polyline>,
    /// Triangles lying in the plane; they have no single intersection line.
    pub coplanar_triangles: usize,
}

impl Contour {
    /// The plane missed the mesh.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.polylines.iter().map(|p| p.edges().count()).sum()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.polylines.iter().flat_map(|p| p.points.iter()))
    }
}

impl Mesh {
    /// Slice this mesh by `plane`, returning the cross-section contour.
    ///
    /// A plane that misses the mesh yields an empty [`Contour`].
    ///
    /// # Example
    /// ```
    /// use centerline_slicer::mesh::{Mesh, plane::Plane};
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let tube = Mesh::tube(&[Point3::origin(), Point3::new(0.0, 0.0, 10.0)], 2.0, 16);
    /// let contour = tube.slice(&Plane::from_normal(Vector3::z(), 5.0));
    /// assert_eq!(contour.polylines.len(), 1);
    /// assert!(contour.polylines[0].closed);
    /// ```
    pub fn slice(&self, plane: &Plane) -> Contour {
        let mut contour = Contour { plane: Some(*plane), ..Default::default() };

        if let Some(aabb) = self.bounding_box() {
            let (lo, hi) = aabb
                .corners()
                .iter()
                .map(|c| plane.signed_distance(c))
                .fold((Real::INFINITY, Real::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)));
            let eps = tolerance();
            if lo > eps || hi < -eps {
                return contour;
            }
        }

        let mut segments = Vec::new();
        for tri in &self.triangles {
            let types = tri.map(|p| plane.orient_point(&p));
            let triangle_type = types.iter().fold(0, |acc, &t| acc | t);

            match triangle_type {
                COPLANAR => contour.coplanar_triangles += 1,
                FRONT | BACK => {
                    // Touching the plane along a whole edge still contributes that edge
                    let on_plane: Vec<_> = (0..3).filter(|&i| types[i] == COPLANAR).collect();
                    if on_plane.len() == 2 {
                        segments.push([tri[on_plane[0]], tri[on_plane[1]]]);
                    }
                },
                SPANNING => {
                    let mut crossing = Vec::with_capacity(2);
                    for i in 0..3 {
                        let j = (i + 1) % 3;
                        if types[i] == COPLANAR {
                            crossing.push(tri[i]);
                        } else if (types[i] | types[j]) == SPANNING {
                            crossing.push(edge_crossing(plane, &tri[i], &tri[j]));
                        }
                    }
                    if let [a, b] = crossing[..] {
                        segments.push([a, b]);
                    }
                },
                _ => {},
            }
        }

        contour.polylines = stitch(segments);
        contour
    }
}

/// Intersection of the edge `a-b` with the plane. The endpoints are ordered
/// first so both triangles sharing the edge produce the same point.
fn edge_crossing(plane: &Plane, a: &Point3<Real>, b: &Point3<Real>) -> Point3<Real> {
    let (a, b) = if key(a) <= key(b) { (a, b) } else { (b, a) };
    let da = plane.signed_distance(a);
    let db = plane.signed_distance(b);
    let t = da / (da - db);
    a + (b - a) * t
}

/// Exact hash key of a point; `-0.0` and `0.0` map to the same key.
fn key(p: &Point3<Real>) -> [u64; 3] {
    [p.x, p.y, p.z].map(|c| ((c + 0.0) as f64).to_bits())
}

/// Chain segments sharing endpoints into polylines.
fn stitch(segments: Vec<[Point3<Real>; 2]>) -> Vec<Polyline> {
    // Edges lying in the plane are reported by both adjacent triangles
    let mut seen = HashSet::new();
    let segments: Vec<_> = segments
        .into_iter()
        .filter(|[a, b]| key(a) != key(b))
        .filter(|[a, b]| {
            let (ka, kb) = (key(a), key(b));
            seen.insert(if ka <= kb { (ka, kb) } else { (kb, ka) })
        })
        .collect();

    let mut by_endpoint: HashMap<[u64; 3], Vec<usize>> = HashMap::new();
    for (i, [a, b]) in segments.iter().enumerate() {
        by_endpoint.entry(key(a)).or_default().push(i);
        by_endpoint.entry(key(b)).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let next_from = |point: &Point3<Real>, used: &mut Vec<bool>| -> Option<Point3<Real>> {
        let candidates = by_endpoint.get(&key(point))?;
        let &i = candidates.iter().find(|&&i| !used[i])?;
        used[i] = true;
        let [a, b] = segments[i];
        Some(if key(&a) == key(point) { b } else { a })
    };

    let mut polylines = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let [a, b] = segments[start];

        let mut forward = vec![a, b];
        while let Some(p) = next_from(forward.last().unwrap_or(&b), &mut used) {
            forward.push(p);
        }
        let mut backward = Vec::new();
        while let Some(p) = next_from(backward.last().unwrap_or(&a), &mut used) {
            backward.push(p);
        }
        backward.reverse();
        backward.extend(forward);
        let mut points = backward;

        let closed = points.len() > 3 && key(&points[0]) == key(&points[points.len() - 1]);
        if closed {
            points.pop();
        }
        polylines.push(Polyline { points, closed });
    }
    polylines
}
