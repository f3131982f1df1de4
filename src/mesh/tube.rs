//! Constant-radius tubes swept along a polyline.

use crate::float_types::{Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::plane::Plane;
use nalgebra::{Point3, Rotation3, Vector3};

impl Mesh {
    /// Sweep a regular `sides`-gon of the given `radius` along `path` and cap both ends.
    ///
    /// Ring orientation is carried from one point to the next by parallel
    /// transport, so the tube does not twist around the path. Consecutive
    /// duplicate points are ignored; fewer than two distinct points give an
    /// empty mesh. `sides` is clamped to at least 3.
    ///
    /// ```
    /// # use centerline_slicer::mesh::Mesh;
    /// # use nalgebra::Point3;
    /// let path = [Point3::origin(), Point3::new(0.0, 0.0, 5.0), Point3::new(0.0, 3.0, 8.0)];
    /// let tube = Mesh::tube(&path, 0.8, 8);
    /// // 2 segments x 8 quads x 2 triangles + 2 caps x 8 triangles
    /// assert_eq!(tube.len(), 48);
    /// ```
    pub fn tube(path: &[Point3<Real>], radius: Real, sides: usize) -> Mesh {
        let sides = sides.max(3);
        let mut points: Vec<Point3<Real>> = Vec::with_capacity(path.len());
        for p in path {
            if points.last() != Some(p) {
                points.push(*p);
            }
        }
        if points.len() < 2 {
            return Mesh::new();
        }

        let tangents: Vec<Vector3<Real>> = (0..points.len())
            .map(|i| {
                let prev = points[i.saturating_sub(1)];
                let next = points[(i + 1).min(points.len() - 1)];
                // a path doubling back has no averaged direction here
                (next - prev)
                    .try_normalize(Real::EPSILON)
                    .unwrap_or_else(|| (points[i] - prev).normalize())
            })
            .collect();

        // Parallel-transport frames
        let (mut normal, _) = Plane::from_normal(tangents[0], 0.0).basis();
        let mut rings = Vec::with_capacity(points.len());
        for (i, (p, t)) in points.iter().zip(&tangents).enumerate() {
            if i > 0 {
                if let Some(rot) = Rotation3::rotation_between(&tangents[i - 1], t) {
                    normal = rot * normal;
                }
                normal = (normal - t * normal.dot(t))
                    .try_normalize(Real::EPSILON)
                    .unwrap_or_else(|| Plane::from_normal(*t, 0.0).basis().0);
            }
            let binormal = t.cross(&normal);
            let ring: Vec<Point3<Real>> = (0..sides)
                .map(|k| {
                    let theta = TAU * k as Real / sides as Real;
                    p + (normal * theta.cos() + binormal * theta.sin()) * radius
                })
                .collect();
            rings.push(ring);
        }

        let mut triangles = Vec::with_capacity(2 * sides * (rings.len() - 1) + 2 * sides);
        for pair in rings.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for k in 0..sides {
                let k1 = (k + 1) % sides;
                triangles.push([a[k], a[k1], b[k1]]);
                triangles.push([a[k], b[k1], b[k]]);
            }
        }

        let (first, last) = (&rings[0], &rings[rings.len() - 1]);
        let (start, end) = (points[0], points[points.len() - 1]);
        for k in 0..sides {
            let k1 = (k + 1) % sides;
            triangles.push([start, first[k1], first[k]]);
            triangles.push([end, last[k], last[k1]]);
        }

        Mesh::from_triangles(triangles)
    }
}
