//! Cutting planes perpendicular to centerline segments.

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use nalgebra::{Point3, Unit, Vector3};

/// Two consecutive centerline points and the index of the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start: Point3<Real>,
    pub end: Point3<Real>,
}

impl Segment {
    pub const fn new(index: usize, start: Point3<Real>, end: Point3<Real>) -> Self {
        Self { index, start, end }
    }

    #[inline]
    pub fn length(&self) -> Real {
        (self.end - self.start).norm()
    }

    /// The plane through the segment midpoint, `None` for a zero-length segment.
    #[inline]
    pub fn plane(&self) -> Option<CuttingPlane> {
        plan(&self.start, &self.end)
    }
}

/// Plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuttingPlane {
    pub origin: Point3<Real>,
    pub normal: Unit<Vector3<Real>>,
}

impl CuttingPlane {
    /// Hessian form used by the slicer.
    pub fn to_plane(&self) -> Plane {
        Plane::from_origin_normal(self.origin, self.normal)
    }
}

/// Derive the cutting plane of the segment `start -> end`.
///
/// `origin` is the midpoint and `normal` the direction from `start` to `end`.
/// Identical endpoints have no direction, so no plane is produced.
pub fn plan(start: &Point3<Real>, end: &Point3<Real>) -> Option<CuttingPlane> {
    let vec = end - start;
    let norm = vec.norm();
    if norm == 0.0 {
        return None;
    }

    Some(CuttingPlane {
        origin: nalgebra::center(start, end),
        normal: Unit::new_unchecked(vec / norm),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_of_axis_aligned_segment() {
        let plane = plan(&Point3::origin(), &Point3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(plane.origin, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(plane.normal.into_inner(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn zero_length_segment_has_no_plane() {
        let p = Point3::new(1.5, -2.0, 3.25);
        assert!(plan(&p, &p).is_none());
        assert!(Segment::new(4, p, p).plane().is_none());
    }

    #[test]
    fn normal_is_unit_and_points_forward() {
        let start = Point3::new(1.0, 2.0, 3.0);
        let end = Point3::new(4.0, 6.0, 3.0);
        let plane = plan(&start, &end).unwrap();
        assert!((plane.normal.norm() - 1.0).abs() < 1e-12);
        assert!(plane.normal.dot(&(end - start)) > 0.0);
        assert_eq!(plane.origin, Point3::new(2.5, 4.0, 3.0));
    }

    #[test]
    fn planning_is_deterministic() {
        let start = Point3::new(0.1, 0.2, 0.3);
        let end = Point3::new(0.7, -0.2, 1.9);
        assert_eq!(plan(&start, &end), plan(&start, &end));
    }
}
