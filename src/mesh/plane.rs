//! Planes in Hessian normal form and point classification against them.

use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Unit, Vector3};

// Plane classification constants
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Plane `normal · p = w` with a unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and the offset along it.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        Plane { normal: normal / len, w: w / len }
    }

    /// Plane through `origin` perpendicular to `normal`.
    pub fn from_origin_normal(origin: Point3<Real>, normal: Unit<Vector3<Real>>) -> Self {
        let normal = normal.into_inner();
        Plane { normal, w: normal.dot(&origin.coords) }
    }

    #[inline]
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    #[inline]
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Positive in front of the plane, negative behind it.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`] within [`tolerance`].
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let d = self.signed_distance(point);
        let eps = tolerance();
        if d > eps {
            FRONT
        } else if d < -eps {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Orthonormal `{u, v}` spanning the plane, with `u × v = normal`.
    pub fn basis(&self) -> (Vector3<Real>, Vector3<Real>) {
        let n = self.normal;
        let mut u = if n.z.abs() > n.x.abs() || n.z.abs() > n.y.abs() {
            // normal is closer to ±Z ⇒ cross with X
            Vector3::x().cross(&n)
        } else {
            // otherwise cross with Z
            Vector3::z().cross(&n)
        };
        u.normalize_mut();
        let v = n.cross(&u).normalize();
        (u, v)
    }
}
