//! View state: one camera, the persistent background surfaces and the
//! contours of the current iteration.

use crate::aabb::Aabb;
use crate::config::{CAMERA_MARGIN, MeshStyle};
use crate::float_types::Real;
use crate::render::Bounded;
use nalgebra::{Point3, Unit, Vector3};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(0);

/// Camera looking at `focal_point` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub focal_point: Point3<Real>,
    pub direction: Unit<Vector3<Real>>,
    pub view_up: Unit<Vector3<Real>>,
    /// Distance from the eye to the focal point (perspective only).
    pub distance: Real,
    /// Orthographic projection; slice shapes are not foreshortened.
    pub parallel_projection: bool,
    /// Half of the visible height in world units (orthographic only).
    pub parallel_scale: Real,
    /// Vertical field of view in degrees (perspective only).
    pub view_angle: Real,
}

impl Default for Camera {
    /// Eye on +Z looking at the origin, Y up.
    fn default() -> Self {
        Self {
            focal_point: Point3::origin(),
            direction: -Vector3::z_axis(),
            view_up: Vector3::y_axis(),
            distance: 1.0,
            parallel_projection: false,
            parallel_scale: 1.0,
            view_angle: 30.0,
        }
    }
}

impl Camera {
    pub fn position(&self) -> Point3<Real> {
        self.focal_point - self.direction.into_inner() * self.distance
    }

    /// Screen-right direction.
    pub fn right(&self) -> Vector3<Real> {
        self.direction.cross(self.view_up.as_ref())
    }

    /// Look along `direction`, keeping world Z (or Y when nearly parallel) as the up hint.
    pub fn look_along(&mut self, direction: Unit<Vector3<Real>>) {
        let hint = if direction.z.abs() > 0.99 { Vector3::y() } else { Vector3::z() };
        let up = hint - direction.into_inner() * hint.dot(direction.as_ref());
        self.direction = direction;
        self.view_up = Unit::new_normalize(up);
    }

    /// Center on `bounds` and size the view so all of it fits at `aspect` (width / height).
    pub fn fit(&mut self, bounds: &Aabb, aspect: Real) {
        let center = bounds.center();
        let (right, up) = (self.right(), self.view_up.into_inner());

        let (mut half_w, mut half_h) = (0.0 as Real, 0.0 as Real);
        for corner in bounds.corners() {
            let rel = corner - center;
            half_w = half_w.max(rel.dot(&right).abs());
            half_h = half_h.max(rel.dot(&up).abs());
        }
        let scale = half_h.max(half_w / aspect) * CAMERA_MARGIN;
        let radius = bounds.extents().norm() * 0.5;

        self.focal_point = center;
        self.parallel_scale = if scale > Real::EPSILON { scale } else { 1.0 };
        self.distance = if radius > Real::EPSILON {
            radius * CAMERA_MARGIN / (self.view_angle.to_radians() * 0.5).tan() + radius
        } else {
            1.0
        };
    }

    /// Pixel coordinates of `point` in a `width` x `height` image, `None` behind the eye.
    pub fn project(&self, point: &Point3<Real>, width: u32, height: u32) -> Option<(Real, Real)> {
        let aspect = width as Real / height as Real;
        let rel = point - self.position();
        let x = rel.dot(&self.right());
        let y = rel.dot(self.view_up.as_ref());

        let half_h = if self.parallel_projection {
            self.parallel_scale
        } else {
            let z = rel.dot(self.direction.as_ref());
            if z <= Real::EPSILON {
                return None;
            }
            z * (self.view_angle.to_radians() * 0.5).tan()
        };

        let sx = x / (half_h * aspect);
        let sy = y / half_h;
        Some((
            (sx * 0.5 + 0.5) * width as Real,
            (0.5 - sy * 0.5) * height as Real,
        ))
    }
}

/// A full input surface, drawn dimmed while visible.
#[derive(Debug, Clone)]
pub struct BackgroundActor<M> {
    pub mesh: M,
    pub style: MeshStyle,
    pub visible: bool,
}

/// The contour of one mesh for the current iteration.
#[derive(Debug, Clone)]
pub struct SliceActor<C> {
    pub mesh_index: usize,
    pub contour: C,
    pub style: MeshStyle,
}

/// Everything a backend needs to draw a frame.
///
/// Every mutation bumps [`revision`](View::revision) so backends can tell
/// whether a frame they drew earlier is still current.
#[derive(Debug)]
pub struct View<M, C> {
    id: u64,
    revision: u64,
    aspect: Real,
    camera: Camera,
    background: [Real; 3],
    backgrounds: Vec<BackgroundActor<M>>,
    slices: Vec<SliceActor<C>>,
}

impl<M: Bounded, C: Bounded> View<M, C> {
    /// Empty view with a `background` color, rendered at `aspect` (width / height).
    pub fn new(background: [Real; 3], aspect: Real) -> Self {
        Self {
            id: NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed),
            revision: 0,
            aspect,
            camera: Camera::default(),
            background,
            backgrounds: Vec::new(),
            slices: Vec::new(),
        }
    }

    #[inline]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub const fn aspect(&self) -> Real {
        self.aspect
    }

    #[inline]
    pub const fn background(&self) -> [Real; 3] {
        self.background
    }

    #[inline]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        self.touch();
        &mut self.camera
    }

    /// Add a persistent, visible surface. Returns its index.
    pub fn add_background(&mut self, mesh: M, style: MeshStyle) -> usize {
        self.touch();
        self.backgrounds.push(BackgroundActor { mesh, style, visible: true });
        self.backgrounds.len() - 1
    }

    pub fn backgrounds(&self) -> &[BackgroundActor<M>] {
        &self.backgrounds
    }

    pub fn mesh(&self, index: usize) -> &M {
        &self.backgrounds[index].mesh
    }

    pub fn set_background_visible(&mut self, index: usize, visible: bool) {
        self.touch();
        self.backgrounds[index].visible = visible;
    }

    pub fn show_all_backgrounds(&mut self) {
        self.touch();
        for actor in &mut self.backgrounds {
            actor.visible = true;
        }
    }

    pub fn add_slice(&mut self, mesh_index: usize, contour: C, style: MeshStyle) {
        self.touch();
        self.slices.push(SliceActor { mesh_index, contour, style });
    }

    pub fn slices(&self) -> &[SliceActor<C>] {
        &self.slices
    }

    /// Drop every contour of the current iteration. Returns how many were removed.
    pub fn clear_slices(&mut self) -> usize {
        self.touch();
        let removed = self.slices.len();
        self.slices.clear();
        removed
    }

    /// Union of the bounds of everything currently visible.
    pub fn visible_bounds(&self) -> Option<Aabb> {
        let backgrounds = self
            .backgrounds
            .iter()
            .filter(|a| a.visible)
            .filter_map(|a| a.mesh.bounds());
        let slices = self.slices.iter().filter_map(|a| a.contour.bounds());
        backgrounds.chain(slices).reduce(|a, b| a.merged(&b))
    }

    /// Fit the camera to the visible geometry. Leaves the camera alone (and
    /// returns `false`) when nothing visible has extent.
    pub fn reset_camera(&mut self) -> bool {
        let Some(bounds) = self.visible_bounds() else {
            return false;
        };
        let aspect = self.aspect;
        self.camera_mut().fit(&bounds, aspect);
        true
    }

    pub fn set_parallel_projection(&mut self, parallel: bool) {
        self.camera_mut().parallel_projection = parallel;
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
