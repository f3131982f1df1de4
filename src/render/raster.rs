//! Software rasterizer writing PNG snapshots with `image`.

use crate::errors::Result;
use crate::float_types::Real;
use crate::mesh::{Mesh, slice::Contour};
use crate::planner::CuttingPlane;
use crate::render::{Camera, SliceBackend, View};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Shading floor so surfaces seen edge-on stay visible.
const AMBIENT: Real = 0.4;

/// Draws meshes as translucent flat-shaded triangles and contours as thick
/// solid lines, with no depth buffer.
#[derive(Debug, Clone)]
pub struct RasterBackend {
    width: u32,
    height: u32,
    frame: Option<Frame>,
}

#[derive(Debug, Clone)]
struct Frame {
    view_id: u64,
    revision: u64,
    image: RgbImage,
}

impl RasterBackend {
    /// Backend whose on-screen frame (see [`render`](SliceBackend::render)) is `width` x `height`.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height, frame: None }
    }

    /// The last frame produced by `render`.
    pub fn frame(&self) -> Option<&RgbImage> {
        self.frame.as_ref().map(|f| &f.image)
    }

    fn cached(&self, view: &View<Mesh, Contour>, width: u32, height: u32) -> Option<&RgbImage> {
        self.frame
            .as_ref()
            .filter(|f| f.view_id == view.id() && f.revision == view.revision())
            .map(|f| &f.image)
            .filter(|image| image.dimensions() == (width, height))
    }
}

impl Default for RasterBackend {
    fn default() -> Self {
        Self::new(crate::config::SNAPSHOT_WIDTH, crate::config::SNAPSHOT_HEIGHT)
    }
}

impl SliceBackend for RasterBackend {
    type Mesh = Mesh;
    type Contour = Contour;

    fn load_mesh(&mut self, path: &Path) -> Result<Mesh> {
        Mesh::load(path)
    }

    fn slice(&mut self, mesh: &Mesh, plane: &CuttingPlane) -> Contour {
        mesh.slice(&plane.to_plane())
    }

    fn render(&mut self, view: &View<Mesh, Contour>) -> Result<()> {
        let image = rasterize(view, self.width, self.height);
        self.frame = Some(Frame { view_id: view.id(), revision: view.revision(), image });
        Ok(())
    }

    fn snapshot(
        &mut self,
        view: &View<Mesh, Contour>,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<()> {
        match self.cached(view, width, height) {
            Some(image) => image.save_with_format(path, ImageFormat::Png)?,
            None => rasterize(view, width, height).save_with_format(path, ImageFormat::Png)?,
        }
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Draw `view` into a new `width` x `height` image.
///
/// Visible background meshes go first, blended at their style's opacity,
/// then every contour on top in its solid edge color.
pub fn rasterize(view: &View<Mesh, Contour>, width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, to_rgb(view.background()));
    let camera = view.camera();

    for actor in view.backgrounds().iter().filter(|a| a.visible) {
        let style = &actor.style;
        for tri in &actor.mesh.triangles {
            let Some(projected) = project_all(camera, tri, width, height) else {
                continue;
            };
            let facing = Mesh::face_normal(tri).dot(camera.direction.as_ref()).abs();
            let shade = AMBIENT + (1.0 - AMBIENT) * facing;
            let color = style.surface_color.map(|c| c * shade);
            fill_triangle(&mut image, projected, color, style.surface_opacity);
        }
    }

    for actor in view.slices() {
        let color = to_rgb(actor.style.edge_color);
        for polyline in &actor.contour.polylines {
            for (a, b) in polyline.edges() {
                if let (Some(pa), Some(pb)) = (
                    camera.project(&a, width, height),
                    camera.project(&b, width, height),
                ) {
                    draw_line(&mut image, pa, pb, actor.style.edge_width, color);
                }
            }
        }
    }

    image
}

fn project_all(
    camera: &Camera,
    tri: &[nalgebra::Point3<Real>; 3],
    width: u32,
    height: u32,
) -> Option<[(Real, Real); 3]> {
    Some([
        camera.project(&tri[0], width, height)?,
        camera.project(&tri[1], width, height)?,
        camera.project(&tri[2], width, height)?,
    ])
}

fn to_rgb(color: [Real; 3]) -> Rgb<u8> {
    Rgb(color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
}

fn blend(image: &mut RgbImage, x: u32, y: u32, color: [Real; 3], alpha: Real) {
    let px = image.get_pixel_mut(x, y);
    for (channel, c) in px.0.iter_mut().zip(color) {
        let dst = *channel as Real / 255.0;
        let out = c.clamp(0.0, 1.0) * alpha + dst * (1.0 - alpha);
        *channel = (out * 255.0).round() as u8;
    }
}

/// Pixel range `[lo, hi)` covering `min..=max`, clamped to `0..size`.
fn pixel_span(min: Real, max: Real, size: u32) -> std::ops::Range<u32> {
    let lo = min.floor().max(0.0);
    let hi = (max.ceil() + 1.0).min(size as Real);
    if hi <= lo {
        return 0..0;
    }
    lo as u32..hi as u32
}

/// Fill a screen-space triangle (either winding), sampling at pixel centers.
fn fill_triangle(image: &mut RgbImage, p: [(Real, Real); 3], color: [Real; 3], alpha: Real) {
    let edge = |a: (Real, Real), b: (Real, Real), x: Real, y: Real| {
        (b.0 - a.0) * (y - a.1) - (b.1 - a.1) * (x - a.0)
    };
    let area = edge(p[0], p[1], p[2].0, p[2].1);
    if area.abs() <= Real::EPSILON {
        return;
    }

    let xs = p.map(|q| q.0);
    let ys = p.map(|q| q.1);
    let min = |v: [Real; 3]| v[0].min(v[1]).min(v[2]);
    let max = |v: [Real; 3]| v[0].max(v[1]).max(v[2]);

    for y in pixel_span(min(ys), max(ys), image.height()) {
        for x in pixel_span(min(xs), max(xs), image.width()) {
            let (cx, cy) = (x as Real + 0.5, y as Real + 0.5);
            let w0 = edge(p[1], p[2], cx, cy) * area.signum();
            let w1 = edge(p[2], p[0], cx, cy) * area.signum();
            let w2 = edge(p[0], p[1], cx, cy) * area.signum();
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                blend(image, x, y, color, alpha);
            }
        }
    }
}

/// Clip `a-b` to the rectangle `[lo, hi]²` (Liang–Barsky).
fn clip(
    a: (Real, Real),
    b: (Real, Real),
    lo: (Real, Real),
    hi: (Real, Real),
) -> Option<((Real, Real), (Real, Real))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0 as Real, 1.0 as Real);
    for (p, q) in [
        (-dx, a.0 - lo.0),
        (dx, hi.0 - a.0),
        (-dy, a.1 - lo.1),
        (dy, hi.1 - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    (t0 <= t1).then(|| {
        (
            (a.0 + t0 * dx, a.1 + t0 * dy),
            (a.0 + t1 * dx, a.1 + t1 * dy),
        )
    })
}

/// Draw a line `width` pixels thick with round ends.
fn draw_line(image: &mut RgbImage, a: (Real, Real), b: (Real, Real), width: Real, color: Rgb<u8>) {
    let r = (width * 0.5).max(0.5);
    let (w, h) = (image.width() as Real, image.height() as Real);
    let Some((a, b)) = clip(a, b, (-r, -r), (w + r, h + r)) else {
        return;
    };

    let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
    let steps = (length * 2.0).ceil().max(1.0) as usize;
    for s in 0..=steps {
        let t = s as Real / steps as Real;
        let (cx, cy) = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
        for y in pixel_span(cy - r, cy + r, image.height()) {
            for x in pixel_span(cx - r, cx + r, image.width()) {
                let (dx, dy) = (x as Real + 0.5 - cx, y as Real + 0.5 - cy);
                if dx * dx + dy * dy < r * r {
                    image.put_pixel(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_clamped_and_rounded() {
        assert_eq!(to_rgb([1.0, 0.2, 0.1]), Rgb([255, 51, 26]));
        assert_eq!(to_rgb([-1.0, 2.0, 0.5]), Rgb([0, 255, 128]));
    }

    #[test]
    fn filled_triangle_covers_interior_only() {
        let mut image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        fill_triangle(&mut image, [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], [0.0; 3], 1.0);
        assert_eq!(*image.get_pixel(1, 1), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(9, 9), Rgb([255, 255, 255]));
    }

    #[test]
    fn translucent_fill_blends() {
        let mut image = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        fill_triangle(&mut image, [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], [0.0; 3], 0.25);
        assert_eq!(*image.get_pixel(0, 0), Rgb([191, 191, 191]));
    }

    #[test]
    fn line_outside_the_image_is_clipped_away() {
        let mut image = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));
        draw_line(&mut image, (-100.0, -50.0), (-20.0, -90.0), 3.0, Rgb([0, 0, 0]));
        assert!(image.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn thick_line_has_requested_width() {
        let mut image = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        draw_line(&mut image, (2.0, 10.5), (18.0, 10.5), 3.0, Rgb([0, 0, 0]));
        let column: Vec<_> = (0..20).filter(|&y| *image.get_pixel(10, y) == Rgb([0, 0, 0])).collect();
        assert_eq!(column, vec![9, 10, 11]);
    }
}
