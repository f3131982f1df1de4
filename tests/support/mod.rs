//! Test support library
//! Provides fixtures on disk and a recording backend for pipeline tests.
#![allow(dead_code)]

use centerline_slicer::{
    aabb::Aabb,
    errors::Result,
    float_types::Real,
    mesh::Mesh,
    planner::CuttingPlane,
    render::{Bounded, SliceBackend, View},
};
use nalgebra::Point3;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Fresh, empty directory under the system temp dir, unique per call.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "centerline-slicer-{name}-{}-{}",
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Points `(0, 0, 0), (0, 0, step), ...` along +Z.
pub fn straight_path(n: usize, step: Real) -> Vec<[Real; 3]> {
    (0..n).map(|i| [0.0, 0.0, i as Real * step]).collect()
}

/// Write `points` as a centerline file with an `x,y,z` header.
pub fn write_csv(dir: &Path, name: &str, points: &[[Real; 3]]) -> PathBuf {
    let mut text = String::from("x,y,z\n");
    for p in points {
        text.push_str(&format!("{},{},{}\n", p[0], p[1], p[2]));
    }
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// Write a binary STL tube of `radius` swept along `points`.
pub fn write_tube_stl(dir: &Path, name: &str, points: &[[Real; 3]], radius: Real) -> PathBuf {
    let path: Vec<_> = points.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect();
    let mesh = Mesh::tube(&path, radius, 12);
    let file = dir.join(name);
    std::fs::write(&file, mesh.to_stl_binary().unwrap()).unwrap();
    file
}

/// Names of the files in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[derive(Debug, Clone)]
pub struct FakeMesh {
    pub path: PathBuf,
    pub bounds: Aabb,
}

impl Bounded for FakeMesh {
    fn bounds(&self) -> Option<Aabb> {
        Some(self.bounds)
    }
}

#[derive(Debug, Clone)]
pub struct FakeContour {
    pub origin: Point3<Real>,
    pub hit: bool,
}

impl Bounded for FakeContour {
    fn bounds(&self) -> Option<Aabb> {
        self.hit.then(|| Aabb::new(self.origin, self.origin))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LoadMesh(PathBuf),
    Slice { mesh: PathBuf, plane: CuttingPlane },
    Render { slices: usize, visible_backgrounds: usize, parallel: bool },
    Snapshot { path: PathBuf, width: u32, height: u32 },
}

/// Records every call; slicing hits unless `miss` is set.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub calls: Vec<Call>,
    pub miss: bool,
}

impl FakeBackend {
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl SliceBackend for FakeBackend {
    type Mesh = FakeMesh;
    type Contour = FakeContour;

    fn load_mesh(&mut self, path: &Path) -> Result<FakeMesh> {
        self.calls.push(Call::LoadMesh(path.to_path_buf()));
        Ok(FakeMesh {
            path: path.to_path_buf(),
            bounds: Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
        })
    }

    fn slice(&mut self, mesh: &FakeMesh, plane: &CuttingPlane) -> FakeContour {
        self.calls.push(Call::Slice { mesh: mesh.path.clone(), plane: *plane });
        FakeContour { origin: plane.origin, hit: !self.miss }
    }

    fn render(&mut self, view: &View<FakeMesh, FakeContour>) -> Result<()> {
        self.calls.push(Call::Render {
            slices: view.slices().len(),
            visible_backgrounds: view.backgrounds().iter().filter(|a| a.visible).count(),
            parallel: view.camera().parallel_projection,
        });
        Ok(())
    }

    fn snapshot(
        &mut self,
        _view: &View<FakeMesh, FakeContour>,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<()> {
        std::fs::write(path, b"fake")?;
        self.calls.push(Call::Snapshot { path: path.to_path_buf(), width, height });
        Ok(())
    }
}
