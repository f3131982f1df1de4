use crate::float_types::Real;
use crate::mesh::Mesh;
use core2::io::Cursor;
use nalgebra::Point3;

impl Mesh {
    /// Create a Mesh from STL data using `stl_io`.
    ///
    /// Both the binary and the ASCII flavour are accepted; facet normals are
    /// ignored, the winding order is kept as stored.
    pub fn from_stl(stl_data: &[u8]) -> std::io::Result<Mesh> {
        let mut cursor = Cursor::new(stl_data);
        let stl_reader = stl_io::create_stl_reader(&mut cursor)?;

        let mut triangles = Vec::new();
        for tri_result in stl_reader {
            let tri = tri_result?;
            triangles.push(tri.vertices.map(|v| {
                Point3::new(v[0] as Real, v[1] as Real, v[2] as Real)
            }));
        }

        Ok(Mesh::from_triangles(triangles))
    }

    /// Export to ASCII STL
    ///
    /// ```rust
    /// # use centerline_slicer::mesh::Mesh;
    /// # use nalgebra::Point3;
    /// let mesh = Mesh::tube(&[Point3::origin(), Point3::new(0.0, 0.0, 4.0)], 1.0, 8);
    /// let text = mesh.to_stl_ascii("vessel");
    /// assert!(text.starts_with("solid vessel"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("solid {name}\n"));

        for tri in &self.triangles {
            let n = Mesh::face_normal(tri);
            out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
            out.push_str("    outer loop\n");
            for p in tri {
                out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }

        out.push_str(&format!("endsolid {name}\n"));
        out
    }

    /// Export to BINARY STL (returns `Vec<u8>`)
    ///
    /// The resulting bytes can then be written to a file or handled in memory:
    ///
    /// ```rust,no_run
    /// # use centerline_slicer::mesh::Mesh;
    /// # use nalgebra::Point3;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mesh = Mesh::tube(&[Point3::origin(), Point3::new(0.0, 0.0, 4.0)], 1.0, 8);
    /// std::fs::write("input.stl", mesh.to_stl_binary()?)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        use stl_io::{Normal, Triangle, Vertex, write_stl};

        #[allow(clippy::unnecessary_cast)]
        let triangles: Vec<Triangle> = self
            .triangles
            .iter()
            .map(|tri| {
                let n = Mesh::face_normal(tri);
                Triangle {
                    normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                    vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
                }
            })
            .collect();

        let mut cursor = Cursor::new(Vec::new());
        write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }
}
