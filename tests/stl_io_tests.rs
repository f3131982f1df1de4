mod support;

use centerline_slicer::{errors::SliceError, mesh::Mesh};
use nalgebra::Point3;
use support::{approx_eq, temp_dir};

fn sample_tube() -> Mesh {
    Mesh::tube(&[Point3::origin(), Point3::new(0.0, 0.0, 3.0)], 1.5, 8)
}

#[test]
fn mesh_to_stl_ascii() {
    let stl_str = sample_tube().to_stl_ascii("vessel");
    // Basic checks
    assert!(stl_str.starts_with("solid vessel"));
    assert!(stl_str.trim_end().ends_with("endsolid vessel"));
    assert_eq!(stl_str.matches("facet normal").count(), 32);
    assert_eq!(stl_str.matches("vertex").count(), 96);
}

#[test]
fn ascii_stl_reads_back() {
    let text = sample_tube().to_stl_ascii("vessel");
    let mesh = Mesh::from_stl(text.as_bytes()).unwrap();
    assert_eq!(mesh.len(), 32);
}

#[test]
fn binary_stl_file_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = temp_dir("stl-binary");
    let path = dir.join("input.stl");
    let tube = sample_tube();
    std::fs::write(&path, tube.to_stl_binary()?)?;

    let mesh = Mesh::load(&path)?;
    assert_eq!(mesh.len(), tube.len());
    let (a, b) = (mesh.bounding_box().unwrap(), tube.bounding_box().unwrap());
    assert!(approx_eq(a.maxs.z, b.maxs.z, 1e-6));
    assert!(approx_eq(a.mins.x, b.mins.x, 1e-6));
    Ok(())
}

#[test]
fn missing_stl_is_reported_by_name() {
    let dir = temp_dir("stl-missing");
    match Mesh::load(&dir.join("input2.stl")) {
        Err(SliceError::MissingFile { name, .. }) => assert_eq!(name, "input2.stl"),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn garbage_stl_is_a_decode_error() {
    let dir = temp_dir("stl-garbage");
    let path = dir.join("input.stl");
    std::fs::write(&path, b"not an stl").unwrap();
    assert!(matches!(Mesh::load(&path), Err(SliceError::Stl { .. })));
}
