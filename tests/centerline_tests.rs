mod support;

use centerline_slicer::{
    centerline::Centerline,
    config::RowPolicy,
    errors::SliceError,
    float_types::Real,
};
use nalgebra::Point3;
use support::{approx_eq, temp_dir, write_csv};

#[test]
fn header_is_skipped_and_rows_become_points() {
    let text = "x,y,z,radius\n0,0,0,1.5\n0,0,2,1.25\n1,0,2\n";
    let centerline = Centerline::parse(text, RowPolicy::Abort).unwrap();

    assert_eq!(centerline.header.as_deref(), Some("x,y,z,radius"));
    assert_eq!(centerline.len(), 3);
    assert_eq!(centerline.points[1].position, Point3::new(0.0, 0.0, 2.0));
    assert_eq!(centerline.points[1].radius, Some(1.25));
    assert_eq!(centerline.points[2].radius, None);
}

#[test]
fn numeric_first_line_is_still_the_header() {
    let centerline = Centerline::parse("9,9,9\n0,0,0\n1,1,1\n", RowPolicy::Abort).unwrap();
    assert_eq!(centerline.len(), 2);
    assert_eq!(centerline.points[0].position, Point3::origin());
    assert!(!centerline.summary().has_header);
}

#[test]
fn blank_and_comment_lines_are_ignored() {
    let text = "x y z\n\n# inlet\n0 0 0\n   \n0 0 1\n";
    let centerline = Centerline::parse(text, RowPolicy::Abort).unwrap();
    assert_eq!(centerline.len(), 2);
    assert!(centerline.skipped_rows.is_empty());
}

#[test]
fn malformed_row_aborts_with_line_number() {
    let text = "x,y,z\n0,0,0\n0,zero,1\n0,0,2\n";
    match Centerline::parse(text, RowPolicy::Abort) {
        Err(SliceError::MalformedRow { line, content }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "0,zero,1");
        },
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn malformed_rows_can_be_skipped() {
    let text = "x,y,z\n0,0,0\n0,zero,1\n1,2\n0,0,2\n";
    let centerline = Centerline::parse(text, RowPolicy::Skip).unwrap();
    assert_eq!(centerline.len(), 2);
    assert_eq!(centerline.skipped_rows, vec![3, 4]);
    assert_eq!(centerline.summary().skipped_rows, 2);
}

#[test]
fn n_points_give_n_minus_one_indexed_segments() {
    let centerline = Centerline::from_points((0..7).map(|i| Point3::new(i as Real, 0.0, 0.0)));
    let segments: Vec<_> = centerline.segments().collect();
    assert_eq!(segments.len(), 6);
    for (i, s) in segments.iter().enumerate() {
        assert_eq!(s.index, i);
        assert_eq!(s.start, centerline.points[i].position);
        assert_eq!(s.end, centerline.points[i + 1].position);
    }
    assert!(approx_eq(centerline.length(), 6.0, 1e-9));
}

#[test]
fn single_point_has_no_segments() {
    let centerline = Centerline::from_points([Point3::new(1.0, 2.0, 3.0)]);
    assert_eq!(centerline.segments().count(), 0);
}

#[test]
fn load_reports_missing_file_by_name() {
    let dir = temp_dir("centerline-missing");
    match Centerline::load(&dir.join("centerline.csv"), RowPolicy::Abort) {
        Err(SliceError::MissingFile { name, path }) => {
            assert_eq!(name, "centerline.csv");
            assert_eq!(path, dir.join("centerline.csv"));
        },
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn load_reads_file_from_disk() {
    let dir = temp_dir("centerline-load");
    let path = write_csv(&dir, "centerline.csv", &[[0.0, 0.0, 0.0], [3.0, 4.0, 0.0]]);
    let centerline = Centerline::load(&path, RowPolicy::Abort).unwrap();
    assert_eq!(centerline.len(), 2);
    assert!(approx_eq(centerline.length(), 5.0, 1e-9));
}

#[test]
fn summary_reports_extent_and_radius() {
    let text = "x,y,z,r\n0,0,0,2\n0,0,0,1\n0,4,0,3\n";
    let summary = Centerline::parse(text, RowPolicy::Abort).unwrap().summary();

    assert_eq!(summary.point_count, 3);
    assert!(summary.has_header);
    assert_eq!(summary.degenerate_segments, 1);
    assert!(approx_eq(summary.length, 4.0, 1e-9));
    assert_eq!(summary.end, Some(Point3::new(0.0, 4.0, 0.0)));

    let radius = summary.radius.unwrap();
    assert_eq!(radius.count, 3);
    assert!(approx_eq(radius.min, 1.0, 1e-9));
    assert!(approx_eq(radius.max, 3.0, 1e-9));
    assert!(approx_eq(radius.mean, 2.0, 1e-9));

    let text = summary.to_string();
    assert!(text.contains("points: 3 (header)"));
    assert!(text.contains("zero-length segments: 1"));
}

#[test]
fn quoted_fields_are_numbers() {
    let text = "\"x\",\"y\",\"z\"\n\"0.0\",\"0.0\",\"0.0\"\n\"0.0\", \"0.0\" ,\"2.0\",\"0.7\"\n";
    let centerline = Centerline::parse(text, RowPolicy::Abort).unwrap();
    assert_eq!(centerline.len(), 2);
    assert_eq!(centerline.points[1].position, Point3::new(0.0, 0.0, 2.0));
    assert_eq!(centerline.points[1].radius, Some(0.7));
    assert!(centerline.summary().has_header);
}
