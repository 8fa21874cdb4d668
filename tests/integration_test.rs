use std::path::{Path, PathBuf};

use gpx_hike_map::converter::{collect_rows, find_gpx_files, to_feature_collection};
use gpx_hike_map::error::GpxMapError;
use gpx_hike_map::html::write_html;
use gpx_hike_map::options::{DuplicatePolicy, RenderOptions};
use gpx_hike_map::parser::GpxDocument;

fn fixture(path: &str) -> PathBuf {
    Path::new("tests/fixtures").join(path)
}

fn hikes(rows: &gpx_hike_map::converter::RowSet) -> Vec<&str> {
    rows.rows().iter().map(|row| row.hike.as_str()).collect()
}

// ---- basic/ ----

#[test]
fn test_01_hike_a() {
    let doc = GpxDocument::open(fixture("basic/01_hike_a.gpx")).unwrap();
    assert_eq!(doc.namespace_prefix(), "{http://www.topografix.com/GPX/1/1}");

    let paths = doc.get_paths().unwrap();
    assert_eq!(paths.len(), 1);
    let path = paths.get("Hike A").unwrap();
    assert_eq!(path.lat, vec![51.5, 51.6]);
    assert_eq!(path.lon, vec![-0.1, -0.2]);
}

#[test]
fn test_02_two_tracks() {
    let paths = GpxDocument::open(fixture("basic/02_two_tracks.gpx"))
        .unwrap()
        .get_paths()
        .unwrap();
    assert_eq!(paths.names().collect::<Vec<_>>(), vec!["Saturday", "Sunday"]);

    let saturday = paths.get("Saturday").unwrap();
    assert_eq!(saturday.lat, vec![46.0010, 46.0020, 46.0035]);
    assert_eq!(saturday.lon, vec![7.0010, 7.0025, 7.0030]);

    // both segments of a track belong to one path
    let sunday = paths.get("Sunday").unwrap();
    assert_eq!(sunday.len(), 3);
    assert!((sunday.lon[2] - 7.0980).abs() < 1e-10);
}

#[test]
fn test_03_gpx10() {
    let doc = GpxDocument::open(fixture("basic/03_gpx10.gpx")).unwrap();
    assert_eq!(doc.qualify("trk"), "{http://www.topografix.com/GPX/1/0}trk");
    let paths = doc.get_paths().unwrap();
    assert_eq!(paths.get("Old Device").unwrap().len(), 2);
}

// ---- multi/ ----

#[test]
fn test_find_gpx_files_only_lists_gpx() {
    let files = find_gpx_files(&fixture("multi")).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.gpx", "b.gpx"]);
}

#[test]
fn test_find_gpx_files_missing_dir() {
    let err = find_gpx_files(&fixture("nowhere")).unwrap_err();
    assert!(matches!(err, GpxMapError::FileAccess { .. }));
}

#[test]
fn test_rows_from_two_files() {
    let files = find_gpx_files(&fixture("multi")).unwrap();
    let rows = collect_rows(&files, &RenderOptions::default()).unwrap();
    assert_eq!(hikes(&rows), vec!["Ridge", "Ridge", "Valley", "Valley", "Valley"]);
    assert_eq!(rows.rows()[2].lat, 44.8);
    assert_eq!(rows.rows()[2].lon, 6.2);

    let view = rows.view(10.0).unwrap();
    assert!((view.center_lat - 45.0).abs() < 1e-10);
    assert!((view.center_lon - 6.2).abs() < 1e-10);
}

#[test]
fn test_rows_with_interpolation() {
    let files = find_gpx_files(&fixture("multi")).unwrap();
    let opts = RenderOptions {
        interpolation_step: Some(5),
        ..RenderOptions::default()
    };
    let rows = collect_rows(&files, &opts).unwrap();
    // Ridge: 1 segment, Valley: 2 segments
    assert_eq!(rows.len(), 5 + 2 * 5);
    let last = rows.rows().last().unwrap();
    assert!((last.lat - 45.0).abs() < 1e-10);
    assert!((last.lon - 6.0).abs() < 1e-10);
}

#[test]
fn test_feature_collection_from_files() {
    let files = find_gpx_files(&fixture("multi")).unwrap();
    let rows = collect_rows(&files, &RenderOptions::default()).unwrap();
    let fc = to_feature_collection(&rows);
    assert_eq!(fc.features.len(), 2);
    let props = fc.features[1].properties.as_ref().unwrap();
    assert_eq!(props["hike"], "Valley");
}

// ---- dup/ ----

#[test]
fn test_duplicate_names_append_by_default() {
    let files = find_gpx_files(&fixture("dup")).unwrap();
    let rows = collect_rows(&files, &RenderOptions::default()).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows.hikes(), ["Morning Loop"]);
}

#[test]
fn test_duplicate_names_error_policy() {
    let files = find_gpx_files(&fixture("dup")).unwrap();
    let opts = RenderOptions {
        on_duplicate: DuplicatePolicy::Error,
        ..RenderOptions::default()
    };
    let err = collect_rows(&files, &opts).unwrap_err();
    match err {
        GpxMapError::DuplicateTrack { name, source } => {
            assert_eq!(name, "Morning Loop");
            assert_eq!(source, "second");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_names_qualified_by_file() {
    let files = find_gpx_files(&fixture("dup")).unwrap();
    let opts = RenderOptions {
        on_duplicate: DuplicatePolicy::QualifyByFile,
        ..RenderOptions::default()
    };
    let rows = collect_rows(&files, &opts).unwrap();
    assert_eq!(rows.hikes(), ["Morning Loop", "Morning Loop (second)"]);
}

// ---- broken/ ----

#[test]
fn test_missing_track_name() {
    let err = GpxDocument::open(fixture("broken/missing_name.gpx"))
        .unwrap()
        .get_paths()
        .unwrap_err();
    assert!(matches!(err, GpxMapError::MissingElement { .. }));
    assert!(err.to_string().contains("{http://www.topografix.com/GPX/1/1}name"));
}

#[test]
fn test_non_numeric_latitude() {
    let err = GpxDocument::open(fixture("broken/bad_lat.gpx"))
        .unwrap()
        .get_paths()
        .unwrap_err();
    assert!(matches!(err, GpxMapError::InvalidAttribute { attribute: "lat", .. }));
}

#[test]
fn test_malformed_file() {
    assert!(GpxDocument::open(fixture("broken/not_xml.gpx")).is_err());
}

#[test]
fn test_one_bad_file_aborts_the_run() {
    let files = vec![
        fixture("multi/a.gpx"),
        fixture("broken/bad_lat.gpx"),
        fixture("multi/b.gpx"),
    ];
    assert!(collect_rows(&files, &RenderOptions::default()).is_err());
}

// ---- html ----

#[test]
fn test_write_html() {
    let files = find_gpx_files(&fixture("multi")).unwrap();
    let rows = collect_rows(&files, &RenderOptions::default()).unwrap();
    let out = std::env::temp_dir().join(format!("gpx-hike-map-test-{}.html", std::process::id()));
    write_html(&rows, &RenderOptions::default(), &out).unwrap();

    let page = std::fs::read_to_string(&out).unwrap();
    std::fs::remove_file(&out).unwrap();
    assert!(page.contains("\"Ridge\""));
    assert!(page.contains("\"Valley\""));
}

#[test]
fn test_write_html_to_missing_dir() {
    let rows = collect_rows(&[fixture("multi/a.gpx")], &RenderOptions::default()).unwrap();
    let err = write_html(
        &rows,
        &RenderOptions::default(),
        &fixture("nowhere/map.html"),
    )
    .unwrap_err();
    assert!(matches!(err, GpxMapError::FileAccess { .. }));
}
