//! End-to-end CLI tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn shapecast() -> Command {
    Command::cargo_bin("shapecast").expect("binary builds")
}

#[test]
fn lists_crs_catalog() {
    shapecast()
        .arg("--list-crs")
        .assert()
        .success()
        .stdout(predicate::str::contains("EPSG:4326"))
        .stdout(predicate::str::contains("British National Grid"));
}

#[test]
fn converts_point_csv_to_zip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stations.csv");
    fs::write(&input, "id,latitude,longitude\n1,40.7128,-74.0060\n").unwrap();

    shapecast()
        .current_dir(dir.path())
        .arg("stations.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records in 1 layers"));

    let archive = fs::read(dir.path().join("stations.zip")).unwrap();
    assert!(archive.starts_with(b"PK"));

    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(archive)).unwrap();
    assert!(zip.by_name("stations.shp").is_ok());
    assert!(zip.by_name("stations.prj").is_ok());
}

#[test]
fn output_name_and_crs_flags_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("in.csv"),
        "id,x,y\n1,10.0,20.0\n2,30.0,40.0\n",
    )
    .unwrap();

    shapecast()
        .current_dir(dir.path())
        .args(["in.csv", "-o", "survey", "--crs", "27700", "--geojson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EPSG:27700"));

    let archive = fs::read(dir.path().join("survey.zip")).unwrap();
    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(archive)).unwrap();
    assert!(zip.by_name("survey.geojson").is_ok());
}

#[test]
fn missing_coordinate_columns_fail_with_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.csv"), "id,name\n1,somewhere\n").unwrap();

    shapecast()
        .current_dir(dir.path())
        .arg("bad.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema error"));
}

#[test]
fn unknown_epsg_code_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), "x,y\n1,2\n").unwrap();

    shapecast()
        .current_dir(dir.path())
        .args(["a.csv", "--crs", "99999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown EPSG code"));
}

#[test]
fn drawing_without_usable_geometry_reports_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    // Structurally valid DXF whose only entity is unsupported.
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nTEXT\n8\nnotes\n10\n1.0\n20\n1.0\n30\n0.0\n40\n0.5\n1\nhello\n0\nENDSEC\n0\nEOF\n";
    fs::write(dir.path().join("empty.dxf"), dxf).unwrap();

    shapecast()
        .current_dir(dir.path())
        .arg("empty.dxf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no geometries found"));
}
