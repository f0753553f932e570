//! Open/close balance checks against GDAL's global open-dataset table.
//!
//! These live in their own integration-test binary because the table is
//! process-wide; the unit-test binary opens datasets from many threads and
//! would make the counts meaningless. Within this binary a mutex serializes
//! the counting sections.

use std::path::{Path, PathBuf};
use std::ptr::null_mut;
use std::sync::Mutex;

use gdal_utils::{dispatch, Dataset};
use libc::c_int;

static LOCK: Mutex<()> = Mutex::new(());

/// Number of datasets GDAL currently tracks as open.
fn open_dataset_count() -> usize {
    let mut datasets: *mut gdal_sys::GDALDatasetH = null_mut();
    let mut count: c_int = 0;
    unsafe { gdal_sys::GDALGetOpenDatasets(&mut datasets, &mut count) };
    count as usize
}

fn fixture(filename: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(filename)
}

#[test]
fn open_datasets_are_tracked_and_released() {
    let _guard = LOCK.lock().unwrap();
    let before = open_dataset_count();

    let a = Dataset::open(fixture("dem.asc")).unwrap();
    let b = Dataset::open(fixture("dem.asc")).unwrap();
    assert_eq!(open_dataset_count(), before + 2);

    drop(a);
    drop(b);
    assert_eq!(open_dataset_count(), before);
}

#[test]
fn successful_dispatch_leaves_no_open_handles() {
    let _guard = LOCK.lock().unwrap();
    let before = open_dataset_count();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.tif");
    assert!(dispatch::gdal_translate(
        &[fixture("dem.asc")],
        &dest,
        &["-of", "GTiff"]
    ));

    assert_eq!(open_dataset_count(), before);
}

#[test]
fn failed_multi_source_warp_leaves_no_open_handles() {
    let _guard = LOCK.lock().unwrap();
    let before = open_dataset_count();

    // Both sources open, then GDALWarp fails on the unreachable destination.
    let dest = Path::new("/nonexistent-dir/never/out.tif");
    assert!(!dispatch::gdal_warp(
        &[fixture("dem.asc"), fixture("dem.asc")],
        dest,
        &[]
    ));

    assert_eq!(open_dataset_count(), before);
}

#[test]
fn failed_in_place_rasterize_leaves_no_open_handles() {
    let _guard = LOCK.lock().unwrap();
    let before = open_dataset_count();

    // Destination does not exist, so the update-mode open fails after the
    // vector source was already opened.
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("absent.tif");
    assert!(!dispatch::gdal_rasterize(
        &[fixture("zones.geojson")],
        &dest,
        &["-burn", "200"]
    ));

    assert_eq!(open_dataset_count(), before);
}
