//! Flat, path-based entry points mirroring the GDAL command-line tools.
//!
//! Every function here follows the same sequence: build the operation's
//! options object from the caller's option strings, open the source
//! dataset(s) with the access mode and driver mask the operation expects,
//! open the destination for update where the operation mutates it in place,
//! invoke the corresponding [`crate::programs`] wrapper, and flatten the
//! outcome to a plain `bool` (or, for [`gdal_info`], the report text). All
//! natively held resources are released on every path by the guard types
//! ([`Dataset`], the per-program options wrappers) before the call returns.
//!
//! Failure detail is deliberately not surfaced here; callers that need to
//! distinguish an unopenable source from a processing error should use the
//! typed [`crate::programs`] API instead.

use std::path::Path;

use crate::errors::{GdalError, Result};
use crate::options::{DatasetOptions, GdalOpenFlags};
use crate::programs::{raster, vector};
use crate::Dataset;

/// Per-operation open configuration: which drivers may open the sources,
/// whether every listed source participates or only the first, and whether
/// the destination is an existing dataset mutated in place.
#[derive(Debug, Clone, Copy)]
struct OpProfile {
    source_flags: GdalOpenFlags,
    multi_source: bool,
    in_place_dest: bool,
}

const INFO: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_ALL,
    multi_source: false,
    in_place_dest: false,
};
const TRANSLATE: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_RASTER,
    multi_source: false,
    in_place_dest: false,
};
const WARP: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_RASTER,
    multi_source: true,
    in_place_dest: false,
};
const BUILD_VRT: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_RASTER,
    multi_source: true,
    in_place_dest: false,
};
const RASTERIZE: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_VECTOR,
    multi_source: false,
    in_place_dest: true,
};
const VECTOR_TRANSLATE: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_VECTOR,
    multi_source: false,
    in_place_dest: false,
};
const DEM_PROCESSING: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_RASTER,
    multi_source: false,
    in_place_dest: false,
};
const NEAR_BLACK: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_RASTER,
    multi_source: false,
    in_place_dest: true,
};
const GRID: OpProfile = OpProfile {
    source_flags: GdalOpenFlags::GDAL_OF_ALL,
    multi_source: false,
    in_place_dest: false,
};

/// Opens the sources named by the profile: all of them for multi-source
/// operations, only the first otherwise. Sources are always read-only; there
/// is no existence pre-check, a bad path surfaces as an open error.
fn open_sources<P: AsRef<Path>>(sources: &[P], profile: OpProfile) -> Result<Vec<Dataset>> {
    if sources.is_empty() {
        return Err(GdalError::BadArgument("no source dataset given".into()));
    }
    let take = if profile.multi_source {
        sources.len()
    } else {
        1
    };
    sources[..take]
        .iter()
        .map(|p| {
            Dataset::open_ex(
                p,
                DatasetOptions {
                    open_flags: profile.source_flags,
                    ..DatasetOptions::default()
                },
            )
        })
        .collect()
}

/// Opens an existing destination dataset for in-place update. The dataset is
/// overwritten with no backup; data safety is the caller's responsibility.
fn open_dest_for_update(dest: &Path, profile: OpProfile) -> Result<Dataset> {
    debug_assert!(profile.in_place_dest);
    Dataset::open_ex(
        dest,
        DatasetOptions {
            open_flags: GdalOpenFlags::GDAL_OF_RASTER | GdalOpenFlags::GDAL_OF_UPDATE,
            ..DatasetOptions::default()
        },
    )
}

/// `gdalinfo`: returns the textual report for the first source, or an empty
/// string when the source cannot be opened or inspected.
pub fn gdal_info<P: AsRef<Path>>(sources: &[P], options: &[&str]) -> String {
    let run = || -> Result<String> {
        let opts = raster::InfoOptions::new(options.iter().copied())?;
        let src = open_sources(sources, INFO)?;
        raster::info(&src[0], Some(opts))
    };
    run().unwrap_or_default()
}

/// `gdal_translate`: converts the first source raster into `dest`.
pub fn gdal_translate<P: AsRef<Path>>(sources: &[P], dest: &Path, options: &[&str]) -> bool {
    let run = || -> Result<()> {
        let opts = raster::TranslateOptions::new(options.iter().copied())?;
        let src = open_sources(sources, TRANSLATE)?;
        raster::translate(&src[0], dest, Some(opts)).map(|_| ())
    };
    run().is_ok()
}

/// `gdalwarp`: reprojects/mosaics all sources into `dest`.
pub fn gdal_warp<P: AsRef<Path>>(sources: &[P], dest: &Path, options: &[&str]) -> bool {
    let run = || -> Result<()> {
        let opts = raster::WarpAppOptions::new(options.iter().copied())?;
        let src = open_sources(sources, WARP)?;
        raster::warp(&src, dest, Some(opts)).map(|_| ())
    };
    run().is_ok()
}

/// `gdalbuildvrt`: assembles all sources into the virtual raster `dest`.
pub fn gdal_build_vrt<P: AsRef<Path>>(sources: &[P], dest: &Path, options: &[&str]) -> bool {
    let run = || -> Result<()> {
        let opts = raster::BuildVRTOptions::new(options.iter().copied())?;
        let src = open_sources(sources, BUILD_VRT)?;
        raster::build_vrt(dest, &src, Some(opts)).map(|_| ())
    };
    run().is_ok()
}

/// `gdal_rasterize`: burns the first vector source into the existing raster
/// `dest`, in place and with no backup.
pub fn gdal_rasterize<P: AsRef<Path>>(sources: &[P], dest: &Path, options: &[&str]) -> bool {
    let run = || -> Result<()> {
        let opts = raster::RasterizeOptions::new(options.iter().copied())?;
        let src = open_sources(sources, RASTERIZE)?;
        let dst = open_dest_for_update(dest, RASTERIZE)?;
        raster::rasterize(&dst, &src[0], Some(opts))
    };
    run().is_ok()
}

/// `ogr2ogr`: converts the first vector source into `dest`.
pub fn gdal_vector_translate<P: AsRef<Path>>(sources: &[P], dest: &Path, options: &[&str]) -> bool {
    let run = || -> Result<()> {
        let opts = vector::VectorTranslateOptions::new(options.iter().copied())?;
        let src = open_sources(sources, VECTOR_TRANSLATE)?;
        vector::vector_translate(&src[0], dest, Some(opts)).map(|_| ())
    };
    run().is_ok()
}

/// `gdaldem`: derives a terrain product from the first source raster.
///
/// `processing` and `color_relief_file` are forwarded unset when `None`,
/// matching the tool's behavior when the arguments are absent.
pub fn gdal_dem_processing<P: AsRef<Path>>(
    sources: &[P],
    dest: &Path,
    options: &[&str],
    processing: Option<&str>,
    color_relief_file: Option<&Path>,
) -> bool {
    let run = || -> Result<()> {
        let opts = raster::DemProcessingOptions::new(options.iter().copied())?;
        let src = open_sources(sources, DEM_PROCESSING)?;
        raster::dem_processing(&src[0], dest, processing, color_relief_file, Some(opts))
            .map(|_| ())
    };
    run().is_ok()
}

/// `nearblack`: collapses near-black (or near-white) borders of the first
/// source into the existing raster `dest`, in place and with no backup.
pub fn gdal_near_black<P: AsRef<Path>>(sources: &[P], dest: &Path, options: &[&str]) -> bool {
    let run = || -> Result<()> {
        let opts = raster::NearblackOptions::new(options.iter().copied())?;
        let src = open_sources(sources, NEAR_BLACK)?;
        let dst = open_dest_for_update(dest, NEAR_BLACK)?;
        raster::near_black(&dst, &src[0], Some(opts))
    };
    run().is_ok()
}

/// `gdal_grid`: interpolates the first source's point data onto a raster grid
/// written to `dest`.
pub fn gdal_grid<P: AsRef<Path>>(sources: &[P], dest: &Path, options: &[&str]) -> bool {
    let run = || -> Result<()> {
        let opts = raster::GridOptions::new(options.iter().copied())?;
        let src = open_sources(sources, GRID)?;
        raster::grid(&src[0], dest, Some(opts)).map(|_| ())
    };
    run().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::raster::translate;
    use crate::test_utils::{fixture, TempFixture};

    fn staged_tiff(name: &str) -> TempFixture {
        let staged = TempFixture::empty(name);
        let src = Dataset::open(fixture("dem.asc")).unwrap();
        translate(&src, staged.path(), None).unwrap();
        staged
    }

    #[test]
    fn info_reports_driver_and_size() {
        let report = gdal_info(&[fixture("dem.asc")], &[]);
        assert!(report.contains("Driver:"));
        assert!(report.contains("Size is 6, 6"));
        assert!(report.lines().count() > 1);
    }

    #[test]
    fn info_missing_source_yields_empty_report() {
        let report = gdal_info(&[fixture("missing.tif")], &[]);
        assert!(report.is_empty());
    }

    #[test]
    fn translate_preserves_dimensions() {
        let dest = TempFixture::empty("out.tif");
        assert!(gdal_translate(
            &[fixture("dem.asc")],
            dest.path(),
            &["-of", "GTiff"]
        ));

        let out = Dataset::open(dest.path()).unwrap();
        let src = Dataset::open(fixture("dem.asc")).unwrap();
        assert_eq!(out.raster_size(), src.raster_size());
    }

    #[test]
    fn translate_missing_source_fails() {
        let dest = TempFixture::empty("never.tif");
        assert!(!gdal_translate(&[fixture("missing.asc")], dest.path(), &[]));
        assert!(!dest.path().exists());
    }

    #[test]
    fn translate_malformed_option_fails_without_abort() {
        let dest = TempFixture::empty("never.tif");
        assert!(!gdal_translate(
            &[fixture("dem.asc")],
            dest.path(),
            &["-definitely_not_an_option"]
        ));
    }

    #[test]
    fn translate_ignores_extra_sources() {
        // Single-source operation: only the first path is opened, a bogus
        // second path must not matter.
        let dest = TempFixture::empty("first_only.tif");
        assert!(gdal_translate(
            &[fixture("dem.asc"), fixture("missing.asc")],
            dest.path(),
            &[]
        ));
    }

    #[test]
    fn warp_two_sources() {
        let dest = TempFixture::empty("warped.tif");
        assert!(gdal_warp(
            &[fixture("dem.asc"), fixture("dem.asc")],
            dest.path(),
            &[]
        ));
    }

    #[test]
    fn warp_rejects_vector_source() {
        // Warp sources are opened through the raster-only mask, so a vector
        // source fails at open rather than inside GDALWarp.
        let dest = TempFixture::empty("never.tif");
        assert!(!gdal_warp(&[fixture("points.geojson")], dest.path(), &[]));
        assert!(!dest.path().exists());
    }

    #[test]
    fn warp_fails_when_any_source_is_missing() {
        let dest = TempFixture::empty("never.tif");
        assert!(!gdal_warp(
            &[fixture("dem.asc"), fixture("missing.asc")],
            dest.path(),
            &[]
        ));
    }

    #[test]
    fn build_vrt_two_sources() {
        let dest = TempFixture::empty("combined.vrt");
        assert!(gdal_build_vrt(
            &[fixture("dem.asc"), fixture("dem.asc")],
            dest.path(),
            &[]
        ));
        assert!(dest.path().exists());
    }

    #[test]
    fn rasterize_mutates_destination_in_place() {
        let dest = staged_tiff("burn.tif");
        let before = std::fs::read(dest.path()).unwrap();

        assert!(gdal_rasterize(
            &[fixture("zones.geojson")],
            dest.path(),
            &["-burn", "200"]
        ));

        let after = std::fs::read(dest.path()).unwrap();
        assert_ne!(before, after);
        // No backup file alongside the destination.
        let siblings: Vec<_> = std::fs::read_dir(dest.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|n| n.contains("bak") || n.contains('~'))
            .collect();
        assert!(siblings.is_empty(), "unexpected backups: {siblings:?}");
    }

    #[test]
    fn rasterize_missing_destination_fails() {
        let dest = TempFixture::empty("absent.tif");
        assert!(!gdal_rasterize(
            &[fixture("zones.geojson")],
            dest.path(),
            &["-burn", "200"]
        ));
    }

    #[test]
    fn vector_translate_to_geojson() {
        let dest = TempFixture::empty("out.geojson");
        assert!(gdal_vector_translate(
            &[fixture("points.geojson")],
            dest.path(),
            &["-f", "GeoJSON"]
        ));
        assert!(dest.path().exists());
    }

    #[test]
    fn dem_hillshade() {
        let dest = TempFixture::empty("hillshade.tif");
        assert!(gdal_dem_processing(
            &[fixture("dem.asc")],
            dest.path(),
            &[],
            Some("hillshade"),
            None
        ));
    }

    #[test]
    fn dem_without_processing_mode_fails() {
        let dest = TempFixture::empty("never.tif");
        assert!(!gdal_dem_processing(
            &[fixture("dem.asc")],
            dest.path(),
            &[],
            None,
            None
        ));
    }

    #[test]
    fn near_black_on_staged_copy() {
        let dest = staged_tiff("edges.tif");
        assert!(gdal_near_black(
            &[dest.path().to_path_buf()],
            dest.path(),
            &["-near", "5"]
        ));
    }

    #[test]
    fn grid_points() {
        let dest = TempFixture::empty("gridded.tif");
        assert!(gdal_grid(
            &[fixture("points.geojson")],
            dest.path(),
            &["-zfield", "z", "-outsize", "16", "16"]
        ));
    }

    #[test]
    fn empty_source_list_fails() {
        let dest = TempFixture::empty("never.tif");
        let none: &[&Path] = &[];
        assert!(!gdal_warp(none, dest.path(), &[]));
        assert!(gdal_info(none, &[]).is_empty());
    }
}
