use std::path::Path;
use std::ptr::{null, null_mut};

use gdal_sys::GDALGridOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};
use crate::Dataset;

/// Wraps a [GDALGridOptions] object.
///
/// [GDALGridOptions]: https://gdal.org/api/gdal_utils.html#_CPPv415GDALGridOptions
pub struct GridOptions {
    c_options: *mut GDALGridOptions,
}

impl GridOptions {
    /// See [GDALGridOptionsNew].
    ///
    /// [GDALGridOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv418GDALGridOptionsNewPPcP24GDALGridOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options = unsafe { gdal_sys::GDALGridOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALGridOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALGridOptions {
        self.c_options
    }
}

impl Drop for GridOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALGridOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for GridOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        GridOptions::new(value)
    }
}

/// Interpolates scattered point data from `src` onto a regular raster grid.
///
/// The destination file is created or overwritten.
/// Wraps [GDALGrid].
/// See the [program docs] for more details.
///
/// [GDALGrid]: https://gdal.org/api/gdal_utils.html#_CPPv48GDALGridPKc12GDALDatasetHPK15GDALGridOptionsPi
/// [program docs]: https://gdal.org/programs/gdal_grid.html
pub fn grid(src: &Dataset, dest: &Path, options: Option<GridOptions>) -> Result<Dataset> {
    let c_dest = _path_to_c_string(dest)?;

    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALGridOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        gdal_sys::GDALGrid(c_dest.as_ptr(), src.c_dataset(), c_options, &mut usage_error)
    };

    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALGrid"));
    }

    // Wrap before the usage-error check so the handle is closed either way.
    let result = unsafe { Dataset::from_c_dataset(dataset_out) };
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALGrid",
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture, TempFixture};

    #[test]
    fn test_grid_from_points() {
        let src = Dataset::open(fixture("points.geojson")).unwrap();
        let dest = TempFixture::empty("gridded.tif");

        let opts = GridOptions::new(["-zfield", "z", "-outsize", "16", "16"]).unwrap();
        let out = grid(&src, dest.path(), Some(opts)).unwrap();
        assert_eq!(out.raster_size(), (16, 16));
    }

    #[test]
    fn test_grid_raster_source_fails() {
        // Gridding expects point data; a band-only source has no layer 0.
        let src = Dataset::open(fixture("dem.asc")).unwrap();
        let dest = TempFixture::empty("nogrid.tif");

        assert!(grid(&src, dest.path(), None).is_err());
    }
}
