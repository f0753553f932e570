use std::borrow::Borrow;
use std::path::Path;
use std::ptr::{null, null_mut};

use gdal_sys::GDALWarpAppOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};
use crate::Dataset;

/// Wraps a [GDALWarpAppOptions] object.
///
/// These are the options of the `gdalwarp` program, not to be confused with
/// the lower-level `GDALWarpOptions` of the warper API.
///
/// [GDALWarpAppOptions]: https://gdal.org/api/gdal_utils.html#_CPPv418GDALWarpAppOptions
pub struct WarpAppOptions {
    c_options: *mut GDALWarpAppOptions,
}

impl WarpAppOptions {
    /// See [GDALWarpAppOptionsNew].
    ///
    /// [GDALWarpAppOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv421GDALWarpAppOptionsNewPPcP27GDALWarpAppOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options = unsafe { gdal_sys::GDALWarpAppOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALWarpAppOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALWarpAppOptions {
        self.c_options
    }
}

impl Drop for WarpAppOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALWarpAppOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for WarpAppOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        WarpAppOptions::new(value)
    }
}

/// Image reprojection and warping over one or more source datasets.
///
/// The destination file is created or overwritten.
/// Wraps [GDALWarp].
/// See the [program docs] for more details.
///
/// [GDALWarp]: https://gdal.org/api/gdal_utils.html#_CPPv48GDALWarpPKc12GDALDatasetHiP12GDALDatasetHPK18GDALWarpAppOptionsPi
/// [program docs]: https://gdal.org/programs/gdalwarp.html
pub fn warp<D: Borrow<Dataset>>(
    datasets: &[D],
    dest: &Path,
    options: Option<WarpAppOptions>,
) -> Result<Dataset> {
    _warp(
        &datasets
            .iter()
            .map(|x| x.borrow())
            .collect::<Vec<&Dataset>>(),
        dest,
        options,
    )
}

fn _warp(datasets: &[&Dataset], dest: &Path, options: Option<WarpAppOptions>) -> Result<Dataset> {
    let c_dest = _path_to_c_string(dest)?;

    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALWarpAppOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        // Get raw handles to the datasets
        let mut datasets_raw: Vec<gdal_sys::GDALDatasetH> =
            datasets.iter().map(|x| x.c_dataset()).collect();

        gdal_sys::GDALWarp(
            c_dest.as_ptr(),
            null_mut(),
            datasets_raw.len() as c_int,
            datasets_raw.as_mut_ptr(),
            c_options,
            &mut usage_error,
        )
    };

    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALWarp"));
    }

    // Wrap before the usage-error check so the handle is closed either way.
    let result = unsafe { Dataset::from_c_dataset(dataset_out) };
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALWarp",
        });
    }

    Ok(result)
}
