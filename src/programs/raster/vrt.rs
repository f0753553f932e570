use std::borrow::Borrow;
use std::path::Path;
use std::ptr::{null, null_mut};

use gdal_sys::GDALBuildVRTOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};
use crate::Dataset;

/// Wraps a [GDALBuildVRTOptions] object.
///
/// [GDALBuildVRTOptions]: https://gdal.org/api/gdal_utils.html#_CPPv419GDALBuildVRTOptions
pub struct BuildVRTOptions {
    c_options: *mut GDALBuildVRTOptions,
}

impl BuildVRTOptions {
    /// See [GDALBuildVRTOptionsNew].
    ///
    /// [GDALBuildVRTOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv422GDALBuildVRTOptionsNewPPcP28GDALBuildVRTOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options = unsafe { gdal_sys::GDALBuildVRTOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALBuildVRTOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALBuildVRTOptions {
        self.c_options
    }
}

impl Drop for BuildVRTOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALBuildVRTOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for BuildVRTOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        BuildVRTOptions::new(value)
    }
}

/// Build a VRT from a list of datasets.
/// Wraps [GDALBuildVRT].
/// See the [program docs] for more details.
///
/// [GDALBuildVRT]: https://gdal.org/api/gdal_utils.html#gdal__utils_8h_1a057aaea8b0ed0476809a781ffa377ea4
/// [program docs]: https://gdal.org/programs/gdalbuildvrt.html
pub fn build_vrt<D: Borrow<Dataset>>(
    dest: &Path,
    datasets: &[D],
    options: Option<BuildVRTOptions>,
) -> Result<Dataset> {
    _build_vrt(
        dest,
        &datasets
            .iter()
            .map(|x| x.borrow())
            .collect::<Vec<&Dataset>>(),
        options,
    )
}

fn _build_vrt(
    dest: &Path,
    datasets: &[&Dataset],
    options: Option<BuildVRTOptions>,
) -> Result<Dataset> {
    let c_dest = _path_to_c_string(dest)?;

    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALBuildVRTOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        // Get raw handles to the datasets
        let mut datasets_raw: Vec<gdal_sys::GDALDatasetH> =
            datasets.iter().map(|x| x.c_dataset()).collect();

        gdal_sys::GDALBuildVRT(
            c_dest.as_ptr(),
            datasets_raw.len() as c_int,
            datasets_raw.as_mut_ptr(),
            null(),
            c_options,
            &mut usage_error,
        )
    };

    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALBuildVRT"));
    }

    // Wrap before the usage-error check so the handle is closed either way.
    let result = unsafe { Dataset::from_c_dataset(dataset_out) };
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALBuildVRT",
        });
    }

    Ok(result)
}
