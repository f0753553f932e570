use std::ffi::CString;
use std::path::Path;
use std::ptr::{null, null_mut};

use gdal_sys::GDALDEMProcessingOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};
use crate::Dataset;

/// Wraps a [GDALDEMProcessingOptions] object.
///
/// [GDALDEMProcessingOptions]: https://gdal.org/api/gdal_utils.html#_CPPv424GDALDEMProcessingOptions
pub struct DemProcessingOptions {
    c_options: *mut GDALDEMProcessingOptions,
}

impl DemProcessingOptions {
    /// See [GDALDEMProcessingOptionsNew].
    ///
    /// [GDALDEMProcessingOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv427GDALDEMProcessingOptionsNewPPcP33GDALDEMProcessingOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options =
            unsafe { gdal_sys::GDALDEMProcessingOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALDEMProcessingOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALDEMProcessingOptions {
        self.c_options
    }
}

impl Drop for DemProcessingOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALDEMProcessingOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for DemProcessingOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        DemProcessingOptions::new(value)
    }
}

/// Derives terrain products (hillshade, slope, aspect, color-relief, ...)
/// from an elevation raster.
///
/// `processing` names the derivation (e.g. `"hillshade"`); `color_relief_file`
/// is the elevation/color ramp required by the `color-relief` mode. Both
/// default to unset when `None`, in which case GDAL reports the missing mode
/// as an error rather than aborting.
///
/// Wraps [GDALDEMProcessing].
/// See the [program docs] for more details.
///
/// [GDALDEMProcessing]: https://gdal.org/api/gdal_utils.html#_CPPv417GDALDEMProcessingPKc12GDALDatasetHPKcPKcPK24GDALDEMProcessingOptionsPi
/// [program docs]: https://gdal.org/programs/gdaldem.html
pub fn dem_processing(
    src: &Dataset,
    dest: &Path,
    processing: Option<&str>,
    color_relief_file: Option<&Path>,
    options: Option<DemProcessingOptions>,
) -> Result<Dataset> {
    let c_dest = _path_to_c_string(dest)?;
    let c_processing = processing.map(CString::new).transpose()?;
    let c_color_relief_file = color_relief_file.map(_path_to_c_string).transpose()?;

    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALDEMProcessingOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        gdal_sys::GDALDEMProcessing(
            c_dest.as_ptr(),
            src.c_dataset(),
            c_processing.as_ref().map(|x| x.as_ptr()).unwrap_or_else(null),
            c_color_relief_file
                .as_ref()
                .map(|x| x.as_ptr())
                .unwrap_or_else(null),
            c_options,
            &mut usage_error,
        )
    };

    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALDEMProcessing"));
    }

    // Wrap before the usage-error check so the handle is closed either way.
    let result = unsafe { Dataset::from_c_dataset(dataset_out) };
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALDEMProcessing",
        });
    }

    Ok(result)
}
