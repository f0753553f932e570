use std::ptr::{null, null_mut};

use gdal_sys::GDALInfoOptions;
use libc::c_void;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _string};
use crate::Dataset;

/// Wraps a [GDALInfoOptions] object.
///
/// [GDALInfoOptions]: https://gdal.org/api/gdal_utils.html#_CPPv415GDALInfoOptions
pub struct InfoOptions {
    c_options: *mut GDALInfoOptions,
}

impl InfoOptions {
    /// See [GDALInfoOptionsNew].
    ///
    /// A parse failure in the argument list is reported as
    /// [`GdalError::NullPointer`].
    ///
    /// [GDALInfoOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv418GDALInfoOptionsNewPPcP24GDALInfoOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options = unsafe { gdal_sys::GDALInfoOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALInfoOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALInfoOptions {
        self.c_options
    }
}

impl Drop for InfoOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALInfoOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for InfoOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        InfoOptions::new(value)
    }
}

/// Lists various information about a GDAL supported dataset.
///
/// Returns the same textual report the `gdalinfo` program prints.
/// Wraps [GDALInfo].
/// See the [program docs] for more details.
///
/// [GDALInfo]: https://gdal.org/api/gdal_utils.html#_CPPv48GDALInfo12GDALDatasetHPK15GDALInfoOptions
/// [program docs]: https://gdal.org/programs/gdalinfo.html
pub fn info(dataset: &Dataset, options: Option<InfoOptions>) -> Result<String> {
    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALInfoOptions)
        .unwrap_or_else(null);

    let c_report = unsafe { gdal_sys::GDALInfo(dataset.c_dataset(), c_options) };
    if c_report.is_null() {
        return Err(_last_null_pointer_err("GDALInfo"));
    }

    let report = _string(c_report);
    unsafe { gdal_sys::VSIFree(c_report as *mut c_void) };
    Ok(report)
}
