use std::ptr::{null, null_mut};

use gdal_sys::GDALNearblackOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::_last_null_pointer_err;
use crate::Dataset;

/// Wraps a [GDALNearblackOptions] object.
///
/// [GDALNearblackOptions]: https://gdal.org/api/gdal_utils.html#_CPPv420GDALNearblackOptions
pub struct NearblackOptions {
    c_options: *mut GDALNearblackOptions,
}

impl NearblackOptions {
    /// See [GDALNearblackOptionsNew].
    ///
    /// [GDALNearblackOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv423GDALNearblackOptionsNewPPcP29GDALNearblackOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options = unsafe { gdal_sys::GDALNearblackOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALNearblackOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALNearblackOptions {
        self.c_options
    }
}

impl Drop for NearblackOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALNearblackOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for NearblackOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        NearblackOptions::new(value)
    }
}

/// Converts nearly black/white borders of `src` to exact black/white,
/// writing into `dest`.
///
/// `dest` must be opened in update mode; it is modified in place, with no
/// backup. Wraps [GDALNearblack].
/// See the [program docs] for more details.
///
/// [GDALNearblack]: https://gdal.org/api/gdal_utils.html#_CPPv413GDALNearblackPKc12GDALDatasetH12GDALDatasetHPK20GDALNearblackOptionsPi
/// [program docs]: https://gdal.org/programs/nearblack.html
pub fn near_black(dest: &Dataset, src: &Dataset, options: Option<NearblackOptions>) -> Result<()> {
    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALNearblackOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        gdal_sys::GDALNearblack(
            null(),
            dest.c_dataset(),
            src.c_dataset(),
            c_options,
            &mut usage_error,
        )
    };

    // As with rasterize, GDAL hands back the supplied destination handle;
    // ownership stays with `dest`.
    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALNearblack"));
    }
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALNearblack",
        });
    }

    Ok(())
}
