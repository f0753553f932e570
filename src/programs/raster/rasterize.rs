use std::ptr::{null, null_mut};

use gdal_sys::GDALRasterizeOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::_last_null_pointer_err;
use crate::Dataset;

/// Wraps a [GDALRasterizeOptions] object.
///
/// [GDALRasterizeOptions]: https://gdal.org/api/gdal_utils.html#_CPPv420GDALRasterizeOptions
pub struct RasterizeOptions {
    c_options: *mut GDALRasterizeOptions,
}

impl RasterizeOptions {
    /// See [GDALRasterizeOptionsNew].
    ///
    /// [GDALRasterizeOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv423GDALRasterizeOptionsNewPPcP29GDALRasterizeOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options = unsafe { gdal_sys::GDALRasterizeOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALRasterizeOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALRasterizeOptions {
        self.c_options
    }
}

impl Drop for RasterizeOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALRasterizeOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for RasterizeOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        RasterizeOptions::new(value)
    }
}

/// Burns vector geometries into the bands of `dest`.
///
/// `dest` must be opened in update mode; it is modified in place, with no
/// backup. Wraps [GDALRasterize].
/// See the [program docs] for more details.
///
/// [GDALRasterize]: https://gdal.org/api/gdal_utils.html#_CPPv413GDALRasterizePKc12GDALDatasetH12GDALDatasetHPK20GDALRasterizeOptionsPi
/// [program docs]: https://gdal.org/programs/gdal_rasterize.html
pub fn rasterize(dest: &Dataset, src: &Dataset, options: Option<RasterizeOptions>) -> Result<()> {
    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALRasterizeOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        gdal_sys::GDALRasterize(
            null(),
            dest.c_dataset(),
            src.c_dataset(),
            c_options,
            &mut usage_error,
        )
    };

    // When a destination handle is supplied, GDALRasterize returns that same
    // handle on success. Ownership stays with `dest`; wrapping the result
    // would close it twice.
    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALRasterize"));
    }
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALRasterize",
        });
    }

    Ok(())
}
