use std::path::Path;
use std::ptr::{null, null_mut};

use gdal_sys::GDALTranslateOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};
use crate::Dataset;

/// Wraps a [GDALTranslateOptions] object.
///
/// [GDALTranslateOptions]: https://gdal.org/api/gdal_utils.html#_CPPv420GDALTranslateOptions
pub struct TranslateOptions {
    c_options: *mut GDALTranslateOptions,
}

impl TranslateOptions {
    /// See [GDALTranslateOptionsNew].
    ///
    /// [GDALTranslateOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv423GDALTranslateOptionsNewPPcP29GDALTranslateOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options = unsafe { gdal_sys::GDALTranslateOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALTranslateOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALTranslateOptions {
        self.c_options
    }
}

impl Drop for TranslateOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALTranslateOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for TranslateOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        TranslateOptions::new(value)
    }
}

/// Converts raster data between different formats.
///
/// The destination file is created or overwritten.
/// Wraps [GDALTranslate].
/// See the [program docs] for more details.
///
/// [GDALTranslate]: https://gdal.org/api/gdal_utils.html#_CPPv413GDALTranslatePKc12GDALDatasetHPK20GDALTranslateOptionsPi
/// [program docs]: https://gdal.org/programs/gdal_translate.html
pub fn translate(src: &Dataset, dest: &Path, options: Option<TranslateOptions>) -> Result<Dataset> {
    let c_dest = _path_to_c_string(dest)?;

    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALTranslateOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        gdal_sys::GDALTranslate(
            c_dest.as_ptr(),
            src.c_dataset(),
            c_options,
            &mut usage_error,
        )
    };

    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALTranslate"));
    }

    // Wrap before the usage-error check so the handle is closed either way.
    let result = unsafe { Dataset::from_c_dataset(dataset_out) };
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALTranslate",
        });
    }

    Ok(result)
}
