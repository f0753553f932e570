use std::path::Path;
use std::ptr::{null, null_mut};

use gdal_sys::GDALVectorTranslateOptions;
use libc::c_int;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};
use crate::Dataset;

/// Wraps a [GDALVectorTranslateOptions] object.
///
/// [GDALVectorTranslateOptions]: https://gdal.org/api/gdal_utils.html#_CPPv426GDALVectorTranslateOptions
pub struct VectorTranslateOptions {
    c_options: *mut GDALVectorTranslateOptions,
}

impl VectorTranslateOptions {
    /// See [GDALVectorTranslateOptionsNew].
    ///
    /// [GDALVectorTranslateOptionsNew]: https://gdal.org/api/gdal_utils.html#_CPPv429GDALVectorTranslateOptionsNewPPcP35GDALVectorTranslateOptionsForBinary
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        // The argv list must outlive the constructor call.
        let mut argv = CslStringList::new();
        for arg in args {
            argv.add_string(arg.as_ref())?;
        }

        let c_options =
            unsafe { gdal_sys::GDALVectorTranslateOptionsNew(argv.as_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALVectorTranslateOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALVectorTranslateOptions {
        self.c_options
    }
}

impl Drop for VectorTranslateOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALVectorTranslateOptionsFree(self.c_options);
        }
    }
}

impl TryFrom<Vec<&str>> for VectorTranslateOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        VectorTranslateOptions::new(value)
    }
}

/// Converts simple features data between file formats.
///
/// The destination file is created or overwritten. GDAL accepts exactly one
/// source dataset for this operation.
///
/// Wraps [GDALVectorTranslate].
/// See the [program docs] for more details.
///
/// [GDALVectorTranslate]: https://gdal.org/api/gdal_utils.html#_CPPv419GDALVectorTranslatePKc12GDALDatasetHiP12GDALDatasetHPK26GDALVectorTranslateOptionsPi
/// [program docs]: https://gdal.org/programs/ogr2ogr.html
pub fn vector_translate(
    src: &Dataset,
    dest: &Path,
    options: Option<VectorTranslateOptions>,
) -> Result<Dataset> {
    let c_dest = _path_to_c_string(dest)?;

    let c_options = options
        .as_ref()
        .map(|x| x.c_options as *const GDALVectorTranslateOptions)
        .unwrap_or_else(null);

    let mut usage_error: c_int = 0;
    let dataset_out = unsafe {
        let mut src_raw: [gdal_sys::GDALDatasetH; 1] = [src.c_dataset()];

        gdal_sys::GDALVectorTranslate(
            c_dest.as_ptr(),
            null_mut(),
            1,
            src_raw.as_mut_ptr(),
            c_options,
            &mut usage_error,
        )
    };

    if dataset_out.is_null() {
        return Err(_last_null_pointer_err("GDALVectorTranslate"));
    }

    // Wrap before the usage-error check so the handle is closed either way.
    let result = unsafe { Dataset::from_c_dataset(dataset_out) };
    if usage_error != 0 {
        return Err(GdalError::UsageError {
            method_name: "GDALVectorTranslate",
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture, TempFixture};

    #[test]
    fn test_vector_translate_geojson_roundtrip() {
        let src = Dataset::open(fixture("points.geojson")).unwrap();
        let dest = TempFixture::empty("points_out.geojson");

        let opts = VectorTranslateOptions::new(["-f", "GeoJSON"]).unwrap();
        let out = vector_translate(&src, dest.path(), Some(opts)).unwrap();
        drop(out);

        assert!(dest.path().exists());
        let reopened = Dataset::open(dest.path()).unwrap();
        assert_eq!(reopened.raster_count(), 0);
    }

    #[test]
    fn test_vector_translate_unknown_format_fails() {
        let src = Dataset::open(fixture("points.geojson")).unwrap();
        let dest = TempFixture::empty("points.unknown");

        let opts = VectorTranslateOptions::new(["-f", "NoSuchFormat"]).unwrap();
        assert!(vector_translate(&src, dest.path(), Some(opts)).is_err());
    }
}
