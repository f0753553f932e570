use std::ffi::c_char;
use std::path::Path;
use std::ptr::null;
use std::sync::Once;

use gdal_sys::GDALDatasetH;

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::options::DatasetOptions;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};

static START: Once = Once::new();

pub fn _register_drivers() {
    unsafe {
        START.call_once(|| {
            gdal_sys::GDALAllRegister();
        });
    }
}

/// Wrapper around a [`GDALDataset`][GDALDataset] object.
///
/// Represents an opened raster or vector data source. The underlying handle is
/// owned exclusively by this value and closed exactly once, on drop, on every
/// exit path.
///
/// [GDALDataset]: https://gdal.org/api/gdaldataset_cpp.html
#[derive(Debug)]
pub struct Dataset {
    c_dataset: GDALDatasetH,
}

// GDAL datasets may be accessed from one thread at a time, but can be moved
// between threads. See https://gdal.org/api/raster_c_api.html
unsafe impl Send for Dataset {}

impl Dataset {
    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_dataset(&self) -> GDALDatasetH {
        self.c_dataset
    }

    /// Creates a new Dataset by wrapping a C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer
    pub unsafe fn from_c_dataset(c_dataset: GDALDatasetH) -> Dataset {
        Dataset { c_dataset }
    }

    /// Opens the dataset at `path` read-only, with any driver.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        Self::open_ex(path, DatasetOptions::default())
    }

    /// Opens the dataset at `path` with the given [`DatasetOptions`].
    ///
    /// Wraps [`GDALOpenEx`]; a failed open yields
    /// [`GdalError::NullPointer`], there is no existence pre-check.
    ///
    /// [`GDALOpenEx`]: https://gdal.org/doxygen/gdal_8h.html#a9cb8585d0b3c16726b08e25bcc94274a
    pub fn open_ex<P: AsRef<Path>>(path: P, options: DatasetOptions) -> Result<Dataset> {
        _register_drivers();
        let c_filename = _path_to_c_string(path.as_ref())?;

        // The backing CslStringLists must stay alive across the GDALOpenEx
        // call, hence the locals.
        let c_allowed_drivers = options.allowed_drivers.map(CslStringList::try_from).transpose()?;
        let c_open_options = options.open_options.map(CslStringList::try_from).transpose()?;
        let c_sibling_files = options.sibling_files.map(CslStringList::try_from).transpose()?;

        fn list_ptr(list: &Option<CslStringList>) -> *const *const c_char {
            list.as_ref()
                .map(|l| l.as_ptr() as *const *const c_char)
                .unwrap_or_else(null)
        }

        let c_dataset = unsafe {
            gdal_sys::GDALOpenEx(
                c_filename.as_ptr(),
                options.open_flags.bits(),
                list_ptr(&c_allowed_drivers),
                list_ptr(&c_open_options),
                list_ptr(&c_sibling_files),
            )
        };
        if c_dataset.is_null() {
            return Err(_last_null_pointer_err("GDALOpenEx"));
        }
        Ok(Dataset { c_dataset })
    }

    /// Fetch the number of raster bands on this dataset.
    pub fn raster_count(&self) -> usize {
        (unsafe { gdal_sys::GDALGetRasterCount(self.c_dataset) }) as usize
    }

    /// Fetch the raster size in pixels, as `(width, height)`.
    pub fn raster_size(&self) -> (usize, usize) {
        let size_x = unsafe { gdal_sys::GDALGetRasterXSize(self.c_dataset) } as usize;
        let size_y = unsafe { gdal_sys::GDALGetRasterYSize(self.c_dataset) } as usize;
        (size_x, size_y)
    }
}

impl Drop for Dataset {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALClose(self.c_dataset);
        }
    }
}
