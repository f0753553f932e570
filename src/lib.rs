//! Bindings to the [GDAL](https://gdal.org/) utility programs.
//!
//! GDAL ships its command-line tools (`gdalinfo`, `gdalwarp`, `gdal_translate`,
//! `gdal_rasterize`, `ogr2ogr`, `gdalbuildvrt`, `gdaldem`, `nearblack`,
//! `gdal_grid`) as library entry points in `gdal_utils.h`. This crate wraps
//! those entry points behind two surfaces:
//!
//! * [`programs`]: typed, `Result`-based wrappers, one per utility, operating
//!   on open [`Dataset`] handles. Use these when you want error details.
//! * [`dispatch`]: a flat, path-in/boolean-out surface mirroring the
//!   command-line tools. Every function takes source path(s), a destination
//!   path and a list of CLI-style option strings, and reports plain
//!   success/failure.
//!
//! All processing happens inside GDAL; this crate only marshals arguments,
//! pairs every open with a close and every options object with its free, and
//! translates GDAL's error signaling into Rust values.
//!
//! ```no_run
//! use std::path::Path;
//! use gdal_utils::dispatch;
//!
//! let ok = dispatch::gdal_translate(
//!     &[Path::new("input.asc")],
//!     Path::new("output.tif"),
//!     &["-of", "GTiff"],
//! );
//! assert!(ok);
//! ```

pub mod cpl;
mod dataset;
pub mod dispatch;
pub mod errors;
mod options;
pub mod programs;
mod utils;

pub use dataset::Dataset;
pub use options::{DatasetOptions, GdalOpenFlags};

#[cfg(test)]
pub(crate) mod test_utils;
