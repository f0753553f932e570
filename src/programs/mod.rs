//! Typed bindings to the GDAL utility programs declared in `gdal_utils.h`.
//!
//! Each submodule pairs an options wrapper (built from CLI-style argument
//! strings, freed on drop) with the function invoking the corresponding GDAL
//! entry point. Failures are reported as [`crate::errors::GdalError`] values;
//! the flattened path-based surface lives in [`crate::dispatch`].

pub mod raster;
pub mod vector;
