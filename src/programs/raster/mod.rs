mod dem;
mod grid;
mod info;
mod nearblack;
mod rasterize;
mod translate;
mod vrt;
mod warp;

pub use dem::{dem_processing, DemProcessingOptions};
pub use grid::{grid, GridOptions};
pub use info::{info, InfoOptions};
pub use nearblack::{near_black, NearblackOptions};
pub use rasterize::{rasterize, RasterizeOptions};
pub use translate::{translate, TranslateOptions};
pub use vrt::{build_vrt, BuildVRTOptions};
pub use warp::{warp, WarpAppOptions};
