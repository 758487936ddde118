pub mod raster_image;

pub use raster_image::RasterImage;
