use std::path::Path;

use crate::{
    buffer::PixelBuffer,
    error::{ImpastoError, ImpastoResult},
};

/// Decodes a raster image file into an RGB8 pixel buffer.
pub fn load_image(path: &Path) -> ImpastoResult<PixelBuffer> {
    let img = image::ImageReader::open(path)
        .map_err(|e| ImpastoError::input(format!("open '{}': {e}", path.display())))?
        .decode()
        .map_err(|e| ImpastoError::input(format!("decode '{}': {e}", path.display())))?
        .into_rgb8();

    if img.width() == 0 || img.height() == 0 {
        return Err(ImpastoError::input(format!(
            "'{}' is zero-sized",
            path.display()
        )));
    }

    let (width, height) = (img.width(), img.height());
    PixelBuffer::from_raw(width, height, img.into_raw())
}

/// Writes a pixel buffer as a PNG.
pub fn save_image(pixels: &PixelBuffer, path: &Path) -> ImpastoResult<()> {
    image::save_buffer_with_format(
        path,
        pixels.as_raw(),
        pixels.width(),
        pixels.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ImpastoError::output(format!("write png '{}': {e}", path.display())))
}
