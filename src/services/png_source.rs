use std::io::Read;
use std::path::Path;

use swatch_core::RgbaImage;

use crate::error::AppError;

/// Decode a PNG into 8-bit RGBA pixels.
///
/// Palette, grayscale and 16-bit images are expanded so every source ends up
/// as four bytes per pixel. Opaque inputs get alpha 255.
pub fn decode_png<R: Read>(reader: R) -> Result<RgbaImage, AppError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => bytes.to_vec(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(AppError::Image(
                "indexed PNG was not expanded to RGB".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(RgbaImage::new(info.width, info.height, rgba)?)
}

/// Open and decode a PNG file.
pub fn open_png(path: &Path) -> Result<RgbaImage, AppError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::Image(format!("{}: {e}", path.display())))?;
    decode_png(std::io::BufReader::new(file))
}
