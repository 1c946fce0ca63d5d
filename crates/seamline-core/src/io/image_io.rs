use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::error::{Result, SeamlineError};
use crate::raster::Raster;

/// JPEG quality used when none is requested explicitly.
const DEFAULT_JPEG_QUALITY: u8 = 90;

fn codec_error(path: &Path, source: image::ImageError) -> SeamlineError {
    SeamlineError::Codec {
        path: path.to_path_buf(),
        source,
    }
}

/// Decode an image file into an alpha-thresholded RGBA raster.
///
/// Formats without an alpha channel decode as fully opaque.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path).map_err(|e| codec_error(path, e))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err(SeamlineError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let mut raster = Raster::new(w as usize, h as usize)?;
    for y in 0..h as usize {
        for x in 0..w as usize {
            let px = rgba.get_pixel(x as u32, y as u32);
            raster.set_pixel(x, y, px.0);
        }
    }
    raster.threshold_alpha();
    Ok(raster)
}

/// Encode a raster with alpha, choosing the format from the file
/// extension. Unrecognised extensions fall back to PNG.
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    save_raster_quality(raster, path, None)
}

/// Encode a raster, with an explicit quality setting for lossy formats.
///
/// JPEG output drops the alpha channel (transparent pixels encode as
/// black); every other format keeps it.
pub fn save_raster_quality(raster: &Raster, path: &Path, quality: Option<u8>) -> Result<()> {
    let w = raster.width();
    let h = raster.height();

    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => {
            let mut img = RgbImage::new(w as u32, h as u32);
            for y in 0..h {
                for x in 0..w {
                    let [r, g, b, _] = raster.pixel(x, y);
                    img.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
                }
            }
            let file = File::create(path).map_err(SeamlineError::Io)?;
            let encoder = JpegEncoder::new_with_quality(
                BufWriter::new(file),
                quality.unwrap_or(DEFAULT_JPEG_QUALITY),
            );
            img.write_with_encoder(encoder)
                .map_err(|e| codec_error(path, e))
        }
        ext => {
            let mut img = RgbaImage::new(w as u32, h as u32);
            for y in 0..h {
                for x in 0..w {
                    img.put_pixel(x as u32, y as u32, Rgba(raster.pixel(x, y)));
                }
            }
            match ext {
                Some("png" | "tiff" | "tif" | "bmp") => {
                    img.save(path).map_err(|e| codec_error(path, e))
                }
                _ => img
                    .save_with_format(path, ImageFormat::Png)
                    .map_err(|e| codec_error(path, e)),
            }
        }
    }
}

/// Dimensions of an image file without decoding the pixel data.
pub fn image_size(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|e| codec_error(path, e))
}
