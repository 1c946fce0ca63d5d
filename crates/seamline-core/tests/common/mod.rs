use seamline_core::raster::Raster;

/// Fully opaque raster of one constant color.
pub fn solid_raster(width: usize, height: usize, rgb: [u8; 3]) -> Raster {
    raster_from_fn(width, height, |_, _| Some(rgb))
}

/// Raster with per-pixel color from `f(x, y)`.
///
/// Returning `None` leaves the pixel fully transparent (zero channels,
/// zero alpha), matching what the loader produces after thresholding.
pub fn raster_from_fn(
    width: usize,
    height: usize,
    f: impl Fn(usize, usize) -> Option<[u8; 3]>,
) -> Raster {
    let mut raster = Raster::new(width, height).expect("allocate raster");
    for y in 0..height {
        for x in 0..width {
            if let Some([r, g, b]) = f(x, y) {
                raster.set_pixel(x, y, [r, g, b, 255]);
            }
        }
    }
    raster
}

/// Opaque grey raster of one constant value.
pub fn grey_raster(width: usize, height: usize, value: u8) -> Raster {
    solid_raster(width, height, [value, value, value])
}
