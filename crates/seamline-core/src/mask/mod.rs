//! Seam mask generation.
//!
//! The mask decides, per pixel of the working region, how much of the
//! accumulated image versus the incoming image enters the blend. It is
//! two-valued at full resolution; its Gaussian pyramid is what turns the
//! hard seam into a smooth transition.

pub mod distance;

use ndarray::Array2;
use tracing::debug;

use crate::consts::MAX_PIXEL_VALUE;
use crate::error::Result;
use crate::raster::{LevelRaster, LevelValue, Raster};
use crate::roi::Roi;

use self::distance::squared_distance;

/// Build the seam mask over `roi` from the two source rasters.
///
/// Value 255 selects the accumulated image `a`, 0 the incoming image
/// `b`. Pixels opaque in exactly one source take that source. Pixels
/// opaque in both go by the nearest-feature rule: whichever source has
/// its nearest exclusive pixel closer, ties to `a`. Pixels opaque in
/// neither are dont-care: value 0 with a clear validity bit.
pub fn seam_mask(a: &Raster, b: &Raster, roi: &Roi) -> Result<LevelRaster> {
    let w = roi.width() as usize;
    let h = roi.height() as usize;
    debug!(width = w, height = h, "generating seam mask");

    let mut a_opaque = Array2::from_elem((h, w), false);
    let mut b_opaque = Array2::from_elem((h, w), false);
    let mut a_only = Array2::from_elem((h, w), false);
    let mut b_only = Array2::from_elem((h, w), false);

    for y in 0..h {
        for x in 0..w {
            let cx = roi.x0 as usize + x;
            let cy = roi.y0 as usize + y;
            let ao = a.is_opaque(cx, cy);
            let bo = b.is_opaque(cx, cy);
            a_opaque[[y, x]] = ao;
            b_opaque[[y, x]] = bo;
            a_only[[y, x]] = ao && !bo;
            b_only[[y, x]] = bo && !ao;
        }
    }

    let dist_a = squared_distance(&a_only);
    let dist_b = squared_distance(&b_only);

    let mut mask = LevelRaster::new(w, h, 1, "seam mask")?;
    for y in 0..h {
        for x in 0..w {
            let (value, valid) = match (a_opaque[[y, x]], b_opaque[[y, x]]) {
                (true, false) => (MAX_PIXEL_VALUE, true),
                (false, true) => (0, true),
                (false, false) => (0, false),
                (true, true) => {
                    if dist_a[[y, x]] <= dist_b[[y, x]] {
                        (MAX_PIXEL_VALUE, true)
                    } else {
                        (0, true)
                    }
                }
            };
            mask.data[[y, x, 0]] = LevelValue::from(value);
            mask.alpha[[y, x]] = valid;
        }
    }

    Ok(mask)
}

/// Per-pixel union of the two sources' opacity over `roi` -- the output
/// validity mask for the collapse step.
pub fn union_mask(a: &Raster, b: &Raster, roi: &Roi) -> Array2<bool> {
    let w = roi.width() as usize;
    let h = roi.height() as usize;
    let mut mask = Array2::from_elem((h, w), false);
    for y in 0..h {
        for x in 0..w {
            let cx = roi.x0 as usize + x;
            let cy = roi.y0 as usize + y;
            mask[[y, x]] = a.is_opaque(cx, cy) || b.is_opaque(cx, cy);
        }
    }
    mask
}
