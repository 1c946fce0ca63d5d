use tracing::debug;

use crate::consts::MAX_PIXEL_VALUE;
use crate::raster::{LevelRaster, LevelValue};

/// Combine two Laplacian pyramids under a mask Gaussian pyramid.
///
/// At every level and pixel, `lb` is overwritten with the convex
/// combination
///
/// ```text
/// lb = (gm / 255) * la + (1 - gm / 255) * lb
/// ```
///
/// in promoted floating point, rounded back to the pyramid pixel type.
/// Pixels whose mask validity bit is clear carry no sample in either
/// source and are left untouched.
pub fn blend_pyramids(mask_gp: &[LevelRaster], la: &[LevelRaster], lb: &mut [LevelRaster]) {
    debug_assert_eq!(mask_gp.len(), la.len());
    debug_assert_eq!(mask_gp.len(), lb.len());

    let scale = f64::from(MAX_PIXEL_VALUE);

    for layer in 0..mask_gp.len() {
        debug!(layer, "blending layer");
        let gm = &mask_gp[layer];
        let a = &la[layer];
        let b = &mut lb[layer];
        let c = a.channels();

        for y in 0..gm.height() {
            for x in 0..gm.width() {
                if !gm.alpha[[y, x]] {
                    continue;
                }
                let a_coeff = f64::from(gm.data[[y, x, 0]]) / scale;
                let b_coeff = 1.0 - a_coeff;
                for ch in 0..c {
                    let va = f64::from(a.data[[y, x, ch]]);
                    let vb = f64::from(b.data[[y, x, ch]]);
                    b.data[[y, x, ch]] = (a_coeff * va + b_coeff * vb).round() as LevelValue;
                }
            }
        }
    }
}
