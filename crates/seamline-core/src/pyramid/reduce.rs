use rayon::prelude::*;

use crate::consts::{KERNEL, KERNEL_100, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::raster::{LevelRaster, LevelValue};

/// Burt-Adelson reduce: low-pass filter with the 5-tap kernel and
/// decimate by two.
///
/// Transparency-aware: transparent inputs are excluded from the window
/// and the remaining weights are renormalised with the integer tally, so
/// a reduced pixel that sees any valid sample is itself a valid sample.
/// The output pixel is transparent only when its entire 5x5 window is.
pub fn reduce(input: &LevelRaster) -> Result<LevelRaster> {
    let out_w = input.width() / 2;
    let out_h = input.height() / 2;
    let c = input.channels();
    debug_assert!(c <= 3);
    let mut out = LevelRaster::new(out_w, out_h, c, "reduce")?;

    if out_w * out_h >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<(Vec<LevelValue>, Vec<bool>)> = (0..out_h)
            .into_par_iter()
            .map(|oy| reduce_row(input, oy, out_w))
            .collect();
        for (oy, (values, alpha)) in rows.into_iter().enumerate() {
            store_row(&mut out, oy, &values, &alpha);
        }
    } else {
        for oy in 0..out_h {
            let (values, alpha) = reduce_row(input, oy, out_w);
            store_row(&mut out, oy, &values, &alpha);
        }
    }

    Ok(out)
}

fn reduce_row(input: &LevelRaster, oy: usize, out_w: usize) -> (Vec<LevelValue>, Vec<bool>) {
    let w = input.width();
    let h = input.height();
    let c = input.channels();

    let mut values = vec![0 as LevelValue; out_w * c];
    let mut alpha = vec![false; out_w];

    for ox in 0..out_w {
        let mut acc = [0.0f64; 3];
        // Full 5x5 window tallies 10_000; transparent inputs subtract
        // their share.
        let mut contrib: u32 = 10_000;

        for m in 0..5 {
            let ix = clamp_index(2 * ox as isize + m as isize - 2, w);
            for n in 0..5 {
                let iy = clamp_index(2 * oy as isize + n as isize - 2, h);
                if input.alpha[[iy, ix]] {
                    let weight = KERNEL[m] * KERNEL[n];
                    for ch in 0..c {
                        acc[ch] += weight * f64::from(input.data[[iy, ix, ch]]);
                    }
                } else {
                    contrib -= KERNEL_100[m] * KERNEL_100[n];
                }
            }
        }

        if contrib != 0 {
            let scale = f64::from(contrib) / 10_000.0;
            for ch in 0..c {
                values[ox * c + ch] = (acc[ch] / scale).round() as LevelValue;
            }
            alpha[ox] = true;
        }
    }

    (values, alpha)
}

fn store_row(out: &mut LevelRaster, oy: usize, values: &[LevelValue], alpha: &[bool]) {
    let c = out.channels();
    for ox in 0..out.width() {
        for ch in 0..c {
            out.data[[oy, ox, ch]] = values[ox * c + ch];
        }
        out.alpha[[oy, ox]] = alpha[ox];
    }
}

/// Edge replication: clamp a window index into the raster.
pub(crate) fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
