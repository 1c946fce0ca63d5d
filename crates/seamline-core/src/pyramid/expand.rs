use rayon::prelude::*;

use crate::consts::{KERNEL, PARALLEL_PIXEL_THRESHOLD};
use crate::raster::{LevelRaster, LevelValue};

use super::reduce::clamp_index;

/// Whether `expand` accumulates into or out of the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandMode {
    /// Collapse: add the expansion to the destination level.
    Add,
    /// Laplacian construction: subtract the expansion from the level.
    Subtract,
}

/// Burt-Adelson expand: treat `input` as the even-indexed samples of a
/// zero-padded grid the size of `out`, convolve with the 5-tap kernel,
/// scale by four to restore DC gain, and add to or subtract from `out`
/// in place.
///
/// The destination stays in pyramid arithmetic; only each expansion
/// contribution is rounded.
pub fn expand(input: &LevelRaster, out: &mut LevelRaster, mode: ExpandMode) {
    debug_assert_eq!(input.channels(), out.channels());
    debug_assert!(input.channels() <= 3);

    let out_w = out.width();
    let out_h = out.height();

    if out_w * out_h >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<LevelValue>> = (0..out_h)
            .into_par_iter()
            .map(|oy| expand_row(input, oy, out_w))
            .collect();
        for (oy, row) in rows.into_iter().enumerate() {
            apply_row(out, oy, &row, mode);
        }
    } else {
        for oy in 0..out_h {
            let row = expand_row(input, oy, out_w);
            apply_row(out, oy, &row, mode);
        }
    }
}

/// The rounded 4x expansion contributions for one output row.
fn expand_row(input: &LevelRaster, oy: usize, out_w: usize) -> Vec<LevelValue> {
    let in_w = input.width();
    let in_h = input.height();
    let c = input.channels();

    let mut row = vec![0 as LevelValue; out_w * c];

    for ox in 0..out_w {
        let mut acc = [0.0f64; 3];

        for m in 0..5 {
            // Odd distances fall between source samples and contribute
            // nothing.
            let dx = ox as isize - (m as isize - 2);
            if dx % 2 != 0 {
                continue;
            }
            let ix = clamp_index(dx / 2, in_w);

            for n in 0..5 {
                let dy = oy as isize - (n as isize - 2);
                if dy % 2 != 0 {
                    continue;
                }
                let iy = clamp_index(dy / 2, in_h);

                let weight = KERNEL[m] * KERNEL[n];
                for ch in 0..c {
                    acc[ch] += weight * f64::from(input.data[[iy, ix, ch]]);
                }
            }
        }

        for ch in 0..c {
            row[ox * c + ch] = (acc[ch] * 4.0).round() as LevelValue;
        }
    }

    row
}

fn apply_row(out: &mut LevelRaster, oy: usize, row: &[LevelValue], mode: ExpandMode) {
    let c = out.channels();
    for ox in 0..out.width() {
        for ch in 0..c {
            let px = &mut out.data[[oy, ox, ch]];
            *px = match mode {
                ExpandMode::Add => px.saturating_add(row[ox * c + ch]),
                ExpandMode::Subtract => px.saturating_sub(row[ox * c + ch]),
            };
        }
    }
}
