//! Gaussian and Laplacian pyramid machinery.
//!
//! A pyramid is an ordered stack of `LevelRaster`s over one region of
//! interest, level 0 at full resolution and each later level half the
//! size (integer division) of the one before.

pub mod expand;
pub mod reduce;

use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::debug;

use crate::consts::MAX_PIXEL_VALUE;
use crate::error::Result;
use crate::io::image_io::save_raster;
use crate::raster::{LevelRaster, LevelValue, Raster, COLOR_CHANNELS};
use crate::roi::Roi;

pub use self::expand::{expand, ExpandMode};
pub use self::reduce::reduce;

/// Copy the canvas region of interest verbatim into pyramid pixels,
/// producing the level-0 raster of an image pyramid.
pub fn base_level(src: &Raster, roi: &Roi) -> Result<LevelRaster> {
    let w = roi.width() as usize;
    let h = roi.height() as usize;
    let mut out = LevelRaster::new(w, h, COLOR_CHANNELS, "pyramid level 0")?;

    for y in 0..h {
        for x in 0..w {
            let cx = roi.x0 as usize + x;
            let cy = roi.y0 as usize + y;
            for ch in 0..COLOR_CHANNELS {
                out.data[[y, x, ch]] = LevelValue::from(src.data[[cy, cx, ch]]);
            }
            out.alpha[[y, x]] = src.is_opaque(cx, cy);
        }
    }

    Ok(out)
}

/// Build a Gaussian pyramid with `levels` levels from the given level-0
/// raster.
pub fn gaussian_pyramid(level0: LevelRaster, levels: usize) -> Result<Vec<LevelRaster>> {
    let mut pyramid = Vec::with_capacity(levels);
    debug!(level = 0, "generating Gaussian pyramid level");
    pyramid.push(level0);

    for l in 1..levels {
        debug!(level = l, "generating Gaussian pyramid level");
        let next = reduce(&pyramid[l - 1])?;
        pyramid.push(next);
    }

    Ok(pyramid)
}

/// Build a Laplacian pyramid: a Gaussian pyramid with the expansion of
/// the next level subtracted from every level except the last, which
/// keeps the low-frequency residual.
pub fn laplacian_pyramid(level0: LevelRaster, levels: usize) -> Result<Vec<LevelRaster>> {
    let mut pyramid = gaussian_pyramid(level0, levels)?;

    for l in 0..levels.saturating_sub(1) {
        debug!(level = l, "generating Laplacian pyramid level");
        let (head, tail) = pyramid.split_at_mut(l + 1);
        expand(&tail[0], &mut head[l], ExpandMode::Subtract);
    }

    Ok(pyramid)
}

/// Collapse a Laplacian pyramid and write the reconstruction into the
/// destination canvas over `roi`.
///
/// Works upward from the smallest level, adding each expansion into the
/// level above. Level 0 is then clamped to the 8-bit range and copied
/// out. Pixels whose bit in `out_mask` is clear are written fully
/// transparent.
pub fn collapse(
    mut pyramid: Vec<LevelRaster>,
    dest: &mut Raster,
    roi: &Roi,
    out_mask: &Array2<bool>,
) {
    for l in (0..pyramid.len().saturating_sub(1)).rev() {
        debug!(level = l, "collapsing Laplacian pyramid level");
        let (head, tail) = pyramid.split_at_mut(l + 1);
        expand(&tail[0], &mut head[l], ExpandMode::Add);
    }

    let base = &pyramid[0];
    for y in 0..roi.height() as usize {
        for x in 0..roi.width() as usize {
            let cx = roi.x0 as usize + x;
            let cy = roi.y0 as usize + y;
            if out_mask[[y, x]] {
                for ch in 0..COLOR_CHANNELS {
                    let v = base.data[[y, x, ch]].clamp(0, LevelValue::from(MAX_PIXEL_VALUE));
                    dest.data[[cy, cx, ch]] = v as u8;
                }
                dest.data[[cy, cx, 3]] = MAX_PIXEL_VALUE;
            } else {
                for ch in 0..4 {
                    dest.data[[cy, cx, ch]] = 0;
                }
            }
        }
    }
}

/// Write each pyramid level as an image for inspection.
///
/// Every level is reconstructed in isolation to level-0 resolution, its
/// magnitude clamped to 8 bits, and encoded as
/// `<prefix>-<iteration>-l<level>.png`.
pub fn dump_pyramid(pyramid: &[LevelRaster], prefix: &Path, iteration: usize) -> Result<()> {
    for i in 0..pyramid.len() {
        let mut scratch: Vec<LevelRaster> = Vec::with_capacity(i + 1);
        for level in pyramid.iter().take(i) {
            scratch.push(LevelRaster::new(
                level.width(),
                level.height(),
                level.channels(),
                "pyramid dump",
            )?);
        }
        scratch.push(pyramid[i].clone());

        for l in (0..i).rev() {
            let (head, tail) = scratch.split_at_mut(l + 1);
            expand(&tail[0], &mut head[l], ExpandMode::Add);
        }

        let base = &scratch[0];
        let c = base.channels();
        let mut image = Raster::new(base.width(), base.height())?;
        for y in 0..base.height() {
            for x in 0..base.width() {
                for ch in 0..COLOR_CHANNELS {
                    // Masks are single-channel; replicate to grey.
                    let v = i32::from(base.data[[y, x, ch.min(c - 1)]]);
                    image.data[[y, x, ch]] = v.abs().min(255) as u8;
                }
                image.data[[y, x, 3]] = MAX_PIXEL_VALUE;
            }
        }

        let path = PathBuf::from(format!("{}-{}-l{}.png", prefix.display(), iteration, i));
        debug!(path = %path.display(), "writing pyramid level");
        save_raster(&image, &path)?;
    }

    Ok(())
}
