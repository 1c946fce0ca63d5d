//! Pre-assembly of non-overlapping inputs.
//!
//! A greedy heuristic packs inputs that share no opaque pixels onto one
//! canvas-sized raster, so the blend loop only ever sees operands that
//! genuinely overlap.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{Result, SeamlineError};
use crate::raster::Raster;
use crate::roi::Roi;

/// A decoded input image positioned on the global canvas.
#[derive(Clone, Debug)]
pub struct PositionedImage {
    pub raster: Raster,
    /// Canvas coordinates of the upper-left pixel.
    pub x: u32,
    pub y: u32,
    /// Source path, for diagnostics.
    pub path: PathBuf,
}

impl PositionedImage {
    /// Footprint of this image on the canvas.
    pub fn extent(&self) -> Roi {
        Roi::from_origin_size(
            self.x,
            self.y,
            self.raster.width() as u32,
            self.raster.height() as u32,
        )
    }
}

/// Take the next image from the queue, merge every later image that
/// shares no opaque pixel with the running composite, and return the
/// composite with its opaque bounding box. Consumed entries are removed
/// from the queue.
///
/// With `one_at_a_time` set the merging is skipped and each call
/// consumes exactly one input.
pub fn assemble(
    queue: &mut Vec<PositionedImage>,
    canvas_width: usize,
    canvas_height: usize,
    one_at_a_time: bool,
) -> Result<Option<(Raster, Roi)>> {
    if queue.is_empty() {
        return Ok(None);
    }

    let mut composite = Raster::new(canvas_width, canvas_height)?;

    let first = queue.remove(0);
    if one_at_a_time {
        info!(path = %first.path.display(), "loading next image");
    } else {
        info!(path = %first.path.display(), "combining non-overlapping images");
    }
    paste(&mut composite, &first);

    if !one_at_a_time {
        let mut i = 0;
        while i < queue.len() {
            if overlaps(&composite, &queue[i]) {
                i += 1;
            } else {
                let image = queue.remove(i);
                debug!(path = %image.path.display(), "merging non-overlapping image");
                paste(&mut composite, &image);
            }
        }
    }

    let bbox = composite.opaque_bbox().ok_or_else(|| {
        SeamlineError::Geometry(format!(
            "{}: image has no opaque pixels",
            first.path.display()
        ))
    })?;
    debug!(
        x0 = bbox.x0,
        y0 = bbox.y0,
        x1 = bbox.x1,
        y1 = bbox.y1,
        "combined union bounding box"
    );

    Ok(Some((composite, bbox)))
}

/// Copy the opaque pixels of `src` onto the canvas at its position.
fn paste(dest: &mut Raster, src: &PositionedImage) {
    for y in 0..src.raster.height() {
        for x in 0..src.raster.width() {
            if src.raster.is_opaque(x, y) {
                let px = src.raster.pixel(x, y);
                dest.set_pixel(src.x as usize + x, src.y as usize + y, px);
            }
        }
    }
}

/// Whether any pixel is opaque in both the composite and the positioned
/// image.
fn overlaps(dest: &Raster, src: &PositionedImage) -> bool {
    for y in 0..src.raster.height() {
        for x in 0..src.raster.width() {
            if src.raster.is_opaque(x, y)
                && dest.is_opaque(src.x as usize + x, src.y as usize + y)
            {
                return true;
            }
        }
    }
    false
}
