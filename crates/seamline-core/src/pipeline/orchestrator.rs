use std::sync::Arc;

use tracing::info;

use crate::assemble::{assemble, PositionedImage};
use crate::blend::blend_pyramids;
use crate::consts::{MAX_CANVAS_DIM, MAX_PIXEL_VALUE};
use crate::error::{Result, SeamlineError};
use crate::filter::filter_half_width;
use crate::io::image_io::{load_raster, save_raster_quality};
use crate::mask::{seam_mask, union_mask};
use crate::pyramid::{base_level, collapse, dump_pyramid, gaussian_pyramid, laplacian_pyramid};
use crate::raster::Raster;
use crate::roi::Roi;

use super::config::BlendConfig;
use super::types::{BlendStage, NoOpReporter, ProgressReporter};

/// Number of pyramid levels for an overlap region.
///
/// The largest `L >= 1` such that the overlap is at least `2r + 1`
/// pixels wide and tall with `r = filter_half_width(L - 1)` -- deep
/// enough for a wide transition, shallow enough that no level is
/// contaminated by the region boundary. `cap` optionally limits the
/// depth further.
pub fn choose_levels(overlap: &Roi, max_value: u32, cap: Option<u32>) -> Result<u32> {
    let short = overlap.width().min(overlap.height());
    let mut levels: u32 = 1;
    loop {
        if let Some(cap) = cap {
            if levels >= cap {
                break;
            }
        }
        let r = filter_half_width(levels, max_value)?;
        if 2 * r + 1 > short {
            break;
        }
        levels += 1;
    }
    Ok(levels)
}

/// Run the full blend pipeline with a thread-safe progress reporter:
/// pre-assemble, blend each remaining operand into the accumulated
/// canvas in input order, and write the result to the configured output
/// path.
pub fn run_blend_reported(
    config: &BlendConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<Raster> {
    if config.inputs.is_empty() {
        return Err(SeamlineError::EmptyInput);
    }

    let total = config.inputs.len();
    reporter.begin_stage(BlendStage::Loading, Some(total));
    let mut queue = load_inputs(config, &reporter)?;
    reporter.finish_stage();

    let (canvas_width, canvas_height) = canvas_size(&queue)?;
    info!(
        width = canvas_width,
        height = canvas_height,
        inputs = total,
        "canvas assembled from input union"
    );
    let canvas_bounds = Roi::from_origin_size(0, 0, canvas_width as u32, canvas_height as u32);

    reporter.begin_stage(BlendStage::Assembling, None);
    let (mut canvas, mut acc_bbox) =
        assemble(&mut queue, canvas_width, canvas_height, config.one_at_a_time)?
            .ok_or(SeamlineError::EmptyInput)?;
    reporter.finish_stage();

    reporter.begin_stage(BlendStage::Blending, Some(total));
    reporter.advance(total - queue.len());
    let mut iteration = 0usize;
    while let Some((next, next_bbox)) =
        assemble(&mut queue, canvas_width, canvas_height, config.one_at_a_time)?
    {
        blend_pair(
            config,
            &mut canvas,
            acc_bbox,
            &next,
            next_bbox,
            &canvas_bounds,
            iteration,
        )?;
        acc_bbox = acc_bbox.union(&next_bbox);
        iteration += 1;
        reporter.advance(total - queue.len());
    }
    reporter.finish_stage();

    reporter.begin_stage(BlendStage::Writing, None);
    save_raster_quality(&canvas, &config.output, config.jpeg_quality)?;
    info!(output = %config.output.display(), "output saved");
    reporter.finish_stage();

    Ok(canvas)
}

/// Run the full blend pipeline without progress reporting.
pub fn run_blend(config: &BlendConfig) -> Result<Raster> {
    run_blend_reported(config, Arc::new(NoOpReporter))
}

/// Blend one operand into the accumulated canvas.
fn blend_pair(
    config: &BlendConfig,
    canvas: &mut Raster,
    acc_bbox: Roi,
    next: &Raster,
    next_bbox: Roi,
    canvas_bounds: &Roi,
    iteration: usize,
) -> Result<()> {
    let no_overlap =
        || SeamlineError::Geometry("images share no overlapping opaque pixels".into());

    let overlap = acc_bbox.intersect(&next_bbox).ok_or_else(no_overlap)?;
    if config.one_at_a_time && !pixel_overlap(canvas, next, &overlap) {
        return Err(no_overlap());
    }

    let max_value = u32::from(MAX_PIXEL_VALUE);
    let levels = choose_levels(&overlap, max_value, config.max_levels)?;
    let radius = filter_half_width(levels - 1, max_value)?;
    let roi = overlap.grow(radius, canvas_bounds);
    info!(
        iteration,
        levels,
        radius,
        roi_width = roi.width(),
        roi_height = roi.height(),
        "blending image pair"
    );

    // Geometry derived from the pre-collapse canvas; collapse mutates it.
    let mask = seam_mask(canvas, next, &roi)?;
    let out_mask = union_mask(canvas, next, &roi);

    let la = laplacian_pyramid(base_level(canvas, &roi)?, levels as usize)?;
    let mut lb = laplacian_pyramid(base_level(next, &roi)?, levels as usize)?;
    let gm = gaussian_pyramid(mask, levels as usize)?;

    blend_pyramids(&gm, &la, &mut lb);

    if let Some(prefix) = &config.dump_pyramids {
        dump_pyramid(&lb, prefix, iteration)?;
    }

    collapse(lb, canvas, &roi, &out_mask);

    // Outside the working region at most one source is opaque; bring the
    // incoming image's pixels across verbatim.
    for y in next_bbox.y0..=next_bbox.y1 {
        for x in next_bbox.x0..=next_bbox.x1 {
            if !roi.contains(x, y) && next.is_opaque(x as usize, y as usize) {
                let px = next.pixel(x as usize, y as usize);
                canvas.set_pixel(x as usize, y as usize, px);
            }
        }
    }

    Ok(())
}

/// Whether the two canvas-sized rasters have any common opaque pixel
/// within `roi`.
fn pixel_overlap(a: &Raster, b: &Raster, roi: &Roi) -> bool {
    for y in roi.y0..=roi.y1 {
        for x in roi.x0..=roi.x1 {
            if a.is_opaque(x as usize, y as usize) && b.is_opaque(x as usize, y as usize) {
                return true;
            }
        }
    }
    false
}

/// Decode every input and shift positions so the canvas origin is the
/// minimum input position.
fn load_inputs(
    config: &BlendConfig,
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<Vec<PositionedImage>> {
    let mut images = Vec::with_capacity(config.inputs.len());
    for (i, spec) in config.inputs.iter().enumerate() {
        let raster = load_raster(&spec.path)?;
        images.push(PositionedImage {
            raster,
            x: spec.x,
            y: spec.y,
            path: spec.path.clone(),
        });
        reporter.advance(i + 1);
    }

    let min_x = images.iter().map(|i| i.x).min().unwrap_or(0);
    let min_y = images.iter().map(|i| i.y).min().unwrap_or(0);
    for image in &mut images {
        image.x -= min_x;
        image.y -= min_y;
    }

    Ok(images)
}

/// Bounding union of `position + size` over all inputs.
fn canvas_size(images: &[PositionedImage]) -> Result<(usize, usize)> {
    let mut width = 0u64;
    let mut height = 0u64;
    for image in images {
        let x1 = u64::from(image.x) + image.raster.width() as u64;
        let y1 = u64::from(image.y) + image.raster.height() as u64;
        if x1 > u64::from(MAX_CANVAS_DIM) || y1 > u64::from(MAX_CANVAS_DIM) {
            return Err(SeamlineError::Geometry(format!(
                "{}: image at ({}, {}) extends beyond the maximum canvas",
                image.path.display(),
                image.x,
                image.y
            )));
        }
        width = width.max(x1);
        height = height.max(y1);
    }
    Ok((width as usize, height as usize))
}
