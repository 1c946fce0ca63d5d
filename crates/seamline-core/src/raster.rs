use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::consts::{MAX_CANVAS_DIM, MAX_PIXEL_VALUE};
use crate::error::{Result, SeamlineError};
use crate::roi::Roi;

/// Channels in a canvas pixel (RGB + alpha).
pub const CANVAS_CHANNELS: usize = 4;

/// Color channels carried through the image pyramids.
pub const COLOR_CHANNELS: usize = 3;

/// Signed working type for pyramid arithmetic. Laplacian levels hold
/// differences of 8-bit channels, so this must be wider and signed.
pub type LevelValue = i16;

/// An RGBA pixel buffer.
///
/// Alpha is binary inside the core: 255 marks a valid pixel, 0 a
/// transparent one. `threshold_alpha` enforces this after decoding.
#[derive(Clone, Debug)]
pub struct Raster {
    /// Interleaved RGBA, shape (height, width, 4).
    pub data: Array3<u8>,
}

impl Raster {
    /// Allocate a fully transparent raster.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_alloc("raster", width, height, CANVAS_CHANNELS)?;
        Ok(Self {
            data: Array3::zeros((height, width, CANVAS_CHANNELS)),
        })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        for (c, v) in rgba.iter().enumerate() {
            self.data[[y, x, c]] = *v;
        }
    }

    pub fn is_opaque(&self, x: usize, y: usize) -> bool {
        self.data[[y, x, 3]] == MAX_PIXEL_VALUE
    }

    /// Borrow one row of interleaved RGBA pixels, shape (width, 4).
    pub fn scanline(&self, y: usize) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(0), y)
    }

    /// Force binary alpha: any pixel not fully opaque becomes fully
    /// transparent with zeroed color channels.
    pub fn threshold_alpha(&mut self) {
        let (h, w, _) = self.data.dim();
        for y in 0..h {
            for x in 0..w {
                if self.data[[y, x, 3]] != MAX_PIXEL_VALUE {
                    for c in 0..CANVAS_CHANNELS {
                        self.data[[y, x, c]] = 0;
                    }
                }
            }
        }
    }

    /// Bounding rectangle of the opaque pixels, or `None` when every
    /// pixel is transparent.
    pub fn opaque_bbox(&self) -> Option<Roi> {
        let (h, w, _) = self.data.dim();
        let mut bbox: Option<Roi> = None;
        for y in 0..h {
            let row = self.scanline(y);
            for x in 0..w {
                if row[[x, 3]] == MAX_PIXEL_VALUE {
                    let px = Roi::new(x as u32, y as u32, x as u32, y as u32);
                    bbox = Some(match bbox {
                        Some(b) => b.union(&px),
                        None => px,
                    });
                }
            }
        }
        bbox
    }
}

/// Pyramid-pixel raster: signed channels plus a per-pixel validity plane.
///
/// Images use 3 channels; seam masks use 1.
#[derive(Clone, Debug)]
pub struct LevelRaster {
    /// Shape (height, width, channels).
    pub data: Array3<LevelValue>,
    /// A pixel with a clear bit carries no sample at this level.
    pub alpha: Array2<bool>,
}

impl LevelRaster {
    /// Allocate a zeroed, fully invalid level raster. `component` names
    /// the caller in the allocation-failure diagnostic.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        component: &'static str,
    ) -> Result<Self> {
        check_alloc(component, width, height, channels)?;
        Ok(Self {
            data: Array3::zeros((height, width, channels)),
            alpha: Array2::from_elem((height, width), false),
        })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }
}

/// Reject raster shapes the process cannot reasonably hold before ndarray
/// aborts on a failed allocation.
fn check_alloc(
    component: &'static str,
    width: usize,
    height: usize,
    channels: usize,
) -> Result<()> {
    let in_range = width <= MAX_CANVAS_DIM as usize && height <= MAX_CANVAS_DIM as usize;
    let fits = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .and_then(|n| n.checked_mul(std::mem::size_of::<LevelValue>()))
        .map(|n| n < isize::MAX as usize)
        .unwrap_or(false);
    if in_range && fits {
        Ok(())
    } else {
        Err(SeamlineError::Allocation {
            component,
            width,
            height,
        })
    }
}
