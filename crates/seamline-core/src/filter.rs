use crate::consts::KERNEL;
use crate::error::{Result, SeamlineError};
use crate::raster::LevelValue;

/// Half width of the level-`level` filter, accounting for pyramid pixel
/// precision and rounding.
///
/// Convolves the unit step `u(-x) * max_value` up through `level`
/// reductions, tracking only the samples at positions 0 and 2^l (every
/// other sample stays zero by symmetry) and rounding to the pyramid
/// pixel type at each level. The moment the sample at 2^l rounds to
/// zero, the support has stopped growing and the half width is 2^(l-1).
/// Otherwise it is the arithmetic half width 2^level.
///
/// The driver grows the overlap region by this radius so that no pixel
/// inside it is contaminated by the region boundary after `level`
/// reductions.
pub fn filter_half_width(level: u32, max_value: u32) -> Result<u32> {
    if i64::from(max_value) > i64::from(LevelValue::MAX) {
        return Err(SeamlineError::PrecisionOverflow {
            max_value,
            limit: i64::from(LevelValue::MAX),
        });
    }

    let max = f64::from(max_value);
    // Sample at position 0 / position 2^l of the current level.
    let mut s_zero = max_value as LevelValue;
    let mut s_one: LevelValue = 0;

    for l in 1..=level {
        let p_zero = f64::from(s_zero);
        let p_one = f64::from(s_one);

        // Position 0 sees the step plateau through taps 0 and 1.
        let n_zero = p_zero * KERNEL[2] + p_one * KERNEL[3] + max * KERNEL[0] + max * KERNEL[1];
        let n_one = p_zero * KERNEL[0] + p_one * KERNEL[1];

        s_zero = n_zero.round() as LevelValue;
        s_one = n_one.round() as LevelValue;

        if s_one == 0 {
            // Sample 2^(l-1) on the previous level is the rightmost
            // nonzero value.
            return Ok(1 << (l - 1));
        }
    }

    Ok(1 << level)
}
