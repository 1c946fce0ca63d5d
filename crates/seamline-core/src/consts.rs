/// Burt-Adelson generating kernel parameter.
pub const KERNEL_A: f64 = 0.4;

/// Separable 5-tap kernel [1/4 - a/2, 1/4, a, 1/4, 1/4 - a/2] with a = 0.4.
/// Sums to 1 on each axis, so reduce and expand preserve DC gain.
pub const KERNEL: [f64; 5] = [
    0.25 - KERNEL_A / 2.0,
    0.25,
    KERNEL_A,
    0.25,
    0.25 - KERNEL_A / 2.0,
];

/// Integer kernel weights scaled by 100. Per-axis sum is 100, so a full
/// 5x5 window tallies 10_000. Used to renormalise reduce windows that
/// contain transparent pixels.
pub const KERNEL_100: [u32; 5] = [5, 25, 40, 25, 5];

/// Maximum 8-bit channel value. Also the opaque alpha value and the
/// maximum seam mask value.
pub const MAX_PIXEL_VALUE: u8 = 255;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Upper bound on either canvas dimension; guards raster allocations.
pub const MAX_CANVAS_DIM: u32 = 1 << 20;
