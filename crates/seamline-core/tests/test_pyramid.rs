mod common;

use common::{grey_raster, raster_from_fn};
use ndarray::Array2;
use seamline_core::pyramid::{
    base_level, collapse, expand, gaussian_pyramid, laplacian_pyramid, reduce, ExpandMode,
};
use seamline_core::raster::{LevelRaster, Raster};
use seamline_core::roi::Roi;

fn full_roi(raster: &Raster) -> Roi {
    Roi::from_origin_size(0, 0, raster.width() as u32, raster.height() as u32)
}

#[test]
fn test_base_level_copies_roi_verbatim() {
    let raster = raster_from_fn(8, 8, |x, y| {
        if x < 4 {
            Some([(x * 10) as u8, (y * 10) as u8, 7])
        } else {
            None
        }
    });
    let level = base_level(&raster, &Roi::new(1, 1, 4, 4)).unwrap();

    assert_eq!(level.width(), 4);
    assert_eq!(level.height(), 4);
    assert_eq!(level.data[[0, 0, 0]], 10);
    assert_eq!(level.data[[0, 0, 1]], 10);
    assert!(level.alpha[[0, 0]]);
    // Column x = 4 on the canvas is transparent.
    assert!(!level.alpha[[0, 3]]);
}

#[test]
fn test_reduce_constant_preserves_value() {
    let raster = grey_raster(8, 8, 100);
    let level = base_level(&raster, &full_roi(&raster)).unwrap();
    let reduced = reduce(&level).unwrap();

    assert_eq!(reduced.width(), 4);
    assert_eq!(reduced.height(), 4);
    for y in 0..4 {
        for x in 0..4 {
            assert!(reduced.alpha[[y, x]]);
            for c in 0..3 {
                assert_eq!(reduced.data[[y, x, c]], 100);
            }
        }
    }
}

#[test]
fn test_reduce_transparency_normalisation() {
    // Left half opaque at 100, right half transparent. Every reduced
    // pixel whose window sees at least one opaque input must come out at
    // exactly 100: the renormalisation cancels the missing weight.
    let raster = raster_from_fn(8, 8, |x, _| if x < 4 { Some([100, 100, 100]) } else { None });
    let level = base_level(&raster, &full_roi(&raster)).unwrap();
    let reduced = reduce(&level).unwrap();

    for y in 0..4 {
        for ox in 0..4 {
            // Window is centered at input column 2*ox, spanning +-2.
            let window_sees_opaque = 2 * ox as i32 - 2 < 4;
            assert_eq!(reduced.alpha[[y, ox]], window_sees_opaque);
            let expected = if window_sees_opaque { 100 } else { 0 };
            assert_eq!(reduced.data[[y, ox, 0]], expected);
        }
    }
}

#[test]
fn test_reduce_all_transparent_stays_transparent() {
    let raster = raster_from_fn(6, 6, |_, _| None);
    let level = base_level(&raster, &full_roi(&raster)).unwrap();
    let reduced = reduce(&level).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            assert!(!reduced.alpha[[y, x]]);
            assert_eq!(reduced.data[[y, x, 0]], 0);
        }
    }
}

#[test]
fn test_expand_constant_dc_gain() {
    // expand(reduce(constant)) reproduces the constant at every pixel:
    // the kernel sums to one on each axis and the x4 scale restores the
    // mass lost to zero interleaving.
    let raster = grey_raster(4, 4, 100);
    let small = base_level(&raster, &full_roi(&raster)).unwrap();

    for (out_w, out_h) in [(8, 8), (7, 7)] {
        let mut dest = LevelRaster::new(out_w, out_h, 3, "test").unwrap();
        expand(&small, &mut dest, ExpandMode::Add);
        for y in 0..out_h {
            for x in 0..out_w {
                for c in 0..3 {
                    assert_eq!(dest.data[[y, x, c]], 100, "at ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn test_expand_subtract_of_self_expansion_is_zero() {
    let raster = grey_raster(4, 4, 60);
    let small = base_level(&raster, &full_roi(&raster)).unwrap();

    let mut dest = LevelRaster::new(8, 8, 3, "test").unwrap();
    expand(&small, &mut dest, ExpandMode::Add);
    expand(&small, &mut dest, ExpandMode::Subtract);
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(dest.data[[y, x, 0]], 0);
        }
    }
}

#[test]
fn test_gaussian_pyramid_dimensions() {
    let raster = grey_raster(9, 9, 50);
    let pyramid = gaussian_pyramid(base_level(&raster, &full_roi(&raster)).unwrap(), 3).unwrap();

    assert_eq!(pyramid.len(), 3);
    assert_eq!((pyramid[0].width(), pyramid[0].height()), (9, 9));
    assert_eq!((pyramid[1].width(), pyramid[1].height()), (4, 4));
    assert_eq!((pyramid[2].width(), pyramid[2].height()), (2, 2));
}

#[test]
fn test_laplacian_reconstruction() {
    let raster = raster_from_fn(16, 16, |x, y| {
        Some([
            ((x * 15 + y) % 256) as u8,
            ((y * 13 + 40) % 256) as u8,
            ((x * 7 + y * 5) % 256) as u8,
        ])
    });
    let roi = full_roi(&raster);
    let levels = 3;

    let pyramid = laplacian_pyramid(base_level(&raster, &roi).unwrap(), levels).unwrap();
    let mut dest = Raster::new(16, 16).unwrap();
    let out_mask = Array2::from_elem((16, 16), true);
    collapse(pyramid, &mut dest, &roi, &out_mask);

    let tolerance = levels.div_ceil(2) as i32;
    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(dest.data[[y, x, 3]], 255);
            for c in 0..3 {
                let got = i32::from(dest.data[[y, x, c]]);
                let want = i32::from(raster.data[[y, x, c]]);
                assert!(
                    (got - want).abs() <= tolerance,
                    "channel {c} at ({x}, {y}): {got} vs {want}"
                );
            }
        }
    }
}

#[test]
fn test_collapse_respects_output_mask() {
    let raster = grey_raster(8, 8, 200);
    let roi = full_roi(&raster);

    let pyramid = laplacian_pyramid(base_level(&raster, &roi).unwrap(), 2).unwrap();
    let mut dest = Raster::new(8, 8).unwrap();
    let mut out_mask = Array2::from_elem((8, 8), true);
    out_mask[[3, 5]] = false;
    collapse(pyramid, &mut dest, &roi, &out_mask);

    assert_eq!(dest.pixel(5, 3), [0, 0, 0, 0]);
    assert_eq!(dest.pixel(4, 3), [200, 200, 200, 255]);
}
