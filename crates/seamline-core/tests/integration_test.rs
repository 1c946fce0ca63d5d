mod common;

use common::{grey_raster, raster_from_fn, solid_raster};
use seamline_core::error::SeamlineError;
use seamline_core::filter::filter_half_width;
use seamline_core::io::image_io::save_raster;
use seamline_core::pipeline::{choose_levels, run_blend, BlendConfig, InputSpec};
use seamline_core::raster::Raster;
use seamline_core::roi::Roi;
use tempfile::TempDir;

fn setup(images: &[(&Raster, u32, u32)]) -> (TempDir, BlendConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut inputs = Vec::new();
    for (i, (raster, x, y)) in images.iter().enumerate() {
        let path = dir.path().join(format!("input{i}.png"));
        save_raster(raster, &path).unwrap();
        inputs.push(InputSpec::new(path, *x, *y));
    }
    let config = BlendConfig {
        inputs,
        output: dir.path().join("out.png"),
        one_at_a_time: false,
        max_levels: None,
        jpeg_quality: None,
        dump_pyramids: None,
    };
    (dir, config)
}

fn run(config: &BlendConfig) -> Raster {
    run_blend(config).unwrap()
}

#[test]
fn test_single_image_passthrough() {
    let red = solid_raster(4, 4, [255, 0, 0]);
    let (_dir, config) = setup(&[(&red, 0, 0)]);

    let out = run(&config);
    assert_eq!(out.width(), 4);
    assert_eq!(out.height(), 4);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(out.pixel(x, y), [255, 0, 0, 255]);
        }
    }
    assert!(config.output.exists());
}

#[test]
fn test_disjoint_halves_pack_without_blending() {
    let red = solid_raster(4, 8, [255, 0, 0]);
    let blue = solid_raster(4, 8, [0, 0, 255]);
    let (_dir, config) = setup(&[(&red, 0, 0), (&blue, 4, 0)]);

    let out = run(&config);
    assert_eq!(out.width(), 8);
    assert_eq!(out.height(), 8);
    for y in 0..8 {
        assert_eq!(out.pixel(3, y), [255, 0, 0, 255]);
        assert_eq!(out.pixel(4, y), [0, 0, 255, 255]);
    }
}

#[test]
fn test_disjoint_packing_commutes() {
    let red = solid_raster(4, 8, [255, 0, 0]);
    let blue = solid_raster(4, 8, [0, 0, 255]);

    let (_dir_a, config_a) = setup(&[(&red, 0, 0), (&blue, 4, 0)]);
    let (_dir_b, config_b) = setup(&[(&blue, 4, 0), (&red, 0, 0)]);

    let out_a = run(&config_a);
    let out_b = run(&config_b);
    assert_eq!(out_a.data, out_b.data);
}

#[test]
fn test_identical_full_overlap() {
    let grey = grey_raster(8, 8, 128);
    let (_dir, config) = setup(&[(&grey, 0, 0), (&grey, 0, 0)]);

    let out = run(&config);
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(out.data[[y, x, 3]], 255);
            for c in 0..3 {
                let diff = (i32::from(out.data[[y, x, c]]) - 128).abs();
                assert!(diff <= 1, "channel {c} at ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_gradient_overlap_blends_smoothly() {
    // Two opposing linear ramps meeting over an 8-pixel overlap. The
    // composite must follow each source exactly outside the working
    // region and transition without hard jumps inside it.
    let a = raster_from_fn(12, 8, |x, _| {
        let v = (16 * x) as u8;
        Some([v, v, v])
    });
    let b = raster_from_fn(12, 8, |x, _| {
        let v = (176 - 16 * x as i32) as u8;
        Some([v, v, v])
    });
    let (_dir, config) = setup(&[(&a, 0, 0), (&b, 4, 0)]);

    let out = run(&config);
    assert_eq!(out.width(), 16);

    for y in 0..8 {
        // Outside the grown overlap the sources pass through verbatim.
        for x in [0usize, 1] {
            assert_eq!(out.data[[y, x, 0]], (16 * x) as u8);
        }
        for x in [14usize, 15] {
            assert_eq!(out.data[[y, x, 0]], (240 - 16 * x as i32) as u8);
        }

        for x in 0..15 {
            let delta =
                (i32::from(out.data[[y, x + 1, 0]]) - i32::from(out.data[[y, x, 0]])).abs();
            assert!(delta <= 24, "jump of {delta} at ({x}, {y})");
        }
    }
}

#[test]
fn test_l_shaped_overlap() {
    let red = solid_raster(8, 4, [255, 0, 0]);
    let blue = solid_raster(8, 4, [0, 0, 255]);
    let (_dir, config) = setup(&[(&red, 0, 0), (&blue, 4, 0)]);

    // The 4x4 overlap only supports a single-level blend.
    let overlap = Roi::from_origin_size(4, 0, 4, 4);
    let levels = choose_levels(&overlap, 255, None).unwrap();
    assert_eq!(levels, 1);
    let radius = filter_half_width(levels - 1, 255).unwrap();
    assert!(2 * radius + 1 <= overlap.width());

    let out = run(&config);
    assert_eq!(out.width(), 12);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(out.pixel(x, y), [255, 0, 0, 255]);
        }
        for x in 8..12 {
            assert_eq!(out.pixel(x, y), [0, 0, 255, 255]);
        }
        // Single-level blending selects one source per pixel.
        for x in 4..8 {
            let px = out.pixel(x, y);
            assert!(
                px == [255, 0, 0, 255] || px == [0, 0, 255, 255],
                "pixel ({x}, {y}) is {px:?}"
            );
        }
    }
}

#[test]
fn test_disjoint_inputs_keep_gap_transparent() {
    let a = solid_raster(4, 4, [10, 10, 10]);
    let b = solid_raster(4, 4, [20, 20, 20]);
    let (_dir, config) = setup(&[(&a, 0, 0), (&b, 5, 0)]);

    let out = run(&config);
    assert_eq!(out.width(), 9);
    for y in 0..4 {
        assert_eq!(out.pixel(4, y), [0, 0, 0, 0]);
    }
}

#[test]
fn test_no_overlap_one_at_a_time_is_error() {
    let a = solid_raster(4, 4, [10, 10, 10]);
    let b = solid_raster(4, 4, [20, 20, 20]);
    let (_dir, mut config) = setup(&[(&a, 0, 0), (&b, 5, 0)]);
    config.one_at_a_time = true;

    let err = run_blend(&config).unwrap_err();
    assert!(matches!(err, SeamlineError::Geometry(_)));
    assert!(!config.output.exists());
}

#[test]
fn test_empty_input_list_is_error() {
    let config = BlendConfig {
        inputs: Vec::new(),
        output: std::path::PathBuf::from("unused.png"),
        one_at_a_time: false,
        max_levels: None,
        jpeg_quality: None,
        dump_pyramids: None,
    };
    let err = run_blend(&config).unwrap_err();
    assert!(matches!(err, SeamlineError::EmptyInput));
}

#[test]
fn test_positions_normalise_to_tight_canvas() {
    let grey = grey_raster(4, 4, 77);
    let (_dir, config) = setup(&[(&grey, 5, 3)]);

    let out = run(&config);
    assert_eq!(out.width(), 4);
    assert_eq!(out.height(), 4);
    assert_eq!(out.pixel(0, 0), [77, 77, 77, 255]);
}

#[test]
fn test_level_cap_limits_depth() {
    // With the depth capped at one the blend still completes; the seam
    // is simply hard.
    let a = grey_raster(16, 16, 40);
    let b = grey_raster(16, 16, 200);
    let (_dir, mut config) = setup(&[(&a, 0, 0), (&b, 8, 0)]);
    config.max_levels = Some(1);

    let out = run(&config);
    assert_eq!(out.width(), 24);
    for y in 0..16 {
        for x in 0..24 {
            let v = out.data[[y, x, 0]];
            assert!(v == 40 || v == 200, "pixel ({x}, {y}) is {v}");
        }
    }
}

#[test]
fn test_dump_pyramids_writes_levels() {
    let a = grey_raster(8, 8, 60);
    let b = grey_raster(8, 8, 180);
    let (dir, mut config) = setup(&[(&a, 0, 0), (&b, 4, 0)]);
    config.dump_pyramids = Some(dir.path().join("pyr"));

    let out = run(&config);
    assert_eq!(out.width(), 12);
    // Overlap is 4x8, so the blend runs with a single level.
    assert!(dir.path().join("pyr-0-l0.png").exists());
}
