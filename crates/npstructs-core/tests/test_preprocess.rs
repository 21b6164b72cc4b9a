mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use npstructs_core::preprocess::background::{disk_half_widths, grey_opening_disk};
use npstructs_core::preprocess::preprocess_detailed;
use npstructs_core::preprocess::smooth::gaussian_blur_array;
use npstructs_core::preprocess::{binarize, scale_intensity, smooth, white_tophat};
use npstructs_core::{preprocess, LocateError, PreprocessParams};

#[test]
fn test_disk_footprint_shape() {
    let spans = disk_half_widths(2);
    assert_eq!(
        spans,
        vec![(-2, 0), (-1, 1), (0, 2), (1, 1), (2, 0)]
    );
}

#[test]
fn test_tophat_removes_flat_background() {
    let data = Array2::from_elem((24, 24), 0.3f32);
    let out = white_tophat(&data, 9);
    for &v in out.iter() {
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-7);
    }
}

#[test]
fn test_tophat_keeps_small_spot() {
    let mut data = Array2::from_elem((32, 32), 0.2f32);
    for r in 15..=17 {
        for c in 15..=17 {
            data[[r, c]] = 0.7;
        }
    }
    let out = white_tophat(&data, 9);
    assert_abs_diff_eq!(out[[16, 16]], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(out[[0, 0]], 0.0, epsilon = 1e-7);
    assert_abs_diff_eq!(out[[16, 25]], 0.0, epsilon = 1e-7);
}

#[test]
fn test_opening_never_exceeds_input() {
    let data = Array2::from_shape_fn((20, 20), |(r, c)| ((r * 7 + c * 3) % 11) as f32 / 10.0);
    let opened = grey_opening_disk(&data, 3);
    for (o, d) in opened.iter().zip(data.iter()) {
        assert!(o <= d);
    }
    assert!(white_tophat(&data, 3).iter().all(|&v| v >= 0.0));
}

#[test]
fn test_blur_preserves_mass() {
    let mut data = Array2::<f32>::zeros((21, 21));
    data[[10, 10]] = 1.0;
    let blurred = gaussian_blur_array(&data, 1.0);
    assert_abs_diff_eq!(blurred.sum(), 1.0, epsilon = 1e-5);
    assert!(blurred[[10, 10]] < 1.0);
    assert_abs_diff_eq!(blurred[[10, 9]], blurred[[10, 11]], epsilon = 1e-7);
}

#[test]
fn test_zero_sigma_is_identity() {
    let data = Array2::from_shape_fn((8, 8), |(r, c)| (r + c) as f32);
    assert_eq!(gaussian_blur_array(&data, 0.0), data);
    assert_eq!(smooth(&data, 0.0, 3), data);
}

#[test]
fn test_smoothing_passes_are_sequential() {
    let mut data = Array2::<f32>::zeros((21, 21));
    data[[10, 10]] = 1.0;

    let twice = smooth(&data, 1.0, 2);
    let chained = gaussian_blur_array(&gaussian_blur_array(&data, 1.0), 1.0);
    assert_eq!(twice, chained);

    let once = smooth(&data, 1.0, 1);
    assert!(twice[[10, 10]] < once[[10, 10]]);
    assert_eq!(smooth(&data, 1.0, 0), data);
}

#[test]
fn test_scale_and_binarize() {
    let data = Array2::from_shape_vec((1, 4), vec![0.0f32, 0.001, 0.002, 0.5]).unwrap();
    let scaled = scale_intensity(&data, 1000.0);
    assert_abs_diff_eq!(scaled[[0, 3]], 500.0, epsilon = 1e-3);

    let binary = binarize(&scaled, 1.5);
    assert_eq!(binary.row(0).to_vec(), vec![false, false, true, true]);
}

#[test]
fn test_threshold_is_inclusive() {
    let data = Array2::from_elem((2, 2), 180.0f32);
    assert!(binarize(&data, 180.0).iter().all(|&b| b));
}

#[test]
fn test_dark_frame_yields_empty_mask() {
    let frame = common::flat_frame(32, 0.0);
    let binary = preprocess(&frame.data, &PreprocessParams::default()).unwrap();
    assert_eq!(binary.dim(), (32, 32));
    assert!(binary.iter().all(|&b| !b));
}

#[test]
fn test_uniform_illumination_yields_empty_mask() {
    let frame = common::flat_frame(32, 0.6);
    let binary = preprocess(&frame.data, &PreprocessParams::default()).unwrap();
    assert!(binary.iter().all(|&b| !b));
}

#[test]
fn test_bright_blob_is_marked() {
    let frame = common::blob_frame(48, &[(24, 24)], 0.5);
    let stages = preprocess_detailed(&frame.data, &PreprocessParams::default()).unwrap();

    assert!(stages.binary[[24, 24]]);
    assert!(!stages.binary[[0, 0]]);
    assert!(!stages.binary[[24, 45]]);
    // Smoothing spreads the plateau, so the mask is wider than the 7x7 blob.
    assert!(stages.binary[[24, 28]]);
    assert!(stages.scaled[[24, 24]] > 1e4);
    assert_eq!(stages.smoothed.dim(), (48, 48));
}

#[test]
fn test_rejects_negative_sigma() {
    let params = PreprocessParams {
        sigma: -1.0,
        ..Default::default()
    };
    let data = Array2::<f32>::zeros((8, 8));
    let err = preprocess(&data, &params).unwrap_err();
    assert!(matches!(err, LocateError::InvalidParameter { name: "sigma", .. }));
}

#[test]
fn test_rejects_non_finite_scale() {
    let params = PreprocessParams {
        scale_factor: f32::NAN,
        ..Default::default()
    };
    assert!(params.validate().is_err());
}
