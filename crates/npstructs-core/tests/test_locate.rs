mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use npstructs_core::{
    find_starting_frame, locate_frame, locate_frame_detailed, Frame, LocateError, LocateParams,
};

#[test]
fn test_single_blob_is_located() {
    let frame = common::blob_frame(64, &[(32, 30)], 0.5);
    let records = locate_frame(&frame, 4, &LocateParams::default()).unwrap();

    assert_eq!(records.len(), 1);
    let rec = records[0];
    assert_abs_diff_eq!(rec.x, 32.0, epsilon = 0.5);
    assert_abs_diff_eq!(rec.y, 30.0, epsilon = 0.5);
    assert!(rec.size > 49.0);
    assert_eq!(rec.frame, 4);
}

#[test]
fn test_two_blobs_are_separated() {
    let frame = common::blob_frame(64, &[(20, 18), (40, 46)], 0.5);
    let located = locate_frame_detailed(&frame, 0, &LocateParams::default()).unwrap();

    assert_eq!(located.records.len(), 2);
    assert_eq!(located.contours.len(), 2);
    assert!(located.contours.iter().all(|c| c.closed));
    assert!(located.warnings.is_empty());

    // Contours are discovered in scan order; the upper blob comes first.
    assert_abs_diff_eq!(located.records[0].x, 20.0, epsilon = 0.5);
    assert_abs_diff_eq!(located.records[0].y, 18.0, epsilon = 0.5);
    assert_abs_diff_eq!(located.records[1].x, 40.0, epsilon = 0.5);
    assert_abs_diff_eq!(located.records[1].y, 46.0, epsilon = 0.5);
}

#[test]
fn test_dark_frame_has_no_structures() {
    let frame = common::flat_frame(32, 0.0);
    let records = locate_frame(&frame, 0, &LocateParams::default()).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_locate_is_deterministic() {
    let frame = common::blob_frame(64, &[(20, 18), (40, 46)], 0.4);
    let params = LocateParams::default();
    let a = locate_frame(&frame, 1, &params).unwrap();
    let b = locate_frame(&frame, 1, &params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_faint_blob_below_threshold_is_ignored() {
    // 1e-4 * 1e5 = 10, far below the default threshold of 180.
    let frame = common::blob_frame(48, &[(24, 24)], 1e-4);
    let records = locate_frame(&frame, 0, &LocateParams::default()).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_raising_threshold_never_adds_structures() {
    // Scaled peaks of roughly 50000, 1000 and 300.
    let frame = common::blob_frame_with(96, &[(24, 24, 0.5), (24, 72, 0.01), (72, 48, 0.003)]);
    let mut params = LocateParams::default();

    let counts: Vec<usize> = [50.0, 100.0, 200.0, 400.0, 1000.0, 5000.0, 20000.0, 60000.0]
        .into_iter()
        .map(|threshold| {
            params.preprocess.threshold = threshold;
            locate_frame(&frame, 0, &params).unwrap().len()
        })
        .collect();

    assert_eq!(counts.first(), Some(&3), "counts: {counts:?}");
    assert_eq!(counts.last(), Some(&0), "counts: {counts:?}");
    for pair in counts.windows(2) {
        assert!(pair[1] <= pair[0], "count rose with threshold: {counts:?}");
    }
}

#[test]
fn test_non_finite_pixels_are_rejected() {
    let mut frame = common::blob_frame(32, &[(16, 16)], 0.5);
    frame.data[[3, 3]] = f32::NAN;
    frame.data[[4, 4]] = f32::INFINITY;

    let err = locate_frame(&frame, 0, &LocateParams::default()).unwrap_err();
    assert!(matches!(err, LocateError::NonFinitePixels { count: 2 }));
}

#[test]
fn test_invalid_params_are_rejected() {
    let frame = common::flat_frame(16, 0.0);
    let mut params = LocateParams::default();
    params.segment.dilation_size = 0;

    let err = locate_frame(&frame, 0, &params).unwrap_err();
    assert!(matches!(
        err,
        LocateError::InvalidParameter {
            name: "dilation_size",
            ..
        }
    ));
}

#[test]
fn test_find_starting_frame() {
    let frames: Vec<Frame> = [0.001f32, 0.002, 0.9, 0.95]
        .iter()
        .map(|&v| common::flat_frame(4, v))
        .collect();
    assert_eq!(find_starting_frame(&frames, 0.5), Some(2));
    assert_eq!(find_starting_frame(&frames, 2.0), None);
    assert_eq!(find_starting_frame(&frames[..1], 0.5), None);
}

#[test]
fn test_starting_frame_needs_dark_to_bright_transition() {
    // Already bright from the first frame: no transition.
    let frames: Vec<Frame> = [0.9f32, 0.9, 0.9]
        .iter()
        .map(|&v| common::flat_frame(4, v))
        .collect();
    assert_eq!(find_starting_frame(&frames, 0.5), None);
}

#[test]
fn test_counts_normalization() {
    let counts = Array2::from_elem((2, 2), 500u16);
    let frame = Frame::from_counts(&counts);
    assert_eq!(frame.original_bit_depth, 16);
    assert_abs_diff_eq!(frame.data[[0, 0]], 500.0 / 65535.0, epsilon = 1e-7);
    assert_abs_diff_eq!(frame.normalize_counts(500.0), frame.data[[0, 0]], epsilon = 1e-7);
    assert_abs_diff_eq!(frame.max_intensity(), frame.data[[1, 1]], epsilon = 0.0);
}
