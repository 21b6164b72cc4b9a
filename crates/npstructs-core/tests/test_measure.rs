mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use npstructs_core::measure::{find_contours, polygon_area, vertex_centroid, ContourPoint};
use npstructs_core::{measure, ResultTable, StructureRecord};

fn point(row: f64, col: f64) -> ContourPoint {
    ContourPoint { row, col }
}

#[test]
fn test_single_pixel_traces_diamond() {
    let mut labels = Array2::<u32>::zeros((11, 11));
    labels[[5, 5]] = 1;

    let contours = find_contours(&labels, 0.0);
    assert_eq!(contours.len(), 1);
    assert!(contours[0].closed);
    assert_eq!(contours[0].len(), 4);

    let records = measure(&labels, 0);
    assert_eq!(records.len(), 1);
    assert_abs_diff_eq!(records[0].x, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(records[0].y, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(records[0].size, 2.0, epsilon = 1e-12);
}

#[test]
fn test_rectangle_area_and_centre() {
    // 6 rows x 4 cols. At level 0 the boundary runs through the neighbouring
    // background pixel centres with the corners cut, enclosing (h+1)(w+1) - 2.
    let mut labels = Array2::<u32>::zeros((20, 20));
    for r in 5..11 {
        for c in 8..12 {
            labels[[r, c]] = 1;
        }
    }

    let records = measure(&labels, 3);
    assert_eq!(records.len(), 1);
    let rec = records[0];
    assert_abs_diff_eq!(rec.x, 7.5, epsilon = 1e-9);
    assert_abs_diff_eq!(rec.y, 9.5, epsilon = 1e-9);
    assert_abs_diff_eq!(rec.size, 33.0, epsilon = 1e-9);
    assert_eq!(rec.frame, 3);
}

#[test]
fn test_closed_contour_has_no_repeated_vertex() {
    let mut labels = Array2::<u32>::zeros((8, 8));
    for r in 2..5 {
        for c in 2..5 {
            labels[[r, c]] = 7;
        }
    }
    let contours = find_contours(&labels, 0.0);
    assert_eq!(contours.len(), 1);
    let pts = &contours[0].points;
    assert_ne!(pts.first(), pts.last());
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_centroid_counts_each_vertex_once() {
    // L-shape, so the first vertex is far from the centroid.
    let mut labels = Array2::<u32>::zeros((12, 12));
    for r in 2..9 {
        labels[[r, 2]] = 1;
        labels[[r, 3]] = 1;
    }
    for c in 4..8 {
        labels[[7, c]] = 1;
        labels[[8, c]] = 1;
    }

    let contours = find_contours(&labels, 0.0);
    assert_eq!(contours.len(), 1);
    let pts = &contours[0].points;
    let n = pts.len() as f64;
    let mean_row = pts.iter().map(|p| p.row).sum::<f64>() / n;
    let mean_col = pts.iter().map(|p| p.col).sum::<f64>() / n;

    let rec = measure(&labels, 0)[0];
    assert_abs_diff_eq!(rec.x, mean_row, epsilon = 1e-12);
    assert_abs_diff_eq!(rec.y, mean_col, epsilon = 1e-12);

    // Repeating the first vertex, as a closed polyline would, shifts the mean.
    let repeated_row = (mean_row * n + pts[0].row) / (n + 1.0);
    let repeated_col = (mean_col * n + pts[0].col) / (n + 1.0);
    assert!((rec.x - repeated_row).abs() + (rec.y - repeated_col).abs() > 1e-3);
}

#[test]
fn test_empty_raster_has_no_records() {
    let labels = Array2::<u32>::zeros((16, 16));
    assert!(find_contours(&labels, 0.0).is_empty());
    assert!(measure(&labels, 0).is_empty());
}

#[test]
fn test_separate_regions_give_separate_contours() {
    let mut labels = Array2::<u32>::zeros((20, 30));
    for r in 4..8 {
        for c in 3..7 {
            labels[[r, c]] = 1;
        }
        for c in 20..25 {
            labels[[r, c]] = 2;
        }
    }

    let records = measure(&labels, 0);
    assert_eq!(records.len(), 2);
    let mut ys: Vec<f64> = records.iter().map(|r| r.y).collect();
    ys.sort_by(f64::total_cmp);
    assert_abs_diff_eq!(ys[0], 4.5, epsilon = 1e-9);
    assert_abs_diff_eq!(ys[1], 22.0, epsilon = 1e-9);
}

#[test]
fn test_touching_labels_share_one_outline() {
    // Level 0 separates background from any label, so adjacent labels merge.
    let mut labels = Array2::<u32>::zeros((10, 10));
    for r in 3..6 {
        labels[[r, 3]] = 1;
        labels[[r, 4]] = 2;
    }
    assert_eq!(measure(&labels, 0).len(), 1);
}

#[test]
fn test_region_on_border_gives_open_contour() {
    let mut labels = Array2::<u32>::zeros((10, 10));
    for c in 0..4 {
        labels[[0, c]] = 1;
    }
    let contours = find_contours(&labels, 0.0);
    assert_eq!(contours.len(), 1);
    assert!(!contours[0].closed);
}

#[test]
fn test_float_contours_interpolate() {
    let mut data = Array2::<f32>::zeros((5, 5));
    data[[2, 2]] = 1.0;
    let contours = find_contours(&data, 0.5);
    assert_eq!(contours.len(), 1);
    let c = &contours[0];
    assert!(c.closed);
    assert!(c.points.contains(&point(1.5, 2.0)));
    assert!(c.points.contains(&point(2.0, 2.5)));
    assert_abs_diff_eq!(polygon_area(&c.points), 0.5, epsilon = 1e-12);
}

#[test]
fn test_geometry_helpers() {
    let square = [point(0.0, 0.0), point(0.0, 2.0), point(2.0, 2.0), point(2.0, 0.0)];
    assert_abs_diff_eq!(polygon_area(&square), 4.0, epsilon = 1e-12);
    assert_eq!(vertex_centroid(&square), Some((1.0, 1.0)));

    assert_eq!(polygon_area(&square[..2]), 0.0);
    assert_eq!(vertex_centroid(&[]), None);
}

#[test]
fn test_result_table_accessors() {
    let rec = |frame| StructureRecord {
        x: 1.0,
        y: 2.0,
        size: 3.0,
        frame,
    };
    let mut table = ResultTable::new();
    table.extend_fragment(vec![rec(0), rec(0)]);
    table.extend_fragment(vec![rec(2)]);

    assert_eq!(table.len(), 3);
    assert_eq!(table.frames(), vec![0, 0, 2]);
    assert_eq!(table.for_frame(0).count(), 2);

    table.offset_frames(10);
    assert_eq!(table.frames(), vec![10, 10, 12]);

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json.as_array().map(|a| a.len()), Some(3));
    assert_eq!(json[2]["frame"], 12);
}
