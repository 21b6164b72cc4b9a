use super::contours::ContourPoint;

/// Arithmetic mean of the vertices, as `(row, col)`. `None` for no vertices.
pub fn vertex_centroid(points: &[ContourPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sum_row, sum_col) = points
        .iter()
        .fold((0.0, 0.0), |(r, c), p| (r + p.row, c + p.col));
    Some((sum_row / n, sum_col / n))
}

/// Polygon area by the shoelace formula, treating the vertex list as cyclic.
///
/// `0.5 * |Σ xᵢ·yᵢ₊₁ − Σ yᵢ·xᵢ₊₁|`. Fewer than three vertices give 0.
pub fn polygon_area(points: &[ContourPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_signed: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.row * b.col - a.col * b.row)
        .sum();
    0.5 * twice_signed.abs()
}
