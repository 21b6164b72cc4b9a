//! Iso-level contour tracing by marching squares.
//!
//! Each 2x2 block of pixel centres is classified by which corners lie above
//! the level; the block contributes up to two oriented line segments whose
//! endpoints are linearly interpolated along the block edges. Segments are
//! then chained end-to-start into contours. Saddle blocks keep the low
//! region connected.

use std::collections::{BTreeMap, HashMap, VecDeque};

use ndarray::Array2;
use serde::Serialize;

/// A contour vertex in sub-pixel `(row, col)` coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ContourPoint {
    pub row: f64,
    pub col: f64,
}

impl ContourPoint {
    fn key(&self) -> (u64, u64) {
        // +0.0 folds a negative zero onto zero so equal points hash equally.
        ((self.row + 0.0).to_bits(), (self.col + 0.0).to_bits())
    }
}

/// One traced boundary.
///
/// Closed contours do not repeat their first vertex at the end.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
    pub closed: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trace all iso-contours of `raster` at `level`.
///
/// A pixel counts as inside when its value is strictly greater than `level`.
/// Contours are returned in discovery order: the raster-scan position of the
/// block where each was started.
pub fn find_contours<T>(raster: &Array2<T>, level: f64) -> Vec<Contour>
where
    T: Copy + Into<f64>,
{
    let segments = contour_segments(raster, level);
    assemble(segments)
}

fn fraction(from: f64, to: f64, level: f64) -> f64 {
    if to == from {
        return 0.0;
    }
    (level - from) / (to - from)
}

fn contour_segments<T>(raster: &Array2<T>, level: f64) -> Vec<(ContourPoint, ContourPoint)>
where
    T: Copy + Into<f64>,
{
    let (h, w) = raster.dim();
    let mut segments = Vec::new();
    if h < 2 || w < 2 {
        return segments;
    }

    let v = |r: usize, c: usize| -> f64 { raster[[r, c]].into() };

    for r in 0..h - 1 {
        for c in 0..w - 1 {
            let ul = v(r, c);
            let ur = v(r, c + 1);
            let ll = v(r + 1, c);
            let lr = v(r + 1, c + 1);

            let case = (ul > level) as u8
                | ((ur > level) as u8) << 1
                | ((ll > level) as u8) << 2
                | ((lr > level) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            let (rf, cf) = (r as f64, c as f64);
            let top = ContourPoint {
                row: rf,
                col: cf + fraction(ul, ur, level),
            };
            let bottom = ContourPoint {
                row: rf + 1.0,
                col: cf + fraction(ll, lr, level),
            };
            let left = ContourPoint {
                row: rf + fraction(ul, ll, level),
                col: cf,
            };
            let right = ContourPoint {
                row: rf + fraction(ur, lr, level),
                col: cf + 1.0,
            };

            match case {
                1 => segments.push((top, left)),
                2 => segments.push((right, top)),
                3 => segments.push((right, left)),
                4 => segments.push((left, bottom)),
                5 => segments.push((top, bottom)),
                6 => {
                    segments.push((right, top));
                    segments.push((left, bottom));
                }
                7 => segments.push((right, bottom)),
                8 => segments.push((bottom, right)),
                9 => {
                    segments.push((top, left));
                    segments.push((bottom, right));
                }
                10 => segments.push((bottom, top)),
                11 => segments.push((bottom, left)),
                12 => segments.push((left, right)),
                13 => segments.push((top, right)),
                14 => segments.push((left, top)),
                _ => unreachable!("4-bit case outside 1..=14"),
            }
        }
    }

    segments
}

/// Chain oriented segments into contours by matching endpoints.
fn assemble(segments: Vec<(ContourPoint, ContourPoint)>) -> Vec<Contour> {
    let mut contours: BTreeMap<usize, VecDeque<ContourPoint>> = BTreeMap::new();
    // Open contour ids keyed by their first / last vertex.
    let mut starts: HashMap<(u64, u64), usize> = HashMap::new();
    let mut ends: HashMap<(u64, u64), usize> = HashMap::new();
    let mut next_id = 0usize;

    for (from, to) in segments {
        if from == to {
            continue;
        }

        let tail = starts.remove(&to.key());
        let head = ends.remove(&from.key());

        match (head, tail) {
            (Some(h), Some(t)) if h == t => {
                // Segment closes the loop.
                if let Some(c) = contours.get_mut(&h) {
                    c.push_back(to);
                }
            }
            (Some(h), Some(t)) => {
                // Join head ... from -> to ... tail, keeping the older id.
                if t > h {
                    let tail_points = contours.remove(&t).unwrap_or_default();
                    if let Some(c) = contours.get_mut(&h) {
                        c.extend(tail_points);
                        if let Some(last) = c.back() {
                            ends.insert(last.key(), h);
                        }
                    }
                } else {
                    let head_points = contours.remove(&h).unwrap_or_default();
                    if let Some(c) = contours.get_mut(&t) {
                        for p in head_points.into_iter().rev() {
                            c.push_front(p);
                        }
                        if let Some(first) = c.front() {
                            starts.insert(first.key(), t);
                        }
                    }
                }
            }
            (None, None) => {
                contours.insert(next_id, VecDeque::from([from, to]));
                starts.insert(from.key(), next_id);
                ends.insert(to.key(), next_id);
                next_id += 1;
            }
            (None, Some(t)) => {
                if let Some(c) = contours.get_mut(&t) {
                    c.push_front(from);
                }
                starts.insert(from.key(), t);
            }
            (Some(h), None) => {
                if let Some(c) = contours.get_mut(&h) {
                    c.push_back(to);
                }
                ends.insert(to.key(), h);
            }
        }
    }

    contours
        .into_values()
        .map(|points| {
            let mut points: Vec<ContourPoint> = points.into();
            let closed = points.len() > 2 && points.first() == points.last();
            if closed {
                points.pop();
            }
            Contour { points, closed }
        })
        .collect()
}
