//! Label raster to per-structure geometric records.

pub mod contours;
pub mod geometry;

use serde::{Deserialize, Serialize};

use crate::consts::CONTOUR_LEVEL;
use crate::frame::LabelRaster;

pub use contours::{find_contours, Contour, ContourPoint};
pub use geometry::{polygon_area, vertex_centroid};

/// One detected structure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureRecord {
    /// Row coordinate of the boundary centroid.
    ///
    /// The centroid is the plain mean of the contour vertices. A closed
    /// contour lists each vertex once, so `x`/`y` differ slightly from tools
    /// that average a polyline ending on a copy of its first vertex.
    pub x: f64,
    /// Column coordinate of the boundary centroid; see `x`.
    pub y: f64,
    /// Polygon area of the boundary contour, in pixel² (not the pixel count).
    pub size: f64,
    /// Index of the source frame in its sequence.
    pub frame: usize,
}

/// Trace the boundaries of a label raster and measure each one.
///
/// One record per contour, in contour discovery order. A raster without
/// foreground yields an empty list.
pub fn measure(labels: &LabelRaster, frame: usize) -> Vec<StructureRecord> {
    let contours = find_contours(labels, CONTOUR_LEVEL);
    measure_contours(&contours, frame)
}

/// Measure already traced contours.
pub fn measure_contours(contours: &[Contour], frame: usize) -> Vec<StructureRecord> {
    contours
        .iter()
        .filter_map(|contour| {
            let (x, y) = vertex_centroid(&contour.points)?;
            Some(StructureRecord {
                x,
                y,
                size: polygon_area(&contour.points),
                frame,
            })
        })
        .collect()
}

/// Structure records of a whole sequence, ordered by frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    records: Vec<StructureRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StructureRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StructureRecord> {
        self.records.iter()
    }

    /// Append one frame's records.
    pub fn extend_fragment(&mut self, fragment: impl IntoIterator<Item = StructureRecord>) {
        self.records.extend(fragment);
    }

    /// Records that came from `frame`.
    pub fn for_frame(&self, frame: usize) -> impl Iterator<Item = &StructureRecord> {
        self.records.iter().filter(move |r| r.frame == frame)
    }

    /// Frame column, in row order.
    pub fn frames(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.frame).collect()
    }

    /// Shift every frame id by `offset`, e.g. when the processed frames were
    /// a tail slice of a longer movie.
    pub fn offset_frames(&mut self, offset: usize) {
        for r in &mut self.records {
            r.frame += offset;
        }
    }

    pub fn into_records(self) -> Vec<StructureRecord> {
        self.records
    }
}

impl From<Vec<StructureRecord>> for ResultTable {
    fn from(records: Vec<StructureRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<StructureRecord> for ResultTable {
    fn from_iter<I: IntoIterator<Item = StructureRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a StructureRecord;
    type IntoIter = std::slice::Iter<'a, StructureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
