//! Binary mask to labeled structure regions.
//!
//! Pipeline: Sobel edges -> dilate -> drop small fragments -> fill outlines
//! from the corner -> erode -> drop small fragments -> label -> watershed.

pub mod components;
pub mod edges;
pub mod fill;
pub mod morphology;
pub mod watershed;

use ndarray::Array2;

use crate::config::SegmentParams;
use crate::error::Result;
use crate::frame::{BinaryImage, LabelRaster};

pub use components::{
    count_regions, label_components, region_pixel_counts, region_stats, remove_small_objects,
    touches_border, ComponentStats,
};
pub use edges::detect_edges;
pub use fill::{fill_from_corner, flood};
pub use morphology::{dilate_square, erode_square};
pub use watershed::watershed;

/// Best-effort conditions worth surfacing without failing the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryWarning {
    /// The hole-filling flood seed (0, 0) lies on an outline, so the fill is unreliable.
    FloodSeedOnEdge,
    /// A labeled region reaches the image border; its outline may not have been closed.
    RegionTouchesBorder { label: u32 },
}

impl std::fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FloodSeedOnEdge => write!(f, "hole-filling seed (0, 0) lies on an outline"),
            Self::RegionTouchesBorder { label } => {
                write!(f, "region {label} touches the image border")
            }
        }
    }
}

/// Every intermediate raster of one segmentation run.
#[derive(Clone, Debug)]
pub struct SegmentStages {
    pub edges: BinaryImage,
    pub dilated: BinaryImage,
    pub edges_cleaned: BinaryImage,
    pub filled: BinaryImage,
    pub eroded: BinaryImage,
    pub cleaned: BinaryImage,
    pub markers: LabelRaster,
    pub labels: LabelRaster,
    pub warnings: Vec<GeometryWarning>,
}

/// Segment a binary image into labeled structures.
pub fn segment(binary: &BinaryImage, params: &SegmentParams) -> Result<LabelRaster> {
    Ok(segment_detailed(binary, params)?.labels)
}

/// Same as [`segment`], keeping every intermediate stage and the geometry warnings.
pub fn segment_detailed(binary: &BinaryImage, params: &SegmentParams) -> Result<SegmentStages> {
    params.validate()?;
    let (h, w) = binary.dim();

    let edges = detect_edges(binary);
    let dilated = dilate_square(&edges, params.dilation_size);
    let edges_cleaned = remove_small_objects(&dilated, params.min_structure_size);
    let filled = fill_from_corner(&edges_cleaned);
    let eroded = erode_square(&filled, params.erosion_size);
    let cleaned = remove_small_objects(&eroded, params.min_structure_size);

    let (markers, _) = label_components(&cleaned);
    let flat = Array2::<f32>::zeros((h, w));
    let labels = watershed(&flat, &markers, Some(&cleaned))?;

    let mut warnings = Vec::new();
    if h > 0 && w > 0 && edges_cleaned[[0, 0]] {
        warnings.push(GeometryWarning::FloodSeedOnEdge);
    }
    warnings.extend(
        region_stats(&labels)
            .into_iter()
            .filter(|s| touches_border(s.bbox, h, w))
            .map(|s| GeometryWarning::RegionTouchesBorder { label: s.label }),
    );

    Ok(SegmentStages {
        edges,
        dilated,
        edges_cleaned,
        filled,
        eroded,
        cleaned,
        markers,
        labels,
        warnings,
    })
}
