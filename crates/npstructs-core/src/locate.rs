use tracing::{debug, warn};

use crate::config::LocateParams;
use crate::consts::CONTOUR_LEVEL;
use crate::error::{LocateError, Result};
use crate::frame::{Frame, LabelRaster};
use crate::measure::{find_contours, measure_contours, Contour, StructureRecord};
use crate::preprocess::preprocess;
use crate::segment::{segment_detailed, GeometryWarning};

/// Everything the pipeline derived from one frame.
#[derive(Clone, Debug)]
pub struct FrameLocation {
    pub frame: usize,
    pub records: Vec<StructureRecord>,
    pub labels: LabelRaster,
    pub contours: Vec<Contour>,
    pub warnings: Vec<GeometryWarning>,
}

/// Locate structures in one frame: preprocess -> segment -> measure.
///
/// Deterministic for identical inputs; every record is tagged with `frame_id`.
pub fn locate_frame(
    frame: &Frame,
    frame_id: usize,
    params: &LocateParams,
) -> Result<Vec<StructureRecord>> {
    Ok(locate_frame_detailed(frame, frame_id, params)?.records)
}

/// Same as [`locate_frame`], also returning the label raster, contours and
/// geometry warnings for inspection or overlay.
pub fn locate_frame_detailed(
    frame: &Frame,
    frame_id: usize,
    params: &LocateParams,
) -> Result<FrameLocation> {
    params.validate()?;
    let non_finite = frame.data.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        return Err(LocateError::NonFinitePixels { count: non_finite });
    }

    let binary = preprocess(&frame.data, &params.preprocess)?;
    let stages = segment_detailed(&binary, &params.segment)?;
    let contours = find_contours(&stages.labels, CONTOUR_LEVEL);
    let records = measure_contours(&contours, frame_id);

    for warning in &stages.warnings {
        warn!(frame = frame_id, "{warning}");
    }
    debug!(
        frame = frame_id,
        structures = records.len(),
        "Frame located"
    );

    Ok(FrameLocation {
        frame: frame_id,
        records,
        labels: stages.labels,
        contours,
        warnings: stages.warnings,
    })
}

/// Index of the first frame after the shutter opens.
///
/// Returns `i + 1` for the first `i` where frame `i` peaks below `threshold`
/// and frame `i + 1` reaches it. `threshold` is in the frames' normalized units.
pub fn find_starting_frame(frames: &[Frame], threshold: f32) -> Option<usize> {
    frames
        .windows(2)
        .position(|pair| pair[0].max_intensity() < threshold && pair[1].max_intensity() >= threshold)
        .map(|i| i + 1)
}
