//! Frame sources: multi-page TIFF movies, single images and directories of images.

pub mod image_io;
pub mod tiff_stack;

use std::path::Path;

use crate::error::{LocateError, Result};
use crate::frame::{Frame, SourceInfo};
use crate::progress::{LocateStage, NoOpReporter, ProgressReporter};

use image_io::{list_image_files, load_image};
use tiff_stack::load_tiff_stack_with;

/// A fully decoded frame sequence and where it came from.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    pub info: SourceInfo,
    pub frames: Vec<Frame>,
}

/// Open `path` as a frame sequence.
///
/// Directories are read as image sequences (one frame per file, by name),
/// `.tif`/`.tiff` files as page stacks, anything else as a single image.
pub fn open_sequence(path: &Path) -> Result<FrameSequence> {
    open_sequence_with(path, &NoOpReporter)
}

/// Same as [`open_sequence`], reporting the `Reading` stage frame by frame.
pub fn open_sequence_with(path: &Path, reporter: &dyn ProgressReporter) -> Result<FrameSequence> {
    let frames = if path.is_dir() {
        read_directory(path, reporter)?
    } else if is_tiff(path) {
        load_tiff_stack_with(path, reporter)?
    } else {
        reporter.begin_stage(LocateStage::Reading, Some(1));
        let frame = load_image(path)?;
        reporter.advance(1);
        reporter.finish_stage();
        vec![frame]
    };

    let first = frames.first().ok_or(LocateError::EmptySequence)?;
    let info = SourceInfo {
        filename: path.to_path_buf(),
        total_frames: frames.len(),
        width: first.width() as u32,
        height: first.height() as u32,
        bit_depth: first.original_bit_depth,
    };
    Ok(FrameSequence { info, frames })
}

fn read_directory(dir: &Path, reporter: &dyn ProgressReporter) -> Result<Vec<Frame>> {
    let paths = list_image_files(dir)?;
    if paths.is_empty() {
        return Err(LocateError::EmptySequence);
    }

    reporter.begin_stage(LocateStage::Reading, Some(paths.len()));
    let mut frames = Vec::with_capacity(paths.len());
    for (i, p) in paths.iter().enumerate() {
        let mut frame = load_image(p)?;
        frame.metadata.frame_index = i;
        frames.push(frame);
        reporter.advance(i + 1);
    }
    reporter.finish_stage();
    Ok(frames)
}

fn is_tiff(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
}
