//! Multi-page TIFF movies, one grayscale frame per page.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::ColorType;

use crate::error::{LocateError, Result};
use crate::frame::Frame;
use crate::progress::{LocateStage, NoOpReporter, ProgressReporter};

/// Read every page of a TIFF stack.
///
/// Integer pages are normalized by the full scale of their sample type
/// (255 or 65535); float pages are kept as stored. All pages must share
/// the first page's dimensions.
pub fn load_tiff_stack(path: &Path) -> Result<Vec<Frame>> {
    load_tiff_stack_with(path, &NoOpReporter)
}

/// Same as [`load_tiff_stack`], reporting one progress step per page.
pub fn load_tiff_stack_with(path: &Path, reporter: &dyn ProgressReporter) -> Result<Vec<Frame>> {
    let file = BufReader::new(File::open(path)?);
    // Microscope stacks easily exceed the decoder's default buffer limit.
    let mut decoder = Decoder::new(file)?.with_limits(Limits::unlimited());

    reporter.begin_stage(LocateStage::Reading, None);
    let mut frames: Vec<Frame> = Vec::new();
    loop {
        let mut frame = decode_page(&mut decoder)?;
        if let Some(first) = frames.first() {
            if frame.shape() != first.shape() {
                return Err(LocateError::ShapeMismatch {
                    frame: frames.len(),
                    expected: first.shape(),
                    found: frame.shape(),
                });
            }
        }
        frame.metadata.frame_index = frames.len();
        frames.push(frame);
        reporter.advance(frames.len());

        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
    }
    reporter.finish_stage();

    Ok(frames)
}

fn decode_page(decoder: &mut Decoder<BufReader<File>>) -> Result<Frame> {
    let colortype = decoder.colortype()?;
    if !matches!(colortype, ColorType::Gray(_)) {
        return Err(LocateError::UnsupportedFormat(format!(
            "TIFF page color type {colortype:?}, expected grayscale"
        )));
    }

    let (w, h) = decoder.dimensions()?;
    let (pixels, bit_depth): (Vec<f32>, u8) = match decoder.read_image()? {
        DecodingResult::U8(buf) => (buf.iter().map(|&v| v as f32 / 255.0).collect(), 8),
        DecodingResult::U16(buf) => (buf.iter().map(|&v| v as f32 / 65535.0).collect(), 16),
        DecodingResult::F32(buf) => (buf, 32),
        _ => {
            return Err(LocateError::UnsupportedFormat(format!(
                "TIFF sample format of {colortype:?} pages"
            )));
        }
    };

    let data = Array2::from_shape_vec((h as usize, w as usize), pixels)
        .map_err(|e| LocateError::UnsupportedFormat(format!("TIFF page layout: {e}")))?;
    Ok(Frame::new(data, bit_depth))
}
