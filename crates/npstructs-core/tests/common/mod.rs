#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use npstructs_core::{BinaryImage, Frame};
use tiff::encoder::{colortype, TiffEncoder};

/// Write 16-bit grayscale pages, row-major `w x h` each, as one TIFF stack.
pub fn write_tiff_stack_16(path: &Path, w: u32, h: u32, pages: &[Vec<u16>]) {
    let file = File::create(path).expect("create TIFF");
    let mut encoder = TiffEncoder::new(file).expect("TIFF encoder");
    for page in pages {
        encoder
            .write_image::<colortype::Gray16>(w, h, page)
            .expect("write TIFF page");
    }
}

/// Write 8-bit grayscale pages as one TIFF stack.
pub fn write_tiff_stack_8(path: &Path, w: u32, h: u32, pages: &[Vec<u8>]) {
    let file = File::create(path).expect("create TIFF");
    let mut encoder = TiffEncoder::new(file).expect("TIFF encoder");
    for page in pages {
        encoder
            .write_image::<colortype::Gray8>(w, h, page)
            .expect("write TIFF page");
    }
}

/// `h x w` mask with a filled `side x side` square whose top-left is `(top, left)`.
pub fn square_mask(h: usize, w: usize, top: usize, left: usize, side: usize) -> BinaryImage {
    Array2::from_shape_fn((h, w), |(r, c)| {
        (top..top + side).contains(&r) && (left..left + side).contains(&c)
    })
}

/// Dark `size x size` frame with one bright square plateau per centre.
///
/// Each plateau is 7x7 pixels at `amplitude`; far smaller than the default
/// rolling ball, so background subtraction leaves it intact.
pub fn blob_frame(size: usize, centres: &[(usize, usize)], amplitude: f32) -> Frame {
    let blobs: Vec<(usize, usize, f32)> =
        centres.iter().map(|&(r, c)| (r, c, amplitude)).collect();
    blob_frame_with(size, &blobs)
}

/// Like [`blob_frame`], with an amplitude per plateau: `(row, col, amplitude)`.
pub fn blob_frame_with(size: usize, blobs: &[(usize, usize, f32)]) -> Frame {
    let mut data = Array2::<f32>::zeros((size, size));
    for &(cr, cc, amplitude) in blobs {
        for r in cr - 3..=cr + 3 {
            for c in cc - 3..=cc + 3 {
                data[[r, c]] = amplitude;
            }
        }
    }
    Frame::new(data, 16)
}

/// Uniform frame at `level`.
pub fn flat_frame(size: usize, level: f32) -> Frame {
    Frame::new(Array2::from_elem((size, size), level), 16)
}
