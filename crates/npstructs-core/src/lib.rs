pub mod batch;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod locate;
pub mod measure;
pub mod preprocess;
pub mod progress;
mod raster;
pub mod segment;

pub use batch::{locate_sequence, locate_sequence_with, BatchReport, FrameFailure};
pub use config::{BatchConfig, FailurePolicy, LocateConfig, LocateParams, PreprocessParams, SegmentParams};
pub use error::{LocateError, Result};
pub use frame::{BinaryImage, Frame, LabelRaster};
pub use locate::{find_starting_frame, locate_frame, locate_frame_detailed, FrameLocation};
pub use measure::{measure, ResultTable, StructureRecord};
pub use preprocess::preprocess;
pub use segment::segment;
