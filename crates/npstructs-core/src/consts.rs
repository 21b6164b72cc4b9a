/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default rolling-ball radius (pixels) for background subtraction.
pub const DEFAULT_BALL_SIZE: usize = 9;

/// Default Gaussian sigma for smoothing.
pub const DEFAULT_SMOOTHING_SIGMA: f32 = 1.0;

/// Default number of sequential Gaussian passes.
pub const DEFAULT_SMOOTHING_PASSES: usize = 2;

/// Default linear intensity scale applied before thresholding.
/// Pairs with frames normalized to [0, 1].
pub const DEFAULT_SCALE_FACTOR: f32 = 1e5;

/// Default binarization threshold, in scaled intensity units.
pub const DEFAULT_THRESHOLD: f32 = 180.0;

/// Default side (pixels) of the square used to dilate edges.
pub const DEFAULT_DILATION_SIZE: usize = 1;

/// Default side (pixels) of the square used to erode filled structures.
pub const DEFAULT_EROSION_SIZE: usize = 5;

/// Default minimum structure size (pixels) kept by small-object removal.
pub const DEFAULT_MIN_STRUCTURE_SIZE: usize = 32;

/// Gaussian kernels are truncated at this many standard deviations.
pub const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// Iso level used to trace structure boundaries in a label raster.
pub const CONTOUR_LEVEL: f64 = 0.0;

/// Default max-intensity threshold (raw counts) marking the shutter-open frame.
pub const DEFAULT_SHUTTER_THRESHOLD_ADU: f32 = 500.0;
