//! Parallel multi-frame driver.
//!
//! Every frame runs the full single-frame pipeline as an independent task on
//! a worker pool built for the call. Frames are shared read-only; all
//! intermediate rasters are owned by their task. Results are collected in
//! submission order, so the merged table is sorted by frame id no matter
//! which worker finishes first.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{info, warn};

use crate::config::{BatchConfig, FailurePolicy, LocateParams};
use crate::error::{LocateError, Result};
use crate::frame::Frame;
use crate::locate::{locate_frame, locate_frame_detailed, FrameLocation};
use crate::measure::{ResultTable, StructureRecord};
use crate::progress::{LocateStage, NoOpReporter, ProgressReporter};

/// A frame whose task returned an error or panicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameFailure {
    pub frame: usize,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    pub table: ResultTable,
    /// Failed frames, by frame id. Only populated under `FailurePolicy::SkipAndReport`.
    pub failures: Vec<FrameFailure>,
    /// Frames whose records made it into the table.
    pub frames_succeeded: usize,
    /// Per-frame label rasters and contours, in frame order. Only populated
    /// when `BatchConfig::keep_locations` is set; failed frames are absent.
    pub locations: Vec<FrameLocation>,
}

/// What one frame task hands back to the merge step.
struct FrameOutput {
    records: Vec<StructureRecord>,
    location: Option<FrameLocation>,
}

/// Locate structures in every frame using all available processors.
///
/// Aborts with `LocateError::Worker` naming the lowest failing frame id.
pub fn locate_sequence(frames: &[Frame], params: &LocateParams) -> Result<ResultTable> {
    let report = locate_sequence_with(frames, params, &BatchConfig::default(), &NoOpReporter)?;
    Ok(report.table)
}

/// Locate structures in every frame with explicit pool settings, failure
/// policy and progress reporting.
pub fn locate_sequence_with(
    frames: &[Frame],
    params: &LocateParams,
    config: &BatchConfig,
    reporter: &dyn ProgressReporter,
) -> Result<BatchReport> {
    params.validate()?;
    if config.keep_locations {
        run_frames(frames, config, reporter, |frame, id| {
            let location = locate_frame_detailed(frame, id, params)?;
            Ok(FrameOutput {
                records: location.records.clone(),
                location: Some(location),
            })
        })
    } else {
        run_frames(frames, config, reporter, |frame, id| {
            Ok(FrameOutput {
                records: locate_frame(frame, id, params)?,
                location: None,
            })
        })
    }
}

/// Run `task` once per frame on the worker pool and merge the fragments.
///
/// `task` receives the frame and its position in `frames`. Frames must all
/// share one shape.
pub fn run_batch<F>(
    frames: &[Frame],
    config: &BatchConfig,
    reporter: &dyn ProgressReporter,
    task: F,
) -> Result<BatchReport>
where
    F: Fn(&Frame, usize) -> Result<Vec<StructureRecord>> + Sync,
{
    run_frames(frames, config, reporter, |frame, id| {
        Ok(FrameOutput {
            records: task(frame, id)?,
            location: None,
        })
    })
}

fn run_frames<F>(
    frames: &[Frame],
    config: &BatchConfig,
    reporter: &dyn ProgressReporter,
    task: F,
) -> Result<BatchReport>
where
    F: Fn(&Frame, usize) -> Result<FrameOutput> + Sync,
{
    config.validate()?;
    check_shapes(frames)?;

    let workers = config.worker_count();
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("npstructs-worker-{i}"))
        .build()
        .map_err(|e| LocateError::WorkerPool(e.to_string()))?;

    info!(
        frames = frames.len(),
        workers,
        policy = %config.on_failure,
        "Locating structures"
    );
    reporter.begin_stage(LocateStage::Locating, Some(frames.len()));

    let done = AtomicUsize::new(0);
    let outcomes: Vec<std::result::Result<FrameOutput, FrameFailure>> =
        pool.install(|| {
            frames
                .par_iter()
                .enumerate()
                .map(|(id, frame)| {
                    let outcome = run_task(&task, frame, id);
                    let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
                    reporter.advance(completed);
                    outcome
                })
                .collect()
        });

    reporter.finish_stage();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(output) => {
                report.table.extend_fragment(output.records);
                report.locations.extend(output.location);
                report.frames_succeeded += 1;
            }
            Err(failure) => match config.on_failure {
                FailurePolicy::Abort => {
                    return Err(LocateError::Worker {
                        frame: failure.frame,
                        message: failure.message,
                    });
                }
                FailurePolicy::SkipAndReport => {
                    warn!(frame = failure.frame, error = %failure.message, "Skipping failed frame");
                    report.failures.push(failure);
                }
            },
        }
    }

    info!(
        structures = report.table.len(),
        failed = report.failures.len(),
        "Batch complete"
    );
    Ok(report)
}

fn run_task<F>(
    task: &F,
    frame: &Frame,
    id: usize,
) -> std::result::Result<FrameOutput, FrameFailure>
where
    F: Fn(&Frame, usize) -> Result<FrameOutput> + Sync,
{
    match catch_unwind(AssertUnwindSafe(|| task(frame, id))) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(FrameFailure {
            frame: id,
            message: e.to_string(),
        }),
        Err(payload) => Err(FrameFailure {
            frame: id,
            message: format!("panicked: {}", panic_message(payload.as_ref())),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn check_shapes(frames: &[Frame]) -> Result<()> {
    let Some(first) = frames.first() else {
        return Ok(());
    };
    let expected = first.shape();
    for (frame, f) in frames.iter().enumerate().skip(1) {
        if f.shape() != expected {
            return Err(LocateError::ShapeMismatch {
                frame,
                expected,
                found: f.shape(),
            });
        }
    }
    Ok(())
}
