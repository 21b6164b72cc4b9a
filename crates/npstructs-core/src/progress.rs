/// Processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocateStage {
    Reading,
    Locating,
    Writing,
}

impl std::fmt::Display for LocateStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading frames"),
            Self::Locating => write!(f, "Locating structures"),
            Self::Writing => write!(f, "Writing results"),
        }
    }
}

/// Thread-safe progress reporting for batch runs.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: LocateStage, _total_items: Option<usize>) {}

    /// Work items within the current stage have completed; `items_done` is the running total.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores every event.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
