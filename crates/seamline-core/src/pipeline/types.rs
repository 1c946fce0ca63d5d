/// Blend pipeline stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum BlendStage {
    Loading,
    Assembling,
    Blending,
    Writing,
}

impl std::fmt::Display for BlendStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading images"),
            Self::Assembling => write!(f, "Assembling canvas"),
            Self::Blending => write!(f, "Blending"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Thread-safe progress reporting for the blend pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any
/// other UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (input count), if known.
    fn begin_stage(&self, _stage: BlendStage, _total_items: Option<usize>) {}

    /// `items_done` work items within the current stage have completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_blend` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
