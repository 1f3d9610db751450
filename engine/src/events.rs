//! Events flowing from background requests back to the wizard

use shared::{BatchResultEntry, PredictionResult};

use crate::error::EngineResult;

/// Outcome of a background request, tagged with what it was issued under
#[derive(Debug)]
pub enum EngineEvent {
    /// Live evaluation, tagged with its dispatch generation
    Live {
        generation: u64,
        outcome: EngineResult<PredictionResult>,
    },
    /// Explicit "Run Prediction" request, tagged with the wizard epoch
    Prediction {
        epoch: u64,
        outcome: EngineResult<PredictionResult>,
    },
    /// Batch submission, tagged with the wizard epoch
    Batch {
        epoch: u64,
        outcome: EngineResult<Vec<BatchResultEntry>>,
    },
}

/// What applying an event did to the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Live result replaced the displayed prediction in place
    LivePreviewUpdated,
    /// Live result was superseded by a later dispatch and dropped
    LiveDiscarded,
    /// Live request failed; nothing shown to the operator
    LiveFailed,
    /// Explicit prediction succeeded and the wizard moved to the result step
    PredictionReady,
    /// Explicit prediction failed; error recorded, step unchanged
    PredictionFailed,
    /// Batch succeeded and the wizard moved to the batch-result step
    BatchReady { entries: usize },
    /// Batch failed; error recorded, step unchanged
    BatchFailed,
    /// Explicit outcome arrived after a reset and was dropped
    StaleExplicit,
}
