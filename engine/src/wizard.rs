//! Wizard state machine
//!
//! Owns the single sample record and the single prediction result. Every
//! mutation replaces the record with a new value; background requests report
//! back through an event channel that only the wizard drains, so state is
//! never touched from more than one place.
//!
//! Spawns onto the ambient tokio runtime.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use shared::{
    evaluate_hints, ideal_range_hint, missing_headers, parse_batch, summarize_batch,
    validate_measurement, BatchResultEntry, Hint, MeasurementField, PredictRequest,
    PredictionResult, SampleEdit, SampleRecord,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::LiveConfig;
use crate::error::{EngineError, EngineResult};
use crate::events::{Applied, EngineEvent};
use crate::external::PredictionService;
use crate::live::LiveSimulationController;

const BATCH_FAILURE_MESSAGE: &str =
    "Failed to process batch file. Ensure the prediction service is running.";

/// Wizard steps
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Identity,
    Parameters,
    Result,
    BatchResult,
}

impl WizardStep {
    /// Position shown in the step indicator
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Identity => 1,
            WizardStep::Parameters => 2,
            WizardStep::Result => 3,
            WizardStep::BatchResult => 4,
        }
    }
}

/// Snapshot of everything the active step renders
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub sample: SampleRecord,
    pub prediction: Option<PredictionResult>,
    pub batch_results: Option<Vec<BatchResultEntry>>,
    pub error: Option<String>,
    /// An explicit request is outstanding
    pub loading: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Identity,
            sample: SampleRecord::default(),
            prediction: None,
            batch_results: None,
            error: None,
            loading: false,
        }
    }
}

/// Guides an operator from sample identity to a prediction result
pub struct Wizard<S: PredictionService> {
    state: WizardState,
    service: S,
    live: LiveSimulationController<S>,
    /// Bumped on reset so explicit outcomes from before it are dropped
    epoch: u64,
    events_tx: mpsc::UnboundedSender<EngineEvent>,
    events_rx: mpsc::UnboundedReceiver<EngineEvent>,
}

impl<S: PredictionService> Wizard<S> {
    pub fn new(service: S, config: &LiveConfig) -> Self {
        Self::with_settle_period(service, config.settle_period())
    }

    pub fn with_settle_period(service: S, settle: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: WizardState::default(),
            live: LiveSimulationController::new(service.clone(), settle, events_tx.clone()),
            service,
            epoch: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn sample(&self) -> &SampleRecord {
        &self.state.sample
    }

    pub fn is_live(&self) -> bool {
        self.live.is_enabled()
    }

    pub fn live_generation(&self) -> u64 {
        self.live.generation()
    }

    // =========================================================================
    // Sample edits
    // =========================================================================

    /// Apply an operator edit.
    ///
    /// Out-of-range values and direct purity edits under auto-calc are
    /// rejected without touching the record. In live mode a real change
    /// reschedules the debounced evaluation.
    pub fn edit(&mut self, edit: SampleEdit) -> EngineResult<()> {
        if let SampleEdit::Measurement(field, value) = edit {
            if field == MeasurementField::Purity && self.state.sample.auto_purity {
                return Err(EngineError::DerivedFieldLocked);
            }
            validate_measurement(field, value)
                .map_err(|reason| EngineError::OutOfRange { field, reason })?;
        }

        let next = self.state.sample.with_edit(edit);
        if next == self.state.sample {
            return Ok(());
        }
        self.state.sample = next;
        self.live.on_sample_changed(&self.state.sample);
        Ok(())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Identity -> Parameters
    pub fn advance(&mut self) -> EngineResult<()> {
        self.require(WizardStep::Identity, "advance")?;
        self.transition(WizardStep::Parameters);
        Ok(())
    }

    /// Parameters -> Identity
    pub fn back(&mut self) -> EngineResult<()> {
        self.require(WizardStep::Parameters, "go back")?;
        self.transition(WizardStep::Identity);
        Ok(())
    }

    /// Any step -> Identity, clearing results, errors and live mode.
    /// The sample itself is kept so the operator can start from it again.
    pub fn reset(&mut self) {
        self.live.disable();
        self.epoch += 1;
        self.state.prediction = None;
        self.state.batch_results = None;
        self.state.error = None;
        self.state.loading = false;
        self.transition(WizardStep::Identity);
    }

    // =========================================================================
    // Live mode
    // =========================================================================

    /// "Simulation Mode" on the result step: back to Parameters with live
    /// mode on and an immediate evaluation.
    pub fn simulate(&mut self) -> EngineResult<()> {
        self.require(WizardStep::Result, "start simulation")?;
        self.transition(WizardStep::Parameters);
        self.live.enable(&self.state.sample);
        Ok(())
    }

    /// Live toggle on the parameters step. Returns whether live mode is now on.
    pub fn toggle_live(&mut self) -> EngineResult<bool> {
        self.require(WizardStep::Parameters, "toggle live mode")?;
        if self.live.is_enabled() {
            self.live.disable();
        } else {
            self.live.enable(&self.state.sample);
        }
        Ok(self.live.is_enabled())
    }

    // =========================================================================
    // Explicit requests
    // =========================================================================

    /// "Run Prediction": immediate request that advances to the result step
    /// once it succeeds.
    pub fn run_prediction(&mut self) -> EngineResult<()> {
        self.require(WizardStep::Parameters, "run a prediction")?;
        self.begin_explicit()?;

        let request = PredictRequest::from(&self.state.sample);
        let service = self.service.clone();
        let events = self.events_tx.clone();
        let epoch = self.epoch;
        info!(epoch, "explicit prediction requested");

        tokio::spawn(async move {
            let outcome = service.predict(request).await;
            let _ = events.send(EngineEvent::Prediction { epoch, outcome });
        });
        Ok(())
    }

    /// Parse a batch file and submit its rows. Format errors are reported
    /// before any request is made. Returns the number of rows submitted.
    pub fn submit_batch(&mut self, raw: &str) -> EngineResult<usize> {
        if self.state.loading {
            return Err(EngineError::RequestInFlight);
        }

        let samples = match parse_batch(raw) {
            Ok(samples) => samples,
            Err(e) => {
                let err = EngineError::from(e);
                warn!(error = %err, "batch file rejected");
                self.state.error = Some(err.user_message());
                return Err(err);
            }
        };

        let missing = missing_headers(&samples);
        if !missing.is_empty() {
            warn!(?missing, "batch file lacks expected columns");
        }

        self.begin_explicit()?;
        let count = samples.len();
        let service = self.service.clone();
        let events = self.events_tx.clone();
        let epoch = self.epoch;
        info!(epoch, rows = count, "batch submitted");

        tokio::spawn(async move {
            let outcome = service.predict_batch(samples).await;
            let _ = events.send(EngineEvent::Batch { epoch, outcome });
        });
        Ok(count)
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Hints for the parameters step; `None` until the sample is interacted
    pub fn live_insights(&self) -> Option<Vec<Hint>> {
        if !self.state.sample.is_interacted() {
            return None;
        }
        let hints = evaluate_hints(&self.state.sample);
        if hints.is_empty() {
            Some(vec![ideal_range_hint()])
        } else {
            Some(hints)
        }
    }

    /// Real-time prediction preview shown while live mode is on
    pub fn live_preview(&self) -> Option<&PredictionResult> {
        if self.live.is_enabled() && self.state.sample.is_interacted() {
            self.state.prediction.as_ref()
        } else {
            None
        }
    }

    /// Result count per quality tier for the batch result step
    pub fn batch_summary(&self) -> Option<BTreeMap<String, usize>> {
        self.state.batch_results.as_deref().map(summarize_batch)
    }

    // =========================================================================
    // Event processing
    // =========================================================================

    /// Wait for the next background outcome and apply it
    pub async fn process_next(&mut self) -> Option<Applied> {
        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Apply an outcome if one is ready, without waiting
    pub fn try_process(&mut self) -> Option<Applied> {
        let event = self.events_rx.try_recv().ok()?;
        Some(self.apply(event))
    }

    fn apply(&mut self, event: EngineEvent) -> Applied {
        match event {
            EngineEvent::Live { generation, outcome } => {
                if !self.live.is_current(generation) {
                    debug!(
                        generation,
                        current = self.live.generation(),
                        "stale live result discarded"
                    );
                    return Applied::LiveDiscarded;
                }
                match outcome {
                    Ok(result) => {
                        debug!(generation, quality = %result.quality, "live preview updated");
                        self.state.prediction = Some(result);
                        Applied::LivePreviewUpdated
                    }
                    Err(e) => {
                        // The operator is still adjusting values; stay quiet
                        debug!(generation, error = %e, "live evaluation failed");
                        Applied::LiveFailed
                    }
                }
            }
            EngineEvent::Prediction { epoch, outcome } => {
                if epoch != self.epoch {
                    debug!(epoch, current = self.epoch, "prediction outcome from before reset dropped");
                    return Applied::StaleExplicit;
                }
                self.state.loading = false;
                match outcome {
                    Ok(result) => {
                        info!(quality = %result.quality, "prediction ready");
                        self.state.prediction = Some(result);
                        self.state.error = None;
                        self.transition(WizardStep::Result);
                        Applied::PredictionReady
                    }
                    Err(e) => {
                        warn!(error = %e, "prediction failed");
                        self.state.error = Some(e.user_message());
                        Applied::PredictionFailed
                    }
                }
            }
            EngineEvent::Batch { epoch, outcome } => {
                if epoch != self.epoch {
                    debug!(epoch, current = self.epoch, "batch outcome from before reset dropped");
                    return Applied::StaleExplicit;
                }
                self.state.loading = false;
                match outcome {
                    Ok(results) => {
                        let entries = results.len();
                        info!(entries, "batch results ready");
                        // Live mode cannot be toggled off from the batch view
                        self.live.disable();
                        self.state.batch_results = Some(results);
                        self.state.error = None;
                        self.transition(WizardStep::BatchResult);
                        Applied::BatchReady { entries }
                    }
                    Err(e) => {
                        warn!(error = %e, "batch prediction failed");
                        self.state.error = Some(BATCH_FAILURE_MESSAGE.to_string());
                        Applied::BatchFailed
                    }
                }
            }
        }
    }

    fn begin_explicit(&mut self) -> EngineResult<()> {
        if self.state.loading {
            return Err(EngineError::RequestInFlight);
        }
        self.state.loading = true;
        self.state.error = None;
        Ok(())
    }

    fn require(&self, step: WizardStep, action: &'static str) -> EngineResult<()> {
        if self.state.step != step {
            return Err(EngineError::InvalidTransition {
                from: self.state.step,
                action,
            });
        }
        Ok(())
    }

    fn transition(&mut self, to: WizardStep) {
        if self.state.step != to {
            info!(from = ?self.state.step, to = ?to, "wizard step changed");
        }
        self.state.step = to;
    }
}
