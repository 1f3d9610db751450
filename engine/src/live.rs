//! Live (what-if) simulation controller
//!
//! Debounces sample edits into prediction requests. Every dispatch bumps a
//! generation counter; only an outcome carrying the current generation may be
//! applied, so a response from an earlier dispatch is discarded once a newer
//! one has been scheduled, whether or not the newer one has resolved.

use std::time::Duration;

use shared::{PredictRequest, SampleRecord};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::EngineEvent;
use crate::external::PredictionService;

/// Debounced, cancelable live prediction loop
pub struct LiveSimulationController<S> {
    service: S,
    settle: Duration,
    enabled: bool,
    generation: u64,
    pending: Option<CancellationToken>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl<S: PredictionService> LiveSimulationController<S> {
    pub fn new(service: S, settle: Duration, events: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self {
            service,
            settle,
            enabled: false,
            generation: 0,
            pending: None,
            events,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Generation of the most recently scheduled evaluation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn settle_period(&self) -> Duration {
        self.settle
    }

    /// Enter live mode and evaluate the current sample without waiting
    pub fn enable(&mut self, sample: &SampleRecord) -> u64 {
        self.enabled = true;
        info!("live simulation enabled");
        self.dispatch(sample, Duration::ZERO)
    }

    /// Leave live mode. Pending and in-flight evaluations are abandoned.
    pub fn disable(&mut self) {
        if self.enabled {
            info!("live simulation disabled");
        }
        self.enabled = false;
        self.cancel_pending();
        // Anything already queued must not match the current generation
        self.generation += 1;
    }

    /// Schedule an evaluation after the settle period, replacing any earlier one
    pub fn on_sample_changed(&mut self, sample: &SampleRecord) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        Some(self.dispatch(sample, self.settle))
    }

    /// Whether an outcome of `generation` may still be applied
    pub fn is_current(&self, generation: u64) -> bool {
        self.enabled && generation == self.generation
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn dispatch(&mut self, sample: &SampleRecord, delay: Duration) -> u64 {
        self.cancel_pending();
        self.generation += 1;
        let generation = self.generation;

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let request = PredictRequest::from(sample);
        let service = self.service.clone();
        let events = self.events.clone();
        debug!(generation, delay_ms = delay.as_millis() as u64, "live evaluation scheduled");

        tokio::spawn(async move {
            let evaluation = async {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                debug!(generation, "live evaluation issued");
                service.predict(request).await
            };

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(generation, "live evaluation superseded before completion");
                }
                outcome = evaluation => {
                    // Receiver gone means the wizard was dropped
                    let _ = events.send(EngineEvent::Live { generation, outcome });
                }
            }
        });

        generation
    }
}

impl<S> Drop for LiveSimulationController<S> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
