//! Sample evaluation engine for the Sugarcane Quality Analysis system
//!
//! Drives an operator from sample identity through parameter entry to a
//! prediction, with a debounced live preview while values are adjusted and
//! bulk evaluation of uploaded batch files.

pub mod config;
pub mod error;
pub mod events;
pub mod external;
pub mod live;
pub mod wizard;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use events::{Applied, EngineEvent};
pub use external::{HttpPredictionClient, PredictionService};
pub use live::LiveSimulationController;
pub use wizard::{Wizard, WizardState, WizardStep};

/// Build a wizard talking to the configured prediction service
pub fn connect(config: &EngineConfig) -> EngineResult<Wizard<HttpPredictionClient>> {
    let client = HttpPredictionClient::from_config(&config.prediction)?;
    tracing::info!(base_url = %client.base_url(), "prediction service configured");
    Ok(Wizard::new(client, &config.live))
}
