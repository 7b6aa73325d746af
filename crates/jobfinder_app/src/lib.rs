//! Job finder application layer: configuration, controllers and the presenter boundary.
//!
//! The controllers own the pure state machines from `jobfinder_core`, run their
//! effects on a `jobfinder_engine` handle, and push view models to a
//! [`ResultsPresenter`] whenever the state changes.

mod config;
mod controller;
mod manual;
mod presenter;

pub use config::{
    AppConfig, ConfigError, DEFAULT_API_BASE, ENV_API_BASE, ENV_CONNECT_TIMEOUT, ENV_LOG_LEVEL,
    ENV_LOG_TARGET, ENV_MANUAL_DEADLINE, ENV_RESUME_DEADLINE,
};
pub use controller::WorkflowController;
pub use manual::ManualSearchController;
pub use presenter::{posted_label, ResultsPresenter};

use jobfinder_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Installs the global logger described by `config`. Later calls are ignored.
pub fn init_logging(config: &AppConfig) {
    jobfinder_logging::initialize(config.log_destination, config.log_level);
}
