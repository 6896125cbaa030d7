//! Error types for reactor-network operations.

use cf_thermo::ThermoError;
use thiserror::Error;

/// Errors encountered while building or advancing a reactor network.
#[derive(Error, Debug)]
pub enum ReactorError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: &'static str },

    #[error(transparent)]
    Thermo(#[from] ThermoError),
}

pub type ReactorResult<T> = Result<T, ReactorError>;
