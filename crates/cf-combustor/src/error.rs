//! Error types for the combustor pipeline.

use cf_reactor::ReactorError;
use cf_thermo::ThermoError;
use thiserror::Error;

/// Errors raised while configuring or solving the combustor path.
#[derive(Error, Debug)]
pub enum CombustorError {
    /// Configuration invariant violated at construction time.
    #[error("Invalid configuration: {what}")]
    Config { what: &'static str },

    /// The diffuser iteration budget was exhausted without convergence.
    ///
    /// Carries no outlet state or mass flow; callers must branch before
    /// constructing a combustor network.
    #[error("Diffuser did not converge within {iterations} iterations")]
    DiffuserNotConverged { iterations: u32 },

    /// Converged diffuser mass flow failed its continuity cross-check.
    #[error("Diffuser mass-flow cross-check failed: {what}")]
    MassBalance { what: &'static str },

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Reactor(#[from] ReactorError),
}

pub type CombustorResult<T> = Result<T, CombustorError>;
