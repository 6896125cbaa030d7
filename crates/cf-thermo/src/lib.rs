//! cf-thermo: gas-phase thermodynamics for combustorflow.
//!
//! Provides:
//! - Combustion species definitions (O2, N2, CO2, C3H8, ...)
//! - Composition handling (mole fractions, parsing, mass-fraction conversion)
//! - Gas state representation
//! - GasModel trait for property calculations
//! - Ideal-gas mixture backend with temperature-dependent heat capacities
//! - Compressible-flow relations (stagnation state, speed of sound)
//!
//! # Architecture
//!
//! This crate defines a stable API (`GasModel` trait) that isolates the rest of
//! combustorflow from property-backend details. The built-in `IdealGasModel`
//! evaluates mixtures from per-species molar-mass, formation-enthalpy, and
//! heat-capacity data; the architecture allows for future additions such as
//! real-gas equations of state or tabulated equilibrium products.

pub mod composition;
pub mod error;
pub mod model;
pub mod relations;
pub mod species;
pub mod state;

// Re-exports for ergonomics
pub use composition::Composition;
pub use error::{ThermoError, ThermoResult};
pub use model::{GasModel, GasProperties, IdealGasModel};
pub use species::Species;
pub use state::GasState;
