//! cf-reactor: well-mixed reactor networks for combustorflow.
//!
//! Provides:
//! - Fixed-state flow sources (reservoirs)
//! - Mass-flow-controlled feeds and pressure-driven valve connectors
//! - Finite-volume well-mixed reacting zones with selectable energy mode
//! - A fast-chemistry relaxation closure for heat release
//! - A network object supporting fixed-duration advance and a genuine
//!   steady-state solve
//!
//! Zones integrate per-species masses plus total internal energy; the
//! formation enthalpies carried by the species data make heat release fall
//! out of the energy bookkeeping with no separate source term.

pub mod chemistry;
pub mod connector;
pub mod error;
pub mod network;
pub mod source;
pub mod zone;

// Re-exports for public API
pub use chemistry::FastChemistry;
pub use connector::{DEFAULT_VALVE_COEFF, MassFlowController, PressureValve};
pub use error::{ReactorError, ReactorResult};
pub use network::{ReactorNet, SteadyStateOptions, ZoneId};
pub use source::FlowSource;
pub use zone::{EnergyMode, ReactingZone};
