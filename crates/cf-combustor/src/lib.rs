//! cf-combustor: diffuser and combustor solvers for combustorflow.
//!
//! The pipeline runs in a fixed order: a validated configuration feeds the
//! diffuser convergence solver, whose converged outlet state and mass flow
//! feed one of the two combustor network builders. The diffuser must fully
//! converge (or fail) before any combustor network is constructed.
//!
//! - [`config`]: operating point, geometry, fuel, and split types with
//!   construction-time validation, plus the serde-backed [`EngineConfig`]
//! - [`fuel`]: equivalence-ratio fuel-flow calculator with stoichiometry
//!   derived from elemental composition
//! - [`diffuser`]: fixed-point solver for the diffuser outlet state
//! - [`single_zone`]: one reacting volume advanced over fixed multiples
//!   of its residence time
//! - [`two_zone`]: coupled primary/secondary zones advanced to a genuine
//!   steady state
//! - [`ignition`]: exit-state ignition criterion

pub mod config;
pub mod diffuser;
pub mod error;
pub mod fuel;
pub mod ignition;
pub mod single_zone;
pub mod two_zone;

pub use config::{
    CombustorGeometry, DiffuserGeometry, EngineConfig, FuelSpec, OperatingPoint, Scenario,
    ZoneSplit,
};
pub use diffuser::{DiffuserOutcome, DiffuserSolution, DiffuserSolver};
pub use error::{CombustorError, CombustorResult};
pub use fuel::{fuel_mass_flow, stoichiometric_air_fuel_ratio};
pub use ignition::IgnitionCriterion;
pub use single_zone::{CombustorInlet, IGNITION_SEED_TEMPERATURE_K, SingleZoneCombustor, SingleZoneExit};
pub use two_zone::{TwoZoneCombustor, TwoZoneExit};
