//! Fixed-state flow sources.

use crate::error::ReactorResult;
use cf_thermo::{GasModel, GasState, Species};

/// A boundary stream of fixed composition, temperature, and pressure.
///
/// The state is frozen at construction; mass-fraction vector and specific
/// enthalpy are precomputed so the network step loop never touches the
/// property backend for boundary streams.
#[derive(Debug, Clone)]
pub struct FlowSource {
    state: GasState,
    mass_fractions: [f64; Species::COUNT],
    specific_enthalpy: f64,
}

impl FlowSource {
    /// Create a source from a gas state.
    pub fn new(model: &dyn GasModel, state: GasState) -> ReactorResult<Self> {
        let mass_fractions = state.composition().mass_fraction_vector();
        let specific_enthalpy = model.enthalpy_mass(&state)?;
        Ok(Self {
            state,
            mass_fractions,
            specific_enthalpy,
        })
    }

    /// The frozen boundary state.
    pub fn state(&self) -> &GasState {
        &self.state
    }

    /// Mass fractions indexed by [`Species::index`].
    pub fn mass_fractions(&self) -> &[f64; Species::COUNT] {
        &self.mass_fractions
    }

    /// Specific enthalpy of the stream [J/kg], formation enthalpy included.
    pub fn specific_enthalpy(&self) -> f64 {
        self.specific_enthalpy
    }
}
