//! Gas property model trait and the ideal-gas mixture backend.

use crate::composition::Composition;
use crate::error::{ThermoError, ThermoResult};
use crate::relations;
use crate::state::GasState;
use cf_core::units::constants::R_UNIVERSAL;
use cf_core::units::{Density, Pressure, Temperature};

/// Batched thermodynamic properties evaluated at a single state.
///
/// Hot loops (the diffuser fixed-point iteration in particular) query
/// density, cp, and γ from the same state repeatedly; evaluating them once
/// into a pack avoids redundant backend calls. The pack is a snapshot; it
/// must be recomputed after the underlying state's T or P change.
#[derive(Clone, Debug)]
pub struct GasProperties {
    /// Temperature [K]
    pub t: Temperature,

    /// Pressure [Pa]
    pub p: Pressure,

    /// Density [kg/m³]
    pub rho: Density,

    /// Specific heat capacity at constant pressure [J/(kg·K)]
    pub cp: f64,

    /// Specific heat capacity at constant volume [J/(kg·K)]
    pub cv: f64,

    /// Specific enthalpy, including formation enthalpy [J/kg]
    pub h: f64,

    /// Mixture molar mass [kg/kmol]
    pub molar_mass: f64,
}

impl GasProperties {
    /// Heat capacity ratio γ = cp/cv.
    pub fn gamma(&self) -> ThermoResult<f64> {
        relations::heat_capacity_ratio(self.cp, self.cv)
    }

    /// Specific gas constant R = cp − cv [J/(kg·K)].
    pub fn gas_constant(&self) -> ThermoResult<f64> {
        relations::specific_gas_constant(self.cp, self.cv)
    }

    /// Local speed of sound [m/s].
    pub fn speed_of_sound(&self) -> ThermoResult<f64> {
        let gamma = self.gamma()?;
        let r = self.gas_constant()?;
        relations::speed_of_sound(r, gamma, self.t.value)
    }
}

/// Trait for gas property models.
///
/// Implementations must be thread-safe (Send + Sync) so independent
/// scenarios can be solved on independent threads. All methods validate
/// outputs for physical plausibility.
pub trait GasModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Compute density [kg/m³] at the given state.
    fn density(&self, state: &GasState) -> ThermoResult<Density>;

    /// Compute specific heat capacity at constant pressure [J/(kg·K)].
    fn cp_mass(&self, state: &GasState) -> ThermoResult<f64>;

    /// Compute specific heat capacity at constant volume [J/(kg·K)].
    fn cv_mass(&self, state: &GasState) -> ThermoResult<f64>;

    /// Compute specific enthalpy [J/kg], including formation enthalpy.
    fn enthalpy_mass(&self, state: &GasState) -> ThermoResult<f64>;

    /// Evaluate the full property pack in one call.
    ///
    /// Default implementation calls the individual property methods;
    /// backends that can batch the evaluation should override.
    fn properties(&self, state: &GasState) -> ThermoResult<GasProperties> {
        Ok(GasProperties {
            t: state.temperature(),
            p: state.pressure(),
            rho: self.density(state)?,
            cp: self.cp_mass(state)?,
            cv: self.cv_mass(state)?,
            h: self.enthalpy_mass(state)?,
            molar_mass: state.composition().molar_mass(),
        })
    }
}

/// Ideal-gas mixture model.
///
/// Equation of state ρ = P·M/(R·T) with mixture properties mole-fraction
/// weighted from the per-species data in [`crate::species::Species`].
/// Heat capacities carry the species' linear-in-T fits, so γ falls with
/// temperature the way hot combustion products require.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealGasModel;

impl IdealGasModel {
    pub fn new() -> Self {
        Self
    }

    fn mixture_cp_molar(comp: &Composition, t_k: f64) -> f64 {
        comp.iter().map(|(s, x)| x * s.cp_molar(t_k)).sum()
    }

    fn mixture_h_molar(comp: &Composition, t_k: f64) -> f64 {
        comp.iter().map(|(s, x)| x * s.h_molar(t_k)).sum()
    }
}

impl GasModel for IdealGasModel {
    fn name(&self) -> &str {
        "ideal-gas"
    }

    fn density(&self, state: &GasState) -> ThermoResult<Density> {
        let m = state.composition().molar_mass();
        let rho = state.pressure().value * m / (R_UNIVERSAL * state.temperature().value);
        if !rho.is_finite() || rho <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        use uom::si::mass_density::kilogram_per_cubic_meter;
        Ok(Density::new::<kilogram_per_cubic_meter>(rho))
    }

    fn cp_mass(&self, state: &GasState) -> ThermoResult<f64> {
        let m = state.composition().molar_mass();
        let cp = Self::mixture_cp_molar(state.composition(), state.temperature().value) / m;
        if !cp.is_finite() || cp <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "cp must be positive and finite",
            });
        }
        Ok(cp)
    }

    fn cv_mass(&self, state: &GasState) -> ThermoResult<f64> {
        let m = state.composition().molar_mass();
        let cv = (Self::mixture_cp_molar(state.composition(), state.temperature().value)
            - R_UNIVERSAL)
            / m;
        if !cv.is_finite() || cv <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "cv must be positive and finite",
            });
        }
        Ok(cv)
    }

    fn enthalpy_mass(&self, state: &GasState) -> ThermoResult<f64> {
        let m = state.composition().molar_mass();
        let h = Self::mixture_h_molar(state.composition(), state.temperature().value) / m;
        if !h.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(h)
    }
}
