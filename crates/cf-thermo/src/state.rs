//! Gas state definition.

use crate::composition::Composition;
use crate::error::{ThermoError, ThermoResult};
use cf_core::units::{Pressure, Temperature};

/// Thermodynamic state of a gas stream or zone: temperature, pressure,
/// and composition.
///
/// This is the minimal set of independent properties. Derived properties
/// (density, heat capacities, enthalpy) are computed on demand via the
/// [`GasModel`](crate::model::GasModel) trait and are never stored, so they
/// can never go stale against T, P, or composition.
#[derive(Debug, Clone, PartialEq)]
pub struct GasState {
    t: Temperature,
    p: Pressure,
    comp: Composition,
}

impl GasState {
    /// Create a state from temperature, pressure, and composition.
    ///
    /// Validates that temperature and pressure are positive and finite.
    pub fn new(t: Temperature, p: Pressure, comp: Composition) -> ThermoResult<Self> {
        validate_tp(t, p)?;
        Ok(Self { t, p, comp })
    }

    /// Get temperature.
    pub fn temperature(&self) -> Temperature {
        self.t
    }

    /// Get pressure.
    pub fn pressure(&self) -> Pressure {
        self.p
    }

    /// Get composition.
    pub fn composition(&self) -> &Composition {
        &self.comp
    }

    /// Update temperature and pressure in place, keeping composition.
    ///
    /// The same validation as [`GasState::new`] applies.
    pub fn set_tp(&mut self, t: Temperature, p: Pressure) -> ThermoResult<()> {
        validate_tp(t, p)?;
        self.t = t;
        self.p = p;
        Ok(())
    }
}

fn validate_tp(t: Temperature, p: Pressure) -> ThermoResult<()> {
    let t_val = t.value;
    if !t_val.is_finite() || t_val <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "temperature must be positive and finite",
        });
    }
    let p_val = p.value;
    if !p_val.is_finite() || p_val <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "pressure must be positive and finite",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;
    use cf_core::units::{k, pa};

    #[test]
    fn create_valid_state() {
        let comp = Composition::standard_air();
        let state = GasState::new(k(300.0), pa(101_325.0), comp).unwrap();
        assert_eq!(state.temperature().value, 300.0);
        assert_eq!(state.pressure().value, 101_325.0);
    }

    #[test]
    fn construction_is_idempotent() {
        // Constructing from (T, P, composition) and querying returns the
        // same values untouched.
        let comp = Composition::parse("O2:0.21, N2:0.79").unwrap();
        let state = GasState::new(k(345.68), pa(130_640.0), comp.clone()).unwrap();
        assert_eq!(state.temperature().value, 345.68);
        assert_eq!(state.pressure().value, 130_640.0);
        assert_eq!(state.composition(), &comp);
    }

    #[test]
    fn reject_negative_pressure() {
        let comp = Composition::pure(Species::N2);
        assert!(GasState::new(k(300.0), pa(-100.0), comp).is_err());
    }

    #[test]
    fn reject_zero_temperature() {
        let comp = Composition::pure(Species::N2);
        assert!(GasState::new(k(0.0), pa(101_325.0), comp).is_err());
    }

    #[test]
    fn set_tp_validates() {
        let comp = Composition::pure(Species::N2);
        let mut state = GasState::new(k(300.0), pa(101_325.0), comp).unwrap();
        assert!(state.set_tp(k(f64::NAN), pa(101_325.0)).is_err());
        // State unchanged after a rejected update.
        assert_eq!(state.temperature().value, 300.0);

        state.set_tp(k(350.0), pa(120_000.0)).unwrap();
        assert_eq!(state.temperature().value, 350.0);
        assert_eq!(state.pressure().value, 120_000.0);
    }
}
