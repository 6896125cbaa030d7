//! Exit-state ignition criterion.

use cf_core::units::Temperature;
use cf_thermo::{GasState, Species};

/// Threshold test applied to combustor exit states when hunting ignition
/// boundaries: the zone counts as lit when the exit is hot enough AND the
/// unburned fuel has been consumed.
#[derive(Debug, Clone, Copy)]
pub struct IgnitionCriterion {
    pub min_temperature: Temperature,
    pub max_fuel_mole_fraction: f64,
}

impl IgnitionCriterion {
    pub fn new(min_temperature: Temperature, max_fuel_mole_fraction: f64) -> Self {
        Self {
            min_temperature,
            max_fuel_mole_fraction,
        }
    }

    /// Evaluate the criterion against an exit state.
    pub fn is_ignited(&self, exit: &GasState, fuel: Species) -> bool {
        exit.temperature().value >= self.min_temperature.value
            && exit.composition().mole_fraction(fuel) <= self.max_fuel_mole_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::units::{k, pa};
    use cf_thermo::Composition;

    fn exit(t_k: f64, fuel_fraction: f64) -> GasState {
        let comp = Composition::from_mole_fractions(vec![
            (Species::N2, 0.7),
            (Species::CO2, 0.1),
            (Species::H2O, 0.15),
            (Species::C3H8, fuel_fraction),
        ])
        .unwrap();
        GasState::new(k(t_k), pa(124_000.0), comp).unwrap()
    }

    #[test]
    fn hot_and_burned_out_ignites() {
        let criterion = IgnitionCriterion::new(k(1500.0), 1e-3);
        assert!(criterion.is_ignited(&exit(2000.0, 1e-5), Species::C3H8));
    }

    #[test]
    fn cold_exit_is_not_ignited() {
        let criterion = IgnitionCriterion::new(k(1500.0), 1e-3);
        assert!(!criterion.is_ignited(&exit(900.0, 1e-5), Species::C3H8));
    }

    #[test]
    fn unburned_fuel_is_not_ignited() {
        let criterion = IgnitionCriterion::new(k(1500.0), 1e-3);
        assert!(!criterion.is_ignited(&exit(2000.0, 0.04), Species::C3H8));
    }
}
