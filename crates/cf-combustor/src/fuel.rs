//! Fuel mass-flow calculation from equivalence ratio.
//!
//! The stoichiometric air-fuel ratio is derived from the fuel's elemental
//! composition and the oxidizer's O₂ content, so new fuels need no code
//! change; any composition with positive oxygen demand works.

use crate::config::FuelSpec;
use crate::error::{CombustorError, CombustorResult};
use cf_core::units::{MassRate, kgps};
use cf_thermo::{Composition, Species};

/// Stoichiometric oxidizer-to-fuel mass ratio.
///
/// Oxygen demand per mole of fuel mixture is Σ xᵢ·(cᵢ + hᵢ/4 − oᵢ/2);
/// the oxidizer mass required scales that by the oxidizer's molar mass
/// over its O₂ mole fraction.
pub fn stoichiometric_air_fuel_ratio(
    fuel: &Composition,
    oxidizer: &Composition,
) -> CombustorResult<f64> {
    let demand: f64 = fuel.iter().map(|(s, x)| x * s.oxygen_demand()).sum();
    if demand <= 0.0 {
        return Err(CombustorError::Config {
            what: "fuel composition has no oxygen demand",
        });
    }

    let x_o2 = oxidizer.mole_fraction(Species::O2);
    if x_o2 <= 0.0 {
        return Err(CombustorError::Config {
            what: "oxidizer contains no oxygen",
        });
    }

    let oxidizer_moles_per_fuel_mole = demand / x_o2;
    Ok(oxidizer_moles_per_fuel_mole * oxidizer.molar_mass() / fuel.molar_mass())
}

/// Fuel mass flow for a target equivalence ratio.
///
/// ṁ_fuel = (ṁ_air / AFR_stoich) / φ, decreasing in φ and exactly
/// linear in the air flow.
pub fn fuel_mass_flow(
    air_mass_flow: MassRate,
    fuel: &FuelSpec,
    oxidizer: &Composition,
) -> CombustorResult<MassRate> {
    if !air_mass_flow.value.is_finite() || air_mass_flow.value <= 0.0 {
        return Err(CombustorError::Config {
            what: "air mass flow must be positive and finite",
        });
    }
    let afr = stoichiometric_air_fuel_ratio(fuel.composition(), oxidizer)?;
    let stoichiometric = air_mass_flow.value / afr;
    Ok(kgps(stoichiometric / fuel.equivalence_ratio()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn propane(equivalence_ratio: f64) -> FuelSpec {
        FuelSpec::new(Composition::pure(Species::C3H8), equivalence_ratio).unwrap()
    }

    #[test]
    fn propane_air_ratio_matches_hand_calculation() {
        // C3H8 + 5 O2 (+ 18.81 N2): AFR ≈ 15.6 by mass.
        let afr = stoichiometric_air_fuel_ratio(
            &Composition::pure(Species::C3H8),
            &Composition::standard_air(),
        )
        .unwrap();
        assert!((afr - 15.58).abs() < 0.05, "AFR = {afr}");
    }

    #[test]
    fn methane_air_ratio_matches_hand_calculation() {
        let afr = stoichiometric_air_fuel_ratio(
            &Composition::pure(Species::CH4),
            &Composition::standard_air(),
        )
        .unwrap();
        assert!((afr - 17.1).abs() < 0.1, "AFR = {afr}");
    }

    #[test]
    fn doubling_air_doubles_fuel() {
        let air = Composition::standard_air();
        let fuel = propane(0.3);
        let single = fuel_mass_flow(kgps(1.388), &fuel, &air).unwrap().value;
        let double = fuel_mass_flow(kgps(2.776), &fuel, &air).unwrap().value;
        assert!((double - 2.0 * single).abs() < 1e-12);
    }

    #[test]
    fn oxidizer_without_oxygen_rejected() {
        let inert = Composition::pure(Species::N2);
        let err =
            stoichiometric_air_fuel_ratio(&Composition::pure(Species::C3H8), &inert).unwrap_err();
        assert!(err.to_string().contains("no oxygen"));
    }

    #[test]
    fn non_positive_air_flow_rejected() {
        let air = Composition::standard_air();
        let fuel = propane(1.0);
        assert!(fuel_mass_flow(kgps(0.0), &fuel, &air).is_err());
        assert!(fuel_mass_flow(kgps(-1.0), &fuel, &air).is_err());
    }

    #[test]
    fn carbon_monoxide_counts_as_fuel() {
        // CO has an oxygen demand of 0.5 despite carrying oxygen.
        let afr = stoichiometric_air_fuel_ratio(
            &Composition::pure(Species::CO),
            &Composition::standard_air(),
        )
        .unwrap();
        assert!(afr > 0.0);
    }
}
