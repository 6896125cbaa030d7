//! Chemical species definitions.

use cf_core::units::constants::{R_UNIVERSAL, T_REFERENCE_K};

/// Chemical species tracked by the combustion gas model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Oxygen (O₂)
    O2,
    /// Nitrogen (N₂)
    N2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Carbon monoxide (CO)
    CO,
    /// Water vapor (H₂O)
    H2O,
    /// Hydrogen (H₂)
    H2,
    /// Methane (CH₄)
    CH4,
    /// Propane (C₃H₈)
    C3H8,
}

/// Atom counts per molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atoms {
    pub c: u32,
    pub h: u32,
    pub o: u32,
    pub n: u32,
}

impl Species {
    pub const ALL: [Species; 9] = [
        Species::O2,
        Species::N2,
        Species::Ar,
        Species::CO2,
        Species::CO,
        Species::H2O,
        Species::H2,
        Species::CH4,
        Species::C3H8,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`Species::ALL`]; stable layout for state vectors.
    pub fn index(&self) -> usize {
        match self {
            Species::O2 => 0,
            Species::N2 => 1,
            Species::Ar => 2,
            Species::CO2 => 3,
            Species::CO => 4,
            Species::H2O => 5,
            Species::H2 => 6,
            Species::CH4 => 7,
            Species::C3H8 => 8,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Species::O2 => "O2",
            Species::N2 => "N2",
            Species::Ar => "Ar",
            Species::CO2 => "CO2",
            Species::CO => "CO",
            Species::H2O => "H2O",
            Species::H2 => "H2",
            Species::CH4 => "CH4",
            Species::C3H8 => "C3H8",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::O2 => "Oxygen",
            Species::N2 => "Nitrogen",
            Species::Ar => "Argon",
            Species::CO2 => "Carbon Dioxide",
            Species::CO => "Carbon Monoxide",
            Species::H2O => "Water",
            Species::H2 => "Hydrogen",
            Species::CH4 => "Methane",
            Species::C3H8 => "Propane",
        }
    }

    /// Get molar mass [kg/kmol] for this species.
    ///
    /// Values sourced from standard reference data (e.g., NIST).
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::O2 => 31.999,
            Species::N2 => 28.014,
            Species::Ar => 39.948,
            Species::CO2 => 44.010,
            Species::CO => 28.010,
            Species::H2O => 18.015,
            Species::H2 => 2.016,
            Species::CH4 => 16.043,
            Species::C3H8 => 44.097,
        }
    }

    /// Standard-state enthalpy of formation at 298.15 K [J/kmol].
    pub fn formation_enthalpy(&self) -> f64 {
        match self {
            Species::O2 => 0.0,
            Species::N2 => 0.0,
            Species::Ar => 0.0,
            Species::CO2 => -393.52e6,
            Species::CO => -110.53e6,
            Species::H2O => -241.83e6,
            Species::H2 => 0.0,
            Species::CH4 => -74.87e6,
            Species::C3H8 => -104.68e6,
        }
    }

    /// Linear molar heat-capacity fit cp(T) = a + b·T [J/(kmol·K)].
    ///
    /// Two-point fits of tabulated cp at 300 K and 2000 K; adequate over
    /// 300–3000 K for the energy balances this crate performs.
    fn cp_coefficients(&self) -> (f64, f64) {
        match self {
            Species::O2 => (28_094.0, 4.353),
            Species::N2 => (27_888.0, 4.041),
            Species::Ar => (20_786.0, 0.0),
            Species::CO2 => (32_997.0, 13.676),
            Species::CO => (27_885.0, 4.182),
            Species::H2O => (30_498.0, 10.341),
            Species::H2 => (27_880.0, 3.200),
            Species::CH4 => (25_341.0, 34.529),
            Species::C3H8 => (54_824.0, 62.588),
        }
    }

    /// Molar heat capacity at constant pressure [J/(kmol·K)].
    pub fn cp_molar(&self, t_k: f64) -> f64 {
        let (a, b) = self.cp_coefficients();
        a + b * t_k
    }

    /// Molar enthalpy including formation enthalpy [J/kmol].
    pub fn h_molar(&self, t_k: f64) -> f64 {
        let (a, b) = self.cp_coefficients();
        let t0 = T_REFERENCE_K;
        self.formation_enthalpy() + a * (t_k - t0) + 0.5 * b * (t_k * t_k - t0 * t0)
    }

    /// Molar internal energy [J/kmol].
    pub fn u_molar(&self, t_k: f64) -> f64 {
        self.h_molar(t_k) - R_UNIVERSAL * t_k
    }

    /// Molar heat capacity at constant volume [J/(kmol·K)].
    pub fn cv_molar(&self, t_k: f64) -> f64 {
        self.cp_molar(t_k) - R_UNIVERSAL
    }

    /// Atom counts per molecule.
    pub fn atoms(&self) -> Atoms {
        let (c, h, o, n) = match self {
            Species::O2 => (0, 0, 2, 0),
            Species::N2 => (0, 0, 0, 2),
            Species::Ar => (0, 0, 0, 0),
            Species::CO2 => (1, 0, 2, 0),
            Species::CO => (1, 0, 1, 0),
            Species::H2O => (0, 2, 1, 0),
            Species::H2 => (0, 2, 0, 0),
            Species::CH4 => (1, 4, 0, 0),
            Species::C3H8 => (3, 8, 0, 0),
        };
        Atoms { c, h, o, n }
    }

    /// Moles of O₂ consumed per mole of this species on complete oxidation
    /// to CO₂ and H₂O. Negative for oxygen itself, zero for inert species.
    pub fn oxygen_demand(&self) -> f64 {
        let a = self.atoms();
        f64::from(a.c) + f64::from(a.h) / 4.0 - f64::from(a.o) / 2.0
    }

    /// Whether this species releases heat when oxidized (a fuel or an
    /// incompletely oxidized product).
    pub fn is_oxidizable(&self) -> bool {
        self.oxygen_demand() > 0.0
    }

    /// Whether this species is a hydrocarbon fuel.
    pub fn is_hydrocarbon(&self) -> bool {
        let a = self.atoms();
        a.c > 0 && a.h > 0
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "O2" | "OXYGEN" => Ok(Species::O2),
            "N2" | "NITROGEN" => Ok(Species::N2),
            "AR" | "ARGON" => Ok(Species::Ar),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "CO" | "CARBONMONOXIDE" | "CARBON MONOXIDE" => Ok(Species::CO),
            "H2O" | "WATER" => Ok(Species::H2O),
            "H2" | "HYDROGEN" => Ok(Species::H2),
            "CH4" | "METHANE" => Ok(Species::CH4),
            "C3H8" | "PROPANE" => Ok(Species::C3H8),
            _ => Err("unknown species"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("C3H8".parse::<Species>().unwrap(), Species::C3H8);
        assert_eq!("propane".parse::<Species>().unwrap(), Species::C3H8);
        assert_eq!("Water".parse::<Species>().unwrap(), Species::H2O);
        assert!("C8H18".parse::<Species>().is_err());
    }

    #[test]
    fn canonical_key_roundtrip() {
        for species in Species::ALL {
            let parsed = species
                .key()
                .parse::<Species>()
                .expect("canonical key should parse");
            assert_eq!(parsed, species);
        }
    }

    #[test]
    fn index_matches_all_order() {
        for (i, species) in Species::ALL.iter().enumerate() {
            assert_eq!(species.index(), i);
        }
    }

    #[test]
    fn oxygen_demand_values() {
        assert_eq!(Species::C3H8.oxygen_demand(), 5.0);
        assert_eq!(Species::CH4.oxygen_demand(), 2.0);
        assert_eq!(Species::CO.oxygen_demand(), 0.5);
        assert_eq!(Species::H2.oxygen_demand(), 0.5);
        assert_eq!(Species::O2.oxygen_demand(), -1.0);
        assert_eq!(Species::N2.oxygen_demand(), 0.0);
        assert_eq!(Species::CO2.oxygen_demand(), 0.0);
    }

    #[test]
    fn cp_is_positive_and_increasing_for_polyatomics() {
        for species in Species::ALL {
            let cp300 = species.cp_molar(300.0);
            let cp2000 = species.cp_molar(2000.0);
            assert!(cp300 > 0.0);
            assert!(cp2000 >= cp300);
        }
    }

    #[test]
    fn enthalpy_reference_state() {
        // At the reference temperature the sensible part vanishes.
        for species in Species::ALL {
            let h = species.h_molar(298.15);
            assert!((h - species.formation_enthalpy()).abs() < 1.0);
        }
    }

    #[test]
    fn internal_energy_below_enthalpy() {
        for species in Species::ALL {
            assert!(species.u_molar(1000.0) < species.h_molar(1000.0));
        }
    }
}
