//! Gas composition (pure species or mixtures).

use crate::error::{ThermoError, ThermoResult};
use crate::species::Species;
use cf_core::numeric::{Tolerances, nearly_equal};

/// Gas composition defined by normalized mole fractions.
///
/// The composition is always normalized (mole fractions sum to 1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Species and their mole fractions (always normalized to sum=1).
    items: Vec<(Species, f64)>,
}

impl Composition {
    /// Create a pure-species composition.
    pub fn pure(species: Species) -> Self {
        Self {
            items: vec![(species, 1.0)],
        }
    }

    /// The fixed 21% O₂ / 79% N₂ air used as the combustor working fluid.
    pub fn standard_air() -> Self {
        Self {
            items: vec![(Species::O2, 0.21), (Species::N2, 0.79)],
        }
    }

    /// Create a composition from mole fractions.
    ///
    /// Validates that all fractions are finite, non-negative, and have a positive sum,
    /// then normalizes to sum=1.
    pub fn from_mole_fractions(fractions: Vec<(Species, f64)>) -> ThermoResult<Self> {
        if fractions.is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "empty composition",
            });
        }

        let mut sum = 0.0;
        for (_, frac) in &fractions {
            if !frac.is_finite() {
                return Err(ThermoError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if *frac < 0.0 {
                return Err(ThermoError::NonPhysical {
                    what: "negative mole fraction",
                });
            }
            sum += frac;
        }

        if sum <= 0.0 || !sum.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "mole fractions sum to zero or non-finite",
            });
        }

        let normalized: Vec<(Species, f64)> = fractions
            .into_iter()
            .map(|(s, f)| (s, f / sum))
            .filter(|(_, f)| *f > 1e-15)
            .collect();

        if normalized.is_empty() {
            return Err(ThermoError::NonPhysical {
                what: "all mole fractions negligible",
            });
        }

        Ok(Self { items: normalized })
    }

    /// Create a composition from mass fractions.
    pub fn from_mass_fractions(fractions: Vec<(Species, f64)>) -> ThermoResult<Self> {
        let moles: Vec<(Species, f64)> = fractions
            .into_iter()
            .map(|(s, y)| (s, y / s.molar_mass()))
            .collect();
        Self::from_mole_fractions(moles)
    }

    /// Parse the `"O2:0.21, N2:0.79"` composition string form.
    ///
    /// A bare species name is read as fraction 1. Fractions are normalized.
    pub fn parse(text: &str) -> ThermoResult<Self> {
        let mut fractions = Vec::new();
        for entry in text.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (name, frac) = match entry.split_once(':') {
                Some((name, value)) => {
                    let frac = value.trim().parse::<f64>().map_err(|_| {
                        ThermoError::MalformedComposition {
                            entry: entry.to_string(),
                        }
                    })?;
                    (name.trim(), frac)
                }
                None => (entry, 1.0),
            };
            let species = name
                .parse::<Species>()
                .map_err(|_| ThermoError::UnknownSpecies {
                    name: name.to_string(),
                })?;
            fractions.push((species, frac));
        }
        Self::from_mole_fractions(fractions)
    }

    /// Get mole fraction of a species (0.0 if not present).
    pub fn mole_fraction(&self, species: Species) -> f64 {
        self.items
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// Get mass fraction of a species (0.0 if not present).
    pub fn mass_fraction(&self, species: Species) -> f64 {
        let m_mix = self.molar_mass();
        self.mole_fraction(species) * species.molar_mass() / m_mix
    }

    /// Check if this is a pure-species composition.
    ///
    /// Returns `Some(species)` if exactly one species has fraction ≈1.0.
    pub fn is_pure(&self) -> Option<Species> {
        if self.items.len() == 1 {
            let (species, frac) = self.items[0];
            let tol = Tolerances {
                abs: 1e-10,
                rel: 1e-10,
            };
            if nearly_equal(frac, 1.0, tol) {
                return Some(species);
            }
        }
        None
    }

    /// Iterate over all species with non-zero mole fractions.
    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.items.iter().copied()
    }

    /// Compute mixture molar mass [kg/kmol] from species mole fractions.
    pub fn molar_mass(&self) -> f64 {
        self.items
            .iter()
            .map(|(species, mole_frac)| species.molar_mass() * mole_frac)
            .sum()
    }

    /// Mass fractions indexed by [`Species::index`], for state-vector layouts.
    pub fn mass_fraction_vector(&self) -> [f64; Species::COUNT] {
        let m_mix = self.molar_mass();
        let mut y = [0.0; Species::COUNT];
        for (species, x) in self.iter() {
            y[species.index()] += x * species.molar_mass() / m_mix;
        }
        y
    }
}
