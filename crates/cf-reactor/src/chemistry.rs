//! Fast-chemistry relaxation closure.
//!
//! Heat release is modeled as relaxation of the zone composition toward a
//! burned composition on an Arrhenius timescale. The burned composition is
//! computed from the current mixture by an oxidation hierarchy:
//!
//! 1. hydrocarbons → CO + H₂ (partial oxidation, c/2 O₂ per molecule)
//! 2. H₂ + ½O₂ → H₂O
//! 3. CO + ½O₂ → CO₂
//!
//! Under excess oxygen the three stages together amount to complete
//! combustion; under deficit the hierarchy leaves CO/H₂ (and, deeply rich,
//! unconverted fuel), which is the staged-combustion behavior the two-zone
//! topology relies on. Relaxation is applied as an exact exponential step
//! at constant internal energy, which is unconditionally stable regardless
//! of how stiff the chemical timescale becomes.

use cf_thermo::Species;
use nalgebra::DVector;

/// Westbrook–Dryer activation temperature for propane oxidation, E/R [K].
const ACTIVATION_TEMPERATURE_K: f64 = 15_098.0;

/// Pre-exponential frequency [1/s]; sets the chemical timescale to a few
/// milliseconds at the 1200 K ignition seed.
const FREQUENCY_FACTOR: f64 = 1.8e8;

/// Global finite-rate chemistry parameters.
#[derive(Debug, Clone, Copy)]
pub struct FastChemistry {
    /// Pre-exponential frequency [1/s]
    pub frequency_factor: f64,
    /// Activation temperature E/R [K]
    pub activation_temperature: f64,
}

impl Default for FastChemistry {
    fn default() -> Self {
        Self {
            frequency_factor: FREQUENCY_FACTOR,
            activation_temperature: ACTIVATION_TEMPERATURE_K,
        }
    }
}

impl FastChemistry {
    /// Chemical relaxation timescale at the given temperature [s].
    pub fn timescale(&self, t_k: f64) -> f64 {
        (self.activation_temperature / t_k).exp() / self.frequency_factor
    }

    /// Burned composition the mixture relaxes toward, in moles.
    ///
    /// Oxygen is spent in hierarchy order; whatever it cannot reach is
    /// left as-is. Every stage is an element-conserving reaction.
    pub fn burned_moles(&self, moles: &[f64; Species::COUNT]) -> [f64; Species::COUNT] {
        let mut n = *moles;
        let i_o2 = Species::O2.index();
        let i_co = Species::CO.index();
        let i_co2 = Species::CO2.index();
        let i_h2 = Species::H2.index();
        let i_h2o = Species::H2O.index();

        // Stage 1: hydrocarbons to CO + H2.
        let mut pox_demand = 0.0;
        for species in Species::ALL {
            if species.is_hydrocarbon() {
                let atoms = species.atoms();
                pox_demand += n[species.index()] * f64::from(atoms.c) / 2.0;
            }
        }
        if pox_demand > 0.0 && n[i_o2] > 0.0 {
            let frac = (n[i_o2] / pox_demand).min(1.0);
            for species in Species::ALL {
                if !species.is_hydrocarbon() {
                    continue;
                }
                let atoms = species.atoms();
                let i = species.index();
                let dn = frac * n[i];
                n[i] -= dn;
                n[i_co] += f64::from(atoms.c) * dn;
                n[i_h2] += f64::from(atoms.h) / 2.0 * dn;
                n[i_o2] -= f64::from(atoms.c) / 2.0 * dn;
            }
            n[i_o2] = n[i_o2].max(0.0);
        }

        // Stage 2: hydrogen burnout.
        let dn_h2 = n[i_h2].min(2.0 * n[i_o2]);
        n[i_h2] -= dn_h2;
        n[i_h2o] += dn_h2;
        n[i_o2] -= 0.5 * dn_h2;

        // Stage 3: CO burnout.
        let dn_co = n[i_co].min(2.0 * n[i_o2]);
        n[i_co] -= dn_co;
        n[i_co2] += dn_co;
        n[i_o2] -= 0.5 * dn_co;

        n[i_o2] = n[i_o2].max(0.0);
        n
    }

    /// Relax species masses toward the burned composition over `dt_s`.
    ///
    /// Exact exponential relaxation; total mass is preserved to machine
    /// precision by renormalizing the target against rounded molar masses.
    pub fn relax(&self, masses: &mut DVector<f64>, t_k: f64, dt_s: f64) {
        debug_assert_eq!(masses.len(), Species::COUNT);

        let mut moles = [0.0; Species::COUNT];
        let mut total_mass = 0.0;
        for species in Species::ALL {
            let i = species.index();
            moles[i] = masses[i] / species.molar_mass();
            total_mass += masses[i];
        }
        if total_mass <= 0.0 {
            return;
        }

        let target = self.burned_moles(&moles);
        let mut target_mass = 0.0;
        let mut target_masses = [0.0; Species::COUNT];
        for species in Species::ALL {
            let i = species.index();
            target_masses[i] = target[i] * species.molar_mass();
            target_mass += target_masses[i];
        }
        if target_mass <= 0.0 {
            return;
        }
        let rescale = total_mass / target_mass;

        let alpha = 1.0 - (-dt_s / self.timescale(t_k)).exp();
        for i in 0..Species::COUNT {
            let goal = target_masses[i] * rescale;
            masses[i] += alpha * (goal - masses[i]);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The burned target never carries negative moles and conserves
        /// every element, for arbitrary mixtures.
        #[test]
        fn burned_target_is_physical(
            fuel in 0.0_f64..2.0,
            methane in 0.0_f64..2.0,
            o2 in 0.0_f64..10.0,
            n2 in 0.0_f64..40.0,
            h2o in 0.0_f64..3.0,
        ) {
            let chem = FastChemistry::default();
            let mut n = [0.0; Species::COUNT];
            n[Species::C3H8.index()] = fuel;
            n[Species::CH4.index()] = methane;
            n[Species::O2.index()] = o2;
            n[Species::N2.index()] = n2;
            n[Species::H2O.index()] = h2o;

            let burned = chem.burned_moles(&n);
            for value in burned {
                prop_assert!(value >= 0.0);
            }

            let (c0, h0, o0, n0) = super::tests::atom_totals(&n);
            let (c1, h1, o1, n1) = super::tests::atom_totals(&burned);
            let scale = (o0 + h0 + c0 + n0).max(1.0);
            prop_assert!((c0 - c1).abs() < 1e-9 * scale);
            prop_assert!((h0 - h1).abs() < 1e-9 * scale);
            prop_assert!((o0 - o1).abs() < 1e-9 * scale);
            prop_assert!((n0 - n1).abs() < 1e-9 * scale);
        }
    }
}
