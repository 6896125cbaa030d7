//! Well-mixed reacting control volume.

use crate::error::{ReactorError, ReactorResult};
use cf_core::units::constants::R_UNIVERSAL;
use cf_core::units::{Volume, k, pa};
use cf_thermo::{Composition, GasModel, GasState, Species};
use nalgebra::DVector;

/// Energy-accounting mode for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyMode {
    /// Temperature follows the internal-energy balance (default).
    #[default]
    Adiabatic,
    /// Temperature is held at its current value; energy is slaved to it.
    Isothermal,
}

/// A well-mixed control volume with fixed geometric volume.
///
/// The zone integrates per-species masses and total internal energy.
/// Pressure follows from the ideal-gas law over the contents; temperature
/// is recovered from internal energy by Newton iteration after every
/// update (or held fixed in isothermal mode).
#[derive(Debug, Clone)]
pub struct ReactingZone {
    name: String,
    volume_m3: f64,
    energy: EnergyMode,
    masses: DVector<f64>,
    u_total_j: f64,
    t_k: f64,
}

impl ReactingZone {
    /// Create a zone filled with gas at the seed state.
    ///
    /// The seed mass is the ideal-gas mass of the volume at the seed
    /// temperature, pressure, and composition.
    pub fn new(
        name: impl Into<String>,
        volume: Volume,
        model: &dyn GasModel,
        seed: &GasState,
    ) -> ReactorResult<Self> {
        let volume_m3 = volume.value;
        if !volume_m3.is_finite() || volume_m3 <= 0.0 {
            return Err(ReactorError::InvalidArg {
                what: "zone volume must be positive and finite",
            });
        }

        let rho = model.density(seed)?.value;
        let total_mass = rho * volume_m3;
        let y = seed.composition().mass_fraction_vector();
        let masses = DVector::from_iterator(Species::COUNT, y.iter().map(|f| f * total_mass));

        let t_k = seed.temperature().value;
        let u_total_j = internal_energy(&masses, t_k);

        Ok(Self {
            name: name.into(),
            volume_m3,
            energy: EnergyMode::default(),
            masses,
            u_total_j,
            t_k,
        })
    }

    /// Select the energy-accounting mode.
    pub fn with_energy_mode(mut self, energy: EnergyMode) -> Self {
        self.energy = energy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume_m3(&self) -> f64 {
        self.volume_m3
    }

    pub fn energy_mode(&self) -> EnergyMode {
        self.energy
    }

    /// Total mass of the contents [kg].
    pub fn mass_kg(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// Bulk density of the contents [kg/m³].
    pub fn density_kg_m3(&self) -> f64 {
        self.mass_kg() / self.volume_m3
    }

    pub fn temperature_k(&self) -> f64 {
        self.t_k
    }

    /// Ideal-gas pressure of the contents [Pa].
    pub fn pressure_pa(&self) -> f64 {
        let total_moles: f64 = Species::ALL
            .iter()
            .map(|s| self.masses[s.index()] / s.molar_mass())
            .sum();
        total_moles * R_UNIVERSAL * self.t_k / self.volume_m3
    }

    /// Mass fractions of the contents, indexed by [`Species::index`].
    pub fn mass_fractions(&self) -> [f64; Species::COUNT] {
        let total = self.mass_kg();
        let mut y = [0.0; Species::COUNT];
        if total > 0.0 {
            for i in 0..Species::COUNT {
                y[i] = self.masses[i] / total;
            }
        }
        y
    }

    /// Specific enthalpy of the contents [J/kg], formation included.
    pub fn specific_enthalpy(&self) -> f64 {
        let total = self.mass_kg();
        if total <= 0.0 {
            return 0.0;
        }
        let h: f64 = Species::ALL
            .iter()
            .map(|s| self.masses[s.index()] / s.molar_mass() * s.h_molar(self.t_k))
            .sum();
        h / total
    }

    /// Snapshot the contents as a fresh gas state.
    ///
    /// A new `GasState` is created on every call so callers can never
    /// alias the zone's internal storage.
    pub fn gas_state(&self) -> ReactorResult<GasState> {
        let pressure = self.pressure_pa();
        let fractions: Vec<(Species, f64)> = Species::ALL
            .iter()
            .filter_map(|s| {
                let moles = self.masses[s.index()] / s.molar_mass();
                (moles > 0.0).then_some((*s, moles))
            })
            .collect();
        let comp = Composition::from_mole_fractions(fractions)?;
        Ok(GasState::new(k(self.t_k), pa(pressure), comp)?)
    }

    /// Apply a mass/energy increment from the network stepper, then
    /// re-solve temperature (adiabatic) or re-slave energy (isothermal).
    pub(crate) fn apply_increment(
        &mut self,
        dm: &DVector<f64>,
        du_j: f64,
    ) -> ReactorResult<()> {
        self.masses += dm;
        for m in self.masses.iter_mut() {
            if *m < 0.0 {
                if *m < -1e-9 {
                    return Err(ReactorError::NonPhysical {
                        what: "species mass driven negative; time step too large",
                    });
                }
                *m = 0.0;
            }
        }
        self.u_total_j += du_j;
        self.refresh_temperature()
    }

    /// Chemistry hook: masses were relaxed at constant internal energy;
    /// recover the new temperature.
    pub(crate) fn masses_mut(&mut self) -> &mut DVector<f64> {
        &mut self.masses
    }

    pub(crate) fn refresh_temperature(&mut self) -> ReactorResult<()> {
        match self.energy {
            EnergyMode::Adiabatic => {
                self.t_k = solve_temperature(&self.masses, self.u_total_j, self.t_k)?;
            }
            EnergyMode::Isothermal => {
                self.u_total_j = internal_energy(&self.masses, self.t_k);
            }
        }
        Ok(())
    }
}

/// Total internal energy of a species-mass vector at temperature t [J].
fn internal_energy(masses: &DVector<f64>, t_k: f64) -> f64 {
    Species::ALL
        .iter()
        .map(|s| masses[s.index()] / s.molar_mass() * s.u_molar(t_k))
        .sum()
}

/// Newton solve for the temperature matching a target internal energy.
///
/// U(T) is monotone increasing (cv > 0 for every species), so the
/// iteration is globally well-behaved from any bracketed guess.
fn solve_temperature(masses: &DVector<f64>, u_target_j: f64, t_guess_k: f64) -> ReactorResult<f64> {
    const T_MIN: f64 = 150.0;
    const T_MAX: f64 = 6000.0;
    const MAX_ITER: usize = 100;

    if masses.iter().sum::<f64>() <= 0.0 {
        return Err(ReactorError::NonPhysical {
            what: "cannot solve temperature of an empty zone",
        });
    }

    let mut t = t_guess_k.clamp(T_MIN, T_MAX);
    for _ in 0..MAX_ITER {
        let residual = internal_energy(masses, t) - u_target_j;
        let slope: f64 = Species::ALL
            .iter()
            .map(|s| masses[s.index()] / s.molar_mass() * s.cv_molar(t))
            .sum();
        let step = residual / slope;
        t = (t - step).clamp(T_MIN, T_MAX);
        if step.abs() < 1e-9 * t.max(1.0) {
            if !t.is_finite() {
                return Err(ReactorError::NonPhysical {
                    what: "temperature solve produced a non-finite value",
                });
            }
            return Ok(t);
        }
    }
    Err(ReactorError::ConvergenceFailed {
        what: "zone temperature recovery did not converge",
    })
}
