//! Single-zone combustor network.

use crate::config::{CombustorGeometry, FuelSpec};
use crate::diffuser::DiffuserSolution;
use crate::error::{CombustorError, CombustorResult};
use crate::fuel::fuel_mass_flow;
use cf_core::units::{MassRate, Pressure, Temperature, Time, k, pa, s};
use cf_reactor::{
    DEFAULT_VALVE_COEFF, FlowSource, MassFlowController, PressureValve, ReactingZone, ReactorNet,
};
use cf_thermo::{Composition, GasModel, GasState};
use tracing::debug;

/// Ignition-assisting zone seed temperature [K].
///
/// Deliberately hotter than any inflow so the reactor never starts from a
/// cold, non-igniting state.
pub const IGNITION_SEED_TEMPERATURE_K: f64 = 1200.0;

/// Converged diffuser exit conditions consumed by a combustor builder.
#[derive(Debug, Clone, Copy)]
pub struct CombustorInlet {
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub air_mass_flow: MassRate,
}

impl From<&DiffuserSolution> for CombustorInlet {
    fn from(solution: &DiffuserSolution) -> Self {
        Self {
            temperature: solution.outlet.temperature(),
            pressure: solution.outlet.pressure(),
            air_mass_flow: solution.mass_flow,
        }
    }
}

/// Exit states of a single-zone solve.
///
/// `early` is the partially-reacted snapshot; `settled` approximates the
/// steady operating point by fixed-duration integration (not a true
/// equilibrium solve). Both are fresh states owned by the caller.
#[derive(Debug, Clone)]
pub struct SingleZoneExit {
    pub early: GasState,
    pub settled: GasState,
    pub residence_time: Time,
}

/// One well-mixed reacting volume fed by air and fuel, drained through a
/// pressure valve to a non-feedback sink.
#[derive(Debug, Clone)]
pub struct SingleZoneCombustor {
    geometry: CombustorGeometry,
    fuel: FuelSpec,
    valve_coeff: f64,
    snapshot_tau: f64,
    settle_tau: f64,
}

impl SingleZoneCombustor {
    pub fn new(geometry: CombustorGeometry, fuel: FuelSpec) -> Self {
        Self {
            geometry,
            fuel,
            valve_coeff: DEFAULT_VALVE_COEFF,
            snapshot_tau: 6.5,
            settle_tau: 20.0,
        }
    }

    /// Override the drain valve coefficient [kg/(s·Pa)].
    pub fn with_valve_coeff(mut self, valve_coeff: f64) -> CombustorResult<Self> {
        if !valve_coeff.is_finite() || valve_coeff <= 0.0 {
            return Err(CombustorError::Config {
                what: "valve coefficient must be positive and finite",
            });
        }
        self.valve_coeff = valve_coeff;
        Ok(self)
    }

    /// Override the two advance horizons, in residence-time multiples.
    ///
    /// The snapshot must fall strictly before the settled horizon.
    pub fn with_snapshot_horizon(
        mut self,
        snapshot_tau: f64,
        settle_tau: f64,
    ) -> CombustorResult<Self> {
        if !(snapshot_tau > 0.0 && settle_tau > snapshot_tau) {
            return Err(CombustorError::Config {
                what: "snapshot horizon must satisfy 0 < snapshot < settle",
            });
        }
        self.snapshot_tau = snapshot_tau;
        self.settle_tau = settle_tau;
        Ok(self)
    }

    /// Assemble the network and advance it through both horizons.
    pub fn run(
        &self,
        model: &dyn GasModel,
        inlet: &CombustorInlet,
    ) -> CombustorResult<SingleZoneExit> {
        let air = Composition::standard_air();
        let zone_pressure = pa(inlet.pressure.value * self.geometry.pressure_ratio());

        let air_mass_flow = inlet.air_mass_flow;
        let fuel_flow = fuel_mass_flow(air_mass_flow, &self.fuel, &air)?;

        let air_state = GasState::new(inlet.temperature, zone_pressure, air.clone())?;
        let fuel_state = GasState::new(
            inlet.temperature,
            zone_pressure,
            self.fuel.composition().clone(),
        )?;
        let seed = GasState::new(k(IGNITION_SEED_TEMPERATURE_K), zone_pressure, air)?;

        let zone = ReactingZone::new("combustor", self.geometry.volume(), model, &seed)?;
        let seed_density = zone.density_kg_m3();

        let mut net = ReactorNet::new();
        let zone_id = net.add_zone(zone);
        net.add_feed(
            zone_id,
            FlowSource::new(model, air_state)?,
            MassFlowController::new(air_mass_flow)?,
        )?;
        net.add_feed(
            zone_id,
            FlowSource::new(model, fuel_state)?,
            MassFlowController::new(fuel_flow)?,
        )?;
        net.add_drain(zone_id, PressureValve::new(self.valve_coeff)?, zone_pressure)?;

        let total_inflow = air_mass_flow.value + fuel_flow.value;
        let tau = seed_density * self.geometry.volume().value / total_inflow;
        debug!(
            residence_time_s = tau,
            fuel_kg_s = fuel_flow.value,
            zone_pressure_pa = zone_pressure.value,
            "single-zone combustor assembled"
        );

        net.advance(s(self.snapshot_tau * tau))?;
        let early = net.zone(zone_id).gas_state()?;

        net.advance(s((self.settle_tau - self.snapshot_tau) * tau))?;
        let settled = net.zone(zone_id).gas_state()?;

        Ok(SingleZoneExit {
            early,
            settled,
            residence_time: s(tau),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::units::{kgps, m3};
    use cf_thermo::Species;

    fn propane_combustor() -> SingleZoneCombustor {
        let geometry = CombustorGeometry::new(m3(1.0), 0.95).unwrap();
        let fuel = FuelSpec::new(Composition::pure(Species::C3H8), 1.25).unwrap();
        SingleZoneCombustor::new(geometry, fuel)
    }

    #[test]
    fn snapshot_horizon_validation() {
        assert!(propane_combustor().with_snapshot_horizon(6.5, 20.0).is_ok());
        assert!(propane_combustor().with_snapshot_horizon(0.0, 20.0).is_err());
        assert!(propane_combustor().with_snapshot_horizon(20.0, 6.5).is_err());
        assert!(propane_combustor().with_snapshot_horizon(5.0, 5.0).is_err());
    }

    #[test]
    fn valve_coeff_validation() {
        assert!(propane_combustor().with_valve_coeff(1e-4).is_ok());
        assert!(propane_combustor().with_valve_coeff(0.0).is_err());
        assert!(propane_combustor().with_valve_coeff(f64::NAN).is_err());
    }

    #[test]
    fn inlet_from_diffuser_solution_carries_exit_values() {
        let outlet =
            GasState::new(k(347.7), pa(133_000.0), Composition::standard_air()).unwrap();
        let solution = DiffuserSolution {
            outlet: outlet.clone(),
            mach: 0.068,
            velocity_m_s: 25.4,
            mass_flow: kgps(1.388),
            stagnation_pressure: pa(133_500.0),
            iterations: 3,
        };
        let inlet = CombustorInlet::from(&solution);
        assert_eq!(inlet.temperature, outlet.temperature());
        assert_eq!(inlet.pressure, outlet.pressure());
        assert_eq!(inlet.air_mass_flow.value, 1.388);
    }
}
