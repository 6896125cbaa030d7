//! Two-zone recirculating combustor network.
//!
//! Staged topology: a fuel-rich primary zone takes the whole fuel stream
//! with a fraction of the air, promoting ignition and flame stability; the
//! secondary zone dilutes with the remaining air and completes burnout
//! before exit. The primary feeds the secondary through a pressure valve
//! whose coefficient is the recirculation/carryover strength.

use crate::config::{CombustorGeometry, FuelSpec, ZoneSplit};
use crate::error::{CombustorError, CombustorResult};
use crate::fuel::fuel_mass_flow;
use crate::single_zone::{CombustorInlet, IGNITION_SEED_TEMPERATURE_K};
use cf_core::units::{k, pa};
use cf_reactor::{
    DEFAULT_VALVE_COEFF, FlowSource, MassFlowController, PressureValve, ReactingZone, ReactorNet,
    SteadyStateOptions,
};
use cf_thermo::{Composition, GasModel, GasState};
use tracing::debug;

/// Exit states of a two-zone solve.
///
/// `secondary` is the representative combustor exit condition; `primary`
/// is exposed for recirculation-zone diagnostics.
#[derive(Debug, Clone)]
pub struct TwoZoneExit {
    pub primary: GasState,
    pub secondary: GasState,
}

/// Coupled primary/secondary reacting volumes advanced to steady state.
#[derive(Debug, Clone)]
pub struct TwoZoneCombustor {
    geometry: CombustorGeometry,
    split: ZoneSplit,
    fuel: FuelSpec,
    valve_coeff: f64,
    steady: SteadyStateOptions,
}

impl TwoZoneCombustor {
    pub fn new(geometry: CombustorGeometry, split: ZoneSplit, fuel: FuelSpec) -> Self {
        Self {
            geometry,
            split,
            fuel,
            valve_coeff: DEFAULT_VALVE_COEFF,
            steady: SteadyStateOptions::default(),
        }
    }

    /// Override the inter-zone and drain valve coefficient [kg/(s·Pa)].
    pub fn with_valve_coeff(mut self, valve_coeff: f64) -> CombustorResult<Self> {
        if !valve_coeff.is_finite() || valve_coeff <= 0.0 {
            return Err(CombustorError::Config {
                what: "valve coefficient must be positive and finite",
            });
        }
        self.valve_coeff = valve_coeff;
        Ok(self)
    }

    /// Override the steady-state convergence options.
    pub fn with_steady_options(mut self, steady: SteadyStateOptions) -> Self {
        self.steady = steady;
        self
    }

    /// Assemble the coupled network and solve it to steady state.
    ///
    /// Unlike the single-zone model's fixed-duration advance, this is a
    /// genuine steady solve: integration continues until the network's
    /// rates of change fall below its convergence criterion, and a
    /// network that fails to settle is a typed error, never a guessed
    /// exit state.
    pub fn run(&self, model: &dyn GasModel, inlet: &CombustorInlet) -> CombustorResult<TwoZoneExit> {
        let air = Composition::standard_air();
        let zone_pressure = pa(inlet.pressure.value * self.geometry.pressure_ratio());

        let air_total = inlet.air_mass_flow;
        let fuel_flow = fuel_mass_flow(air_total, &self.fuel, &air)?;

        // Exact-complement splits: primary + secondary always reproduce
        // the totals.
        let (air_primary, air_secondary) = self.split.split_flow(air_total);
        let (volume_primary, volume_secondary) =
            self.split.split_volume(self.geometry.volume());

        let air_state = GasState::new(inlet.temperature, zone_pressure, air.clone())?;
        let fuel_state = GasState::new(
            inlet.temperature,
            zone_pressure,
            self.fuel.composition().clone(),
        )?;
        let seed = GasState::new(k(IGNITION_SEED_TEMPERATURE_K), zone_pressure, air)?;

        let mut net = ReactorNet::new();
        let primary = net.add_zone(ReactingZone::new("primary", volume_primary, model, &seed)?);
        let secondary =
            net.add_zone(ReactingZone::new("secondary", volume_secondary, model, &seed)?);

        // Primary: split air plus the entire fuel stream.
        net.add_feed(
            primary,
            FlowSource::new(model, air_state.clone())?,
            MassFlowController::new(air_primary)?,
        )?;
        net.add_feed(
            primary,
            FlowSource::new(model, fuel_state)?,
            MassFlowController::new(fuel_flow)?,
        )?;

        // Secondary: remaining air plus whatever the inter-zone valve admits.
        net.add_feed(
            secondary,
            FlowSource::new(model, air_state)?,
            MassFlowController::new(air_secondary)?,
        )?;
        net.connect(primary, secondary, PressureValve::new(self.valve_coeff)?)?;
        net.add_drain(
            secondary,
            PressureValve::new(self.valve_coeff)?,
            zone_pressure,
        )?;

        debug!(
            fuel_kg_s = fuel_flow.value,
            air_primary_kg_s = air_primary.value,
            air_secondary_kg_s = air_secondary.value,
            volume_primary_m3 = volume_primary.value,
            volume_secondary_m3 = volume_secondary.value,
            "two-zone combustor assembled"
        );

        net.advance_to_steady_state_with(self.steady)?;

        Ok(TwoZoneExit {
            primary: net.zone(primary).gas_state()?,
            secondary: net.zone(secondary).gas_state()?,
        })
    }
}
