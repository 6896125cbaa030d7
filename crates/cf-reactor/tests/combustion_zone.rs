//! Integration test: single fed, drained, reacting zone.
//!
//! Network: air feed + fuel feed --> [zone] --valve--> sink
//!
//! Demonstrates:
//! - Ignition from a hot air seed with cold-side feeds
//! - Fuel burnout over a multiple of the residence time
//! - Pressure settling against the drain valve
//! - Steady-state solve agreeing with the long fixed-duration advance

use cf_core::units::{k, kgps, m3, pa, s};
use cf_reactor::{FlowSource, MassFlowController, PressureValve, ReactingZone, ReactorNet};
use cf_thermo::{Composition, GasState, IdealGasModel, Species};

const FEED_T_K: f64 = 650.0;
const SEED_T_K: f64 = 1200.0;
const ZONE_P_PA: f64 = 130_000.0;
const SINK_P_PA: f64 = 124_000.0;
const AIR_KG_S: f64 = 1.0;
const FUEL_KG_S: f64 = 0.04; // lean of stoichiometric (~0.064 kg/s)

fn build_network(model: &IdealGasModel) -> (ReactorNet, cf_reactor::ZoneId, f64) {
    let seed = GasState::new(k(SEED_T_K), pa(ZONE_P_PA), Composition::standard_air()).unwrap();
    let zone = ReactingZone::new("combustor", m3(1.0), model, &seed).unwrap();
    let seed_density = zone.density_kg_m3();

    let mut net = ReactorNet::new();
    let zone_id = net.add_zone(zone);

    let air_state = GasState::new(k(FEED_T_K), pa(ZONE_P_PA), Composition::standard_air()).unwrap();
    let fuel_state =
        GasState::new(k(FEED_T_K), pa(ZONE_P_PA), Composition::pure(Species::C3H8)).unwrap();

    net.add_feed(
        zone_id,
        FlowSource::new(model, air_state).unwrap(),
        MassFlowController::new(kgps(AIR_KG_S)).unwrap(),
    )
    .unwrap();
    net.add_feed(
        zone_id,
        FlowSource::new(model, fuel_state).unwrap(),
        MassFlowController::new(kgps(FUEL_KG_S)).unwrap(),
    )
    .unwrap();
    net.add_drain(zone_id, PressureValve::new(1e-4).unwrap(), pa(SINK_P_PA))
        .unwrap();

    let residence_time = seed_density * 1.0 / (AIR_KG_S + FUEL_KG_S);
    (net, zone_id, residence_time)
}

#[test]
fn lean_zone_ignites_and_burns_out() {
    let model = IdealGasModel::new();
    let (mut net, zone_id, tau) = build_network(&model);

    net.advance(s(20.0 * tau)).unwrap();

    let exit = net.zone(zone_id).gas_state().unwrap();
    let t_exit = exit.temperature().value;

    // Ignited: far above both feeds and the seed.
    assert!(t_exit > 1600.0, "exit temperature {t_exit} K, expected ignition");
    assert!(t_exit < 3000.0, "exit temperature {t_exit} K is non-physical");

    // Lean burnout: fuel gone, products present, oxygen left over.
    assert!(exit.composition().mole_fraction(Species::C3H8) < 1e-3);
    assert!(exit.composition().mole_fraction(Species::CO2) > 0.03);
    assert!(exit.composition().mole_fraction(Species::H2O) > 0.04);
    assert!(exit.composition().mole_fraction(Species::O2) > 0.005);
}

#[test]
fn zone_pressure_settles_against_drain_valve() {
    let model = IdealGasModel::new();
    let (mut net, zone_id, tau) = build_network(&model);

    net.advance(s(20.0 * tau)).unwrap();

    // At steady throughput the valve passes the full feed rate, so
    // P_zone - P_sink ~= mdot_total / K.
    let dp_expected = (AIR_KG_S + FUEL_KG_S) / 1e-4;
    let dp = net.zone(zone_id).pressure_pa() - SINK_P_PA;
    assert!(
        (dp - dp_expected).abs() / dp_expected < 0.05,
        "valve pressure drop {dp} Pa, expected about {dp_expected} Pa"
    );
}

#[test]
fn steady_state_solve_matches_long_advance() {
    let model = IdealGasModel::new();

    let (mut fixed, fixed_id, tau) = build_network(&model);
    fixed.advance(s(20.0 * tau)).unwrap();

    let (mut steady, steady_id, _) = build_network(&model);
    steady.advance_to_steady_state().unwrap();

    let t_fixed = fixed.zone(fixed_id).temperature_k();
    let t_steady = steady.zone(steady_id).temperature_k();
    assert!(
        (t_fixed - t_steady).abs() / t_steady < 0.02,
        "fixed-duration {t_fixed} K vs steady-state {t_steady} K"
    );
}
