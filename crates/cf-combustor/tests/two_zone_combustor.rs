//! Integration test: two-zone recirculating combustor at steady state.
//!
//! Primary zone takes 30% of the air with the whole fuel stream (rich);
//! the secondary dilutes with the remaining 70% and completes burnout.
//! Exit mole fractions of oxidizer and unburned fuel in the secondary
//! must fall between the primary zone's values and the fresh air feed's
//! (dilution monotonicity).

use cf_combustor::{
    CombustorGeometry, CombustorInlet, DiffuserGeometry, DiffuserSolver, FuelSpec, OperatingPoint,
    TwoZoneCombustor, ZoneSplit,
};
use cf_core::units::{k, kgps, m2, m3, pa};
use cf_thermo::{Composition, GasState, IdealGasModel, Species};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn converged_inlet(model: &IdealGasModel) -> CombustorInlet {
    let operating_point = OperatingPoint::new(k(345.68), pa(130_640.0), kgps(1.388)).unwrap();
    let geometry = DiffuserGeometry::new(m2(0.0153), m2(0.0412), 0.9).unwrap();
    let air = Composition::standard_air();
    let inlet = GasState::new(k(345.68), pa(130_640.0), air.clone()).unwrap();
    let guess = GasState::new(k(345.68), pa(130_640.0), air).unwrap();

    let solution = DiffuserSolver::default()
        .solve(model, &operating_point, &geometry, &inlet, guess)
        .unwrap()
        .converged()
        .unwrap();
    CombustorInlet::from(&solution)
}

fn staged_combustor() -> TwoZoneCombustor {
    let geometry = CombustorGeometry::new(m3(1.0), 0.95).unwrap();
    let split = ZoneSplit::new(0.3, 0.6).unwrap();
    let fuel = FuelSpec::new(Composition::pure(Species::C3H8), 1.25).unwrap();
    TwoZoneCombustor::new(geometry, split, fuel)
}

#[test]
fn staged_network_reaches_steady_state() {
    init_tracing();
    let model = IdealGasModel::new();
    let inlet = converged_inlet(&model);

    let exit = staged_combustor().run(&model, &inlet).unwrap();

    // Both zones lit; the diluted-and-burned-out secondary runs hotter
    // than the oxygen-starved primary.
    let t_primary = exit.primary.temperature().value;
    let t_secondary = exit.secondary.temperature().value;
    assert!(t_primary > 1000.0, "primary temperature {t_primary} K");
    assert!(
        t_secondary > 1500.0,
        "secondary temperature {t_secondary} K"
    );
    assert!(t_secondary > t_primary);
    assert!(t_secondary < 3000.0);
}

#[test]
fn rich_primary_produces_syngas_lean_secondary_burns_it_out() {
    let model = IdealGasModel::new();
    let inlet = converged_inlet(&model);

    let exit = staged_combustor().run(&model, &inlet).unwrap();

    // Oxygen-starved primary carries partial-oxidation products.
    let co_primary = exit.primary.composition().mole_fraction(Species::CO);
    let h2_primary = exit.primary.composition().mole_fraction(Species::H2);
    assert!(co_primary > 0.02, "primary CO fraction {co_primary}");
    assert!(h2_primary > 0.02, "primary H2 fraction {h2_primary}");

    // The secondary burns the carryover down.
    assert!(exit.secondary.composition().mole_fraction(Species::CO) < 0.5 * co_primary);
    assert!(exit.secondary.composition().mole_fraction(Species::CO2) > 0.02);
}

#[test]
fn dilution_monotonicity_between_primary_and_fresh_air() {
    let model = IdealGasModel::new();
    let inlet = converged_inlet(&model);
    let air = Composition::standard_air();

    let exit = staged_combustor().run(&model, &inlet).unwrap();

    let o2_primary = exit.primary.composition().mole_fraction(Species::O2);
    let o2_secondary = exit.secondary.composition().mole_fraction(Species::O2);
    let o2_air = air.mole_fraction(Species::O2);

    // Secondary oxygen sits between the starved primary and fresh air.
    assert!(
        o2_primary < o2_secondary && o2_secondary < o2_air,
        "O2 fractions: primary {o2_primary}, secondary {o2_secondary}, air {o2_air}"
    );

    let fuel_primary = exit.primary.composition().mole_fraction(Species::C3H8);
    let fuel_secondary = exit.secondary.composition().mole_fraction(Species::C3H8);

    // Unburned fuel falls from primary toward the air feed's zero,
    // without reaching it exactly while the primary keeps feeding it.
    assert!(
        fuel_secondary < fuel_primary,
        "fuel fractions: primary {fuel_primary}, secondary {fuel_secondary}"
    );
    assert!(fuel_secondary > 0.0);
}
