//! Integration test: diffuser convergence at the reference operating point.
//!
//! Compressor discharge at 345.68 K / 130.64 kPa / 1.388 kg/s entering a
//! 0.0153 m² -> 0.0412 m² diffuser with 0.9 isentropic efficiency. The
//! solver must converge within its iteration budget, slow the flow to
//! under ~30 m/s, and raise the static pressure above the inlet value
//! while the stagnation pressure drops slightly through the modeled loss.

use cf_combustor::{DiffuserGeometry, DiffuserOutcome, DiffuserSolver, OperatingPoint};
use cf_core::units::{k, kgps, m2, pa};
use cf_thermo::{Composition, GasModel, GasState, IdealGasModel, relations};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn reference_case() -> (OperatingPoint, DiffuserGeometry, GasState, GasState) {
    let operating_point = OperatingPoint::new(k(345.68), pa(130_640.0), kgps(1.388)).unwrap();
    let geometry = DiffuserGeometry::new(m2(0.0153), m2(0.0412), 0.9).unwrap();
    let air = Composition::standard_air();
    // Outlet guess seeded at the inlet conditions.
    let inlet = GasState::new(k(345.68), pa(130_640.0), air.clone()).unwrap();
    let outlet_guess = GasState::new(k(345.68), pa(130_640.0), air).unwrap();
    (operating_point, geometry, inlet, outlet_guess)
}

#[test]
fn reference_case_converges_and_diffuses() {
    init_tracing();
    let model = IdealGasModel::new();
    let (operating_point, geometry, inlet, guess) = reference_case();

    let solution = DiffuserSolver::default()
        .solve(&model, &operating_point, &geometry, &inlet, guess)
        .unwrap()
        .converged()
        .unwrap();

    assert!(solution.iterations <= 100);
    assert!(
        solution.velocity_m_s < 30.0,
        "outlet velocity {} m/s",
        solution.velocity_m_s
    );
    assert!(solution.mach > 0.0 && solution.mach < 0.1);

    // Diffusion raises static pressure as the flow slows.
    assert!(solution.outlet.pressure().value > inlet.pressure().value);
    // Slowing the flow recovers static temperature as well.
    assert!(solution.outlet.temperature().value > inlet.temperature().value);
    // Static never exceeds stagnation.
    assert!(solution.outlet.pressure().value <= solution.stagnation_pressure.value);
}

#[test]
fn converged_mass_flow_reproduces_inlet_flow() {
    let model = IdealGasModel::new();
    let (operating_point, geometry, inlet, guess) = reference_case();

    let solution = DiffuserSolver::default()
        .solve(&model, &operating_point, &geometry, &inlet, guess)
        .unwrap()
        .converged()
        .unwrap();

    let m_dot = operating_point.air_mass_flow().value;
    assert!((solution.mass_flow.value - m_dot).abs() / m_dot < 1e-6);
}

#[test]
fn stagnation_pressure_drops_through_the_loss() {
    let model = IdealGasModel::new();
    let (operating_point, geometry, inlet, guess) = reference_case();

    // Inlet stagnation pressure from the inlet static state.
    let props_in = model.properties(&inlet).unwrap();
    let gamma_in = props_in.gamma().unwrap();
    let v_in = operating_point.air_mass_flow().value
        / (props_in.rho.value * geometry.inlet_area().value);
    let mach_in = v_in / props_in.speed_of_sound().unwrap();
    let p0_in =
        relations::stagnation_pressure(inlet.pressure().value, gamma_in, mach_in).unwrap();

    let solution = DiffuserSolver::default()
        .solve(&model, &operating_point, &geometry, &inlet, guess)
        .unwrap()
        .converged()
        .unwrap();

    // eta < 1 discounts the dynamic-head recovery.
    assert!(solution.stagnation_pressure.value < p0_in);
    // But the loss is small for a 90% efficient diffuser.
    assert!(solution.stagnation_pressure.value > 0.995 * p0_in);
}

#[test]
fn tight_budget_yields_not_converged_without_state() {
    let model = IdealGasModel::new();
    let (operating_point, geometry, inlet, guess) = reference_case();

    let outcome = DiffuserSolver::default()
        .with_iteration_budget(1)
        .solve(&model, &operating_point, &geometry, &inlet, guess)
        .unwrap();

    // The failure arm exposes nothing downstream code could misuse.
    match outcome {
        DiffuserOutcome::NotConverged { iterations } => assert_eq!(iterations, 1),
        DiffuserOutcome::Converged(_) => panic!("budget of one pass must not converge"),
    }
}
