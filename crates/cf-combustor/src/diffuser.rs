//! Diffuser outlet convergence solver.
//!
//! The outlet velocity, temperature, pressure, and density are mutually
//! implicit: density depends on the static state being solved for, and the
//! static state depends on the velocity through the energy balance. The
//! solver iterates the outlet velocity to a fixed point satisfying mass
//! continuity, the adiabatic no-work energy balance, and the
//! loss-adjusted stagnation-pressure relation.

use crate::config::{DiffuserGeometry, OperatingPoint};
use crate::error::{CombustorError, CombustorResult};
use cf_core::numeric::{Tolerances, nearly_equal};
use cf_core::units::{MassRate, Pressure, k, kgps, pa};
use cf_thermo::{GasModel, GasState, relations};
use tracing::{debug, trace, warn};

/// Converged diffuser exit conditions.
#[derive(Debug, Clone)]
pub struct DiffuserSolution {
    /// Outlet static state (temperature, pressure, composition).
    pub outlet: GasState,
    /// Outlet Mach number.
    pub mach: f64,
    /// Outlet velocity [m/s].
    pub velocity_m_s: f64,
    /// Outlet mass flow; equals the configured inlet flow by continuity.
    pub mass_flow: MassRate,
    /// Outlet stagnation pressure, after the efficiency-modeled loss.
    pub stagnation_pressure: Pressure,
    /// Passes taken to converge.
    pub iterations: u32,
}

/// Result of a diffuser solve.
///
/// The non-converged arm deliberately carries no outlet state, Mach, or
/// mass flow: nothing downstream may consume an unconverged solution.
#[derive(Debug)]
pub enum DiffuserOutcome {
    Converged(DiffuserSolution),
    NotConverged { iterations: u32 },
}

impl DiffuserOutcome {
    /// Unwrap the converged solution or surface a typed error.
    pub fn converged(self) -> CombustorResult<DiffuserSolution> {
        match self {
            DiffuserOutcome::Converged(solution) => Ok(solution),
            DiffuserOutcome::NotConverged { iterations } => {
                Err(CombustorError::DiffuserNotConverged { iterations })
            }
        }
    }
}

/// Fixed-point solver for the diffuser outlet state.
#[derive(Debug, Clone, Copy)]
pub struct DiffuserSolver {
    /// Velocity convergence tolerance [m/s].
    pub tolerance_m_s: f64,
    /// Iteration budget.
    pub max_iterations: u32,
}

impl Default for DiffuserSolver {
    fn default() -> Self {
        Self {
            tolerance_m_s: 0.01,
            max_iterations: 100,
        }
    }
}

impl DiffuserSolver {
    pub fn with_tolerance(mut self, tolerance_m_s: f64) -> Self {
        self.tolerance_m_s = tolerance_m_s;
        self
    }

    pub fn with_iteration_budget(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Iterate the outlet state to convergence.
    ///
    /// `inlet` is read-only throughout; `outlet` is the initial guess
    /// (typically the inlet T and P) and is consumed, mutated in place,
    /// and returned inside the converged solution.
    pub fn solve(
        &self,
        model: &dyn GasModel,
        operating_point: &OperatingPoint,
        geometry: &DiffuserGeometry,
        inlet: &GasState,
        mut outlet: GasState,
    ) -> CombustorResult<DiffuserOutcome> {
        let m_dot = operating_point.air_mass_flow().value;
        let area_in = geometry.inlet_area().value;
        let area_out = geometry.outlet_area().value;
        let eta = geometry.efficiency();

        // Inlet properties are fixed for the whole iteration.
        let props_in = model.properties(inlet)?;
        let gamma_in = props_in.gamma()?;
        let t_in = inlet.temperature().value;
        let p_in = inlet.pressure().value;

        let v_in = m_dot / (props_in.rho.value * area_in);
        let mach_in = v_in / props_in.speed_of_sound()?;
        let t0_in = relations::stagnation_temperature(t_in, gamma_in, mach_in)?;
        let p0_in = relations::stagnation_pressure(p_in, gamma_in, mach_in)?;
        trace!(v_in, mach_in, t0_in, p0_in, "diffuser inlet conditions");

        // Stagnation temperature carries through unchanged: adiabatic, no
        // work. First velocity guess uses the outlet area with the inlet
        // density.
        let t0_out = t0_in;
        let mut v_guess = m_dot / (props_in.rho.value * area_out);
        let mut props_out = model.properties(&outlet)?;
        let mut gamma_out = props_out.gamma()?;

        for iteration in 1..=self.max_iterations {
            // Static temperature from the energy balance between inlet and
            // outlet kinetic-energy terms.
            let t_out =
                t_in + (v_in * v_in / (2.0 * props_in.cp) - v_guess * v_guess / (2.0 * props_out.cp));

            // Stagnation pressure from the inlet static state with the
            // diffuser efficiency discounting the dynamic-head recovery.
            let p0_out = p_in
                * (1.0 + eta * v_in * v_in / (2.0 * props_in.cp * t_in))
                    .powf(gamma_in / (gamma_in - 1.0));

            // Static pressure recovered through the isentropic
            // temperature ratio at the current outlet gamma.
            let p_out = p0_out * (t_out / t0_out).powf(gamma_out / (gamma_out - 1.0));

            outlet.set_tp(k(t_out), pa(p_out))?;
            props_out = model.properties(&outlet)?;
            gamma_out = props_out.gamma()?;

            let v_prev = v_guess;
            v_guess = m_dot / (props_out.rho.value * area_out);
            trace!(iteration, v_prev, v_guess, t_out, p_out, "diffuser pass");

            if (v_prev - v_guess).abs() < self.tolerance_m_s {
                let mach = v_guess / props_out.speed_of_sound()?;
                let m_dot_out = v_guess * props_out.rho.value * area_out;

                // Continuity cross-check: the converged outlet flow must
                // reproduce the configured inlet flow.
                let tol = Tolerances {
                    abs: 1e-9,
                    rel: 1e-6,
                };
                if !nearly_equal(m_dot_out, m_dot, tol) {
                    return Err(CombustorError::MassBalance {
                        what: "converged outlet mass flow does not reproduce the inlet flow",
                    });
                }

                debug!(
                    iterations = iteration,
                    mach,
                    velocity_m_s = v_guess,
                    p0_out,
                    "diffuser converged"
                );
                return Ok(DiffuserOutcome::Converged(DiffuserSolution {
                    outlet,
                    mach,
                    velocity_m_s: v_guess,
                    mass_flow: kgps(m_dot_out),
                    stagnation_pressure: pa(p0_out),
                    iterations: iteration,
                }));
            }
        }

        warn!(
            iterations = self.max_iterations,
            "diffuser outlet velocity did not converge"
        );
        Ok(DiffuserOutcome::NotConverged {
            iterations: self.max_iterations,
        })
    }
}
