//! Compressible-flow relations.
//!
//! Pure, stateless functions relating static and stagnation conditions.
//! All fail fast with a domain error on non-physical inputs (T ≤ 0, P ≤ 0,
//! γ ≤ 1, M < 0); these indicate configuration or programming errors, not
//! conditions to retry.

use crate::error::{ThermoError, ThermoResult};

/// Heat capacity ratio γ = cp/cv (mass basis).
pub fn heat_capacity_ratio(cp: f64, cv: f64) -> ThermoResult<f64> {
    if !cp.is_finite() || !cv.is_finite() || cv <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "heat capacities must be positive and finite",
        });
    }
    let gamma = cp / cv;
    if gamma <= 1.0 {
        return Err(ThermoError::NonPhysical {
            what: "gamma must exceed 1",
        });
    }
    Ok(gamma)
}

/// Specific gas constant R = cp − cv [J/(kg·K)].
pub fn specific_gas_constant(cp: f64, cv: f64) -> ThermoResult<f64> {
    let r = cp - cv;
    if !r.is_finite() || r <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "gas constant cp - cv must be positive",
        });
    }
    Ok(r)
}

/// Local speed of sound a = √(γ·R·T) [m/s].
pub fn speed_of_sound(gas_constant: f64, gamma: f64, t_k: f64) -> ThermoResult<f64> {
    validate_gamma(gamma)?;
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "temperature must be positive and finite",
        });
    }
    if !gas_constant.is_finite() || gas_constant <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "gas constant must be positive and finite",
        });
    }
    Ok((gamma * gas_constant * t_k).sqrt())
}

/// Isentropic stagnation temperature T₀ = T·(1 + (γ−1)/2·M²) [K].
pub fn stagnation_temperature(t_static_k: f64, gamma: f64, mach: f64) -> ThermoResult<f64> {
    validate_gamma(gamma)?;
    validate_mach(mach)?;
    if !t_static_k.is_finite() || t_static_k <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "static temperature must be positive and finite",
        });
    }
    Ok(t_static_k * (1.0 + 0.5 * (gamma - 1.0) * mach * mach))
}

/// Isentropic stagnation pressure P₀ = P·(1 + (γ−1)/2·M²)^(γ/(γ−1)) [Pa].
pub fn stagnation_pressure(p_static_pa: f64, gamma: f64, mach: f64) -> ThermoResult<f64> {
    validate_gamma(gamma)?;
    validate_mach(mach)?;
    if !p_static_pa.is_finite() || p_static_pa <= 0.0 {
        return Err(ThermoError::NonPhysical {
            what: "static pressure must be positive and finite",
        });
    }
    let base = 1.0 + 0.5 * (gamma - 1.0) * mach * mach;
    Ok(p_static_pa * base.powf(gamma / (gamma - 1.0)))
}

fn validate_gamma(gamma: f64) -> ThermoResult<()> {
    if !gamma.is_finite() || gamma <= 1.0 {
        return Err(ThermoError::NonPhysical {
            what: "gamma must exceed 1 and be finite",
        });
    }
    Ok(())
}

fn validate_mach(mach: f64) -> ThermoResult<()> {
    if !mach.is_finite() || mach < 0.0 {
        return Err(ThermoError::InvalidArg {
            what: "Mach number must be non-negative and finite",
        });
    }
    Ok(())
}
