//! Flow connectors between zones, sources, and sinks.

use crate::error::{ReactorError, ReactorResult};
use cf_core::units::MassRate;

/// Default valve coefficient [kg/(s·Pa)] for combustor drain and
/// inter-zone connectors.
pub const DEFAULT_VALVE_COEFF: f64 = 1e-4;

/// Feed with a fixed, externally imposed mass flow rate.
#[derive(Debug, Clone, Copy)]
pub struct MassFlowController {
    rate_kg_s: f64,
}

impl MassFlowController {
    pub fn new(rate: MassRate) -> ReactorResult<Self> {
        let rate_kg_s = rate.value;
        if !rate_kg_s.is_finite() || rate_kg_s < 0.0 {
            return Err(ReactorError::InvalidArg {
                what: "mass flow rate must be non-negative and finite",
            });
        }
        Ok(Self { rate_kg_s })
    }

    pub fn rate_kg_s(&self) -> f64 {
        self.rate_kg_s
    }
}

/// Directional pressure-driven connector: ṁ = K·max(ΔP, 0).
///
/// The coefficient is a tunable recirculation/carryover strength, not
/// derived from first principles. Flow never reverses; a zone coupled
/// against an adverse pressure gradient simply admits nothing.
#[derive(Debug, Clone, Copy)]
pub struct PressureValve {
    coeff_kg_s_pa: f64,
}

impl PressureValve {
    pub fn new(coeff_kg_s_pa: f64) -> ReactorResult<Self> {
        if !coeff_kg_s_pa.is_finite() || coeff_kg_s_pa <= 0.0 {
            return Err(ReactorError::InvalidArg {
                what: "valve coefficient must be positive and finite",
            });
        }
        Ok(Self { coeff_kg_s_pa })
    }

    pub fn coeff(&self) -> f64 {
        self.coeff_kg_s_pa
    }

    /// Mass flow admitted from upstream to downstream [kg/s].
    pub fn mass_flow(&self, p_upstream_pa: f64, p_downstream_pa: f64) -> f64 {
        self.coeff_kg_s_pa * (p_upstream_pa - p_downstream_pa).max(0.0)
    }
}

impl Default for PressureValve {
    fn default() -> Self {
        Self {
            coeff_kg_s_pa: DEFAULT_VALVE_COEFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::units::kgps;

    #[test]
    fn controller_rejects_negative_rate() {
        assert!(MassFlowController::new(kgps(-0.1)).is_err());
        assert!(MassFlowController::new(kgps(0.0)).is_ok());
        assert!(MassFlowController::new(kgps(1.388)).is_ok());
    }

    #[test]
    fn valve_flow_is_linear_in_pressure_difference() {
        let valve = PressureValve::new(1e-4).unwrap();
        assert_eq!(valve.mass_flow(130_000.0, 120_000.0), 1.0);
        assert_eq!(valve.mass_flow(125_000.0, 120_000.0), 0.5);
    }

    #[test]
    fn valve_never_reverses() {
        let valve = PressureValve::default();
        assert_eq!(valve.mass_flow(100_000.0, 120_000.0), 0.0);
    }

    #[test]
    fn valve_rejects_non_positive_coefficient() {
        assert!(PressureValve::new(0.0).is_err());
        assert!(PressureValve::new(-1e-4).is_err());
        assert!(PressureValve::new(f64::NAN).is_err());
    }
}
