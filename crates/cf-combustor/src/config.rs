//! Operating-point, geometry, and fuel configuration.
//!
//! Every type validates its invariants at construction and is immutable
//! for the duration of a solve. `EngineConfig` is the serde-facing form;
//! [`EngineConfig::build`] turns it into the validated domain types,
//! rejecting every violation with a descriptive error before any solver
//! runs.

use crate::error::{CombustorError, CombustorResult};
use cf_core::units::{Area, MassRate, Pressure, Temperature, Volume, k, kgps, m2, m3, pa};
use cf_thermo::Composition;
use serde::{Deserialize, Serialize};

/// Upstream (compressor-discharge) boundary conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    t_stag: Temperature,
    p_stag: Pressure,
    air_mass_flow: MassRate,
}

impl OperatingPoint {
    pub fn new(
        t_stag: Temperature,
        p_stag: Pressure,
        air_mass_flow: MassRate,
    ) -> CombustorResult<Self> {
        if !t_stag.value.is_finite() || t_stag.value <= 0.0 {
            return Err(CombustorError::Config {
                what: "stagnation temperature must be positive and finite",
            });
        }
        if !p_stag.value.is_finite() || p_stag.value <= 0.0 {
            return Err(CombustorError::Config {
                what: "stagnation pressure must be positive and finite",
            });
        }
        if !air_mass_flow.value.is_finite() || air_mass_flow.value <= 0.0 {
            return Err(CombustorError::Config {
                what: "air mass flow must be positive and finite",
            });
        }
        Ok(Self {
            t_stag,
            p_stag,
            air_mass_flow,
        })
    }

    pub fn stagnation_temperature(&self) -> Temperature {
        self.t_stag
    }

    pub fn stagnation_pressure(&self) -> Pressure {
        self.p_stag
    }

    pub fn air_mass_flow(&self) -> MassRate {
        self.air_mass_flow
    }
}

/// Diffuser flow areas and isentropic efficiency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffuserGeometry {
    inlet_area: Area,
    outlet_area: Area,
    efficiency: f64,
}

impl DiffuserGeometry {
    pub fn new(inlet_area: Area, outlet_area: Area, efficiency: f64) -> CombustorResult<Self> {
        if !inlet_area.value.is_finite() || inlet_area.value <= 0.0 {
            return Err(CombustorError::Config {
                what: "diffuser inlet area must be positive and finite",
            });
        }
        if !outlet_area.value.is_finite() || outlet_area.value <= 0.0 {
            return Err(CombustorError::Config {
                what: "diffuser outlet area must be positive and finite",
            });
        }
        if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
            return Err(CombustorError::Config {
                what: "diffuser efficiency must lie in (0, 1]",
            });
        }
        Ok(Self {
            inlet_area,
            outlet_area,
            efficiency,
        })
    }

    pub fn inlet_area(&self) -> Area {
        self.inlet_area
    }

    pub fn outlet_area(&self) -> Area {
        self.outlet_area
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}

/// Combustor reacting volume and pressure-ratio factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombustorGeometry {
    volume: Volume,
    pressure_ratio: f64,
}

impl CombustorGeometry {
    pub fn new(volume: Volume, pressure_ratio: f64) -> CombustorResult<Self> {
        if !volume.value.is_finite() || volume.value <= 0.0 {
            return Err(CombustorError::Config {
                what: "combustor volume must be positive and finite",
            });
        }
        if !pressure_ratio.is_finite() || pressure_ratio <= 0.0 || pressure_ratio > 1.0 {
            return Err(CombustorError::Config {
                what: "combustor pressure ratio must lie in (0, 1]",
            });
        }
        Ok(Self {
            volume,
            pressure_ratio,
        })
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn pressure_ratio(&self) -> f64 {
        self.pressure_ratio
    }
}

/// Primary/secondary split for the two-zone topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSplit {
    primary_flow_fraction: f64,
    primary_volume_fraction: f64,
}

impl ZoneSplit {
    pub fn new(primary_flow_fraction: f64, primary_volume_fraction: f64) -> CombustorResult<Self> {
        if !primary_flow_fraction.is_finite()
            || primary_flow_fraction <= 0.0
            || primary_flow_fraction >= 1.0
        {
            return Err(CombustorError::Config {
                what: "primary flow fraction must lie strictly inside (0, 1)",
            });
        }
        if !primary_volume_fraction.is_finite()
            || primary_volume_fraction <= 0.0
            || primary_volume_fraction >= 1.0
        {
            return Err(CombustorError::Config {
                what: "primary volume fraction must lie strictly inside (0, 1)",
            });
        }
        Ok(Self {
            primary_flow_fraction,
            primary_volume_fraction,
        })
    }

    pub fn primary_flow_fraction(&self) -> f64 {
        self.primary_flow_fraction
    }

    pub fn primary_volume_fraction(&self) -> f64 {
        self.primary_volume_fraction
    }

    /// Split a total air flow; the secondary share is the exact complement,
    /// so the two always sum back to the total.
    pub fn split_flow(&self, total: MassRate) -> (MassRate, MassRate) {
        let primary = kgps(self.primary_flow_fraction * total.value);
        let secondary = kgps(total.value - primary.value);
        (primary, secondary)
    }

    /// Split a total volume; same exact-complement rule as [`Self::split_flow`].
    pub fn split_volume(&self, total: Volume) -> (Volume, Volume) {
        let primary = m3(self.primary_volume_fraction * total.value);
        let secondary = m3(total.value - primary.value);
        (primary, secondary)
    }
}

/// Fuel composition and target equivalence ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelSpec {
    composition: Composition,
    equivalence_ratio: f64,
}

impl FuelSpec {
    pub fn new(composition: Composition, equivalence_ratio: f64) -> CombustorResult<Self> {
        if !equivalence_ratio.is_finite() || equivalence_ratio <= 0.0 {
            return Err(CombustorError::Config {
                what: "equivalence ratio must be positive and finite",
            });
        }
        let demand: f64 = composition.iter().map(|(s, x)| x * s.oxygen_demand()).sum();
        if demand <= 0.0 {
            return Err(CombustorError::Config {
                what: "fuel composition has no oxygen demand",
            });
        }
        Ok(Self {
            composition,
            equivalence_ratio,
        })
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn equivalence_ratio(&self) -> f64 {
        self.equivalence_ratio
    }
}

/// Serde-facing scenario configuration, all plain numbers and strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub stagnation_temperature_k: f64,
    pub stagnation_pressure_pa: f64,
    pub air_mass_flow_kg_s: f64,
    pub diffuser_inlet_area_m2: f64,
    pub diffuser_outlet_area_m2: f64,
    pub diffuser_efficiency: f64,
    pub combustor_volume_m3: f64,
    pub combustor_pressure_ratio: f64,
    pub fuel_composition: String,
    pub equivalence_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_split: Option<ZoneSplitConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneSplitConfig {
    pub primary_flow_fraction: f64,
    pub primary_volume_fraction: f64,
}

/// Fully validated scenario, ready to solve.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub operating_point: OperatingPoint,
    pub diffuser: DiffuserGeometry,
    pub combustor: CombustorGeometry,
    pub fuel: FuelSpec,
    pub zone_split: Option<ZoneSplit>,
}

impl EngineConfig {
    /// Validate every field and construct the domain types.
    pub fn build(&self) -> CombustorResult<Scenario> {
        let operating_point = OperatingPoint::new(
            k(self.stagnation_temperature_k),
            pa(self.stagnation_pressure_pa),
            kgps(self.air_mass_flow_kg_s),
        )?;
        let diffuser = DiffuserGeometry::new(
            m2(self.diffuser_inlet_area_m2),
            m2(self.diffuser_outlet_area_m2),
            self.diffuser_efficiency,
        )?;
        let combustor = CombustorGeometry::new(
            m3(self.combustor_volume_m3),
            self.combustor_pressure_ratio,
        )?;
        let fuel = FuelSpec::new(
            Composition::parse(&self.fuel_composition)?,
            self.equivalence_ratio,
        )?;
        let zone_split = self
            .zone_split
            .map(|split| ZoneSplit::new(split.primary_flow_fraction, split.primary_volume_fraction))
            .transpose()?;

        Ok(Scenario {
            operating_point,
            diffuser,
            combustor,
            fuel,
            zone_split,
        })
    }
}
