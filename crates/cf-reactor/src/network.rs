//! Reactor network assembly and time advancement.

use crate::chemistry::FastChemistry;
use crate::connector::{MassFlowController, PressureValve};
use crate::error::{ReactorError, ReactorResult};
use crate::source::FlowSource;
use crate::zone::ReactingZone;
use cf_core::units::{Pressure, Time};
use cf_thermo::Species;
use nalgebra::DVector;
use tracing::{debug, trace};

/// Handle to a zone registered in a [`ReactorNet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneId(usize);

struct Feed {
    zone: usize,
    source: FlowSource,
    control: MassFlowController,
}

struct Link {
    from: usize,
    to: usize,
    valve: PressureValve,
}

struct Drain {
    zone: usize,
    valve: PressureValve,
    sink_pressure_pa: f64,
}

/// Convergence criterion for [`ReactorNet::advance_to_steady_state`].
#[derive(Debug, Clone, Copy)]
pub struct SteadyStateOptions {
    /// Length of one assessment block, as a multiple of the network
    /// residence timescale.
    pub block_tau_multiple: f64,
    /// Relative zone-temperature change per block below which the network
    /// counts as settled.
    pub temperature_tolerance: f64,
    /// Absolute mass-fraction change per block below which the network
    /// counts as settled.
    pub composition_tolerance: f64,
    /// Blocks to attempt before declaring non-convergence.
    pub max_blocks: usize,
}

impl Default for SteadyStateOptions {
    fn default() -> Self {
        Self {
            block_tau_multiple: 2.0,
            temperature_tolerance: 1e-5,
            composition_tolerance: 1e-6,
            max_blocks: 200,
        }
    }
}

/// A network of reacting zones coupled by feeds, valves, and drains.
///
/// Stepping is explicit: connector flows are evaluated from the current
/// zone pressures, mass and energy are exchanged over an adaptive step
/// bounded by the fastest pressure-relaxation and mass-throughput
/// timescales, and chemistry is then applied as an exact relaxation at
/// constant internal energy (stable for arbitrarily stiff chemical
/// timescales).
pub struct ReactorNet {
    zones: Vec<ReactingZone>,
    feeds: Vec<Feed>,
    links: Vec<Link>,
    drains: Vec<Drain>,
    chemistry: FastChemistry,
    dt_max_s: f64,
    time_s: f64,
}

impl ReactorNet {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            feeds: Vec::new(),
            links: Vec::new(),
            drains: Vec::new(),
            chemistry: FastChemistry::default(),
            dt_max_s: 1e-3,
            time_s: 0.0,
        }
    }

    /// Override the chemistry parameters.
    pub fn with_chemistry(mut self, chemistry: FastChemistry) -> Self {
        self.chemistry = chemistry;
        self
    }

    /// Override the maximum integration step [s].
    pub fn with_max_step(mut self, dt_max_s: f64) -> ReactorResult<Self> {
        if !dt_max_s.is_finite() || dt_max_s <= 0.0 {
            return Err(ReactorError::InvalidArg {
                what: "maximum step must be positive and finite",
            });
        }
        self.dt_max_s = dt_max_s;
        Ok(self)
    }

    pub fn add_zone(&mut self, zone: ReactingZone) -> ZoneId {
        self.zones.push(zone);
        ZoneId(self.zones.len() - 1)
    }

    /// Feed a zone from a fixed-state source at a controlled rate.
    pub fn add_feed(
        &mut self,
        zone: ZoneId,
        source: FlowSource,
        control: MassFlowController,
    ) -> ReactorResult<()> {
        self.check_zone(zone)?;
        self.feeds.push(Feed {
            zone: zone.0,
            source,
            control,
        });
        Ok(())
    }

    /// Couple two zones with a directional pressure valve.
    pub fn connect(&mut self, from: ZoneId, to: ZoneId, valve: PressureValve) -> ReactorResult<()> {
        self.check_zone(from)?;
        self.check_zone(to)?;
        if from == to {
            return Err(ReactorError::InvalidArg {
                what: "cannot connect a zone to itself",
            });
        }
        self.links.push(Link {
            from: from.0,
            to: to.0,
            valve,
        });
        Ok(())
    }

    /// Drain a zone through a valve to a fixed-pressure sink whose state
    /// never feeds back.
    pub fn add_drain(
        &mut self,
        zone: ZoneId,
        valve: PressureValve,
        sink_pressure: Pressure,
    ) -> ReactorResult<()> {
        self.check_zone(zone)?;
        let sink_pressure_pa = sink_pressure.value;
        if !sink_pressure_pa.is_finite() || sink_pressure_pa <= 0.0 {
            return Err(ReactorError::InvalidArg {
                what: "sink pressure must be positive and finite",
            });
        }
        self.drains.push(Drain {
            zone: zone.0,
            valve,
            sink_pressure_pa,
        });
        Ok(())
    }

    pub fn zone(&self, id: ZoneId) -> &ReactingZone {
        &self.zones[id.0]
    }

    /// Elapsed network time [s].
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    fn check_zone(&self, id: ZoneId) -> ReactorResult<()> {
        if id.0 >= self.zones.len() {
            return Err(ReactorError::InvalidArg {
                what: "zone id does not belong to this network",
            });
        }
        Ok(())
    }

    /// Advance the network by a fixed duration.
    pub fn advance(&mut self, duration: Time) -> ReactorResult<()> {
        const MAX_STEPS: usize = 10_000_000;

        let duration_s = duration.value;
        if !duration_s.is_finite() || duration_s < 0.0 {
            return Err(ReactorError::InvalidArg {
                what: "advance duration must be non-negative and finite",
            });
        }
        if self.zones.is_empty() {
            return Err(ReactorError::InvalidArg {
                what: "network has no zones",
            });
        }

        let t_target = self.time_s + duration_s;
        let mut steps = 0usize;
        while self.time_s < t_target - 1e-12 {
            let dt = self.stable_dt().min(t_target - self.time_s);
            self.step(dt)?;
            steps += 1;
            if steps >= MAX_STEPS {
                return Err(ReactorError::ConvergenceFailed {
                    what: "network advance exceeded its step budget",
                });
            }
        }
        Ok(())
    }

    /// Advance until the rates of change of every zone's temperature and
    /// composition fall below the default tolerances.
    pub fn advance_to_steady_state(&mut self) -> ReactorResult<()> {
        self.advance_to_steady_state_with(SteadyStateOptions::default())
    }

    /// Steady-state solve with explicit convergence options.
    pub fn advance_to_steady_state_with(
        &mut self,
        opts: SteadyStateOptions,
    ) -> ReactorResult<()> {
        if self.zones.is_empty() {
            return Err(ReactorError::InvalidArg {
                what: "network has no zones",
            });
        }

        let tau = self.residence_timescale();
        let block_s = (opts.block_tau_multiple * tau).max(1e-3);

        for block in 0..opts.max_blocks {
            let before: Vec<(f64, [f64; Species::COUNT])> = self
                .zones
                .iter()
                .map(|z| (z.temperature_k(), z.mass_fractions()))
                .collect();

            self.advance(cf_core::units::s(block_s))?;

            let mut max_dt_rel: f64 = 0.0;
            let mut max_dy: f64 = 0.0;
            for (zone, (t_prev, y_prev)) in self.zones.iter().zip(&before) {
                max_dt_rel = max_dt_rel.max((zone.temperature_k() - t_prev).abs() / t_prev);
                for (y_now, y_old) in zone.mass_fractions().iter().zip(y_prev.iter()) {
                    max_dy = max_dy.max((y_now - y_old).abs());
                }
            }
            trace!(block, max_dt_rel, max_dy, "steady-state block");

            if max_dt_rel < opts.temperature_tolerance && max_dy < opts.composition_tolerance {
                debug!(
                    blocks = block + 1,
                    time_s = self.time_s,
                    "reactor network reached steady state"
                );
                return Ok(());
            }
        }

        Err(ReactorError::ConvergenceFailed {
            what: "reactor network did not reach steady state within its block budget",
        })
    }

    /// One explicit step: flows, then chemistry, then temperature recovery.
    fn step(&mut self, dt_s: f64) -> ReactorResult<()> {
        let n = self.zones.len();

        let pressures: Vec<f64> = self.zones.iter().map(|z| z.pressure_pa()).collect();
        let enthalpies: Vec<f64> = self.zones.iter().map(|z| z.specific_enthalpy()).collect();
        let fractions: Vec<[f64; Species::COUNT]> =
            self.zones.iter().map(|z| z.mass_fractions()).collect();

        let mut dm: Vec<DVector<f64>> = (0..n).map(|_| DVector::zeros(Species::COUNT)).collect();
        let mut du = vec![0.0f64; n];

        for feed in &self.feeds {
            let transferred = feed.control.rate_kg_s() * dt_s;
            for (i, y) in feed.source.mass_fractions().iter().enumerate() {
                dm[feed.zone][i] += transferred * y;
            }
            du[feed.zone] += transferred * feed.source.specific_enthalpy();
        }

        for link in &self.links {
            let flow = link.valve.mass_flow(pressures[link.from], pressures[link.to]);
            let transferred = flow * dt_s;
            for (i, y) in fractions[link.from].iter().enumerate() {
                dm[link.from][i] -= transferred * y;
                dm[link.to][i] += transferred * y;
            }
            du[link.from] -= transferred * enthalpies[link.from];
            du[link.to] += transferred * enthalpies[link.from];
        }

        for drain in &self.drains {
            let flow = drain
                .valve
                .mass_flow(pressures[drain.zone], drain.sink_pressure_pa);
            let transferred = flow * dt_s;
            for (i, y) in fractions[drain.zone].iter().enumerate() {
                dm[drain.zone][i] -= transferred * y;
            }
            du[drain.zone] -= transferred * enthalpies[drain.zone];
        }

        for (i, zone) in self.zones.iter_mut().enumerate() {
            zone.apply_increment(&dm[i], du[i])?;
        }

        for zone in self.zones.iter_mut() {
            let t = zone.temperature_k();
            self.chemistry.relax(zone.masses_mut(), t, dt_s);
            zone.refresh_temperature()?;
        }

        self.time_s += dt_s;
        Ok(())
    }

    /// Largest stable explicit step for the current state.
    ///
    /// Bounded by a tenth of the fastest mass-throughput timescale and the
    /// fastest valve pressure-relaxation timescale m/(ΣK·P) over all zones.
    fn stable_dt(&self) -> f64 {
        let pressures: Vec<f64> = self.zones.iter().map(|z| z.pressure_pa()).collect();
        let mut dt = self.dt_max_s;

        for (i, zone) in self.zones.iter().enumerate() {
            let mass = zone.mass_kg();
            if mass <= 0.0 {
                continue;
            }

            let mut outflow = 0.0;
            let mut k_total = 0.0;
            for link in &self.links {
                if link.from == i {
                    outflow += link.valve.mass_flow(pressures[i], pressures[link.to]);
                    k_total += link.valve.coeff();
                }
            }
            for drain in &self.drains {
                if drain.zone == i {
                    outflow += drain.valve.mass_flow(pressures[i], drain.sink_pressure_pa);
                    k_total += drain.valve.coeff();
                }
            }

            if outflow > 0.0 {
                dt = dt.min(0.1 * mass / outflow);
            }
            if k_total > 0.0 {
                dt = dt.min(0.1 * mass / (k_total * pressures[i]));
            }
        }

        dt.max(1e-7)
    }

    /// Characteristic residence timescale of the slowest zone [s].
    fn residence_timescale(&self) -> f64 {
        let pressures: Vec<f64> = self.zones.iter().map(|z| z.pressure_pa()).collect();
        let mut tau: f64 = 0.0;

        for (i, zone) in self.zones.iter().enumerate() {
            let mut inflow = 0.0;
            for feed in &self.feeds {
                if feed.zone == i {
                    inflow += feed.control.rate_kg_s();
                }
            }
            for link in &self.links {
                if link.to == i {
                    inflow += link.valve.mass_flow(pressures[link.from], pressures[i]);
                }
            }
            if inflow > 0.0 {
                tau = tau.max(zone.mass_kg() / inflow);
            }
        }

        if tau > 0.0 { tau } else { 0.1 }
    }
}

impl Default for ReactorNet {
    fn default() -> Self {
        Self::new()
    }
}
