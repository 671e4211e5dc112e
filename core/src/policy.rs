//! Metric synthesis policy.
//!
//! Maps (signal, machine state) to either a sampling rule or a hard
//! override. Every synthesis routine, scalar or series, asks
//! `MachineState::override_for` first so the "stopped machines produce
//! nothing" rule lives in exactly one place.

use crate::{
    config::{Distribution, MetricsConfig, UniformBand},
    fixture::MachineState,
    rng::UnitDraws,
    types::Percent,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityComponent {
    Cpu,
    Memory,
    Storage,
}

impl ReliabilityComponent {
    pub const ALL: [ReliabilityComponent; 3] = [
        ReliabilityComponent::Cpu,
        ReliabilityComponent::Memory,
        ReliabilityComponent::Storage,
    ];
}

/// A percentage figure the engine can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Availability,
    Quality,
    Performance,
    Uptime,
    Reliability(ReliabilityComponent),
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::Availability,
        MetricKind::Quality,
        MetricKind::Performance,
        MetricKind::Uptime,
        MetricKind::Reliability(ReliabilityComponent::Cpu),
        MetricKind::Reliability(ReliabilityComponent::Memory),
        MetricKind::Reliability(ReliabilityComponent::Storage),
    ];

    /// Stable seed label. NEVER rename: labels feed the seed fold.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Availability => "availability",
            MetricKind::Quality => "quality",
            MetricKind::Performance => "performance",
            MetricKind::Uptime => "uptime",
            MetricKind::Reliability(ReliabilityComponent::Cpu) => "reliability-cpu",
            MetricKind::Reliability(ReliabilityComponent::Memory) => "reliability-memory",
            MetricKind::Reliability(ReliabilityComponent::Storage) => "reliability-storage",
        }
    }
}

/// Anything a state override can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Metric(MetricKind),
    HourlyProduction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOverride {
    /// Sample normally.
    None,
    /// Output is exactly zero, whatever the seed.
    ZeroOutput,
}

impl MachineState {
    pub fn override_for(self, signal: Signal) -> StateOverride {
        use MachineState::*;
        match (self, signal) {
            (OutOfService, Signal::Metric(MetricKind::Availability | MetricKind::Quality)) => {
                StateOverride::ZeroOutput
            }
            (UnderMaintenance | OutOfService, Signal::HourlyProduction) => {
                StateOverride::ZeroOutput
            }
            _ => StateOverride::None,
        }
    }
}

/// How a figure is drawn once no override applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingRule {
    Gaussian(Distribution),
    Uniform(UniformBand),
}

pub fn sampling_rule(
    kind: MetricKind,
    state: MachineState,
    config: &MetricsConfig,
) -> SamplingRule {
    let by_state = |table: &crate::config::StateDistributions| match state {
        MachineState::Active => table.active,
        // Out-of-service is overridden before this is consulted.
        MachineState::UnderMaintenance | MachineState::OutOfService => table.under_maintenance,
    };
    match kind {
        MetricKind::Availability => SamplingRule::Gaussian(by_state(&config.availability)),
        MetricKind::Quality => SamplingRule::Gaussian(by_state(&config.quality)),
        MetricKind::Performance => SamplingRule::Uniform(config.performance),
        MetricKind::Uptime => SamplingRule::Uniform(config.uptime),
        MetricKind::Reliability(c) => SamplingRule::Gaussian(match c {
            ReliabilityComponent::Cpu => config.reliability.cpu,
            ReliabilityComponent::Memory => config.reliability.memory,
            ReliabilityComponent::Storage => config.reliability.storage,
        }),
    }
}

/// Round to the nearest integer and clamp into 0..=100.
/// NaN maps to 0.
pub fn to_percent(value: f64) -> Percent {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as Percent
}

/// Draw one percentage figure for a machine in `state`.
///
/// Published figures always draw from a freshly seeded `Lcg32`; any other
/// `RngCore` is accepted so the policy can be exercised on foreign streams.
pub fn synthesize<R: RngCore + ?Sized>(
    kind: MetricKind,
    state: MachineState,
    rng: &mut R,
    config: &MetricsConfig,
) -> Percent {
    if state.override_for(Signal::Metric(kind)) == StateOverride::ZeroOutput {
        return 0;
    }
    match sampling_rule(kind, state, config) {
        SamplingRule::Gaussian(d) => to_percent(rng.next_gaussian(d.mean, d.std_dev)),
        SamplingRule::Uniform(band) => {
            to_percent(band.base + (rng.next_f64() * band.span).round())
        }
    }
}
