//! The metrics engine: every synthesized figure for one day-bucket.
//!
//! A reading is a pure function of (machine id, metric kind, day,
//! machine state). Nothing is cached; every call recomputes.

use crate::{
    config::MetricsConfig,
    fixture::Machine,
    policy::{synthesize, to_percent, MetricKind, ReliabilityComponent},
    rng::Lcg32,
    seed::metric_seed,
    series::{downtime_ranking, production_series, DowntimeEntry, HourlyPoint},
    types::{DayBucket, MachineId, Percent},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityBreakdown {
    pub cpu:     Percent,
    pub memory:  Percent,
    pub storage: Percent,
}

impl ReliabilityBreakdown {
    pub fn as_array(&self) -> [Percent; 3] {
        [self.cpu, self.memory, self.storage]
    }
}

/// Everything the detail view shows for one machine on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineMetrics {
    pub machine_id:   MachineId,
    pub day:          DayBucket,
    pub availability: Percent,
    pub quality:      Percent,
    pub performance:  Percent,
    pub uptime:       Percent,
    pub reliability:  ReliabilityBreakdown,
    pub production:   Vec<HourlyPoint>,
    pub downtime:     Vec<DowntimeEntry>,
}

pub struct MetricsEngine<'a> {
    config: &'a MetricsConfig,
    day:    DayBucket,
}

impl<'a> MetricsEngine<'a> {
    pub fn new(config: &'a MetricsConfig, day: DayBucket) -> Self {
        Self { config, day }
    }

    pub fn day(&self) -> DayBucket {
        self.day
    }

    /// Seed-derive, sample, apply the state policy, round and clamp.
    pub fn metric(&self, machine: &Machine, kind: MetricKind) -> Percent {
        let seed = metric_seed(machine.id, kind.label(), self.day);
        let mut rng = Lcg32::new(seed);
        synthesize(kind, machine.state, &mut rng, self.config)
    }

    pub fn availability(&self, machine: &Machine) -> Percent {
        self.metric(machine, MetricKind::Availability)
    }

    pub fn quality(&self, machine: &Machine) -> Percent {
        self.metric(machine, MetricKind::Quality)
    }

    /// The fixture's own figure when it has one, synthesized otherwise.
    pub fn performance(&self, machine: &Machine) -> Percent {
        match machine.performance {
            Some(value) => to_percent(value),
            None => self.metric(machine, MetricKind::Performance),
        }
    }

    pub fn uptime(&self, machine: &Machine) -> Percent {
        self.metric(machine, MetricKind::Uptime)
    }

    pub fn reliability(&self, machine: &Machine) -> ReliabilityBreakdown {
        let score = |c| self.metric(machine, MetricKind::Reliability(c));
        ReliabilityBreakdown {
            cpu:     score(ReliabilityComponent::Cpu),
            memory:  score(ReliabilityComponent::Memory),
            storage: score(ReliabilityComponent::Storage),
        }
    }

    pub fn hourly_production(&self, machine: &Machine) -> Vec<HourlyPoint> {
        production_series(machine.id, machine.state, self.day, &self.config.production)
    }

    pub fn downtime_causes(&self, machine: &Machine) -> Vec<DowntimeEntry> {
        downtime_ranking(machine.id, self.day, &self.config.downtime)
    }

    pub fn machine_metrics(&self, machine: &Machine) -> MachineMetrics {
        let metrics = MachineMetrics {
            machine_id:   machine.id,
            day:          self.day,
            availability: self.availability(machine),
            quality:      self.quality(machine),
            performance:  self.performance(machine),
            uptime:       self.uptime(machine),
            reliability:  self.reliability(machine),
            production:   self.hourly_production(machine),
            downtime:     self.downtime_causes(machine),
        };
        log::debug!(
            "day={} machine={} state={} avail={} quality={} perf={}",
            self.day,
            machine.id,
            machine.state,
            metrics.availability,
            metrics.quality,
            metrics.performance
        );
        metrics
    }
}
