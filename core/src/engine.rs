//! The dashboard facade.
//!
//! Owns the fixture, the metrics policy and the clock, and answers every
//! query a view can make. Each query reads the clock once to pick the
//! day-bucket and recomputes from scratch.

use crate::{
    clock::{SystemClock, WallClock},
    config::MetricsConfig,
    details::{lookup_details, MachineDetails},
    filter::{self, Choice, FilterState, SiteView, Totals},
    fixture::Fixture,
    metrics::{MachineMetrics, MetricsEngine},
    search::{self, Suggestion},
    snapshot::{DashboardSnapshot, MachineSnapshot},
    types::{DayBucket, MachineId},
};

pub struct Dashboard {
    fixture: Fixture,
    config:  MetricsConfig,
    clock:   Box<dyn WallClock>,
}

impl Dashboard {
    pub fn new(fixture: Fixture, config: MetricsConfig, clock: Box<dyn WallClock>) -> Self {
        Self { fixture, config, clock }
    }

    /// Default policy, real UTC clock.
    pub fn with_system_clock(fixture: Fixture) -> Self {
        Self::new(fixture, MetricsConfig::default(), Box::new(SystemClock))
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn today(&self) -> DayBucket {
        self.clock.today()
    }

    /// An engine pinned to the current day-bucket.
    pub fn metrics_engine(&self) -> MetricsEngine<'_> {
        MetricsEngine::new(&self.config, self.today())
    }

    /// An engine pinned to an explicit day. Used for replays.
    pub fn metrics_engine_for(&self, day: DayBucket) -> MetricsEngine<'_> {
        MetricsEngine::new(&self.config, day)
    }

    pub fn totals(&self) -> Totals {
        filter::totals(&self.fixture)
    }

    pub fn city_options(&self) -> Vec<String> {
        filter::city_options(&self.fixture)
    }

    pub fn department_options(&self, city: &Choice<String>) -> Vec<String> {
        filter::department_options(&self.fixture, city)
    }

    pub fn filter_tree(&self, filter: &FilterState) -> Vec<SiteView<'_>> {
        filter::filter_tree(&self.fixture, filter)
    }

    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        search::suggestions(&self.fixture, query, self.config.suggestion_limit)
    }

    pub fn details(&self, id: MachineId) -> MachineDetails {
        lookup_details(&self.fixture, id)
    }

    /// `None` for an unknown machine id.
    pub fn metrics(&self, id: MachineId) -> Option<MachineMetrics> {
        let entry = self.fixture.find_machine(id)?;
        Some(self.metrics_engine().machine_metrics(entry.machine))
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot_for(self.today())
    }

    pub fn snapshot_for(&self, day: DayBucket) -> DashboardSnapshot {
        let engine = self.metrics_engine_for(day);
        let machines = self
            .fixture
            .machines()
            .map(|entry| MachineSnapshot {
                site_id:       entry.site.id,
                department_id: entry.department.id,
                name:          entry.machine.name.clone(),
                state:         entry.machine.state.label().to_string(),
                metrics:       engine.machine_metrics(entry.machine),
            })
            .collect();
        log::debug!("Snapshot built for day {day}");
        DashboardSnapshot::new(day, self.totals(), self.city_options(), machines)
    }
}
