//! Snapshot serialization: every machine's figures for one day, to JSON.
//!
//! A snapshot is a read-out, not state. Taking it twice on the same day
//! yields byte-identical JSON.

use crate::{
    clock::day_start,
    filter::Totals,
    metrics::MachineMetrics,
    types::{DayBucket, DepartmentId, SiteId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub site_id:       SiteId,
    pub department_id: DepartmentId,
    pub name:          String,
    pub state:         String,
    pub metrics:       MachineMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub day:      DayBucket,
    pub date:     Option<NaiveDate>,
    pub totals:   Totals,
    pub cities:   Vec<String>,
    pub machines: Vec<MachineSnapshot>,
}

impl DashboardSnapshot {
    pub fn new(
        day: DayBucket,
        totals: Totals,
        cities: Vec<String>,
        machines: Vec<MachineSnapshot>,
    ) -> Self {
        Self {
            day,
            date: day_start(day).map(|dt| dt.date_naive()),
            totals,
            cities,
            machines,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
