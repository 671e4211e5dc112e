//! Derived series: hourly production and the downtime-cause ranking.
//!
//! Each point draws from its own seed, so one slot or one cause can be
//! recomputed without replaying the others.

use crate::{
    config::{DowntimeBand, DowntimeConfig, ProductionConfig, HOURS_PER_DAY},
    fixture::MachineState,
    policy::{Signal, StateOverride},
    rng::{Lcg32, UnitDraws},
    seed::{fold_seed, SeedPart},
    types::{DayBucket, MachineId},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const PRODUCTION_TAG: &str = "production";
pub const DOWNTIME_TAG: &str = "downtime";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub slot:  u32,
    /// Wall-clock hour the slot starts at.
    pub hour:  u32,
    pub units: u32,
}

impl HourlyPoint {
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Bell-shaped expected output for slot `i` of `slots`.
pub fn production_trend(slot: u32, config: &ProductionConfig) -> f64 {
    config.baseline
        + config.amplitude * (f64::from(slot) / f64::from(config.slots) * PI).sin()
}

/// Slots whose hour would fall past midnight are not produced, so the
/// series never exceeds one point per hour of the day.
pub fn production_series(
    machine_id: MachineId,
    state: MachineState,
    day: DayBucket,
    config: &ProductionConfig,
) -> Vec<HourlyPoint> {
    let halted = state.override_for(Signal::HourlyProduction) == StateOverride::ZeroOutput;
    (0..config.slots)
        .map_while(|slot| {
            let hour = config
                .start_hour
                .checked_add(slot)
                .filter(|&hour| hour < HOURS_PER_DAY)?;
            let units = if halted {
                0
            } else {
                let seed = fold_seed(&[
                    SeedPart::Int(machine_id),
                    SeedPart::Text(PRODUCTION_TAG),
                    SeedPart::from(slot),
                    SeedPart::Int(day),
                ]);
                let noise = Lcg32::new(seed).next_gaussian(0.0, config.noise_std_dev);
                (production_trend(slot, config) + noise).round().max(0.0) as u32
            };
            Some(HourlyPoint { slot, hour, units })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DowntimeCause {
    MaterialShortage,
    Maintenance,
    Setup,
    Break,
}

impl DowntimeCause {
    /// Declaration order. Ties in the ranking keep this order.
    pub const ALL: [DowntimeCause; 4] = [
        DowntimeCause::MaterialShortage,
        DowntimeCause::Maintenance,
        DowntimeCause::Setup,
        DowntimeCause::Break,
    ];

    /// Stable seed label. NEVER rename.
    pub fn label(self) -> &'static str {
        match self {
            DowntimeCause::MaterialShortage => "material-shortage",
            DowntimeCause::Maintenance => "maintenance",
            DowntimeCause::Setup => "setup",
            DowntimeCause::Break => "break",
        }
    }

    pub fn band(self, config: &DowntimeConfig) -> DowntimeBand {
        match self {
            DowntimeCause::MaterialShortage => config.material_shortage,
            DowntimeCause::Maintenance => config.maintenance,
            DowntimeCause::Setup => config.setup,
            DowntimeCause::Break => config.break_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeEntry {
    pub cause:   DowntimeCause,
    pub minutes: u32,
}

/// Sort descending by minutes. Stable, so equal entries keep their
/// input order.
pub fn rank_downtime(mut entries: Vec<DowntimeEntry>) -> Vec<DowntimeEntry> {
    entries.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    entries
}

pub fn downtime_ranking(
    machine_id: MachineId,
    day: DayBucket,
    config: &DowntimeConfig,
) -> Vec<DowntimeEntry> {
    let entries = DowntimeCause::ALL
        .into_iter()
        .map(|cause| {
            let seed = fold_seed(&[
                SeedPart::Int(machine_id),
                SeedPart::Text(DOWNTIME_TAG),
                SeedPart::Text(cause.label()),
                SeedPart::Int(day),
            ]);
            let band = cause.band(config);
            let raw = Lcg32::new(seed).next_in_band(band.base_offset, band.range);
            DowntimeEntry {
                cause,
                minutes: raw.floor().max(0.0) as u32,
            }
        })
        .collect();
    rank_downtime(entries)
}
