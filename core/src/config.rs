use serde::{Deserialize, Serialize};

/// The production window must end by midnight.
pub const HOURS_PER_DAY: u32 = 24;

/// Normal distribution parameters for one synthesized figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub mean:    f64,
    pub std_dev: f64,
}

impl Distribution {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// `base + round(u * span)` for a uniform draw `u`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformBand {
    pub base: f64,
    pub span: f64,
}

/// Distributions for a state-sensitive metric. Out-of-service machines
/// never reach this table (see `policy::StateOverride`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateDistributions {
    pub active:            Distribution,
    pub under_maintenance: Distribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityConfig {
    pub cpu:     Distribution,
    pub memory:  Distribution,
    pub storage: Distribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionConfig {
    /// Number of hourly slots in the series.
    pub slots:         u32,
    /// Wall-clock hour of slot 0.
    pub start_hour:    u32,
    pub baseline:      f64,
    pub amplitude:     f64,
    pub noise_std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowntimeBand {
    pub base_offset: f64,
    pub range:       f64,
}

/// One band per downtime cause, in category declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowntimeConfig {
    pub material_shortage: DowntimeBand,
    pub maintenance:       DowntimeBand,
    pub setup:             DowntimeBand,
    #[serde(rename = "break")]
    pub break_time:        DowntimeBand,
}

/// Every tunable of the metrics engine and the navigation helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub availability:       StateDistributions,
    pub quality:            StateDistributions,
    pub reliability:        ReliabilityConfig,
    pub performance:        UniformBand,
    pub uptime:             UniformBand,
    pub production:         ProductionConfig,
    pub downtime:           DowntimeConfig,
    pub suggestion_limit:   usize,
    pub highlight_delay_ms: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            availability: StateDistributions {
                active:            Distribution::new(88.0, 6.0),
                under_maintenance: Distribution::new(55.0, 6.0),
            },
            quality: StateDistributions {
                active:            Distribution::new(92.0, 6.0),
                under_maintenance: Distribution::new(57.0, 6.0),
            },
            reliability: ReliabilityConfig {
                cpu:     Distribution::new(86.0, 5.0),
                memory:  Distribution::new(84.0, 5.0),
                storage: Distribution::new(82.0, 5.0),
            },
            performance: UniformBand { base: 70.0, span: 30.0 },
            uptime:      UniformBand { base: 90.0, span: 10.0 },
            production: ProductionConfig {
                slots:         12,
                start_hour:    8,
                baseline:      12.0,
                amplitude:     6.0,
                noise_std_dev: 2.5,
            },
            downtime: DowntimeConfig {
                material_shortage: DowntimeBand { base_offset: 8.0, range: 32.0 },
                maintenance:       DowntimeBand { base_offset: 5.0, range: 23.0 },
                setup:             DowntimeBand { base_offset: 3.0, range: 17.0 },
                break_time:        DowntimeBand { base_offset: 2.0, range: 10.0 },
            },
            suggestion_limit:   8,
            highlight_delay_ms: 120,
        }
    }
}

impl MetricsConfig {
    /// Load from `{data_dir}/metrics_policy.json`.
    /// In tests, use `MetricsConfig::default()`.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/metrics_policy.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: MetricsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.check()?;
        log::info!("Loaded metrics policy from {path}");
        Ok(config)
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.production.slots == 0 {
            anyhow::bail!("production.slots must be > 0");
        }
        let window_end = self.production.start_hour.checked_add(self.production.slots);
        if window_end.map_or(true, |end| end > HOURS_PER_DAY) {
            anyhow::bail!(
                "production window {}h + {} slots runs past midnight",
                self.production.start_hour,
                self.production.slots
            );
        }
        if self.suggestion_limit == 0 {
            anyhow::bail!("suggestion_limit must be > 0");
        }
        Ok(())
    }
}
