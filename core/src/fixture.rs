//! The static factory hierarchy: sites → departments → machines.
//!
//! RULE: The fixture is loaded once and never mutated.
//! Every core function takes it as a parameter; there is no global copy.
//!
//! The on-disk format is the dashboard's JSON dataset, a bare
//! array of sites with French keys.

use crate::{
    error::{DashError, DashResult},
    types::{DepartmentId, MachineId, SiteId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MachineState {
    #[serde(rename = "Actif", alias = "Active")]
    Active,
    #[serde(rename = "En maintenance", alias = "Under maintenance")]
    UnderMaintenance,
    #[serde(rename = "Hors service", alias = "Out of service")]
    OutOfService,
}

impl MachineState {
    pub const ALL: [MachineState; 3] = [
        MachineState::Active,
        MachineState::UnderMaintenance,
        MachineState::OutOfService,
    ];

    /// The label shown in badges and used as the state filter value.
    pub fn label(self) -> &'static str {
        match self {
            MachineState::Active => "Actif",
            MachineState::UnderMaintenance => "En maintenance",
            MachineState::OutOfService => "Hors service",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "etat")]
    pub state: MachineState,
    #[serde(rename = "derniereMaintenance", default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<f64>,
    #[serde(rename = "modele", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware: Option<String>,
    #[serde(rename = "adresseIP", default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(rename = "serie", default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

impl Machine {
    /// A bare machine with every optional field absent.
    pub fn new(id: MachineId, name: impl Into<String>, state: MachineState) -> Self {
        Self {
            id,
            name: name.into(),
            state,
            last_maintenance: None,
            performance: None,
            model: None,
            firmware: None,
            ip_address: None,
            serial: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub machines: Vec<Machine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "localisation", default)]
    pub location: String,
    #[serde(rename = "departements", default)]
    pub departments: Vec<Department>,
}

impl Site {
    /// The part of the location before the first comma, trimmed.
    /// `None` when that part is empty.
    pub fn city(&self) -> Option<&str> {
        let head = self.location.split(',').next().unwrap_or_default().trim();
        (!head.is_empty()).then_some(head)
    }
}

/// A machine together with the site and department that own it.
#[derive(Debug, Clone, Copy)]
pub struct MachineRef<'a> {
    pub site:       &'a Site,
    pub department: &'a Department,
    pub machine:    &'a Machine,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixture {
    pub sites: Vec<Site>,
}

impl Fixture {
    pub fn new(sites: Vec<Site>) -> DashResult<Self> {
        let fixture = Self { sites };
        fixture.validate()?;
        Ok(fixture)
    }

    pub fn from_json_str(json: &str) -> DashResult<Self> {
        let sites: Vec<Site> = serde_json::from_str(json)?;
        Self::new(sites)
    }

    /// Read and validate a fixture file.
    pub fn load(path: &str) -> DashResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DashError::Io {
            path: path.to_string(),
            source,
        })?;
        let fixture = Self::from_json_str(&content)?;
        log::info!(
            "Loaded fixture {path}: {} sites, {} machines",
            fixture.sites.len(),
            fixture.machines().count()
        );
        Ok(fixture)
    }

    /// Machine ids must be unique across the whole fixture: seeds and
    /// lookups are keyed on them.
    pub fn validate(&self) -> DashResult<()> {
        let mut seen = HashSet::new();
        for entry in self.machines() {
            if entry.machine.name.trim().is_empty() {
                return Err(DashError::InvalidFixture {
                    reason: format!("machine {} has an empty name", entry.machine.id),
                });
            }
            if !seen.insert(entry.machine.id) {
                return Err(DashError::DuplicateMachineId { id: entry.machine.id });
            }
        }
        Ok(())
    }

    /// Every machine in fixture order (site, then department, then machine).
    pub fn machines(&self) -> impl Iterator<Item = MachineRef<'_>> {
        self.sites.iter().flat_map(|site| {
            site.departments.iter().flat_map(move |department| {
                department.machines.iter().map(move |machine| MachineRef {
                    site,
                    department,
                    machine,
                })
            })
        })
    }

    pub fn find_machine(&self, id: MachineId) -> Option<MachineRef<'_>> {
        self.machines().find(|entry| entry.machine.id == id)
    }

    pub fn find_site(&self, id: SiteId) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }
}
