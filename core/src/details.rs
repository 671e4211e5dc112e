//! Machine detail records.
//!
//! Lookups never fail: an unknown id yields a record where every field
//! is the "N/A" sentinel, so the detail dialog always has something
//! to render.

use crate::{
    fixture::{Fixture, MachineRef},
    types::{MachineId, NOT_AVAILABLE},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDetails {
    pub id:               String,
    pub name:             String,
    pub state:            String,
    pub site:             String,
    pub location:         String,
    pub department:       String,
    pub last_maintenance: String,
    pub model:            String,
    pub firmware:         String,
    pub ip_address:       String,
    pub serial:           String,
}

fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl MachineDetails {
    pub fn not_available() -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            id:               na(),
            name:             na(),
            state:            na(),
            site:             na(),
            location:         na(),
            department:       na(),
            last_maintenance: na(),
            model:            na(),
            firmware:         na(),
            ip_address:       na(),
            serial:           na(),
        }
    }

    pub fn from_ref(entry: &MachineRef<'_>) -> Self {
        let m = entry.machine;
        Self {
            id:               m.id.to_string(),
            name:             m.name.clone(),
            state:            m.state.label().to_string(),
            site:             entry.site.name.clone(),
            location:         or_na(Some(entry.site.location.as_str())),
            department:       entry.department.name.clone(),
            last_maintenance: or_na(m.last_maintenance.as_deref()),
            model:            or_na(m.model.as_deref()),
            firmware:         or_na(m.firmware.as_deref()),
            ip_address:       or_na(m.ip_address.as_deref()),
            serial:           or_na(m.serial.as_deref()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.id != NOT_AVAILABLE
    }
}

pub fn lookup_details(fixture: &Fixture, id: MachineId) -> MachineDetails {
    match fixture.find_machine(id) {
        Some(entry) => MachineDetails::from_ref(&entry),
        None => MachineDetails::not_available(),
    }
}
