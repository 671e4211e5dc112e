//! Search suggestions.
//!
//! Prefix matches rank above substring-only matches. Within each group
//! the fixture order is kept.

use crate::{
    fixture::{Fixture, MachineRef},
    types::{DepartmentId, MachineId, SiteId},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Prefix,
    Contains,
}

/// One suggestion, with enough identity to navigate to the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub machine_id:      MachineId,
    pub machine_name:    String,
    pub site_id:         SiteId,
    pub site_name:       String,
    pub department_id:   DepartmentId,
    pub department_name: String,
    pub match_kind:      MatchKind,
}

impl Suggestion {
    fn from_ref(entry: &MachineRef<'_>, match_kind: MatchKind) -> Self {
        Self {
            machine_id:      entry.machine.id,
            machine_name:    entry.machine.name.clone(),
            site_id:         entry.site.id,
            site_name:       entry.site.name.clone(),
            department_id:   entry.department.id,
            department_name: entry.department.name.clone(),
            match_kind,
        }
    }
}

pub fn suggestions(fixture: &Fixture, query: &str, limit: usize) -> Vec<Suggestion> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut prefix = Vec::new();
    let mut contains = Vec::new();
    for entry in fixture.machines() {
        let name = entry.machine.name.to_lowercase();
        if name.starts_with(&needle) {
            prefix.push(Suggestion::from_ref(&entry, MatchKind::Prefix));
        } else if name.contains(&needle) {
            contains.push(Suggestion::from_ref(&entry, MatchKind::Contains));
        }
    }

    prefix.into_iter().chain(contains).take(limit).collect()
}
