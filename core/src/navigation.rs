//! Session-local view state and search-driven navigation.
//!
//! RULE: each field of `ViewState` has exactly one writer method.
//! Render code reads; event handlers call the writers.
//!
//! Picking a suggestion expands the sections that contain the machine
//! and yields a `NavigationPlan`. The host renders the expanded tree,
//! waits `delay_ms` once (no cancellation), then calls
//! `ViewState::complete_highlight`. If the machine is no longer visible
//! by then, completion does nothing.

use crate::{
    filter::{department_options, filter_tree, Choice, FilterState},
    fixture::{Fixture, MachineState},
    search::Suggestion,
    types::{DepartmentId, MachineId, SiteId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An accordion section the view can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SectionKey {
    Site(SiteId),
    Department(DepartmentId),
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKey::Site(id) => write!(f, "site-{id}"),
            SectionKey::Department(id) => write!(f, "dep-{id}"),
        }
    }
}

/// What the host must do after a suggestion is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPlan {
    pub expand:   Vec<SectionKey>,
    pub target:   MachineId,
    /// DOM id of the row to scroll to, e.g. `machine-42`.
    pub anchor:   String,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    filter:            FilterState,
    open_sections:     BTreeSet<SectionKey>,
    pending_highlight: Option<MachineId>,
    highlighted:       Option<MachineId>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn open_sections(&self) -> &BTreeSet<SectionKey> {
        &self.open_sections
    }

    pub fn is_open(&self, key: SectionKey) -> bool {
        self.open_sections.contains(&key)
    }

    pub fn highlighted(&self) -> Option<MachineId> {
        self.highlighted
    }

    pub fn pending_highlight(&self) -> Option<MachineId> {
        self.pending_highlight
    }

    // ── Writers ────────────────────────────────────────────────

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_state_filter(&mut self, state: Choice<MachineState>) {
        self.filter.state = state;
    }

    /// Change the city. A department filter the new city does not offer
    /// is reset to `All`.
    pub fn set_city(&mut self, fixture: &Fixture, city: Choice<String>) {
        self.filter.city = city;
        if let Choice::Only(department) = &self.filter.department {
            let offered = department_options(fixture, &self.filter.city);
            if !offered.contains(department) {
                log::debug!("department filter {department:?} not offered for new city, resetting");
                self.filter.department = Choice::All;
            }
        }
    }

    /// Select a department. Ignored when the current city does not
    /// offer it.
    pub fn set_department(&mut self, fixture: &Fixture, department: Choice<String>) {
        if let Choice::Only(name) = &department {
            if !department_options(fixture, &self.filter.city).contains(name) {
                log::warn!("ignoring department {name:?}: not offered for current city");
                return;
            }
        }
        self.filter.department = department;
    }

    pub fn toggle_section(&mut self, key: SectionKey) {
        if !self.open_sections.remove(&key) {
            self.open_sections.insert(key);
        }
    }

    /// Open the sections holding the suggested machine and arm the
    /// deferred highlight.
    pub fn navigate_to(&mut self, suggestion: &Suggestion, delay_ms: u64) -> NavigationPlan {
        let expand = vec![
            SectionKey::Site(suggestion.site_id),
            SectionKey::Department(suggestion.department_id),
        ];
        self.open_sections.extend(expand.iter().copied());
        self.pending_highlight = Some(suggestion.machine_id);
        log::debug!(
            "navigate to machine {} via {}",
            suggestion.machine_id,
            expand.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
        NavigationPlan {
            expand,
            target: suggestion.machine_id,
            anchor: format!("machine-{}", suggestion.machine_id),
            delay_ms,
        }
    }

    /// Fire the deferred highlight. Returns the highlighted machine, or
    /// `None` when the target is not in the visible tree any more.
    pub fn complete_highlight(&mut self, fixture: &Fixture) -> Option<MachineId> {
        let target = self.pending_highlight.take()?;
        let visible = filter_tree(fixture, &self.filter).iter().any(|site| {
            self.is_open(SectionKey::Site(site.site.id))
                && site.departments.iter().any(|dept| {
                    self.is_open(SectionKey::Department(dept.department.id))
                        && dept.machines.iter().any(|m| m.id == target)
                })
        });
        if visible {
            self.highlighted = Some(target);
            Some(target)
        } else {
            log::debug!("highlight target {target} no longer visible, skipping");
            None
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }
}
