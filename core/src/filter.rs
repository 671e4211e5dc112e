//! Aggregation and filtering over the fixture.
//!
//! Pure functions: the fixture and the filter state come in, views
//! borrowing from the fixture go out. Nothing is cached.

use crate::fixture::{Department, Fixture, Machine, MachineState, Site};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub sites:       usize,
    pub departments: usize,
    pub machines:    usize,
}

pub fn totals(fixture: &Fixture) -> Totals {
    Totals {
        sites:       fixture.sites.len(),
        departments: fixture.sites.iter().map(|s| s.departments.len()).sum(),
        machines:    fixture
            .sites
            .iter()
            .flat_map(|s| &s.departments)
            .map(|d| d.machines.len())
            .sum(),
    }
}

/// A select-box value: everything, or one exact option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => v == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub query:      String,
    #[serde(default)]
    pub state:      Choice<MachineState>,
    #[serde(default)]
    pub city:       Choice<String>,
    #[serde(default)]
    pub department: Choice<String>,
}

impl FilterState {
    /// True when some filter below the site level is active. Without one,
    /// sites and departments are shown even when they hold no machine.
    pub fn narrows_machines(&self) -> bool {
        !self.query.is_empty() || !self.state.is_all() || !self.department.is_all()
    }

    pub fn admits_site(&self, site: &Site) -> bool {
        match &self.city {
            Choice::All => true,
            Choice::Only(city) => site.city() == Some(city.as_str()),
        }
    }

    pub fn admits_department(&self, department: &Department) -> bool {
        self.department.admits(&department.name)
    }

    pub fn admits_machine(&self, machine: &Machine) -> bool {
        name_contains(&machine.name, &self.query) && self.state.admits(&machine.state)
    }
}

/// Case-insensitive substring test. The query is taken as typed, so
/// surrounding whitespace must appear in the name too.
/// An empty query matches every name.
pub fn name_contains(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Distinct non-empty cities, sorted.
pub fn city_options(fixture: &Fixture) -> Vec<String> {
    fixture
        .sites
        .iter()
        .filter_map(Site::city)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct department names among the sites of `city`, sorted.
/// Never offers a department that the city filter would hide.
pub fn department_options(fixture: &Fixture, city: &Choice<String>) -> Vec<String> {
    let scope = FilterState {
        city: city.clone(),
        ..FilterState::default()
    };
    fixture
        .sites
        .iter()
        .filter(|site| scope.admits_site(site))
        .flat_map(|site| site.departments.iter().map(|d| d.name.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentView<'a> {
    pub department: &'a Department,
    pub machines:   Vec<&'a Machine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteView<'a> {
    pub site:        &'a Site,
    pub departments: Vec<DepartmentView<'a>>,
}

impl SiteView<'_> {
    pub fn machine_count(&self) -> usize {
        self.departments.iter().map(|d| d.machines.len()).sum()
    }
}

/// The site → department → machine tree after every filter.
///
/// While a machine-level filter is active, departments left without a
/// matching machine are dropped, and so are sites left without a
/// department.
pub fn filter_tree<'a>(fixture: &'a Fixture, filter: &FilterState) -> Vec<SiteView<'a>> {
    let prune = filter.narrows_machines();
    fixture
        .sites
        .iter()
        .filter(|site| filter.admits_site(site))
        .filter_map(|site| {
            let departments: Vec<DepartmentView<'a>> = site
                .departments
                .iter()
                .filter(|d| filter.admits_department(d))
                .map(|department| DepartmentView {
                    department,
                    machines: department
                        .machines
                        .iter()
                        .filter(|m| filter.admits_machine(m))
                        .collect(),
                })
                .filter(|view| !prune || !view.machines.is_empty())
                .collect();
            if prune && departments.is_empty() {
                None
            } else {
                Some(SiteView { site, departments })
            }
        })
        .collect()
}

/// Flattened machines that pass the filter, in fixture order.
pub fn filtered_machines<'a>(fixture: &'a Fixture, filter: &FilterState) -> Vec<&'a Machine> {
    filter_tree(fixture, filter)
        .into_iter()
        .flat_map(|site| site.departments)
        .flat_map(|dept| dept.machines)
        .collect()
}
