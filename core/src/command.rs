use crate::{
    engine::Dashboard,
    error::DashResult,
    filter::{Choice, FilterState, SiteView},
    fixture::MachineState,
    metrics::MetricsEngine,
    navigation::{SectionKey, ViewState},
    search::Suggestion,
    types::{DayBucket, DepartmentId, MachineId, Percent, SiteId},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Every query a rendering layer can send.
/// Variants are added over time. Never remove or rename one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashQuery {
    // ── Overview ──────────────────────────────────
    Totals,
    Cities,
    Departments {
        #[serde(default)]
        city: Choice<String>,
    },

    // ── Tree and search ───────────────────────────
    /// Without an explicit filter, the session's own filter is used.
    Tree {
        #[serde(default)]
        filter: Option<FilterState>,
    },
    Suggest {
        query: String,
    },
    Navigate {
        suggestion: Suggestion,
    },
    /// Sent by the host once the navigation delay has elapsed.
    Highlight,

    // ── Session state writers ─────────────────────
    SetQuery {
        query: String,
    },
    SetState {
        state: Choice<MachineState>,
    },
    SetCity {
        city: Choice<String>,
    },
    SetDepartment {
        department: Choice<String>,
    },
    ToggleSection {
        section: SectionKey,
    },

    // ── Machine detail ────────────────────────────
    Details {
        id: MachineId,
    },
    Metrics {
        id: MachineId,
        #[serde(default)]
        day: Option<DayBucket>,
    },
    Snapshot {
        #[serde(default)]
        day: Option<DayBucket>,
    },
}

/// One machine row in the rendered tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeMachine {
    pub id:          MachineId,
    pub name:        String,
    pub state:       String,
    pub performance: Percent,
    pub uptime:      Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDepartment {
    pub id:       DepartmentId,
    pub name:     String,
    pub machines: Vec<TreeMachine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSite {
    pub id:          SiteId,
    pub name:        String,
    pub location:    String,
    pub departments: Vec<TreeDepartment>,
}

impl TreeSite {
    pub fn from_view(view: &SiteView<'_>, engine: &MetricsEngine<'_>) -> Self {
        Self {
            id:       view.site.id,
            name:     view.site.name.clone(),
            location: view.site.location.clone(),
            departments: view
                .departments
                .iter()
                .map(|d| TreeDepartment {
                    id:   d.department.id,
                    name: d.department.name.clone(),
                    machines: d
                        .machines
                        .iter()
                        .map(|m| TreeMachine {
                            id:          m.id,
                            name:        m.name.clone(),
                            state:       m.state.label().to_string(),
                            performance: engine.performance(m),
                            uptime:      engine.uptime(m),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl Dashboard {
    /// Answer one query as JSON. `view` is the caller's session state;
    /// the `Set*`, `ToggleSection`, `Navigate` and `Highlight` queries
    /// write to it.
    pub fn answer(&self, query: DashQuery, view: &mut ViewState) -> DashResult<Value> {
        let value = match query {
            DashQuery::Totals => serde_json::to_value(self.totals())?,
            DashQuery::Cities => serde_json::to_value(self.city_options())?,
            DashQuery::Departments { city } => {
                serde_json::to_value(self.department_options(&city))?
            }
            DashQuery::Tree { filter } => {
                let engine = self.metrics_engine();
                let filter = filter.unwrap_or_else(|| view.filter().clone());
                let tree: Vec<TreeSite> = self
                    .filter_tree(&filter)
                    .iter()
                    .map(|site| TreeSite::from_view(site, &engine))
                    .collect();
                serde_json::to_value(tree)?
            }
            DashQuery::Suggest { query } => serde_json::to_value(self.suggestions(&query))?,
            DashQuery::Navigate { suggestion } => {
                let plan = view.navigate_to(&suggestion, self.config().highlight_delay_ms);
                serde_json::to_value(plan)?
            }
            DashQuery::SetQuery { query } => {
                view.set_query(query);
                serde_json::to_value(&*view)?
            }
            DashQuery::SetState { state } => {
                view.set_state_filter(state);
                serde_json::to_value(&*view)?
            }
            DashQuery::SetCity { city } => {
                view.set_city(self.fixture(), city);
                serde_json::to_value(&*view)?
            }
            DashQuery::SetDepartment { department } => {
                view.set_department(self.fixture(), department);
                serde_json::to_value(&*view)?
            }
            DashQuery::ToggleSection { section } => {
                view.toggle_section(section);
                serde_json::to_value(&*view)?
            }
            DashQuery::Highlight => {
                json!({ "highlighted": view.complete_highlight(self.fixture()) })
            }
            DashQuery::Details { id } => serde_json::to_value(self.details(id))?,
            DashQuery::Metrics { id, day } => {
                let day = day.unwrap_or_else(|| self.today());
                match self.fixture().find_machine(id) {
                    Some(entry) => {
                        let metrics = self.metrics_engine_for(day).machine_metrics(entry.machine);
                        serde_json::to_value(metrics)?
                    }
                    None => json!({ "machine_id": id, "found": false }),
                }
            }
            DashQuery::Snapshot { day } => {
                let day = day.unwrap_or_else(|| self.today());
                serde_json::to_value(self.snapshot_for(day))?
            }
        };
        Ok(value)
    }
}
