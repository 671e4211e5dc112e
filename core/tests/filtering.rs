//! Totals, city/department options and the filtered tree.

mod common;

use common::{dashboard_on_day, plant_fixture};
use neofactory_core::{
    filter::{
        city_options, department_options, filter_tree, filtered_machines, name_contains, totals,
        Choice, FilterState, Totals,
    },
    navigation::ViewState,
    MachineState,
};

#[test]
fn totals_count_every_level() {
    let fixture = plant_fixture();
    assert_eq!(totals(&fixture), Totals { sites: 4, departments: 5, machines: 6 });
}

#[test]
fn totals_follow_the_fixture() {
    let mut fixture = plant_fixture();
    fixture.sites.truncate(1);
    assert_eq!(totals(&fixture), Totals { sites: 1, departments: 2, machines: 4 });
}

#[test]
fn city_options_are_distinct_and_skip_blank_locations() {
    let fixture = plant_fixture();
    assert_eq!(city_options(&fixture), vec!["Montreal".to_string(), "Toronto".to_string()]);
}

#[test]
fn department_options_are_scoped_to_the_city() {
    let fixture = plant_fixture();
    let montreal = department_options(&fixture, &Choice::Only("Montreal".into()));
    assert_eq!(montreal, vec!["Assemblage", "Emballage", "Usinage"]);

    let toronto = department_options(&fixture, &Choice::Only("Toronto".into()));
    assert_eq!(toronto, vec!["Assemblage", "Peinture"]);

    let all = department_options(&fixture, &Choice::All);
    assert_eq!(all, vec!["Assemblage", "Emballage", "Peinture", "Usinage"]);
}

#[test]
fn department_options_never_leak_other_cities() {
    let fixture = plant_fixture();
    for city in city_options(&fixture) {
        let choice = Choice::Only(city.clone());
        let filter = FilterState { city: choice.clone(), ..FilterState::default() };
        let visible: Vec<String> = filter_tree(&fixture, &filter)
            .iter()
            .flat_map(|s| s.departments.iter().map(|d| d.department.name.clone()))
            .collect();
        for option in department_options(&fixture, &choice) {
            assert!(visible.contains(&option), "{option} offered for {city} but not shown");
        }
    }
}

#[test]
fn changing_city_resets_a_department_it_does_not_offer() {
    let fixture = plant_fixture();
    let mut view = ViewState::new();

    view.set_city(&fixture, Choice::Only("Toronto".into()));
    view.set_department(&fixture, Choice::Only("Peinture".into()));
    assert_eq!(view.filter().department, Choice::Only("Peinture".into()));

    view.set_city(&fixture, Choice::Only("Montreal".into()));
    assert_eq!(view.filter().department, Choice::All);
}

#[test]
fn changing_city_keeps_a_department_it_still_offers() {
    let fixture = plant_fixture();
    let mut view = ViewState::new();

    view.set_department(&fixture, Choice::Only("Assemblage".into()));
    view.set_city(&fixture, Choice::Only("Toronto".into()));
    assert_eq!(view.filter().department, Choice::Only("Assemblage".into()));
}

#[test]
fn unoffered_department_selection_is_ignored() {
    let fixture = plant_fixture();
    let mut view = ViewState::new();
    view.set_city(&fixture, Choice::Only("Montreal".into()));
    view.set_department(&fixture, Choice::Only("Peinture".into()));
    assert_eq!(view.filter().department, Choice::All);
}

#[test]
fn query_and_state_filters_combine() {
    let fixture = plant_fixture();
    let filter = FilterState {
        query: "PRESS".into(),
        state: Choice::Only(MachineState::Active),
        ..FilterState::default()
    };
    let matched = filtered_machines(&fixture, &filter);
    let names: Vec<&str> = matched.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Press-10", "CNC-Press", "Press-2"]);

    let stopped = FilterState {
        state: Choice::Only(MachineState::OutOfService),
        ..FilterState::default()
    };
    let matched = filtered_machines(&fixture, &stopped);
    let names: Vec<&str> = matched.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Tour T-3"]);
}

#[test]
fn narrowing_filters_prune_empty_branches() {
    let fixture = plant_fixture();
    let filter = FilterState { query: "spray".into(), ..FilterState::default() };
    let tree = filter_tree(&fixture, &filter);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].site.id, 3);
    assert_eq!(tree[0].departments.len(), 1);
    assert_eq!(tree[0].machine_count(), 1);
}

#[test]
fn unfiltered_tree_shows_empty_branches() {
    let fixture = plant_fixture();
    let tree = filter_tree(&fixture, &FilterState::default());
    assert_eq!(tree.len(), 4);
    let toronto = tree.iter().find(|s| s.site.id == 3).unwrap();
    assert_eq!(toronto.departments.len(), 2);
}

#[test]
fn city_filter_keeps_only_matching_sites() {
    let fixture = plant_fixture();
    let filter = FilterState { city: Choice::Only("Montreal".into()), ..FilterState::default() };
    let ids: Vec<i64> = filter_tree(&fixture, &filter).iter().map(|s| s.site.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn stale_department_filter_yields_empty_tree() {
    let fixture = plant_fixture();
    let filter = FilterState {
        city: Choice::Only("Montreal".into()),
        department: Choice::Only("Peinture".into()),
        ..FilterState::default()
    };
    assert!(filter_tree(&fixture, &filter).is_empty());
}

#[test]
fn name_matching_is_case_insensitive_substring() {
    assert!(name_contains("CNC-Press", "press"));
    assert!(name_contains("CNC-Press", ""));
    assert!(!name_contains("CNC-Press", "lathe"));
}

#[test]
fn dashboard_exposes_the_same_answers() {
    let dashboard = dashboard_on_day(plant_fixture(), 19_000);
    assert_eq!(dashboard.totals(), totals(dashboard.fixture()));
    assert_eq!(dashboard.city_options(), vec!["Montreal", "Toronto"]);
    assert_eq!(
        dashboard.department_options(&Choice::Only("Toronto".into())),
        vec!["Assemblage", "Peinture"]
    );
}

#[test]
fn tree_query_is_matched_as_typed() {
    let fixture = plant_fixture();
    let trailing = FilterState { query: "press ".into(), ..FilterState::default() };
    assert!(filtered_machines(&fixture, &trailing).is_empty());
    assert!(filter_tree(&fixture, &trailing).is_empty());
    assert!(!name_contains("CNC-Press", "press "));

    let blank = FilterState { query: "  ".into(), ..FilterState::default() };
    assert!(blank.narrows_machines());
    assert!(filtered_machines(&fixture, &blank).is_empty());
}
