//! Search suggestions: prefix matches first, then substring matches.

mod common;

use common::{department, machine, plant_fixture, site};
use neofactory_core::{
    search::{suggestions, MatchKind, DEFAULT_SUGGESTION_LIMIT},
    Fixture, Machine, MachineState,
};

fn single_department(machines: Vec<Machine>) -> Fixture {
    Fixture::new(vec![site(1, "S", "Laval", vec![department(1, "D", machines)])]).unwrap()
}

fn names(fixture: &Fixture, query: &str) -> Vec<String> {
    suggestions(fixture, query, DEFAULT_SUGGESTION_LIMIT)
        .into_iter()
        .map(|s| s.machine_name)
        .collect()
}

#[test]
fn prefix_matches_rank_before_substring_matches() {
    // Fixture order is Press-10, CNC-Press, Press-2.
    let fixture = plant_fixture();
    assert_eq!(names(&fixture, "press"), vec!["Press-10", "Press-2", "CNC-Press"]);
}

#[test]
fn suggestions_carry_navigation_identity() {
    let fixture = plant_fixture();
    let found = suggestions(&fixture, "PRESS-2", DEFAULT_SUGGESTION_LIMIT);
    assert_eq!(found.len(), 1);
    let s = &found[0];
    assert_eq!(s.machine_id, 201);
    assert_eq!(s.site_id, 2);
    assert_eq!(s.department_id, 21);
    assert_eq!(s.match_kind, MatchKind::Prefix);
}

#[test]
fn blank_queries_suggest_nothing() {
    let fixture = plant_fixture();
    assert!(names(&fixture, "").is_empty());
    assert!(names(&fixture, "   ").is_empty());
}

#[test]
fn query_is_trimmed() {
    let fixture = plant_fixture();
    assert_eq!(names(&fixture, "  spray "), vec!["Spray Booth"]);
}

#[test]
fn results_are_capped_at_eight() {
    let machines = (0..12)
        .map(|i| machine(i, &format!("Line {i}"), MachineState::Active))
        .collect();
    let fixture = single_department(machines);

    let found = names(&fixture, "line");
    assert_eq!(found.len(), 8);
    assert_eq!(found.first().map(String::as_str), Some("Line 0"));
    assert_eq!(found.last().map(String::as_str), Some("Line 7"));
}

#[test]
fn cap_applies_after_prefix_partition() {
    let mut machines: Vec<_> = (0..6)
        .map(|i| machine(i, &format!("Old valve {i}"), MachineState::Active))
        .collect();
    machines.extend((10..16).map(|i| machine(i, &format!("Valve {i}"), MachineState::Active)));
    let fixture = single_department(machines);

    let found = suggestions(&fixture, "valve", 8);
    let kinds: Vec<MatchKind> = found.iter().map(|s| s.match_kind).collect();
    assert_eq!(&kinds[..6], &[MatchKind::Prefix; 6]);
    assert_eq!(&kinds[6..], &[MatchKind::Contains; 2]);
    assert_eq!(found[6].machine_name, "Old valve 0");
}

#[test]
fn accented_names_match_case_insensitively() {
    let fixture = Fixture::new(vec![site(1, "S", "Laval", vec![department(1, "D", vec![
        machine(1, "Étiqueteuse", MachineState::Active),
    ])])])
    .unwrap();
    assert_eq!(names(&fixture, "éTIQ"), vec!["Étiqueteuse"]);
}
