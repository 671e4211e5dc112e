//! Small synthetic fixtures shared by the integration tests.
#![allow(dead_code)]

use neofactory_core::{
    clock::FixedClock, config::MetricsConfig, Dashboard, Department, Fixture, Machine,
    MachineState, Site,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn machine(id: i64, name: &str, state: MachineState) -> Machine {
    Machine::new(id, name, state)
}

pub fn department(id: i64, name: &str, machines: Vec<Machine>) -> Department {
    Department { id, name: name.into(), machines }
}

pub fn site(id: i64, name: &str, location: &str, departments: Vec<Department>) -> Site {
    Site { id, name: name.into(), location: location.into(), departments }
}

/// Two Montréal sites, one Toronto site, one site without a city.
pub fn plant_fixture() -> Fixture {
    use MachineState::*;
    Fixture::new(vec![
        site(1, "Usine Est", "Montreal, QC", vec![
            department(11, "Assemblage", vec![
                machine(101, "Press-10", Active),
                machine(102, "Robot soudeur", UnderMaintenance),
            ]),
            department(12, "Usinage", vec![
                machine(103, "CNC-Press", Active),
                machine(104, "Tour T-3", OutOfService),
            ]),
        ]),
        site(2, "Usine Ouest", "Montreal, QC", vec![
            department(21, "Emballage", vec![machine(201, "Press-2", Active)]),
        ]),
        site(3, "Toronto Works", "Toronto, ON", vec![
            department(31, "Peinture", vec![machine(301, "Spray Booth", Active)]),
            department(32, "Assemblage", vec![]),
        ]),
        site(4, "Entrepôt", " , nowhere", vec![]),
    ])
    .expect("valid fixture")
}

pub fn dashboard_on_day(fixture: Fixture, day: i64) -> Dashboard {
    Dashboard::new(fixture, MetricsConfig::default(), Box::new(FixedClock::on_day(day)))
}
