//! NeoFactory dashboard core.
//!
//! Deterministic synthetic metrics over a static site → department →
//! machine fixture, plus the pure filtering, search and navigation
//! helpers the dashboard views are built on.

pub mod clock;
pub mod command;
pub mod config;
pub mod details;
pub mod engine;
pub mod error;
pub mod filter;
pub mod fixture;
pub mod metrics;
pub mod navigation;
pub mod policy;
pub mod rng;
pub mod search;
pub mod seed;
pub mod series;
pub mod snapshot;
pub mod types;

pub use engine::Dashboard;
pub use error::{DashError, DashResult};
pub use fixture::{Department, Fixture, Machine, MachineState, Site};
