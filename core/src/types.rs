//! Shared primitive types used across the dashboard core.

/// Identifier of a machine. Unique across the whole fixture.
pub type MachineId = i64;

/// Identifier of a department, unique within the fixture.
pub type DepartmentId = i64;

/// Identifier of a site.
pub type SiteId = i64;

/// Whole days since the Unix epoch (UTC). One bucket = one calendar day.
pub type DayBucket = i64;

/// An integer percentage, always in 0..=100.
pub type Percent = u8;

/// Sentinel rendered for any optional field the fixture leaves out.
pub const NOT_AVAILABLE: &str = "N/A";
