//! Storage-agnostic records for section offerings, schedules and faculty loads.

pub mod academic;
pub mod load;
pub mod schedule;
