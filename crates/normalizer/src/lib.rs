//! Normalization and matching for section offerings and faculty loads.
//!
//! Every function here is a pure transformation over records the caller has
//! already loaded; nothing performs I/O or holds shared state.

pub mod assignment;
pub mod canonical;
pub mod enrichment;
pub mod error;
pub mod matcher;
pub mod precedence;
pub mod schedule;
pub mod section_label;
pub mod selection;

pub use canonical::{Semester, canonical_semester_forms, canonical_year_forms};
pub use enrichment::{EnrichedFacultyLoad, enrich};
pub use matcher::matches;
pub use schedule::{assemble_schedule, collect_rooms};
pub use section_label::format_section_label;
