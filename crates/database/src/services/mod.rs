pub mod faculty_load;
#[cfg(test)]
mod fixtures;
pub mod preload;
pub mod section_offering;

pub use faculty_load::{FacultyLoadService, LoadSummary, OfferingLink};
pub use section_offering::SectionOfferingService;
