//! Destination layout planning: one folder per artist, filenames that
//! sort by album and track on devices that list files by name.

mod plan;

pub use plan::{PlannedEntry, plan_group, plan_layout};
