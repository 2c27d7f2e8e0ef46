// Engine module - pure query and export logic over domain types.
// This layer sits between the stores and whatever renders their results;
// it never touches storage itself.

pub mod export;
mod group;

pub use group::{UNKNOWN_PROJECT, group_by_project_name};
