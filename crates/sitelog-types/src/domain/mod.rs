pub mod log;
pub mod project;

pub use log::*;
pub use project::*;
