//! Persistent stores for the sitelog core: projects and contact-log entries
//! over a key-value JSON substrate.
//!
//! Everything here is synchronous and single-process. Each mutation is a
//! read-modify-write of the whole in-memory collection followed by a full
//! snapshot save. Multiple independent processes pointed at the same data
//! directory are last-writer-wins; that is a known limitation, not a
//! supported mode.

pub mod error;
pub mod logs;
pub mod path;
pub mod persist;
pub mod projects;

pub use error::{Error, Result};
pub use logs::LogStore;
pub use persist::{JsonFileStore, KeyValueStore, MemoryStore};
pub use projects::ProjectStore;
