//! Deterministic domain-value builders.
//!
//! Stores stamp entities with the current wall clock; tests that need
//! stable output (snapshots, CSV comparisons) build values through these
//! fixed-timestamp constructors instead.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sitelog_types::{ContactType, LogDraft, LogEntry, LogId, Priority, Project, ProjectId};

/// Timestamp all fixtures are created at
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap()
}

/// Project literal with a known id and name, everything else empty
pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: ProjectId::new(id),
        name: name.to_string(),
        shortname: String::new(),
        location: String::new(),
        description: String::new(),
        notes: String::new(),
        created_at: fixed_instant(),
        updated_at: None,
    }
}

/// Log entry literal with explicit id, project, date and time
pub fn log_entry(id: &str, project_id: &str, ymd: (i32, u32, u32), time: &str) -> LogEntry {
    LogEntry {
        id: LogId::new(id),
        project_id: ProjectId::new(project_id),
        date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
        time: time.to_string(),
        contact_type: ContactType::Phone,
        contact_person: String::new(),
        description: format!("Entry {}", id),
        priority: Priority::Medium,
        follow_up: false,
        follow_up_date: None,
        created_at: fixed_instant(),
    }
}

/// Minimal valid draft for store-level creation
pub fn log_draft(project_id: &ProjectId) -> LogDraft {
    LogDraft::new(
        project_id.clone(),
        "09:30",
        ContactType::Phone,
        "Discussed delay",
    )
}
