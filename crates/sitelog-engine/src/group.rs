use sitelog_types::{LogEntry, Project};
use std::collections::BTreeMap;

/// Display label for entries whose project no longer resolves. A dangling
/// `project_id` cannot happen through the guarded delete flow, but records
/// edited out-of-band still render instead of failing.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Group log entries by their project's display name.
///
/// Accepts any iterator of entry references, so both full collections and
/// filtered views group without copying first. Within each group entries are
/// ordered ascending by `(date, time)`; the BTreeMap hands the consumer
/// group keys in ascending lexicographic order.
pub fn group_by_project_name<'a, I>(logs: I, projects: &[Project]) -> BTreeMap<String, Vec<LogEntry>>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut groups: BTreeMap<String, Vec<LogEntry>> = BTreeMap::new();

    for log in logs {
        let name = projects
            .iter()
            .find(|p| p.id == log.project_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_PROJECT.to_string());
        groups.entry(name).or_default().push(log.clone());
    }

    for entries in groups.values_mut() {
        entries.sort_by(|a, b| a.chrono_key().cmp(&b.chrono_key()));
    }

    groups
}
