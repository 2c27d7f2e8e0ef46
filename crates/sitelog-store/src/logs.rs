use crate::persist::{KeyValueStore, load_collection, save_collection};
use crate::projects::ProjectStore;
use crate::{Error, Result};
use chrono::{NaiveDate, Utc};
use sitelog_types::{LogDraft, LogEntry, LogId, ProjectId};
use std::sync::Arc;

/// Well-known storage key for the log collection
pub const STORAGE_KEY: &str = "construction_logs";

/// Owns the contact-log collection: create/delete/list/filter.
///
/// Entries are immutable once created; the referential check at creation
/// takes the [`ProjectStore`] as an explicit argument.
pub struct LogStore {
    storage: Arc<dyn KeyValueStore>,
    logs: Vec<LogEntry>,
}

impl LogStore {
    /// Load the collection from storage; an absent key yields an empty store.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let logs = load_collection(storage.as_ref(), STORAGE_KEY)?;
        Ok(Self { storage, logs })
    }

    /// Create a log entry. Project id, time and description are required;
    /// the project must exist. `follow_up_date` is dropped unless
    /// `follow_up` is set. The entry is stamped with today's date and the
    /// creation instant; nothing is stored when validation fails.
    pub fn create(&mut self, draft: LogDraft, projects: &ProjectStore) -> Result<LogEntry> {
        if draft.project_id.is_empty() {
            return Err(Error::Validation {
                field: "projectId",
                message: "a project must be selected".to_string(),
            });
        }
        let time = draft.time.trim().to_string();
        if time.is_empty() {
            return Err(Error::Validation {
                field: "time",
                message: "time is required".to_string(),
            });
        }
        let description = draft.description.trim().to_string();
        if description.is_empty() {
            return Err(Error::Validation {
                field: "description",
                message: "description is required".to_string(),
            });
        }
        if projects.get(&draft.project_id).is_none() {
            return Err(Error::NotFound(format!("project {}", draft.project_id)));
        }

        let now = Utc::now();
        let entry = LogEntry {
            id: LogId::generate(),
            project_id: draft.project_id,
            date: now.date_naive(),
            time,
            contact_type: draft.contact_type,
            contact_person: draft.contact_person.trim().to_string(),
            description,
            priority: draft.priority,
            follow_up: draft.follow_up,
            follow_up_date: if draft.follow_up {
                draft.follow_up_date
            } else {
                None
            },
            created_at: now,
        };

        self.logs.push(entry.clone());
        self.persist()?;
        Ok(entry)
    }

    /// Remove an entry if present; reports whether anything was removed
    pub fn delete(&mut self, id: &LogId) -> Result<bool> {
        let before = self.logs.len();
        self.logs.retain(|log| &log.id != id);
        let removed = self.logs.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Current collection in insertion order
    pub fn list(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Entries whose log date matches exactly
    pub fn list_for_date(&self, date: NaiveDate) -> Vec<&LogEntry> {
        self.logs.iter().filter(|log| log.date == date).collect()
    }

    /// Entries recorded today (the default view)
    pub fn list_today(&self) -> Vec<&LogEntry> {
        self.list_for_date(Utc::now().date_naive())
    }

    /// Filter by project and/or date; both axes optional, AND semantics
    pub fn filter(
        &self,
        project_id: Option<&ProjectId>,
        date: Option<NaiveDate>,
    ) -> Vec<&LogEntry> {
        self.logs
            .iter()
            .filter(|log| project_id.is_none_or(|id| &log.project_id == id))
            .filter(|log| date.is_none_or(|d| log.date == d))
            .collect()
    }

    /// Number of entries referencing a project (the delete guard input)
    pub fn count_for_project(&self, id: &ProjectId) -> usize {
        self.logs.iter().filter(|log| &log.project_id == id).count()
    }

    /// Number of entries for a project flagged for follow-up
    pub fn follow_up_count_for_project(&self, id: &ProjectId) -> usize {
        self.logs
            .iter()
            .filter(|log| &log.project_id == id && log.follow_up)
            .count()
    }

    /// Wipe the whole collection and persist the empty snapshot
    pub fn clear(&mut self) -> Result<()> {
        self.logs.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        save_collection(self.storage.as_ref(), STORAGE_KEY, &self.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use sitelog_types::{ContactType, Priority, ProjectDraft};

    fn open_stores() -> (ProjectStore, LogStore) {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let projects = ProjectStore::open(storage.clone()).unwrap();
        let logs = LogStore::open(storage).unwrap();
        (projects, logs)
    }

    fn draft_for(project_id: &ProjectId) -> LogDraft {
        LogDraft::new(
            project_id.clone(),
            "09:30",
            ContactType::Phone,
            "Discussed delay",
        )
    }

    #[test]
    fn test_create_stamps_today_and_unique_ids() {
        let (mut projects, mut logs) = open_stores();
        let project = projects.create(ProjectDraft::named("Lakeview")).unwrap();

        let a = logs.create(draft_for(&project.id), &projects).unwrap();
        let b = logs.create(draft_for(&project.id), &projects).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.date, Utc::now().date_naive());
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn test_create_requires_fields() {
        let (mut projects, mut logs) = open_stores();
        let project = projects.create(ProjectDraft::named("Lakeview")).unwrap();

        let mut missing_project = draft_for(&project.id);
        missing_project.project_id = ProjectId::new("");
        let err = logs.create(missing_project, &projects).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "projectId",
                ..
            }
        ));

        let mut blank_time = draft_for(&project.id);
        blank_time.time = "  ".to_string();
        let err = logs.create(blank_time, &projects).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "time", .. }));

        let mut blank_description = draft_for(&project.id);
        blank_description.description = String::new();
        let err = logs.create(blank_description, &projects).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "description",
                ..
            }
        ));

        // Nothing partial was stored
        assert!(logs.is_empty());
    }

    #[test]
    fn test_create_rejects_unknown_project() {
        let (projects, mut logs) = open_stores();
        let err = logs
            .create(draft_for(&ProjectId::new("ghost")), &projects)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_follow_up_date_forced_to_none() {
        let (mut projects, mut logs) = open_stores();
        let project = projects.create(ProjectDraft::named("Lakeview")).unwrap();

        let mut draft = draft_for(&project.id);
        draft.follow_up = false;
        draft.follow_up_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let entry = logs.create(draft, &projects).unwrap();
        assert_eq!(entry.follow_up_date, None);

        let mut draft = draft_for(&project.id);
        draft.follow_up = true;
        draft.follow_up_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let entry = logs.create(draft, &projects).unwrap();
        assert_eq!(entry.follow_up_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn test_delete_reports_removal() {
        let (mut projects, mut logs) = open_stores();
        let project = projects.create(ProjectDraft::named("Lakeview")).unwrap();
        let entry = logs.create(draft_for(&project.id), &projects).unwrap();

        assert!(logs.delete(&entry.id).unwrap());
        assert!(!logs.delete(&entry.id).unwrap());
        assert!(logs.is_empty());
    }

    #[test]
    fn test_filter_axes_combine_with_and() {
        let (mut projects, mut logs) = open_stores();
        let a = projects.create(ProjectDraft::named("A")).unwrap();
        let b = projects.create(ProjectDraft::named("B")).unwrap();
        logs.create(draft_for(&a.id), &projects).unwrap();
        logs.create(draft_for(&a.id), &projects).unwrap();
        logs.create(draft_for(&b.id), &projects).unwrap();

        let today = Utc::now().date_naive();
        assert_eq!(logs.filter(None, None).len(), 3);
        assert_eq!(logs.filter(Some(&a.id), None).len(), 2);
        assert_eq!(logs.filter(None, Some(today)).len(), 3);
        assert_eq!(logs.filter(Some(&b.id), Some(today)).len(), 1);
        assert!(
            logs.filter(Some(&b.id), NaiveDate::from_ymd_opt(2001, 1, 1))
                .is_empty()
        );
    }

    #[test]
    fn test_list_today_matches_list_for_date() {
        let (mut projects, mut logs) = open_stores();
        let project = projects.create(ProjectDraft::named("Lakeview")).unwrap();
        logs.create(draft_for(&project.id), &projects).unwrap();

        let today = Utc::now().date_naive();
        assert_eq!(logs.list_today().len(), logs.list_for_date(today).len());
        assert!(logs.list_for_date(today + chrono::Days::new(1)).is_empty());
    }

    #[test]
    fn test_project_delete_guard_and_stats() {
        let (mut projects, mut logs) = open_stores();
        let project = projects.create(ProjectDraft::named("Lakeview")).unwrap();

        let mut draft = draft_for(&project.id);
        draft.priority = Priority::High;
        draft.follow_up = true;
        draft.follow_up_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let entry = logs.create(draft, &projects).unwrap();

        let err = projects.delete(&project.id, &logs).unwrap_err();
        assert!(matches!(err, Error::Blocked { log_count: 1 }));
        assert_eq!(projects.len(), 1);

        let stats = projects.stats(&project.id, &logs);
        assert_eq!(stats.total_logs, 1);
        assert_eq!(stats.follow_ups, 1);

        assert!(logs.delete(&entry.id).unwrap());
        projects.delete(&project.id, &logs).unwrap();
        assert!(projects.is_empty());
    }
}
