use crate::logs::LogStore;
use crate::persist::{KeyValueStore, load_collection, save_collection};
use crate::{Error, Result};
use chrono::Utc;
use sitelog_types::{Project, ProjectDraft, ProjectId, ProjectStats};
use std::sync::Arc;

/// Well-known storage key for the project collection
pub const STORAGE_KEY: &str = "construction_projects";

/// Owns the project collection: create/update/delete/list/search.
///
/// The collection is fully materialized at open and written back as a
/// complete snapshot on every mutation. Cross-store checks (delete guard,
/// per-project stats) take the [`LogStore`] as an explicit argument.
pub struct ProjectStore {
    storage: Arc<dyn KeyValueStore>,
    projects: Vec<Project>,
}

impl ProjectStore {
    /// Load the collection from storage; an absent key yields an empty store.
    /// Records missing optional fields are defaulted on load (additive
    /// schema evolution only).
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let projects = load_collection(storage.as_ref(), STORAGE_KEY)?;
        Ok(Self { storage, projects })
    }

    /// Create a project from a draft. All string fields are trimmed; the
    /// name must be non-empty after trimming.
    pub fn create(&mut self, draft: ProjectDraft) -> Result<Project> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name",
                message: "project name is required".to_string(),
            });
        }

        let project = Project {
            id: ProjectId::generate(),
            name,
            shortname: draft.shortname.trim().to_string(),
            location: draft.location.trim().to_string(),
            description: draft.description.trim().to_string(),
            notes: draft.notes.trim().to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        self.projects.push(project.clone());
        self.persist()?;
        Ok(project)
    }

    /// Create a project from a bare name (the picker "create new" path)
    pub fn quick_create(&mut self, name: &str) -> Result<Project> {
        self.create(ProjectDraft::named(name))
    }

    /// Replace the mutable fields of an existing project and stamp
    /// `updated_at`. Id and `created_at` are immutable.
    pub fn update(&mut self, id: &ProjectId, draft: ProjectDraft) -> Result<()> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name",
                message: "project name is required".to_string(),
            });
        }

        let project = self
            .projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::NotFound(format!("project {}", id)))?;

        project.name = name;
        project.shortname = draft.shortname.trim().to_string();
        project.location = draft.location.trim().to_string();
        project.description = draft.description.trim().to_string();
        project.notes = draft.notes.trim().to_string();
        project.updated_at = Some(Utc::now());

        self.persist()
    }

    /// Delete a project. Refused with [`Error::Blocked`] while any log entry
    /// still references it; the collection is left untouched in that case.
    pub fn delete(&mut self, id: &ProjectId, logs: &LogStore) -> Result<()> {
        let log_count = logs.count_for_project(id);
        if log_count > 0 {
            return Err(Error::Blocked { log_count });
        }

        let before = self.projects.len();
        self.projects.retain(|p| &p.id != id);
        if self.projects.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Current collection in insertion order
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Project name for an id, if the project still exists
    pub fn name_of(&self, id: &ProjectId) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    /// Case-insensitive substring search over name, shortname, location,
    /// description and notes. A blank term returns the full list.
    pub fn search(&self, term: &str) -> Vec<&Project> {
        if term.trim().is_empty() {
            return self.projects.iter().collect();
        }

        let term = term.to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.shortname.to_lowercase().contains(&term)
                    || p.location.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
                    || p.notes.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Picker variant: matches against the combined "name location" text
    pub fn search_picker(&self, term: &str) -> Vec<&Project> {
        if term.trim().is_empty() {
            return self.projects.iter().collect();
        }

        let term = term.to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                format!("{} {}", p.name, p.location)
                    .to_lowercase()
                    .contains(&term)
            })
            .collect()
    }

    /// Log counters for one project, derived from the log collection
    pub fn stats(&self, id: &ProjectId, logs: &LogStore) -> ProjectStats {
        ProjectStats {
            total_logs: logs.count_for_project(id),
            follow_ups: logs.follow_up_count_for_project(id),
        }
    }

    /// Wipe the whole collection and persist the empty snapshot
    pub fn clear(&mut self) -> Result<()> {
        self.projects.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        save_collection(self.storage.as_ref(), STORAGE_KEY, &self.projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;

    fn open_store() -> ProjectStore {
        ProjectStore::open(Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_create_trims_and_assigns_unique_ids() {
        let mut store = open_store();

        let a = store
            .create(ProjectDraft {
                name: "  Lakeview Tower  ".to_string(),
                shortname: " LVT ".to_string(),
                location: String::new(),
                description: String::new(),
                notes: String::new(),
            })
            .unwrap();
        let b = store.create(ProjectDraft::named("Harbor Bridge")).unwrap();

        assert_eq!(a.name, "Lakeview Tower");
        assert_eq!(a.shortname, "LVT");
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut store = open_store();
        let err = store.create(ProjectDraft::named("   ")).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name", .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_sets_updated_at() {
        let mut store = open_store();
        let project = store.create(ProjectDraft::named("Depot")).unwrap();
        assert!(project.updated_at.is_none());

        store
            .update(
                &project.id,
                ProjectDraft {
                    name: "Depot North".to_string(),
                    ..ProjectDraft::default()
                },
            )
            .unwrap();

        let updated = store.get(&project.id).unwrap();
        assert_eq!(updated.name, "Depot North");
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.created_at, project.created_at);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = open_store();
        let err = store
            .update(&ProjectId::new("missing"), ProjectDraft::named("X"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_search_blank_term_returns_all() {
        let mut store = open_store();
        store.create(ProjectDraft::named("Alpha")).unwrap();
        store.create(ProjectDraft::named("Beta")).unwrap();

        assert_eq!(store.search("").len(), 2);
        assert_eq!(store.search("   ").len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut store = open_store();
        store
            .create(ProjectDraft {
                name: "Lakeview Tower".to_string(),
                shortname: "LVT".to_string(),
                location: "Pier 4".to_string(),
                description: "38-storey build".to_string(),
                notes: "night shifts only".to_string(),
            })
            .unwrap();
        store.create(ProjectDraft::named("Depot")).unwrap();

        assert_eq!(store.search("lakeview").len(), 1);
        assert_eq!(store.search("lvt").len(), 1);
        assert_eq!(store.search("PIER").len(), 1);
        assert_eq!(store.search("storey").len(), 1);
        assert_eq!(store.search("NIGHT").len(), 1);
        assert!(store.search("bridge").is_empty());
    }

    #[test]
    fn test_search_picker_matches_name_location_text() {
        let mut store = open_store();
        store
            .create(ProjectDraft {
                name: "Harbor Bridge".to_string(),
                location: "North Bank".to_string(),
                ..ProjectDraft::default()
            })
            .unwrap();

        assert_eq!(store.search_picker("bridge north").len(), 1);
        assert_eq!(store.search_picker("BANK").len(), 1);
        assert_eq!(store.search_picker("harbor").len(), 1);
        assert!(store.search_picker("south").is_empty());
    }

    #[test]
    fn test_quick_create_behaves_like_full_create() {
        let mut store = open_store();
        let project = store.quick_create("Ring Road").unwrap();
        assert_eq!(project.name, "Ring Road");
        assert_eq!(project.shortname, "");
        assert_eq!(store.search("ring").len(), 1);
    }
}
