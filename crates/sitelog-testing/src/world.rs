//! TestWorld pattern for declarative integration test setup.
//!
//! Provides an isolated on-disk data directory with both stores opened over
//! it, plus helpers for seeding data and reopening the stores to prove
//! durability.

use anyhow::Result;
use sitelog_store::{JsonFileStore, KeyValueStore, LogStore, ProjectStore};
use sitelog_types::{LogEntry, Project, ProjectDraft};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Isolated store pair over a temp data directory.
///
/// # Example
/// ```no_run
/// use sitelog_testing::TestWorld;
///
/// let mut world = TestWorld::new().unwrap();
/// let project = world.add_project("Lakeview Tower").unwrap();
/// world.add_log(&project, "09:30", "Discussed delay").unwrap();
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    storage: Arc<dyn KeyValueStore>,
    pub projects: ProjectStore,
    pub logs: LogStore,
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(JsonFileStore::new(temp_dir.path().join("data")));
        let projects = ProjectStore::open(storage.clone())?;
        let logs = LogStore::open(storage.clone())?;

        Ok(Self {
            temp_dir,
            storage,
            projects,
            logs,
        })
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a project with the given name.
    pub fn add_project(&mut self, name: &str) -> Result<Project> {
        Ok(self.projects.create(ProjectDraft::named(name))?)
    }

    /// Create a log entry against a project.
    pub fn add_log(&mut self, project: &Project, time: &str, description: &str) -> Result<LogEntry> {
        let mut draft = crate::fixtures::log_draft(&project.id);
        draft.time = time.to_string();
        draft.description = description.to_string();
        Ok(self.logs.create(draft, &self.projects)?)
    }

    /// Drop the in-memory stores and reload both collections from disk.
    pub fn reopen(&mut self) -> Result<()> {
        self.projects = ProjectStore::open(self.storage.clone())?;
        self.logs = LogStore::open(self.storage.clone())?;
        Ok(())
    }
}
