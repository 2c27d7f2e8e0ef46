use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque project identifier, assigned at creation and immutable afterwards.
///
/// Stored as a plain string so that records written by earlier versions of
/// the tool (which used wall-clock derived ids) keep loading unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a ProjectId from an existing string (typically read back from storage)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh collision-resistant identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is the empty string (unselected in UI terms)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A tracked construction job with descriptive metadata.
///
/// Field names are camelCase on the wire; `shortname` and `notes` default to
/// empty so records predating those fields load without migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    /// Set on first update, absent until then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Combined "name - location" label used by pickers
    pub fn display_label(&self) -> String {
        if self.location.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.location)
        }
    }
}

/// Input fields for creating or updating a project. The store trims every
/// field; only `name` is required.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub shortname: String,
    pub location: String,
    pub description: String,
    pub notes: String,
}

impl ProjectDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Per-project counters derived from the log collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total_logs: usize,
    pub follow_ups: usize,
}
