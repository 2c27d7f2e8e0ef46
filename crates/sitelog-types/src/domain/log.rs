use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::project::ProjectId;

/// Opaque log entry identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(String);

impl LogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh collision-resistant identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for LogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How the contact happened (kebab-case on the wire: "in-person", "site-visit")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactType {
    Phone,
    Email,
    InPerson,
    SiteVisit,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Phone => "phone",
            ContactType::Email => "email",
            ContactType::InPerson => "in-person",
            ContactType::SiteVisit => "site-visit",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(ContactType::Phone),
            "email" => Ok(ContactType::Email),
            "in-person" => Ok(ContactType::InPerson),
            "site-visit" => Ok(ContactType::SiteVisit),
            _ => Err(format!("Unknown contact type: {}", s)),
        }
    }
}

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A single dated contact record attached to a project.
///
/// Immutable once created; the only lifecycle operation after creation is
/// deletion. `follow_up_date` is serialized as an explicit `null` when absent
/// to match the records the original tool wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: LogId,
    pub project_id: ProjectId,
    /// Log date (the day the entry was recorded), ISO `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Time of day, `HH:MM`, stored verbatim as entered
    pub time: String,
    pub contact_type: ContactType,
    #[serde(default)]
    pub contact_person: String,
    pub description: String,
    pub priority: Priority,
    pub follow_up: bool,
    pub follow_up_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    /// Ascending `(date, time)` ordering key used for display grouping
    pub fn chrono_key(&self) -> (NaiveDate, &str) {
        (self.date, self.time.as_str())
    }
}

/// Input fields for creating a log entry. The store assigns `id`, `date`
/// (today) and `created_at`, and forces `follow_up_date` to `None` unless
/// `follow_up` is set.
#[derive(Debug, Clone)]
pub struct LogDraft {
    pub project_id: ProjectId,
    pub time: String,
    pub contact_type: ContactType,
    pub contact_person: String,
    pub description: String,
    pub priority: Priority,
    pub follow_up: bool,
    pub follow_up_date: Option<NaiveDate>,
}

impl LogDraft {
    /// Minimal valid draft; callers fill in the rest as needed
    pub fn new(
        project_id: impl Into<ProjectId>,
        time: impl Into<String>,
        contact_type: ContactType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            time: time.into(),
            contact_type,
            contact_person: String::new(),
            description: description.into(),
            priority: Priority::default(),
            follow_up: false,
            follow_up_date: None,
        }
    }
}
