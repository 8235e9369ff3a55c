use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque row identity. Immutable after creation; the persisted form is the
/// bare string, so ids produced by other generators load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Fresh collision-resistant id (UUID v4 rendered as a string).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub subject: String,
    pub done: bool,
}

impl Task {
    /// New open task with a freshly generated id.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            subject: subject.into(),
            done: false,
        }
    }

    /// New open task under a caller-chosen id.
    pub fn with_id(id: impl Into<TaskId>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            done: false,
        }
    }
}
