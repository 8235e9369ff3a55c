use crate::task::{Task, TaskId};
use serde::Serialize;
use std::collections::HashSet;
use std::slice;
use ticklist_core::{TicklistError, TicklistResult};

/// Ordered sequence of tasks, position significant, ids unique.
///
/// Serializes to a bare JSON array of `{id, subject, done}` objects in
/// display order, which is the persisted document format. Mutators that
/// reference a missing id do nothing; the UI is the only caller and may race
/// against a row that was just dismissed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from tasks, keeping the first occurrence of each id
    /// so the uniqueness invariant holds even for repaired foreign documents.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::with_capacity(tasks.len());
        let mut unique = Vec::with_capacity(tasks.len());
        for task in tasks {
            if seen.insert(task.id.clone()) {
                unique.push(task);
            }
        }
        Self { tasks: unique }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Display position of the task, front first.
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    /// Flip the completion flag of the matching task.
    pub fn toggle_done(&mut self, id: &TaskId) {
        if let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) {
            task.done = !task.done;
        }
    }

    /// Replace the subject of the matching task.
    pub fn rename_subject(&mut self, id: &TaskId, subject: impl Into<String>) {
        if let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) {
            task.subject = subject.into();
        }
    }

    /// Delete the matching task, closing the gap.
    pub fn remove(&mut self, id: &TaskId) {
        if let Some(pos) = self.position(id) {
            self.tasks.remove(pos);
        }
    }

    /// Prepend a task. Ignored if a task with the same id already exists.
    pub fn insert_front(&mut self, task: Task) {
        if self.contains(&task.id) {
            return;
        }
        self.tasks.insert(0, task);
    }

    /// Encode to the persisted JSON document.
    pub fn to_json_bytes(&self) -> TicklistResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| TicklistError::Serialization(e.to_string()))
    }

    /// Decode a persisted JSON document.
    pub fn from_json_bytes(bytes: &[u8]) -> TicklistResult<Self> {
        let tasks: Vec<Task> = serde_json::from_slice(bytes)
            .map_err(|e| TicklistError::MalformedData(e.to_string()))?;
        Ok(Self::from_tasks(tasks))
    }
}
