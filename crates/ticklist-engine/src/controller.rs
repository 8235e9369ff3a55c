use crate::store::TaskStore;
use std::collections::HashMap;
use std::sync::Arc;
use ticklist_core::{SwipeAction, SwipeConfig, SwipeEvent, SwipeMachine, SwipePhase};
use ticklist_domain::{Task, TaskCollection, TaskId};
use ticklist_persistence::PersistenceGateway;
use tokio::sync::broadcast;

/// Binds row commands and gesture events to the task store.
///
/// Owns the single editing-mode pointer and one swipe machine per actively
/// dragged row. Rows without a live gesture have no session and report an
/// offset of zero. At most one row is in edit mode at a time; the pointer is
/// controller state, not a task flag.
pub struct Controller {
    store: TaskStore,
    swipe_config: SwipeConfig,
    sessions: HashMap<TaskId, SwipeMachine>,
    editing_id: Option<TaskId>,
}

impl Controller {
    /// Load the persisted collection and wrap it with default swipe tuning.
    pub async fn load(gateway: Arc<dyn PersistenceGateway>, defaults: TaskCollection) -> Self {
        let store = TaskStore::load(gateway, defaults).await;
        Self::new(store)
    }

    pub fn new(store: TaskStore) -> Self {
        Self::with_config(store, SwipeConfig::default())
    }

    pub fn with_config(store: TaskStore, swipe_config: SwipeConfig) -> Self {
        Self {
            store,
            swipe_config,
            sessions: HashMap::new(),
            editing_id: None,
        }
    }

    /// Current collection.
    pub fn tasks(&self) -> &TaskCollection {
        self.store.tasks()
    }

    /// Subscribe to collection snapshots, one per mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<TaskCollection> {
        self.store.subscribe()
    }

    /// Wait for queued writes; see [`TaskStore::flush`].
    pub async fn flush(&self) {
        self.store.flush().await;
    }

    /// Create an empty task at the front of the list, enter edit mode for it,
    /// and return its id.
    pub fn add(&mut self) -> TaskId {
        let task = Task::new("");
        let id = task.id.clone();
        self.store.insert_front(task);
        self.begin_edit(id.clone());
        id
    }

    /// Point the editing slot at `id`. Any prior edit ends implicitly; text
    /// committed so far via [`Controller::rename`] is all that survives it.
    pub fn begin_edit(&mut self, id: TaskId) {
        self.editing_id = Some(id);
    }

    /// Clear the editing slot if it still points at `id`. A stale completion
    /// from an earlier edit session is ignored.
    pub fn end_edit(&mut self, id: &TaskId) {
        if self.editing_id.as_ref() == Some(id) {
            self.editing_id = None;
        }
    }

    /// Row currently in edit mode, if any.
    pub fn editing_id(&self) -> Option<&TaskId> {
        self.editing_id.as_ref()
    }

    pub fn toggle(&mut self, id: &TaskId) {
        self.store.toggle_done(id);
    }

    pub fn rename(&mut self, id: &TaskId, subject: impl Into<String>) {
        self.store.rename_subject(id, subject);
    }

    /// Remove a row directly, outside the swipe flow (e.g. a delete button in
    /// the exposed back view). Any live gesture session for the row dies with
    /// it.
    pub fn request_remove(&mut self, id: &TaskId) {
        self.sessions.remove(id);
        self.store.remove(id);
    }

    /// Route one gesture event to the row's machine.
    ///
    /// A session opens on a start for a row without one and closes when the
    /// machine settles back to idle. The returned action is for the
    /// presentation layer; the dismiss effect is applied to the store here,
    /// which is what keeps the row alive until its exit animation has
    /// finished.
    pub fn swipe(&mut self, id: &TaskId, event: SwipeEvent) -> SwipeAction {
        let action = match self.sessions.get_mut(id) {
            Some(machine) => machine.handle(event),
            None => {
                // Only a start opens a session; anything else is a leftover
                // from a session that already settled.
                if !matches!(event, SwipeEvent::Started) {
                    return SwipeAction::None;
                }
                let mut machine = SwipeMachine::new(self.swipe_config);
                let action = machine.handle(event);
                self.sessions.insert(id.clone(), machine);
                action
            }
        };

        if action == SwipeAction::Dismiss {
            self.sessions.remove(id);
            self.store.remove(id);
        } else if self.sessions.get(id).is_some_and(|m| m.is_idle()) {
            self.sessions.remove(id);
        }

        action
    }

    /// Offset the presentation should draw the row at; zero without a session.
    pub fn swipe_translation(&self, id: &TaskId) -> f32 {
        self.sessions.get(id).map_or(0.0, |m| m.translation())
    }

    /// Gesture phase of the row; [`SwipePhase::Idle`] without a session.
    pub fn swipe_phase(&self, id: &TaskId) -> SwipePhase {
        self.sessions
            .get(id)
            .map_or(SwipePhase::Idle, |m| m.phase())
    }

    pub fn has_active_swipe(&self, id: &TaskId) -> bool {
        self.sessions.contains_key(id)
    }
}
