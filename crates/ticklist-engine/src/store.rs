use std::sync::Arc;
use ticklist_domain::{Task, TaskCollection, TaskId};
use ticklist_persistence::PersistenceGateway;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Storage key the serialized collection lives under.
pub const STORAGE_KEY: &str = "data";

/// Work items for the background writer task.
enum SaveRequest {
    /// Persist this collection snapshot.
    Persist(TaskCollection),
    /// Acknowledge once every request queued before this one has been handled.
    Flush(oneshot::Sender<()>),
}

/// Owns the current task collection and mediates every mutation.
///
/// # Save Behavior
///
/// Every mutation is persisted immediately:
/// - the in-memory collection updates synchronously, so callers never wait
///   on storage latency
/// - the derived collection is queued for the background writer before the
///   new state is broadcast to subscribers
/// - a single writer task drains the queue in order, so the gateway sees
///   writes in mutation order and the last write reflects the latest state
///
/// A failed write is logged and swallowed; the in-memory collection stays
/// authoritative for the running session. A crash between a mutation and its
/// durable write loses that one mutation.
pub struct TaskStore {
    tasks: TaskCollection,
    save_tx: mpsc::UnboundedSender<SaveRequest>,
    snapshot_tx: broadcast::Sender<TaskCollection>,
}

impl TaskStore {
    /// Load the persisted collection from the gateway and start the writer
    /// task. Falls back to `defaults` when the key is absent, the medium is
    /// unreadable, or the stored document does not decode.
    pub async fn load(gateway: Arc<dyn PersistenceGateway>, defaults: TaskCollection) -> Self {
        let tasks = match gateway.read(STORAGE_KEY).await {
            Ok(Some(bytes)) => match TaskCollection::from_json_bytes(&bytes) {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::warn!("Persisted tasks are malformed, using defaults: {}", e);
                    defaults
                }
            },
            Ok(None) => {
                tracing::debug!("No persisted tasks, using defaults");
                defaults
            }
            Err(e) => {
                tracing::warn!("Could not read persisted tasks, using defaults: {}", e);
                defaults
            }
        };

        let (save_tx, save_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = broadcast::channel(10);
        tokio::spawn(run_writer(gateway, save_rx));

        Self {
            tasks,
            save_tx,
            snapshot_tx,
        }
    }

    /// Current collection.
    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    /// Subscribe to collection snapshots, one per mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<TaskCollection> {
        self.snapshot_tx.subscribe()
    }

    /// Flip the completion flag of the matching task.
    pub fn toggle_done(&mut self, id: &TaskId) {
        self.apply(|tasks| tasks.toggle_done(id));
    }

    /// Replace the subject of the matching task.
    pub fn rename_subject(&mut self, id: &TaskId, subject: impl Into<String>) {
        let subject = subject.into();
        self.apply(|tasks| tasks.rename_subject(id, subject));
    }

    /// Delete the matching task.
    pub fn remove(&mut self, id: &TaskId) {
        self.apply(|tasks| tasks.remove(id));
    }

    /// Prepend a task.
    pub fn insert_front(&mut self, task: Task) {
        self.apply(|tasks| tasks.insert_front(task));
    }

    /// Wait until every write queued before this call has been handled.
    /// Useful for graceful teardown; the running app never needs it.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.save_tx.send(SaveRequest::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Read-modify-write cycle shared by all mutators: derive the next
    /// collection from a copy, queue it for persistence, publish it.
    fn apply(&mut self, mutate: impl FnOnce(&mut TaskCollection)) {
        let mut next = self.tasks.clone();
        mutate(&mut next);

        // Queue before publishing. Send only fails once the writer is gone.
        if self.save_tx.send(SaveRequest::Persist(next.clone())).is_err() {
            tracing::error!("Save queue closed, changes stay in memory only");
        }

        self.tasks = next;
        let _ = self.snapshot_tx.send(self.tasks.clone());
    }
}

/// Drains the save queue one request at a time so gateway writes for the key
/// land in mutation order (last write wins).
async fn run_writer(
    gateway: Arc<dyn PersistenceGateway>,
    mut save_rx: mpsc::UnboundedReceiver<SaveRequest>,
) {
    while let Some(request) = save_rx.recv().await {
        match request {
            SaveRequest::Persist(tasks) => {
                let bytes = match tasks.to_json_bytes() {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!("Could not encode tasks, skipping save: {}", e);
                        continue;
                    }
                };
                if let Err(e) = gateway.write(STORAGE_KEY, &bytes).await {
                    tracing::warn!("Save failed, in-memory state stays authoritative: {}", e);
                }
            }
            SaveRequest::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
