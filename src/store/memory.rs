/// In-memory document store with live push
///
/// Stand-in for the managed backend: one collection per namespace path,
/// store-assigned sequential ids, and the same push discipline the real
/// feed has — every mutation delivers the full current snapshot to all
/// live subscribers, never a diff. Used for development and tests; the
/// fault hooks make the commit-abort and feed-failure paths reachable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::error::GalleryError;
use crate::state::photo::PhotoDocument;
use crate::store::{DocumentStore, Namespace, Snapshot, SnapshotEvent, Subscription};

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    /// Namespace path -> current document set
    collections: HashMap<String, Snapshot>,
    /// Namespace path -> live feed senders; closed ones are pruned on push
    subscribers: HashMap<String, Vec<mpsc::UnboundedSender<SnapshotEvent>>>,
    next_id: u64,
    create_attempts: usize,
    /// 1-based create attempt that should fail, if set
    fail_create_number: Option<usize>,
}

impl Inner {
    /// Deliver the namespace's current snapshot to every live subscriber
    fn push(&mut self, path: &str) {
        let snapshot = self.collections.get(path).cloned().unwrap_or_default();
        if let Some(senders) = self.subscribers.get_mut(path) {
            senders.retain(|tx| tx.send(Ok(snapshot.clone())).is_ok());
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the nth create call (1-based, counted across all namespaces)
    /// fail with a backend error. Fault hook for commit-abort tests.
    pub fn fail_create_number(&self, n: usize) {
        self.inner.lock().unwrap().fail_create_number = Some(n);
    }

    /// Deliver a feed failure to every live subscriber of the namespace.
    /// Fault hook for permission-denial tests.
    pub fn push_error(&self, namespace: &Namespace, message: &str) {
        let path = namespace.path();
        let mut inner = self.inner.lock().unwrap();
        if let Some(senders) = inner.subscribers.get_mut(&path) {
            senders.retain(|tx| {
                tx.send(Err(GalleryError::Subscription(message.to_string())))
                    .is_ok()
            });
        }
    }

    /// Total create calls attempted, successful or not
    pub fn create_attempts(&self) -> usize {
        self.inner.lock().unwrap().create_attempts
    }

    /// Current document count for a namespace
    pub fn len(&self, namespace: &Namespace) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .collections
            .get(&namespace.path())
            .map_or(0, |c| c.len())
    }

    pub fn is_empty(&self, namespace: &Namespace) -> bool {
        self.len(namespace) == 0
    }
}

impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        namespace: &Namespace,
        document: PhotoDocument,
    ) -> Result<String, GalleryError> {
        let path = namespace.path();
        let mut inner = self.inner.lock().unwrap();

        inner.create_attempts += 1;
        if inner.fail_create_number == Some(inner.create_attempts) {
            return Err(GalleryError::Store("permission denied".into()));
        }

        inner.next_id += 1;
        let id = format!("doc-{:04}", inner.next_id);
        let record = document.into_record(id.clone());
        inner
            .collections
            .entry(path.clone())
            .or_default()
            .insert(id.clone(), record);
        inner.push(&path);
        Ok(id)
    }

    async fn delete(&self, namespace: &Namespace, id: &str) -> Result<(), GalleryError> {
        let path = namespace.path();
        let mut inner = self.inner.lock().unwrap();

        let removed = inner
            .collections
            .get_mut(&path)
            .and_then(|collection| collection.remove(id));
        if removed.is_none() {
            return Err(GalleryError::Store(format!("no such document: {}", id)));
        }
        inner.push(&path);
        Ok(())
    }

    fn subscribe(&self, namespace: &Namespace) -> Subscription {
        let path = namespace.path();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().unwrap();

        // Initial delivery: the current snapshot, before any change
        let snapshot = inner.collections.get(&path).cloned().unwrap_or_default();
        let _ = tx.send(Ok(snapshot));

        inner.subscribers.entry(path).or_default().push(tx);
        Subscription::new(rx)
    }
}
