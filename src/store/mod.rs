/// Document store seam
///
/// The managed backend owns all persistence. It groups photo documents
/// under a namespace, assigns ids on create, and pushes the full current
/// document set to every live subscriber after each change. This module
/// defines the client-side shape of that contract; `memory.rs` provides
/// the in-process implementation used for development and tests.

pub mod memory;

pub use memory::MemoryStore;

use std::collections::HashMap;
use tokio::sync::mpsc;

use crate::error::GalleryError;
use crate::state::photo::{PhotoDocument, PhotoRecord};

/// The scope under which photo documents are grouped
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Shared public collection, visible to everyone
    Shared,
    /// Private collection of one authenticated user
    User(String),
}

impl Namespace {
    /// Document path prefix for this namespace
    pub fn path(&self) -> String {
        match self {
            Namespace::Shared => "photos/shared".to_string(),
            Namespace::User(uid) => format!("users/{}/photos", uid),
        }
    }
}

/// The complete current document set of one namespace, delivered
/// atomically by the live feed. Keys are store-assigned document ids.
pub type Snapshot = HashMap<String, PhotoRecord>;

/// One delivery on the live feed: a snapshot, or a feed failure
pub type SnapshotEvent = Result<Snapshot, GalleryError>;

/// A live feed of full-collection snapshots for one namespace.
///
/// Dropping the subscription cancels delivery; the store prunes the
/// closed channel on its next push. Hold exactly one per consumer.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<SnapshotEvent>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<SnapshotEvent>) -> Self {
        Self { rx }
    }

    /// Next delivery, or None once the store side has gone away
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.rx.recv().await
    }

    /// Non-blocking variant for callers draining inside a select loop
    pub fn try_next(&mut self) -> Option<SnapshotEvent> {
        self.rx.try_recv().ok()
    }
}

/// Client-side contract of the managed document store.
///
/// Writes are acknowledged independently of feed delivery: a create may
/// be acknowledged before the record appears in the next pushed
/// snapshot. Callers must not assume immediate consistency between the
/// two.
pub trait DocumentStore {
    /// Persist one document; the store assigns and returns its id
    fn create(
        &self,
        namespace: &Namespace,
        document: PhotoDocument,
    ) -> impl std::future::Future<Output = Result<String, GalleryError>> + Send;

    /// Remove one document by id
    fn delete(
        &self,
        namespace: &Namespace,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), GalleryError>> + Send;

    /// Open a live feed for the namespace. The current snapshot is
    /// delivered first, then one snapshot per subsequent change.
    fn subscribe(&self, namespace: &Namespace) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_paths() {
        assert_eq!(Namespace::Shared.path(), "photos/shared");
        assert_eq!(
            Namespace::User("u-42".into()).path(),
            "users/u-42/photos"
        );
    }
}
