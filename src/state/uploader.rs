/// Batch uploader
///
/// Commits every staged item to the document store, one create at a
/// time. Sequential on purpose: at most one outstanding write per
/// namespace from this client, and a failure boundary that is a single
/// index into the pending list. The committed prefix of a failed batch
/// stays in the store; there is no compensating transaction.

use chrono::Utc;

use crate::error::GalleryError;
use crate::state::photo::PhotoDocument;
use crate::state::stager::UploadStager;
use crate::store::{DocumentStore, Namespace};

/// What a commit call did
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Every staged item was created; the pending list is now empty
    Committed { count: usize },
    /// A precondition failed (empty list, commit already in flight, or
    /// no namespace context); nothing was attempted
    Skipped,
}

/// Holds the mutual-exclusion gate for batch commits
#[derive(Debug, Default)]
pub struct BatchUploader {
    uploading: bool,
}

impl BatchUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a batch commit is in flight
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Commit all staged items to the store, in list order.
    ///
    /// Preconditions (silently skipped, never an error): the pending
    /// list is non-empty, no commit is already in flight, and a
    /// namespace context is present.
    ///
    /// On any create failure the loop stops immediately: the pending
    /// list is left exactly as it was so the user can retry, and the
    /// error carries the backend's message. Only a fully successful
    /// batch clears the pending list.
    pub async fn commit_all<S: DocumentStore>(
        &mut self,
        store: &S,
        namespace: Option<&Namespace>,
        stager: &mut UploadStager,
    ) -> Result<CommitOutcome, GalleryError> {
        if self.uploading || stager.is_empty() {
            return Ok(CommitOutcome::Skipped);
        }
        let Some(namespace) = namespace else {
            return Ok(CommitOutcome::Skipped);
        };

        self.uploading = true;

        for item in stager.pending() {
            let document = PhotoDocument {
                image_data: item.preview_url.clone(),
                date: item.date.clone(),
                timestamp: Utc::now().timestamp_millis(),
                file_name: item.file_name.clone(),
            };
            if let Err(e) = store.create(namespace, document).await {
                self.uploading = false;
                return Err(GalleryError::Commit(e.to_string()));
            }
        }

        let count = stager.len();
        stager.clear();
        self.uploading = false;
        println!("✅ Upload complete: {} photos committed", count);
        Ok(CommitOutcome::Committed { count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::stager::StagedUpload;
    use crate::store::MemoryStore;

    fn staged(name: &str, date: &str) -> StagedUpload {
        StagedUpload {
            id: format!("tok-{}", name),
            file_name: name.to_string(),
            size: 1024,
            preview_url: format!("data:image/jpeg;base64,{}", name),
            date: date.to_string(),
        }
    }

    fn stager_with(items: Vec<StagedUpload>) -> UploadStager {
        let mut stager = UploadStager::new();
        for item in items {
            stager.push_for_test(item);
        }
        stager
    }

    #[tokio::test]
    async fn test_full_success_clears_pending_list() {
        let store = MemoryStore::new();
        let ns = Namespace::Shared;
        let mut stager = stager_with(vec![
            staged("a.jpg", "2024-03-01"),
            staged("b.jpg", "2024-03-02"),
        ]);
        let mut uploader = BatchUploader::new();

        let outcome = uploader
            .commit_all(&store, Some(&ns), &mut stager)
            .await
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Committed { count: 2 });
        assert!(stager.is_empty());
        assert_eq!(store.len(&ns), 2);
        assert!(!uploader.is_uploading());
    }

    #[tokio::test]
    async fn test_failure_aborts_batch_and_keeps_pending_list() {
        let store = MemoryStore::new();
        let ns = Namespace::Shared;
        store.fail_create_number(2);

        let mut stager = stager_with(vec![
            staged("a.jpg", "2024-03-01"),
            staged("b.jpg", "2024-03-02"),
            staged("c.jpg", "2024-03-03"),
        ]);
        let mut uploader = BatchUploader::new();

        let result = uploader.commit_all(&store, Some(&ns), &mut stager).await;
        assert!(matches!(result, Err(GalleryError::Commit(_))));

        // A stays committed, C is never attempted, the pending list is
        // exactly what it was before the call
        assert_eq!(store.len(&ns), 1);
        assert_eq!(store.create_attempts(), 2);
        assert_eq!(stager.len(), 3);
        let names: Vec<&str> = stager
            .pending()
            .iter()
            .map(|item| item.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
        assert!(!uploader.is_uploading());
    }

    #[tokio::test]
    async fn test_commit_in_flight_is_skipped_without_store_calls() {
        let store = MemoryStore::new();
        let ns = Namespace::Shared;
        let mut stager = stager_with(vec![staged("a.jpg", "2024-03-01")]);
        let mut uploader = BatchUploader::new();
        uploader.uploading = true;

        let outcome = uploader
            .commit_all(&store, Some(&ns), &mut stager)
            .await
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Skipped);
        assert_eq!(store.create_attempts(), 0);
        assert_eq!(stager.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_pending_list_is_skipped() {
        let store = MemoryStore::new();
        let mut stager = UploadStager::new();
        let mut uploader = BatchUploader::new();

        let outcome = uploader
            .commit_all(&store, Some(&Namespace::Shared), &mut stager)
            .await
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Skipped);
        assert_eq!(store.create_attempts(), 0);
    }

    #[tokio::test]
    async fn test_missing_namespace_context_is_skipped() {
        let store = MemoryStore::new();
        let mut stager = stager_with(vec![staged("a.jpg", "2024-03-01")]);
        let mut uploader = BatchUploader::new();

        let outcome = uploader
            .commit_all(&store, None, &mut stager)
            .await
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Skipped);
        assert_eq!(store.create_attempts(), 0);
        assert_eq!(stager.len(), 1);
    }

    #[tokio::test]
    async fn test_committed_documents_carry_staged_fields() {
        let store = MemoryStore::new();
        let ns = Namespace::User("u-1".into());
        let mut sub = store.subscribe(&ns);
        sub.next().await; // initial empty snapshot

        let mut stager = stager_with(vec![staged("a.jpg", "2023-12-24")]);
        let mut uploader = BatchUploader::new();
        let before = Utc::now().timestamp_millis();
        uploader
            .commit_all(&store, Some(&ns), &mut stager)
            .await
            .unwrap();

        let snapshot = sub.next().await.unwrap().unwrap();
        let record = snapshot.values().next().unwrap();
        assert_eq!(record.file_name, "a.jpg");
        assert_eq!(record.date, "2023-12-24");
        assert!(record.image_data.starts_with("data:image/jpeg;base64,"));
        assert!(record.timestamp >= before);
    }
}
