/// Gallery application state
///
/// Thin coordinator over the core components: it resolves the active
/// namespace, routes user actions to the stager/uploader/collection,
/// and keeps the status line and screen indicator the presentation
/// layer renders. Everything visual lives outside this crate.

use std::path::{Path, PathBuf};

use crate::auth::UserProfile;
use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::state::collection::LiveCollection;
use crate::state::photo::PhotoRecord;
use crate::state::stager::{SelectedFile, UploadStager};
use crate::state::uploader::{BatchUploader, CommitOutcome};
use crate::store::{DocumentStore, Namespace, SnapshotEvent, Subscription};

/// Which collection the client works against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceMode {
    /// One shared public collection, no sign-in required
    Shared,
    /// Each authenticated user gets a private collection
    PerUser,
}

/// Which screen the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Gallery,
    Upload,
}

/// Main application state
pub struct GalleryApp<S: DocumentStore> {
    store: S,
    mode: NamespaceMode,
    /// Signed-in user, fed from the identity provider's change stream
    user: Option<UserProfile>,
    stager: UploadStager,
    uploader: BatchUploader,
    collection: LiveCollection,
    search: String,
    screen: Screen,
    /// Status message to display to the user
    status: String,
}

impl<S: DocumentStore> GalleryApp<S> {
    /// Create the application state. Fails fast on bad credentials:
    /// without them no backend call can ever succeed.
    pub fn new(config: &GalleryConfig, store: S, mode: NamespaceMode) -> Result<Self, GalleryError> {
        config.validate()?;
        println!("📸 Gallery initialized for project {}", config.project_id);

        Ok(Self {
            store,
            mode,
            user: None,
            stager: UploadStager::new(),
            uploader: BatchUploader::new(),
            collection: LiveCollection::new(),
            search: String::new(),
            screen: Screen::Gallery,
            status: "Ready.".to_string(),
        })
    }

    /// Entry point for the identity provider's state-change stream
    pub fn set_user(&mut self, user: Option<UserProfile>) {
        self.user = user;
    }

    /// The active namespace, or None when the per-user variant has no
    /// signed-in user. Upload and delete become silent no-ops then.
    pub fn namespace(&self) -> Option<Namespace> {
        match self.mode {
            NamespaceMode::Shared => Some(Namespace::Shared),
            NamespaceMode::PerUser => self
                .user
                .as_ref()
                .map(|user| Namespace::User(user.id.clone())),
        }
    }

    /// Open one live feed for the active namespace. The caller owns the
    /// subscription and pumps its deliveries into `apply_store_event`;
    /// dropping it on teardown cancels delivery.
    pub fn subscribe(&self) -> Option<Subscription> {
        self.namespace().map(|ns| self.store.subscribe(&ns))
    }

    /// Feed one live-feed delivery into the mirror
    pub fn apply_store_event(&mut self, event: SnapshotEvent) {
        self.collection.apply_event(event);
        if let Some(message) = self.collection.last_error() {
            self.status = format!("⚠️ {}", message);
        }
    }

    /// Stage a file selection; oversized files surface per-file errors
    /// in the status line without blocking their siblings.
    pub async fn select_files(&mut self, files: Vec<SelectedFile>) -> Vec<GalleryError> {
        self.screen = Screen::Upload;
        let errors = self.stager.stage_selection(files).await;
        if errors.is_empty() {
            self.status = format!("{} files ready to upload.", self.stager.len());
        } else {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            self.status = format!("⚠️ {}", messages.join("; "));
        }
        errors
    }

    /// Edit the capture date of a staged item
    pub fn set_staged_date(&mut self, id: &str, date: &str) {
        self.stager.set_date(id, date);
    }

    /// Remove a staged item; absent ids are a no-op
    pub fn remove_staged(&mut self, id: &str) {
        self.stager.remove(id);
    }

    /// Commit every staged item. On full success the screen returns to
    /// the gallery (any grace delay before switching is the caller's);
    /// on failure the staged items stay put for retry.
    pub async fn upload_all(&mut self) -> Result<CommitOutcome, GalleryError> {
        let namespace = self.namespace();
        let outcome = self
            .uploader
            .commit_all(&self.store, namespace.as_ref(), &mut self.stager)
            .await;
        match &outcome {
            Ok(CommitOutcome::Committed { count }) => {
                self.status = format!("✅ Uploaded {} photos.", count);
                self.screen = Screen::Gallery;
            }
            Ok(CommitOutcome::Skipped) => {}
            Err(e) => {
                self.status = format!("⚠️ {}", e);
            }
        }
        outcome
    }

    /// Delete one committed photo. The confirmation prompt happens in
    /// the environment before this is called. Nothing is removed
    /// locally; the store's next push carries the new truth.
    pub async fn delete_photo(&mut self, id: &str) -> Result<(), GalleryError> {
        let Some(namespace) = self.namespace() else {
            return Ok(());
        };
        match self.store.delete(&namespace, id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let err = GalleryError::Delete(e.to_string());
                self.status = format!("⚠️ {}", err);
                Err(err)
            }
        }
    }

    /// "Trigger file download": decode a mirrored photo's data URI and
    /// write the bytes next to the suggested file name in `dir`.
    pub async fn export_photo(&self, id: &str, dir: &Path) -> Result<PathBuf, GalleryError> {
        let record = self
            .collection
            .get(id)
            .ok_or_else(|| GalleryError::Store(format!("no such photo: {}", id)))?;
        let bytes = record.decode_image_bytes()?;
        let dest = dir.join(&record.file_name);
        tokio::fs::write(&dest, bytes).await?;
        Ok(dest)
    }

    /// Update the date search query
    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
    }

    /// The filtered, date-sorted list the gallery renders
    pub fn display_list(&self) -> Vec<PhotoRecord> {
        self.collection.display_list(&self.search)
    }

    /// "No photos yet" empty-state signal
    pub fn gallery_is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn pending_uploads(&self) -> &[crate::state::stager::StagedUpload] {
        self.stager.pending()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}
