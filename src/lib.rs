/// gallery-sync: client-side synchronization and batch-ingestion core
/// for a photo gallery backed by an external document store.
///
/// The store pushes full snapshots of the photo collection; this crate
/// stages local uploads, commits them sequentially, and mirrors the
/// pushed collection into a filtered, date-sorted display list. All
/// rendering, navigation, and sign-in flows live outside this crate.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod store;

pub use app::{GalleryApp, NamespaceMode, Screen};
pub use config::GalleryConfig;
pub use error::GalleryError;
pub use state::collection::LiveCollection;
pub use state::photo::{PhotoDocument, PhotoRecord};
pub use state::stager::{SelectedFile, StagedUpload, UploadStager, MAX_UPLOAD_BYTES};
pub use state::uploader::{BatchUploader, CommitOutcome};
pub use store::{DocumentStore, Namespace, Snapshot, Subscription};
