/// State management module
///
/// This module holds the client-side core of the gallery:
/// - Persisted data model mirrored from the store (photo.rs)
/// - Local staging of selected files before upload (stager.rs)
/// - Sequential batch commit of staged files (uploader.rs)
/// - Live mirror of the remote collection and its derived
///   filtered/sorted display list (collection.rs)

pub mod collection;
pub mod photo;
pub mod stager;
pub mod uploader;
