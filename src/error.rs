/// Error taxonomy for the gallery core
///
/// Every failure a caller can observe is one of these variants. None of
/// them are fatal to the core: validation failures drop a single file,
/// feed failures keep the last-known-good mirror, commit failures leave
/// the pending list intact for retry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// Backend credentials missing or empty at startup. The core cannot
    /// function without them, so there is no recovery path here.
    #[error("missing backend configuration: {0}")]
    Config(String),

    /// A selected file exceeds the pre-encoding upload limit. Per-file
    /// and non-fatal: sibling files in the same selection still stage.
    #[error("{file_name} exceeds the 800,000-byte upload limit ({size} bytes)")]
    FileTooLarge { file_name: String, size: u64 },

    /// The live feed failed to deliver a snapshot (e.g. permission
    /// denial). The mirror keeps its last successfully received state.
    #[error("live feed error: {0}")]
    Subscription(String),

    /// A create call failed mid-batch. The committed prefix stays in the
    /// store; the pending list is left untouched for retry.
    #[error("upload failed: {0}")]
    Commit(String),

    /// A delete call failed. Nothing was optimistically removed, so no
    /// rollback is needed.
    #[error("delete failed: {0}")]
    Delete(String),

    /// A backend call failed before the core attributed it to a
    /// commit/delete/feed role.
    #[error("backend error: {0}")]
    Store(String),

    /// A background decode task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
