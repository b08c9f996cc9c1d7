/// Local file stager
///
/// Turns raw file selections into in-memory preview records awaiting
/// upload. Files are size-checked up front, then decoded into data URIs
/// in parallel background tasks; each completed decode appends one
/// staged item to the pending list. Nothing here touches the store.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use chrono::Local;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::task::JoinSet;

use crate::error::GalleryError;

/// Pre-encoding size limit for one upload, in bytes
pub const MAX_UPLOAD_BYTES: u64 = 800_000;

/// A raw file selection from the environment
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Original file name (e.g. "IMG_0001.jpg")
    pub name: String,
    /// Byte size, known at selection time, checked before any read
    pub size: u64,
    /// Where to read the bytes from
    pub path: PathBuf,
}

impl SelectedFile {
    /// Build a selection entry from a path, statting it for the size
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Ok(Self { name, size, path })
    }
}

/// A locally held, not-yet-persisted candidate photo record
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUpload {
    /// Random token unique within this pending batch; list-key and
    /// removal addressing only, no global uniqueness
    pub id: String,
    /// Original file name, carried into the committed record
    pub file_name: String,
    /// Byte size of the original file
    pub size: u64,
    /// Data-URI decode of the file, becomes the record's image_data
    pub preview_url: String,
    /// "YYYY-MM-DD", defaulted per selection batch, editable until commit
    pub date: String,
}

/// Owns the pending-upload list between selection and commit
#[derive(Debug, Default)]
pub struct UploadStager {
    pending: Vec<StagedUpload>,
}

impl UploadStager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a selection of files.
    ///
    /// Oversized files are rejected with one error each and never
    /// staged; rejection does not abort the rest of the selection.
    /// Accepted files decode in parallel and append to the pending list
    /// as each decode completes, so completion order decides list order.
    /// All files in one selection share the same default date, computed
    /// once here.
    pub async fn stage_selection(&mut self, files: Vec<SelectedFile>) -> Vec<GalleryError> {
        let default_date = Local::now().format("%Y-%m-%d").to_string();
        let mut errors = Vec::new();
        let mut decodes = JoinSet::new();

        for file in files {
            if file.size > MAX_UPLOAD_BYTES {
                eprintln!(
                    "⚠️  Skipping {}: {} bytes exceeds the upload limit",
                    file.name, file.size
                );
                errors.push(GalleryError::FileTooLarge {
                    file_name: file.name,
                    size: file.size,
                });
                continue;
            }
            decodes.spawn(async move {
                let preview = read_as_data_uri(&file.path).await;
                (file, preview)
            });
        }

        while let Some(joined) = decodes.join_next().await {
            match joined {
                Ok((file, Ok(preview_url))) => {
                    self.pending.push(StagedUpload {
                        id: batch_token(),
                        file_name: file.name,
                        size: file.size,
                        preview_url,
                        date: default_date.clone(),
                    });
                }
                Ok((file, Err(e))) => {
                    eprintln!("⚠️  Could not read {}: {}", file.name, e);
                    errors.push(e);
                }
                Err(e) => errors.push(GalleryError::Task(e.to_string())),
            }
        }

        errors
    }

    /// Update the date of a staged item; absent id is a no-op
    pub fn set_date(&mut self, id: &str, date: &str) {
        if let Some(item) = self.pending.iter_mut().find(|item| item.id == id) {
            item.date = date.to_string();
        }
    }

    /// Remove a staged item; idempotent, absent id is a no-op
    pub fn remove(&mut self, id: &str) {
        self.pending.retain(|item| item.id != id);
    }

    /// Drop every staged item (after a fully successful commit)
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> &[StagedUpload] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Seed the pending list directly, bypassing file I/O
    #[cfg(test)]
    pub(crate) fn push_for_test(&mut self, item: StagedUpload) {
        self.pending.push(item);
    }
}

/// Non-cryptographic unique token for one pending batch. Twelve
/// alphanumeric characters keep the collision odds negligible for any
/// realistic selection size.
fn batch_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Read a file and encode it as a "data:<mime>;base64," URI
async fn read_as_data_uri(path: &Path) -> Result<String, GalleryError> {
    let bytes = tokio::fs::read(path).await?;
    let encoded = general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", mime_for(path), encoded))
}

/// Guess the MIME type from the file extension. Unknown extensions are
/// shipped as octet-stream; the store treats the URI as opaque anyway.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, len: usize) -> SelectedFile {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![0xAB; len]).unwrap();
        SelectedFile::from_path(&path).unwrap()
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected_not_staged() {
        let dir = tempfile::tempdir().unwrap();
        let small = write_file(&dir, "small.jpg", 600_000);
        let big = write_file(&dir, "big.jpg", 900_000);

        let mut stager = UploadStager::new();
        let errors = stager.stage_selection(vec![small, big]).await;

        // The oversized file never stages, the sibling still does
        assert_eq!(stager.len(), 1);
        assert_eq!(stager.pending()[0].file_name, "small.jpg");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            GalleryError::FileTooLarge { file_name, size }
                if file_name == "big.jpg" && *size == 900_000
        ));
    }

    #[tokio::test]
    async fn test_selection_shares_one_default_date() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.jpg", 10);
        let b = write_file(&dir, "b.png", 10);

        let mut stager = UploadStager::new();
        let errors = stager.stage_selection(vec![a, b]).await;
        assert!(errors.is_empty());
        assert_eq!(stager.len(), 2);
        assert_eq!(stager.pending()[0].date, stager.pending()[1].date);
        // The default is a zero-padded calendar date
        assert_eq!(stager.pending()[0].date.len(), 10);
    }

    #[tokio::test]
    async fn test_preview_is_a_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "photo.png", 16);

        let mut stager = UploadStager::new();
        stager.stage_selection(vec![file]).await;
        let preview = &stager.pending()[0].preview_url;
        assert!(preview.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_unreadable_file_reports_error_without_blocking_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(&dir, "good.jpg", 10);
        let missing = SelectedFile {
            name: "missing.jpg".into(),
            size: 10,
            path: dir.path().join("missing.jpg"),
        };

        let mut stager = UploadStager::new();
        let errors = stager.stage_selection(vec![missing, good]).await;
        assert_eq!(stager.len(), 1);
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_set_date_and_remove_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "a.jpg", 10);

        let mut stager = UploadStager::new();
        stager.stage_selection(vec![file]).await;
        let id = stager.pending()[0].id.clone();

        stager.set_date(&id, "2023-07-14");
        assert_eq!(stager.pending()[0].date, "2023-07-14");

        stager.remove(&id);
        assert!(stager.is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_id_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "a.jpg", 10);

        let mut stager = UploadStager::new();
        stager.stage_selection(vec![file]).await;

        stager.remove("no-such-token");
        assert_eq!(stager.len(), 1);
    }

    #[test]
    fn test_batch_tokens_do_not_collide_in_a_batch() {
        let mut tokens: Vec<String> = (0..256).map(|_| batch_token()).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 256);
    }
}
