/// Persisted photo data model
///
/// `PhotoRecord` is what the store holds and pushes back to the client;
/// the client mirrors it read-only. `PhotoDocument` is the same record
/// before the store has assigned an id, i.e. the payload of a create.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// A photo document as stored in the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Opaque id assigned by the store on creation; unique per namespace
    pub id: String,
    /// Data-URI encoding of the image bytes; opaque to this core
    pub image_data: String,
    /// User-assigned capture date, "YYYY-MM-DD"; primary sort/search key
    pub date: String,
    /// Milliseconds since epoch at commit time; tie-break for equal dates
    pub timestamp: i64,
    /// Original file name, advisory only
    pub file_name: String,
}

/// A photo document before the store has assigned its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDocument {
    pub image_data: String,
    pub date: String,
    pub timestamp: i64,
    pub file_name: String,
}

impl PhotoDocument {
    /// Attach the store-assigned id, completing the record
    pub fn into_record(self, id: String) -> PhotoRecord {
        PhotoRecord {
            id,
            image_data: self.image_data,
            date: self.date,
            timestamp: self.timestamp,
            file_name: self.file_name,
        }
    }
}

impl PhotoRecord {
    /// Decode the image bytes out of the data URI, for download/export.
    ///
    /// The URI format is "data:<mime>;base64,<payload>" as produced at
    /// staging time. Anything else is a corrupt record.
    pub fn decode_image_bytes(&self) -> Result<Vec<u8>, GalleryError> {
        let payload = self
            .image_data
            .split_once("base64,")
            .map(|(_, payload)| payload)
            .ok_or_else(|| {
                GalleryError::Store(format!("{}: image data is not a data URI", self.file_name))
            })?;
        general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| GalleryError::Store(format!("{}: corrupt image data: {}", self.file_name, e)))
    }
}
