//! Upload pipeline: validate, compress, upload, one file at a time.

mod compress;
mod progress;

pub use compress::{CompressedImage, compress_image, target_size};
pub use progress::{BatchReport, FileFailure, UploadObserver, status_text};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::constants::upload::{ALLOWED_MIME_TYPES, MAX_FILE_SIZE};
use crate::model::PhotoRecord;
use crate::transport::{MediaTransport, TransportError};

/// Per-file upload failures. None of them abort the rest of a batch.
#[derive(Error, Debug)]
pub enum UploadError {
    /// MIME type outside the accepted set
    #[error("Not an image")]
    NotAnImage,

    /// File exceeds the size limit
    #[error("Too large (>10MB)")]
    TooLarge {
        /// Size of the rejected file in bytes
        size: u64,
    },

    /// The file could not be read
    #[error("File read failed: {0}")]
    Read(#[from] std::io::Error),

    /// The bytes are not a decodable image
    #[error("Image load failed")]
    Decode(#[source] image::ImageError),

    /// Re-encoding the downscaled image failed
    #[error("Compression failed")]
    Compress(#[source] image::ImageError),

    /// The media host rejected or never received the upload
    #[error("{0}")]
    Transport(#[from] TransportError),
}

/// A file chosen in the picker.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Wrap in-memory file contents.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    ///
    /// Files over the size limit are not read; validation rejects them by size.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> Result<Self, UploadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = std::fs::metadata(path)?.len();
        let bytes = if size > MAX_FILE_SIZE {
            Vec::new()
        } else {
            std::fs::read(path)?
        };

        Ok(Self {
            mime: mime_for_name(&name).to_string(),
            name,
            size,
            bytes,
        })
    }
}

/// MIME type for a filename, by extension.
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Reject files with the wrong type or size.
pub fn validate(file: &SelectedFile) -> Result<(), UploadError> {
    if !ALLOWED_MIME_TYPES.contains(&file.mime.as_str()) {
        return Err(UploadError::NotAnImage);
    }
    if file.size > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge { size: file.size });
    }
    Ok(())
}

/// Upload name: millisecond timestamp plus the original name reduced to `[A-Za-z0-9._-]`.
pub fn upload_filename(original: &str, now: DateTime<Utc>) -> String {
    let cleaned: String = original
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    format!("{}_{}", now.timestamp_millis(), cleaned)
}

/// Run one file through validation, compression and upload.
pub fn process_file<T: MediaTransport + ?Sized>(
    file: &SelectedFile,
    transport: &T,
    now: DateTime<Utc>,
) -> Result<PhotoRecord, UploadError> {
    validate(file)?;

    let compressed = compress_image(&file.bytes)?;
    log::debug!(
        "Compressed {} from {} to {} bytes ({}x{})",
        file.name,
        file.size,
        compressed.bytes.len(),
        compressed.width,
        compressed.height
    );

    let filename = upload_filename(&file.name, now);
    let uploaded = transport.upload(&compressed.bytes, &filename)?;
    log::info!("Uploaded {} as {}", file.name, uploaded.public_id);

    Ok(uploaded.into_record(now))
}
