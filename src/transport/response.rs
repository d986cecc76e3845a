//! Response bodies from the media host.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::TransportError;
use crate::config::CloudSettings;
use crate::model::PhotoRecord;

/// Fields of a successful upload response that the album uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedPhoto {
    pub secure_url: String,
    pub public_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UploadedPhoto {
    /// Convert to a photo record, stamping `now` if the host gave no creation time.
    pub fn into_record(self, now: DateTime<Utc>) -> PhotoRecord {
        PhotoRecord::new(
            self.secure_url,
            self.public_id,
            self.created_at.unwrap_or(now),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingBody {
    resources: Option<Vec<RemoteResource>>,
}

#[derive(Debug, Deserialize)]
struct RemoteResource {
    public_id: String,
    format: String,
    created_at: DateTime<Utc>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// User-facing message for a failed upload.
///
/// Uses the host's nested `error.message` when present.
pub fn upload_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("Upload failed ({status})"))
}

/// Interpret an upload response.
pub fn parse_upload_response(status: u16, body: &str) -> Result<UploadedPhoto, TransportError> {
    if !is_success(status) {
        return Err(TransportError::Rejected {
            status,
            message: upload_error_message(status, body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Interpret a listing response into photo records, oldest first.
pub fn parse_listing(
    status: u16,
    body: &str,
    cloud: &CloudSettings,
) -> Result<Vec<PhotoRecord>, TransportError> {
    if !is_success(status) {
        return Err(TransportError::ListingStatus { status });
    }

    let listing: ListingBody = serde_json::from_str(body)?;
    let mut resources = listing.resources.ok_or(TransportError::MissingResources)?;
    resources.sort_by_key(|r| r.created_at);

    Ok(resources
        .into_iter()
        .map(|r| {
            PhotoRecord::new(
                cloud.image_url(&r.public_id, &r.format),
                r.public_id,
                r.created_at,
            )
        })
        .collect())
}
