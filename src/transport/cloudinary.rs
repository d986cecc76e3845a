//! Cloudinary client over `ureq`.

use std::time::Duration;

use chrono::Utc;

use super::multipart::MultipartForm;
use super::response::{UploadedPhoto, parse_listing, parse_upload_response};
use super::{MediaTransport, TransportError};
use crate::config::CloudSettings;
use crate::constants::upload::COMPRESSED_MIME_TYPE;
use crate::model::PhotoRecord;

/// Blocking client for unsigned uploads and public tag listings.
pub struct CloudinaryTransport {
    agent: ureq::Agent,
    cloud: CloudSettings,
}

impl CloudinaryTransport {
    /// Overall time limit for a single request.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Create a client for the given account settings.
    pub fn new(cloud: CloudSettings) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Self::REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build();
        let agent: ureq::Agent = config.into();
        Self { agent, cloud }
    }

    /// Account settings in use.
    pub fn cloud(&self) -> &CloudSettings {
        &self.cloud
    }

    fn upload_form(&self, jpeg: &[u8], filename: &str) -> MultipartForm {
        MultipartForm::new()
            .file("file", filename, COMPRESSED_MIME_TYPE, jpeg)
            .text("upload_preset", &self.cloud.upload_preset)
            .text("folder", &self.cloud.upload_folder)
            .text("tags", &self.cloud.upload_tag)
    }
}

impl MediaTransport for CloudinaryTransport {
    fn upload(&self, jpeg: &[u8], filename: &str) -> Result<UploadedPhoto, TransportError> {
        let (content_type, body) = self.upload_form(jpeg, filename).finish();
        log::debug!("Uploading {} ({} bytes)", filename, jpeg.len());

        let mut response = self
            .agent
            .post(self.cloud.upload_url())
            .header("Content-Type", content_type.as_str())
            .send(&body[..])?;

        let status = response.status().as_u16();
        let text = response.body_mut().read_to_string()?;
        parse_upload_response(status, &text)
    }

    fn fetch_listing(&self) -> Result<Vec<PhotoRecord>, TransportError> {
        // Cache-busting stamp so CDN edges don't serve a stale listing.
        let stamp = Utc::now().timestamp_millis().to_string();

        let mut response = self
            .agent
            .get(self.cloud.list_url())
            .query("t", &stamp)
            .call()?;

        let status = response.status().as_u16();
        let text = response.body_mut().read_to_string()?;
        let photos = parse_listing(status, &text, &self.cloud)?;
        log::debug!("Listing returned {} photos", photos.len());
        Ok(photos)
    }
}
