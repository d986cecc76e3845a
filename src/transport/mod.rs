//! Media host transport: image upload and tag listing.
//!
//! The host is an external HTTP service. [`MediaTransport`] is the seam the
//! rest of the album depends on; [`CloudinaryTransport`] is the production
//! client on native targets.

#[cfg(not(target_arch = "wasm32"))]
mod cloudinary;
mod error;
mod multipart;
mod response;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(not(target_arch = "wasm32"))]
pub use cloudinary::CloudinaryTransport;
pub use error::TransportError;
pub use multipart::MultipartForm;
pub use response::{UploadedPhoto, parse_listing, parse_upload_response, upload_error_message};

use crate::model::PhotoRecord;

/// Upload and listing operations against the media host.
pub trait MediaTransport {
    /// Upload one compressed JPEG under `filename`.
    fn upload(&self, jpeg: &[u8], filename: &str) -> Result<UploadedPhoto, TransportError>;

    /// Fetch every photo carrying the album tag, oldest first.
    fn fetch_listing(&self) -> Result<Vec<PhotoRecord>, TransportError>;
}

impl<T: MediaTransport + ?Sized> MediaTransport for Box<T> {
    fn upload(&self, jpeg: &[u8], filename: &str) -> Result<UploadedPhoto, TransportError> {
        (**self).upload(jpeg, filename)
    }

    fn fetch_listing(&self) -> Result<Vec<PhotoRecord>, TransportError> {
        (**self).fetch_listing()
    }
}
