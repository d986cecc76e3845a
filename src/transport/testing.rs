//! Scripted transport for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{MediaTransport, TransportError, UploadedPhoto};
use crate::model::PhotoRecord;

/// Replays queued responses and records uploads.
#[derive(Default)]
pub struct FakeTransport {
    pub uploads: RefCell<Vec<String>>,
    upload_results: RefCell<VecDeque<Result<UploadedPhoto, TransportError>>>,
    listing: RefCell<Option<Result<Vec<PhotoRecord>, TransportError>>>,
    pub listing_calls: RefCell<usize>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next upload.
    pub fn push_upload(&self, result: Result<UploadedPhoto, TransportError>) {
        self.upload_results.borrow_mut().push_back(result);
    }

    /// Response returned by every listing call.
    pub fn set_listing(&self, result: Result<Vec<PhotoRecord>, TransportError>) {
        *self.listing.borrow_mut() = Some(result);
    }
}

fn copy_error(e: &TransportError) -> TransportError {
    match e {
        TransportError::Network(m) => TransportError::Network(m.clone()),
        TransportError::Rejected { status, message } => TransportError::Rejected {
            status: *status,
            message: message.clone(),
        },
        TransportError::ListingStatus { status } => {
            TransportError::ListingStatus { status: *status }
        }
        TransportError::MissingResources | TransportError::InvalidJson(_) => {
            TransportError::MissingResources
        }
    }
}

impl MediaTransport for FakeTransport {
    fn upload(&self, _jpeg: &[u8], filename: &str) -> Result<UploadedPhoto, TransportError> {
        self.uploads.borrow_mut().push(filename.to_string());
        self.upload_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no response queued".to_string())))
    }

    fn fetch_listing(&self) -> Result<Vec<PhotoRecord>, TransportError> {
        *self.listing_calls.borrow_mut() += 1;
        match &*self.listing.borrow() {
            Some(Ok(photos)) => Ok(photos.clone()),
            Some(Err(e)) => Err(copy_error(e)),
            None => Err(TransportError::Network("offline".to_string())),
        }
    }
}
