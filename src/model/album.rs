//! In-memory album state and reconciliation against the remote listing.

use super::PhotoRecord;

/// Outcome of reconciling the album against a fresh remote listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The fresh listing serialized identically; nothing was touched.
    Unchanged,
    /// The album was replaced by the fresh listing.
    Replaced,
}

/// Ordered photo sequence, unique by `public_id`.
///
/// The album is only ever appended to (after an upload) or replaced
/// wholesale (after a cache load or reconciliation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumState {
    photos: Vec<PhotoRecord>,
}

impl AlbumState {
    /// Create an empty album.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an album from records, dropping later duplicates of a `public_id`.
    pub fn from_records(records: Vec<PhotoRecord>) -> Self {
        let mut album = Self::new();
        album.replace(records);
        album
    }

    /// All photos in display order.
    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    /// Number of photos.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Check if the album has no photos.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Check if a photo with this id is already present.
    pub fn contains(&self, public_id: &str) -> bool {
        self.photos.iter().any(|p| p.public_id == public_id)
    }

    /// Append a freshly uploaded photo.
    ///
    /// Returns `false` (and leaves the album untouched) if the id is already known.
    pub fn append(&mut self, photo: PhotoRecord) -> bool {
        if self.contains(&photo.public_id) {
            log::warn!("Photo {} already in album, not appending", photo.public_id);
            return false;
        }
        self.photos.push(photo);
        true
    }

    /// Replace the whole sequence.
    pub fn replace(&mut self, records: Vec<PhotoRecord>) {
        let mut photos: Vec<PhotoRecord> = Vec::with_capacity(records.len());
        for record in records {
            if photos.iter().any(|p| p.public_id == record.public_id) {
                log::debug!("Dropping duplicate photo {}", record.public_id);
                continue;
            }
            photos.push(record);
        }
        self.photos = photos;
    }

    /// JSON form of the sequence, used as the equality key for reconciliation.
    pub fn serialized(&self) -> Option<String> {
        serialize_records(&self.photos)
    }

    /// Reconcile against a fresh remote listing.
    ///
    /// The album is replaced only if the serialized sequences differ.
    pub fn reconcile(&mut self, fresh: Vec<PhotoRecord>) -> Reconciliation {
        let current = self.serialized();
        let incoming = serialize_records(&fresh);

        if current.is_some() && current == incoming {
            log::info!("Fresh listing matches album ({} photos), skipping", self.len());
            return Reconciliation::Unchanged;
        }

        log::info!(
            "Fresh listing differs from album ({} -> {} photos), updating",
            self.len(),
            fresh.len()
        );
        self.replace(fresh);
        Reconciliation::Replaced
    }
}

fn serialize_records(records: &[PhotoRecord]) -> Option<String> {
    match serde_json::to_string(records) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Failed to serialize photo sequence: {}", e);
            None
        }
    }
}
