//! A single uploaded photo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One photo hosted on the media service.
///
/// Identity is `public_id`; records are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Publicly reachable image URL
    pub url: String,
    /// Media host identifier
    pub public_id: String,
    /// Creation time on the media host
    pub created_at: DateTime<Utc>,
}

impl PhotoRecord {
    /// Create a new photo record.
    pub fn new(
        url: impl Into<String>,
        public_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url: url.into(),
            public_id: public_id.into(),
            created_at,
        }
    }
}
