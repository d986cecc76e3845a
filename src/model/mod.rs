//! Album data model.

mod album;
mod photo;

pub use album::{AlbumState, Reconciliation};
pub use photo::PhotoRecord;
