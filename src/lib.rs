//! flipalbum - a shared photo album shown as a page-turning book.
//!
//! Photos are uploaded to a media host, tagged with the album tag, and
//! listed back by that tag. The album is cached locally so it can be shown
//! before the host answers.

pub mod app;
pub mod cache;
pub mod config;
pub mod constants;
pub mod layout;
pub mod logging;
pub mod model;
pub mod render;
pub mod transport;
pub mod upload;

pub use app::AlbumApp;
pub use config::AppConfig;
pub use model::{AlbumState, PhotoRecord};
