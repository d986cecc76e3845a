//! Flip-book widget adapter.
//!
//! The scheduler only talks to the page-turning engine through these traits,
//! so the browser widget, the headless console book and test fakes are
//! interchangeable.

use crate::layout::{Dimensions, Page};

/// Errors reported by a flip-book implementation.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// Nothing to show
    #[error("No pages found for flip-book")]
    NoPages,

    /// The engine refused to start
    #[error("Flip-book initialization failed: {0}")]
    Init(String),

    /// The engine rejected the page list
    #[error("Failed to load pages: {0}")]
    LoadPages(String),

    /// Teardown of an old instance failed
    #[error("Flip-book teardown failed: {0}")]
    Destroy(String),
}

/// How the book reacts to its container size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    /// Keep the configured page size
    Fixed,
    /// Scale within the min/max bounds to fill the container
    Stretch,
}

/// Construction options for a flip-book instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipbookSettings {
    pub width: u32,
    pub height: u32,
    pub size: SizeMode,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    /// Render the first and last pages as closed covers
    pub show_cover: bool,
    pub max_shadow_opacity: f32,
    /// Let the engine resize itself; off so only the scheduler triggers re-layouts
    pub auto_size: bool,
    pub mobile_scroll_support: bool,
}

impl FlipbookSettings {
    /// Settings for a book with pages of the given size.
    pub fn for_dimensions(dimensions: Dimensions) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            size: SizeMode::Stretch,
            min_width: 280,
            max_width: 2000,
            min_height: 380,
            max_height: 2000,
            show_cover: true,
            max_shadow_opacity: 0.5,
            auto_size: false,
            mobile_scroll_support: false,
        }
    }
}

/// Emitted after every page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipEvent {
    /// Zero-based index of the page now showing
    pub page: usize,
    /// Total pages in the book
    pub page_count: usize,
}

/// Callback invoked on page turns.
pub type FlipHandler = Box<dyn FnMut(FlipEvent)>;

/// A live flip-book instance.
pub trait Flipbook {
    /// Hand the built pages to the engine.
    fn load_pages(&mut self, pages: &[Page]) -> Result<(), WidgetError>;

    /// Register the page-turn callback, replacing any previous one.
    fn on_flip(&mut self, handler: FlipHandler);

    /// Turn to the next page (no-op at the end).
    fn flip_next(&mut self);

    /// Turn to the previous page (no-op at the start).
    fn flip_prev(&mut self);

    /// Number of loaded pages.
    fn page_count(&self) -> usize;

    /// Tear the instance down and release its container.
    fn destroy(&mut self) -> Result<(), WidgetError>;
}

/// Creates flip-book instances bound to the album container.
pub trait FlipbookFactory {
    type Book: Flipbook;

    /// Start a new instance with the given settings.
    fn create(&mut self, settings: &FlipbookSettings) -> Result<Self::Book, WidgetError>;
}
