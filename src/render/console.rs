//! Headless flip-book that renders pages as text.
//!
//! Used by the command-line driver, where there is no browser widget.

use super::view::AlbumView;
use super::widget::{FlipEvent, FlipHandler, Flipbook, FlipbookFactory, FlipbookSettings, WidgetError};
use crate::layout::{Page, PageContent};

/// Describe a page in one line.
pub fn describe_page(index: usize, page: &Page) -> String {
    let body = match &page.content {
        PageContent::Cover {
            title,
            subtitle,
            memories,
        } => format!("{title} / {subtitle} ({memories} memories)"),
        PageContent::Photos(polaroids) => polaroids
            .iter()
            .map(|p| {
                let stickers: String = p.stickers.iter().map(|s| s.emoji).collect();
                format!("[{} {} {}]", p.tape.css_class(), p.url, stickers)
            })
            .collect::<Vec<_>>()
            .join(" "),
        PageContent::Blank => "(blank)".to_string(),
        PageContent::BackCover { title } => title.to_string(),
    };
    format!("{:>3} {:<4} {}", index + 1, page.density.as_str(), body)
}

/// Creates [`ConsoleBook`]s.
#[derive(Debug, Default)]
pub struct ConsoleFactory {
    created: usize,
}

impl ConsoleFactory {
    /// Create a factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl FlipbookFactory for ConsoleFactory {
    type Book = ConsoleBook;

    fn create(&mut self, settings: &FlipbookSettings) -> Result<ConsoleBook, WidgetError> {
        if settings.width == 0 || settings.height == 0 {
            return Err(WidgetError::Init(format!(
                "page size {}x{} is empty",
                settings.width, settings.height
            )));
        }
        self.created += 1;
        log::debug!(
            "Console flip-book #{} at {}x{}",
            self.created,
            settings.width,
            settings.height
        );
        Ok(ConsoleBook {
            settings: settings.clone(),
            lines: Vec::new(),
            current: 0,
            handler: None,
        })
    }
}

/// Text rendition of a flip-book.
pub struct ConsoleBook {
    settings: FlipbookSettings,
    lines: Vec<String>,
    current: usize,
    handler: Option<FlipHandler>,
}

impl ConsoleBook {
    /// Settings the book was created with.
    pub fn settings(&self) -> &FlipbookSettings {
        &self.settings
    }

    /// One line per loaded page.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Zero-based index of the current page.
    pub fn current_page(&self) -> usize {
        self.current
    }

    fn turn_to(&mut self, page: usize) {
        self.current = page;
        let event = FlipEvent {
            page,
            page_count: self.lines.len(),
        };
        if let Some(handler) = self.handler.as_mut() {
            handler(event);
        }
    }
}

impl Flipbook for ConsoleBook {
    fn load_pages(&mut self, pages: &[Page]) -> Result<(), WidgetError> {
        if pages.is_empty() {
            return Err(WidgetError::NoPages);
        }
        self.lines = pages
            .iter()
            .enumerate()
            .map(|(i, page)| describe_page(i, page))
            .collect();
        self.current = 0;
        Ok(())
    }

    fn on_flip(&mut self, handler: FlipHandler) {
        self.handler = Some(handler);
    }

    fn flip_next(&mut self) {
        if self.current + 1 < self.lines.len() {
            self.turn_to(self.current + 1);
        }
    }

    fn flip_prev(&mut self) {
        if self.current > 0 {
            self.turn_to(self.current - 1);
        }
    }

    fn page_count(&self) -> usize {
        self.lines.len()
    }

    fn destroy(&mut self) -> Result<(), WidgetError> {
        self.lines.clear();
        self.handler = None;
        Ok(())
    }
}

/// Container surface that logs visibility changes.
#[derive(Debug, Default)]
pub struct ConsoleView {
    empty: bool,
}

impl ConsoleView {
    /// Create a view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the empty-state placeholder is showing.
    pub fn is_empty_state(&self) -> bool {
        self.empty
    }
}

impl AlbumView for ConsoleView {
    fn show_empty_state(&mut self) {
        self.empty = true;
        log::info!("No photos yet. Upload some to start the album.");
    }

    fn show_flipbook(&mut self) {
        self.empty = false;
    }

    fn clear_container(&mut self) {
        log::trace!("Container cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Density, Dimensions, Polaroid, TapeStyle};

    #[test]
    fn test_describe_pages() {
        let cover = Page {
            density: Density::Hard,
            content: PageContent::Cover {
                title: "Our Memories",
                subtitle: "Photo Album",
                memories: 2,
            },
        };
        assert_eq!(
            describe_page(0, &cover),
            "  1 hard Our Memories / Photo Album (2 memories)"
        );

        let photos = Page {
            density: Density::Soft,
            content: PageContent::Photos(vec![Polaroid {
                url: "https://img/a.jpg".to_string(),
                public_id: "a".to_string(),
                tape: TapeStyle::Blue,
                stickers: Vec::new(),
            }]),
        };
        assert_eq!(
            describe_page(1, &photos),
            "  2 soft [tape-blue https://img/a.jpg ]"
        );
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let mut factory = ConsoleFactory::new();
        let settings = FlipbookSettings::for_dimensions(Dimensions::new(0, 0));
        assert!(matches!(
            factory.create(&settings),
            Err(WidgetError::Init(_))
        ));
        assert_eq!(factory.created(), 0);
    }

    #[test]
    fn test_book_tracks_current_page() {
        let mut factory = ConsoleFactory::new();
        let settings = FlipbookSettings::for_dimensions(Dimensions::new(555, 740));
        let mut book = factory.create(&settings).unwrap();
        let blank = Page {
            density: Density::Soft,
            content: PageContent::Blank,
        };
        book.load_pages(&[blank.clone(), blank.clone(), blank]).unwrap();

        assert_eq!(book.settings().width, 555);
        assert_eq!(book.current_page(), 0);
        book.flip_next();
        book.flip_next();
        book.flip_next();
        assert_eq!(book.current_page(), 2);
        book.flip_prev();
        assert_eq!(book.current_page(), 1);
    }
}
