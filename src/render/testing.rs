//! Recording fakes for the widget and container.

use std::cell::Cell;
use std::rc::Rc;

use super::view::AlbumView;
use super::widget::{FlipEvent, FlipHandler, Flipbook, FlipbookFactory, FlipbookSettings, WidgetError};
use crate::layout::Page;

/// Which surface the fake container is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shown {
    #[default]
    Nothing,
    EmptyState,
    Flipbook,
}

/// Container fake that records calls.
#[derive(Debug, Default)]
pub struct FakeView {
    pub shown: Shown,
    pub empty_calls: usize,
    pub flipbook_calls: usize,
    pub clears: usize,
}

impl AlbumView for FakeView {
    fn show_empty_state(&mut self) {
        self.shown = Shown::EmptyState;
        self.empty_calls += 1;
    }

    fn show_flipbook(&mut self) {
        self.shown = Shown::Flipbook;
        self.flipbook_calls += 1;
    }

    fn clear_container(&mut self) {
        self.clears += 1;
    }
}

/// Widget factory fake.
#[derive(Debug, Default)]
pub struct FakeFactory {
    pub created: usize,
    pub fail_create: bool,
    pub fail_load: bool,
    pub fail_destroy: bool,
    pub last_settings: Option<FlipbookSettings>,
    pub destroyed: Rc<Cell<usize>>,
}

impl FlipbookFactory for FakeFactory {
    type Book = FakeBook;

    fn create(&mut self, settings: &FlipbookSettings) -> Result<FakeBook, WidgetError> {
        if self.fail_create {
            return Err(WidgetError::Init("container has no size".to_string()));
        }
        self.created += 1;
        self.last_settings = Some(settings.clone());
        Ok(FakeBook {
            pages: Vec::new(),
            current: 0,
            handler: None,
            fail_load: self.fail_load,
            fail_destroy: self.fail_destroy,
            destroyed: Rc::clone(&self.destroyed),
        })
    }
}

/// Widget fake that keeps its pages and fires flip events.
pub struct FakeBook {
    pub pages: Vec<Page>,
    pub current: usize,
    handler: Option<FlipHandler>,
    fail_load: bool,
    fail_destroy: bool,
    destroyed: Rc<Cell<usize>>,
}

impl FakeBook {
    fn emit(&mut self) {
        let event = FlipEvent {
            page: self.current,
            page_count: self.pages.len(),
        };
        if let Some(handler) = self.handler.as_mut() {
            handler(event);
        }
    }
}

impl Flipbook for FakeBook {
    fn load_pages(&mut self, pages: &[Page]) -> Result<(), WidgetError> {
        if self.fail_load {
            return Err(WidgetError::LoadPages("bad page markup".to_string()));
        }
        self.pages = pages.to_vec();
        Ok(())
    }

    fn on_flip(&mut self, handler: FlipHandler) {
        self.handler = Some(handler);
    }

    fn flip_next(&mut self) {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
            self.emit();
        }
    }

    fn flip_prev(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.emit();
        }
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn destroy(&mut self) -> Result<(), WidgetError> {
        self.destroyed.set(self.destroyed.get() + 1);
        if self.fail_destroy {
            return Err(WidgetError::Destroy("already detached".to_string()));
        }
        Ok(())
    }
}
