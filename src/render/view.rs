//! Album container surface.

use std::cell::RefCell;
use std::rc::Rc;

/// The container the book lives in, plus the empty-state placeholder.
pub trait AlbumView {
    /// Show the "no photos yet" placeholder and hide the book container.
    fn show_empty_state(&mut self);

    /// Hide the placeholder and show the book container.
    fn show_flipbook(&mut self);

    /// Remove all page elements from the book container.
    fn clear_container(&mut self);
}

#[derive(Debug, Default)]
struct IndicatorState {
    visible: bool,
    text: String,
}

/// Shared "Page n of m" label, updated from the widget's flip callback.
#[derive(Debug, Clone, Default)]
pub struct PageIndicator {
    state: Rc<RefCell<IndicatorState>>,
}

impl PageIndicator {
    /// Create a hidden, empty indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the indicator is shown.
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Current label text.
    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    pub(crate) fn show_page(&self, page: usize, page_count: usize) {
        self.state.borrow_mut().text = format!("Page {} of {}", page + 1, page_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_is_shared() {
        let indicator = PageIndicator::new();
        let handle = indicator.clone();
        assert!(!indicator.is_visible());

        handle.set_visible(true);
        handle.show_page(2, 8);
        assert!(indicator.is_visible());
        assert_eq!(indicator.text(), "Page 3 of 8");
    }
}
