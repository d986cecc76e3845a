//! Page size math.
//!
//! Dimensions are always derived from the viewport and never edited in place.

use serde::{Deserialize, Serialize};

use crate::constants::layout::{
    DESKTOP_CHROME_ALLOWANCE, DESKTOP_SPREAD_MARGIN, MOBILE_DIMENSION_BREAKPOINT,
    MOBILE_HEIGHT_RATIO, MOBILE_LAYOUT_BREAKPOINT, MOBILE_MAX_WIDTH, MOBILE_SIDE_MARGIN,
    PAGE_ASPECT, PHOTOS_PER_PAGE_DESKTOP, PHOTOS_PER_PAGE_MOBILE,
};

/// Visible area the book is laid out in, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether photos are laid out one per page.
    pub fn is_mobile_layout(&self) -> bool {
        self.width < MOBILE_LAYOUT_BREAKPOINT
    }

    /// Photos placed on each page at this width.
    pub fn photos_per_page(&self) -> usize {
        if self.is_mobile_layout() {
            PHOTOS_PER_PAGE_MOBILE
        } else {
            PHOTOS_PER_PAGE_DESKTOP
        }
    }
}

/// Target size of a single page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either axis moved by more than `tolerance` pixels.
    pub fn differs_from(&self, other: &Dimensions, tolerance: u32) -> bool {
        self.width.abs_diff(other.width) > tolerance
            || self.height.abs_diff(other.height) > tolerance
    }
}

/// Compute the page size for a viewport.
///
/// Narrow viewports get a single column capped at 600px wide with a 1.4
/// height ratio. Wide viewports fit a 3:4 page into half the spread, then
/// shrink to the available height if needed.
pub fn compute_dimensions(viewport: Viewport) -> Dimensions {
    if viewport.width < MOBILE_DIMENSION_BREAKPOINT {
        let width = (viewport.width - MOBILE_SIDE_MARGIN)
            .min(MOBILE_MAX_WIDTH)
            .floor()
            .max(0.0);
        let height = (width * MOBILE_HEIGHT_RATIO).round();
        return Dimensions::new(width as u32, height as u32);
    }

    let max_spread_width = viewport.width - DESKTOP_SPREAD_MARGIN;
    let max_page_height = viewport.height - DESKTOP_CHROME_ALLOWANCE;

    let mut page_width = max_spread_width / 2.0;
    let mut page_height = page_width / PAGE_ASPECT;

    if page_height > max_page_height {
        page_height = max_page_height;
        page_width = page_height * PAGE_ASPECT;
    }

    Dimensions::new(
        page_width.floor().max(0.0) as u32,
        page_height.floor().max(0.0) as u32,
    )
}
