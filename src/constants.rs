//! Global constants for the flip-book album.
//!
//! Timings, breakpoints and limits live here so the scheduler, layout engine
//! and upload pipeline agree on the same numbers.

/// Upload limits and compression parameters.
pub mod upload {
    /// Largest accepted source file (10 MiB).
    pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
    /// Longest side of a compressed image, in pixels.
    pub const COMPRESS_MAX_DIM: u32 = 2000;
    /// JPEG quality used when re-encoding (0-100).
    pub const COMPRESS_QUALITY: u8 = 85;
    /// MIME types accepted from the file picker.
    pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];
    /// MIME type of the compressed output.
    pub const COMPRESSED_MIME_TYPE: &str = "image/jpeg";
}

/// Scheduler delays.
pub mod timing {
    use std::time::Duration;

    /// Settle delay between building pages and initialising the widget.
    pub const SETTLE_DELAY: Duration = Duration::from_millis(150);
    /// Debounce window for raw resize signals.
    pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(600);
    /// Minimum time after a completed render before a resize is evaluated.
    pub const RENDER_COOLDOWN: Duration = Duration::from_millis(2000);
    /// Delay after a completed render before resize handling is armed.
    pub const ARMING_DELAY: Duration = Duration::from_millis(2000);
    /// Resize signals closer than this belong to the same settling burst.
    pub const SETTLE_BURST_WINDOW: Duration = Duration::from_millis(1000);
    /// How long the upload overlay lingers at 100% before reloading.
    pub const OVERLAY_HIDE_DELAY: Duration = Duration::from_millis(500);
}

/// Page geometry.
pub mod layout {
    /// Below this viewport width, one photo goes on each page.
    pub const MOBILE_LAYOUT_BREAKPOINT: f32 = 760.0;
    /// Below this viewport width, pages are sized for a single column.
    pub const MOBILE_DIMENSION_BREAKPOINT: f32 = 768.0;
    /// Horizontal margin subtracted from the viewport on mobile.
    pub const MOBILE_SIDE_MARGIN: f32 = 30.0;
    /// Widest page allowed on mobile.
    pub const MOBILE_MAX_WIDTH: f32 = 600.0;
    /// Mobile page height as a multiple of its width.
    pub const MOBILE_HEIGHT_RATIO: f32 = 1.4;
    /// Horizontal margin subtracted from the spread on desktop.
    pub const DESKTOP_SPREAD_MARGIN: f32 = 40.0;
    /// Vertical room reserved for header and footer on desktop.
    pub const DESKTOP_CHROME_ALLOWANCE: f32 = 60.0;
    /// Desktop page aspect ratio (width / height).
    pub const PAGE_ASPECT: f32 = 0.75;
    /// Per-axis pixel difference below which dimensions count as unchanged.
    pub const DIMENSION_TOLERANCE: u32 = 20;
    /// Photos per page on narrow viewports.
    pub const PHOTOS_PER_PAGE_MOBILE: usize = 1;
    /// Photos per page on wide viewports.
    pub const PHOTOS_PER_PAGE_DESKTOP: usize = 2;
}

/// Self-inflicted widget reflows absorbed after each completed render.
pub const AUTO_RESIZE_BUDGET: u32 = 1;
