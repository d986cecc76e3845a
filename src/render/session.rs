//! Render session flags.
//!
//! One instance lives for the whole page session and is mutated only by
//! [`RenderScheduler`](super::RenderScheduler).

use std::time::Duration;

use web_time::Instant;

use crate::constants::AUTO_RESIZE_BUDGET;
use crate::layout::Dimensions;

/// Scheduler bookkeeping: render lock, arming state, resize budget and timestamps.
#[derive(Debug, Clone)]
pub struct RenderSession {
    pub(super) in_progress: bool,
    pub(super) first_render_complete: bool,
    pub(super) last_render_at: Option<Instant>,
    pub(super) last_resize_event_at: Option<Instant>,
    pub(super) auto_resize_budget: u32,
    pub(super) last_dimensions: Option<Dimensions>,
}

impl RenderSession {
    /// Fresh session: idle, unarmed, full budget.
    pub fn new() -> Self {
        Self {
            in_progress: false,
            first_render_complete: false,
            last_render_at: None,
            last_resize_event_at: None,
            auto_resize_budget: AUTO_RESIZE_BUDGET,
            last_dimensions: None,
        }
    }

    /// Whether resize handling has been armed.
    pub fn has_completed_first_render(&self) -> bool {
        self.first_render_complete
    }

    /// When the last render (or resize acceptance) completed.
    pub fn last_render_at(&self) -> Option<Instant> {
        self.last_render_at
    }

    /// When the last resize signal was acted on.
    pub fn last_resize_event_at(&self) -> Option<Instant> {
        self.last_resize_event_at
    }

    /// Automatic settle-resizes still allowed without a rebuild.
    pub fn auto_resize_budget(&self) -> u32 {
        self.auto_resize_budget
    }

    /// Page size the book was last laid out with.
    pub fn last_dimensions(&self) -> Option<Dimensions> {
        self.last_dimensions
    }

    /// Time since the last render; `None` if nothing has rendered yet.
    pub fn since_last_render(&self, now: Instant) -> Option<Duration> {
        self.last_render_at
            .map(|at| now.saturating_duration_since(at))
    }

    /// Time since the last resize signal was acted on.
    pub fn since_last_resize_event(&self, now: Instant) -> Option<Duration> {
        self.last_resize_event_at
            .map(|at| now.saturating_duration_since(at))
    }
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new()
    }
}
