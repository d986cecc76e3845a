//! Render scheduler.
//!
//! Decides when the flip-book is rebuilt. Two triggers exist: data changes
//! (upload, reconciliation) and viewport resizes. A rebuild holds a lock
//! from the moment it starts until the widget finishes initialising;
//! triggers that arrive while it is held are dropped, not queued.
//!
//! The widget reflows its container once shortly after it starts, which the
//! resize observer reports like any other resize. The scheduler absorbs
//! exactly one such reflow per completed render (the auto-resize budget) and
//! ignores resizes during a cooldown after each render, so the book does not
//! rebuild itself in a loop.
//!
//! Time is passed in explicitly. The host calls [`RenderScheduler::tick`]
//! once per frame; timers (settle delay, resize debounce, arming delay) fire
//! on the first tick at or after their deadline.

use web_time::Instant;

use super::session::RenderSession;
use super::view::{AlbumView, PageIndicator};
use super::widget::{Flipbook, FlipbookFactory, FlipbookSettings, WidgetError};
use crate::constants::AUTO_RESIZE_BUDGET;
use crate::constants::layout::DIMENSION_TOLERANCE;
use crate::constants::timing::{
    ARMING_DELAY, RENDER_COOLDOWN, RESIZE_DEBOUNCE, SETTLE_BURST_WINDOW, SETTLE_DELAY,
};
use crate::layout::{
    BookLayout, Dimensions, RandomSource, Viewport, build_pages, compute_dimensions,
};
use crate::model::PhotoRecord;

/// Result of asking for a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    /// Another rebuild holds the lock; this request was dropped.
    Busy,
    /// The album is empty; the placeholder is showing.
    Empty,
    /// Pages were built; the widget starts after the settle delay.
    Scheduled,
}

/// What happened to a debounced resize signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDecision {
    /// Too soon after the last render.
    Cooldown,
    /// Page size moved less than the tolerance on both axes.
    Unchanged,
    /// Part of the widget's settling burst; only the size was recorded.
    SettleAbsorbed,
    /// First reflow after a render; budget spent, no rebuild.
    BudgetConsumed,
    /// Genuine size change; a rebuild was requested.
    Rebuild(RenderRequest),
}

/// Result of starting the widget after the settle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The widget is live with this many pages.
    Ready { page_count: usize },
    /// Initialization failed; the lock was released and nothing else changed.
    Failed,
}

/// Timers that fired during one [`RenderScheduler::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub init: Option<InitOutcome>,
    /// Resize handling was armed on this tick.
    pub armed: bool,
    pub resize: Option<ResizeDecision>,
}

impl TickOutcome {
    /// Whether any timer fired.
    pub fn is_empty(&self) -> bool {
        self.init.is_none() && !self.armed && self.resize.is_none()
    }
}

/// Pages waiting for the container to settle before the widget starts.
struct PendingInit {
    due: Instant,
    dimensions: Dimensions,
    layout: BookLayout,
}

/// Owns the widget instance and the container, and guards rebuilds.
pub struct RenderScheduler<F: FlipbookFactory, V: AlbumView> {
    factory: F,
    view: V,
    rng: Box<dyn RandomSource>,
    session: RenderSession,
    book: Option<F::Book>,
    indicator: PageIndicator,
    pending_init: Option<PendingInit>,
    resize_deadline: Option<Instant>,
    arm_at: Option<Instant>,
}

impl<F: FlipbookFactory, V: AlbumView> RenderScheduler<F, V> {
    /// Create a scheduler with thread-local randomness for decorations.
    pub fn new(factory: F, view: V) -> Self {
        Self::with_random(factory, view, Box::new(rand::rng()))
    }

    /// Create a scheduler with an explicit randomness source.
    pub fn with_random(factory: F, view: V, rng: Box<dyn RandomSource>) -> Self {
        Self {
            factory,
            view,
            rng,
            session: RenderSession::new(),
            book: None,
            indicator: PageIndicator::new(),
            pending_init: None,
            resize_deadline: None,
            arm_at: None,
        }
    }

    /// Session flags.
    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    /// The container surface.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The widget factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The live widget, if any.
    pub fn book(&self) -> Option<&F::Book> {
        self.book.as_ref()
    }

    /// Mutable access to the live widget, if any.
    pub fn book_mut(&mut self) -> Option<&mut F::Book> {
        self.book.as_mut()
    }

    /// Whether a widget instance exists.
    pub fn has_widget(&self) -> bool {
        self.book.is_some()
    }

    /// "Page n of m" label.
    pub fn page_indicator(&self) -> &PageIndicator {
        &self.indicator
    }

    /// Whether a rebuild holds the lock.
    pub fn is_rendering(&self) -> bool {
        self.session.in_progress
    }

    /// True when no rebuild is running and no timer is pending.
    pub fn is_idle(&self) -> bool {
        !self.session.in_progress
            && self.pending_init.is_none()
            && self.resize_deadline.is_none()
            && self.arm_at.is_none()
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.pending_init.as_ref().map(|p| p.due),
            self.resize_deadline,
            self.arm_at,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Turn to the next page of the live book.
    pub fn flip_next(&mut self) {
        if let Some(book) = self.book.as_mut() {
            book.flip_next();
        }
    }

    /// Turn to the previous page of the live book.
    pub fn flip_prev(&mut self) {
        if let Some(book) = self.book.as_mut() {
            book.flip_prev();
        }
    }

    /// Start a full rebuild of the book for `photos`.
    ///
    /// Dropped if a rebuild is already running. An empty album shows the
    /// placeholder and releases the lock immediately. Otherwise the old
    /// widget is torn down, pages are built, and the new widget starts on
    /// the first tick after the settle delay.
    pub fn request_render(
        &mut self,
        now: Instant,
        photos: &[PhotoRecord],
        viewport: Viewport,
    ) -> RenderRequest {
        if self.session.in_progress {
            log::debug!("Render already in progress, skipping");
            return RenderRequest::Busy;
        }

        self.session.in_progress = true;

        if photos.is_empty() {
            log::info!("Album is empty, showing placeholder");
            self.view.show_empty_state();
            self.indicator.set_visible(false);
            self.session.in_progress = false;
            return RenderRequest::Empty;
        }

        self.view.show_flipbook();
        self.indicator.set_visible(true);

        let dimensions = compute_dimensions(viewport);
        self.session.last_dimensions = Some(dimensions);
        log::debug!(
            "Render dimensions: {}x{}",
            dimensions.width,
            dimensions.height
        );

        self.teardown_widget();
        self.view.clear_container();

        let layout = build_pages(photos, viewport.width, self.rng.as_mut());
        self.pending_init = Some(PendingInit {
            due: now + SETTLE_DELAY,
            dimensions,
            layout,
        });

        RenderRequest::Scheduled
    }

    /// Record a raw resize signal from the viewport observer.
    ///
    /// Returns `false` if the signal was ignored outright (not armed yet,
    /// nothing to show, or a rebuild is running). Otherwise the debounce
    /// timer restarts and only the last signal of a burst is evaluated.
    pub fn on_resize_signal(&mut self, now: Instant, has_photos: bool) -> bool {
        if !self.session.first_render_complete || !has_photos || self.session.in_progress {
            log::trace!("Resize signal ignored");
            return false;
        }

        self.resize_deadline = Some(now + RESIZE_DEBOUNCE);
        true
    }

    /// Fire every timer whose deadline has passed.
    pub fn tick(&mut self, now: Instant, photos: &[PhotoRecord], viewport: Viewport) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if let Some(pending) = self.pending_init.take_if(|p| now >= p.due) {
            outcome.init = Some(self.initialize_widget(now, pending));
        }

        if self.arm_at.take_if(|at| now >= *at).is_some() {
            self.session.first_render_complete = true;
            log::info!("Resize handling enabled");
            outcome.armed = true;
        }

        if self.resize_deadline.take_if(|at| now >= *at).is_some() {
            outcome.resize = Some(self.evaluate_resize(now, photos, viewport));
        }

        outcome
    }

    /// Decide what a debounced resize means.
    fn evaluate_resize(
        &mut self,
        now: Instant,
        photos: &[PhotoRecord],
        viewport: Viewport,
    ) -> ResizeDecision {
        if let Some(elapsed) = self.session.since_last_render(now) {
            if elapsed < RENDER_COOLDOWN {
                log::debug!(
                    "Resize skipped (cooldown: {}ms < {}ms)",
                    elapsed.as_millis(),
                    RENDER_COOLDOWN.as_millis()
                );
                return ResizeDecision::Cooldown;
            }
        }

        let new_dims = compute_dimensions(viewport);
        let changed = match self.session.last_dimensions {
            Some(old) => new_dims.differs_from(&old, DIMENSION_TOLERANCE),
            None => true,
        };
        if !changed {
            log::trace!("Resize within tolerance, ignoring");
            return ResizeDecision::Unchanged;
        }

        let same_burst = self
            .session
            .since_last_resize_event(now)
            .is_some_and(|elapsed| elapsed < SETTLE_BURST_WINDOW);
        let old_dims = self.session.last_dimensions;

        if self.session.auto_resize_budget > 0 && same_burst {
            log::debug!(
                "Auto-resize (part of settling burst), updating dimensions only: {:?} -> {:?}",
                old_dims,
                new_dims
            );
            self.session.last_dimensions = Some(new_dims);
            return ResizeDecision::SettleAbsorbed;
        }

        if self.session.auto_resize_budget > 0 {
            log::debug!(
                "First auto-resize allowed, updating dimensions only: {:?} -> {:?}",
                old_dims,
                new_dims
            );
            self.session.auto_resize_budget -= 1;
            self.session.last_dimensions = Some(new_dims);
            self.session.last_render_at = Some(now);
            self.session.last_resize_event_at = Some(now);
            return ResizeDecision::BudgetConsumed;
        }

        log::info!(
            "Dimension change detected: {:?} -> {:?}, re-rendering",
            old_dims,
            new_dims
        );
        self.session.last_dimensions = Some(new_dims);
        self.session.last_render_at = Some(now);
        self.session.last_resize_event_at = Some(now);

        ResizeDecision::Rebuild(self.request_render(now, photos, viewport))
    }

    /// Start the widget with the pages built by the last request.
    fn initialize_widget(&mut self, now: Instant, pending: PendingInit) -> InitOutcome {
        let settings = FlipbookSettings::for_dimensions(pending.dimensions);
        log::info!(
            "Initializing flip-book with {} pages",
            pending.layout.page_count()
        );

        match self.create_book(&settings, &pending.layout) {
            Ok(book) => {
                let page_count = book.page_count();
                self.book = Some(book);
                self.session.in_progress = false;
                self.session.last_render_at = Some(now);
                self.session.auto_resize_budget = AUTO_RESIZE_BUDGET;
                self.arm_at = Some(now + ARMING_DELAY);
                log::info!("Flip-book initialized successfully");
                InitOutcome::Ready { page_count }
            }
            Err(e) => {
                log::error!("Flip-book init error: {}", e);
                self.session.in_progress = false;
                InitOutcome::Failed
            }
        }
    }

    fn create_book(
        &mut self,
        settings: &FlipbookSettings,
        layout: &BookLayout,
    ) -> Result<F::Book, WidgetError> {
        if layout.pages.is_empty() {
            return Err(WidgetError::NoPages);
        }

        let mut book = self.factory.create(settings)?;
        if let Err(e) = book.load_pages(&layout.pages) {
            if let Err(destroy_err) = book.destroy() {
                log::debug!("Ignoring teardown error after failed load: {}", destroy_err);
            }
            return Err(e);
        }

        let indicator = self.indicator.clone();
        book.on_flip(Box::new(move |event| {
            indicator.show_page(event.page, event.page_count);
        }));

        Ok(book)
    }

    fn teardown_widget(&mut self) {
        if let Some(mut book) = self.book.take() {
            if let Err(e) = book.destroy() {
                log::debug!("Ignoring flip-book teardown error: {}", e);
            }
        }
    }

    #[cfg(test)]
    pub(super) fn session_mut(&mut self) -> &mut RenderSession {
        &mut self.session
    }

    #[cfg(test)]
    pub(super) fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }
}
