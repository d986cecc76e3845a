//! Album application.
//!
//! Ties the album state, the local cache, the media host and the render
//! scheduler together:
//! - Load: show the cached album at once, then reconcile with the host
//! - Upload: validate, compress and upload files one by one
//! - Resize and tick: forwarded to the scheduler with the current viewport

use chrono::Utc;
use web_time::Instant;

use crate::cache::{LocalCache, StorageBackend};
use crate::constants::timing::OVERLAY_HIDE_DELAY;
use crate::layout::Viewport;
use crate::model::{AlbumState, Reconciliation};
use crate::render::{AlbumView, FlipbookFactory, RenderRequest, RenderScheduler, TickOutcome};
use crate::transport::MediaTransport;
use crate::upload::{
    BatchReport, FileFailure, SelectedFile, UploadObserver, process_file, status_text,
};

/// The photo album and everything that keeps it on screen.
pub struct AlbumApp<T, S, F, V>
where
    T: MediaTransport,
    S: StorageBackend,
    F: FlipbookFactory,
    V: AlbumView,
{
    transport: T,
    cache: LocalCache<S>,
    album: AlbumState,
    scheduler: RenderScheduler<F, V>,
    viewport: Viewport,
    /// When the post-upload reload runs.
    reload_at: Option<Instant>,
    /// Album changed while a rebuild held the lock; render again once it clears.
    rebuild_pending: bool,
}

impl<T, S, F, V> AlbumApp<T, S, F, V>
where
    T: MediaTransport,
    S: StorageBackend,
    F: FlipbookFactory,
    V: AlbumView,
{
    pub fn new(
        transport: T,
        cache: LocalCache<S>,
        scheduler: RenderScheduler<F, V>,
        viewport: Viewport,
    ) -> Self {
        Self {
            transport,
            cache,
            album: AlbumState::new(),
            scheduler,
            viewport,
            reload_at: None,
            rebuild_pending: false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn album(&self) -> &AlbumState {
        &self.album
    }

    pub fn cache(&self) -> &LocalCache<S> {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn scheduler(&self) -> &RenderScheduler<F, V> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut RenderScheduler<F, V> {
        &mut self.scheduler
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether a rebuild, a deferred rebuild or the post-upload reload is
    /// still outstanding.
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_rendering() || self.rebuild_pending || self.reload_at.is_some()
    }

    /// Earliest instant at which [`AlbumApp::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.scheduler.next_deadline(), self.reload_at]
            .into_iter()
            .flatten()
            .min()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Show the cached album, then reconcile it with the media host.
    ///
    /// Returns `None` if the listing could not be fetched. In that case the
    /// cached album stays on screen, or the placeholder if nothing is known.
    pub fn load_photos(&mut self, now: Instant) -> Option<Reconciliation> {
        let cached = self.cache.load();
        if !cached.is_empty() {
            log::info!("Showing {} cached photos", cached.len());
            self.album.replace(cached);
            self.render_album(now);
        }

        match self.transport.fetch_listing() {
            Ok(fresh) => {
                let outcome = self.album.reconcile(fresh);
                match outcome {
                    Reconciliation::Replaced => {
                        log::info!("Album updated from host ({} photos)", self.album.len());
                        self.persist();
                        self.render_album(now);
                    }
                    Reconciliation::Unchanged => {
                        log::debug!("Cached album matches host");
                    }
                }
                Some(outcome)
            }
            Err(e) => {
                log::warn!("Could not fetch album listing: {}", e);
                if self.album.is_empty() {
                    self.render_album(now);
                }
                None
            }
        }
    }

    // ========================================================================
    // Uploading
    // ========================================================================

    /// Upload `files` one after another.
    ///
    /// Each success is appended and cached immediately. Failures are reported
    /// through `observer` and skipped. Progress ends at 100 whatever the
    /// outcome, and a full reload follows once the overlay has had time to
    /// show it.
    pub fn upload_files(
        &mut self,
        now: Instant,
        files: &[SelectedFile],
        observer: &mut dyn UploadObserver,
    ) -> BatchReport {
        let total = files.len();
        let mut report = BatchReport::new(total);
        if total == 0 {
            return report;
        }

        observer.batch_started(total);
        observer.progress(0.0);

        for file in files {
            let index = report.uploaded.len() + 1;
            observer.file_started(index, total, &status_text(index, total));

            match process_file(file, &self.transport, Utc::now()) {
                Ok(record) => {
                    if self.album.append(record.clone()) {
                        self.persist();
                    } else {
                        log::warn!("Host returned known photo {}", record.public_id);
                    }
                    report.uploaded.push(record);
                    observer.progress(report.percent());
                }
                Err(e) => {
                    log::error!("Upload of {} failed: {}", file.name, e);
                    observer.file_failed(&file.name, &e);
                    report.failures.push(FileFailure {
                        name: file.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        observer.progress(100.0);
        observer.batch_finished(&report);
        self.reload_at = Some(now + OVERLAY_HIDE_DELAY);
        report
    }

    // ========================================================================
    // Viewport and timers
    // ========================================================================

    /// Record a viewport change reported by the host window.
    pub fn on_resize(&mut self, now: Instant, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.scheduler.on_resize_signal(now, !self.album.is_empty())
    }

    /// Run due timers: the post-upload reload, then the scheduler's, then
    /// any rebuild deferred while the lock was held.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.reload_at.take_if(|at| now >= *at).is_some() {
            log::debug!("Reloading album after upload");
            self.load_photos(now);
        }

        let outcome = self
            .scheduler
            .tick(now, self.album.photos(), self.viewport);

        if self.rebuild_pending && !self.scheduler.is_rendering() {
            self.rebuild_pending = false;
            log::debug!("Render lock released, rebuilding with updated album");
            self.render_album(now);
        }

        outcome
    }

    pub fn flip_next(&mut self) {
        self.scheduler.flip_next();
    }

    pub fn flip_prev(&mut self) {
        self.scheduler.flip_prev();
    }

    /// Rebuild for the current album. If a rebuild is already running the
    /// album is held and rendered once the lock clears.
    fn render_album(&mut self, now: Instant) {
        let request = self
            .scheduler
            .request_render(now, self.album.photos(), self.viewport);
        if request == RenderRequest::Busy {
            log::debug!("Render in progress, album rebuild deferred");
            self.rebuild_pending = true;
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.cache.store(self.album.photos()) {
            log::warn!("Failed to cache album under '{}': {}", self.cache.key(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::layout::PageContent;
    use crate::model::PhotoRecord;
    use crate::render::InitOutcome;
    use crate::render::testing::{FakeFactory, FakeView, Shown};
    use crate::transport::UploadedPhoto;
    use crate::transport::testing::FakeTransport;
    use crate::upload::{UploadError, tests::png_bytes};
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    type TestApp = AlbumApp<FakeTransport, MemoryStorage, FakeFactory, FakeView>;

    const DESKTOP: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn photo(id: &str, minute: u32) -> PhotoRecord {
        PhotoRecord::new(
            format!("https://img/{id}.jpg"),
            id,
            Utc.with_ymd_and_hms(2024, 3, 3, 10, minute, 0).unwrap(),
        )
    }

    fn app_with(transport: FakeTransport, storage: MemoryStorage) -> TestApp {
        let scheduler = RenderScheduler::with_random(
            FakeFactory::default(),
            FakeView::default(),
            Box::new(StdRng::seed_from_u64(3)),
        );
        AlbumApp::new(
            transport,
            LocalCache::new(storage, "album"),
            scheduler,
            DESKTOP,
        )
    }

    fn seeded_storage(photos: &[PhotoRecord]) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage
            .write("album", &serde_json::to_string(photos).unwrap())
            .unwrap();
        storage
    }

    fn uploaded(id: &str) -> UploadedPhoto {
        UploadedPhoto {
            secure_url: format!("https://img/{id}.jpg"),
            public_id: id.to_string(),
            created_at: None,
        }
    }

    /// Tick every 50ms until nothing is outstanding; returns the final instant.
    fn settle(app: &mut TestApp, start: Instant) -> Instant {
        let mut now = start;
        for _ in 0..100 {
            if !app.is_busy() {
                return now;
            }
            now += ms(50);
            app.tick(now);
        }
        panic!("app did not settle");
    }

    /// Photo urls on the live book, in page order.
    fn shown_urls(app: &TestApp) -> Vec<String> {
        let book = app.scheduler().book().expect("no live book");
        book.pages
            .iter()
            .filter_map(|page| match &page.content {
                PageContent::Photos(polaroids) => Some(polaroids.iter().map(|p| p.url.clone())),
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[derive(Default)]
    struct Recorder {
        statuses: Vec<String>,
        progress: Vec<f32>,
        failures: Vec<String>,
        finished: usize,
    }

    impl UploadObserver for Recorder {
        fn file_started(&mut self, _index: usize, _total: usize, status: &str) {
            self.statuses.push(status.to_string());
        }

        fn progress(&mut self, percent: f32) {
            self.progress.push(percent);
        }

        fn file_failed(&mut self, name: &str, error: &UploadError) {
            self.failures.push(format!("{name}: {error}"));
        }

        fn batch_finished(&mut self, _report: &BatchReport) {
            self.finished += 1;
        }
    }

    #[test]
    fn test_identical_listing_keeps_cache_and_single_render() {
        let album = vec![photo("a", 1), photo("b", 2)];
        let transport = FakeTransport::new();
        transport.set_listing(Ok(album.clone()));
        let mut app = app_with(transport, seeded_storage(&album));
        let writes_before = app.cache().backend().write_count();

        let t0 = Instant::now();
        assert_eq!(app.load_photos(t0), Some(Reconciliation::Unchanged));

        assert_eq!(app.cache().backend().write_count(), writes_before);
        assert_eq!(app.album().photos(), album.as_slice());
        assert!(app.scheduler().is_rendering());

        let outcome = app.tick(t0 + ms(150));
        assert_eq!(outcome.init, Some(InitOutcome::Ready { page_count: 4 }));
        assert_eq!(app.scheduler().factory().created, 1);
    }

    #[test]
    fn test_changed_listing_replaces_and_caches() {
        let transport = FakeTransport::new();
        transport.set_listing(Ok(vec![photo("a", 1), photo("c", 3)]));
        let mut app = app_with(transport, seeded_storage(&[photo("a", 1)]));

        let t0 = Instant::now();
        assert_eq!(app.load_photos(t0), Some(Reconciliation::Replaced));

        assert_eq!(app.album().len(), 2);
        assert_eq!(app.cache().load(), app.album().photos());
    }

    #[test]
    fn test_changed_listing_is_drawn_after_cache_render() {
        let transport = FakeTransport::new();
        transport.set_listing(Ok(vec![photo("a", 1), photo("c", 3)]));
        let mut app = app_with(transport, seeded_storage(&[photo("a", 1)]));

        let t0 = Instant::now();
        app.load_photos(t0);
        assert!(app.is_busy());

        // The cached album goes up first. Its lock clears on the same tick,
        // so the fresh album is scheduled right away and the cached book torn down.
        let outcome = app.tick(t0 + ms(150));
        assert_eq!(outcome.init, Some(InitOutcome::Ready { page_count: 4 }));
        assert!(app.scheduler().is_rendering());
        assert_eq!(app.scheduler().factory().destroyed.get(), 1);

        let done = settle(&mut app, t0 + ms(150));
        app.tick(done + ms(10_000));

        assert_eq!(shown_urls(&app), ["https://img/a.jpg", "https://img/c.jpg"]);
        assert_eq!(app.scheduler().factory().created, 2);
        assert!(!app.is_busy());
    }

    #[test]
    fn test_identical_listing_builds_once() {
        let album = vec![photo("a", 1), photo("b", 2)];
        let transport = FakeTransport::new();
        transport.set_listing(Ok(album.clone()));
        let mut app = app_with(transport, seeded_storage(&album));

        let t0 = Instant::now();
        app.load_photos(t0);
        settle(&mut app, t0);

        assert_eq!(app.scheduler().factory().created, 1);
        assert_eq!(shown_urls(&app), ["https://img/a.jpg", "https://img/b.jpg"]);
    }

    #[test]
    fn test_empty_cache_renders_after_listing() {
        let transport = FakeTransport::new();
        transport.set_listing(Ok(vec![photo("a", 1)]));
        let mut app = app_with(transport, MemoryStorage::new());

        let t0 = Instant::now();
        app.load_photos(t0);
        assert_eq!(app.scheduler().view().shown, Shown::Flipbook);

        let outcome = app.tick(t0 + ms(150));
        // cover, photo page, blank, back cover
        assert_eq!(outcome.init, Some(InitOutcome::Ready { page_count: 4 }));
    }

    #[test]
    fn test_listing_failure_with_empty_album_shows_placeholder() {
        let mut app = app_with(FakeTransport::new(), MemoryStorage::new());

        assert_eq!(app.load_photos(Instant::now()), None);

        assert_eq!(app.scheduler().view().shown, Shown::EmptyState);
        assert!(!app.scheduler().is_rendering());
        assert_eq!(app.cache().backend().write_count(), 0);
    }

    #[test]
    fn test_listing_failure_keeps_cached_album() {
        let album = vec![photo("a", 1)];
        let mut app = app_with(FakeTransport::new(), seeded_storage(&album));

        assert_eq!(app.load_photos(Instant::now()), None);

        assert_eq!(app.album().photos(), album.as_slice());
        assert_eq!(app.scheduler().view().shown, Shown::Flipbook);
        assert_eq!(app.scheduler().view().empty_calls, 0);
    }

    #[test]
    fn test_two_uploads_then_reload_builds_two_photo_book() {
        let transport = FakeTransport::new();
        transport.push_upload(Ok(uploaded("one")));
        transport.push_upload(Ok(uploaded("two")));
        let mut app = app_with(transport, MemoryStorage::new());

        let files = vec![
            SelectedFile::new("one.png", "image/png", png_bytes(8, 8)),
            SelectedFile::new("two.png", "image/png", png_bytes(8, 8)),
        ];
        let mut recorder = Recorder::default();
        let t0 = Instant::now();
        let report = app.upload_files(t0, &files, &mut recorder);

        assert_eq!(report.uploaded.len(), 2);
        assert!(report.failures.is_empty());
        assert_eq!(recorder.statuses, ["Uploading 1/2\u{2026}", "Uploading 2/2\u{2026}"]);
        assert_eq!(recorder.progress, [0.0, 50.0, 100.0, 100.0]);
        assert_eq!(recorder.finished, 1);

        // Each success was cached immediately.
        assert_eq!(app.cache().backend().write_count(), 2);
        let ids: Vec<_> = app.cache().load().into_iter().map(|p| p.public_id).collect();
        assert_eq!(ids, ["one", "two"]);

        // Reload waits for the overlay to hide.
        assert!(app.is_busy());
        app.tick(t0 + ms(499));
        assert!(!app.scheduler().is_rendering());

        let reload = t0 + OVERLAY_HIDE_DELAY;
        app.tick(reload);
        assert!(app.scheduler().is_rendering());

        let outcome = app.tick(reload + ms(150));
        // cover, one desktop page with both photos, blank, back cover
        assert_eq!(outcome.init, Some(InitOutcome::Ready { page_count: 4 }));
        let book = app.scheduler().book().unwrap();
        assert!(matches!(&book.pages[1].content, PageContent::Photos(p) if p.len() == 2));
        assert!(!app.is_busy());
    }

    #[test]
    fn test_reload_after_upload_shows_listing() {
        let transport = FakeTransport::new();
        transport.push_upload(Ok(uploaded("one")));
        transport.push_upload(Ok(uploaded("two")));
        let mut app = app_with(transport, MemoryStorage::new());

        let files = vec![
            SelectedFile::new("one.png", "image/png", png_bytes(8, 8)),
            SelectedFile::new("two.png", "image/png", png_bytes(8, 8)),
        ];
        let t0 = Instant::now();
        app.upload_files(t0, &files, &mut Recorder::default());

        // The listing serves template urls, unlike the upload responses.
        let listed = vec![
            PhotoRecord::new("https://cdn/one.jpg", "one", Utc::now()),
            PhotoRecord::new("https://cdn/two.jpg", "two", Utc::now()),
        ];
        app.transport().set_listing(Ok(listed.clone()));

        settle(&mut app, t0);

        assert_eq!(app.album().photos(), listed.as_slice());
        assert_eq!(app.cache().load(), listed);
        assert_eq!(shown_urls(&app), ["https://cdn/one.jpg", "https://cdn/two.jpg"]);
        assert_eq!(app.scheduler().factory().created, 2);
    }

    #[test]
    fn test_oversized_file_fails_alone() {
        let transport = FakeTransport::new();
        transport.push_upload(Ok(uploaded("first")));
        transport.push_upload(Ok(uploaded("third")));
        let mut app = app_with(transport, MemoryStorage::new());

        let mut huge = SelectedFile::new("huge.jpg", "image/jpeg", Vec::new());
        huge.size = 12 * 1024 * 1024;
        let files = vec![
            SelectedFile::new("first.png", "image/png", png_bytes(8, 8)),
            huge,
            SelectedFile::new("third.png", "image/png", png_bytes(8, 8)),
        ];
        let mut recorder = Recorder::default();
        let report = app.upload_files(Instant::now(), &files, &mut recorder);

        assert_eq!(recorder.failures, ["huge.jpg: Too large (>10MB)"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.uploaded.len(), 2);
        assert_eq!(app.transport().uploads.borrow().len(), 2);
        assert_eq!(recorder.progress.last(), Some(&100.0));
        // The failed file does not advance the counter.
        assert_eq!(
            recorder.statuses,
            ["Uploading 1/3\u{2026}", "Uploading 2/3\u{2026}", "Uploading 2/3\u{2026}"]
        );
    }

    #[test]
    fn test_all_failures_still_finish_batch() {
        let mut app = app_with(FakeTransport::new(), MemoryStorage::new());
        let files = vec![SelectedFile::new("a.png", "image/png", png_bytes(4, 4))];
        let mut recorder = Recorder::default();

        let report = app.upload_files(Instant::now(), &files, &mut recorder);

        assert!(report.uploaded.is_empty());
        assert_eq!(recorder.failures, ["a.png: Network error: no response queued"]);
        assert_eq!(recorder.progress, [0.0, 100.0]);
        assert!(app.album().is_empty());
        assert_eq!(app.cache().backend().write_count(), 0);
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut app = app_with(FakeTransport::new(), MemoryStorage::new());
        let mut recorder = Recorder::default();
        let report = app.upload_files(Instant::now(), &[], &mut recorder);
        assert_eq!(report.total, 0);
        assert!(recorder.progress.is_empty());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut app = app_with(FakeTransport::new(), MemoryStorage::new());
        let narrow = Viewport::new(390.0, 844.0);

        // Nothing rendered yet, so the signal is ignored, but the viewport sticks.
        assert!(!app.on_resize(Instant::now(), narrow));
        assert_eq!(app.viewport(), narrow);
    }
}
